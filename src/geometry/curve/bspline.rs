use crate::math::{lerp_point, Point3};

/// Degree of the fitted B-spline.
pub const DEGREE: usize = 3;

/// A uniform cubic B-spline defined by a control polygon.
///
/// Open splines use a clamped knot vector, so the curve starts at the first
/// control point and ends at the last. Closed splines use a periodic uniform
/// knot vector and wrap the control polygon, producing a seamless loop.
///
/// The curve does not generally pass through the interior control points;
/// it is evaluated with De Boor's algorithm.
#[derive(Debug, Clone)]
pub struct BSpline {
    control: Vec<Point3>,
    closed: bool,
    knots: Vec<f64>,
}

impl BSpline {
    /// Creates a new B-spline. `control` must hold more than [`DEGREE`]
    /// points.
    #[must_use]
    pub fn new(control: Vec<Point3>, closed: bool) -> Self {
        let knots = if closed {
            periodic_knots(control.len())
        } else {
            clamped_knots(control.len())
        };
        Self {
            control,
            closed,
            knots,
        }
    }

    /// Returns the control polygon.
    #[must_use]
    pub fn control_points(&self) -> &[Point3] {
        &self.control
    }

    /// Returns the knot vector.
    #[must_use]
    pub fn knot_vector(&self) -> &[f64] {
        &self.knots
    }

    /// Returns the end of the parameter domain: `1` for open splines and the
    /// control point count for closed ones.
    #[must_use]
    pub fn domain_end(&self) -> f64 {
        if self.closed {
            #[allow(clippy::cast_precision_loss)]
            let n = self.control.len() as f64;
            n
        } else {
            1.0
        }
    }

    /// Evaluates the spline at `u` in `[0, domain_end]`.
    ///
    /// Closed splines wrap `u` into the domain.
    #[must_use]
    pub fn evaluate(&self, u: f64) -> Point3 {
        if self.closed {
            self.evaluate_periodic(u)
        } else {
            self.evaluate_clamped(u)
        }
    }

    /// Samples the spline at `count` evenly spaced parameters.
    ///
    /// Open splines include both domain ends. Closed splines stop one step
    /// short of the end, since it coincides with the start.
    #[must_use]
    pub fn sample(&self, count: usize) -> Vec<Point3> {
        let end = self.domain_end();
        (0..count)
            .map(|i| {
                let u = if self.closed {
                    crate::math::step(0.0, end, i, count)
                } else {
                    crate::math::step(0.0, end, i, count.saturating_sub(1))
                };
                self.evaluate(u)
            })
            .collect()
    }

    /// Greville abscissa of control point `index`, normalized to `[0, 1]`.
    ///
    /// This is where the control point has the strongest pull on the curve.
    #[must_use]
    pub fn greville(&self, index: usize) -> f64 {
        if self.closed {
            // The control polygon is shifted by one, so point `i` peaks at `u = i`.
            #[allow(clippy::cast_precision_loss)]
            let g = index as f64 / self.control.len() as f64;
            return g;
        }
        let sum: f64 = self.knots[index + 1..=index + DEGREE].iter().sum();
        #[allow(clippy::cast_precision_loss)]
        let g = sum / DEGREE as f64;
        g
    }

    fn evaluate_clamped(&self, u: f64) -> Point3 {
        let n = self.control.len();
        let u = u.clamp(0.0, 1.0);
        let mut span = DEGREE;
        for i in DEGREE + 1..n {
            if u < self.knots[i] {
                break;
            }
            span = i;
        }
        let mut d: Vec<Point3> = (0..=DEGREE)
            .map(|j| self.control[(span + j).saturating_sub(DEGREE).min(n - 1)])
            .collect();
        self.de_boor(&mut d, span, u);
        d[DEGREE]
    }

    fn evaluate_periodic(&self, u: f64) -> Point3 {
        let n = self.control.len();
        let end = self.domain_end();
        let u = u.rem_euclid(end);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let start = (u.floor() as usize).min(n - 1);
        let span = start + DEGREE;
        let mut d: Vec<Point3> = (0..=DEGREE)
            .map(|j| self.control[(start + j + n - 1) % n])
            .collect();
        self.de_boor(&mut d, span, u);
        d[DEGREE]
    }

    /// Runs De Boor's triangular scheme in place over `d`.
    fn de_boor(&self, d: &mut [Point3], span: usize, u: f64) {
        for r in 1..=DEGREE {
            for j in (r..=DEGREE).rev() {
                let left = span + j - DEGREE;
                let right = span + 1 + j - r;
                let denominator = self.knots[right] - self.knots[left];
                let alpha = if denominator > 0.0 {
                    ((u - self.knots[left]) / denominator).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                d[j] = lerp_point(&d[j - 1], &d[j], alpha);
            }
        }
    }
}

/// Clamped knot vector over `[0, 1]` for `n` control points.
fn clamped_knots(n: usize) -> Vec<f64> {
    let mut knots = Vec::with_capacity(n + DEGREE + 1);
    knots.extend(std::iter::repeat_n(0.0, DEGREE + 1));
    for i in DEGREE + 1..n {
        knots.push(crate::math::step(0.0, 1.0, i - DEGREE, n - DEGREE));
    }
    knots.extend(std::iter::repeat_n(1.0, DEGREE + 1));
    knots
}

/// Uniform integer knot vector `[-k, ..., n + k]` for a periodic spline.
fn periodic_knots(n: usize) -> Vec<f64> {
    (0..n + 2 * DEGREE + 1)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let knot = i as f64 - DEGREE as f64;
            knot
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn control() -> Vec<Point3> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 2.0, 0.0),
            Point3::new(3.0, 2.0, 0.0),
            Point3::new(4.0, 0.0, 0.0),
            Point3::new(6.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn clamped_knot_vector_layout() {
        let knots = clamped_knots(5);
        assert_eq!(knots.len(), 9);
        assert_eq!(&knots[..4], &[0.0; 4]);
        assert_relative_eq!(knots[4], 0.5);
        assert_eq!(&knots[5..], &[1.0; 4]);
    }

    #[test]
    fn clamped_spline_hits_end_points() {
        let spline = BSpline::new(control(), false);
        assert_relative_eq!(spline.evaluate(0.0), control()[0], epsilon = 1e-12);
        assert_relative_eq!(spline.evaluate(1.0), control()[4], epsilon = 1e-12);
    }

    #[test]
    fn clamped_spline_misses_interior_points() {
        let spline = BSpline::new(control(), false);
        let mid = spline.evaluate(spline.greville(2));
        assert!((mid - control()[2]).norm() > 1e-3);
    }

    #[test]
    fn four_points_give_a_bezier() {
        let pts = control()[..4].to_vec();
        let spline = BSpline::new(pts.clone(), false);
        let expected = Point3::from(
            (pts[0].coords + pts[1].coords * 3.0 + pts[2].coords * 3.0 + pts[3].coords) / 8.0,
        );
        assert_relative_eq!(spline.evaluate(0.5), expected, epsilon = 1e-12);
    }

    #[test]
    fn greville_of_ends() {
        let spline = BSpline::new(control(), false);
        assert_relative_eq!(spline.greville(0), 0.0);
        assert_relative_eq!(spline.greville(4), 1.0);
        assert!(spline.greville(1) < spline.greville(2));
    }

    #[test]
    fn periodic_spline_is_seamless() {
        let spline = BSpline::new(control(), true);
        let end = spline.domain_end();
        assert_relative_eq!(spline.evaluate(0.0), spline.evaluate(end), epsilon = 1e-12);
        assert_relative_eq!(
            spline.evaluate(end - 1e-9),
            spline.evaluate(0.0),
            epsilon = 1e-6
        );
    }

    #[test]
    fn periodic_spline_uniform_blend() {
        let spline = BSpline::new(control(), true);
        // At an integer knot the uniform cubic blends neighbours 1:4:1.
        let pts = control();
        let expected = Point3::from((pts[4].coords + pts[0].coords * 4.0 + pts[1].coords) / 6.0);
        assert_relative_eq!(spline.evaluate(0.0), expected, epsilon = 1e-12);
    }

    #[test]
    fn sample_counts() {
        let open = BSpline::new(control(), false).sample(50);
        assert_eq!(open.len(), 50);
        assert_relative_eq!(open[49], control()[4], epsilon = 1e-12);
        let closed = BSpline::new(control(), true).sample(50);
        assert_eq!(closed.len(), 50);
    }
}
