use crate::geometry::curve::Curve;
use crate::math::{step, Point3};

use super::SearchParams;

/// A parameter on a curve together with its distance to a query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Curve parameter in `[0, 1]`.
    pub parameter: f64,
    /// Distance from the query point to the curve at `parameter`.
    pub distance: f64,
}

/// Finds the curve parameter nearest to a point.
///
/// The curve is sampled densely across `[start, end]` and the best sample
/// is refined with a local high-resolution re-sample. Refinement never
/// leaves `[start, end]`.
#[derive(Debug, Clone)]
pub struct ClosestParameter {
    point: Point3,
    start: f64,
    end: f64,
    params: SearchParams,
}

impl ClosestParameter {
    /// Creates a query over the whole curve domain.
    #[must_use]
    pub fn new(point: Point3) -> Self {
        Self {
            point,
            start: 0.0,
            end: 1.0,
            params: SearchParams::default(),
        }
    }

    /// Restricts the search to `[start, end]`.
    #[must_use]
    pub fn within(mut self, start: f64, end: f64) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    /// Overrides the search parameters.
    #[must_use]
    pub fn with_params(mut self, params: SearchParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the query against `curve`, whose knot count is
    /// `knot_count`.
    #[must_use]
    pub fn execute(&self, curve: &impl Curve, knot_count: usize) -> Candidate {
        let search_samples = self.params.search_samples(knot_count);
        let samples = scaled_samples(search_samples, self.end - self.start)
            .max(self.params.min_closed_samples);

        let mut best = Candidate {
            parameter: self.start,
            distance: f64::INFINITY,
        };
        for j in 0..=samples {
            let t = step(self.start, self.end, j, samples);
            let distance = (curve.evaluate(t) - self.point).norm();
            if distance < best.distance {
                best = Candidate {
                    parameter: t,
                    distance,
                };
            }
        }
        refine(curve, &self.point, best.parameter, self.start, self.end, search_samples, &self.params)
    }
}

/// Number of coarse samples proportional to the width of a search window.
pub(crate) fn scaled_samples(search_samples: usize, width: f64) -> usize {
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    let samples = (search_samples as f64 * width.max(0.0)) as usize;
    samples
}

/// Re-samples a narrow window around `initial` and returns the nearest
/// parameter found, never worse than `initial` itself.
pub(crate) fn refine(
    curve: &impl Curve,
    point: &Point3,
    initial: f64,
    lower: f64,
    upper: f64,
    search_samples: usize,
    params: &SearchParams,
) -> Candidate {
    let mut best = Candidate {
        parameter: initial,
        distance: (curve.evaluate(initial) - point).norm(),
    };

    #[allow(clippy::cast_precision_loss)]
    let reach = 2.0 / search_samples.max(1) as f64;
    let start = (initial - reach).max(lower).max(0.0);
    let end = (initial + reach).min(upper).min(1.0);
    if end <= start {
        return best;
    }

    for j in 0..=params.refinement_samples {
        let t = step(start, end, j, params.refinement_samples);
        let distance = (curve.evaluate(t) - point).norm();
        if distance < best.distance {
            best = Candidate {
                parameter: t,
                distance,
            };
        }
    }
    best
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::curve::{CatmullRom, Polyline};
    use approx::assert_relative_eq;

    fn straight() -> Polyline {
        Polyline::new(vec![Point3::new(0.0, 0.0, 0.0), Point3::new(10.0, 0.0, 0.0)], false)
    }

    #[test]
    fn perpendicular_projection() {
        let result = ClosestParameter::new(Point3::new(5.0, 3.0, 0.0)).execute(&straight(), 2);
        assert_relative_eq!(result.parameter, 0.5, epsilon = 1e-4);
        assert_relative_eq!(result.distance, 3.0, epsilon = 1e-6);
    }

    #[test]
    fn clamps_to_start() {
        let result = ClosestParameter::new(Point3::new(-5.0, 0.0, 0.0)).execute(&straight(), 2);
        assert_relative_eq!(result.parameter, 0.0);
        assert_relative_eq!(result.distance, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn clamps_to_end() {
        let result = ClosestParameter::new(Point3::new(15.0, 0.0, 0.0)).execute(&straight(), 2);
        assert_relative_eq!(result.parameter, 1.0, epsilon = 1e-12);
        assert_relative_eq!(result.distance, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn window_restricts_the_answer() {
        let result = ClosestParameter::new(Point3::new(2.0, 1.0, 0.0))
            .within(0.5, 1.0)
            .execute(&straight(), 2);
        assert_relative_eq!(result.parameter, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn finds_knots_of_a_smooth_curve() {
        let knots = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(3.0, 1.0, 0.0),
        ];
        let curve = CatmullRom::new(knots.clone(), false);
        for knot in &knots {
            let result = ClosestParameter::new(*knot).execute(&curve, knots.len());
            assert!(result.distance < 1e-3, "distance {}", result.distance);
        }
    }
}
