use crate::math::{Point3, Vector3};

use super::{locate_span, Curve};

/// Arc-length lookup resolution per segment.
const LUT_STEPS: usize = 32;

/// A uniform Catmull-Rom curve passing through every knot.
///
/// Each segment is a cubic Hermite curve whose tangents are the central
/// differences of the neighbouring knots. Open curves mirror a phantom knot
/// past each end, so the end tangents point at the adjacent knot. Closed
/// curves wrap knot indices and add a segment from the last knot back to
/// the first.
///
/// Evaluation is arc-length parameterized through a per-segment lookup
/// table of [`LUT_STEPS`] samples.
#[derive(Debug, Clone)]
pub struct CatmullRom {
    knots: Vec<Point3>,
    closed: bool,
    segments: Vec<HermiteSegment>,
    cumulative: Vec<f64>,
}

#[derive(Debug, Clone)]
struct HermiteSegment {
    p0: Point3,
    p1: Point3,
    m0: Vector3,
    m1: Vector3,
    /// Cumulative chord length at each lookup step, starting at `0.0`.
    lut: Vec<f64>,
}

impl HermiteSegment {
    fn new(p0: Point3, p1: Point3, m0: Vector3, m1: Vector3) -> Self {
        let mut segment = Self {
            p0,
            p1,
            m0,
            m1,
            lut: Vec::with_capacity(LUT_STEPS + 1),
        };
        let mut total = 0.0;
        let mut prev = p0;
        segment.lut.push(0.0);
        for i in 1..=LUT_STEPS {
            let p = segment.at(crate::math::step(0.0, 1.0, i, LUT_STEPS));
            total += (p - prev).norm();
            segment.lut.push(total);
            prev = p;
        }
        segment
    }

    fn at(&self, u: f64) -> Point3 {
        let u2 = u * u;
        let u3 = u2 * u;
        let h00 = 2.0 * u3 - 3.0 * u2 + 1.0;
        let h10 = u3 - 2.0 * u2 + u;
        let h01 = -2.0 * u3 + 3.0 * u2;
        let h11 = u3 - u2;
        Point3::from(
            self.p0.coords * h00 + self.m0 * h10 + self.p1.coords * h01 + self.m1 * h11,
        )
    }

    fn length(&self) -> f64 {
        self.lut[LUT_STEPS]
    }

    /// Evaluates the segment at a distance measured along it.
    fn at_distance(&self, distance: f64) -> Point3 {
        let (step, frac) = locate_span(&self.lut, distance);
        #[allow(clippy::cast_precision_loss)]
        let u = (step as f64 + frac) / LUT_STEPS as f64;
        self.at(u)
    }
}

impl CatmullRom {
    /// Creates a new Catmull-Rom curve through `knots`. `knots` must not be
    /// empty.
    #[must_use]
    pub fn new(knots: Vec<Point3>, closed: bool) -> Self {
        let n = knots.len();
        let tangents: Vec<Vector3> = (0..n).map(|i| tangent_at(&knots, i, closed)).collect();
        let segment_count = match n {
            0 | 1 => 0,
            _ if closed => n,
            _ => n - 1,
        };

        let mut segments = Vec::with_capacity(segment_count);
        let mut cumulative = Vec::with_capacity(segment_count + 1);
        cumulative.push(0.0);
        let mut total = 0.0;
        for i in 0..segment_count {
            let j = (i + 1) % n;
            let segment = HermiteSegment::new(knots[i], knots[j], tangents[i], tangents[j]);
            total += segment.length();
            cumulative.push(total);
            segments.push(segment);
        }

        Self {
            knots,
            closed,
            segments,
            cumulative,
        }
    }

    /// Returns the knots the curve passes through.
    #[must_use]
    pub fn knots(&self) -> &[Point3] {
        &self.knots
    }

    /// Returns the cumulative arc length at each knot, starting at `0.0`.
    #[must_use]
    pub fn cumulative_lengths(&self) -> &[f64] {
        &self.cumulative
    }
}

fn tangent_at(knots: &[Point3], i: usize, closed: bool) -> Vector3 {
    let n = knots.len();
    if n < 2 {
        return Vector3::zeros();
    }
    if closed {
        let prev = &knots[(i + n - 1) % n];
        let next = &knots[(i + 1) % n];
        return (next - prev) * 0.5;
    }
    if i == 0 {
        knots[1] - knots[0]
    } else if i == n - 1 {
        knots[n - 1] - knots[n - 2]
    } else {
        (knots[i + 1] - knots[i - 1]) * 0.5
    }
}

impl Curve for CatmullRom {
    fn evaluate(&self, t: f64) -> Point3 {
        if self.segments.is_empty() {
            return self.knots.first().copied().unwrap_or_else(Point3::origin);
        }
        let distance = t.clamp(0.0, 1.0) * self.length();
        let (span, frac) = locate_span(&self.cumulative, distance);
        let segment = &self.segments[span];
        segment.at_distance(frac * segment.length())
    }

    fn length(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}
