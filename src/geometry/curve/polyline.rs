use crate::math::{lerp_point, Point3};

use super::{locate_span, Curve};

/// A straight-segment curve through a list of points.
///
/// Closed polylines add a segment from the last point back to the first.
#[derive(Debug, Clone)]
pub struct Polyline {
    points: Vec<Point3>,
    closed: bool,
    cumulative: Vec<f64>,
}

impl Polyline {
    /// Creates a new polyline. `points` must not be empty.
    #[must_use]
    pub fn new(points: Vec<Point3>, closed: bool) -> Self {
        let mut cumulative = Vec::with_capacity(points.len() + 1);
        cumulative.push(0.0);
        let mut total = 0.0;
        for i in 0..segment_count(points.len(), closed) {
            let a = &points[i];
            let b = &points[(i + 1) % points.len()];
            total += (b - a).norm();
            cumulative.push(total);
        }
        Self {
            points,
            closed,
            cumulative,
        }
    }

    /// Returns the polyline vertices.
    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Returns the cumulative arc length at each vertex, starting at `0.0`.
    #[must_use]
    pub fn cumulative_lengths(&self) -> &[f64] {
        &self.cumulative
    }
}

fn segment_count(point_count: usize, closed: bool) -> usize {
    match point_count {
        0 | 1 => 0,
        n if closed => n,
        n => n - 1,
    }
}

impl Curve for Polyline {
    fn evaluate(&self, t: f64) -> Point3 {
        if self.cumulative.len() < 2 {
            return self.points.first().copied().unwrap_or_else(Point3::origin);
        }
        let (span, frac) = locate_span(&self.cumulative, t.clamp(0.0, 1.0) * self.length());
        let a = &self.points[span];
        let b = &self.points[(span + 1) % self.points.len()];
        lerp_point(a, b, frac)
    }

    fn length(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}
