mod bspline;
mod catmull_rom;
mod polyline;

pub use bspline::BSpline;
pub use catmull_rom::CatmullRom;
pub use polyline::Polyline;

use crate::math::Point3;

/// Trait for arc-length parameterized curves in 3D space.
///
/// The parameter domain is always `[0, 1]`, where `t` is the fraction of
/// the total arc length travelled from the start of the curve.
pub trait Curve {
    /// Evaluates the curve at parameter `t`, returning the 3D point.
    ///
    /// Parameters outside `[0, 1]` are clamped.
    fn evaluate(&self, t: f64) -> Point3;

    /// Returns the total arc length of the curve.
    fn length(&self) -> f64;

    /// Returns whether the curve is closed.
    fn is_closed(&self) -> bool;
}

/// The curve built for a camera path.
#[derive(Debug, Clone)]
pub enum PathCurve {
    /// The literal polyline through the control points.
    Linear(Polyline),
    /// A Catmull-Rom curve, either through the control points (loose) or
    /// through a dense B-spline sample (fitted).
    Smooth(CatmullRom),
}

impl PathCurve {
    /// Returns the points the curve passes through.
    #[must_use]
    pub fn knots(&self) -> &[Point3] {
        match self {
            Self::Linear(line) => line.points(),
            Self::Smooth(spline) => spline.knots(),
        }
    }

    /// Returns the number of knots the curve passes through.
    #[must_use]
    pub fn knot_count(&self) -> usize {
        self.knots().len()
    }

    /// Converts a fractional knot position (e.g. `2.5` = halfway between
    /// knot 2 and knot 3) into an arc-length parameter.
    #[must_use]
    pub fn knot_parameter(&self, position: f64) -> f64 {
        let cumulative = match self {
            Self::Linear(line) => line.cumulative_lengths(),
            Self::Smooth(spline) => spline.cumulative_lengths(),
        };
        knot_position_to_parameter(cumulative, position)
    }
}

impl Curve for PathCurve {
    fn evaluate(&self, t: f64) -> Point3 {
        match self {
            Self::Linear(line) => line.evaluate(t),
            Self::Smooth(spline) => spline.evaluate(t),
        }
    }

    fn length(&self) -> f64 {
        match self {
            Self::Linear(line) => line.length(),
            Self::Smooth(spline) => spline.length(),
        }
    }

    fn is_closed(&self) -> bool {
        match self {
            Self::Linear(line) => line.is_closed(),
            Self::Smooth(spline) => spline.is_closed(),
        }
    }
}

/// Locates `distance` in a cumulative length table.
///
/// `cumulative` starts at `0.0` and holds one entry per span boundary.
/// Returns the span index and the fraction travelled inside that span.
pub(crate) fn locate_span(cumulative: &[f64], distance: f64) -> (usize, f64) {
    let spans = cumulative.len().saturating_sub(1);
    if spans == 0 {
        return (0, 0.0);
    }
    let total = cumulative[spans];
    let distance = distance.clamp(0.0, total);
    let upper = cumulative.partition_point(|&d| d <= distance);
    let span = upper.saturating_sub(1).min(spans - 1);
    let span_len = cumulative[span + 1] - cumulative[span];
    let frac = if span_len > crate::math::TOLERANCE {
        ((distance - cumulative[span]) / span_len).clamp(0.0, 1.0)
    } else {
        0.0
    };
    (span, frac)
}

fn knot_position_to_parameter(cumulative: &[f64], position: f64) -> f64 {
    let spans = cumulative.len().saturating_sub(1);
    if spans == 0 {
        return 0.0;
    }
    let total = cumulative[spans];
    if total <= crate::math::TOLERANCE {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let position = position.clamp(0.0, spans as f64);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let span = (position.floor() as usize).min(spans - 1);
    #[allow(clippy::cast_precision_loss)]
    let frac = position - span as f64;
    let distance = crate::math::lerp(cumulative[span], cumulative[span + 1], frac);
    (distance / total).clamp(0.0, 1.0)
}
