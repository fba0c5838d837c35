use crate::error::RangeError;
use crate::geometry::curve::{Curve, PathCurve};
use crate::math::Point3;
use crate::settings::PathType;

use super::{ClosestParameter, ParameterMap, SearchParams};

/// A sub-interval `[start, end]` of the curve domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    /// Start of the travelled portion.
    pub start: f64,
    /// End of the travelled portion.
    pub end: f64,
}

impl Default for Range {
    fn default() -> Self {
        Self::full()
    }
}

impl Range {
    /// Creates a new range.
    #[must_use]
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// The whole domain `[0, 1]`.
    #[must_use]
    pub fn full() -> Self {
        Self::new(0.0, 1.0)
    }

    /// Returns `end - start`.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    /// Maps playback progress in `[0, 1]` onto this range.
    ///
    /// Empty or inverted ranges map everything to `0`.
    #[must_use]
    pub fn compress(&self, progress: f64) -> f64 {
        let width = self.width();
        if width > 0.0 {
            (self.start + progress * width).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// The range between the parameters of two assigned points.
    ///
    /// # Errors
    ///
    /// Returns `RangeError::InvalidIndices` if either index is out of bounds
    /// or `start_index >= end_index`.
    pub fn between(
        parameters: &ParameterMap,
        start_index: usize,
        end_index: usize,
    ) -> Result<Self, RangeError> {
        let invalid = || RangeError::InvalidIndices {
            start: start_index,
            end: end_index,
            len: parameters.len(),
        };
        if start_index >= end_index {
            return Err(invalid());
        }
        let start = parameters.get(start_index).ok_or_else(invalid)?;
        let end = parameters.get(end_index).ok_or_else(invalid)?;
        Ok(Self::new(start, end))
    }
}

/// Computes the travelled range of a path, excluding its anchor segments.
///
/// Only open, smoothed paths are trimmed; closed and linear paths travel
/// the whole curve.
#[derive(Debug, Clone)]
pub struct TrimRange<'a> {
    path_type: PathType,
    points: &'a [Point3],
    parameters: &'a ParameterMap,
    params: SearchParams,
}

impl<'a> TrimRange<'a> {
    /// Creates a new `TrimRange` query.
    ///
    /// `path_type` must be the effective path type the curve was built
    /// with.
    #[must_use]
    pub fn new(path_type: PathType, points: &'a [Point3], parameters: &'a ParameterMap) -> Self {
        Self {
            path_type,
            points,
            parameters,
            params: SearchParams::default(),
        }
    }

    /// Overrides the search parameters used for loose paths.
    #[must_use]
    pub fn with_params(mut self, params: SearchParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the query against `curve`.
    #[must_use]
    pub fn execute(&self, curve: &PathCurve) -> Range {
        let n = self.points.len();
        if curve.is_closed() || n < 3 {
            return Range::full();
        }
        match self.path_type {
            PathType::Linear => Range::full(),
            PathType::Fitted => match (self.parameters.get(1), self.parameters.get(n - 2)) {
                (Some(start), Some(end)) => Range::new(start, end),
                _ => Range::full(),
            },
            PathType::Loose => {
                let nearest = |p: &Point3| {
                    ClosestParameter::new(*p)
                        .with_params(self.params)
                        .execute(curve, curve.knot_count())
                        .parameter
                };
                let start = (nearest(&self.points[1]) - nearest(&self.points[0])).abs();
                let end_gap = (nearest(&self.points[n - 1]) - nearest(&self.points[n - 2])).abs();
                Range::new(start, 1.0 - end_gap)
            }
        }
    }
}
