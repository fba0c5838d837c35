use tracing::debug;

use crate::error::{CurveError, Result};
use crate::geometry::curve::{BSpline, CatmullRom, Curve, PathCurve, Polyline};
use crate::math::Point3;
use crate::settings::PathType;

/// Default number of B-spline samples used for fitted curves.
pub const DEFAULT_SAMPLE_COUNT: usize = 50;

/// Minimum number of points needed before a path is smoothed.
pub const MIN_SMOOTH_POINTS: usize = 4;

/// Output of [`BuildCurve`].
#[derive(Debug, Clone)]
pub struct BuiltCurve {
    /// The path type actually used, after any downgrade to linear.
    pub path_type: PathType,
    /// The evaluable curve.
    pub curve: PathCurve,
    /// Approximate parameter of every input point, produced as a
    /// by-product of fitting. Only present for fitted curves.
    pub coarse_parameters: Option<Vec<f64>>,
}

/// Builds an evaluable curve from an ordered list of control points.
///
/// Fitted and loose curves need at least [`MIN_SMOOTH_POINTS`] points;
/// with fewer, the request is downgraded to a linear curve.
#[derive(Debug, Clone)]
pub struct BuildCurve {
    points: Vec<Point3>,
    path_type: PathType,
    closed: bool,
    sample_count: usize,
}

impl BuildCurve {
    /// Creates a new `BuildCurve` operation.
    #[must_use]
    pub fn new(points: Vec<Point3>, path_type: PathType, closed: bool) -> Self {
        Self {
            points,
            path_type,
            closed,
            sample_count: DEFAULT_SAMPLE_COUNT,
        }
    }

    /// Overrides the number of B-spline samples used for fitted curves.
    #[must_use]
    pub fn with_sample_count(mut self, sample_count: usize) -> Self {
        self.sample_count = sample_count;
        self
    }

    /// Returns the path type that will be built for the current point count.
    #[must_use]
    pub fn effective_path_type(&self) -> PathType {
        if self.points.len() < MIN_SMOOTH_POINTS {
            PathType::Linear
        } else {
            self.path_type
        }
    }

    /// Executes the operation, returning the built curve.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::EmptyPointList` for an empty point list,
    /// `CurveError::InsufficientPoints` for a single point, or
    /// `CurveError::InvalidSampleCount` if a fitted curve is requested with
    /// fewer than 2 samples.
    pub fn execute(&self) -> Result<BuiltCurve> {
        match self.points.len() {
            0 => return Err(CurveError::EmptyPointList.into()),
            1 => {
                return Err(CurveError::InsufficientPoints {
                    required: 2,
                    actual: 1,
                }
                .into())
            }
            _ => {}
        }

        let path_type = self.effective_path_type();
        if path_type != self.path_type {
            debug!(
                requested = %self.path_type,
                points = self.points.len(),
                "too few points to smooth, building a linear curve"
            );
        }

        let built = match path_type {
            PathType::Linear => BuiltCurve {
                path_type,
                curve: PathCurve::Linear(Polyline::new(self.points.clone(), self.closed)),
                coarse_parameters: None,
            },
            PathType::Loose => BuiltCurve {
                path_type,
                curve: PathCurve::Smooth(CatmullRom::new(self.points.clone(), self.closed)),
                coarse_parameters: None,
            },
            PathType::Fitted => self.build_fitted()?,
        };

        debug!(
            path_type = %built.path_type,
            closed = self.closed,
            length = built.curve.length(),
            "built curve"
        );
        Ok(built)
    }

    /// Samples a B-spline fit and threads a Catmull-Rom curve through the
    /// samples.
    fn build_fitted(&self) -> Result<BuiltCurve> {
        if self.sample_count < 2 {
            return Err(CurveError::InvalidSampleCount(self.sample_count).into());
        }

        let spline = BSpline::new(self.points.clone(), self.closed);
        let samples = spline.sample(self.sample_count);
        let curve = PathCurve::Smooth(CatmullRom::new(samples, self.closed));

        // Sample `j` sits at `u = j / steps` of the spline domain.
        let steps = if self.closed {
            self.sample_count
        } else {
            self.sample_count - 1
        };
        #[allow(clippy::cast_precision_loss)]
        let steps = steps as f64;
        let coarse = (0..self.points.len())
            .map(|i| curve.knot_parameter(spline.greville(i) * steps))
            .collect();

        Ok(BuiltCurve {
            path_type: PathType::Fitted,
            curve,
            coarse_parameters: Some(coarse),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::DollyError;
    use approx::assert_relative_eq;

    fn five_points() -> Vec<Point3> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(2.0, 1.0, 0.0),
            Point3::new(3.0, 0.0, -1.0),
            Point3::new(4.0, 0.0, 0.0),
        ]
    }

    #[test]
    fn linear_three_points() {
        let built = BuildCurve::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(2.0, 0.0, 0.0),
            ],
            PathType::Linear,
            false,
        )
        .execute()
        .unwrap();
        assert_relative_eq!(built.curve.evaluate(0.5), Point3::new(1.0, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(built.curve.length(), 2.0);
    }

    #[test]
    fn downgrades_to_linear_below_four_points() {
        for path_type in [PathType::Fitted, PathType::Loose] {
            let built = BuildCurve::new(five_points()[..3].to_vec(), path_type, false)
                .execute()
                .unwrap();
            assert_eq!(built.path_type, PathType::Linear);
            assert!(built.coarse_parameters.is_none());
        }
    }

    #[test]
    fn empty_point_list_fails() {
        let err = BuildCurve::new(Vec::new(), PathType::Linear, false)
            .execute()
            .unwrap_err();
        assert!(matches!(err, DollyError::Curve(CurveError::EmptyPointList)));
    }

    #[test]
    fn single_point_fails() {
        let err = BuildCurve::new(vec![Point3::origin()], PathType::Fitted, false)
            .execute()
            .unwrap_err();
        assert!(matches!(
            err,
            DollyError::Curve(CurveError::InsufficientPoints { actual: 1, .. })
        ));
    }

    #[test]
    fn loose_passes_through_ends() {
        let pts = five_points();
        let built = BuildCurve::new(pts.clone(), PathType::Loose, false)
            .execute()
            .unwrap();
        assert_eq!(built.path_type, PathType::Loose);
        assert_relative_eq!(built.curve.evaluate(0.0), pts[0], epsilon = 1e-9);
        assert_relative_eq!(built.curve.evaluate(1.0), pts[4], epsilon = 1e-9);
    }

    #[test]
    fn fitted_samples_and_coarse_parameters() {
        let pts = five_points();
        let built = BuildCurve::new(pts.clone(), PathType::Fitted, false)
            .execute()
            .unwrap();
        assert_eq!(built.curve.knot_count(), DEFAULT_SAMPLE_COUNT);
        // A clamped fit still starts and ends on the end points.
        assert_relative_eq!(built.curve.evaluate(0.0), pts[0], epsilon = 1e-9);
        assert_relative_eq!(built.curve.evaluate(1.0), pts[4], epsilon = 1e-9);

        let coarse = built.coarse_parameters.unwrap();
        assert_eq!(coarse.len(), pts.len());
        assert_relative_eq!(coarse[0], 0.0);
        assert_relative_eq!(coarse[4], 1.0);
        assert!(coarse.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn fitted_rejects_tiny_sample_count() {
        let err = BuildCurve::new(five_points(), PathType::Fitted, false)
            .with_sample_count(1)
            .execute()
            .unwrap_err();
        assert!(matches!(err, DollyError::Curve(CurveError::InvalidSampleCount(1))));
    }

    #[test]
    fn closed_fitted_loops() {
        let built = BuildCurve::new(five_points(), PathType::Fitted, true)
            .execute()
            .unwrap();
        assert!(built.curve.is_closed());
        assert_relative_eq!(built.curve.evaluate(0.0), built.curve.evaluate(1.0), epsilon = 1e-9);
    }
}
