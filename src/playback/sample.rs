use crate::geometry::curve::Curve;
use crate::math::{lerp, nlerp_rotation, Point3, Rotation};
use crate::rebuild::PathSnapshot;
use crate::store::ControlPoint;

/// Live camera sample emitted on every progress change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackSample {
    /// Camera position on the curve.
    pub position: Point3,
    /// Camera orientation.
    pub orientation: Rotation,
    /// Field of view in degrees.
    pub fov: f64,
    /// The progress the sample was taken at.
    pub progress: f64,
}

/// The pair of control points bounding a curve parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Index of the point before the parameter.
    pub start: usize,
    /// Index of the point after the parameter.
    pub end: usize,
    /// Position between the two points, in `[0, 1]`.
    pub fraction: f64,
}

impl Segment {
    /// Finds the first point `i >= 1` whose parameter exceeds `t`.
    #[must_use]
    pub fn locate(points: &[ControlPoint], t: f64) -> Option<Self> {
        let end = (1..points.len()).find(|&i| t < points[i].parameter)?;
        let start = end - 1;
        let span = points[end].parameter - points[start].parameter;
        let fraction = if span > 0.0 {
            ((t - points[start].parameter) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };
        Some(Self {
            start,
            end,
            fraction,
        })
    }

    /// Interpolates the speed of the two bounding points.
    #[must_use]
    pub fn speed(&self, points: &[ControlPoint]) -> f64 {
        lerp(points[self.start].speed, points[self.end].speed, self.fraction)
    }
}

/// Samples a path snapshot at a playback progress.
///
/// Returns `None` when the path has fewer than two points. The segment is
/// `None` when the compressed parameter lies beyond the last point.
#[must_use]
pub fn sample_snapshot(snapshot: &PathSnapshot, progress: f64) -> Option<(PlaybackSample, Option<Segment>)> {
    let points = &snapshot.points;
    if points.len() < 2 {
        return None;
    }
    let t = snapshot.range.compress(progress);
    let position = snapshot.curve.evaluate(t);
    let segment = Segment::locate(points, t);

    let (orientation, fov) = match segment {
        Some(seg) => {
            let (a, b) = (&points[seg.start], &points[seg.end]);
            (
                nlerp_rotation(&a.rotation, &b.rotation, seg.fraction),
                lerp(a.fov, b.fov, seg.fraction),
            )
        }
        None => {
            let last = points.last()?;
            (last.rotation, last.fov)
        }
    };

    Some((
        PlaybackSample {
            position,
            orientation,
            fov,
            progress,
        },
        segment,
    ))
}
