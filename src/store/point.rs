use crate::math::{Point3, Rotation};

use super::PathId;

slotmap::new_key_type! {
    /// Unique identifier for a control point in the point store.
    pub struct PointId;
}

/// Default camera field of view, in degrees.
pub const DEFAULT_FOV: f64 = 45.0;

/// Default per-point speed used by speed-based motion.
pub const DEFAULT_SPEED: f64 = 3.0;

/// Default per-point duration in seconds used by time-based motion.
pub const DEFAULT_DURATION: f64 = 2.0;

/// A camera control point on a path.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPoint {
    /// Camera position.
    pub position: Point3,
    /// Camera orientation.
    pub rotation: Rotation,
    /// Field of view in degrees.
    pub fov: f64,
    /// Speed used by speed-based motion.
    pub speed: f64,
    /// Time in seconds to travel from this point to the next.
    pub duration: f64,
    /// The path this point belongs to.
    pub path: PathId,
    /// Order within the path. Reassigned by [`super::PointStore::renumber`].
    pub index: usize,
    /// Curve parameter assigned by the last rebuild.
    pub parameter: f64,
}

impl ControlPoint {
    /// Creates a control point with default orientation, field of view,
    /// speed and duration.
    #[must_use]
    pub fn new(path: PathId, position: Point3) -> Self {
        Self {
            position,
            rotation: Rotation::identity(),
            fov: DEFAULT_FOV,
            speed: DEFAULT_SPEED,
            duration: DEFAULT_DURATION,
            path,
            index: 0,
            parameter: 0.0,
        }
    }

    /// Sets the orientation.
    #[must_use]
    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Sets the field of view in degrees.
    #[must_use]
    pub fn with_fov(mut self, fov: f64) -> Self {
        self.fov = fov;
        self
    }

    /// Sets the speed.
    #[must_use]
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    /// Sets the duration in seconds.
    #[must_use]
    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }
}
