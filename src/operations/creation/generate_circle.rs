use crate::math::{Point3, Rotation, Vector3, TOLERANCE};
use crate::store::{ControlPoint, PathId};

/// Generates control points on a circle or spiral around a center.
///
/// Point `i` sits at angle `i * angle_step` (degrees, counter-clockwise
/// seen from +Y), radius `radius + i * radius_step` and height
/// `i * height_step` above the center. Each point faces the center
/// horizontally.
#[derive(Debug, Clone)]
pub struct GenerateCircle {
    path: PathId,
    center: Point3,
    radius: f64,
    radius_step: f64,
    height_step: f64,
    angle_step: f64,
    count: usize,
}

impl GenerateCircle {
    /// Creates a flat circle of `count` points, 45 degrees apart.
    #[must_use]
    pub fn new(path: PathId, center: Point3, radius: f64, count: usize) -> Self {
        Self {
            path,
            center,
            radius,
            radius_step: 0.0,
            height_step: 0.0,
            angle_step: 45.0,
            count,
        }
    }

    /// Sets the angle between consecutive points, in degrees. Negative
    /// values go clockwise.
    #[must_use]
    pub fn with_angle_step(mut self, degrees: f64) -> Self {
        self.angle_step = degrees;
        self
    }

    /// Grows the radius by `step` per point.
    #[must_use]
    pub fn with_radius_step(mut self, step: f64) -> Self {
        self.radius_step = step;
        self
    }

    /// Raises each point by `step` over the previous one.
    #[must_use]
    pub fn with_height_step(mut self, step: f64) -> Self {
        self.height_step = step;
        self
    }

    /// Executes the operation, returning the points in path order.
    #[must_use]
    pub fn execute(&self) -> Vec<ControlPoint> {
        (0..self.count)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let i = i as f64;
                let angle = (i * self.angle_step).to_radians();
                let radius = self.radius + self.radius_step * i;
                let position = self.center
                    + Vector3::new(angle.cos() * radius, self.height_step * i, angle.sin() * radius);

                let mut target = self.center;
                target.y = position.y;
                let direction = target - position;
                let rotation = if direction.norm() < TOLERANCE {
                    Rotation::identity()
                } else {
                    Rotation::face_towards(&direction, &Vector3::y())
                };

                ControlPoint::new(self.path, position).with_rotation(rotation)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn flat_circle_positions() {
        let points = GenerateCircle::new(2, Point3::new(0.0, 1.0, 0.0), 2.0, 8).execute();
        assert_eq!(points.len(), 8);
        assert!(points.iter().all(|p| p.path == 2));
        assert_relative_eq!(points[0].position, Point3::new(2.0, 1.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(points[2].position, Point3::new(0.0, 1.0, 2.0), epsilon = 1e-12);
        for p in &points {
            assert_relative_eq!((p.position - Point3::new(0.0, 1.0, 0.0)).norm(), 2.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn points_face_the_center() {
        let points = GenerateCircle::new(0, Point3::origin(), 3.0, 4)
            .with_angle_step(90.0)
            .execute();
        for p in &points {
            let forward = p.rotation * Vector3::z();
            let to_center = (Point3::origin() - p.position).normalize();
            assert_relative_eq!(forward, to_center, epsilon = 1e-9);
        }
    }

    #[test]
    fn spiral_grows_and_rises() {
        let points = GenerateCircle::new(0, Point3::origin(), 1.0, 3)
            .with_radius_step(0.5)
            .with_height_step(0.25)
            .execute();
        assert_relative_eq!(points[2].position.y, 0.5);
        let horizontal = Vector3::new(points[2].position.x, 0.0, points[2].position.z).norm();
        assert_relative_eq!(horizontal, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn zero_radius_uses_identity() {
        let points = GenerateCircle::new(0, Point3::origin(), 0.0, 1).execute();
        assert_eq!(points[0].rotation, Rotation::identity());
    }
}
