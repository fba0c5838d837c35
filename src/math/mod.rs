/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Unit quaternion used for camera orientation.
pub type Rotation = nalgebra::UnitQuaternion<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Linear interpolation between two scalars.
#[must_use]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Linear interpolation between two points.
#[must_use]
pub fn lerp_point(a: &Point3, b: &Point3, t: f64) -> Point3 {
    a + (b - a) * t
}

/// Normalized interpolation between two rotations.
///
/// Takes the shortest arc, so `q` and `-q` blend the same way.
#[must_use]
pub fn nlerp_rotation(a: &Rotation, b: &Rotation, t: f64) -> Rotation {
    let mut target = *b.quaternion();
    if a.quaternion().dot(&target) < 0.0 {
        target = -target;
    }
    let blended = a.quaternion().lerp(&target, t);
    Rotation::try_new(blended, TOLERANCE).unwrap_or(*a)
}

/// Evenly spaced value `index / steps` across `[start, end]`.
#[must_use]
pub fn step(start: f64, end: f64, index: usize, steps: usize) -> f64 {
    if steps == 0 {
        return start;
    }
    #[allow(clippy::cast_precision_loss)]
    let frac = index as f64 / steps as f64;
    lerp(start, end, frac)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn lerp_midpoint() {
        assert_relative_eq!(lerp(2.0, 4.0, 0.5), 3.0);
    }

    #[test]
    fn step_endpoints() {
        assert_relative_eq!(step(0.25, 1.0, 0, 10), 0.25);
        assert_relative_eq!(step(0.25, 1.0, 10, 10), 1.0);
        assert_relative_eq!(step(0.25, 1.0, 3, 0), 0.25);
    }

    #[test]
    fn nlerp_halfway_between_yaws() {
        let a = Rotation::identity();
        let b = Rotation::from_euler_angles(0.0, 0.0, FRAC_PI_2);
        let mid = nlerp_rotation(&a, &b, 0.5);
        assert_relative_eq!(mid.angle(), FRAC_PI_2 / 2.0, epsilon = 1e-9);
    }

    #[test]
    fn nlerp_takes_shortest_arc() {
        let a = Rotation::identity();
        let b = Rotation::new_unchecked(-*Rotation::from_euler_angles(0.0, 0.0, 0.2).quaternion());
        let mid = nlerp_rotation(&a, &b, 0.5);
        assert_relative_eq!(mid.angle(), 0.1, epsilon = 1e-3);
    }
}
