use crate::geometry::curve::Curve;
use crate::math::Point3;

use super::ParameterMap;

/// Measures how far each control point lies from its assigned curve
/// position. Useful to inspect how closely a fitted curve follows its
/// points.
#[derive(Debug, Clone)]
pub struct ControlPointDistances<'a> {
    points: &'a [Point3],
    parameters: &'a ParameterMap,
}

impl<'a> ControlPointDistances<'a> {
    /// Creates a new `ControlPointDistances` query.
    #[must_use]
    pub fn new(points: &'a [Point3], parameters: &'a ParameterMap) -> Self {
        Self { points, parameters }
    }

    /// Executes the query. Points without a parameter are skipped.
    #[must_use]
    pub fn execute(&self, curve: &impl Curve) -> Vec<f64> {
        self.points
            .iter()
            .zip(self.parameters.as_slice())
            .map(|(p, &t)| (curve.evaluate(t) - p).norm())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::curve::Polyline;
    use approx::assert_relative_eq;

    #[test]
    fn distances_to_assigned_positions() {
        let curve = Polyline::new(vec![Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0)], false);
        let points = [Point3::new(0.0, 1.0, 0.0), Point3::new(1.0, 0.0, 0.0)];
        let map = ParameterMap::new(vec![0.0, 0.5], false);
        let distances = ControlPointDistances::new(&points, &map).execute(&curve);
        assert_eq!(distances.len(), 2);
        assert_relative_eq!(distances[0], 1.0);
        assert_relative_eq!(distances[1], 0.0);
    }
}
