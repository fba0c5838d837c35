pub mod point;

pub use point::{ControlPoint, PointId, DEFAULT_DURATION, DEFAULT_FOV, DEFAULT_SPEED};

use std::collections::BTreeMap;

use crate::error::StoreError;
use slotmap::SlotMap;

/// Identifier of a camera path.
pub type PathId = u32;

/// Arena that owns every control point of an editing session.
///
/// Points reference their path by [`PathId`]. The store remembers the
/// order in which points appear, which is the authoring order used by
/// [`PointStore::renumber`].
#[derive(Debug, Default)]
pub struct PointStore {
    points: SlotMap<PointId, ControlPoint>,
    order: Vec<PointId>,
}

impl PointStore {
    /// Creates a new, empty point store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a point to the end of its path and returns its ID.
    pub fn add(&mut self, mut point: ControlPoint) -> PointId {
        point.index = self.path_len(point.path);
        let id = self.points.insert(point);
        self.order.push(id);
        id
    }

    /// Removes a point, returning its data.
    ///
    /// # Errors
    ///
    /// Returns an error if the point is not in the store.
    pub fn remove(&mut self, id: PointId) -> Result<ControlPoint, StoreError> {
        let point = self.points.remove(id).ok_or(StoreError::PointNotFound)?;
        self.order.retain(|&p| p != id);
        Ok(point)
    }

    /// Returns a reference to the point, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the point is not in the store.
    pub fn get(&self, id: PointId) -> Result<&ControlPoint, StoreError> {
        self.points.get(id).ok_or(StoreError::PointNotFound)
    }

    /// Returns a mutable reference to the point, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the point is not in the store.
    pub fn get_mut(&mut self, id: PointId) -> Result<&mut ControlPoint, StoreError> {
        self.points.get_mut(id).ok_or(StoreError::PointNotFound)
    }

    /// Moves a point to `position` in the authoring order.
    ///
    /// Positions past the end move the point to the end.
    ///
    /// # Errors
    ///
    /// Returns an error if the point is not in the store.
    pub fn move_to(&mut self, id: PointId, position: usize) -> Result<(), StoreError> {
        let current = self
            .order
            .iter()
            .position(|&p| p == id)
            .ok_or(StoreError::PointNotFound)?;
        self.order.remove(current);
        let position = position.min(self.order.len());
        self.order.insert(position, id);
        Ok(())
    }

    /// Returns the number of points in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns whether the store holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the number of points on a path.
    #[must_use]
    pub fn path_len(&self, path: PathId) -> usize {
        self.points.values().filter(|p| p.path == path).count()
    }

    /// Returns every path ID in ascending order.
    #[must_use]
    pub fn path_ids(&self) -> Vec<PathId> {
        let mut ids: Vec<PathId> = self.points.values().map(|p| p.path).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Reassigns indices `0..n` per path, following the authoring order.
    pub fn renumber(&mut self) {
        let mut next: BTreeMap<PathId, usize> = BTreeMap::new();
        for id in &self.order {
            if let Some(point) = self.points.get_mut(*id) {
                let index = next.entry(point.path).or_insert(0);
                point.index = *index;
                *index += 1;
            }
        }
    }

    /// Returns the IDs of the points on a path, ordered by index.
    #[must_use]
    pub fn path_point_ids(&self, path: PathId) -> Vec<PointId> {
        let mut ids: Vec<PointId> = self
            .order
            .iter()
            .copied()
            .filter(|id| self.points.get(*id).is_some_and(|p| p.path == path))
            .collect();
        ids.sort_by_key(|id| self.points.get(*id).map_or(usize::MAX, |p| p.index));
        ids
    }

    /// Returns copies of the points on a path, ordered by index.
    #[must_use]
    pub fn path(&self, path: PathId) -> Vec<ControlPoint> {
        self.path_point_ids(path)
            .into_iter()
            .filter_map(|id| self.points.get(id).cloned())
            .collect()
    }

    /// Writes curve parameters back to the points of a path, in index order.
    ///
    /// Extra parameters or points are ignored.
    pub fn set_parameters(&mut self, path: PathId, parameters: &[f64]) {
        for (id, &t) in self.path_point_ids(path).into_iter().zip(parameters) {
            if let Some(point) = self.points.get_mut(id) {
                point.parameter = t;
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;

    fn point(path: PathId, x: f64) -> ControlPoint {
        ControlPoint::new(path, Point3::new(x, 0.0, 0.0))
    }

    #[test]
    fn add_appends_to_path() {
        let mut store = PointStore::new();
        let a = store.add(point(0, 0.0));
        let b = store.add(point(1, 1.0));
        let c = store.add(point(0, 2.0));
        assert_eq!(store.get(a).unwrap().index, 0);
        assert_eq!(store.get(b).unwrap().index, 0);
        assert_eq!(store.get(c).unwrap().index, 1);
        assert_eq!(store.path_ids(), vec![0, 1]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn remove_then_renumber_closes_gaps() {
        let mut store = PointStore::new();
        let a = store.add(point(0, 0.0));
        store.add(point(0, 1.0));
        let c = store.add(point(0, 2.0));
        store.remove(a).unwrap();
        store.renumber();
        let path = store.path(0);
        assert_eq!(path.len(), 2);
        assert_eq!(path[0].index, 0);
        assert_eq!(path[1].index, 1);
        assert_eq!(store.get(c).unwrap().index, 1);
    }

    #[test]
    fn move_to_changes_order_after_renumber() {
        let mut store = PointStore::new();
        store.add(point(0, 0.0));
        store.add(point(0, 1.0));
        let c = store.add(point(0, 2.0));
        store.move_to(c, 0).unwrap();
        store.renumber();
        let xs: Vec<f64> = store.path(0).iter().map(|p| p.position.x).collect();
        assert_eq!(xs, vec![2.0, 0.0, 1.0]);
    }

    #[test]
    fn moving_a_point_between_paths() {
        let mut store = PointStore::new();
        store.add(point(0, 0.0));
        let b = store.add(point(0, 1.0));
        store.add(point(0, 2.0));
        store.get_mut(b).unwrap().path = 3;
        store.renumber();
        assert_eq!(store.path(0).len(), 2);
        assert_eq!(store.path(0)[1].index, 1);
        assert_eq!(store.path(3)[0].index, 0);
    }

    #[test]
    fn set_parameters_writes_in_index_order() {
        let mut store = PointStore::new();
        store.add(point(0, 0.0));
        store.add(point(0, 1.0));
        store.set_parameters(0, &[0.25, 0.75]);
        let ts: Vec<f64> = store.path(0).iter().map(|p| p.parameter).collect();
        assert_eq!(ts, vec![0.25, 0.75]);
    }

    #[test]
    fn missing_point_errors() {
        let mut store = PointStore::new();
        let a = store.add(point(0, 0.0));
        store.remove(a).unwrap();
        assert!(matches!(store.get(a), Err(StoreError::PointNotFound)));
        assert!(store.remove(a).is_err());
        assert!(store.is_empty());
    }
}
