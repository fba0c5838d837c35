//! Editing session tying the point store, rebuilds and playback together.

use std::time::Instant;

use tracing::debug;

use crate::error::Result;
use crate::playback::{PlaybackEngine, PlaybackSample};
use crate::rebuild::{rebuild_all, Debounce};
use crate::settings::PlaybackSettings;
use crate::store::{ControlPoint, PathId, PointId, PointStore};

/// One editing session.
///
/// Edits request a rebuild; [`Session::frame`] runs at most one due rebuild
/// and then ticks playback, so the engine only ever sees complete snapshots.
#[derive(Debug, Default)]
pub struct Session {
    store: PointStore,
    settings: PlaybackSettings,
    debounce: Debounce,
    engine: PlaybackEngine,
}

impl Session {
    /// Creates an empty session.
    #[must_use]
    pub fn new(settings: PlaybackSettings) -> Self {
        Self {
            store: PointStore::new(),
            settings,
            debounce: Debounce::default(),
            engine: PlaybackEngine::new(settings),
        }
    }

    /// Replaces the rebuild debounce.
    #[must_use]
    pub fn with_debounce(mut self, debounce: Debounce) -> Self {
        self.debounce = debounce;
        self
    }

    /// Returns the point store.
    #[must_use]
    pub fn store(&self) -> &PointStore {
        &self.store
    }

    /// Mutable access to the store. Call [`Session::request_rebuild`] after
    /// editing.
    pub fn store_mut(&mut self) -> &mut PointStore {
        &mut self.store
    }

    /// Returns the playback engine.
    #[must_use]
    pub fn engine(&self) -> &PlaybackEngine {
        &self.engine
    }

    /// Mutable access to the playback engine.
    pub fn engine_mut(&mut self) -> &mut PlaybackEngine {
        &mut self.engine
    }

    /// Returns the current settings.
    #[must_use]
    pub fn settings(&self) -> &PlaybackSettings {
        &self.settings
    }

    /// Adds a point and requests a rebuild.
    pub fn add_point(&mut self, point: ControlPoint) -> PointId {
        let id = self.store.add(point);
        self.request_rebuild();
        id
    }

    /// Adds several points in order and requests one rebuild.
    pub fn add_points(&mut self, points: impl IntoIterator<Item = ControlPoint>) -> Vec<PointId> {
        let ids = points.into_iter().map(|p| self.store.add(p)).collect();
        self.request_rebuild();
        ids
    }

    /// Removes a point and requests a rebuild.
    ///
    /// # Errors
    ///
    /// Returns an error if the point does not exist.
    pub fn remove_point(&mut self, id: PointId) -> Result<ControlPoint> {
        let point = self.store.remove(id)?;
        self.request_rebuild();
        Ok(point)
    }

    /// Replaces the settings. Changes that affect curve shape request a
    /// rebuild.
    pub fn set_settings(&mut self, settings: PlaybackSettings) {
        let reshaped =
            settings.path_type != self.settings.path_type || settings.closed() != self.settings.closed();
        self.settings = settings;
        self.engine.set_settings(settings);
        if reshaped {
            self.request_rebuild();
        }
    }

    /// Marks the curves as stale.
    pub fn request_rebuild(&mut self) {
        self.debounce.request();
    }

    /// Rebuilds every path immediately and publishes the result.
    pub fn rebuild_now(&mut self) {
        let snapshots = rebuild_all(&mut self.store, &self.settings);
        debug!(paths = snapshots.len(), "published snapshots");
        self.engine.publish(snapshots);
    }

    /// Starts playing a path.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be played.
    pub fn play(&mut self, path: PathId) -> Result<()> {
        self.engine.play(path)?;
        Ok(())
    }

    /// Stops playback.
    pub fn stop(&mut self) {
        self.engine.stop();
    }

    /// Runs one host frame: a due rebuild first, then a playback tick of
    /// `dt` seconds.
    pub fn frame(&mut self, now: Instant, dt: f64) -> Option<PlaybackSample> {
        if self.debounce.try_begin(now) {
            self.rebuild_now();
            self.debounce.finish();
        }
        self.engine.advance(dt)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::curve::Curve;
    use crate::math::Point3;
    use crate::settings::{LoopMode, PathType};
    use std::time::Duration;

    fn straight_points() -> Vec<ControlPoint> {
        (0..4)
            .map(|i| ControlPoint::new(0, Point3::new(f64::from(i), 0.0, 0.0)))
            .collect()
    }

    #[test]
    fn frame_runs_pending_rebuild() {
        let mut session = Session::default();
        session.add_points(straight_points());
        assert!(session.engine().snapshot(0).is_none());
        session.frame(Instant::now(), 0.0);
        assert!(session.engine().snapshot(0).is_some());
    }

    #[test]
    fn edits_within_window_are_coalesced() {
        let t0 = Instant::now();
        let mut session = Session::default();
        session.add_points(straight_points());
        session.frame(t0, 0.0);

        session.add_point(ControlPoint::new(0, Point3::new(4.0, 0.0, 0.0)));
        session.frame(t0 + Duration::from_millis(10), 0.0);
        assert_eq!(session.engine().snapshot(0).unwrap().points.len(), 4);

        session.frame(t0 + Duration::from_millis(60), 0.0);
        assert_eq!(session.engine().snapshot(0).unwrap().points.len(), 5);
    }

    #[test]
    fn settings_change_rebuilds_shape() {
        let mut session = Session::default();
        session.add_points(straight_points());
        session.rebuild_now();
        assert!(!session.engine().snapshot(0).unwrap().curve.is_closed());

        session.set_settings(PlaybackSettings {
            loop_mode: LoopMode::Revolve,
            path_type: PathType::Loose,
            ..PlaybackSettings::default()
        });
        session.frame(Instant::now() + Duration::from_secs(1), 0.0);
        let snapshot = session.engine().snapshot(0).unwrap();
        assert!(snapshot.curve.is_closed());
        assert_eq!(snapshot.path_type, PathType::Loose);
    }

    #[test]
    fn removing_unknown_point_fails() {
        let mut session = Session::default();
        let id = session.add_point(ControlPoint::new(0, Point3::origin()));
        session.remove_point(id).unwrap();
        assert!(session.remove_point(id).is_err());
    }

    #[test]
    fn zeroed_durations_stop_playback_on_next_frame() {
        let t0 = Instant::now();
        let mut session = Session::new(PlaybackSettings {
            path_type: PathType::Linear,
            ..PlaybackSettings::default()
        });
        session.add_points(straight_points().into_iter().take(3));
        session.frame(t0, 0.0);
        session.play(0).unwrap();

        for id in session.store().path_point_ids(0) {
            session.store_mut().get_mut(id).unwrap().duration = 0.0;
        }
        session.request_rebuild();
        assert!(session.frame(t0 + Duration::from_millis(100), 0.0).is_none());
        assert!(!session.engine().is_playing());
        for _ in 0..5 {
            session.frame(t0 + Duration::from_millis(200), 0.0);
        }
        assert!(session.engine().progress().is_finite());
        assert!(session.play(0).is_err());
    }
}
