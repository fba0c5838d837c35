use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, error, trace};

use crate::error::PlaybackError;
use crate::rebuild::{PathSnapshot, Snapshots};
use crate::settings::{LoopMode, MotionControl, PlaybackSettings};
use crate::store::{PathId, DEFAULT_SPEED};

use super::sample::{sample_snapshot, PlaybackSample, Segment};
use super::state::{Direction, PlaybackState};

/// Distance from either end of `[0, 1]` at which progress counts as having
/// reached it.
pub const EPSILON: f64 = 0.001;

/// Shared flag that stops playback on the next tick.
///
/// Cloning yields a handle to the same flag, so a stop can be signalled
/// from another thread.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    /// Requests that playback stop.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Returns whether a stop was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn reset(&self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Drives playback progress along the selected path.
///
/// The host calls [`PlaybackEngine::advance`] once per frame. Snapshots are
/// published as a whole with [`PlaybackEngine::publish`].
#[derive(Debug, Default)]
pub struct PlaybackEngine {
    snapshots: Snapshots,
    settings: PlaybackSettings,
    state: PlaybackState,
    cancel: CancelHandle,
    sample: Option<PlaybackSample>,
    segment: Option<Segment>,
}

impl PlaybackEngine {
    /// Creates a stopped engine with no paths.
    #[must_use]
    pub fn new(settings: PlaybackSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Replaces every path snapshot and resamples the selected path.
    ///
    /// Playback stops if the playing path is no longer playable.
    pub fn publish(&mut self, snapshots: Snapshots) {
        self.snapshots = snapshots;
        if self.state.is_playing {
            self.stop_if_unplayable();
        }
        self.resample();
    }

    /// Returns the published snapshots.
    #[must_use]
    pub fn snapshots(&self) -> &Snapshots {
        &self.snapshots
    }

    /// Returns the snapshot of a path, if it was built.
    #[must_use]
    pub fn snapshot(&self, path: PathId) -> Option<&Arc<PathSnapshot>> {
        self.snapshots.get(&path)
    }

    /// Returns the current settings.
    #[must_use]
    pub fn settings(&self) -> &PlaybackSettings {
        &self.settings
    }

    /// Replaces the settings. Leaving [`LoopMode::Reverse`] resets the
    /// direction to forward.
    pub fn set_settings(&mut self, settings: PlaybackSettings) {
        self.settings = settings;
        if settings.loop_mode != LoopMode::Reverse {
            self.state.direction = Direction::Forward;
        }
    }

    /// Changes only the loop mode.
    pub fn set_loop_mode(&mut self, loop_mode: LoopMode) {
        self.set_settings(PlaybackSettings {
            loop_mode,
            ..self.settings
        });
    }

    /// Returns the playback state.
    #[must_use]
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Returns the eased progress.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.state.progress
    }

    /// Returns whether playback is running.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    /// Returns the last computed sample.
    #[must_use]
    pub fn sample(&self) -> Option<&PlaybackSample> {
        self.sample.as_ref()
    }

    /// Returns a handle that stops playback on the next tick.
    #[must_use]
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Selects the previewed path.
    pub fn select_path(&mut self, path: PathId) {
        self.state.selected_path = path;
        self.resample();
    }

    /// Scrubs the selected path to `value`, clamped to `[0, 1]`.
    pub fn set_progress(&mut self, path: PathId, value: f64) {
        self.state.selected_path = path;
        self.state.progress = value.clamp(0.0, 1.0);
        self.state.linear_progress = self.state.progress;
        self.resample();
    }

    /// Starts playing `path`.
    ///
    /// Playback restarts from the beginning if the previous run reached the
    /// end.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving the state untouched, if the path has no
    /// snapshot or its duration or length is not positive.
    pub fn play(&mut self, path: PathId) -> Result<(), PlaybackError> {
        if let Err(err) = self.check_playable(path) {
            error!(path, %err, "refusing to play");
            return Err(err);
        }

        self.state.selected_path = path;
        if self.state.progress > 1.0 - EPSILON {
            self.state.progress = 0.0;
            self.state.linear_progress = 0.0;
            self.state.direction = Direction::Forward;
        }
        self.state.is_playing = true;
        self.cancel.reset();
        self.resample();
        debug!(path, progress = self.state.progress, "playback started");
        Ok(())
    }

    /// Stops playback immediately. Progress is kept.
    pub fn stop(&mut self) {
        if self.state.is_playing {
            debug!(path = self.state.selected_path, progress = self.state.progress, "playback stopped");
        }
        self.state.is_playing = false;
    }

    /// Stops playback and restores the default state, keeping the selected
    /// path.
    pub fn reset(&mut self) {
        self.stop();
        self.state = PlaybackState {
            selected_path: self.state.selected_path,
            ..PlaybackState::default()
        };
        self.resample();
    }

    /// Advances playback by `dt` seconds. Negative or non-finite steps
    /// count as zero.
    ///
    /// Returns the new sample, or `None` if playback is not running.
    pub fn advance(&mut self, dt: f64) -> Option<PlaybackSample> {
        if !self.state.is_playing {
            return None;
        }
        if self.cancel.is_cancelled() {
            self.stop();
            return None;
        }
        if self.stop_if_unplayable() {
            return None;
        }
        let snapshot = self.snapshots.get(&self.state.selected_path)?;
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let (duration, length) = (snapshot.duration, snapshot.length);
        let speed = self
            .segment
            .map(|segment| segment.speed(&snapshot.points))
            .filter(|&speed| speed > 0.0)
            .unwrap_or(DEFAULT_SPEED);

        let state = &mut self.state;
        let sign = state.direction.sign();
        match self.settings.motion_control {
            MotionControl::TimeBased => {
                state.linear_progress += dt / duration * sign;
                state.progress = self.settings.easing.apply(state.linear_progress.clamp(0.0, 1.0));
            }
            MotionControl::SpeedBased => {
                state.progress += dt / (length * speed) * sign;
                state.linear_progress = state.progress;
            }
        }

        let mut finished = false;
        match self.settings.loop_mode {
            LoopMode::None => finished = state.progress > 1.0 - EPSILON,
            LoopMode::Repeat | LoopMode::Revolve => {
                if state.progress > 1.0 - EPSILON {
                    state.progress = 0.0;
                    state.linear_progress = 0.0;
                }
            }
            LoopMode::Reverse => {
                let flip = match state.direction {
                    Direction::Forward => state.progress > 1.0 - EPSILON,
                    Direction::Backward => state.progress < EPSILON,
                };
                if flip {
                    state.direction = state.direction.reversed();
                    debug!(direction = ?state.direction, "playback reversed");
                }
            }
        }
        state.progress = state.progress.clamp(0.0, 1.0);
        state.linear_progress = state.linear_progress.clamp(0.0, 1.0);
        trace!(progress = state.progress, linear = state.linear_progress, "tick");

        self.resample();
        if finished {
            self.stop();
        }
        self.sample
    }

    /// Stops with an error log if the selected path cannot be played.
    /// Returns whether playback was stopped.
    fn stop_if_unplayable(&mut self) -> bool {
        match self.check_playable(self.state.selected_path) {
            Ok(()) => false,
            Err(err) => {
                error!(path = self.state.selected_path, %err, "stopping playback");
                self.stop();
                true
            }
        }
    }

    fn check_playable(&self, path: PathId) -> Result<(), PlaybackError> {
        let snapshot = self.snapshots.get(&path).ok_or(PlaybackError::PathNotFound(path))?;
        if !(snapshot.duration > 0.0 && snapshot.duration.is_finite()) {
            return Err(PlaybackError::InvalidDuration {
                path,
                duration: snapshot.duration,
            });
        }
        if !(snapshot.length > 0.0 && snapshot.length.is_finite()) {
            return Err(PlaybackError::InvalidLength {
                path,
                length: snapshot.length,
            });
        }
        Ok(())
    }

    fn resample(&mut self) {
        let result = self
            .snapshots
            .get(&self.state.selected_path)
            .and_then(|snapshot| sample_snapshot(snapshot, self.state.progress));
        match result {
            Some((sample, segment)) => {
                self.sample = Some(sample);
                self.segment = segment;
            }
            None => {
                self.sample = None;
                self.segment = None;
            }
        }
    }
}
