use crate::store::PathId;

/// Travel direction along a path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    /// `1.0` for forward, `-1.0` for backward.
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Self::Forward => 1.0,
            Self::Backward => -1.0,
        }
    }

    /// Returns the opposite direction.
    #[must_use]
    pub fn reversed(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}

/// Mutable playback state of an editing session.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlaybackState {
    /// Eased progress in `[0, 1]`. This is the externally observed value.
    pub progress: f64,
    /// Pre-easing accumulator used by time-based motion.
    pub linear_progress: f64,
    /// Current travel direction.
    pub direction: Direction,
    /// Whether the tick loop is running.
    pub is_playing: bool,
    /// The path being previewed.
    pub selected_path: PathId,
}
