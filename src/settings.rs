//! Policy settings that drive curve building and playback.

use std::fmt;

use crate::easing::Ease;

/// How a path is smoothed between its control points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PathType {
    /// Degree-3 B-spline. Very smooth, but does not generally pass through
    /// the control points.
    #[default]
    Fitted,
    /// Catmull-Rom interpolation through every control point.
    Loose,
    /// Straight segments between control points.
    Linear,
}

impl PathType {
    /// Returns whether this path type smooths the control points and
    /// therefore treats the first and last points as anchors.
    #[must_use]
    pub fn is_smoothed(self) -> bool {
        !matches!(self, Self::Linear)
    }
}

impl fmt::Display for PathType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fitted => "fitted",
            Self::Loose => "loose",
            Self::Linear => "linear",
        };
        f.write_str(name)
    }
}

/// Behaviour of playback when it reaches an end of the path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LoopMode {
    /// Stop at the end.
    #[default]
    None,
    /// Restart from the start once the end is reached.
    Repeat,
    /// Change direction at either end.
    Reverse,
    /// Connect the end of the path back to the start so it loops smoothly.
    Revolve,
}

/// Whether playback speed derives from point durations or point speeds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MotionControl {
    /// The whole path takes the summed point durations; easing applies.
    #[default]
    TimeBased,
    /// Each segment moves at the interpolated speed of its bounding points.
    SpeedBased,
}

/// Policy settings shared by every path of an editing session.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlaybackSettings {
    /// Curve interpolation policy.
    pub path_type: PathType,
    /// End-of-path behaviour.
    pub loop_mode: LoopMode,
    /// Time- or speed-based motion.
    pub motion_control: MotionControl,
    /// Easing applied to time-based motion.
    pub easing: Ease,
}

impl PlaybackSettings {
    /// Returns whether paths are built as closed loops.
    #[must_use]
    pub fn closed(&self) -> bool {
        self.loop_mode == LoopMode::Revolve
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_editor_defaults() {
        let settings = PlaybackSettings::default();
        assert_eq!(settings.path_type, PathType::Fitted);
        assert_eq!(settings.loop_mode, LoopMode::None);
        assert_eq!(settings.motion_control, MotionControl::TimeBased);
        assert_eq!(settings.easing, Ease::Linear);
    }

    #[test]
    fn only_revolve_closes_the_path() {
        for (mode, closed) in [
            (LoopMode::None, false),
            (LoopMode::Repeat, false),
            (LoopMode::Reverse, false),
            (LoopMode::Revolve, true),
        ] {
            let settings = PlaybackSettings {
                loop_mode: mode,
                ..PlaybackSettings::default()
            };
            assert_eq!(settings.closed(), closed);
        }
    }
}
