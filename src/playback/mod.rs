//! Playback state machine that moves a camera sample along a built path.

mod engine;
mod sample;
mod state;

pub use engine::{CancelHandle, PlaybackEngine, EPSILON};
pub use sample::{sample_snapshot, PlaybackSample, Segment};
pub use state::{Direction, PlaybackState};
