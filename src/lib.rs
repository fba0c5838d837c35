pub mod easing;
pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod playback;
pub mod rebuild;
pub mod session;
pub mod settings;
pub mod store;

pub use error::{DollyError, Result};
