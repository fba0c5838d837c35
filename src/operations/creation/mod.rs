mod build_curve;
mod generate_circle;

pub use build_curve::{BuildCurve, BuiltCurve, DEFAULT_SAMPLE_COUNT, MIN_SMOOTH_POINTS};
pub use generate_circle::GenerateCircle;
