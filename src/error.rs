use thiserror::Error;

use crate::store::PathId;

/// Top-level error type for the dollypath engine.
#[derive(Debug, Error)]
pub enum DollyError {
    #[error(transparent)]
    Curve(#[from] CurveError),

    #[error(transparent)]
    Range(#[from] RangeError),

    #[error(transparent)]
    Playback(#[from] PlaybackError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Easing(#[from] EasingError),
}

/// Errors raised while building a curve from control points.
#[derive(Debug, Error)]
pub enum CurveError {
    #[error("cannot build a curve from an empty point list")]
    EmptyPointList,

    #[error("at least {required} points are required, got {actual}")]
    InsufficientPoints { required: usize, actual: usize },

    #[error("sample count must be at least 2, got {0}")]
    InvalidSampleCount(usize),
}

/// Errors raised when selecting a sub-range of a parameter map.
#[derive(Debug, Error)]
pub enum RangeError {
    #[error("invalid range indices {start}..{end} for {len} parameters")]
    InvalidIndices { start: usize, end: usize, len: usize },
}

/// Errors raised when a playback command cannot be honoured.
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("path {0} has no built curve")]
    PathNotFound(PathId),

    #[error("path {path} has non-positive total duration {duration}")]
    InvalidDuration { path: PathId, duration: f64 },

    #[error("path {path} has non-positive curve length {length}")]
    InvalidLength { path: PathId, length: f64 },
}

/// Errors related to the control point store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("control point not found")]
    PointNotFound,
}

/// Errors related to easing selection.
#[derive(Debug, Error)]
pub enum EasingError {
    #[error("unknown easing function: {0}")]
    UnknownEase(String),
}

/// Convenience type alias for results using [`DollyError`].
pub type Result<T> = std::result::Result<T, DollyError>;
