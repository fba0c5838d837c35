use crate::settings::PathType;

/// Computes how long a time-based playback of a path lasts.
///
/// Linear and closed paths sum every point's duration. Smoothed open paths
/// skip the first anchor, the last travelled point and the last anchor.
#[derive(Debug, Clone)]
pub struct TotalDuration<'a> {
    durations: &'a [f64],
    path_type: PathType,
    closed: bool,
}

impl<'a> TotalDuration<'a> {
    /// Creates a new `TotalDuration` query. `path_type` is the effective
    /// path type.
    #[must_use]
    pub fn new(durations: &'a [f64], path_type: PathType, closed: bool) -> Self {
        Self {
            durations,
            path_type,
            closed,
        }
    }

    /// Executes the query.
    #[must_use]
    pub fn execute(&self) -> f64 {
        let n = self.durations.len();
        let travelled: &[f64] = if self.closed || !self.path_type.is_smoothed() {
            self.durations
        } else if n < 3 {
            &[]
        } else {
            &self.durations[1..n - 2]
        };
        travelled.iter().sum()
    }
}
