mod debounce;

pub use debounce::{Debounce, DEFAULT_WINDOW};

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::Result;
use crate::geometry::curve::{Curve, PathCurve};
use crate::math::Point3;
use crate::operations::creation::{BuildCurve, DEFAULT_SAMPLE_COUNT};
use crate::operations::query::{LocateParameters, ParameterMap, Range, SearchParams, TotalDuration, TrimRange};
use crate::settings::{PathType, PlaybackSettings};
use crate::store::{ControlPoint, PathId, PointStore};

/// Immutable result of rebuilding one path.
#[derive(Debug, Clone)]
pub struct PathSnapshot {
    /// The rebuilt path.
    pub path: PathId,
    /// The path type actually built.
    pub path_type: PathType,
    /// The evaluable curve.
    pub curve: PathCurve,
    /// Curve parameter of every point.
    pub parameters: ParameterMap,
    /// Travelled portion of the curve.
    pub range: Range,
    /// Total curve length.
    pub length: f64,
    /// Total time-based playback duration in seconds.
    pub duration: f64,
    /// The points the curve was built from, in index order, with their
    /// parameters filled in.
    pub points: Vec<ControlPoint>,
}

/// Every published snapshot, keyed by path.
pub type Snapshots = BTreeMap<PathId, Arc<PathSnapshot>>;

/// Rebuilds the curve, parameters, range and duration of one path from
/// scratch.
#[derive(Debug, Clone)]
pub struct RebuildPath {
    path: PathId,
    points: Vec<ControlPoint>,
    settings: PlaybackSettings,
    sample_count: usize,
    params: SearchParams,
}

impl RebuildPath {
    /// Creates a new `RebuildPath` operation. `points` must be in index
    /// order.
    #[must_use]
    pub fn new(path: PathId, points: Vec<ControlPoint>, settings: PlaybackSettings) -> Self {
        Self {
            path,
            points,
            settings,
            sample_count: DEFAULT_SAMPLE_COUNT,
            params: SearchParams::default(),
        }
    }

    /// Overrides the number of B-spline samples used for fitted curves.
    #[must_use]
    pub fn with_sample_count(mut self, sample_count: usize) -> Self {
        self.sample_count = sample_count;
        self
    }

    /// Overrides the parameter search constants.
    #[must_use]
    pub fn with_params(mut self, params: SearchParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the rebuild.
    ///
    /// # Errors
    ///
    /// Returns an error if the curve cannot be built from the points.
    pub fn execute(self) -> Result<PathSnapshot> {
        let closed = self.settings.closed();
        let positions: Vec<Point3> = self.points.iter().map(|p| p.position).collect();

        let built = BuildCurve::new(positions.clone(), self.settings.path_type, closed)
            .with_sample_count(self.sample_count)
            .execute()?;
        let parameters = LocateParameters::new(&positions)
            .with_seeds(built.coarse_parameters.as_deref())
            .with_params(self.params)
            .execute(&built.curve);
        let range = TrimRange::new(built.path_type, &positions, &parameters)
            .with_params(self.params)
            .execute(&built.curve);
        let durations: Vec<f64> = self.points.iter().map(|p| p.duration).collect();
        let duration = TotalDuration::new(&durations, built.path_type, closed).execute();
        let length = built.curve.length();

        let mut points = self.points;
        for (point, &t) in points.iter_mut().zip(parameters.as_slice()) {
            point.parameter = t;
        }

        debug!(
            path = self.path,
            path_type = %built.path_type,
            points = points.len(),
            length,
            duration,
            range_start = range.start,
            range_end = range.end,
            "rebuilt path"
        );

        Ok(PathSnapshot {
            path: self.path,
            path_type: built.path_type,
            curve: built.curve,
            parameters,
            range,
            length,
            duration,
            points,
        })
    }
}

/// Rebuilds every path in the store.
///
/// Point indices are renumbered first. Paths with fewer than two points
/// get no snapshot. The assigned parameters are written back to the store.
pub fn rebuild_all(store: &mut PointStore, settings: &PlaybackSettings) -> Snapshots {
    store.renumber();
    let mut snapshots = Snapshots::new();
    for path in store.path_ids() {
        let points = store.path(path);
        if points.len() < 2 {
            warn!(path, points = points.len(), "skipping path with fewer than two points");
            continue;
        }
        match RebuildPath::new(path, points, *settings).execute() {
            Ok(snapshot) => {
                store.set_parameters(path, snapshot.parameters.as_slice());
                snapshots.insert(path, Arc::new(snapshot));
            }
            Err(err) => warn!(path, %err, "failed to rebuild path"),
        }
    }
    snapshots
}
