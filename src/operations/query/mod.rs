mod closest_parameter;
mod control_point_distances;
mod locate_parameters;
mod total_duration;
mod trim_range;

pub use closest_parameter::{Candidate, ClosestParameter};
pub use control_point_distances::ControlPointDistances;
pub use locate_parameters::{LocateParameters, ParameterMap, SearchParams, MAX_SEARCH_DEPTH};
pub use total_duration::TotalDuration;
pub use trim_range::{Range, TrimRange};
