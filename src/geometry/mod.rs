pub mod curve;

pub use curve::{BSpline, CatmullRom, Curve, PathCurve, Polyline};
