use tracing::{debug, warn};

use crate::geometry::curve::{Curve, PathCurve};
use crate::math::{step, Point3};

use super::closest_parameter::{refine, scaled_samples, Candidate, ClosestParameter};

/// Hard cap on the recursion depth of the ordered search.
pub const MAX_SEARCH_DEPTH: usize = 4096;

/// Tuning constants for nearest-parameter searches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchParams {
    /// Candidates kept per point during the ordered search.
    pub top_candidates: usize,
    /// Minimum coarse samples for a windowed candidate search.
    pub min_samples: usize,
    /// Minimum coarse samples for an unconstrained nearest search.
    pub min_closed_samples: usize,
    /// Coarse samples per curve knot across the full domain.
    pub samples_per_knot: usize,
    /// Samples of the local re-sample around each candidate.
    pub refinement_samples: usize,
    /// Gap enforced between consecutive parameters on open curves.
    pub order_margin: f64,
    /// Upper bound on candidates tried by one ordered search before it
    /// gives up and falls back to uniform spacing.
    pub max_attempts: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            top_candidates: 10,
            min_samples: 50,
            min_closed_samples: 100,
            samples_per_knot: 100,
            refinement_samples: 200,
            order_margin: 0.001,
            max_attempts: 100_000,
        }
    }
}

impl SearchParams {
    /// Coarse samples across the full domain of a curve with `knot_count`
    /// knots.
    #[must_use]
    pub fn search_samples(&self, knot_count: usize) -> usize {
        (knot_count * self.samples_per_knot).max(1)
    }
}

/// Curve parameters assigned to the control points of a path.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterMap {
    parameters: Vec<f64>,
    closed: bool,
    used_fallback: bool,
}

impl ParameterMap {
    /// Wraps already computed parameters.
    #[must_use]
    pub fn new(parameters: Vec<f64>, closed: bool) -> Self {
        Self {
            parameters,
            closed,
            used_fallback: false,
        }
    }

    /// Evenly spaced parameters `i / (n - 1)`.
    #[must_use]
    pub fn uniform(count: usize, closed: bool) -> Self {
        let parameters = (0..count)
            .map(|i| step(0.0, 1.0, i, count.saturating_sub(1)))
            .collect();
        Self {
            parameters,
            closed,
            used_fallback: true,
        }
    }

    /// Returns the parameter of point `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.parameters.get(index).copied()
    }

    /// Returns every parameter in point order.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.parameters
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Returns whether the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Returns whether the map belongs to a closed curve.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Returns whether the ordered search failed and uniform spacing was
    /// used instead.
    #[must_use]
    pub fn used_fallback(&self) -> bool {
        self.used_fallback
    }

    /// Returns whether parameters strictly increase in point order.
    ///
    /// Always true for closed curves, which have no ordering requirement.
    #[must_use]
    pub fn is_strictly_increasing(&self) -> bool {
        self.closed || self.parameters.windows(2).all(|w| w[0] < w[1])
    }
}

/// Assigns every control point a parameter on a built curve.
///
/// On open curves the parameters must strictly increase in point order.
/// Each point ranks the nearest samples of the remaining domain, and the
/// candidates are tried nearest-first with backtracking whenever a later
/// point cannot be placed. If no ordered assignment exists the parameters
/// fall back to uniform spacing.
///
/// On closed curves each point is independently mapped to its nearest
/// parameter.
#[derive(Debug, Clone)]
pub struct LocateParameters<'a> {
    points: &'a [Point3],
    seeds: Option<&'a [f64]>,
    params: SearchParams,
}

impl<'a> LocateParameters<'a> {
    /// Creates a new `LocateParameters` query.
    #[must_use]
    pub fn new(points: &'a [Point3]) -> Self {
        Self {
            points,
            seeds: None,
            params: SearchParams::default(),
        }
    }

    /// Adds approximate parameters (one per point) that are refined and
    /// offered as extra candidates.
    #[must_use]
    pub fn with_seeds(mut self, seeds: Option<&'a [f64]>) -> Self {
        self.seeds = seeds;
        self
    }

    /// Overrides the search parameters.
    #[must_use]
    pub fn with_params(mut self, params: SearchParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the search against `curve`.
    #[must_use]
    pub fn execute(&self, curve: &PathCurve) -> ParameterMap {
        let closed = curve.is_closed();
        let search_samples = self.params.search_samples(curve.knot_count());

        if closed {
            let parameters = self
                .points
                .iter()
                .map(|p| {
                    ClosestParameter::new(*p)
                        .with_params(self.params)
                        .execute(curve, curve.knot_count())
                        .parameter
                })
                .collect();
            return ParameterMap::new(parameters, true);
        }

        let mut search = OrderedSearch {
            curve,
            points: self.points,
            seeds: self.seeds,
            params: &self.params,
            search_samples,
            attempts_left: self.params.max_attempts,
            parameters: vec![0.0; self.points.len()],
        };
        if search.place(0, 0.0) {
            debug!(
                points = self.points.len(),
                attempts = self.params.max_attempts - search.attempts_left,
                "located ordered parameters"
            );
            return ParameterMap::new(search.parameters, false);
        }

        warn!(
            points = self.points.len(),
            "no ordered parameter assignment found, spacing parameters uniformly"
        );
        ParameterMap::uniform(self.points.len(), false)
    }
}

struct OrderedSearch<'a> {
    curve: &'a PathCurve,
    points: &'a [Point3],
    seeds: Option<&'a [f64]>,
    params: &'a SearchParams,
    search_samples: usize,
    attempts_left: usize,
    parameters: Vec<f64>,
}

impl OrderedSearch<'_> {
    /// Places point `index` and every point after it at parameters of at
    /// least `min_t`. Returns `false` if that is impossible.
    fn place(&mut self, index: usize, min_t: f64) -> bool {
        if index >= self.points.len() {
            return true;
        }
        if index >= MAX_SEARCH_DEPTH {
            return false;
        }

        for candidate in self.candidates(index, min_t) {
            if self.attempts_left == 0 {
                return false;
            }
            self.attempts_left -= 1;
            self.parameters[index] = candidate.parameter;
            if self.place(index + 1, candidate.parameter + self.params.order_margin) {
                return true;
            }
        }
        false
    }

    /// Ranks the nearest parameters to point `index` within `[min_t, 1]`.
    fn candidates(&self, index: usize, min_t: f64) -> Vec<Candidate> {
        let end = 1.0;
        if min_t >= end {
            return Vec::new();
        }
        let point = &self.points[index];
        let samples = scaled_samples(self.search_samples, end - min_t).max(self.params.min_samples);

        let mut coarse: Vec<Candidate> = (0..=samples)
            .map(|j| {
                let t = step(min_t, end, j, samples);
                Candidate {
                    parameter: t,
                    distance: (self.curve.evaluate(t) - point).norm(),
                }
            })
            .collect();
        coarse.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        coarse.truncate(self.params.top_candidates);

        if let Some(seed) = self.seeds.and_then(|s| s.get(index)) {
            if (min_t..=end).contains(seed) {
                coarse.push(Candidate {
                    parameter: *seed,
                    distance: 0.0,
                });
            }
        }

        let mut refined: Vec<Candidate> = coarse
            .iter()
            .map(|c| {
                refine(
                    self.curve,
                    point,
                    c.parameter,
                    min_t,
                    end,
                    self.search_samples,
                    self.params,
                )
            })
            .collect();
        refined.sort_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then(a.parameter.total_cmp(&b.parameter))
        });
        refined.dedup_by(|a, b| (a.parameter - b.parameter).abs() < crate::math::TOLERANCE);
        refined
    }
}
