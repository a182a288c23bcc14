//! Request and response shapes of the solve endpoint.

use log::{debug, warn};
use mazer_core::{Grid, Point};
use mazer_paths::{
    Algorithm, Connectivity, Metrics, RrtSettings, SearchParams, SearchResult, SolveError,
};
use serde::{Deserialize, Serialize};

/// Error text of a search that ran but found nothing.
pub const NO_PATH: &str = "No path found";

/// One solve call.
#[derive(Debug, Clone, Deserialize)]
pub struct SolveRequest {
    pub start: [i32; 2],
    pub end: [i32; 2],
    /// Row-major occupancy, `true` = blocked.
    pub blocks: Vec<Vec<bool>>,
    /// Must equal the number of rows in `blocks`.
    pub size: i32,
    /// 4 or 8.
    pub directions: u32,
    pub algorithm: String,
    #[serde(default)]
    pub heuristic_type: usize,
    #[serde(default = "default_beam_width")]
    pub beam_width: i64,
    #[serde(default)]
    pub weights: Option<Vec<Vec<i32>>>,
    #[serde(default)]
    pub is_weighted: bool,
    #[serde(default)]
    pub max_depth: Option<usize>,
    #[serde(default)]
    pub step_size: Option<f64>,
    #[serde(default)]
    pub max_iterations: Option<usize>,
    #[serde(default)]
    pub goal_sample_rate: Option<f64>,
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_beam_width() -> i64 {
    5
}

/// Outcome of a solve call. `error` is set when there is no path, either
/// because the search found none or because the request was rejected.
#[derive(Debug, Clone, Serialize)]
pub struct SolveResponse {
    pub path: Option<Vec<[i32; 2]>>,
    pub exploration_order: Vec<[i32; 2]>,
    pub error: Option<String>,
    pub metrics: Metrics,
}

impl SolveResponse {
    fn rejected(err: &SolveError) -> Self {
        Self {
            path: None,
            exploration_order: Vec::new(),
            error: Some(err.to_string()),
            metrics: Metrics::default(),
        }
    }
}

impl From<SearchResult> for SolveResponse {
    fn from(r: SearchResult) -> Self {
        let pairs = |cells: Vec<Point>| cells.into_iter().map(<[i32; 2]>::from).collect::<Vec<_>>();
        let error = if r.found() { None } else { Some(NO_PATH.to_owned()) };
        Self {
            path: r.path.map(pairs),
            exploration_order: pairs(r.exploration_order),
            error,
            metrics: r.metrics,
        }
    }
}

impl SolveRequest {
    /// Search parameters carried by the request, with defaults for every
    /// field left out.
    pub fn params(&self) -> SearchParams {
        let defaults = RrtSettings::default();
        let rrt = RrtSettings {
            step_size: self.step_size.unwrap_or(defaults.step_size),
            max_iterations: self.max_iterations.unwrap_or(defaults.max_iterations),
            goal_sample_rate: self.goal_sample_rate.unwrap_or(defaults.goal_sample_rate),
            seed: self.seed,
        };
        SearchParams {
            heuristic: self.heuristic_type,
            beam_width: self.beam_width,
            weighted: self.is_weighted,
            max_depth: self.max_depth,
            rrt,
            ..SearchParams::default()
        }
    }

    /// Build the grid, checking `size` against it.
    pub fn grid(&self) -> Result<Grid, SolveError> {
        let mut grid = Grid::from_blocks(&self.blocks)?;
        if grid.size() != self.size {
            return Err(SolveError::InvalidParameter(format!(
                "size {} does not match the {} grid rows",
                self.size,
                grid.size()
            )));
        }
        if let Some(weights) = &self.weights {
            grid = grid.with_weights(weights)?;
        }
        Ok(grid)
    }

    /// Validate and run the request.
    pub fn run(&self) -> Result<SearchResult, SolveError> {
        let algorithm: Algorithm = self.algorithm.parse()?;
        let connectivity = Connectivity::try_from(self.directions)?;
        let grid = self.grid()?;
        mazer_paths::solve(
            algorithm,
            &grid,
            self.start.into(),
            self.end.into(),
            connectivity,
            self.params(),
        )
    }
}

/// Answer a request. Configuration errors become an error response with
/// empty results.
pub fn handle(request: &SolveRequest) -> SolveResponse {
    match request.run() {
        Ok(result) => {
            debug!(
                "{}: found={} explored={}",
                request.algorithm,
                result.found(),
                result.metrics.explored_size
            );
            result.into()
        }
        Err(err) => {
            warn!("rejected {} request: {}", request.algorithm, err);
            SolveResponse::rejected(&err)
        }
    }
}
