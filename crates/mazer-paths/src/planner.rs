//! Solve entry point and algorithm selection.

use std::fmt;
use std::str::FromStr;

use log::trace;
use mazer_core::{Grid, Point};

use crate::error::{Endpoint, Result, SolveError};
use crate::heuristic::Heuristic;
use crate::neighbors::{Connectivity, GridPather};
use crate::params::SearchParams;
use crate::trace::SearchResult;

/// The search strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Algorithm {
    Bfs,
    Dfs,
    IterativeDeepening,
    UniformCost,
    Astar,
    GreedyBestFirst,
    Bidirectional,
    LocalBeam,
    Rrt,
}

impl Algorithm {
    /// Every strategy, in a stable order.
    pub const ALL: [Algorithm; 9] = [
        Self::Bfs,
        Self::Dfs,
        Self::IterativeDeepening,
        Self::UniformCost,
        Self::Astar,
        Self::GreedyBestFirst,
        Self::Bidirectional,
        Self::LocalBeam,
        Self::Rrt,
    ];

    /// Canonical name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Bfs => "bfs",
            Self::Dfs => "dfs",
            Self::IterativeDeepening => "iterative_deepening",
            Self::UniformCost => "ucs",
            Self::Astar => "astar",
            Self::GreedyBestFirst => "greedy_best_first",
            Self::Bidirectional => "bidirectional",
            Self::LocalBeam => "local_beam",
            Self::Rrt => "rrt",
        }
    }

    /// Whether results carry a total cost.
    pub fn is_cost_aware(self) -> bool {
        matches!(self, Self::UniformCost | Self::Astar | Self::GreedyBestFirst)
    }

    /// Whether the search reads the configured heuristic.
    pub fn uses_heuristic(self) -> bool {
        matches!(self, Self::Astar | Self::GreedyBestFirst | Self::LocalBeam)
    }

    /// Whether equal inputs always produce equal results.
    pub fn is_deterministic(self) -> bool {
        self != Self::Rrt
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SolveError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "bfs" => Self::Bfs,
            "dfs" => Self::Dfs,
            "iterative_deepening" | "iddfs" => Self::IterativeDeepening,
            "ucs" | "dijkstra" | "uniform_cost" => Self::UniformCost,
            "astar" | "a_star" => Self::Astar,
            "greedy_best_first" | "greedy" => Self::GreedyBestFirst,
            "bidirectional" => Self::Bidirectional,
            "local_beam" | "beam" => Self::LocalBeam,
            "rrt" => Self::Rrt,
            _ => return Err(SolveError::UnknownAlgorithm(s.to_owned())),
        })
    }
}

/// A validated search configuration over one grid.
///
/// Holds no search state: every call allocates its own labels and frontier,
/// so one planner serves any number of queries, from any thread.
#[derive(Debug, Clone)]
pub struct Planner<'a> {
    pub(crate) grid: &'a Grid,
    pub(crate) connectivity: Connectivity,
    pub(crate) params: SearchParams,
}

impl<'a> Planner<'a> {
    /// Validate `params` and build a planner.
    ///
    /// The heuristic index is checked later, by the searches that use it.
    pub fn new(grid: &'a Grid, connectivity: Connectivity, params: SearchParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            grid,
            connectivity,
            params,
        })
    }

    pub fn grid(&self) -> &'a Grid {
        self.grid
    }

    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    /// The configured heuristic, or [`SolveError::InvalidHeuristic`].
    pub fn heuristic(&self) -> Result<Heuristic> {
        self.params.heuristic()
    }

    pub(crate) fn pather(&self) -> GridPather<'a> {
        GridPather::new(self.grid, self.connectivity, self.params.weighted)
    }

    /// Both endpoints must lie on the grid.
    pub(crate) fn check_endpoints(&self, start: Point, goal: Point) -> Result<()> {
        for (endpoint, pos) in [(Endpoint::Start, start), (Endpoint::Goal, goal)] {
            if !self.grid.contains(pos) {
                return Err(SolveError::OutOfBounds {
                    endpoint,
                    pos,
                    size: self.grid.size(),
                });
            }
        }
        Ok(())
    }

    /// Run `algorithm` from `start` to `goal`.
    pub fn solve(&self, algorithm: Algorithm, start: Point, goal: Point) -> Result<SearchResult> {
        trace!(
            "solve {} {} -> {} on {}x{} (heuristic {}, {} directions)",
            algorithm,
            start,
            goal,
            self.grid.size(),
            self.grid.size(),
            self.params.heuristic,
            self.connectivity.count()
        );
        match algorithm {
            Algorithm::Bfs => self.bfs(start, goal),
            Algorithm::Dfs => self.dfs(start, goal),
            Algorithm::IterativeDeepening => self.iterative_deepening(start, goal),
            Algorithm::UniformCost => self.uniform_cost(start, goal),
            Algorithm::Astar => self.astar(start, goal),
            Algorithm::GreedyBestFirst => self.greedy_best_first(start, goal),
            Algorithm::Bidirectional => self.bidirectional(start, goal),
            Algorithm::LocalBeam => self.local_beam(start, goal),
            Algorithm::Rrt => self.rrt(start, goal),
        }
    }
}

/// Validate the configuration and run one search.
pub fn solve(
    algorithm: Algorithm,
    grid: &Grid,
    start: Point,
    goal: Point,
    connectivity: Connectivity,
    params: SearchParams,
) -> Result<SearchResult> {
    Planner::new(grid, connectivity, params)?.solve(algorithm, start, goal)
}
