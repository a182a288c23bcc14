//! Path search strategies for occupancy grids.
//!
//! This crate runs one synchronous search over an immutable
//! [`Grid`](mazer_core::Grid) snapshot and reports the path together with the
//! order in which cells were settled, for visualization and comparison:
//!
//! - **Breadth-first** shortest edge-count paths ([`Planner::bfs`])
//! - **Depth-first**, depth-bounded ([`Planner::dfs`])
//! - **Iterative deepening** depth-first ([`Planner::iterative_deepening`])
//! - **Uniform-cost / Dijkstra** ([`Planner::uniform_cost`])
//! - **A\*** with a selectable heuristic ([`Planner::astar`])
//! - **Greedy best-first** ([`Planner::greedy_best_first`])
//! - **Bidirectional** breadth-first ([`Planner::bidirectional`])
//! - **Local beam** search ([`Planner::local_beam`])
//! - **RRT**, a rapidly-exploring random tree ([`Planner::rrt`])
//!
//! Every strategy allocates its own labels, frontier and trace per call, so a
//! [`Planner`] can be shared freely between threads.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | BFS, DFS, IDDFS, bidirectional, beam, RRT |
//! | [`WeightedPather`] : [`Pather`] | UCS, A*, greedy best-first |

mod beam;
mod best_first;
mod bfs;
mod bidirectional;
mod dfs;
mod distance;
mod error;
mod heuristic;
mod neighbors;
mod params;
mod planner;
mod rrt;
mod state;
mod trace;
mod traits;

pub use distance::{chebyshev, diagonal, euclidean, manhattan, minkowski, octile, squared_euclidean};
pub use error::{Endpoint, Result, SolveError};
pub use heuristic::Heuristic;
pub use neighbors::{Connectivity, GridPather};
pub use params::{RrtSettings, SearchParams, MAX_BEAM_WIDTH, MIN_BEAM_WIDTH};
pub use planner::{Algorithm, Planner, solve};
pub use trace::{Metrics, SearchResult};
pub use traits::{Pather, WeightedPather};
