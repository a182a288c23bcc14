use log::debug;
use mazer_core::Point;

use crate::error::Result;
use crate::planner::Planner;
use crate::state::{SearchState, endpoint_indices};
use crate::trace::{SearchResult, Trace};
use crate::traits::Pather;

/// A cell on the descent stack. Its neighbors live in `arena[lo..hi]` and
/// `next` is the first one not yet tried.
struct Frame {
    cell: usize,
    depth: usize,
    lo: usize,
    hi: usize,
    next: usize,
}

/// Depth-limited depth-first descent on an explicit stack.
///
/// A cell is settled when entered. Cells at `limit` edges from the source are
/// entered but not expanded. Neighbor lists are captured on entry and
/// filtered against `visited` when tried, as a recursive descent would.
struct Descent {
    state: SearchState,
    frames: Vec<Frame>,
    arena: Vec<usize>,
    nbuf: Vec<Point>,
    goal: usize,
    limit: usize,
}

impl Descent {
    fn new<P: Pather>(pather: &P, goal: usize, limit: usize) -> Self {
        Self {
            state: SearchState::new(pather.range()),
            frames: Vec::new(),
            arena: Vec::new(),
            nbuf: Vec::with_capacity(8),
            goal,
            limit,
        }
    }

    /// Enter `cell` at `depth`. Returns `true` if it is the goal.
    fn enter<P: Pather>(
        &mut self,
        pather: &P,
        trace: &mut Trace,
        cell: usize,
        depth: usize,
    ) -> bool {
        self.state.visited[cell] = true;
        let cp = self.state.point(cell);
        trace.settle(cp);
        if cell == self.goal {
            return true;
        }
        if depth >= self.limit {
            return false;
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        pather.neighbors(cp, &mut nbuf);
        let lo = self.arena.len();
        self.arena
            .extend(nbuf.iter().filter_map(|&np| self.state.idx(np)));
        self.nbuf = nbuf;

        self.frames.push(Frame {
            cell,
            depth,
            lo,
            hi: self.arena.len(),
            next: lo,
        });
        false
    }

    /// Run from `source`. Returns `true` once the goal is entered.
    fn run<P: Pather>(&mut self, pather: &P, trace: &mut Trace, source: usize) -> bool {
        if self.enter(pather, trace, source, 0) {
            return true;
        }
        while let Some(top) = self.frames.last_mut() {
            if top.next == top.hi {
                let lo = top.lo;
                self.frames.pop();
                self.arena.truncate(lo);
                continue;
            }
            let ni = self.arena[top.next];
            top.next += 1;
            let (cell, depth) = (top.cell, top.depth);
            if self.state.visited[ni] {
                continue;
            }
            self.state.parent[ni] = cell;
            if self.enter(pather, trace, ni, depth + 1) {
                return true;
            }
        }
        false
    }
}

/// Depth-first search bounded to paths of at most `limit` edges.
pub(crate) fn depth_first<P: Pather>(
    pather: &P,
    start: Point,
    goal: Point,
    limit: usize,
) -> SearchResult {
    if start == goal {
        return SearchResult::trivial(start, false);
    }
    let Some((start_idx, goal_idx)) = endpoint_indices(pather, start, goal) else {
        return Trace::start().finish(None, 0, None);
    };

    let mut trace = Trace::start();
    let mut descent = Descent::new(pather, goal_idx, limit);
    let found = descent.run(pather, &mut trace, start_idx);
    let path = found.then(|| descent.state.path_to(goal_idx));
    debug!(
        "dfs {} -> {} (limit {}): found={} settled={}",
        start,
        goal,
        limit,
        found,
        trace.settled()
    );
    trace.finish(path, 0, None)
}

/// Depth-limited descents with limits `1..=cap`, each over fresh labels.
///
/// Every iteration appends to the same trace, so the exploration order is
/// the concatenation of all iterations and the settled count accumulates.
pub(crate) fn iterative_deepening<P: Pather>(
    pather: &P,
    start: Point,
    goal: Point,
    cap: usize,
) -> SearchResult {
    if start == goal {
        return SearchResult::trivial(start, false);
    }
    let Some((start_idx, goal_idx)) = endpoint_indices(pather, start, goal) else {
        return Trace::start().finish(None, 0, None);
    };

    let mut trace = Trace::start();
    let mut path = None;
    for limit in 1..=cap {
        let mut descent = Descent::new(pather, goal_idx, limit);
        if descent.run(pather, &mut trace, start_idx) {
            debug!(
                "iddfs {} -> {}: goal at limit {}, settled={}",
                start,
                goal,
                limit,
                trace.settled()
            );
            path = Some(descent.state.path_to(goal_idx));
            break;
        }
    }
    if path.is_none() {
        debug!(
            "iddfs {} -> {}: cap {} exhausted, settled={}",
            start,
            goal,
            cap,
            trace.settled()
        );
    }
    trace.finish(path, 0, None)
}

impl Planner<'_> {
    /// Depth-first search. The budget is `max_depth` edges, by default
    /// `size²`. The path is the first one found, not the shortest.
    pub fn dfs(&self, start: Point, goal: Point) -> Result<SearchResult> {
        self.check_endpoints(start, goal)?;
        let size = self.grid.size() as usize;
        let limit = self.params.max_depth.unwrap_or(size * size);
        Ok(depth_first(&self.pather(), start, goal, limit))
    }

    /// Iterative deepening depth-first search, with limits up to
    /// `max_depth` (by default `2·size`).
    pub fn iterative_deepening(&self, start: Point, goal: Point) -> Result<SearchResult> {
        self.check_endpoints(start, goal)?;
        let cap = self
            .params
            .max_depth
            .unwrap_or(2 * self.grid.size() as usize);
        Ok(iterative_deepening(&self.pather(), start, goal, cap))
    }
}

#[cfg(test)]
mod tests {
    use mazer_core::Grid;

    use super::*;
    use crate::neighbors::{Connectivity, GridPather};

    #[test]
    fn follows_first_direction_greedily() {
        let grid = Grid::new(3).unwrap();
        let pather = GridPather::new(&grid, Connectivity::Four, false);
        let r = depth_first(&pather, Point::new(0, 0), Point::new(1, 0), 9);
        // Snakes along the border before turning back up to the goal.
        assert_eq!(
            r.path,
            Some(vec![
                Point::new(0, 0),
                Point::new(0, 1),
                Point::new(0, 2),
                Point::new(1, 2),
                Point::new(2, 2),
                Point::new(2, 1),
                Point::new(2, 0),
                Point::new(1, 0),
            ])
        );
        assert_eq!(r.exploration_order, r.path.clone().unwrap());
        assert_eq!(r.metrics.frontier_size, 0);
    }

    #[test]
    fn backtracks_out_of_dead_ends() {
        let grid = Grid::parse(
            "
            ...
            .##
            ...
            ",
        )
        .unwrap();
        let pather = GridPather::new(&grid, Connectivity::Four, false);
        let r = depth_first(&pather, Point::new(0, 0), Point::new(2, 2), 9);
        assert_eq!(
            r.exploration_order,
            vec![
                Point::new(0, 0),
                Point::new(0, 1),
                Point::new(0, 2),
                Point::new(1, 0),
                Point::new(2, 0),
                Point::new(2, 1),
                Point::new(2, 2),
            ]
        );
        assert_eq!(r.metrics.path_length, 4);
        assert!(r.is_valid_path(&grid, Connectivity::Four));
    }

    #[test]
    fn tight_budget_fails() {
        let grid = Grid::new(3).unwrap();
        let pather = GridPather::new(&grid, Connectivity::Four, false);
        let r = depth_first(&pather, Point::new(0, 0), Point::new(2, 2), 3);
        assert!(!r.found());
        assert!(r.metrics.explored_size <= 9);
        let r = depth_first(&pather, Point::new(0, 0), Point::new(2, 2), 4);
        assert!(r.found());
    }

    #[test]
    fn deepening_concatenates_iterations() {
        let grid = Grid::new(3).unwrap();
        let pather = GridPather::new(&grid, Connectivity::Four, false);
        let r = iterative_deepening(&pather, Point::new(0, 0), Point::new(0, 2), 6);
        assert_eq!(r.metrics.path_length, 2);
        // Limit 1 settles start and its two neighbors, limit 2 finds the goal
        // through (0, 1).
        assert_eq!(
            r.exploration_order,
            vec![
                Point::new(0, 0),
                Point::new(0, 1),
                Point::new(1, 0),
                Point::new(0, 0),
                Point::new(0, 1),
                Point::new(0, 2),
            ]
        );
        assert_eq!(r.metrics.explored_size, 6);
    }

    #[test]
    fn deepening_respects_cap() {
        let grid = Grid::new(4).unwrap();
        let pather = GridPather::new(&grid, Connectivity::Four, false);
        let r = iterative_deepening(&pather, Point::new(0, 0), Point::new(3, 3), 5);
        assert!(!r.found());
        assert!(r.metrics.explored_size > 0);
        let r = iterative_deepening(&pather, Point::new(0, 0), Point::new(3, 3), 6);
        assert_eq!(r.metrics.path_length, 6);
    }
}
