use std::collections::BinaryHeap;

use log::debug;
use mazer_core::Point;

use crate::error::Result;
use crate::heuristic::Heuristic;
use crate::planner::Planner;
use crate::state::{NodeRef, SearchState, endpoint_indices};
use crate::trace::{SearchResult, Trace};
use crate::traits::WeightedPather;

/// Cost label of a cell not reached yet.
const UNREACHABLE: i64 = i64::MAX;

/// Priority policy of a best-first search.
pub(crate) trait FrontierOrder {
    /// Whether a cheaper route to an unsettled cell re-labels and re-pushes
    /// it. Without relaxation a cell is pushed once, at first discovery.
    const RELAXES: bool;

    /// Heap key of `p`, reached with accumulated cost `g` by a step costing
    /// `step`. Smaller keys pop first.
    fn key(&self, g: i64, step: i64, p: Point) -> f64;
}

/// Uniform-cost ordering: accumulated cost alone.
pub(crate) struct CostOrder;

impl FrontierOrder for CostOrder {
    const RELAXES: bool = true;

    #[inline]
    fn key(&self, g: i64, _step: i64, _p: Point) -> f64 {
        g as f64
    }
}

/// A* ordering: accumulated cost plus estimate to the goal.
pub(crate) struct AstarOrder {
    pub(crate) heuristic: Heuristic,
    pub(crate) goal: Point,
}

impl FrontierOrder for AstarOrder {
    const RELAXES: bool = true;

    #[inline]
    fn key(&self, g: i64, _step: i64, p: Point) -> f64 {
        g as f64 + self.heuristic.estimate(p, self.goal)
    }
}

/// Greedy ordering: estimate to the goal, plus the entry cost of the cell
/// in weighted mode.
pub(crate) struct GreedyOrder {
    pub(crate) heuristic: Heuristic,
    pub(crate) goal: Point,
    pub(crate) weighted: bool,
}

impl FrontierOrder for GreedyOrder {
    const RELAXES: bool = false;

    #[inline]
    fn key(&self, _g: i64, step: i64, p: Point) -> f64 {
        let h = self.heuristic.estimate(p, self.goal);
        if self.weighted { h + step as f64 } else { h }
    }
}

/// Best-first search over a min-heap with lazy deletion.
///
/// Cells may sit in the heap several times; only the first pop of a cell is
/// honored and later ones are discarded against the visited bitmap. Equal
/// keys pop in push order. The reported cost is the label of the goal.
pub(crate) fn best_first<P, O>(pather: &P, order: &O, start: Point, goal: Point) -> SearchResult
where
    P: WeightedPather,
    O: FrontierOrder,
{
    if start == goal {
        return SearchResult::trivial(start, true);
    }
    let Some((start_idx, goal_idx)) = endpoint_indices(pather, start, goal) else {
        return Trace::start().finish(None, 0, None);
    };
    let mut state = SearchState::new(pather.range());

    let mut trace = Trace::start();
    let mut g = vec![UNREACHABLE; state.visited.len()];
    g[start_idx] = 0;

    let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
    let mut seq = 0u64;
    open.push(NodeRef {
        idx: start_idx,
        key: order.key(0, 0, start),
        seq,
    });

    let mut nbuf: Vec<Point> = Vec::with_capacity(8);

    let found = 'search: loop {
        let Some(current) = open.pop() else {
            break 'search false;
        };
        let ci = current.idx;

        // Stale entry.
        if state.visited[ci] {
            continue;
        }
        state.visited[ci] = true;
        let cp = state.point(ci);
        trace.settle(cp);

        if ci == goal_idx {
            break 'search true;
        }

        let current_g = g[ci];
        nbuf.clear();
        pather.neighbors(cp, &mut nbuf);

        for &np in nbuf.iter() {
            let Some(ni) = state.idx(np) else {
                continue;
            };
            if state.visited[ni] {
                continue;
            }
            let step = pather.cost(cp, np);
            let tentative = current_g + step;
            if O::RELAXES {
                if tentative >= g[ni] {
                    continue;
                }
            } else if g[ni] != UNREACHABLE {
                continue;
            }
            g[ni] = tentative;
            state.parent[ni] = ci;
            seq += 1;
            open.push(NodeRef {
                idx: ni,
                key: order.key(tentative, step, np),
                seq,
            });
        }
    };

    let path = found.then(|| state.path_to(goal_idx));
    let cost = found.then(|| g[goal_idx]);
    debug!(
        "best-first {} -> {}: cost={:?} settled={} frontier={}",
        start,
        goal,
        cost,
        trace.settled(),
        open.len()
    );
    trace.finish(path, open.len(), cost)
}

impl Planner<'_> {
    /// Uniform-cost search (Dijkstra). Returns a cheapest path.
    pub fn uniform_cost(&self, start: Point, goal: Point) -> Result<SearchResult> {
        self.check_endpoints(start, goal)?;
        Ok(best_first(&self.pather(), &CostOrder, start, goal))
    }

    /// A* search with the configured heuristic. Optimal when the heuristic
    /// is admissible for the connectivity and weights.
    pub fn astar(&self, start: Point, goal: Point) -> Result<SearchResult> {
        self.check_endpoints(start, goal)?;
        let order = AstarOrder {
            heuristic: self.heuristic()?,
            goal,
        };
        Ok(best_first(&self.pather(), &order, start, goal))
    }

    /// Greedy best-first search: always expands the cell estimated closest
    /// to the goal.
    pub fn greedy_best_first(&self, start: Point, goal: Point) -> Result<SearchResult> {
        self.check_endpoints(start, goal)?;
        let order = GreedyOrder {
            heuristic: self.heuristic()?,
            goal,
            weighted: self.params.weighted,
        };
        Ok(best_first(&self.pather(), &order, start, goal))
    }
}

#[cfg(test)]
mod tests {
    use mazer_core::Grid;

    use super::*;
    use crate::neighbors::{Connectivity, GridPather};

    fn weighted_grid() -> Grid {
        Grid::parse(
            "
            .9...
            .9.#.
            .1.#.
            .9...
            .....
            ",
        )
        .unwrap()
    }

    #[test]
    fn uniform_cost_avoids_heavy_cells() {
        let grid = weighted_grid();
        let pather = GridPather::new(&grid, Connectivity::Four, true);
        let r = best_first(&pather, &CostOrder, Point::new(0, 0), Point::new(0, 2));
        // Down column 0, through the light cell at (2, 1), back up column 2.
        assert_eq!(r.metrics.total_cost, Some(6));
        assert_eq!(r.metrics.path_length, 6);
        assert!(r.path.unwrap().contains(&Point::new(2, 1)));
    }

    #[test]
    fn unweighted_cost_counts_steps() {
        let grid = weighted_grid();
        let pather = GridPather::new(&grid, Connectivity::Four, false);
        let r = best_first(&pather, &CostOrder, Point::new(0, 0), Point::new(0, 2));
        assert_eq!(r.metrics.total_cost, Some(2));
        assert_eq!(r.metrics.path_length, 2);
    }

    #[test]
    fn astar_matches_uniform_cost() {
        let grid = weighted_grid();
        let pather = GridPather::new(&grid, Connectivity::Four, true);
        let order = AstarOrder {
            heuristic: Heuristic::Manhattan,
            goal: Point::new(4, 4),
        };
        let a = best_first(&pather, &order, Point::new(0, 0), Point::new(4, 4));
        let u = best_first(&pather, &CostOrder, Point::new(0, 0), Point::new(4, 4));
        assert_eq!(a.metrics.total_cost, u.metrics.total_cost);
        assert!(a.metrics.explored_size <= u.metrics.explored_size);
    }

    #[test]
    fn relabeled_cells_settle_once() {
        // Manhattan overestimates diagonal steps, so A* reaches (3, 3) first
        // at cost 5 by the right-hand detour and later relabels it to 4.
        let grid = Grid::parse(
            "
            .....
            .9...
            ...#.
            ....#
            .....
            ",
        )
        .unwrap();
        let pather = GridPather::new(&grid, Connectivity::Eight, true);
        let order = AstarOrder {
            heuristic: Heuristic::Manhattan,
            goal: Point::new(4, 4),
        };
        let r = best_first(&pather, &order, Point::new(0, 0), Point::new(4, 4));
        assert_eq!(
            r.exploration_order,
            vec![
                Point::new(0, 0),
                Point::new(0, 1),
                Point::new(1, 2),
                Point::new(1, 3),
                Point::new(2, 4),
                Point::new(2, 2),
                Point::new(3, 3),
                Point::new(4, 4),
            ]
        );
        assert_eq!(
            r.path,
            Some(vec![
                Point::new(0, 0),
                Point::new(0, 1),
                Point::new(1, 2),
                Point::new(2, 2),
                Point::new(3, 3),
                Point::new(4, 4),
            ])
        );
        assert_eq!(r.metrics.total_cost, Some(5));
        // Eleven open cells plus the stale first label of (3, 3).
        assert_eq!(r.metrics.frontier_size, 12);

        let u = best_first(&pather, &CostOrder, Point::new(0, 0), Point::new(4, 4));
        assert_eq!(u.metrics.total_cost, Some(5));
        for trace in [&r.exploration_order, &u.exploration_order] {
            let mut seen = trace.clone();
            seen.sort();
            seen.dedup();
            assert_eq!(seen.len(), trace.len());
        }
    }

    #[test]
    fn greedy_pushes_each_cell_once() {
        let grid = Grid::new(6).unwrap();
        let pather = GridPather::new(&grid, Connectivity::Eight, false);
        let order = GreedyOrder {
            heuristic: Heuristic::Chebyshev,
            goal: Point::new(5, 5),
            weighted: false,
        };
        let r = best_first(&pather, &order, Point::new(0, 0), Point::new(5, 5));
        assert_eq!(r.metrics.path_length, 5);
        assert_eq!(r.metrics.total_cost, Some(5));
        let mut seen = r.exploration_order.clone();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), r.exploration_order.len());
    }

    #[test]
    fn exhausted_search_reports_no_cost() {
        let grid = Grid::parse(
            "
            .#.
            #..
            ...
            ",
        )
        .unwrap();
        let pather = GridPather::new(&grid, Connectivity::Four, false);
        let r = best_first(&pather, &CostOrder, Point::new(0, 0), Point::new(2, 2));
        assert!(!r.found());
        assert_eq!(r.metrics.total_cost, None);
        assert_eq!(r.metrics.explored_size, 1);
        assert_eq!(r.metrics.frontier_size, 0);
    }
}
