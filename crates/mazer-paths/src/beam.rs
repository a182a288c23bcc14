use log::debug;
use mazer_core::Point;

use crate::error::Result;
use crate::heuristic::Heuristic;
use crate::planner::Planner;
use crate::state::{SearchState, endpoint_indices};
use crate::trace::{SearchResult, Trace};
use crate::traits::Pather;

/// Local beam search keeping at most `width` cells per level.
///
/// Discovered cells are settled at once. The search succeeds as soon as the
/// goal is discovered, whether or not it would survive pruning, and fails
/// when a level discovers nothing new. On success the reported frontier is
/// the number of cells discovered in the final round before the goal; the
/// goal itself is not counted. A failed search reports an empty frontier.
pub(crate) fn local_beam<P: Pather>(
    pather: &P,
    heuristic: Heuristic,
    width: usize,
    start: Point,
    goal: Point,
) -> SearchResult {
    if start == goal {
        return SearchResult::trivial(start, false);
    }
    let Some((start_idx, goal_idx)) = endpoint_indices(pather, start, goal) else {
        return Trace::start().finish(None, 0, None);
    };
    let mut state = SearchState::new(pather.range());

    let mut trace = Trace::start();
    let mut nbuf: Vec<Point> = Vec::with_capacity(8);
    pather.neighbors(start, &mut nbuf);
    if nbuf.contains(&goal) {
        trace.settle(start);
        trace.settle(goal);
        return trace.finish(Some(vec![start, goal]), nbuf.len() - 1, None);
    }

    state.visited[start_idx] = true;
    trace.settle(start);

    let mut level = vec![start_idx];
    let mut candidates: Vec<usize> = Vec::new();

    let (found, frontier) = 'search: loop {
        candidates.clear();
        for &ci in level.iter() {
            let cp = state.point(ci);
            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);
            for &np in nbuf.iter() {
                let Some(ni) = state.idx(np) else {
                    continue;
                };
                if state.visited[ni] {
                    continue;
                }
                state.visited[ni] = true;
                state.parent[ni] = ci;
                trace.settle(np);
                if ni == goal_idx {
                    break 'search (true, candidates.len());
                }
                candidates.push(ni);
            }
        }
        if candidates.is_empty() {
            break 'search (false, 0);
        }

        let mut scored: Vec<(f64, usize)> = candidates
            .iter()
            .map(|&i| (heuristic.estimate(state.point(i), goal), i))
            .collect();
        scored.sort_by(|a, b| a.0.total_cmp(&b.0));
        scored.truncate(width);
        level.clear();
        level.extend(scored.into_iter().map(|(_, i)| i));
    };

    let path = found.then(|| state.path_to(goal_idx));
    debug!(
        "local beam {} -> {} (width {}): found={} settled={}",
        start,
        goal,
        width,
        found,
        trace.settled()
    );
    trace.finish(path, frontier, None)
}

impl Planner<'_> {
    /// Local beam search scored by the configured heuristic, with the
    /// clamped beam width.
    ///
    /// `frontier_size` excludes the goal: it counts only the other cells
    /// discovered in the round that found it.
    pub fn local_beam(&self, start: Point, goal: Point) -> Result<SearchResult> {
        self.check_endpoints(start, goal)?;
        Ok(local_beam(
            &self.pather(),
            self.heuristic()?,
            self.params.beam_width(),
            start,
            goal,
        ))
    }
}
