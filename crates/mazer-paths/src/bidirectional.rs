use log::debug;
use mazer_core::Point;

use crate::bfs::Sweep;
use crate::error::Result;
use crate::planner::Planner;
use crate::state::{NO_PARENT, endpoint_indices};
use crate::trace::{SearchResult, Trace};
use crate::traits::Pather;

/// Advance `this` by one settlement. Returns the settled cell if `other`
/// has already seen it.
fn step<P: Pather>(
    this: &mut Sweep,
    other: &Sweep,
    pather: &P,
    trace: &mut Trace,
) -> Option<usize> {
    let ci = this.pop(trace)?;
    if other.state.visited[ci] {
        return Some(ci);
    }
    this.expand(pather, ci);
    None
}

/// Breadth-first waves from both ends, advanced alternately one cell at a
/// time, forward first. Both waves share one trace.
pub(crate) fn bidirectional<P: Pather>(pather: &P, start: Point, goal: Point) -> SearchResult {
    if start == goal {
        return SearchResult::trivial(start, false);
    }
    let Some((start_idx, goal_idx)) = endpoint_indices(pather, start, goal) else {
        return Trace::start().finish(None, 0, None);
    };

    let mut trace = Trace::start();
    let mut fwd = Sweep::new(pather, start_idx);
    let mut bwd = Sweep::new(pather, goal_idx);

    let meeting = 'search: loop {
        if fwd.is_empty() || bwd.is_empty() {
            break 'search None;
        }
        if let Some(m) = step(&mut fwd, &bwd, pather, &mut trace) {
            break 'search Some(m);
        }
        if bwd.is_empty() {
            break 'search None;
        }
        if let Some(m) = step(&mut bwd, &fwd, pather, &mut trace) {
            break 'search Some(m);
        }
    };

    let path = meeting.map(|m| {
        let mut path = fwd.state.path_to(m);
        let mut ci = bwd.state.parent[m];
        while ci != NO_PARENT {
            path.push(bwd.state.point(ci));
            ci = bwd.state.parent[ci];
        }
        path
    });
    let frontier = fwd.frontier() + bwd.frontier();
    debug!(
        "bidirectional {} -> {}: meeting={:?} settled={} frontier={}",
        start,
        goal,
        meeting.map(|m| fwd.state.point(m)),
        trace.settled(),
        frontier
    );
    trace.finish(path, frontier, None)
}

impl Planner<'_> {
    /// Bidirectional breadth-first search.
    pub fn bidirectional(&self, start: Point, goal: Point) -> Result<SearchResult> {
        self.check_endpoints(start, goal)?;
        Ok(bidirectional(&self.pather(), start, goal))
    }
}
