use std::collections::VecDeque;

use log::debug;
use mazer_core::Point;

use crate::error::Result;
use crate::planner::Planner;
use crate::state::{SearchState, endpoint_indices};
use crate::trace::{SearchResult, Trace};
use crate::traits::Pather;

/// One breadth-first wave: FIFO queue over a fresh [`SearchState`].
///
/// Cells are marked visited when enqueued, so each is queued at most once,
/// and settled when dequeued.
pub(crate) struct Sweep {
    pub(crate) state: SearchState,
    queue: VecDeque<usize>,
    nbuf: Vec<Point>,
}

impl Sweep {
    pub(crate) fn new<P: Pather>(pather: &P, source: usize) -> Self {
        let mut state = SearchState::new(pather.range());
        state.visited[source] = true;
        let mut queue = VecDeque::new();
        queue.push_back(source);
        Self {
            state,
            queue,
            nbuf: Vec::with_capacity(8),
        }
    }

    /// Dequeue the next cell and record it as settled.
    pub(crate) fn pop(&mut self, trace: &mut Trace) -> Option<usize> {
        let ci = self.queue.pop_front()?;
        trace.settle(self.state.point(ci));
        Some(ci)
    }

    /// Enqueue the unvisited neighbors of `ci`, linking them to it.
    pub(crate) fn expand<P: Pather>(&mut self, pather: &P, ci: usize) {
        let cp = self.state.point(ci);
        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        pather.neighbors(cp, &mut nbuf);
        for &np in nbuf.iter() {
            let Some(ni) = self.state.idx(np) else {
                continue;
            };
            if self.state.visited[ni] {
                continue;
            }
            self.state.visited[ni] = true;
            self.state.parent[ni] = ci;
            self.queue.push_back(ni);
        }
        self.nbuf = nbuf;
    }

    #[inline]
    pub(crate) fn frontier(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Breadth-first search from `start` to `goal`: fewest edges, unit steps.
pub(crate) fn breadth_first<P: Pather>(pather: &P, start: Point, goal: Point) -> SearchResult {
    if start == goal {
        return SearchResult::trivial(start, false);
    }
    let Some((start_idx, goal_idx)) = endpoint_indices(pather, start, goal) else {
        return Trace::start().finish(None, 0, None);
    };

    let mut trace = Trace::start();
    let mut sweep = Sweep::new(pather, start_idx);

    let found = loop {
        let Some(ci) = sweep.pop(&mut trace) else {
            break false;
        };
        if ci == goal_idx {
            break true;
        }
        sweep.expand(pather, ci);
    };

    let path = found.then(|| sweep.state.path_to(goal_idx));
    debug!(
        "bfs {} -> {}: found={} settled={} frontier={}",
        start,
        goal,
        found,
        trace.settled(),
        sweep.frontier()
    );
    trace.finish(path, sweep.frontier(), None)
}

impl Planner<'_> {
    /// Breadth-first search. The path has the fewest possible edges.
    pub fn bfs(&self, start: Point, goal: Point) -> Result<SearchResult> {
        self.check_endpoints(start, goal)?;
        Ok(breadth_first(&self.pather(), start, goal))
    }
}
