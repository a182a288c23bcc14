//! Per-call labels shared by the search strategies.

use std::cmp::Ordering;

use mazer_core::{Point, Range};

use crate::traits::Pather;

/// Parent sentinel: the cell has no predecessor.
pub(crate) const NO_PARENT: usize = usize::MAX;

/// Visited bitmap and parent links over one grid rectangle.
///
/// Created fresh for every search and dropped with it.
#[derive(Debug, Clone)]
pub(crate) struct SearchState {
    pub(crate) rng: Range,
    pub(crate) visited: Vec<bool>,
    pub(crate) parent: Vec<usize>,
}

impl SearchState {
    pub(crate) fn new(rng: Range) -> Self {
        let len = rng.len();
        Self {
            rng,
            visited: vec![false; len],
            parent: vec![NO_PARENT; len],
        }
    }

    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        self.rng.index(p)
    }

    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        self.rng.point(idx)
    }

    /// Walk parent links back from `idx` and return the chain root first.
    pub(crate) fn path_to(&self, idx: usize) -> Vec<Point> {
        let mut path = Vec::new();
        let mut ci = idx;
        while ci != NO_PARENT {
            path.push(self.point(ci));
            ci = self.parent[ci];
        }
        path.reverse();
        path
    }
}

/// Cell indices of both endpoints, or `None` when either one is off the
/// pather's range or not passable. Nothing is searched from or toward a
/// blocked cell.
pub(crate) fn endpoint_indices<P: Pather>(
    pather: &P,
    start: Point,
    goal: Point,
) -> Option<(usize, usize)> {
    if !pather.passable(start) || !pather.passable(goal) {
        return None;
    }
    let rng = pather.range();
    Some((rng.index(start)?, rng.index(goal)?))
}

/// Heap entry ordered so that `BinaryHeap` pops the smallest key first and,
/// among equal keys, the earliest push.
#[derive(Debug, Clone, Copy)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) key: f64,
    pub(crate) seq: u64,
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NodeRef {}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .key
            .total_cmp(&self.key)
            .then(other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BinaryHeap;

    use super::*;

    #[test]
    fn heap_pops_min_key_then_fifo() {
        let mut heap = BinaryHeap::new();
        heap.push(NodeRef { idx: 0, key: 3.0, seq: 0 });
        heap.push(NodeRef { idx: 1, key: 1.0, seq: 1 });
        heap.push(NodeRef { idx: 2, key: 1.0, seq: 2 });
        heap.push(NodeRef { idx: 3, key: 2.0, seq: 3 });
        let order: Vec<usize> = std::iter::from_fn(|| heap.pop().map(|n| n.idx)).collect();
        assert_eq!(order, vec![1, 2, 3, 0]);
    }

    #[test]
    fn path_to_walks_parents() {
        let mut s = SearchState::new(Range::square(3));
        let a = s.idx(Point::new(0, 0)).unwrap();
        let b = s.idx(Point::new(0, 1)).unwrap();
        let c = s.idx(Point::new(1, 1)).unwrap();
        s.parent[b] = a;
        s.parent[c] = b;
        assert_eq!(
            s.path_to(c),
            vec![Point::new(0, 0), Point::new(0, 1), Point::new(1, 1)]
        );
        assert_eq!(s.path_to(a), vec![Point::new(0, 0)]);
    }
}
