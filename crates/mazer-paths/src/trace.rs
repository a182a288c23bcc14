//! Exploration recorder and the result it produces.

use std::time::Instant;

use mazer_core::{Grid, Point};

use crate::neighbors::Connectivity;

/// Summary counters of one search.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Metrics {
    /// Number of settled cells (entries in the exploration order).
    pub explored_size: usize,
    /// Size of the open set when the search stopped.
    pub frontier_size: usize,
    /// Wall-clock duration of the search loop.
    pub time_taken_ms: f64,
    /// Edge count of the path, 0 without one.
    pub path_length: usize,
    /// Sum of entry weights along the path, for cost-aware searches.
    pub total_cost: Option<i64>,
}

/// Outcome of a solve call. A missing path is a normal outcome.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SearchResult {
    /// Start to goal inclusive, or `None` when unreachable.
    pub path: Option<Vec<Point>>,
    /// Cells in the order they were settled.
    pub exploration_order: Vec<Point>,
    pub metrics: Metrics,
}

impl SearchResult {
    /// Result of a query whose start already is the goal.
    pub(crate) fn trivial(start: Point, cost_aware: bool) -> Self {
        Self {
            path: Some(vec![start]),
            exploration_order: vec![start],
            metrics: Metrics {
                explored_size: 1,
                frontier_size: 0,
                time_taken_ms: 0.0,
                path_length: 0,
                total_cost: cost_aware.then_some(0),
            },
        }
    }

    /// Whether a path was found.
    #[inline]
    pub fn found(&self) -> bool {
        self.path.is_some()
    }

    /// Whether the path only crosses free cells in single moves of
    /// `connectivity`. `false` without a path.
    pub fn is_valid_path(&self, grid: &Grid, connectivity: Connectivity) -> bool {
        let Some(path) = &self.path else {
            return false;
        };
        if path.is_empty() || !path.iter().all(|&p| grid.passable(p)) {
            return false;
        }
        let offsets = connectivity.offsets();
        path.windows(2).all(|w| offsets.contains(&(w[1] - w[0])))
    }
}

/// Records settlements during one search.
#[derive(Debug)]
pub(crate) struct Trace {
    order: Vec<Point>,
    started: Instant,
}

impl Trace {
    /// Start the clock.
    pub(crate) fn start() -> Self {
        Self {
            order: Vec::new(),
            started: Instant::now(),
        }
    }

    /// Record `p` as settled.
    #[inline]
    pub(crate) fn settle(&mut self, p: Point) {
        self.order.push(p);
    }

    /// Settled cells so far.
    #[inline]
    pub(crate) fn settled(&self) -> usize {
        self.order.len()
    }

    /// Stop the clock and assemble the result. `total_cost` is dropped when
    /// there is no path.
    pub(crate) fn finish(
        self,
        path: Option<Vec<Point>>,
        frontier_size: usize,
        total_cost: Option<i64>,
    ) -> SearchResult {
        let time_taken_ms = self.started.elapsed().as_secs_f64() * 1000.0;
        let path_length = path.as_ref().map_or(0, |p| p.len().saturating_sub(1));
        let total_cost = if path.is_some() { total_cost } else { None };
        SearchResult {
            path,
            metrics: Metrics {
                explored_size: self.order.len(),
                frontier_size,
                time_taken_ms,
                path_length,
                total_cost,
            },
            exploration_order: self.order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finish_counts_settlements_and_edges() {
        let mut trace = Trace::start();
        trace.settle(Point::new(0, 0));
        trace.settle(Point::new(0, 1));
        assert_eq!(trace.settled(), 2);
        let r = trace.finish(
            Some(vec![Point::new(0, 0), Point::new(0, 1)]),
            3,
            Some(1),
        );
        assert!(r.found());
        assert_eq!(r.metrics.explored_size, 2);
        assert_eq!(r.metrics.frontier_size, 3);
        assert_eq!(r.metrics.path_length, 1);
        assert_eq!(r.metrics.total_cost, Some(1));
        assert!(r.metrics.time_taken_ms >= 0.0);
    }

    #[test]
    fn no_path_drops_cost() {
        let r = Trace::start().finish(None, 0, Some(5));
        assert!(!r.found());
        assert_eq!(r.metrics.total_cost, None);
        assert_eq!(r.metrics.path_length, 0);
    }

    #[test]
    fn trivial_result() {
        let p = Point::new(2, 2);
        let r = SearchResult::trivial(p, true);
        assert_eq!(r.path, Some(vec![p]));
        assert_eq!(r.exploration_order, vec![p]);
        assert_eq!(r.metrics.explored_size, 1);
        assert_eq!(r.metrics.total_cost, Some(0));
        assert_eq!(SearchResult::trivial(p, false).metrics.total_cost, None);
    }

    #[test]
    fn path_validity() {
        let grid = Grid::parse(".#\n..").unwrap();
        let mut r = SearchResult {
            path: Some(vec![Point::new(0, 0), Point::new(1, 0), Point::new(1, 1)]),
            ..SearchResult::default()
        };
        assert!(r.is_valid_path(&grid, Connectivity::Four));

        r.path = Some(vec![Point::new(0, 0), Point::new(1, 1)]);
        assert!(!r.is_valid_path(&grid, Connectivity::Four));
        assert!(r.is_valid_path(&grid, Connectivity::Eight));

        r.path = Some(vec![Point::new(0, 0), Point::new(0, 1)]);
        assert!(!r.is_valid_path(&grid, Connectivity::Four));

        r.path = None;
        assert!(!r.is_valid_path(&grid, Connectivity::Eight));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn result_serializes_with_metrics() {
        let r = SearchResult::trivial(Point::new(1, 2), false);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["path"], serde_json::json!([{"x": 1, "y": 2}]));
        assert_eq!(json["metrics"]["explored_size"], 1);
        assert!(json["metrics"]["total_cost"].is_null());
    }
}
