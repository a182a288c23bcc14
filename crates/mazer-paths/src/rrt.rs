//! Rapidly-exploring random tree over the grid.

use log::debug;
use mazer_core::Point;
use rand::rngs::SmallRng;
use rand::{Rng, RngExt, SeedableRng};

use crate::error::Result;
use crate::neighbors::Connectivity;
use crate::params::RrtSettings;
use crate::planner::Planner;
use crate::state::endpoint_indices;
use crate::trace::{SearchResult, Trace};
use crate::traits::Pather;

#[derive(Debug, Clone, Copy)]
struct TreeNode {
    pos: Point,
    parent: Option<usize>,
}

/// Append-only tree of grid cells, each cell present at most once.
struct Tree {
    nodes: Vec<TreeNode>,
    present: Vec<bool>,
}

impl Tree {
    fn nearest(&self, target: Point) -> usize {
        let mut best = 0;
        let mut best_dist = f64::INFINITY;
        for (i, node) in self.nodes.iter().enumerate() {
            let d = node.pos.distance(target);
            if d < best_dist {
                best_dist = d;
                best = i;
            }
        }
        best
    }

    fn push(&mut self, idx: usize, pos: Point, parent: Option<usize>) -> usize {
        self.present[idx] = true;
        self.nodes.push(TreeNode { pos, parent });
        self.nodes.len() - 1
    }

    /// Positions from the root to `leaf`.
    fn branch(&self, leaf: usize) -> Vec<Point> {
        let mut path = Vec::new();
        let mut cur = Some(leaf);
        while let Some(i) = cur {
            path.push(self.nodes[i].pos);
            cur = self.nodes[i].parent;
        }
        path.reverse();
        path
    }
}

/// Move from `from` toward `target` by at most `step`, along the direction
/// offset closest in angle to the target (the first one on ties). Targets
/// within `step` are reached directly.
fn steer(from: Point, target: Point, step: f64, offsets: &[Point]) -> Point {
    let dist = from.distance(target);
    if dist <= step {
        return target;
    }
    let (nx, ny) = (
        f64::from(target.x - from.x) / dist,
        f64::from(target.y - from.y) / dist,
    );
    let mut best = None;
    let mut best_dot = f64::NEG_INFINITY;
    for &d in offsets {
        let len = f64::from(d.x).hypot(f64::from(d.y));
        let (dx, dy) = (f64::from(d.x) / len, f64::from(d.y) / len);
        let dot = nx * dx + ny * dy;
        if dot > best_dot {
            best_dot = dot;
            best = Some((dx, dy));
        }
    }
    match best {
        Some((dx, dy)) => Point::new(
            (f64::from(from.x) + step * dx).round() as i32,
            (f64::from(from.y) + step * dy).round() as i32,
        ),
        None => from,
    }
}

/// Whether the straight segment `a`-`b` crosses only passable cells.
///
/// The segment is sampled at every unit of its longest axis. A diagonal
/// sub-step also needs both cells beside the corner it cuts.
fn segment_free<P: Pather>(pather: &P, a: Point, b: Point) -> bool {
    if !pather.passable(a) || !pather.passable(b) {
        return false;
    }
    let d = b - a;
    let steps = d.x.abs().max(d.y.abs());
    let mut prev = a;
    for i in 1..=steps {
        let t = f64::from(i) / f64::from(steps);
        let c = Point::new(
            (f64::from(a.x) + t * f64::from(d.x)).round() as i32,
            (f64::from(a.y) + t * f64::from(d.y)).round() as i32,
        );
        if !pather.passable(c) {
            return false;
        }
        let diagonal = c.x != prev.x && c.y != prev.y;
        if diagonal
            && !(pather.passable(Point::new(c.x, prev.y))
                && pather.passable(Point::new(prev.x, c.y)))
        {
            return false;
        }
        prev = c;
    }
    true
}

/// Grow a tree from `start` until a node lands within one step of `goal`
/// with a free hop to it, or the iteration budget runs out.
///
/// Each added node is settled in the trace, the root first. Samples that
/// steer onto the nearest node or onto a cell already in the tree are
/// dropped.
pub(crate) fn rapidly_exploring<P: Pather, R: Rng>(
    pather: &P,
    connectivity: Connectivity,
    settings: &RrtSettings,
    start: Point,
    goal: Point,
    rng: &mut R,
) -> SearchResult {
    if start == goal {
        return SearchResult::trivial(start, false);
    }
    let Some((start_idx, goal_idx)) = endpoint_indices(pather, start, goal) else {
        return Trace::start().finish(None, 0, None);
    };
    let range = pather.range();

    let mut trace = Trace::start();
    let mut tree = Tree {
        nodes: Vec::new(),
        present: vec![false; range.len()],
    };
    tree.push(start_idx, start, None);
    trace.settle(start);

    let step = settings.step_size;
    let offsets = connectivity.offsets();
    let mut path = None;

    for _ in 0..settings.max_iterations {
        let sample = if rng.random::<f64>() < settings.goal_sample_rate {
            goal
        } else {
            Point::new(
                rng.random_range(range.min.x..range.max.x),
                rng.random_range(range.min.y..range.max.y),
            )
        };

        let near = tree.nearest(sample);
        let from = tree.nodes[near].pos;
        let new = steer(from, sample, step, offsets);
        if new == from {
            continue;
        }
        let Some(new_idx) = range.index(new) else {
            continue;
        };
        if tree.present[new_idx] || !segment_free(pather, from, new) {
            continue;
        }
        let leaf = tree.push(new_idx, new, Some(near));
        trace.settle(new);

        if new.distance(goal) > step {
            continue;
        }
        if new == goal {
            path = Some(tree.branch(leaf));
            break;
        }
        if !tree.present[goal_idx] && segment_free(pather, new, goal) {
            tree.push(goal_idx, goal, Some(leaf));
            trace.settle(goal);
            let mut branch = tree.branch(leaf);
            branch.push(goal);
            path = Some(branch);
            break;
        }
    }

    debug!(
        "rrt {} -> {}: found={} nodes={}",
        start,
        goal,
        path.is_some(),
        tree.nodes.len()
    );
    trace.finish(path, 0, None)
}

impl Planner<'_> {
    /// Rapidly-exploring random tree search.
    ///
    /// Seeded from [`RrtSettings::seed`] when set, otherwise from the
    /// thread-local generator.
    pub fn rrt(&self, start: Point, goal: Point) -> Result<SearchResult> {
        let mut rng = match self.params.rrt.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_rng(&mut rand::rng()),
        };
        self.rrt_with_rng(start, goal, &mut rng)
    }

    /// [`rrt`](Self::rrt) with a caller-supplied random source.
    pub fn rrt_with_rng(
        &self,
        start: Point,
        goal: Point,
        rng: &mut impl Rng,
    ) -> Result<SearchResult> {
        self.check_endpoints(start, goal)?;
        Ok(rapidly_exploring(
            &self.pather(),
            self.connectivity,
            &self.params.rrt,
            start,
            goal,
            rng,
        ))
    }
}
