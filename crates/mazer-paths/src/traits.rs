use mazer_core::{Point, Range};

/// Minimal search interface — provides the searched rectangle, occupancy and
/// neighbor enumeration.
pub trait Pather {
    /// The rectangle every searched point lies in.
    fn range(&self) -> Range;

    /// Whether `p` can be occupied.
    fn passable(&self, p: Point) -> bool;

    /// Append the passable neighbors of `p` into `buf`, in direction-set
    /// order. The caller clears `buf` before calling.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);
}

/// Pather with weighted (positive-cost) steps.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` into adjacent `to`. Must be > 0.
    fn cost(&self, from: Point, to: Point) -> i64;
}
