use mazer_core::{Grid, Point, Range};

use crate::error::SolveError;
use crate::traits::{Pather, WeightedPather};

const DIRS_4: [Point; 4] = [
    Point::new(0, 1),
    Point::new(1, 0),
    Point::new(0, -1),
    Point::new(-1, 0),
];

const DIRS_8: [Point; 8] = [
    Point::new(0, 1),
    Point::new(1, 1),
    Point::new(1, 0),
    Point::new(1, -1),
    Point::new(0, -1),
    Point::new(-1, -1),
    Point::new(-1, 0),
    Point::new(-1, 1),
];

/// Movement scheme: which offsets count as one step.
///
/// The offset order is fixed and drives enumeration order, and with it every
/// first-seen tie-break in the search strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Connectivity {
    /// Orthogonal moves only.
    #[default]
    Four,
    /// Orthogonal and diagonal moves.
    Eight,
}

impl Connectivity {
    /// The ordered `(dx, dy)` offsets of this scheme.
    #[inline]
    pub fn offsets(self) -> &'static [Point] {
        match self {
            Self::Four => &DIRS_4,
            Self::Eight => &DIRS_8,
        }
    }

    /// Number of directions (4 or 8).
    #[inline]
    pub fn count(self) -> u32 {
        self.offsets().len() as u32
    }
}

impl TryFrom<u32> for Connectivity {
    type Error = SolveError;

    fn try_from(n: u32) -> Result<Self, SolveError> {
        match n {
            4 => Ok(Self::Four),
            8 => Ok(Self::Eight),
            _ => Err(SolveError::InvalidDirections(n)),
        }
    }
}

/// [`WeightedPather`] over a [`Grid`].
///
/// Neighbors are the in-bounds, unblocked cells reached by each offset of the
/// connectivity. When `weighted` is set a step costs the entered cell's
/// weight, otherwise every step costs 1.
#[derive(Debug, Clone, Copy)]
pub struct GridPather<'a> {
    grid: &'a Grid,
    connectivity: Connectivity,
    weighted: bool,
}

impl<'a> GridPather<'a> {
    /// Create a pather over `grid`.
    pub fn new(grid: &'a Grid, connectivity: Connectivity, weighted: bool) -> Self {
        Self {
            grid,
            connectivity,
            weighted,
        }
    }

    /// The underlying grid.
    #[inline]
    pub fn grid(&self) -> &'a Grid {
        self.grid
    }

    /// The movement scheme.
    #[inline]
    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }
}

impl Pather for GridPather<'_> {
    #[inline]
    fn range(&self) -> Range {
        self.grid.bounds()
    }

    #[inline]
    fn passable(&self, p: Point) -> bool {
        self.grid.passable(p)
    }

    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        for &d in self.connectivity.offsets() {
            let n = p + d;
            if self.grid.passable(n) {
                buf.push(n);
            }
        }
    }
}

impl WeightedPather for GridPather<'_> {
    #[inline]
    fn cost(&self, _from: Point, to: Point) -> i64 {
        if self.weighted {
            i64::from(self.grid.weight(to))
        } else {
            1
        }
    }
}
