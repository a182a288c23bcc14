//! The [`Grid`] type: a square occupancy grid with optional entry weights.
//!
//! A `Grid` is an immutable snapshot, fixed once a constructor returns.
//! Searches borrow it, so one grid can back any number of concurrent solve
//! calls.

use crate::error::GridError;
use crate::geom::{Point, Range};

/// Weight charged on entering a cell of an unweighted grid.
pub const DEFAULT_WEIGHT: i32 = 1;

/// A `size × size` grid of blocked/free cells plus optional per-cell weights.
///
/// Only serializable: building one always goes through the validating
/// constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Grid {
    size: i32,
    blocked: Vec<bool>,
    weights: Option<Vec<i32>>,
}

impl Grid {
    /// Create an open grid with every cell free and unweighted.
    pub fn new(size: i32) -> Result<Self, GridError> {
        if size <= 0 {
            return Err(GridError::Empty);
        }
        let len = (size as usize) * (size as usize);
        Ok(Self {
            size,
            blocked: vec![false; len],
            weights: None,
        })
    }

    /// Build a grid from a row-major occupancy matrix (`true` = blocked).
    ///
    /// The matrix must be square and non-empty.
    pub fn from_blocks(blocks: &[Vec<bool>]) -> Result<Self, GridError> {
        let size = blocks.len();
        if size == 0 {
            return Err(GridError::Empty);
        }
        let mut blocked = Vec::with_capacity(size * size);
        for (row, cells) in blocks.iter().enumerate() {
            if cells.len() != size {
                return Err(GridError::NotSquare {
                    row,
                    len: cells.len(),
                    size,
                });
            }
            blocked.extend_from_slice(cells);
        }
        Ok(Self {
            size: size as i32,
            blocked,
            weights: None,
        })
    }

    /// Parse an ASCII map: `#` is blocked, `.` is free, and a digit `1`-`9`
    /// is a free cell with that entry weight. Blank lines are ignored.
    ///
    /// The map is weighted only if at least one digit appears.
    pub fn parse(map: &str) -> Result<Self, GridError> {
        let rows: Vec<&str> = map
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let size = rows.len();
        if size == 0 {
            return Err(GridError::Empty);
        }
        let mut blocked = Vec::with_capacity(size * size);
        let mut weights = Vec::with_capacity(size * size);
        let mut weighted = false;
        for (x, line) in rows.iter().enumerate() {
            let len = line.chars().count();
            if len != size {
                return Err(GridError::NotSquare { row: x, len, size });
            }
            for (y, ch) in line.chars().enumerate() {
                match ch {
                    '#' => {
                        blocked.push(true);
                        weights.push(DEFAULT_WEIGHT);
                    }
                    '.' => {
                        blocked.push(false);
                        weights.push(DEFAULT_WEIGHT);
                    }
                    '1'..='9' => {
                        weighted = true;
                        blocked.push(false);
                        weights.push(ch as i32 - '0' as i32);
                    }
                    _ => {
                        return Err(GridError::InvalidChar {
                            ch,
                            pos: Point::new(x as i32, y as i32),
                        });
                    }
                }
            }
        }
        Ok(Self {
            size: size as i32,
            blocked,
            weights: weighted.then_some(weights),
        })
    }

    /// Attach a row-major weight matrix of the grid's dimensions.
    ///
    /// Every weight must be at least 1.
    pub fn with_weights(mut self, weights: &[Vec<i32>]) -> Result<Self, GridError> {
        let size = self.size as usize;
        if weights.len() != size || weights.iter().any(|r| r.len() != size) {
            return Err(GridError::WeightShape {
                rows: weights.len(),
                size,
            });
        }
        let mut flat = Vec::with_capacity(size * size);
        for (x, row) in weights.iter().enumerate() {
            for (y, &w) in row.iter().enumerate() {
                if w < 1 {
                    return Err(GridError::NonPositiveWeight {
                        pos: Point::new(x as i32, y as i32),
                        weight: w,
                    });
                }
                flat.push(w);
            }
        }
        self.weights = Some(flat);
        Ok(self)
    }

    /// Side length of the grid.
    #[inline]
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.blocked.len()
    }

    /// Always `false`: a grid has at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocked.is_empty()
    }

    /// The grid rectangle `[0, size) × [0, size)`.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::square(self.size)
    }

    /// Whether `p` lies on the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    /// Row-major index of `p`, or `None` off the grid.
    #[inline]
    pub fn index(&self, p: Point) -> Option<usize> {
        self.bounds().index(p)
    }

    /// Whether `p` is blocked. Points off the grid count as blocked.
    #[inline]
    pub fn is_blocked(&self, p: Point) -> bool {
        self.index(p).is_none_or(|i| self.blocked[i])
    }

    /// Whether `p` is on the grid and free.
    #[inline]
    pub fn passable(&self, p: Point) -> bool {
        !self.is_blocked(p)
    }

    /// Cost of entering `p`: the stored weight, or 1 when unweighted.
    #[inline]
    pub fn weight(&self, p: Point) -> i32 {
        match (&self.weights, self.index(p)) {
            (Some(w), Some(i)) => w[i],
            _ => DEFAULT_WEIGHT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_open_and_unweighted() {
        let g = Grid::new(3).unwrap();
        assert_eq!(g.size(), 3);
        assert_eq!(g.len(), 9);
        assert!(g.bounds().iter().all(|p| g.passable(p)));
        assert_eq!(g.weight(Point::new(1, 1)), 1);
    }

    #[test]
    fn zero_size_is_rejected() {
        assert_eq!(Grid::new(0), Err(GridError::Empty));
        assert_eq!(Grid::from_blocks(&[]), Err(GridError::Empty));
    }

    #[test]
    fn from_blocks_is_row_major() {
        let g = Grid::from_blocks(&[
            vec![false, true, false],
            vec![false, false, false],
            vec![true, false, false],
        ])
        .unwrap();
        assert!(g.is_blocked(Point::new(0, 1)));
        assert!(g.is_blocked(Point::new(2, 0)));
        assert!(g.passable(Point::new(1, 0)));
        assert_eq!(g.bounds().iter().filter(|&p| g.is_blocked(p)).count(), 2);
    }

    #[test]
    fn ragged_blocks_are_rejected() {
        let err = Grid::from_blocks(&[vec![false, false], vec![false]]).unwrap_err();
        assert_eq!(
            err,
            GridError::NotSquare {
                row: 1,
                len: 1,
                size: 2
            }
        );
    }

    #[test]
    fn off_grid_points_are_blocked() {
        let g = Grid::new(2).unwrap();
        assert!(g.is_blocked(Point::new(-1, 0)));
        assert!(g.is_blocked(Point::new(0, 2)));
        assert!(!g.passable(Point::new(2, 2)));
    }

    #[test]
    fn parse_ascii_map() {
        let g = Grid::parse(
            "
            .#.
            .3.
            ...
            ",
        )
        .unwrap();
        assert_eq!(g.size(), 3);
        assert!(g.is_blocked(Point::new(0, 1)));
        assert_eq!(g.weight(Point::new(1, 1)), 3);
        assert_eq!(g.weight(Point::new(2, 2)), 1);
    }

    #[test]
    fn parse_without_digits_is_unweighted() {
        let g = Grid::parse("..\n#.").unwrap();
        assert!(g.is_blocked(Point::new(1, 0)));
        assert!(g.bounds().iter().all(|p| g.weight(p) == DEFAULT_WEIGHT));
    }

    #[test]
    fn parse_rejects_unknown_characters() {
        let err = Grid::parse("..\n.x").unwrap_err();
        assert_eq!(
            err,
            GridError::InvalidChar {
                ch: 'x',
                pos: Point::new(1, 1)
            }
        );
    }

    #[test]
    fn with_weights_validates_shape_and_sign() {
        let g = Grid::new(2).unwrap();
        assert!(matches!(
            g.clone().with_weights(&[vec![1, 1]]),
            Err(GridError::WeightShape { rows: 1, size: 2 })
        ));
        assert_eq!(
            g.clone().with_weights(&[vec![1, 1], vec![0, 1]]),
            Err(GridError::NonPositiveWeight {
                pos: Point::new(1, 0),
                weight: 0
            })
        );
        let w = g.with_weights(&[vec![1, 2], vec![3, 4]]).unwrap();
        assert_eq!(w.weight(Point::new(1, 0)), 3);
        assert_eq!(w.weight(Point::new(5, 5)), 1);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_serializes_flat_layers() {
        let g = Grid::parse(".#\n2.").unwrap();
        let json = serde_json::to_value(&g).unwrap();
        assert_eq!(json["size"], 2);
        assert_eq!(json["blocked"], serde_json::json!([false, true, false, false]));
        assert_eq!(json["weights"], serde_json::json!([1, 1, 2, 1]));
    }

    #[test]
    fn point_round_trip() {
        let p = Point::new(3, 7);
        let json = serde_json::to_string(&p).unwrap();
        let back: Point = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}
