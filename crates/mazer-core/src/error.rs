//! Errors raised while building a [`Grid`](crate::Grid).

use thiserror::Error;

use crate::geom::Point;

/// Malformed grid input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The grid has no cells.
    #[error("grid is empty")]
    Empty,

    /// A row's length does not match the number of rows.
    #[error("grid is not square: row {row} has {len} cells, expected {size}")]
    NotSquare { row: usize, len: usize, size: usize },

    /// The weight matrix does not have the grid's dimensions.
    #[error("weight matrix has {rows} rows or a ragged row, expected {size}x{size}")]
    WeightShape { rows: usize, size: usize },

    /// Weights are entry costs and must be at least 1.
    #[error("weight {weight} at {pos} is not positive")]
    NonPositiveWeight { pos: Point, weight: i32 },

    /// An ASCII map contained a character outside `.#1-9`.
    #[error("invalid map character \u{201c}{ch}\u{201d} at {pos}")]
    InvalidChar { ch: char, pos: Point },
}
