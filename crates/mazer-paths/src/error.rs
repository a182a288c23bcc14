//! Configuration errors raised before any search state is allocated.

use std::fmt;

use mazer_core::{GridError, Point};
use thiserror::Error;

/// Which end of the query an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::Goal => f.write_str("goal"),
        }
    }
}

/// A solve call that cannot start.
///
/// An exhausted search is not an error: it returns `Ok` with no path.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("invalid heuristic index {0}, expected 0-6")]
    InvalidHeuristic(usize),

    #[error("unknown algorithm \u{201c}{0}\u{201d}")]
    UnknownAlgorithm(String),

    #[error("unsupported direction count {0}, expected 4 or 8")]
    InvalidDirections(u32),

    #[error("{endpoint} {pos} is outside the {size}x{size} grid")]
    OutOfBounds {
        endpoint: Endpoint,
        pos: Point,
        size: i32,
    },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, SolveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let err = SolveError::OutOfBounds {
            endpoint: Endpoint::Goal,
            pos: Point::new(5, 1),
            size: 5,
        };
        assert_eq!(err.to_string(), "goal (5, 1) is outside the 5x5 grid");
        assert_eq!(
            SolveError::InvalidHeuristic(9).to_string(),
            "invalid heuristic index 9, expected 0-6"
        );
    }

    #[test]
    fn grid_errors_convert() {
        let err: SolveError = GridError::Empty.into();
        assert_eq!(err.to_string(), "grid is empty");
    }
}
