use mazer_core::Point;

use crate::distance;
use crate::error::SolveError;

/// Default Minkowski exponent.
pub const DEFAULT_MINKOWSKI_P: f64 = 10.0;

/// Distance estimator selectable by a fixed index.
///
/// | index | heuristic |
/// |---|---|
/// | 0 | Manhattan |
/// | 1 | Diagonal |
/// | 2 | Euclidean |
/// | 3 | Chebyshev |
/// | 4 | Octile |
/// | 5 | Squared Euclidean |
/// | 6 | Minkowski |
///
/// Manhattan is admissible for 4-connectivity; Chebyshev for unit-cost
/// 8-connectivity. Admissibility is the caller's concern.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Heuristic {
    #[default]
    Manhattan,
    Diagonal,
    Euclidean,
    Chebyshev,
    Octile,
    SquaredEuclidean,
    /// Minkowski distance with the given exponent.
    Minkowski(f64),
}

impl Heuristic {
    /// Number of selectable heuristics.
    pub const COUNT: usize = 7;

    /// Select by index. `minkowski_p` only matters for index 6.
    pub fn from_index(index: usize, minkowski_p: f64) -> Result<Self, SolveError> {
        Ok(match index {
            0 => Self::Manhattan,
            1 => Self::Diagonal,
            2 => Self::Euclidean,
            3 => Self::Chebyshev,
            4 => Self::Octile,
            5 => Self::SquaredEuclidean,
            6 => Self::Minkowski(minkowski_p),
            _ => return Err(SolveError::InvalidHeuristic(index)),
        })
    }

    /// Position in the index table.
    pub fn index(self) -> usize {
        match self {
            Self::Manhattan => 0,
            Self::Diagonal => 1,
            Self::Euclidean => 2,
            Self::Chebyshev => 3,
            Self::Octile => 4,
            Self::SquaredEuclidean => 5,
            Self::Minkowski(_) => 6,
        }
    }

    /// Short lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Manhattan => "manhattan",
            Self::Diagonal => "diagonal",
            Self::Euclidean => "euclidean",
            Self::Chebyshev => "chebyshev",
            Self::Octile => "octile",
            Self::SquaredEuclidean => "squared_euclidean",
            Self::Minkowski(_) => "minkowski",
        }
    }

    /// Estimated distance from `a` to `b`. Always `>= 0`.
    #[inline]
    pub fn estimate(self, a: Point, b: Point) -> f64 {
        match self {
            Self::Manhattan => distance::manhattan(a, b),
            Self::Diagonal => distance::diagonal(a, b),
            Self::Euclidean => distance::euclidean(a, b),
            Self::Chebyshev => distance::chebyshev(a, b),
            Self::Octile => distance::octile(a, b),
            Self::SquaredEuclidean => distance::squared_euclidean(a, b),
            Self::Minkowski(p) => distance::minkowski(a, b, p),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_table_round_trips() {
        for i in 0..Heuristic::COUNT {
            let h = Heuristic::from_index(i, DEFAULT_MINKOWSKI_P).unwrap();
            assert_eq!(h.index(), i);
        }
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        assert_eq!(
            Heuristic::from_index(Heuristic::COUNT, DEFAULT_MINKOWSKI_P),
            Err(SolveError::InvalidHeuristic(7))
        );
    }

    #[test]
    fn estimate_dispatches() {
        let a = Point::new(0, 0);
        let b = Point::new(3, 4);
        assert_eq!(Heuristic::Manhattan.estimate(a, b), 7.0);
        assert_eq!(Heuristic::Chebyshev.estimate(a, b), 4.0);
        assert_eq!(Heuristic::Euclidean.estimate(a, b), 5.0);
        assert_eq!(Heuristic::Minkowski(1.0).estimate(a, b), 7.0);
        assert_eq!(Heuristic::default(), Heuristic::Manhattan);
    }
}
