//! Pure distance estimators between two cells.

use std::f64::consts::SQRT_2;

use mazer_core::Point;

#[inline]
fn deltas(a: Point, b: Point) -> (f64, f64) {
    (
        f64::from((a.x - b.x).abs()),
        f64::from((a.y - b.y).abs()),
    )
}

/// Manhattan (L1) distance.
#[inline]
pub fn manhattan(a: Point, b: Point) -> f64 {
    let (dx, dy) = deltas(a, b);
    dx + dy
}

/// Diagonal distance: orthogonal steps cost 1, diagonal steps √2.
#[inline]
pub fn diagonal(a: Point, b: Point) -> f64 {
    let (dx, dy) = deltas(a, b);
    dx + dy + (SQRT_2 - 2.0) * dx.min(dy)
}

/// Euclidean (L2) distance.
#[inline]
pub fn euclidean(a: Point, b: Point) -> f64 {
    let (dx, dy) = deltas(a, b);
    dx.hypot(dy)
}

/// Chebyshev (L∞) distance.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> f64 {
    let (dx, dy) = deltas(a, b);
    dx.max(dy)
}

/// Octile distance with unit orthogonal cost `D = 1` and diagonal cost
/// `D2 = √2`.
#[inline]
pub fn octile(a: Point, b: Point) -> f64 {
    const D: f64 = 1.0;
    const D2: f64 = SQRT_2;
    let (dx, dy) = deltas(a, b);
    D * (dx + dy) + (D2 - 2.0 * D) * dx.min(dy)
}

/// Squared Euclidean distance. Not admissible; favours speed over optimality.
#[inline]
pub fn squared_euclidean(a: Point, b: Point) -> f64 {
    let (dx, dy) = deltas(a, b);
    dx * dx + dy * dy
}

/// Minkowski (Lp) distance. Large `p` approaches Chebyshev.
#[inline]
pub fn minkowski(a: Point, b: Point, p: f64) -> f64 {
    let (dx, dy) = deltas(a, b);
    (dx.powf(p) + dy.powf(p)).powf(p.recip())
}
