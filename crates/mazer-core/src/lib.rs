//! **mazer-core** — foundational types for the mazer search engine.
//!
//! This crate provides the geometry primitives ([`Point`], [`Range`]) and the
//! immutable occupancy/weight [`Grid`] that every search strategy in
//! `mazer-paths` reads from.

pub mod error;
pub mod geom;
pub mod grid;

pub use error::GridError;
pub use geom::{Point, Range, RangeIter};
pub use grid::Grid;
