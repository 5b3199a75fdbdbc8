//! **mazes3d** carves perfect mazes through 3d grids of cells and answers passage and
//! route queries over the result.
//!
//! A `grid::Grid` is built with its extents, carved by `Grid::generate` with a caller supplied
//! random number generator, then read back cell by cell through `Cell::can_go`.

pub mod cells;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_dimensions;
pub mod grid_iterators;
pub mod pathing;
pub mod units;
mod utils;
