//! **ascii_mazes** carves perfect mazes on a rectangular grid with a seeded recursive
//! backtracker and draws them as ASCII art.

pub mod cells;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod maze;
pub mod options;
pub mod units;
