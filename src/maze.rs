use log::debug;
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;
use std::fmt;

use crate::cells::Cartesian2DCoordinate;
use crate::errors::*;
use crate::generators;
use crate::grid::Grid;
use crate::units::{Height, Width};

pub const DEFAULT_WIDTH: usize = 10;
pub const DEFAULT_HEIGHT: usize = 10;

/// One generated maze: its dimensions, the seed it was carved from and the finished grid.
///
/// The same dimensions, seed and start point always give the same maze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    grid: Grid,
    seed: u64,
}

impl Maze {
    pub fn generate(width: Width, height: Height, seed: u64) -> Result<Maze> {
        Maze::generate_from(width, height, seed, None)
    }

    /// Generate with the recursive backtracker starting at `start`, (0, 0) if not given.
    pub fn generate_from(width: Width,
                         height: Height,
                         seed: u64,
                         start: Option<Cartesian2DCoordinate>)
                         -> Result<Maze> {
        let mut grid = Grid::new(width, height)?;
        let mut rng = XorShiftRng::seed_from_u64(seed);
        generators::recursive_backtracker(&mut grid, &mut rng, start)?;
        debug!("generated {}x{} maze with seed {}", width.0, height.0, seed);

        Ok(Maze { grid, seed })
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn width(&self) -> Width {
        self.grid.width()
    }

    #[inline]
    pub fn height(&self) -> Height {
        self.grid.height()
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn metadata(&self) -> String {
        format!("width: {}, height: {}, seed: {}", self.width().0, self.height().0, self.seed)
    }
}

/// The ASCII maze followed by a metadata line.
impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.grid)?;
        writeln!(f, "{}", self.metadata())
    }
}
