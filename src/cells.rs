use smallvec::SmallVec;
use std::convert::From;
use std::fmt;
use std::ops::BitOr;

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}

impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x, y }
    }

    /// Creates a new coordinate offset 1 cell away in the given direction.
    /// Returns None if the coordinate is not representable (x or y would go below zero).
    /// The result is not bounds checked against any particular grid.
    pub fn offset(self, dir: CompassPrimary) -> Option<Cartesian2DCoordinate> {
        let (dx, dy) = dir.offset();
        let x = offset_axis(self.x, dx)?;
        let y = offset_axis(self.y, dy)?;
        Some(Cartesian2DCoordinate::new(x, y))
    }
}

#[inline]
fn offset_axis(value: u32, delta: i8) -> Option<u32> {
    match delta {
        -1 => value.checked_sub(1),
        1 => value.checked_add(1),
        _ => Some(value),
    }
}

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

pub type DirectionSmallVec = SmallVec<[CompassPrimary; 4]>;

const DIRS_COUNT: usize = 4;

// All tables are indexed by `CompassPrimary as usize`.
static ALL_DIRS: [CompassPrimary; DIRS_COUNT] = [CompassPrimary::North,
                                                 CompassPrimary::South,
                                                 CompassPrimary::East,
                                                 CompassPrimary::West];
const FLAGS: [u8; DIRS_COUNT] = [1, 2, 4, 8];
const OFFSETS: [(i8, i8); DIRS_COUNT] = [(0, -1), (0, 1), (1, 0), (-1, 0)];
const OPPOSITES: [CompassPrimary; DIRS_COUNT] = [CompassPrimary::South,
                                                  CompassPrimary::North,
                                                  CompassPrimary::West,
                                                  CompassPrimary::East];

impl CompassPrimary {
    /// The four directions in their fixed N, S, E, W order.
    #[inline]
    pub fn all() -> &'static [CompassPrimary; DIRS_COUNT] {
        &ALL_DIRS
    }

    /// Unit step (dx, dy) to the adjacent cell. North is towards row 0.
    #[inline]
    pub fn offset(self) -> (i8, i8) {
        OFFSETS[self as usize]
    }

    #[inline]
    pub fn opposite(self) -> CompassPrimary {
        OPPOSITES[self as usize]
    }

    /// The bit this direction occupies in a `Cell`.
    #[inline]
    pub fn flag(self) -> u8 {
        FLAGS[self as usize]
    }
}

/// The open passages out of one grid position, one bit per `CompassPrimary`.
/// A clear bit is a wall.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Default)]
pub struct Cell(u8);

impl Cell {
    #[inline]
    pub fn walled() -> Cell {
        Cell(0)
    }

    #[inline]
    pub fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn is_walled(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn has_passage(self, dir: CompassPrimary) -> bool {
        self.0 & dir.flag() != 0
    }

    #[inline]
    pub fn insert(&mut self, dir: CompassPrimary) {
        self.0 |= dir.flag();
    }

    /// The directions with an open passage, in N, S, E, W order.
    pub fn passages(self) -> DirectionSmallVec {
        ALL_DIRS.iter()
                .cloned()
                .filter(|dir| self.has_passage(*dir))
                .collect()
    }
}

impl From<CompassPrimary> for Cell {
    fn from(dir: CompassPrimary) -> Cell {
        Cell(dir.flag())
    }
}

impl BitOr for Cell {
    type Output = Cell;

    fn bitor(self, rhs: Cell) -> Cell {
        Cell(self.0 | rhs.0)
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Cell({:04b} {:?})", self.0, &*self.passages())
    }
}
