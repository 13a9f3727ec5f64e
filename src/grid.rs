use error_chain::bail;
use itertools::Itertools;
use smallvec::SmallVec;
use std::fmt;

use crate::cells::{Cartesian2DCoordinate, Cell, CompassPrimary};
use crate::errors::*;
use crate::units::{CellsCount, Height, PassagesCount, Width};

pub type CoordinateSmallVec = SmallVec<[Cartesian2DCoordinate; 4]>;

/// A rectangular grid of cells stored row major in one flat buffer.
///
/// Passages are recorded on both cells they join, so every cell knows its open sides
/// without looking at its neighbours.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
    width: Width,
    height: Height,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CellLinkError {
    InvalidGridCoordinate,
    NoNeighbour,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid :: width: {:?}, height: {:?}, passages: {:?}",
               self.width, self.height, self.passages_count())
    }
}

impl Grid {
    /// A fully walled grid. Fails with `InvalidDimension` before allocating if either
    /// dimension is zero.
    pub fn new(width: Width, height: Height) -> Result<Grid> {
        let (Width(w), Height(h)) = (width, height);
        if w == 0 || h == 0 {
            bail!(ErrorKind::InvalidDimension(w, h));
        }
        let cells_count = w.checked_mul(h)
                           .ok_or_else(|| Error::from(ErrorKind::InvalidDimension(w, h)))?;
        if w > u32::MAX as usize || h > u32::MAX as usize {
            bail!(ErrorKind::InvalidDimension(w, h));
        }

        Ok(Grid {
            cells: vec![Cell::walled(); cells_count],
            width,
            height,
        })
    }

    #[inline]
    pub fn width(&self) -> Width {
        self.width
    }

    #[inline]
    pub fn height(&self) -> Height {
        self.height
    }

    #[inline]
    pub fn size(&self) -> CellsCount {
        CellsCount(self.cells.len())
    }

    /// Number of carved passages, each counted once rather than once per side.
    pub fn passages_count(&self) -> PassagesCount {
        let south_or_east = self.cells
                                .iter()
                                .map(|cell| {
                                    cell.has_passage(CompassPrimary::South) as usize +
                                    cell.has_passage(CompassPrimary::East) as usize
                                })
                                .sum();
        PassagesCount(south_or_east)
    }

    /// Wall up every cell again.
    pub fn clear(&mut self) {
        for cell in self.cells.iter_mut() {
            *cell = Cell::walled();
        }
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cartesian2DCoordinate) -> bool {
        (coord.x as usize) < self.width.0 && (coord.y as usize) < self.height.0
    }

    /// Linear offset of a coordinate in the cell buffer, `y * width + x`.
    ///
    /// The coordinate must be inside the grid, which is only checked in debug builds.
    #[inline]
    pub fn index(&self, coord: Cartesian2DCoordinate) -> usize {
        debug_assert!(self.is_valid_coordinate(coord),
                      "{:?} outside {:?}x{:?} grid", coord, self.width, self.height);
        coord.y as usize * self.width.0 + coord.x as usize
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(self.index(coord))
        } else {
            None
        }
    }

    #[inline]
    pub fn get_flags(&self, coord: Cartesian2DCoordinate) -> Cell {
        self.cells[self.index(coord)]
    }

    /// Open one side of a single cell. The neighbour is left untouched, use `add_passage` to
    /// keep both sides in agreement.
    #[inline]
    pub fn set_flag(&mut self, coord: Cartesian2DCoordinate, direction: CompassPrimary) {
        let index = self.index(coord);
        self.cells[index].insert(direction);
    }

    /// Carve a passage from `coord` towards `direction`, opening the facing side of the
    /// neighbour too. Returns the neighbour's coordinate.
    pub fn add_passage(&mut self,
                       coord: Cartesian2DCoordinate,
                       direction: CompassPrimary)
                       -> ::std::result::Result<Cartesian2DCoordinate, CellLinkError> {
        if !self.is_valid_coordinate(coord) {
            return Err(CellLinkError::InvalidGridCoordinate);
        }
        let neighbour = self.neighbour_at_direction(coord, direction)
                            .ok_or(CellLinkError::NoNeighbour)?;

        self.set_flag(coord, direction);
        self.set_flag(neighbour, direction.opposite());
        Ok(neighbour)
    }

    pub fn neighbour_at_direction(&self,
                                  coord: Cartesian2DCoordinate,
                                  direction: CompassPrimary)
                                  -> Option<Cartesian2DCoordinate> {
        coord.offset(direction)
             .filter(|neighbour_coord| self.is_valid_coordinate(*neighbour_coord))
    }

    /// Cells that are to the North, South, East or West of a particular cell, but not
    /// necessarily linked by a passage.
    pub fn neighbours(&self, coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
        CompassPrimary::all()
            .iter()
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
            .collect()
    }

    /// Cells joined to a particular cell by a passage.
    /// Returns None if the coordinate is invalid.
    pub fn links(&self, coord: Cartesian2DCoordinate) -> Option<CoordinateSmallVec> {
        if !self.is_valid_coordinate(coord) {
            return None;
        }
        let linked_cells = self.get_flags(coord)
                               .passages()
                               .iter()
                               .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
                               .collect();
        Some(linked_cells)
    }

    pub fn is_neighbour_linked(&self,
                               coord: Cartesian2DCoordinate,
                               direction: CompassPrimary)
                               -> bool {
        self.is_valid_coordinate(coord) && self.get_flags(coord).has_passage(direction) &&
        self.neighbour_at_direction(coord, direction).is_some()
    }

    /// All grid coordinates in row major order.
    pub fn iter(&self) -> impl Iterator<Item = Cartesian2DCoordinate> {
        (0..self.height.0 as u32)
            .cartesian_product(0..self.width.0 as u32)
            .map(|(y, x)| Cartesian2DCoordinate::new(x, y))
    }

    /// The coordinates of each row, top to bottom.
    pub fn iter_row(&self) -> impl Iterator<Item = Vec<Cartesian2DCoordinate>> {
        let width = self.width.0 as u32;
        (0..self.height.0 as u32)
            .map(move |y| (0..width).map(|x| Cartesian2DCoordinate::new(x, y)).collect())
    }

    /// Every passage exactly once as a (cell, south or east neighbour) pair, in row major
    /// order of the first cell.
    pub fn iter_links(&self)
                      -> impl Iterator<Item = (Cartesian2DCoordinate, Cartesian2DCoordinate)> + '_ {
        self.iter().flat_map(move |coord| {
            LINK_DIRECTIONS.iter()
                           .filter(move |dir| self.is_neighbour_linked(coord, **dir))
                           .filter_map(move |dir| self.neighbour_at_direction(coord, *dir))
                           .map(move |neighbour| (coord, neighbour))
        })
    }
}

// Each passage is seen from exactly one of its two cells through these directions.
static LINK_DIRECTIONS: [CompassPrimary; 2] = [CompassPrimary::South, CompassPrimary::East];
