use std::fmt;
use std::fmt::Write;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary};
use crate::grid::Grid;

const WALL_BOTTOM: char = '_';
const WALL_SIDE: char = '|';
const OPEN: char = ' ';

/// Draws the grid as fixed width ASCII, two characters per cell.
///
/// Each cell only draws its own floor (`_` or ` `) and its east side. The floor of the row
/// above acts as a cell's north wall, so the top border line is drawn separately:
///
/// ```text
///  _________
/// | |  _  | |
/// |_____|___|
/// ```
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let columns_count = self.width().0;

        f.write_char(OPEN)?;
        for _ in 0..(2 * columns_count - 1) {
            f.write_char(WALL_BOTTOM)?;
        }
        f.write_char('\n')?;

        for row in self.iter_row() {
            f.write_char(WALL_SIDE)?;
            for coord in row {
                f.write_char(self.floor_glyph(coord))?;
                f.write_char(self.east_glyph(coord))?;
            }
            f.write_char('\n')?;
        }

        Ok(())
    }
}

impl Grid {
    fn floor_glyph(&self, coord: Cartesian2DCoordinate) -> char {
        if self.get_flags(coord).has_passage(CompassPrimary::South) {
            OPEN
        } else {
            WALL_BOTTOM
        }
    }

    // An open east side sits between two floors, it is only blank if one of those floors is.
    fn east_glyph(&self, coord: Cartesian2DCoordinate) -> char {
        let cell = self.get_flags(coord);
        match self.neighbour_at_direction(coord, CompassPrimary::East) {
            Some(east) if cell.has_passage(CompassPrimary::East) => {
                if (cell | self.get_flags(east)).has_passage(CompassPrimary::South) {
                    OPEN
                } else {
                    WALL_BOTTOM
                }
            }
            _ => WALL_SIDE,
        }
    }
}
