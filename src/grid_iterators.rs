use std::fmt;

use crate::cells::{Cartesian3DCoordinate, Cell, Direction};
use crate::grid_dimensions::GridDimensions;

// Every passage joins a cell to its neighbour in one of these directions, so checking
// only these finds each passage exactly once.
const POSITIVE_DIRECTIONS: [Direction; 3] = [Direction::Front, Direction::Left, Direction::Up];

/// Iterates every coordinate of a grid in linear index order, x varying fastest.
#[derive(Debug, Copy, Clone)]
pub struct CellIter {
    dimensions: GridDimensions,
    current_cell_number: usize,
    cells_count: usize,
}

impl CellIter {
    pub(crate) fn new(dimensions: GridDimensions) -> CellIter {
        CellIter {
            dimensions,
            current_cell_number: 0,
            cells_count: dimensions.size(),
        }
    }
}

impl ExactSizeIterator for CellIter {} // default impl using size_hint()
impl Iterator for CellIter {
    type Item = Cartesian3DCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = self.dimensions.coordinate_from_index(self.current_cell_number);
            self.current_cell_number += 1;
            coord
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.cells_count - self.current_cell_number;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}

/// Iterates every open passage once, as the pair of coordinates it joins.
/// The first coordinate of each pair is the one nearer the origin.
#[derive(Clone)]
pub struct LinksIter<'a> {
    cells: &'a [Cell],
    dimensions: GridDimensions,
    cell_index: usize,
    direction_index: usize,
}

impl<'a> LinksIter<'a> {
    pub(crate) fn new(cells: &'a [Cell], dimensions: GridDimensions) -> LinksIter<'a> {
        LinksIter {
            cells,
            dimensions,
            cell_index: 0,
            direction_index: 0,
        }
    }
}

impl<'a> Iterator for LinksIter<'a> {
    type Item = (Cartesian3DCoordinate, Cartesian3DCoordinate);

    fn next(&mut self) -> Option<Self::Item> {
        while self.cell_index < self.cells.len() {

            let cell = &self.cells[self.cell_index];
            while self.direction_index < POSITIVE_DIRECTIONS.len() {
                let dir = POSITIVE_DIRECTIONS[self.direction_index];
                self.direction_index += 1;

                if cell.can_go(dir) {
                    let link = self.dimensions
                        .coordinate_from_index(self.cell_index)
                        .and_then(|coord| {
                            self.dimensions
                                .offset_coordinate(coord, dir)
                                .map(|neighbour| (coord, neighbour))
                        });
                    if link.is_some() {
                        return link;
                    }
                }
            }

            self.cell_index += 1;
            self.direction_index = 0;
        }

        None
    }
}

impl<'a> fmt::Debug for LinksIter<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "LinksIter :: cell_index: {:?}, cells_count: {:?}",
               self.cell_index,
               self.cells.len())
    }
}
