use std::convert::TryFrom;

use crate::cells::{Cartesian3DCoordinate, Direction};
use crate::errors::*;
use crate::units::{EdgesCount, NodesCount};


/// Extents of a 3d box of cells.
///
/// Cells are laid out linearly with x varying fastest, then y, then z:
/// `index = x + X * (y + Y * z)`.
#[derive(Eq, PartialEq, Debug, Copy, Clone)]
pub struct GridDimensions {
    x_extent: usize,
    y_extent: usize,
    z_extent: usize,
    size: usize,
}

impl GridDimensions {
    /// Fails with `InvalidDimension` if any extent is not positive, does not fit a coordinate component
    /// or the total cell count overflows.
    pub fn new(x: isize, y: isize, z: isize) -> Result<GridDimensions> {

        let extent = |n: isize| u32::try_from(n).ok().filter(|&e| e > 0).map(|e| e as usize);
        let invalid = || Error::from(ErrorKind::InvalidDimension(x, y, z));

        let x_extent = extent(x).ok_or_else(invalid)?;
        let y_extent = extent(y).ok_or_else(invalid)?;
        let z_extent = extent(z).ok_or_else(invalid)?;
        let size = x_extent.checked_mul(y_extent)
            .and_then(|xy| xy.checked_mul(z_extent))
            .ok_or_else(invalid)?;

        Ok(GridDimensions {
            x_extent,
            y_extent,
            z_extent,
            size,
        })
    }

    #[inline(always)]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline(always)]
    pub fn extents(&self) -> (usize, usize, usize) {
        (self.x_extent, self.y_extent, self.z_extent)
    }

    /// A perfect maze over the grid has exactly one less passage than cells.
    pub fn graph_size(&self) -> (NodesCount, EdgesCount) {
        (NodesCount(self.size), EdgesCount(self.size - 1))
    }

    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cartesian3DCoordinate) -> bool {
        (coord.x as usize) < self.x_extent && (coord.y as usize) < self.y_extent &&
        (coord.z as usize) < self.z_extent
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0..size.
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn coordinate_to_index(&self, coord: Cartesian3DCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            let (x, y, z) = (coord.x as usize, coord.y as usize, coord.z as usize);
            Some(x + self.x_extent * (y + self.y_extent * z))
        } else {
            None
        }
    }

    #[inline]
    pub fn coordinate_from_index(&self, index: usize) -> Option<Cartesian3DCoordinate> {
        if index < self.size {
            let x = index % self.x_extent;
            let yz = index / self.x_extent;
            let y = yz % self.y_extent;
            let z = yz / self.y_extent;
            Some(Cartesian3DCoordinate::new(x as u32, y as u32, z as u32))
        } else {
            None
        }
    }

    /// The coordinate one cell away in the given direction.
    /// Returns None if that steps outside of the grid.
    pub fn offset_coordinate(&self,
                             coord: Cartesian3DCoordinate,
                             dir: Direction)
                             -> Option<Cartesian3DCoordinate> {

        let (x, y, z) = (coord.x, coord.y, coord.z);
        let offset = match dir {
            Direction::Front => x.checked_add(1).map(|x| Cartesian3DCoordinate { x, ..coord }),
            Direction::Back => x.checked_sub(1).map(|x| Cartesian3DCoordinate { x, ..coord }),
            Direction::Left => y.checked_add(1).map(|y| Cartesian3DCoordinate { y, ..coord }),
            Direction::Right => y.checked_sub(1).map(|y| Cartesian3DCoordinate { y, ..coord }),
            Direction::Up => z.checked_add(1).map(|z| Cartesian3DCoordinate { z, ..coord }),
            Direction::Down => z.checked_sub(1).map(|z| Cartesian3DCoordinate { z, ..coord }),
        };

        offset.filter(|c| self.is_valid_coordinate(*c))
    }
}
