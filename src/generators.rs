use error_chain::bail;
use log::{debug, trace};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::cells::Cartesian3DCoordinate;
use crate::errors::*;
use crate::grid::Grid;

/// Where the carving walk of a maze generator begins.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum StartCell {
    /// A uniformly random cell of the grid.
    Random,
    Fixed(Cartesian3DCoordinate),
}

impl Default for StartCell {
    fn default() -> StartCell {
        StartCell::Random
    }
}

/// Apply the recursive backtracker (randomized depth first search) maze generation algorithm
/// to a grid.
///
/// From the start cell it repeatedly carves a passage into a randomly chosen unvisited
/// neighbour and moves there. When the current cell has no unvisited neighbours left it walks
/// back along the passages it carved until it finds a cell that does, then carves forward again.
/// The walk back uses the grid's stack of directions rather than recursion, so large grids
/// do not exhaust the call stack.
///
/// Generation ends as soon as every cell has been visited. The result is a perfect maze: the
/// open passages form a spanning tree over all of the cells.
///
/// Running it on a grid that is already complete does nothing. Running it on a grid left
/// partially carved by an earlier failed run is an `InvariantViolation`.
pub fn recursive_backtracker<R>(grid: &mut Grid, rng: &mut R, start: StartCell) -> Result<()>
    where R: Rng + ?Sized
{
    let cells_count = grid.size();

    if grid.visited_count() > 0 {
        if grid.is_complete() {
            debug!("maze already generated over {:?}", grid.dimensions().extents());
            return Ok(());
        }
        bail!(ErrorKind::InvariantViolation(format!("cannot resume a partially carved grid with {} of {} cells visited",
                                                    grid.visited_count(),
                                                    cells_count)));
    }

    let mut current = match start {
        StartCell::Random => grid.random_cell(rng),
        StartCell::Fixed(coord) => coord,
    };
    grid.visit_start(current)?;
    debug!("generating maze over {:?} from {}",
           grid.dimensions().extents(),
           current);

    let mut unvisited = grid.unvisited_neighbour_directions(current);
    while grid.visited_count() < cells_count {

        while let Some(&direction) = unvisited.choose(rng) {
            trace!("{} going {}", current, direction);
            current = grid.carve_passage(current, direction)?;
            unvisited = grid.unvisited_neighbour_directions(current);
        }

        while unvisited.is_empty() && grid.visited_count() < cells_count {
            let previous = current;
            current = grid.backtrack(current)?;
            trace!("{} backtrack to {}", previous, current);
            unvisited = grid.unvisited_neighbour_directions(current);
        }
    }

    debug!("generated maze over {:?}, finishing at {} with path depth {}",
           grid.dimensions().extents(),
           current,
           grid.path().len());
    Ok(())
}
