use std::cmp;
use std::collections::hash_map::Entry;

use itertools::Itertools;

use crate::cells::Cartesian3DCoordinate;
use crate::grid::Grid;
use crate::utils;
use crate::utils::FnvHashMap;


/// Passage distances from one start cell to every cell reachable from it.
#[derive(Debug, Clone)]
pub struct Distances {
    start_coordinate: Cartesian3DCoordinate,
    distances: FnvHashMap<Cartesian3DCoordinate, u32>,
    max_distance: u32,
}

impl Distances {
    /// Flood fill outwards from `start_coordinate` through open passages.
    /// Returns None if the start is not on the grid.
    pub fn new(grid: &Grid, start_coordinate: Cartesian3DCoordinate) -> Option<Distances> {

        if !grid.is_valid_coordinate(start_coordinate) {
            return None;
        }

        let mut max = 0;
        let mut distances = utils::fnv_hashmap(grid.size());
        distances.insert(start_coordinate, 0);

        // Passages are unweighted, so the first time a cell is reached is along a shortest path and
        // the distances map doubles as the visited set.
        let mut frontier = vec![(start_coordinate, 0)];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for &(cell_coord, distance_to_cell) in &frontier {
                max = cmp::max(max, distance_to_cell);

                for link_coordinate in grid.links(cell_coord).unwrap_or_default() {
                    if let Entry::Vacant(entry) = distances.entry(link_coordinate) {
                        entry.insert(distance_to_cell + 1);
                        new_frontier.push((link_coordinate, distance_to_cell + 1));
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coordinate,
            distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> Cartesian3DCoordinate {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: Cartesian3DCoordinate) -> Option<u32> {
        self.distances.get(&coord).cloned()
    }

    /// Number of cells reachable from the start, the start included.
    #[inline]
    pub fn reachable_count(&self) -> usize {
        self.distances.len()
    }

    /// The cells at the maximum distance from the start, in coordinate order.
    pub fn furthest_points_on_grid(&self) -> Vec<Cartesian3DCoordinate> {
        let furthest_distance = self.max();
        self.distances
            .iter()
            .filter(|&(_, distance)| *distance == furthest_distance)
            .map(|(coord, _)| *coord)
            .sorted()
            .collect()
    }
}

/// The path through the maze from the start of `distances_from_start` to `end_point`, both included.
/// Returns None if the end point is unreachable.
pub fn shortest_path(grid: &Grid,
                     distances_from_start: &Distances,
                     end_point: Cartesian3DCoordinate)
                     -> Option<Vec<Cartesian3DCoordinate>> {

    let mut current_distance = distances_from_start.distance_from_start_to(end_point)?;
    let start = distances_from_start.start();
    let mut current_coord = end_point;
    let mut path = vec![end_point];

    while current_coord != start {
        // Step to any linked neighbour one closer to the start.
        let closer = grid.links(current_coord)?
            .iter()
            .cloned()
            .find(|link| {
                distances_from_start.distance_from_start_to(*link)
                    .map_or(false, |d| d + 1 == current_distance)
            })?;

        current_coord = closer;
        current_distance -= 1;
        path.push(current_coord);
    }

    path.reverse();
    Some(path)
}

/// Works only as long as we are looking at a perfect maze, otherwise you get back some arbitrary path.
pub fn longest_path(grid: &Grid) -> Option<Vec<Cartesian3DCoordinate>> {

    // Distances to everywhere from an arbitrary start coordinate
    let arbitrary_start_point = Cartesian3DCoordinate::new(0, 0, 0);
    let first_distances = Distances::new(grid, arbitrary_start_point)?;

    // The start of the longest path is just the point furthest away from an arbitrary initial point
    let long_path_start_coordinate = *first_distances.furthest_points_on_grid().first()?;

    let distances_from_start = Distances::new(grid, long_path_start_coordinate)?;
    let end_point = *distances_from_start.furthest_points_on_grid().first()?;

    shortest_path(grid, &distances_from_start, end_point)
}
