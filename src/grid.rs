use std::fmt;

use error_chain::bail;
use petgraph::graph::NodeIndex;
use petgraph::{Graph, Undirected};
use rand::Rng;

use crate::cells::{Cartesian3DCoordinate, Cell, CoordinateSmallVec, Direction, DirectionSmallVec};
use crate::errors::*;
use crate::generators::{self, StartCell};
use crate::grid_dimensions::GridDimensions;
use crate::grid_iterators::{CellIter, LinksIter};
use crate::units::{EdgesCount, NodesCount};

/// Open passages between cells, with node indices as wide as the grid's linear indices.
pub type PassageGraph = Graph<Cartesian3DCoordinate, (), Undirected, usize>;

/// A dense 3d box of cells plus the state of the maze carving walk over them.
///
/// `stack` holds the directions taken from the start cell to the current carving position.
/// `visited_count` is the number of cells entered so far.
#[derive(Clone)]
pub struct Grid {
    dimensions: GridDimensions,
    cells: Vec<Cell>,
    stack: Vec<Direction>,
    visited_count: usize,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "Grid :: extents: {:?}, visited: {:?}, stack depth: {:?}",
               self.dimensions.extents(),
               self.visited_count,
               self.stack.len())
    }
}

impl Grid {
    /// Allocates `x * y * z` closed and unvisited cells.
    ///
    /// Fails with `InvalidDimension` if any extent is not positive.
    pub fn new(dimensions: (isize, isize, isize)) -> Result<Grid> {
        let (x, y, z) = dimensions;
        let dimensions = GridDimensions::new(x, y, z)?;
        let cells_count = dimensions.size();

        Ok(Grid {
            dimensions,
            cells: vec![Cell::new(); cells_count],
            stack: Vec::new(),
            visited_count: 0,
        })
    }

    /// Carve a perfect maze through the grid, starting from a uniformly random cell.
    pub fn generate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        generators::recursive_backtracker(self, rng, StartCell::Random)
    }

    pub fn generate_from<R: Rng + ?Sized>(&mut self, rng: &mut R, start: StartCell) -> Result<()> {
        generators::recursive_backtracker(self, rng, start)
    }

    #[inline]
    pub fn dimensions(&self) -> &GridDimensions {
        &self.dimensions
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn visited_count(&self) -> usize {
        self.visited_count
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.visited_count == self.size()
    }

    /// The directions walked from the start cell to the current carving position.
    /// After generation this is the path from the start cell to the last cell carved.
    #[inline]
    pub fn path(&self) -> &[Direction] {
        &self.stack
    }

    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cartesian3DCoordinate) -> bool {
        self.dimensions.is_valid_coordinate(coord)
    }

    #[inline]
    pub fn cell(&self, coord: Cartesian3DCoordinate) -> Option<&Cell> {
        self.dimensions.coordinate_to_index(coord).map(|index| &self.cells[index])
    }

    /// Is there an open passage from the cell at `coord` towards `direction`?
    /// False for coordinates outside the grid.
    #[inline]
    pub fn can_go(&self, coord: Cartesian3DCoordinate, direction: Direction) -> bool {
        self.cell(coord).map_or(false, |cell| cell.can_go(direction))
    }

    #[inline]
    pub fn is_visited(&self, coord: Cartesian3DCoordinate) -> bool {
        self.cell(coord).map_or(false, |cell| cell.is_visited())
    }

    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Cartesian3DCoordinate {
        let (x, y, z) = self.dimensions.extents();
        Cartesian3DCoordinate::new(rng.gen_range(0..x) as u32,
                                   rng.gen_range(0..y) as u32,
                                   rng.gen_range(0..z) as u32)
    }

    #[inline]
    pub fn neighbour_at_direction(&self,
                                  coord: Cartesian3DCoordinate,
                                  direction: Direction)
                                  -> Option<Cartesian3DCoordinate> {
        if self.is_valid_coordinate(coord) {
            self.dimensions.offset_coordinate(coord, direction)
        } else {
            None
        }
    }

    /// Directions from `coord` that lead to another cell in the grid, in `Direction::ALL` order.
    pub fn neighbours_in_bounds(&self, coord: Cartesian3DCoordinate) -> DirectionSmallVec {
        Direction::ALL.iter()
            .cloned()
            .filter(|dir| self.neighbour_at_direction(coord, *dir).is_some())
            .collect()
    }

    /// Directions from `coord` that lead to a cell not yet entered by the carving walk.
    pub fn unvisited_neighbour_directions(&self, coord: Cartesian3DCoordinate) -> DirectionSmallVec {
        Direction::ALL.iter()
            .cloned()
            .filter(|dir| {
                self.neighbour_at_direction(coord, *dir)
                    .map_or(false, |neighbour| !self.is_visited(neighbour))
            })
            .collect()
    }

    /// Cells adjacent to `coord`, but not necessarily linked by a passage.
    pub fn neighbours(&self, coord: Cartesian3DCoordinate) -> CoordinateSmallVec {
        Direction::ALL.iter()
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
            .collect()
    }

    pub fn unvisited_neighbours(&self, coord: Cartesian3DCoordinate) -> CoordinateSmallVec {
        self.neighbours(coord)
            .iter()
            .cloned()
            .filter(|neighbour| !self.is_visited(*neighbour))
            .collect()
    }

    /// Cells that are linked to a particular cell by a passage.
    /// Returns None if the coordinate is invalid.
    pub fn links(&self, coord: Cartesian3DCoordinate) -> Option<CoordinateSmallVec> {
        self.cell(coord).map(|cell| {
            cell.open_directions()
                .iter()
                .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
                .collect()
        })
    }

    /// Are two cells in the grid linked?
    pub fn is_linked(&self, a: Cartesian3DCoordinate, b: Cartesian3DCoordinate) -> bool {
        Direction::ALL.iter()
            .any(|dir| self.neighbour_at_direction(a, *dir) == Some(b) && self.can_go(a, *dir))
    }

    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter::new(self.dimensions)
    }

    pub fn iter_links(&self) -> LinksIter<'_> {
        LinksIter::new(&self.cells, self.dimensions)
    }

    pub fn links_count(&self) -> usize {
        self.iter_links().count()
    }

    /// The open passages as an undirected graph with one node per cell, weighted by its coordinate.
    /// Node indices follow the grid's linear index order.
    pub fn passage_graph(&self) -> PassageGraph {
        let (NodesCount(nodes), EdgesCount(edges)) = self.dimensions.graph_size();
        let mut graph = Graph::with_capacity(nodes, edges);

        for coord in self.iter() {
            let _ = graph.add_node(coord);
        }
        for (a, b) in self.iter_links() {
            let a_index = self.dimensions.coordinate_to_index(a);
            let b_index = self.dimensions.coordinate_to_index(b);
            if let (Some(a_index), Some(b_index)) = (a_index, b_index) {
                let _ = graph.add_edge(NodeIndex::<usize>::new(a_index), NodeIndex::new(b_index), ());
            }
        }

        graph
    }

    pub(crate) fn visit_start(&mut self, coord: Cartesian3DCoordinate) -> Result<()> {
        let index = self.dimensions
            .coordinate_to_index(coord)
            .ok_or_else(|| Error::from(ErrorKind::InvalidStartCoordinate(coord)))?;
        self.cells[index].visit();
        self.visited_count += 1;
        Ok(())
    }

    /// Open a passage from `from` into its unvisited neighbour at `direction` and move there,
    /// recording the step on the stack.
    pub(crate) fn carve_passage(&mut self,
                                from: Cartesian3DCoordinate,
                                direction: Direction)
                                -> Result<Cartesian3DCoordinate> {

        let to = self.neighbour_at_direction(from, direction)
            .ok_or_else(|| {
                ErrorKind::InvariantViolation(format!("carving {} from {} leaves the grid",
                                                      direction,
                                                      from))
            })?;
        if self.is_visited(to) {
            bail!(ErrorKind::InvariantViolation(format!("carving {} from {} re-enters visited cell {}",
                                                        direction,
                                                        from,
                                                        to)));
        }

        self.cell_mut(from)?.open(direction);
        self.cell_mut(to)?.open(direction.opposite());
        self.stack.push(direction);
        self.visited_count += 1;

        Ok(to)
    }

    /// Step back from `from` along the most recently carved passage.
    pub(crate) fn backtrack(&mut self, from: Cartesian3DCoordinate) -> Result<Cartesian3DCoordinate> {
        let direction = self.stack
            .pop()
            .ok_or_else(|| {
                ErrorKind::InvariantViolation(format!("backtracking stack underflow at {} with {} of {} cells visited",
                                                      from,
                                                      self.visited_count,
                                                      self.cells.len()))
            })?;

        self.neighbour_at_direction(from, direction.opposite())
            .ok_or_else(|| {
                ErrorKind::InvariantViolation(format!("backtracking {} from {} leaves the grid",
                                                      direction.opposite(),
                                                      from))
                    .into()
            })
    }

    fn cell_mut(&mut self, coord: Cartesian3DCoordinate) -> Result<&mut Cell> {
        match self.dimensions.coordinate_to_index(coord) {
            Some(index) => Ok(&mut self.cells[index]),
            None => {
                Err(ErrorKind::InvariantViolation(format!("{} is outside the grid", coord)).into())
            }
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use itertools::Itertools; // a trait
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    fn grid(x: isize, y: isize, z: isize) -> Grid {
        Grid::new((x, y, z)).expect("valid grid dimensions")
    }

    fn gc(x: u32, y: u32, z: u32) -> Cartesian3DCoordinate {
        Cartesian3DCoordinate::new(x, y, z)
    }

    #[test]
    fn construction() {
        let g = grid(3, 4, 5);
        assert_eq!(g.size(), 60);
        assert_eq!(g.visited_count(), 0);
        assert!(!g.is_complete());
        assert!(g.path().is_empty());
        assert!(g.iter().all(|coord| {
            let cell = g.cell(coord).expect("coordinate from iter is valid");
            *cell == Cell::new()
        }));
    }

    #[test]
    fn construction_rejects_non_positive_dimensions() {
        for dims in &[(0, 3, 3), (3, -1, 3), (3, 3, 0)] {
            let err = Grid::new(*dims).expect_err("grid dimensions should be rejected");
            assert!(matches!(err.kind(), ErrorKind::InvalidDimension(..)));
        }
    }

    #[test]
    fn neighbour_directions() {
        let g = grid(3, 3, 3);
        use crate::cells::Direction::*;

        let check = |coord, expected: &[Direction]| {
            assert_eq!(&*g.neighbours_in_bounds(coord), expected);
        };

        // corners
        check(gc(0, 0, 0), &[Front, Left, Up]);
        check(gc(2, 2, 2), &[Back, Right, Down]);
        check(gc(2, 0, 2), &[Back, Left, Down]);

        // edge and face
        check(gc(1, 0, 0), &[Front, Back, Left, Up]);
        check(gc(1, 1, 0), &[Front, Back, Left, Right, Up]);

        // interior
        check(gc(1, 1, 1), &Direction::ALL);

        // out of the grid
        check(gc(3, 0, 0), &[]);
    }

    #[test]
    fn flat_grids_have_no_vertical_neighbours() {
        let g = grid(4, 4, 1);
        let dirs = g.neighbours_in_bounds(gc(1, 1, 0));
        assert!(!dirs.contains(&Direction::Up));
        assert!(!dirs.contains(&Direction::Down));
        assert_eq!(dirs.len(), 4);

        let single = grid(1, 1, 1);
        assert!(single.neighbours_in_bounds(gc(0, 0, 0)).is_empty());
    }

    #[test]
    fn neighbour_cells() {
        let g = grid(3, 3, 3);
        let sorted_neighbours = |coord| g.neighbours(coord).iter().cloned().sorted().collect::<Vec<_>>();

        assert_eq!(sorted_neighbours(gc(0, 0, 0)), vec![gc(0, 0, 1), gc(0, 1, 0), gc(1, 0, 0)]);
        assert_eq!(sorted_neighbours(gc(1, 1, 1)),
                   vec![gc(0, 1, 1), gc(1, 0, 1), gc(1, 1, 0), gc(1, 1, 2), gc(1, 2, 1), gc(2, 1, 1)]);
    }

    #[test]
    fn unvisited_neighbours_shrink_as_cells_are_carved() {
        let mut g = grid(2, 2, 1);
        let origin = gc(0, 0, 0);
        g.visit_start(origin).expect("valid start");
        assert_eq!(&*g.unvisited_neighbour_directions(origin), &[Direction::Front, Direction::Left]);

        let front = g.carve_passage(origin, Direction::Front).expect("carve front");
        assert_eq!(front, gc(1, 0, 0));
        assert_eq!(&*g.unvisited_neighbour_directions(origin), &[Direction::Left]);
        assert_eq!(&*g.unvisited_neighbours(origin), &[gc(0, 1, 0)]);
        assert_eq!(&*g.unvisited_neighbour_directions(front), &[Direction::Left]);
        assert_eq!(g.visited_count(), 2);
        assert_eq!(g.path(), &[Direction::Front]);
    }

    #[test]
    fn carving_links_both_cells() {
        let mut g = grid(3, 1, 1);
        let (a, b, c) = (gc(0, 0, 0), gc(1, 0, 0), gc(2, 0, 0));
        g.visit_start(a).expect("valid start");
        g.carve_passage(a, Direction::Front).expect("carve a to b");

        assert!(g.can_go(a, Direction::Front));
        assert!(g.can_go(b, Direction::Back));
        assert!(g.is_linked(a, b) && g.is_linked(b, a));
        assert!(!g.is_linked(b, c));
        assert_eq!(&*g.links(a).expect("valid coordinate"), &[b]);
        assert_eq!(&*g.links(b).expect("valid coordinate"), &[a]);
        assert!(g.links(c).expect("valid coordinate").is_empty());
        assert!(g.links(gc(5, 5, 5)).is_none());
        assert_eq!(g.iter_links().collect::<Vec<_>>(), &[(a, b)]);
        assert_eq!(g.links_count(), 1);
    }

    #[test]
    fn carving_into_a_visited_cell_is_an_invariant_violation() {
        let mut g = grid(2, 1, 1);
        g.visit_start(gc(0, 0, 0)).expect("valid start");
        g.carve_passage(gc(0, 0, 0), Direction::Front).expect("carve front");
        let err = g.carve_passage(gc(1, 0, 0), Direction::Back).expect_err("cell already visited");
        assert!(matches!(err.kind(), ErrorKind::InvariantViolation(_)));

        let err = g.carve_passage(gc(1, 0, 0), Direction::Front).expect_err("off the grid");
        assert!(matches!(err.kind(), ErrorKind::InvariantViolation(_)));
    }

    #[test]
    fn backtracking_retraces_the_stack() {
        let mut g = grid(3, 1, 1);
        g.visit_start(gc(0, 0, 0)).expect("valid start");
        let mid = g.carve_passage(gc(0, 0, 0), Direction::Front).expect("carve");
        let end = g.carve_passage(mid, Direction::Front).expect("carve");

        assert_eq!(g.backtrack(end).expect("stack not empty"), mid);
        assert_eq!(g.backtrack(mid).expect("stack not empty"), gc(0, 0, 0));

        let err = g.backtrack(gc(0, 0, 0)).expect_err("stack is empty");
        assert!(matches!(err.kind(), ErrorKind::InvariantViolation(_)));
    }

    #[test]
    fn invalid_start_coordinate() {
        let mut g = grid(2, 2, 2);
        let err = g.visit_start(gc(2, 0, 0)).expect_err("outside the grid");
        assert!(matches!(err.kind(), ErrorKind::InvalidStartCoordinate(_)));
        assert_eq!(g.visited_count(), 0);
    }

    #[test]
    fn random_cell() {
        let g = grid(4, 3, 2);
        let mut rng = XorShiftRng::seed_from_u64(7);
        for _ in 0..1000 {
            assert!(g.is_valid_coordinate(g.random_cell(&mut rng)));
        }
    }

    #[test]
    fn passage_graph_of_generated_maze_is_a_spanning_tree() {
        let mut g = grid(4, 4, 4);
        let mut rng = XorShiftRng::seed_from_u64(42);
        g.generate(&mut rng).expect("generation succeeds");

        let graph = g.passage_graph();
        assert_eq!(graph.node_count(), 64);
        assert_eq!(graph.edge_count(), 63);
        assert_eq!(petgraph::algo::connected_components(&graph), 1);
        assert!(!petgraph::algo::is_cyclic_undirected(&graph));
        assert_eq!(graph[NodeIndex::<usize>::new(5)], gc(1, 1, 0));
    }

    #[test]
    fn debug_format() {
        let g = grid(2, 3, 4);
        assert_eq!(format!("{:?}", g),
                   "Grid :: extents: (2, 3, 4), visited: 0, stack depth: 0");
    }
}
