use smallvec::SmallVec;
use std::convert::From;
use std::fmt;

pub type CoordinateSmallVec = SmallVec<[Cartesian3DCoordinate; 6]>;
pub type DirectionSmallVec = SmallVec<[Direction; 6]>;

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian3DCoordinate {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl Cartesian3DCoordinate {
    pub fn new(x: u32, y: u32, z: u32) -> Cartesian3DCoordinate {
        Cartesian3DCoordinate { x, y, z }
    }
}

impl From<(u32, u32, u32)> for Cartesian3DCoordinate {
    fn from(x_y_z: (u32, u32, u32)) -> Cartesian3DCoordinate {
        Cartesian3DCoordinate::new(x_y_z.0, x_y_z.1, x_y_z.2)
    }
}

impl fmt::Display for Cartesian3DCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// The six axis aligned moves between adjacent cells.
///
/// Front/back move along x, left/right along y and up/down along z.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub enum Direction {
    Front,
    Back,
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Every direction, in the order used whenever directions are enumerated.
    pub const ALL: [Direction; 6] = [Direction::Front,
                                     Direction::Back,
                                     Direction::Left,
                                     Direction::Right,
                                     Direction::Up,
                                     Direction::Down];

    /// Unit displacement `(dx, dy, dz)` of one step in this direction.
    pub fn displacement(self) -> (i32, i32, i32) {
        match self {
            Direction::Front => (1, 0, 0),
            Direction::Back => (-1, 0, 0),
            Direction::Left => (0, 1, 0),
            Direction::Right => (0, -1, 0),
            Direction::Up => (0, 0, 1),
            Direction::Down => (0, 0, -1),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Front => Direction::Back,
            Direction::Back => Direction::Front,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// Does a step in this direction increase a coordinate component?
    pub fn is_positive(self) -> bool {
        match self {
            Direction::Front | Direction::Left | Direction::Up => true,
            Direction::Back | Direction::Right | Direction::Down => false,
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            Direction::Front => "front",
            Direction::Back => "back",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        };
        f.write_str(name)
    }
}

/// Passage and visitation state of one grid position.
///
/// Passages are only ever opened, never closed again.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Default, Hash)]
pub struct Cell {
    passages: [bool; 6],
    visited: bool,
}

impl Cell {
    pub fn new() -> Cell {
        Cell::default()
    }

    #[inline]
    pub fn can_go(&self, direction: Direction) -> bool {
        self.passages[direction.index()]
    }

    /// Open the passage towards `direction`, which also marks the cell as visited.
    #[inline]
    pub fn open(&mut self, direction: Direction) {
        self.passages[direction.index()] = true;
        self.visited = true;
    }

    #[inline]
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    pub fn open_directions(&self) -> DirectionSmallVec {
        Direction::ALL.iter()
            .cloned()
            .filter(|dir| self.can_go(*dir))
            .collect()
    }

    // The start cell of a maze is entered without carving into it.
    #[inline]
    pub(crate) fn visit(&mut self) {
        self.visited = true;
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[")?;
        for (index, dir) in self.open_directions().iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", dir)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn opposite_is_an_involution() {
        for dir in Direction::ALL.iter() {
            assert_eq!(dir.opposite().opposite(), *dir);
            assert_ne!(dir.opposite(), *dir);
        }
    }

    #[test]
    fn opposite_displacement_is_negated() {
        for dir in Direction::ALL.iter() {
            let (dx, dy, dz) = dir.displacement();
            assert_eq!(dir.opposite().displacement(), (-dx, -dy, -dz));
        }
    }

    #[test]
    fn displacements_are_unit_steps() {
        for dir in Direction::ALL.iter() {
            let (dx, dy, dz) = dir.displacement();
            assert_eq!(dx.abs() + dy.abs() + dz.abs(), 1);
            assert_eq!(dir.is_positive(), dx + dy + dz > 0);
        }
        assert_eq!(Direction::Front.displacement(), (1, 0, 0));
        assert_eq!(Direction::Left.displacement(), (0, 1, 0));
        assert_eq!(Direction::Down.displacement(), (0, 0, -1));
    }

    #[test]
    fn new_cell_is_closed_and_unvisited() {
        let cell = Cell::new();
        assert!(!cell.is_visited());
        for dir in Direction::ALL.iter() {
            assert!(!cell.can_go(*dir));
        }
        assert!(cell.open_directions().is_empty());
    }

    #[test]
    fn opening_marks_visited() {
        let mut cell = Cell::new();
        cell.open(Direction::Up);
        assert!(cell.is_visited());
        assert!(cell.can_go(Direction::Up));
        assert!(!cell.can_go(Direction::Down));

        cell.open(Direction::Up);
        assert!(cell.can_go(Direction::Up));
        assert_eq!(&*cell.open_directions(), &[Direction::Up]);
    }

    #[test]
    fn display_lists_open_directions() {
        let mut cell = Cell::new();
        assert_eq!(cell.to_string(), "[]");
        cell.open(Direction::Down);
        cell.open(Direction::Front);
        assert_eq!(cell.to_string(), "[front, down]");
    }

    #[test]
    fn coordinate_display_and_conversion() {
        let coord = Cartesian3DCoordinate::from((1, 2, 3));
        assert_eq!(coord, Cartesian3DCoordinate::new(1, 2, 3));
        assert_eq!(coord.to_string(), "(1, 2, 3)");
    }
}
