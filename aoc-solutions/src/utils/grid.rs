//! 2D grid, positions and compass directions.

use std::fmt;
use std::ops::{Add, AddAssign, Index, IndexMut, Mul, Neg, Sub};

use aoc_solver::ParseError;

/// A point on a grid; `x` grows to the right, `y` grows downwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn step(self, dir: Direction) -> Self {
        self + dir.delta()
    }

    pub fn neighbors4(self) -> [Pos; 4] {
        Direction::ALL.map(|d| self.step(d))
    }

    pub fn neighbors8(self) -> [Pos; 8] {
        OFFSETS8.map(|o| self + o)
    }

    pub fn manhattan(self, other: Pos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl Add for Pos {
    type Output = Pos;

    fn add(self, rhs: Pos) -> Pos {
        Pos::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Pos {
    fn add_assign(&mut self, rhs: Pos) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Pos {
    type Output = Pos;

    fn sub(self, rhs: Pos) -> Pos {
        Pos::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<i32> for Pos {
    type Output = Pos;

    fn mul(self, rhs: i32) -> Pos {
        Pos::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Pos {
    type Output = Pos;

    fn neg(self) -> Pos {
        Pos::new(-self.x, -self.y)
    }
}

/// The eight king-move offsets, clockwise from up.
pub const OFFSETS8: [Pos; 8] = [
    Pos::new(0, -1),
    Pos::new(1, -1),
    Pos::new(1, 0),
    Pos::new(1, 1),
    Pos::new(0, 1),
    Pos::new(-1, 1),
    Pos::new(-1, 0),
    Pos::new(-1, -1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Clockwise from up.
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

    pub fn delta(self) -> Pos {
        match self {
            Direction::Up => Pos::new(0, -1),
            Direction::Right => Pos::new(1, 0),
            Direction::Down => Pos::new(0, 1),
            Direction::Left => Pos::new(-1, 0),
        }
    }

    pub fn turn_right(self) -> Self {
        Self::ALL[(self.index() + 1) % 4]
    }

    pub fn turn_left(self) -> Self {
        Self::ALL[(self.index() + 3) % 4]
    }

    pub fn opposite(self) -> Self {
        Self::ALL[(self.index() + 2) % 4]
    }

    /// Position in [`Direction::ALL`], handy for per-direction arrays.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// `^ > v <`
    pub fn from_arrow(b: u8) -> Option<Self> {
        match b {
            b'^' => Some(Direction::Up),
            b'>' => Some(Direction::Right),
            b'v' => Some(Direction::Down),
            b'<' => Some(Direction::Left),
            _ => None,
        }
    }
}

/// A rectangular, row-major grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    pub fn new(width: usize, height: usize, fill: T) -> Self
    where
        T: Clone,
    {
        Self {
            width,
            height,
            cells: vec![fill; width * height],
        }
    }

    /// Parse a block of text, converting each byte with `f`.
    ///
    /// Blank lines are skipped and every row must have the same width.
    pub fn parse_with<F>(input: &str, mut f: F) -> Result<Self, ParseError>
    where
        F: FnMut(u8) -> Option<T>,
    {
        let mut width = None;
        let mut height = 0;
        let mut cells = Vec::new();
        for line in input.lines().map(str::trim_end).filter(|l| !l.is_empty()) {
            let expected = *width.get_or_insert(line.len());
            if line.len() != expected {
                return Err(ParseError::InvalidFormat(format!(
                    "row {} has width {}, expected {}",
                    height + 1,
                    line.len(),
                    expected
                )));
            }
            for (col, b) in line.bytes().enumerate() {
                let cell = f(b).ok_or_else(|| {
                    ParseError::InvalidFormat(format!(
                        "unexpected {:?} at row {} column {}",
                        b as char,
                        height + 1,
                        col + 1
                    ))
                })?;
                cells.push(cell);
            }
            height += 1;
        }
        let width = width.ok_or_else(|| ParseError::MissingData("empty grid".to_string()))?;
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, p: Pos) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as usize) < self.width && (p.y as usize) < self.height
    }

    fn offset(&self, p: Pos) -> Option<usize> {
        self.contains(p)
            .then(|| p.y as usize * self.width + p.x as usize)
    }

    pub fn get(&self, p: Pos) -> Option<&T> {
        self.offset(p).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, p: Pos) -> Option<&mut T> {
        self.offset(p).map(move |i| &mut self.cells[i])
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        let width = self.width;
        (0..self.width * self.height).map(move |i| Pos::new((i % width) as i32, (i / width) as i32))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Pos, &T)> {
        self.positions().zip(self.cells.iter())
    }

    /// In-bounds orthogonal neighbours of `p`.
    pub fn neighbors4(&self, p: Pos) -> impl Iterator<Item = Pos> + '_ {
        p.neighbors4().into_iter().filter(|&n| self.contains(n))
    }

    pub fn find(&self, mut pred: impl FnMut(&T) -> bool) -> Option<Pos> {
        self.iter().find(|(_, v)| pred(v)).map(|(p, _)| p)
    }

    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(f).collect(),
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.width)
    }
}

impl Grid<u8> {
    /// Parse a grid of raw bytes.
    pub fn parse_bytes(input: &str) -> Result<Self, ParseError> {
        Self::parse_with(input, Some)
    }

    pub fn find_byte(&self, b: u8) -> Option<Pos> {
        self.find(|&v| v == b)
    }
}

impl<T> Index<Pos> for Grid<T> {
    type Output = T;

    fn index(&self, p: Pos) -> &T {
        self.get(p)
            .unwrap_or_else(|| panic!("{:?} outside {}x{} grid", p, self.width, self.height))
    }
}

impl<T> IndexMut<Pos> for Grid<T> {
    fn index_mut(&mut self, p: Pos) -> &mut T {
        let (width, height) = (self.width, self.height);
        self.get_mut(p)
            .unwrap_or_else(|| panic!("{:?} outside {}x{} grid", p, width, height))
    }
}

impl fmt::Display for Grid<u8> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            writeln!(f, "{}", String::from_utf8_lossy(row))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_and_index() {
        let grid = Grid::parse_bytes("ab\ncd\n").unwrap();
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid[Pos::new(1, 0)], b'b');
        assert_eq!(grid[Pos::new(0, 1)], b'c');
        assert_eq!(grid.get(Pos::new(2, 0)), None);
        assert_eq!(grid.get(Pos::new(0, -1)), None);
        assert_eq!(grid.find_byte(b'd'), Some(Pos::new(1, 1)));
        assert_eq!(grid.to_string(), "ab\ncd\n");
    }

    #[test]
    fn test_ragged_rows_rejected() {
        assert!(Grid::parse_bytes("abc\nde\n").is_err());
        assert!(Grid::parse_bytes("\n\n").is_err());
    }

    #[test]
    fn test_parse_with_rejects_unknown_cells() {
        let err = Grid::parse_with("#.\n.x", |b| match b {
            b'#' => Some(true),
            b'.' => Some(false),
            _ => None,
        })
        .unwrap_err();
        assert!(err.to_string().contains("row 2 column 2"), "{}", err);
    }

    #[test]
    fn test_neighbors_are_clipped_to_grid() {
        let grid = Grid::new(3, 3, 0u8);
        assert_eq!(grid.neighbors4(Pos::new(0, 0)).count(), 2);
        assert_eq!(grid.neighbors4(Pos::new(1, 1)).count(), 4);
    }

    #[test]
    fn test_positions_are_row_major() {
        let grid = Grid::new(2, 2, ());
        let positions: Vec<Pos> = grid.positions().collect();
        assert_eq!(
            positions,
            vec![Pos::new(0, 0), Pos::new(1, 0), Pos::new(0, 1), Pos::new(1, 1)]
        );
    }

    fn direction() -> impl Strategy<Value = Direction> {
        prop::sample::select(Direction::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_turns_are_inverse(dir in direction()) {
            prop_assert_eq!(dir.turn_right().turn_left(), dir);
            prop_assert_eq!(dir.turn_right().turn_right(), dir.opposite());
            prop_assert_eq!(dir.delta() + dir.opposite().delta(), Pos::default());
        }

        #[test]
        fn prop_step_then_back_is_identity(x in -100i32..100, y in -100i32..100, dir in direction()) {
            let p = Pos::new(x, y);
            prop_assert_eq!(p.step(dir).step(dir.opposite()), p);
            prop_assert_eq!(p.manhattan(p.step(dir)), 1);
        }
    }
}
