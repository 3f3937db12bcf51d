//! Board state: a square grid of intersections plus capture counters.
//!
//! The board knows nothing about the rules of Go. Stones are written with
//! [`Board::set`] and removed by the capture engine in [`crate::rules`].

use std::fmt;

use crate::constants::{MAX_BOARD_SIZE, MIN_BOARD_SIZE, SGF_PASS, TT_PASS_MAX_SIZE};
use crate::error::{Error, Result};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

/// An intersection, zero-based, `x` across and `y` down.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// The four orthogonal neighbours (W, E, N, S) that exist on a board of `size`.
    ///
    /// Neighbours past an edge are omitted, which is how the capture search
    /// treats the edge: as a blocked direction.
    pub fn neighbors(self, size: usize) -> impl Iterator<Item = Point> {
        let Point { x, y } = self;
        [
            x.checked_sub(1).map(|x| Point::new(x, y)),
            (x + 1 < size).then(|| Point::new(x + 1, y)),
            y.checked_sub(1).map(|y| Point::new(x, y)),
            (y + 1 < size).then(|| Point::new(x, y + 1)),
        ]
        .into_iter()
        .flatten()
    }

    /// Parse a two-letter SGF coordinate.
    ///
    /// Returns `Ok(None)` for a pass: the empty string, or `tt` on boards of
    /// 19 lines or fewer.
    pub fn from_sgf(value: &str, size: usize) -> Result<Option<Point>> {
        let invalid = || Error::InvalidCoordinate {
            value: value.to_string(),
            size,
        };
        if value.is_empty() || (value == SGF_PASS && size <= TT_PASS_MAX_SIZE) {
            return Ok(None);
        }
        let bytes = value.as_bytes();
        if bytes.len() != 2 {
            return Err(invalid());
        }
        let x = sgf_letter(bytes[0]).ok_or_else(invalid)?;
        let y = sgf_letter(bytes[1]).ok_or_else(invalid)?;
        if x >= size || y >= size {
            return Err(invalid());
        }
        Ok(Some(Point::new(x, y)))
    }

    /// Expand an SGF point-list entry, which is either a single point or a
    /// compressed rectangle `aa:cc`.
    pub fn expand_sgf(value: &str, size: usize) -> Result<Vec<Point>> {
        let Some((from, to)) = value.split_once(':') else {
            return Ok(Point::from_sgf(value, size)?.into_iter().collect());
        };
        let invalid = || Error::InvalidCoordinate {
            value: value.to_string(),
            size,
        };
        let a = Point::from_sgf(from, size)?.ok_or_else(invalid)?;
        let b = Point::from_sgf(to, size)?.ok_or_else(invalid)?;
        let mut points = Vec::new();
        for y in a.y.min(b.y)..=a.y.max(b.y) {
            for x in a.x.min(b.x)..=a.x.max(b.x) {
                points.push(Point::new(x, y));
            }
        }
        Ok(points)
    }

    /// Format as a two-letter SGF coordinate.
    pub fn to_sgf(self) -> String {
        format!("{}{}", letter_sgf(self.x), letter_sgf(self.y))
    }
}

fn sgf_letter(b: u8) -> Option<usize> {
    match b {
        b'a'..=b'z' => Some((b - b'a') as usize),
        b'A'..=b'Z' => Some((b - b'A') as usize + 26),
        _ => None,
    }
}

fn letter_sgf(i: usize) -> char {
    if i < 26 {
        (b'a' + i as u8) as char
    } else {
        (b'A' + (i - 26) as u8) as char
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Stones captured, indexed by the color that did the capturing.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Captures {
    pub black: usize,
    pub white: usize,
}

impl Captures {
    pub fn get(&self, color: Color) -> usize {
        match color {
            Color::Black => self.black,
            Color::White => self.white,
        }
    }

    pub(crate) fn add(&mut self, color: Color, count: usize) {
        match color {
            Color::Black => self.black += count,
            Color::White => self.white += count,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Option<Color>>,
    captures: Captures,
}

impl Board {
    /// Create an empty board.
    ///
    /// # Panics
    /// If `size` is outside `MIN_BOARD_SIZE..=MAX_BOARD_SIZE`; use
    /// [`Board::with_size`] for sizes that come from input.
    pub fn new(size: usize) -> Self {
        match Self::with_size(size) {
            Ok(board) => board,
            Err(e) => panic!("{e}"),
        }
    }

    pub fn with_size(size: usize) -> Result<Self> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return Err(Error::BoardSize { size });
        }
        Ok(Self {
            size,
            cells: vec![None; size * size],
            captures: Captures::default(),
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, pt: Point) -> bool {
        pt.x < self.size && pt.y < self.size
    }

    pub(crate) fn idx(&self, pt: Point) -> usize {
        pt.y * self.size + pt.x
    }

    /// Stone at `pt`, or `None` for an empty or off-board point.
    pub fn get(&self, pt: Point) -> Option<Color> {
        if !self.contains(pt) {
            return None;
        }
        self.cells[self.idx(pt)]
    }

    /// Write (or clear, with `None`) a point. Off-board writes are ignored.
    pub fn set(&mut self, pt: Point, stone: Option<Color>) {
        if self.contains(pt) {
            let i = self.idx(pt);
            self.cells[i] = stone;
        }
    }

    pub fn captures(&self) -> Captures {
        self.captures
    }

    pub(crate) fn add_captures(&mut self, color: Color, count: usize) {
        self.captures.add(color, count);
    }

    /// Remove every stone and reset the capture counters.
    pub fn clear(&mut self) {
        self.cells.fill(None);
        self.captures = Captures::default();
    }

    /// Number of stones of `color` on the board.
    pub fn count(&self, color: Color) -> usize {
        self.cells.iter().filter(|c| **c == Some(color)).count()
    }

    /// Iterate over every occupied point.
    pub fn stones(&self) -> impl Iterator<Item = (Point, Color)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, c)| c.map(|c| (Point::new(i % size, i / size), c)))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.size {
            for x in 0..self.size {
                let ch = match self.get(Point::new(x, y)) {
                    Some(Color::Black) => 'X',
                    Some(Color::White) => 'O',
                    None => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
