//! field representation - row-major cell grid plus one occupancy bitmask per row
//! the bitmasks are kept in sync on every write and back all legality queries

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{CoreError, Piece, Rotation};

/// What occupies a single field cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Block(Piece),
    Garbage,
}

impl Cell {
    #[inline(always)]
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn from_char(c: char) -> Result<Self, CoreError> {
        match c {
            '.' | '_' | ' ' => Ok(Cell::Empty),
            'X' | 'x' | 'G' | 'g' | '#' => Ok(Cell::Garbage),
            other => Piece::from_char(other)
                .map(Cell::Block)
                .map_err(|_| CoreError::UnknownCell(other)),
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Block(piece) => piece.name(),
            Cell::Garbage => 'X',
        }
    }
}

/// Exact occupancy of the bottom rows of a field, one bitmask per row.
/// Occupant categories are ignored, so two fields that differ only in
/// colour share a fingerprint.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Default)]
pub struct Fingerprint(SmallVec<[u64; 8]>);

impl Fingerprint {
    pub fn rows(&self) -> &[u64] {
        &self.0
    }
}

/// Playing field, `height` rows by `width` columns.
/// Row 0 is the bottom row. Width is limited to 64 so a row fits a u64 mask.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct Field {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    rows: Vec<u64>,
}

impl Field {
    pub const STANDARD_WIDTH: usize = 10;
    pub const STANDARD_HEIGHT: usize = 23;
    pub const MAX_WIDTH: usize = 64;

    pub fn new(height: usize, width: usize) -> Result<Self, CoreError> {
        if width == 0 || width > Self::MAX_WIDTH || height == 0 {
            return Err(CoreError::InvalidDimensions { height, width });
        }
        Ok(Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
            rows: vec![0; height],
        })
    }

    /// The 23 x 10 field the game plays on.
    pub fn standard() -> Self {
        Self {
            width: Self::STANDARD_WIDTH,
            height: Self::STANDARD_HEIGHT,
            cells: vec![Cell::Empty; Self::STANDARD_WIDTH * Self::STANDARD_HEIGHT],
            rows: vec![0; Self::STANDARD_HEIGHT],
        }
    }

    /// Build a field from text rows listed top to bottom; the last row is row 0.
    pub fn from_pattern(height: usize, width: usize, pattern: &[&str]) -> Result<Self, CoreError> {
        let mut field = Self::new(height, width)?;
        if pattern.len() > height {
            return Err(CoreError::PatternHeight {
                rows: pattern.len(),
                height,
            });
        }
        for (index, line) in pattern.iter().enumerate() {
            let y = pattern.len() - index - 1;
            let found = line.chars().count();
            if found != width {
                return Err(CoreError::PatternWidth {
                    row: index,
                    found,
                    expected: width,
                });
            }
            for (x, c) in line.chars().enumerate() {
                field.set_cell(x, y, Cell::from_char(c)?);
            }
        }
        Ok(field)
    }

    #[inline(always)]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline(always)]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline(always)]
    fn full_mask(&self) -> u64 {
        if self.width == 64 {
            !0
        } else {
            (1u64 << self.width) - 1
        }
    }

    /// # Panics
    /// If `(x, y)` lies outside the field.
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.cells[y * self.width + x]
    }

    /// Keeps the row mask in sync with the cell.
    ///
    /// # Panics
    /// If `(x, y)` lies outside the field.
    pub fn set_cell(&mut self, x: usize, y: usize, cell: Cell) {
        self.cells[y * self.width + x] = cell;
        if cell.is_empty() {
            self.rows[y] &= !(1u64 << x);
        } else {
            self.rows[y] |= 1u64 << x;
        }
    }

    /// Is (x, y) blocked? Anything outside the field counts as blocked.
    #[inline(always)]
    pub fn is_filled(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return true;
        }
        (self.rows[y as usize] >> x) & 1 == 1
    }

    pub fn is_row_empty(&self, y: usize) -> bool {
        self.rows[y] == 0
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        self.rows[y] == self.full_mask()
    }

    /// True when every cell of the field is empty.
    pub fn is_perfect(&self) -> bool {
        self.rows.iter().all(|&row| row == 0)
    }

    /// Number of rows up to and including the highest occupied one.
    pub fn stack_height(&self) -> usize {
        self.rows
            .iter()
            .rposition(|&row| row != 0)
            .map_or(0, |y| y + 1)
    }

    pub fn filled_count(&self) -> usize {
        self.rows.iter().map(|row| row.count_ones() as usize).sum()
    }

    /// Empty cells in rows `0..row` (clamped to the field height).
    pub fn empty_cells_below(&self, row: usize) -> usize {
        let row = row.min(self.height);
        let filled: usize = self.rows[..row]
            .iter()
            .map(|r| r.count_ones() as usize)
            .sum();
        row * self.width - filled
    }

    /// Are all four cells of the piece inside the field and empty?
    #[inline]
    pub fn can_place(&self, piece: Piece, rotation: Rotation, x: i32, y: i32) -> bool {
        piece
            .cells(rotation)
            .iter()
            .all(|&(dx, dy)| !self.is_filled(x + dx as i32, y + dy as i32))
    }

    /// Write the piece into the grid. Callers must have checked `can_place`.
    pub fn stamp(&mut self, piece: Piece, rotation: Rotation, x: i32, y: i32) {
        debug_assert!(self.can_place(piece, rotation, x, y));
        for (dx, dy) in piece.cells(rotation) {
            let cx = (x + dx as i32) as usize;
            let cy = (y + dy as i32) as usize;
            self.set_cell(cx, cy, Cell::Block(piece));
        }
    }

    /// Remove full rows, shift the rest down and refill the top.
    /// Returns the number of rows removed.
    pub fn clear_full_rows(&mut self) -> usize {
        let full = self.full_mask();
        let mut next = 0;
        for y in 0..self.height {
            if self.rows[y] == full {
                continue;
            }
            if next != y {
                self.rows[next] = self.rows[y];
                let src = y * self.width;
                self.cells
                    .copy_within(src..src + self.width, next * self.width);
            }
            next += 1;
        }

        let cleared = self.height - next;
        for y in next..self.height {
            self.rows[y] = 0;
            let start = y * self.width;
            self.cells[start..start + self.width].fill(Cell::Empty);
        }
        cleared
    }

    /// Lowest y the piece reaches dropping straight down from `y`.
    pub fn hard_drop_y(&self, piece: Piece, rotation: Rotation, x: i32, y: i32) -> i32 {
        let mut landing_y = y;
        while self.can_place(piece, rotation, x, landing_y - 1) {
            landing_y -= 1;
        }
        landing_y
    }

    /// Occupancy fingerprint of the bottom `row_limit` rows (clamped to the height).
    pub fn fingerprint(&self, row_limit: usize) -> Fingerprint {
        let limit = row_limit.min(self.height);
        Fingerprint(self.rows[..limit].iter().copied().collect())
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                write!(f, "{}", self.cell(x, y).to_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
