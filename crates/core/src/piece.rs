//! Piece types, rotation states and mino offsets.

use serde::{Deserialize, Serialize};

use crate::CoreError;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Serialize, Deserialize)]
pub enum Piece {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

/// Rotation state. `East` is one clockwise turn from spawn.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Default, Serialize, Deserialize,
)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    pub fn cw(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
        }
    }

    pub fn ccw(self) -> Self {
        match self {
            Self::North => Self::West,
            Self::West => Self::South,
            Self::South => Self::East,
            Self::East => Self::North,
        }
    }

    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Spawn orientation offsets, y pointing up. The pivot `(0, 0)` is always
/// one of the minos, in every rotation.
const SPAWN_CELLS: [[(i8, i8); 4]; 7] = [
    [(-1, 0), (0, 0), (1, 0), (2, 0)], // I
    [(0, 0), (1, 0), (0, 1), (1, 1)],  // O
    [(0, 0), (1, 0), (-1, 0), (0, 1)], // T
    [(0, 0), (-1, 0), (0, 1), (1, 1)], // S
    [(0, 0), (1, 0), (0, 1), (-1, 1)], // Z
    [(0, 0), (1, 0), (-1, 0), (-1, 1)], // J
    [(0, 0), (-1, 0), (1, 0), (1, 1)], // L
];

/// CELLS[piece][rotation]: spawn cells turned clockwise `rotation` times.
const CELLS: [[[(i8, i8); 4]; 4]; 7] = {
    let mut table = [[[(0i8, 0i8); 4]; 4]; 7];
    let mut piece = 0;
    while piece < 7 {
        let mut cells = SPAWN_CELLS[piece];
        let mut rot = 0;
        while rot < 4 {
            table[piece][rot] = cells;
            let mut i = 0;
            while i < 4 {
                cells[i] = rotate_cw(cells[i]);
                i += 1;
            }
            rot += 1;
        }
        piece += 1;
    }
    table
};

/// Clockwise quarter turn of a relative offset.
#[inline(always)]
pub const fn rotate_cw((x, y): (i8, i8)) -> (i8, i8) {
    (y, -x)
}

/// Counter-clockwise quarter turn of a relative offset.
#[inline(always)]
pub const fn rotate_ccw((x, y): (i8, i8)) -> (i8, i8) {
    (-y, x)
}

impl Piece {
    pub const ALL: [Piece; 7] = [
        Piece::I,
        Piece::O,
        Piece::T,
        Piece::S,
        Piece::Z,
        Piece::J,
        Piece::L,
    ];

    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Get mino offsets for this piece at given rotation.
    /// Returns 4 (x, y) offsets relative to the pivot.
    #[inline(always)]
    pub fn cells(self, rot: Rotation) -> [(i8, i8); 4] {
        CELLS[self.index()][rot.index()]
    }

    pub fn name(self) -> char {
        match self {
            Piece::I => 'I',
            Piece::O => 'O',
            Piece::T => 'T',
            Piece::S => 'S',
            Piece::Z => 'Z',
            Piece::J => 'J',
            Piece::L => 'L',
        }
    }

    pub fn from_char(c: char) -> Result<Self, CoreError> {
        match c.to_ascii_uppercase() {
            'I' => Ok(Piece::I),
            'O' => Ok(Piece::O),
            'T' => Ok(Piece::T),
            'S' => Ok(Piece::S),
            'Z' => Ok(Piece::Z),
            'J' => Ok(Piece::J),
            'L' => Ok(Piece::L),
            _ => Err(CoreError::UnknownPiece(c)),
        }
    }

    /// Parse a queue such as `"TJI"`. Whitespace is ignored.
    pub fn parse_queue(queue: &str) -> Result<Vec<Piece>, CoreError> {
        queue
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(Piece::from_char)
            .collect()
    }
}

/// A piece in a particular rotation together with its bounding box.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Shape {
    piece: Piece,
    rotation: Rotation,
    cells: [(i8, i8); 4],
    min_x: i8,
    max_x: i8,
    min_y: i8,
    max_y: i8,
}

impl Shape {
    pub fn new(piece: Piece, rotation: Rotation) -> Self {
        Self::from_cells(piece, rotation, piece.cells(rotation))
    }

    fn from_cells(piece: Piece, rotation: Rotation, cells: [(i8, i8); 4]) -> Self {
        let mut shape = Self {
            piece,
            rotation,
            cells,
            min_x: 0,
            max_x: 0,
            min_y: 0,
            max_y: 0,
        };
        shape.refresh_bounds();
        shape
    }

    fn refresh_bounds(&mut self) {
        let xs = self.cells.map(|(x, _)| x);
        let ys = self.cells.map(|(_, y)| y);
        self.min_x = xs.into_iter().min().unwrap_or(0);
        self.max_x = xs.into_iter().max().unwrap_or(0);
        self.min_y = ys.into_iter().min().unwrap_or(0);
        self.max_y = ys.into_iter().max().unwrap_or(0);
    }

    pub fn rotate_cw(&mut self) {
        self.cells = self.cells.map(rotate_cw);
        self.rotation = self.rotation.cw();
        self.refresh_bounds();
    }

    pub fn rotate_ccw(&mut self) {
        self.cells = self.cells.map(rotate_ccw);
        self.rotation = self.rotation.ccw();
        self.refresh_bounds();
    }

    #[inline(always)]
    pub fn piece(&self) -> Piece {
        self.piece
    }

    #[inline(always)]
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    #[inline(always)]
    pub fn cells(&self) -> &[(i8, i8); 4] {
        &self.cells
    }

    pub fn min_x(&self) -> i8 {
        self.min_x
    }

    pub fn max_x(&self) -> i8 {
        self.max_x
    }

    pub fn min_y(&self) -> i8 {
        self.min_y
    }

    pub fn max_y(&self) -> i8 {
        self.max_y
    }
}
