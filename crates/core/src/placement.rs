//! Final resting position of a piece.

use crate::{Piece, Rotation};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Serialize, Deserialize)]
pub struct Placement {
    pub piece: Piece,
    pub rotation: Rotation,
    pub x: i32,
    pub y: i32,
}

impl Placement {
    pub fn new(piece: Piece, rotation: Rotation, x: i32, y: i32) -> Self {
        Self {
            piece,
            rotation,
            x,
            y,
        }
    }

    /// Absolute cells covered by the piece.
    pub fn cells(&self) -> [(i32, i32); 4] {
        self.piece
            .cells(self.rotation)
            .map(|(dx, dy)| (self.x + dx as i32, self.y + dy as i32))
    }

    /// Highest row the piece occupies.
    pub fn top(&self) -> i32 {
        self.cells().iter().map(|&(_, y)| y).max().unwrap_or(self.y)
    }
}
