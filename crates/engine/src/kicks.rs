//! SRS kick data, stored as per-rotation offset tables.
//! The kick list for `from -> to` is `offset[from][i] - offset[to][i]`,
//! tried in table order.

use pcfind_core::{Piece, Rotation};

/// Longest kick list of any piece.
pub const MAX_KICKS: usize = 5;

/// Shared by J, L, S, T and Z.
static JLSTZ_OFFSETS: [[(i8, i8); 5]; 4] = [
    [(0, 0), (0, 0), (0, 0), (0, 0), (0, 0)],   // North
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],  // East
    [(0, 0), (0, 0), (0, 0), (0, 0), (0, 0)],   // South
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)], // West
];

static I_OFFSETS: [[(i8, i8); 5]; 4] = [
    [(0, 0), (-1, 0), (2, 0), (-1, 0), (2, 0)],  // North
    [(-1, 0), (0, 0), (0, 0), (0, 1), (0, -2)],  // East
    [(-1, 1), (1, 1), (-2, 1), (1, 0), (-2, 0)], // South
    [(0, 1), (0, 1), (0, 1), (0, -1), (0, 2)],   // West
];

/// O only re-centres itself, its cells rotate around a corner.
static O_OFFSETS: [[(i8, i8); 1]; 4] = [
    [(0, 0)],   // North
    [(0, -1)],  // East
    [(-1, -1)], // South
    [(-1, 0)],  // West
];

/// Offsets for one piece in one rotation state.
fn offsets(piece: Piece, rotation: Rotation) -> &'static [(i8, i8)] {
    let idx = rotation.index();
    match piece {
        Piece::I => &I_OFFSETS[idx],
        Piece::O => &O_OFFSETS[idx],
        _ => &JLSTZ_OFFSETS[idx],
    }
}

/// Fixed-capacity list of (dx, dy) kick translations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Kicks {
    len: usize,
    kicks: [(i8, i8); MAX_KICKS],
}

impl Kicks {
    pub fn as_slice(&self) -> &[(i8, i8)] {
        &self.kicks[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Get kick offsets for a rotation transition.
/// The first entry is the in-place test (possibly shifted for I and O).
pub fn get_kicks(piece: Piece, from: Rotation, to: Rotation) -> Kicks {
    let from_offsets = offsets(piece, from);
    let to_offsets = offsets(piece, to);
    let mut kicks = [(0i8, 0i8); MAX_KICKS];
    for (i, (a, b)) in from_offsets.iter().zip(to_offsets).enumerate() {
        kicks[i] = (a.0 - b.0, a.1 - b.1);
    }
    Kicks {
        len: from_offsets.len(),
        kicks,
    }
}
