//! Rotation canonicalization for symmetric pieces.
//!
//! S, Z and I look the same in North and South, and in East and West, up to a
//! translation. O looks the same in all four rotations. For those pieces one
//! rotation per class is declared canonical and the others are folded into it
//! by a fixed offset, so reachability only has to be reported once per class.
//! T, J and L have no symmetry; every rotation is its own canonical form.

use std::iter;

use pcfind_core::{Piece, Placement, Rotation};
use tracing::debug;

use crate::EngineError;

const NORTH_SOUTH: [Rotation; 2] = [Rotation::North, Rotation::South];
const EAST_WEST: [Rotation; 2] = [Rotation::East, Rotation::West];

/// Rotations whose cell sets are translates of `rotation`'s, including itself.
pub fn symmetry_class(piece: Piece, rotation: Rotation) -> &'static [Rotation] {
    match piece {
        Piece::O => &Rotation::ALL,
        Piece::S | Piece::Z | Piece::I => match rotation {
            Rotation::North | Rotation::South => &NORTH_SOUTH,
            Rotation::East | Rotation::West => &EAST_WEST,
        },
        Piece::T => match rotation {
            Rotation::North => &[Rotation::North],
            Rotation::East => &[Rotation::East],
            Rotation::South => &[Rotation::South],
            Rotation::West => &[Rotation::West],
        },
        Piece::J | Piece::L => symmetry_class(Piece::T, rotation),
    }
}

/// Translation of `rotation`'s cells relative to the first member of its class:
/// `cells(rotation) == cells(reference) + shift(rotation)`.
fn class_shift(piece: Piece, rotation: Rotation) -> (i8, i8) {
    match (piece, rotation) {
        (Piece::S | Piece::Z, Rotation::South) => (0, -1),
        (Piece::S | Piece::Z, Rotation::West) => (-1, 0),
        (Piece::I, Rotation::South) => (-1, 0),
        (Piece::I, Rotation::West) => (0, 1),
        (Piece::O, Rotation::East) => (0, -1),
        (Piece::O, Rotation::South) => (-1, -1),
        (Piece::O, Rotation::West) => (-1, 0),
        _ => (0, 0),
    }
}

/// Maps every rotation of every piece to the rotation whose search results
/// are authoritative for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canonicalizer {
    // [piece][rotation] -> canonical rotation
    canonical: [[Rotation; 4]; 7],
}

impl Default for Canonicalizer {
    /// S: North and West. Z: North and East. I: North and West. O: North.
    fn default() -> Self {
        let mut canonical = [Rotation::ALL; 7];
        let defaults = [
            (Piece::S, Rotation::West),
            (Piece::Z, Rotation::East),
            (Piece::I, Rotation::West),
        ];
        for piece in [Piece::S, Piece::Z, Piece::I, Piece::O] {
            for rotation in Rotation::ALL {
                canonical[piece.index()][rotation.index()] =
                    symmetry_class(piece, rotation)[0];
            }
        }
        for (piece, rotation) in defaults {
            for &member in symmetry_class(piece, rotation) {
                canonical[piece.index()][member.index()] = rotation;
            }
        }
        Self { canonical }
    }
}

impl Canonicalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose which rotation of `rotation`'s class is reported.
    /// Only changes the frame candidates are expressed in, never which cells
    /// are reachable.
    pub fn set_canonical(&mut self, piece: Piece, rotation: Rotation) -> Result<(), EngineError> {
        let class = symmetry_class(piece, rotation);
        if class.len() == 1 {
            return Err(EngineError::NoSymmetry(piece));
        }
        for &member in class {
            self.canonical[piece.index()][member.index()] = rotation;
        }
        debug!(?piece, ?rotation, "canonical rotation reconfigured");
        Ok(())
    }

    /// Builder form of [`Canonicalizer::set_canonical`].
    pub fn with_canonical(mut self, piece: Piece, rotation: Rotation) -> Result<Self, EngineError> {
        self.set_canonical(piece, rotation)?;
        Ok(self)
    }

    /// Identity for T, J and L.
    #[inline]
    pub fn canonical_rotation(&self, piece: Piece, rotation: Rotation) -> Rotation {
        self.canonical[piece.index()][rotation.index()]
    }

    /// True when `rotation` is served by another rotation's results.
    #[inline]
    pub fn is_folded(&self, piece: Piece, rotation: Rotation) -> bool {
        self.canonical_rotation(piece, rotation) != rotation
    }

    /// Every rotation sharing `rotation`'s canonical form, canonical first.
    pub fn equivalent_rotations(
        &self,
        piece: Piece,
        rotation: Rotation,
    ) -> impl Iterator<Item = Rotation> + 'static {
        let canonical = self.canonical_rotation(piece, rotation);
        iter::once(canonical).chain(
            symmetry_class(piece, rotation)
                .iter()
                .copied()
                .filter(move |&r| r != canonical),
        )
    }

    /// Offset that moves a pivot in `rotation`'s frame onto the pivot covering
    /// the same cells in the canonical frame.
    pub fn fold_offset(&self, piece: Piece, rotation: Rotation) -> (i8, i8) {
        let canonical = self.canonical_rotation(piece, rotation);
        let (fx, fy) = class_shift(piece, rotation);
        let (tx, ty) = class_shift(piece, canonical);
        (fx - tx, fy - ty)
    }

    /// Translate positions expressed in `rotation`'s frame into the canonical frame.
    pub fn to_canonical_offsets(
        &self,
        piece: Piece,
        rotation: Rotation,
        positions: &[(i32, i32)],
    ) -> Vec<(i32, i32)> {
        let (dx, dy) = self.fold_offset(piece, rotation);
        positions
            .iter()
            .map(|&(x, y)| (x + dx as i32, y + dy as i32))
            .collect()
    }

    /// Same placement, canonical rotation.
    pub fn to_canonical(&self, placement: Placement) -> Placement {
        let (dx, dy) = self.fold_offset(placement.piece, placement.rotation);
        Placement {
            rotation: self.canonical_rotation(placement.piece, placement.rotation),
            x: placement.x + dx as i32,
            y: placement.y + dy as i32,
            ..placement
        }
    }
}
