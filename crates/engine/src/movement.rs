//! Kicked rotation. Shifts and soft drop read the searcher's spaceable volume.

use crate::kicks::get_kicks;
use pcfind_core::{Field, Piece, Rotation};

/// Result of a rotation attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RotationResult {
    pub new_rotation: Rotation,
    pub new_x: i32,
    pub new_y: i32,
    pub kick_index: usize,
}

/// Try to rotate a piece a quarter turn.
/// The first kick whose destination is free wins; later kicks are never
/// considered even if they would also fit.
pub fn try_rotate(
    field: &Field,
    piece: Piece,
    rotation: Rotation,
    x: i32,
    y: i32,
    clockwise: bool,
) -> Option<RotationResult> {
    let new_rotation = if clockwise {
        rotation.cw()
    } else {
        rotation.ccw()
    };

    let kicks = get_kicks(piece, rotation, new_rotation);
    kicks
        .as_slice()
        .iter()
        .enumerate()
        .find_map(|(i, &(dx, dy))| {
            let nx = x + dx as i32;
            let ny = y + dy as i32;
            field
                .can_place(piece, new_rotation, nx, ny)
                .then_some(RotationResult {
                    new_rotation,
                    new_x: nx,
                    new_y: ny,
                    kick_index: i,
                })
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_rotation() {
        let field = Field::standard();
        let r = try_rotate(&field, Piece::T, Rotation::North, 4, 5, true).unwrap();
        assert_eq!(r.new_rotation, Rotation::East);
        assert_eq!((r.new_x, r.new_y), (4, 5));
        assert_eq!(r.kick_index, 0); // No kick needed
    }

    #[test]
    fn test_wall_kick() {
        let field = Field::standard();
        // I vertical against the left wall has to kick out to turn flat
        let r = try_rotate(&field, Piece::I, Rotation::East, 0, 5, false).unwrap();
        assert_eq!(r.new_rotation, Rotation::North);
        assert!(r.kick_index > 0);
        assert!(field.can_place(Piece::I, r.new_rotation, r.new_x, r.new_y));
    }

    #[test]
    fn test_o_rotation_keeps_cells() {
        let field = Field::standard();
        let r = try_rotate(&field, Piece::O, Rotation::North, 4, 0, true).unwrap();
        let mut before: Vec<_> = Piece::O
            .cells(Rotation::North)
            .iter()
            .map(|&(dx, dy)| (4 + dx as i32, dy as i32))
            .collect();
        let mut after: Vec<_> = Piece::O
            .cells(r.new_rotation)
            .iter()
            .map(|&(dx, dy)| (r.new_x + dx as i32, r.new_y + dy as i32))
            .collect();
        before.sort();
        after.sort();
        assert_eq!(before, after);
    }

    #[test]
    fn test_first_fit_kick() {
        // Floor blocks the in-place test; the T drops into the first kick that fits.
        let field = Field::standard();
        let r = try_rotate(&field, Piece::T, Rotation::North, 4, 0, true).unwrap();
        assert_eq!(r.new_rotation, Rotation::East);
        assert_eq!((r.new_x, r.new_y), (3, 1));
        assert_eq!(r.kick_index, 2);
    }

    #[test]
    fn test_rotation_blocked() {
        let mut field = Field::standard();
        for y in 0..field.height() {
            for x in 0..field.width() {
                if !(3..=6).contains(&x) || y != 0 {
                    field.set_cell(x, y, pcfind_core::Cell::Garbage);
                }
            }
        }
        // An I lying in a one-row tunnel cannot turn at all
        assert!(field.can_place(Piece::I, Rotation::North, 4, 0));
        assert_eq!(try_rotate(&field, Piece::I, Rotation::North, 4, 0, true), None);
        assert_eq!(try_rotate(&field, Piece::I, Rotation::North, 4, 0, false), None);
    }
}
