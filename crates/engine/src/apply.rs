use pcfind_core::{Field, Placement};

/// Apply a placement to a field and return the resulting field and lines cleared.
/// The input field is left untouched.
pub fn apply_placement(field: &Field, placement: &Placement) -> (Field, usize) {
    let mut next = field.clone();
    let lines = apply_placement_mut(&mut next, placement);
    (next, lines)
}

/// Apply placement in-place, returns lines cleared.
/// The placement must fit; candidate generation guarantees that.
#[inline]
pub fn apply_placement_mut(field: &mut Field, placement: &Placement) -> usize {
    field.stamp(placement.piece, placement.rotation, placement.x, placement.y);
    field.clear_full_rows()
}
