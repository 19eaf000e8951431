//! pcfind-engine - placement legality for a single piece.
//!
//! Provides SRS kicks, movement, the lock searcher and canonical candidate
//! enumeration with a memo table.

pub mod apply;
pub mod canonical;
pub mod candidates;
pub mod config;
mod error;
pub mod kicks;
pub mod movement;
pub mod searcher;

pub use apply::{apply_placement, apply_placement_mut};
pub use canonical::Canonicalizer;
pub use candidates::{all_candidates, canonical_candidates, CacheStats, CandidateCache};
pub use config::SearchConfig;
pub use error::EngineError;
pub use kicks::get_kicks;
pub use movement::{try_rotate, RotationResult};
pub use searcher::LockSearcher;

use pcfind_core::{Field, Piece, Rotation};

/// Reachable pivots of `piece` that keep it below `max_row`, in the frame of
/// [`canonical_rotation_for`]`(piece, rotation)`. Every rotation of a
/// symmetry class returns the same set.
pub fn reachable_placements(
    field: &Field,
    piece: Piece,
    rotation: Rotation,
    max_row: usize,
) -> Result<Vec<(i32, i32)>, EngineError> {
    let canonicalizer = Canonicalizer::default();
    let canonical = canonicalizer.canonical_rotation(piece, rotation);
    let mut searcher = LockSearcher::new(field, piece, max_row)?;
    Ok(canonical_candidates(
        &mut searcher,
        &canonicalizer,
        canonical,
        max_row,
    ))
}

/// Rotation whose candidates stand in for `rotation`, using the default
/// canonical choices.
pub fn canonical_rotation_for(piece: Piece, rotation: Rotation) -> Rotation {
    Canonicalizer::default().canonical_rotation(piece, rotation)
}
