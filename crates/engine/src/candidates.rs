//! Candidate placements in canonical form, and a memo table over them.

use std::collections::hash_map::Entry;

use pcfind_core::{Field, Fingerprint, Piece, Placement, Rotation, Shape};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::trace;

use crate::canonical::Canonicalizer;
use crate::config::SearchConfig;
use crate::searcher::LockSearcher;
use crate::EngineError;

/// Reachable pivots for `rotation` expressed in its own (canonical) frame,
/// merged over every rotation that folds into it. The piece must stay below
/// `max_row`. A folded rotation yields nothing; ask for its canonical one.
pub fn canonical_candidates(
    searcher: &mut LockSearcher<'_>,
    canonicalizer: &Canonicalizer,
    rotation: Rotation,
    max_row: usize,
) -> Vec<(i32, i32)> {
    let piece = searcher.piece();
    if canonicalizer.is_folded(piece, rotation) {
        return Vec::new();
    }

    let top = Shape::new(piece, rotation).max_y() as i32;
    let mut seen = FxHashSet::default();
    let mut found = Vec::new();
    for equivalent in canonicalizer.equivalent_rotations(piece, rotation) {
        let positions = searcher.search(equivalent);
        for pos in canonicalizer.to_canonical_offsets(piece, equivalent, &positions) {
            if pos.1 + top < max_row as i32 && seen.insert(pos) {
                found.push(pos);
            }
        }
    }
    found
}

/// Every distinct reachable placement of `piece` below `max_row`.
pub fn all_candidates(
    field: &Field,
    piece: Piece,
    max_row: usize,
    canonicalizer: &Canonicalizer,
    config: &SearchConfig,
) -> Result<Vec<Placement>, EngineError> {
    let mut searcher = LockSearcher::with_config(field, piece, max_row, config)?;
    let mut placements = Vec::new();
    for rotation in Rotation::ALL {
        for (x, y) in canonical_candidates(&mut searcher, canonicalizer, rotation, max_row) {
            placements.push(Placement::new(piece, rotation, x, y));
        }
    }
    Ok(placements)
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
struct CacheKey {
    fingerprint: Fingerprint,
    width: usize,
    piece: Piece,
    max_row: usize,
}

/// Hit/miss counters for a [`CandidateCache`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Memoized [`all_candidates`] keyed by the occupancy of the whole field.
/// Rows above the bound still decide what is reachable from spawn, so they
/// are part of the key.
pub struct CandidateCache {
    entries: FxHashMap<CacheKey, Vec<Placement>>,
    canonicalizer: Canonicalizer,
    config: SearchConfig,
    stats: CacheStats,
}

impl Default for CandidateCache {
    fn default() -> Self {
        Self::new(Canonicalizer::default(), SearchConfig::default())
    }
}

impl CandidateCache {
    pub fn new(canonicalizer: Canonicalizer, config: SearchConfig) -> Self {
        Self {
            entries: FxHashMap::default(),
            canonicalizer,
            config,
            stats: CacheStats::default(),
        }
    }

    /// Candidates for `piece` on `field`, searching only on a miss.
    pub fn candidates(
        &mut self,
        field: &Field,
        piece: Piece,
        max_row: usize,
    ) -> Result<&[Placement], EngineError> {
        let key = CacheKey {
            fingerprint: field.fingerprint(field.height()),
            width: field.width(),
            piece,
            max_row,
        };
        match self.entries.entry(key) {
            Entry::Occupied(entry) => {
                self.stats.hits += 1;
                Ok(entry.into_mut().as_slice())
            }
            Entry::Vacant(entry) => {
                self.stats.misses += 1;
                let found = all_candidates(field, piece, max_row, &self.canonicalizer, &self.config)?;
                trace!(?piece, max_row, count = found.len(), "candidate cache miss");
                Ok(entry.insert(found).as_slice())
            }
        }
    }

    pub fn canonicalizer(&self) -> &Canonicalizer {
        &self.canonicalizer
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry and reset the counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats = CacheStats::default();
    }
}
