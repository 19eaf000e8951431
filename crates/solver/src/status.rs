//! Perfect-clear indicator for a game in progress.
//!
//! Decides from the cell count and the visible queue whether a search is
//! worth running at all, then folds the search result into a status.

use pcfind_core::GameState;
pub use pcfind_core::perfect_clear_height;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Outcome, PerfectSolver, SearchOptions, SolverError};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum PerfectStatus {
    /// A perfect clear is possible with the known pieces.
    Found,
    /// No perfect clear is possible with the known pieces.
    NotFound,
    /// Not possible with the pieces shown so far, but exactly one more piece
    /// is needed and it is not visible yet.
    NotFoundYet,
    /// The cell count or the queue length rules out a meaningful search.
    Skipped,
    /// The search ran out of node budget.
    Inconclusive,
}

/// Classify `state` against the next perfect-clear boundary.
pub fn classify(
    solver: &mut PerfectSolver,
    state: &GameState,
    max_nodes: Option<u64>,
) -> Result<PerfectStatus, SolverError> {
    let Some(current) = state.current_piece else {
        return Ok(PerfectStatus::Skipped);
    };

    let max_row = state.perfect_clear_height();
    let left = state.field.empty_cells_below(max_row);
    if left == 0 || left % 4 != 0 {
        return Ok(PerfectStatus::Skipped);
    }

    let visible = state.queue.len();
    // one piece short, but the hold slot makes up for the unseen one
    let waiting_on_next = left == 4 * (visible + 2) && state.hold.is_some();
    if left > 4 * (visible + 1) && !waiting_on_next {
        return Ok(PerfectStatus::Skipped);
    }

    let order: Vec<_> = std::iter::once(current)
        .chain(state.queue.iter().copied())
        .collect();
    let options = SearchOptions {
        max_placements: Some(left / 4),
        max_clear_rows: Some(max_row),
        hold_used: state.hold_used_this_turn,
        max_nodes,
    };

    let status = match solver.solve(&state.field, &order, state.hold, options)? {
        Outcome::Found(_) => PerfectStatus::Found,
        Outcome::Inconclusive => PerfectStatus::Inconclusive,
        Outcome::NotFound if waiting_on_next => PerfectStatus::NotFoundYet,
        Outcome::NotFound => PerfectStatus::NotFound,
    };
    debug!(left, max_row, visible, ?status, "perfect clear classified");
    Ok(status)
}
