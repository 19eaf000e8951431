//! Snapshot of what the solver needs to know about a game in progress.

use crate::{Field, Piece};

#[derive(Clone, PartialEq, Debug)]
pub struct GameState {
    pub field: Field,
    pub current_piece: Option<Piece>,
    pub hold: Option<Piece>,
    pub hold_used_this_turn: bool,
    /// Visible next pieces, not including the current one.
    pub queue: Vec<Piece>,
    pub lines_cleared: u32,
    /// Set after a perfect clear that left the line count at 2 mod 4, so the
    /// next perfect clear is measured on a two-line boundary.
    pub two_line_mode: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            field: Field::standard(),
            current_piece: None,
            hold: None,
            hold_used_this_turn: false,
            queue: Vec::new(),
            lines_cleared: 0,
            two_line_mode: false,
        }
    }
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_queue(queue: Vec<Piece>) -> Self {
        let current = queue.first().copied();
        Self {
            queue: if queue.is_empty() {
                queue
            } else {
                queue[1..].to_vec()
            },
            current_piece: current,
            ..Self::default()
        }
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.field = field;
        self
    }

    /// Current piece followed by the visible queue.
    pub fn order(&self) -> Vec<Piece> {
        self.current_piece
            .into_iter()
            .chain(self.queue.iter().copied())
            .collect()
    }

    /// Row bound a perfect clear has to be completed under.
    pub fn perfect_clear_height(&self) -> usize {
        perfect_clear_height(self.lines_cleared, self.two_line_mode)
    }
}

/// Rows left until the next perfect clear boundary, given the lines cleared so
/// far. In two-line mode the boundary is shifted by two rows.
pub fn perfect_clear_height(lines_cleared: u32, two_line_mode: bool) -> usize {
    let offset = if two_line_mode { 2 } else { 0 };
    4 - ((lines_cleared as usize + offset) % 4)
}
