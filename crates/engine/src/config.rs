//! Tunables shared by the searcher and the solver.

use pcfind_core::Field;

/// Where pieces enter the field and how tall a perfect clear may be.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Pivot position of a freshly spawned piece, in `Rotation::North`.
    pub spawn: (i32, i32),
    /// Rows a perfect clear may use when the caller does not say otherwise.
    pub max_clear_rows: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            spawn: (4, 20),
            max_clear_rows: 4,
        }
    }
}

impl SearchConfig {
    pub fn with_spawn(mut self, x: i32, y: i32) -> Self {
        self.spawn = (x, y);
        self
    }

    pub fn with_max_clear_rows(mut self, rows: usize) -> Self {
        self.max_clear_rows = rows;
        self
    }

    /// Does the spawn point lie inside `field`?
    pub fn spawn_fits(&self, field: &Field) -> bool {
        let (x, y) = self.spawn;
        x >= 0 && y >= 0 && (x as usize) < field.width() && (y as usize) < field.height()
    }
}
