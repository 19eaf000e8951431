//! Lock-position search for one piece on one field.
//!
//! Three volumes are kept per rotation, each indexed `[y * width + x]`:
//! - spaceable: the piece fits there (computed for all rotations up front)
//! - lockable: spaceable and resting on the floor or a block (computed per
//!   rotation on first use, rows below the search bound only)
//! - passible: reached from spawn by shifts, soft drop and kicked rotation
//!   (explored lazily, the work list survives between queries)
//!
//! A placement is reported when it is both lockable and passible.

use pcfind_core::{Field, Piece, Rotation, Shape};
use tracing::trace;

use crate::config::SearchConfig;
use crate::movement::try_rotate;
use crate::EngineError;

/// Reachable lock positions of `piece` on `field`, below `max_row`.
pub struct LockSearcher<'a> {
    field: &'a Field,
    piece: Piece,
    width: usize,
    height: usize,
    max_row: usize,
    spaceable: [Vec<bool>; 4],
    lockable: [Vec<Option<bool>>; 4],
    lockable_scanned: [bool; 4],
    passible: [Vec<bool>; 4],
    pending: Vec<(Rotation, usize, usize)>,
}

impl<'a> LockSearcher<'a> {
    /// Searcher spawning pieces at the default `(4, 20)`.
    pub fn new(field: &'a Field, piece: Piece, max_row: usize) -> Result<Self, EngineError> {
        Self::with_config(field, piece, max_row, &SearchConfig::default())
    }

    pub fn with_config(
        field: &'a Field,
        piece: Piece,
        max_row: usize,
        config: &SearchConfig,
    ) -> Result<Self, EngineError> {
        if !config.spawn_fits(field) {
            let (x, y) = config.spawn;
            return Err(EngineError::SpawnOutOfRange {
                x,
                y,
                width: field.width(),
                height: field.height(),
            });
        }

        let width = field.width();
        let height = field.height();
        let spaceable = Rotation::ALL.map(|rotation| scan_space(field, piece, rotation));

        let (spawn_x, spawn_y) = (config.spawn.0 as usize, config.spawn.1 as usize);
        let mut pending = Vec::with_capacity(64);
        if spaceable[Rotation::North.index()][spawn_y * width + spawn_x] {
            pending.push((Rotation::North, spawn_x, spawn_y));
        }

        trace!(?piece, max_row, spawn = ?config.spawn, "lock searcher built");

        Ok(Self {
            field,
            piece,
            width,
            height,
            max_row: max_row.min(height),
            spaceable,
            lockable: std::array::from_fn(|_| vec![None; width * height]),
            lockable_scanned: [false; 4],
            passible: std::array::from_fn(|_| vec![false; width * height]),
            pending,
        })
    }

    #[inline(always)]
    pub fn piece(&self) -> Piece {
        self.piece
    }

    /// Row bound after clamping to the field height.
    #[inline(always)]
    pub fn max_row(&self) -> usize {
        self.max_row
    }

    /// Lock positions for `rotation` that can be reached from spawn, in scan
    /// order (top row first, left to right).
    pub fn search(&mut self, rotation: Rotation) -> Vec<(i32, i32)> {
        self.scan_lockable(rotation);

        let r = rotation.index();
        let mut found = Vec::new();
        for y in (0..self.max_row).rev() {
            for x in 0..self.width {
                let i = y * self.width + x;
                if self.lockable[r][i] == Some(true) && self.explore_until(rotation, x, y) {
                    found.push((x as i32, y as i32));
                }
            }
        }
        found
    }

    /// Does the piece fit at this pivot?
    pub fn is_spaceable(&self, rotation: Rotation, x: i32, y: i32) -> bool {
        self.slot(x, y)
            .is_some_and(|i| self.spaceable[rotation.index()][i])
    }

    /// Has this pivot been found to rest on something? Only meaningful for
    /// rotations that have been searched.
    pub fn is_lockable(&self, rotation: Rotation, x: i32, y: i32) -> bool {
        self.slot(x, y)
            .is_some_and(|i| self.lockable[rotation.index()][i] == Some(true))
    }

    /// Has this pivot been reached from spawn so far?
    pub fn is_passible(&self, rotation: Rotation, x: i32, y: i32) -> bool {
        self.slot(x, y)
            .is_some_and(|i| self.passible[rotation.index()][i])
    }

    #[inline(always)]
    fn slot(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    fn scan_lockable(&mut self, rotation: Rotation) {
        let r = rotation.index();
        if self.lockable_scanned[r] {
            return;
        }

        let cells = self.piece.cells(rotation);
        // cells directly below the piece that the piece does not cover itself
        let grounds: Vec<(i32, i32)> = cells
            .iter()
            .map(|&(dx, dy)| (dx as i32, dy as i32 - 1))
            .filter(|&(gx, gy)| !cells.contains(&(gx as i8, gy as i8)))
            .collect();

        let width = self.width;
        let height = self.height;
        for y in (0..self.max_row).rev() {
            for x in 0..width {
                let i = y * width + x;
                if self.lockable[r][i].is_some() {
                    continue;
                }
                if !self.spaceable[r][i] {
                    self.lockable[r][i] = Some(false);
                    continue;
                }

                let contact = grounds
                    .iter()
                    .map(|&(gx, gy)| (x as i32 + gx, y as i32 + gy))
                    .find(|&(gx, gy)| gy < 0 || self.field.is_filled(gx, gy));

                let Some((cx, cy)) = contact else {
                    self.lockable[r][i] = Some(false);
                    continue;
                };
                self.lockable[r][i] = Some(true);

                // every other pivot with a ground cell on the same support rests too
                for &(gx, gy) in &grounds {
                    let (vx, vy) = (cx - gx, cy - gy);
                    if vx < 0 || vy < 0 || vx as usize >= width || vy as usize >= height {
                        continue;
                    }
                    let vi = vy as usize * width + vx as usize;
                    if self.spaceable[r][vi] && self.lockable[r][vi].is_none() {
                        self.lockable[r][vi] = Some(true);
                    }
                }
            }
        }

        self.lockable_scanned[r] = true;
        trace!(piece = ?self.piece, ?rotation, "lockable volume scanned");
    }

    /// Continue the walk from spawn until `(goal_rotation, goal_x, goal_y)`
    /// is reached or the work list runs dry.
    fn explore_until(&mut self, goal_rotation: Rotation, goal_x: usize, goal_y: usize) -> bool {
        let width = self.width;
        if self.passible[goal_rotation.index()][goal_y * width + goal_x] {
            return true;
        }

        while let Some((rotation, x, y)) = self.pending.pop() {
            let r = rotation.index();
            let i = y * width + x;
            if self.passible[r][i] {
                continue;
            }
            self.passible[r][i] = true;

            let space = &self.spaceable[r];
            let shifts = [
                (y > 0 && space[i - width]).then(|| (x, y - 1)),
                (x > 0 && space[i - 1]).then(|| (x - 1, y)),
                (x + 1 < width && space[i + 1]).then(|| (x + 1, y)),
            ];
            for (nx, ny) in shifts.into_iter().flatten() {
                if !self.passible[r][ny * width + nx] {
                    self.pending.push((rotation, nx, ny));
                }
            }

            for clockwise in [false, true] {
                let Some(turn) = try_rotate(self.field, self.piece, rotation, x as i32, y as i32, clockwise)
                else {
                    continue;
                };
                // the pivot is a mino, so a legal destination is always on the field
                if let (Ok(nx), Ok(ny)) = (usize::try_from(turn.new_x), usize::try_from(turn.new_y)) {
                    if !self.passible[turn.new_rotation.index()][ny * width + nx] {
                        self.pending.push((turn.new_rotation, nx, ny));
                    }
                }
            }

            if rotation == goal_rotation && x == goal_x && y == goal_y {
                return true;
            }
        }

        false
    }
}

/// Spaceable volume for one rotation. A blocked cell rules out every pivot
/// that would put any mino on it, not just the pivot being tested.
fn scan_space(field: &Field, piece: Piece, rotation: Rotation) -> Vec<bool> {
    let shape = Shape::new(piece, rotation);
    let width = field.width() as i32;
    let height = field.height() as i32;
    let mut space: Vec<Option<bool>> = vec![None; field.width() * field.height()];

    for y in (0..height).rev() {
        for x in 0..width {
            let i = (y * width + x) as usize;
            if space[i].is_some() {
                continue;
            }

            if x + (shape.min_x() as i32) < 0
                || x + (shape.max_x() as i32) >= width
                || y + (shape.min_y() as i32) < 0
                || y + (shape.max_y() as i32) >= height
            {
                space[i] = Some(false);
                continue;
            }

            let blocked = shape
                .cells()
                .iter()
                .map(|&(dx, dy)| (x + dx as i32, y + dy as i32))
                .find(|&(cx, cy)| field.is_filled(cx, cy));

            if let Some((cx, cy)) = blocked {
                for &(dx, dy) in shape.cells() {
                    let (ix, iy) = (cx - dx as i32, cy - dy as i32);
                    if (0..width).contains(&ix) && (0..height).contains(&iy) {
                        space[(iy * width + ix) as usize] = Some(false);
                    }
                }
            }
            space[i] = Some(blocked.is_none());
        }
    }

    space.into_iter().map(|s| s == Some(true)).collect()
}
