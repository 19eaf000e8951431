//! pcfind core crate - pieces, rotations and the playing field.

mod error;
mod field;
mod piece;
mod placement;
mod state;

pub use error::CoreError;
pub use field::{Cell, Field, Fingerprint};
pub use piece::{rotate_ccw, rotate_cw, Piece, Rotation, Shape};
pub use placement::Placement;
pub use state::{perfect_clear_height, GameState};
