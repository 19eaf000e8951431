use pcfind_core::Piece;
use thiserror::Error;

/// Errors raised while configuring or constructing engine components.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum EngineError {
    #[error("spawn ({x}, {y}) lies outside the {height} x {width} field")]
    SpawnOutOfRange {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },
    #[error("piece {0:?} has no rotational symmetry to canonicalize")]
    NoSymmetry(Piece),
}
