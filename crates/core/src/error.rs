use thiserror::Error;

/// Errors raised while building fields and pieces from caller input.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum CoreError {
    #[error("field of {height} rows x {width} columns is not supported (width 1..=64, height >= 1)")]
    InvalidDimensions { height: usize, width: usize },
    #[error("pattern row {row} has {found} columns, expected {expected}")]
    PatternWidth {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("pattern has {rows} rows but the field only holds {height}")]
    PatternHeight { rows: usize, height: usize },
    #[error("unknown cell character {0:?}")]
    UnknownCell(char),
    #[error("unknown piece name {0:?}")]
    UnknownPiece(char),
}
