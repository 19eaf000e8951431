use pcfind_engine::EngineError;
use thiserror::Error;

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum SolverError {
    #[error("piece order is empty")]
    EmptyOrder,
    #[error("asked for {requested} placements but only {available} pieces are known")]
    TooManyPlacements { requested: usize, available: usize },
    #[error(transparent)]
    Engine(#[from] EngineError),
}
