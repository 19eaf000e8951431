//! pcfind solver crate - perfect-clear search over a known piece order.

mod error;
mod perfect;
pub mod status;

pub use error::SolverError;
#[cfg(feature = "rayon")]
pub use perfect::search_perfect_parallel;
pub use perfect::{find_perfect, search_perfect, Outcome, PerfectSolver, SearchOptions, SolveStats};
pub use status::{classify, PerfectStatus};
