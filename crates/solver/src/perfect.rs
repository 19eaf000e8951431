//! Depth-first perfect-clear search over the known piece order.
//!
//! Every pending decision is an owned [`Node`] on an explicit stack, so no
//! field is ever mutated in place or restored.

use pcfind_core::{Field, Piece, Placement};
use pcfind_engine::{apply_placement, CandidateCache, Canonicalizer, SearchConfig};
use tracing::{debug, trace};

use crate::SolverError;

/// Knobs for one perfect-clear query. `None` fields fall back to defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Pieces that may be placed; defaults to every known piece.
    pub max_placements: Option<usize>,
    /// Height of the perfect clear; defaults to the solver's configuration.
    pub max_clear_rows: Option<usize>,
    /// The hold slot was already used this turn, so the first piece cannot
    /// be swapped.
    pub hold_used: bool,
    /// Stop after expanding this many nodes.
    pub max_nodes: Option<u64>,
}

impl SearchOptions {
    pub fn with_max_placements(mut self, count: usize) -> Self {
        self.max_placements = Some(count);
        self
    }

    pub fn with_max_clear_rows(mut self, rows: usize) -> Self {
        self.max_clear_rows = Some(rows);
        self
    }

    pub fn with_hold_used(mut self, hold_used: bool) -> Self {
        self.hold_used = hold_used;
        self
    }

    pub fn with_max_nodes(mut self, nodes: u64) -> Self {
        self.max_nodes = Some(nodes);
        self
    }
}

/// Result of a search that may run out of budget.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Placements that empty the field, in play order.
    Found(Vec<Placement>),
    /// Every sequence was tried.
    NotFound,
    /// The node budget ran out first.
    Inconclusive,
}

impl Outcome {
    pub fn is_found(&self) -> bool {
        matches!(self, Outcome::Found(_))
    }
}

/// Counters from the most recent search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolveStats {
    pub nodes: u64,
    pub cache_entries: usize,
}

/// Place `piece` on `field`; afterwards `hold` sits in the hold slot.
#[derive(Clone, Debug)]
struct Node {
    field: Field,
    max_row: usize,
    piece: Piece,
    hold: Option<Piece>,
    path: Vec<Placement>,
}

/// What a query has to work with once the hold slot is resolved.
#[derive(Clone, Copy, Debug)]
struct Plan<'a> {
    /// Pieces that arrive after the hold slot, in order.
    types: &'a [Piece],
    /// Hold slot at the start; the piece in hand when none was given.
    hold: Piece,
    hold_given: bool,
    max_count: usize,
    max_row: usize,
    hold_used: bool,
}

impl<'a> Plan<'a> {
    fn new(
        order: &'a [Piece],
        hold: Option<Piece>,
        options: &SearchOptions,
        config: &SearchConfig,
    ) -> Result<Self, SolverError> {
        let (first_hold, types) = match (hold, order.split_first()) {
            (_, None) => return Err(SolverError::EmptyOrder),
            (Some(hold), Some(_)) => (hold, order),
            (None, Some((&first, rest))) => (first, rest),
        };

        let available = types.len() + 1;
        let max_count = options.max_placements.unwrap_or(available);
        if max_count > available {
            return Err(SolverError::TooManyPlacements {
                requested: max_count,
                available,
            });
        }

        Ok(Self {
            types,
            hold: first_hold,
            hold_given: hold.is_some(),
            max_count,
            max_row: options.max_clear_rows.unwrap_or(config.max_clear_rows),
            hold_used: options.hold_used,
        })
    }

    /// Decisions available before anything is placed.
    fn roots(&self, field: &Field) -> Vec<Node> {
        let mut stack = Vec::new();
        if self.max_count == 0 {
            return stack;
        }
        if self.hold_given || !self.hold_used {
            self.push_choices(
                &mut stack,
                field.clone(),
                self.max_row,
                Vec::new(),
                Some(self.hold),
                !self.hold_used,
            );
        } else {
            // empty hold slot that cannot be used: the piece in hand is played
            stack.push(Node {
                field: field.clone(),
                max_row: self.max_row,
                piece: self.hold,
                hold: self.types.first().copied(),
                path: Vec::new(),
            });
        }
        stack
    }

    /// Can a perfect clear still happen from here with the pieces left?
    /// Every occupied row has to be cleared, so the pieces still to come
    /// must complete some number of rows between the stack height and the
    /// bound, exactly.
    fn worth_continuing(&self, field: &Field, max_row: usize, placed: usize) -> bool {
        if placed >= self.max_count {
            return false;
        }
        if max_row < field.height() && !field.is_row_empty(max_row) {
            return false;
        }
        let filled = field.filled_count();
        let budget = 4 * (self.max_count - placed);
        (field.stack_height()..=max_row.min(field.height())).any(|rows| {
            let needed = rows * field.width() - filled;
            needed % 4 == 0 && needed <= budget
        })
    }

    /// Push the next decisions. The swap (play the held piece, bank the next
    /// one) goes on first so plain play is explored first.
    fn push_choices(
        &self,
        stack: &mut Vec<Node>,
        field: Field,
        max_row: usize,
        path: Vec<Placement>,
        hold: Option<Piece>,
        allow_swap: bool,
    ) {
        let Some(&next) = self.types.get(path.len()) else {
            // order exhausted, the held piece is the last one left
            if let Some(held) = hold {
                stack.push(Node {
                    field,
                    max_row,
                    piece: held,
                    hold: None,
                    path,
                });
            }
            return;
        };

        // swapping equal pieces is the same as playing the next one
        if let Some(held) = hold.filter(|&held| allow_swap && held != next) {
            stack.push(Node {
                field: field.clone(),
                max_row,
                piece: held,
                hold: Some(next),
                path: path.clone(),
            });
        }
        stack.push(Node {
            field,
            max_row,
            piece: next,
            hold,
            path,
        });
    }
}

/// Perfect-clear solver with a candidate cache that outlives single queries.
pub struct PerfectSolver {
    cache: CandidateCache,
    stats: SolveStats,
}

impl Default for PerfectSolver {
    fn default() -> Self {
        Self::new(Canonicalizer::default(), SearchConfig::default())
    }
}

impl PerfectSolver {
    pub fn new(canonicalizer: Canonicalizer, config: SearchConfig) -> Self {
        Self {
            cache: CandidateCache::new(canonicalizer, config),
            stats: SolveStats::default(),
        }
    }

    pub fn stats(&self) -> SolveStats {
        self.stats
    }

    pub fn cache(&self) -> &CandidateCache {
        &self.cache
    }

    /// Can `order` (piece in hand first) plus `hold` empty the field?
    /// A search cut short by `max_nodes` reports `false`; use
    /// [`PerfectSolver::solve`] to tell the two apart.
    pub fn search_perfect(
        &mut self,
        field: &Field,
        order: &[Piece],
        hold: Option<Piece>,
        options: SearchOptions,
    ) -> Result<bool, SolverError> {
        Ok(self.solve(field, order, hold, options)?.is_found())
    }

    /// Placements that empty the field, if there are any.
    pub fn find_perfect(
        &mut self,
        field: &Field,
        order: &[Piece],
        hold: Option<Piece>,
        options: SearchOptions,
    ) -> Result<Option<Vec<Placement>>, SolverError> {
        match self.solve(field, order, hold, options)? {
            Outcome::Found(path) => Ok(Some(path)),
            Outcome::NotFound | Outcome::Inconclusive => Ok(None),
        }
    }

    pub fn solve(
        &mut self,
        field: &Field,
        order: &[Piece],
        hold: Option<Piece>,
        options: SearchOptions,
    ) -> Result<Outcome, SolverError> {
        let plan = Plan::new(order, hold, &options, self.cache.config())?;
        debug!(
            ?order,
            ?hold,
            max_count = plan.max_count,
            max_row = plan.max_row,
            hold_used = plan.hold_used,
            "perfect clear search started"
        );

        let mut stack = plan.roots(field);
        let outcome = self.explore(&plan, &mut stack, options.max_nodes);

        debug!(
            nodes = self.stats.nodes,
            cache_entries = self.stats.cache_entries,
            found = matches!(outcome, Ok(Outcome::Found(_))),
            "perfect clear search finished"
        );
        outcome
    }

    fn explore(
        &mut self,
        plan: &Plan<'_>,
        stack: &mut Vec<Node>,
        max_nodes: Option<u64>,
    ) -> Result<Outcome, SolverError> {
        let mut nodes = 0u64;
        let outcome = loop {
            let Some(node) = stack.pop() else {
                break Outcome::NotFound;
            };
            if max_nodes.is_some_and(|max| nodes >= max) {
                trace!(nodes, "node budget exhausted");
                break Outcome::Inconclusive;
            }
            nodes += 1;

            let candidates = self.cache.candidates(&node.field, node.piece, node.max_row)?;
            if let Some(path) = expand(plan, &node, candidates, stack) {
                break Outcome::Found(path);
            }
        };

        self.stats = SolveStats {
            nodes,
            cache_entries: self.cache.len(),
        };
        Ok(outcome)
    }

    /// Same as [`PerfectSolver::solve`] with the first placement split across
    /// the rayon pool. Each branch gets its own solver and cache; the node
    /// budget applies per branch.
    #[cfg(feature = "rayon")]
    pub fn solve_parallel(
        &mut self,
        field: &Field,
        order: &[Piece],
        hold: Option<Piece>,
        options: SearchOptions,
    ) -> Result<Outcome, SolverError> {
        use rayon::prelude::*;

        let plan = Plan::new(order, hold, &options, self.cache.config())?;

        let mut work_units: Vec<Vec<Node>> = Vec::new();
        for root in plan.roots(field) {
            let candidates = self.cache.candidates(&root.field, root.piece, root.max_row)?;
            for &placement in candidates {
                let mut branch = Vec::new();
                if let Some(path) = expand(&plan, &root, &[placement], &mut branch) {
                    return Ok(Outcome::Found(path));
                }
                if !branch.is_empty() {
                    work_units.push(branch);
                }
            }
        }
        debug!(branches = work_units.len(), "parallel perfect clear search started");

        let canonicalizer = self.cache.canonicalizer().clone();
        let config = *self.cache.config();
        let results: Vec<Result<Outcome, SolverError>> = work_units
            .into_par_iter()
            .map(|mut stack| {
                let mut solver = PerfectSolver::new(canonicalizer.clone(), config);
                solver.explore(&plan, &mut stack, options.max_nodes)
            })
            .collect();

        let mut inconclusive = false;
        for result in results {
            match result? {
                Outcome::Found(path) => return Ok(Outcome::Found(path)),
                Outcome::Inconclusive => inconclusive = true,
                Outcome::NotFound => {}
            }
        }
        Ok(if inconclusive {
            Outcome::Inconclusive
        } else {
            Outcome::NotFound
        })
    }
}

/// Try every candidate of `node`; returns the finished path on a perfect
/// clear, otherwise pushes the surviving follow-up decisions.
fn expand(
    plan: &Plan<'_>,
    node: &Node,
    candidates: &[Placement],
    stack: &mut Vec<Node>,
) -> Option<Vec<Placement>> {
    for placement in candidates {
        let (field, cleared) = apply_placement(&node.field, placement);
        let max_row = node.max_row.saturating_sub(cleared);
        let mut path = Vec::with_capacity(node.path.len() + 1);
        path.extend_from_slice(&node.path);
        path.push(*placement);

        if field.is_perfect() {
            return Some(path);
        }
        if !plan.worth_continuing(&field, max_row, path.len()) {
            continue;
        }
        plan.push_choices(stack, field, max_row, path, node.hold, true);
    }
    None
}

/// One-shot [`PerfectSolver::search_perfect`] with default settings.
pub fn search_perfect(
    field: &Field,
    order: &[Piece],
    hold: Option<Piece>,
    options: SearchOptions,
) -> Result<bool, SolverError> {
    PerfectSolver::default().search_perfect(field, order, hold, options)
}

/// One-shot [`PerfectSolver::find_perfect`] with default settings.
pub fn find_perfect(
    field: &Field,
    order: &[Piece],
    hold: Option<Piece>,
    options: SearchOptions,
) -> Result<Option<Vec<Placement>>, SolverError> {
    PerfectSolver::default().find_perfect(field, order, hold, options)
}

/// One-shot [`PerfectSolver::solve_parallel`] with default settings.
#[cfg(feature = "rayon")]
pub fn search_perfect_parallel(
    field: &Field,
    order: &[Piece],
    hold: Option<Piece>,
    options: SearchOptions,
) -> Result<Outcome, SolverError> {
    PerfectSolver::default().solve_parallel(field, order, hold, options)
}
