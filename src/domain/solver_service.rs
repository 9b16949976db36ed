// Domain service interface for the LP oracle.
// Adapters translate LpProblem into a concrete solver's API; the rest of the
// crate depends only on this contract.

use super::models::LpProblem;

/// Fatal errors: these abort a whole evaluation run before any unit is solved.
/// Per-unit solver outcomes are not errors (see [`SolveOutcome`]).
#[derive(Debug, thiserror::Error)]
pub enum DeaError {
    #[error("malformed dataset: {0}")]
    MalformedDataset(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unit index {index} out of range for dataset of {len} units")]
    UnitOutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, DeaError>;

/// Normalized answer from one solve attempt.
///
/// The adapter reports the raw minimized objective and variable vector
/// untouched; orientation-specific sign and inversion conventions belong to
/// the result interpreter.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome {
    Optimal {
        objective: f64,
        variables: Vec<f64>,
    },
    Infeasible,
    Unbounded,
    NumericalFailure(String),
}

impl SolveOutcome {
    pub fn is_optimal(&self) -> bool {
        matches!(self, SolveOutcome::Optimal { .. })
    }
}

/// One solve attempt per problem, no retries, no interpretation of the result.
pub trait LpOracle: Send + Sync {
    fn solve(&self, problem: &LpProblem) -> SolveOutcome;

    /// Name of the backing solver, for logs
    fn name(&self) -> &str;
}
