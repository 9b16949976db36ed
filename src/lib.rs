//! CCR multiplier-form Data Envelopment Analysis.
//!
//! For each unit in a dataset this crate formulates the constant-returns CCR
//! linear program in its multiplier (dual) form, hands it to an LP backend,
//! and interprets the optimum into an efficiency score, status and weight
//! vector. Both the input-oriented and output-oriented variants are
//! supported, and a batch can run sequentially or across the rayon pool.
//!
//! ```no_run
//! use deasolve::{Dataset, DmuRecord, EvaluationConfig, Evaluator, Orientation, SolverBackend};
//!
//! let dataset = Dataset::new(vec![
//!     DmuRecord::new("A", vec![2.0], vec![1.0]),
//!     DmuRecord::new("B", vec![4.0], vec![3.0]),
//!     DmuRecord::new("C", vec![3.0], vec![2.0]),
//! ])?;
//!
//! let evaluator = Evaluator::with_backend(
//!     SolverBackend::Auto,
//!     EvaluationConfig::new(Orientation::Input),
//! )?;
//! for row in evaluator.evaluate(&dataset)? {
//!     println!("{}: {:?} ({})", row.id, row.score, row.status);
//! }
//! # Ok::<(), deasolve::DeaError>(())
//! ```

// Domain layer: DEA data model and contracts
pub mod domain;

// Application layer: formulate -> solve -> interpret pipeline
pub mod application;

// Solver adapters: concrete implementations of LpOracle
pub mod solver;

// Re-export commonly used types
pub use domain::{
    Dataset, DeaError, DmuRecord, EfficiencyStatus, EvaluationConfig, EvaluationRow, LpOracle,
    LpProblem, Orientation, SolveOutcome, SolverBackend,
};

pub use application::{formulate, interpret, Evaluator};

#[cfg(feature = "coin-cbc")]
pub use solver::CoinCbcSolver;
pub use solver::{HighsSolver, SolverFactory};
