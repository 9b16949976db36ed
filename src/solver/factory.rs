use crate::domain::{LpOracle, SolverBackend};
use crate::solver::HighsSolver;
#[cfg(feature = "coin-cbc")]
use crate::solver::CoinCbcSolver;
use std::sync::Arc;

/// Factory for creating LP oracle instances based on configuration
pub struct SolverFactory;

impl SolverFactory {
    /// Create an oracle for a backend, carrying the per-solve time limit
    pub fn create(backend: SolverBackend, time_limit: Option<f64>) -> Arc<dyn LpOracle> {
        match backend {
            SolverBackend::Auto | SolverBackend::Highs => match time_limit {
                Some(seconds) => Arc::new(HighsSolver::with_time_limit(seconds)),
                None => Arc::new(HighsSolver::new()),
            },
            #[cfg(feature = "coin-cbc")]
            SolverBackend::CoinCbc => match time_limit {
                Some(seconds) => Arc::new(CoinCbcSolver::with_time_limit(seconds)),
                None => Arc::new(CoinCbcSolver::new()),
            },
        }
    }

    /// Get the default oracle (HiGHS)
    pub fn default_solver() -> Arc<dyn LpOracle> {
        Arc::new(HighsSolver::new())
    }
}
