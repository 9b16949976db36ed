// HiGHS adapter: translates the canonical multiplier LP into the HiGHS
// RowProblem API and normalizes the model status into a SolveOutcome.

use crate::domain::{LpOracle, LpProblem, SolveOutcome};
use highs::{HighsModelStatus, RowProblem, Sense};

pub struct HighsSolver {
    time_limit: Option<f64>,
}

impl HighsSolver {
    pub fn new() -> Self {
        Self { time_limit: None }
    }

    pub fn with_time_limit(seconds: f64) -> Self {
        Self {
            time_limit: Some(seconds),
        }
    }
}

impl Default for HighsSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl LpOracle for HighsSolver {
    fn solve(&self, problem: &LpProblem) -> SolveOutcome {
        let mut pb = RowProblem::default();

        // Every multiplier has the same floor and no ceiling
        let cols: Vec<_> = problem
            .objective
            .iter()
            .map(|&coeff| pb.add_column(coeff, problem.lower_bound..))
            .collect();

        let terms = |row: &[f64]| {
            row.iter()
                .enumerate()
                .filter(|(_, &coeff)| coeff != 0.0)
                .map(|(i, &coeff)| (cols[i], coeff))
                .collect::<Vec<_>>()
        };

        pb.add_row(1.0..=1.0, &terms(&problem.normalization));
        for row in &problem.envelope {
            pb.add_row(..=0.0, &terms(row));
        }

        // The formulator pre-negates maximization objectives
        let mut model = pb.optimise(Sense::Minimise);
        if let Some(limit) = self.time_limit {
            model.set_option("time_limit", limit);
        }

        let solved = model.solve();
        match solved.status() {
            HighsModelStatus::Optimal => {
                let variables = solved.get_solution().columns().to_vec();
                let objective = problem
                    .objective
                    .iter()
                    .zip(&variables)
                    .map(|(c, x)| c * x)
                    .sum();
                SolveOutcome::Optimal {
                    objective,
                    variables,
                }
            }
            HighsModelStatus::Infeasible => SolveOutcome::Infeasible,
            HighsModelStatus::Unbounded | HighsModelStatus::UnboundedOrInfeasible => {
                SolveOutcome::Unbounded
            }
            status => SolveOutcome::NumericalFailure(format!(
                "HiGHS returned status: {:?}",
                status
            )),
        }
    }

    fn name(&self) -> &str {
        "HiGHS"
    }
}
