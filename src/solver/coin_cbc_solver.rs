// COIN-OR CBC adapter via good_lp.

use crate::domain::{LpOracle, LpProblem, SolveOutcome};
use good_lp::{
    solvers::coin_cbc, variable, variables, Expression, ResolutionError,
    Solution as GoodLpSolution, SolverModel, Variable as GoodLpVariable,
};

pub struct CoinCbcSolver {
    time_limit: Option<f64>,
}

impl CoinCbcSolver {
    pub fn new() -> Self {
        Self { time_limit: None }
    }

    pub fn with_time_limit(seconds: f64) -> Self {
        Self {
            time_limit: Some(seconds),
        }
    }
}

impl Default for CoinCbcSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl LpOracle for CoinCbcSolver {
    fn solve(&self, problem: &LpProblem) -> SolveOutcome {
        let mut vars = variables!();
        let lp_variables: Vec<GoodLpVariable> = problem
            .objective
            .iter()
            .map(|_| vars.add(variable().min(problem.lower_bound)))
            .collect();

        let expression = |row: &[f64]| {
            let mut expr: Expression = 0.into();
            for (i, &coeff) in row.iter().enumerate() {
                if coeff != 0.0 {
                    expr += coeff * lp_variables[i];
                }
            }
            expr
        };

        // The formulator pre-negates maximization objectives
        let mut model = vars
            .minimise(expression(&problem.objective))
            .using(coin_cbc::coin_cbc);

        if let Some(limit) = self.time_limit {
            model.set_parameter("sec", &limit.to_string());
        }

        model = model.with(expression(&problem.normalization).eq(1.0));
        for row in &problem.envelope {
            model = model.with(expression(row).leq(0.0));
        }

        match model.solve() {
            Ok(solution) => {
                let variables: Vec<f64> = lp_variables
                    .iter()
                    .map(|&var| solution.value(var))
                    .collect();
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
            Err(ResolutionError::Infeasible) => SolveOutcome::Infeasible,
            Err(ResolutionError::Unbounded) => SolveOutcome::Unbounded,
            Err(error) => SolveOutcome::NumericalFailure(format!("{:?}", error)),
        }
    }

    fn name(&self) -> &str {
        "COIN-OR CBC"
    }
}
