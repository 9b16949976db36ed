// Evaluation Orchestrator: drives formulate -> solve -> interpret across a
// dataset and assembles the result table in dataset order.

use crate::application::{formulator, interpreter};
use crate::domain::{
    Dataset, EvaluationConfig, EvaluationRow, LpOracle, Result, SolverBackend,
};
use crate::solver::SolverFactory;
use rayon::prelude::*;
use std::sync::Arc;

pub struct Evaluator {
    oracle: Arc<dyn LpOracle>,
    config: EvaluationConfig,
}

impl Evaluator {
    /// Configuration problems are fatal here, before any unit is touched.
    pub fn new(oracle: Arc<dyn LpOracle>, config: EvaluationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { oracle, config })
    }

    /// Convenience constructor wiring in a solver from the factory, carrying
    /// the configured per-unit time limit into the backend.
    pub fn with_backend(backend: SolverBackend, config: EvaluationConfig) -> Result<Self> {
        config.validate()?;
        let oracle = SolverFactory::create(backend, config.time_limit);
        Ok(Self { oracle, config })
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    /// Evaluate every unit sequentially, in dataset order.
    ///
    /// A unit whose LP cannot be solved contributes an `Unsolved` row and the
    /// batch continues; the output always has one row per unit.
    pub fn evaluate(&self, dataset: &Dataset) -> Result<Vec<EvaluationRow>> {
        tracing::debug!(
            units = dataset.len(),
            orientation = %self.config.orientation,
            solver = self.oracle.name(),
            "starting evaluation run"
        );
        (0..dataset.len())
            .map(|index| self.evaluate_unit(dataset, index))
            .collect()
    }

    /// Parallel variant: per-unit pipelines are independent, so units are
    /// dispatched across the rayon pool. Indexed collection preserves the
    /// dataset order, so the output table is identical to [`evaluate`].
    ///
    /// [`evaluate`]: Evaluator::evaluate
    pub fn evaluate_parallel(&self, dataset: &Dataset) -> Result<Vec<EvaluationRow>> {
        tracing::debug!(
            units = dataset.len(),
            orientation = %self.config.orientation,
            solver = self.oracle.name(),
            "starting parallel evaluation run"
        );
        (0..dataset.len())
            .into_par_iter()
            .map(|index| self.evaluate_unit(dataset, index))
            .collect()
    }

    fn evaluate_unit(&self, dataset: &Dataset, index: usize) -> Result<EvaluationRow> {
        let problem = formulator::formulate(
            dataset,
            index,
            self.config.orientation,
            self.config.epsilon,
        )?;
        let outcome = self.oracle.solve(&problem);

        // Index was just validated by the formulator
        let unit = &dataset.records()[index];
        if !outcome.is_optimal() {
            tracing::warn!(unit = %unit.id, ?outcome, "unit left unsolved");
        }

        Ok(interpreter::interpret(
            &unit.id,
            self.config.orientation,
            dataset.num_inputs(),
            dataset.num_outputs(),
            self.config.efficiency_tolerance,
            &outcome,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DmuRecord, EfficiencyStatus, LpProblem, Orientation, SolveOutcome};

    /// Deterministic oracle: reports the objective coefficient sum as the
    /// optimum and a fixed ramp as the variable vector.
    struct RampOracle;

    impl LpOracle for RampOracle {
        fn solve(&self, problem: &LpProblem) -> SolveOutcome {
            SolveOutcome::Optimal {
                objective: problem.objective.iter().sum(),
                variables: (1..=problem.num_variables())
                    .map(|i| i as f64 * 0.1)
                    .collect(),
            }
        }

        fn name(&self) -> &str {
            "ramp"
        }
    }

    /// Like RampOracle, but fails any unit whose first objective coefficient
    /// matches the given signature.
    struct FlakyOracle {
        fail_signature: f64,
    }

    impl LpOracle for FlakyOracle {
        fn solve(&self, problem: &LpProblem) -> SolveOutcome {
            if problem.objective[0] == self.fail_signature {
                SolveOutcome::NumericalFailure("injected".into())
            } else {
                RampOracle.solve(problem)
            }
        }

        fn name(&self) -> &str {
            "flaky"
        }
    }

    fn three_unit_dataset() -> Dataset {
        Dataset::new(vec![
            DmuRecord::new("A", vec![2.0], vec![1.0]),
            DmuRecord::new("B", vec![4.0], vec![3.0]),
            DmuRecord::new("C", vec![3.0], vec![2.0]),
        ])
        .unwrap()
    }

    #[test]
    fn invalid_config_is_fatal_before_any_solve() {
        let config = EvaluationConfig::new(Orientation::Input).with_epsilon(-1.0);
        assert!(Evaluator::new(Arc::new(RampOracle), config).is_err());
    }

    #[test]
    fn one_row_per_unit_in_dataset_order() {
        let evaluator = Evaluator::new(
            Arc::new(RampOracle),
            EvaluationConfig::new(Orientation::Input),
        )
        .unwrap();
        let rows = evaluator.evaluate(&three_unit_dataset()).unwrap();
        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
    }

    #[test]
    fn failed_unit_is_reported_not_omitted() {
        // Unit B has objective [4.0, 0.0] under input orientation
        let evaluator = Evaluator::new(
            Arc::new(FlakyOracle { fail_signature: 4.0 }),
            EvaluationConfig::new(Orientation::Input),
        )
        .unwrap();
        let rows = evaluator.evaluate(&three_unit_dataset()).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].id, "B");
        assert_eq!(rows[1].status, EfficiencyStatus::Unsolved);
        assert_ne!(rows[0].status, EfficiencyStatus::Unsolved);
        assert_ne!(rows[2].status, EfficiencyStatus::Unsolved);
    }

    #[test]
    fn one_failure_does_not_change_other_scores() {
        let dataset = three_unit_dataset();
        let config = EvaluationConfig::new(Orientation::Input);

        let clean = Evaluator::new(Arc::new(RampOracle), config.clone())
            .unwrap()
            .evaluate(&dataset)
            .unwrap();
        let flaky = Evaluator::new(
            Arc::new(FlakyOracle { fail_signature: 4.0 }),
            config,
        )
        .unwrap()
        .evaluate(&dataset)
        .unwrap();

        assert_eq!(clean[0].score, flaky[0].score);
        assert_eq!(clean[2].score, flaky[2].score);
    }

    #[test]
    fn parallel_matches_sequential() {
        let dataset = three_unit_dataset();
        // Under output orientation, unit C's leading objective coefficient
        // is its negated output
        let evaluator = Evaluator::new(
            Arc::new(FlakyOracle {
                fail_signature: -2.0,
            }),
            EvaluationConfig::new(Orientation::Output),
        )
        .unwrap();

        let sequential = evaluator.evaluate(&dataset).unwrap();
        let parallel = evaluator.evaluate_parallel(&dataset).unwrap();

        assert_eq!(sequential.len(), parallel.len());
        for (s, p) in sequential.iter().zip(&parallel) {
            assert_eq!(s.id, p.id);
            assert_eq!(s.score, p.score);
            assert_eq!(s.status, p.status);
        }
    }
}
