// Result Interpreter: maps a raw solve outcome back into domain terms.
//
// Orientation conventions:
//   input:  theta is the minimized objective itself; Et = 1/theta; the
//           optimal vector is [v | u].
//   output: the formulator minimized the negated objective, so z = -objective
//           recovers the maximized value; phi = 1/z and Et = z; the optimal
//           vector is [u | v].
// The status check uses theta under input orientation but Et under output
// orientation; both compare against the same tolerance around 1.

use crate::domain::{EfficiencyStatus, EvaluationRow, Orientation, SolveOutcome};

pub fn interpret(
    id: &str,
    orientation: Orientation,
    num_inputs: usize,
    num_outputs: usize,
    tolerance: f64,
    outcome: &SolveOutcome,
) -> EvaluationRow {
    let (objective, variables) = match outcome {
        SolveOutcome::Optimal {
            objective,
            variables,
        } => (*objective, variables.as_slice()),
        SolveOutcome::Infeasible | SolveOutcome::Unbounded | SolveOutcome::NumericalFailure(_) => {
            return EvaluationRow::unsolved(id);
        }
    };

    // An oracle that reports fewer variables than the formulation asked for
    // has broken its contract; treat the unit as unsolved rather than panic.
    if variables.len() < num_inputs + num_outputs {
        tracing::warn!(
            unit = id,
            reported = variables.len(),
            expected = num_inputs + num_outputs,
            "oracle returned a truncated variable vector"
        );
        return EvaluationRow::unsolved(id);
    }

    match orientation {
        Orientation::Input => {
            let theta = objective;
            let et = if theta != 0.0 { 1.0 / theta } else { f64::INFINITY };
            let status = if (theta - 1.0).abs() < tolerance {
                EfficiencyStatus::Efficient
            } else {
                EfficiencyStatus::Inefficient
            };
            EvaluationRow {
                id: id.to_string(),
                score: Some(theta),
                technical_efficiency: Some(et),
                status,
                input_weights: variables[..num_inputs].to_vec(),
                output_weights: variables[num_inputs..num_inputs + num_outputs].to_vec(),
            }
        }
        Orientation::Output => {
            let z = -objective;
            let phi = if z != 0.0 { 1.0 / z } else { f64::INFINITY };
            let et = if z != 0.0 { z } else { 0.0 };
            let status = if (et - 1.0).abs() < tolerance {
                EfficiencyStatus::Efficient
            } else {
                EfficiencyStatus::Inefficient
            };
            EvaluationRow {
                id: id.to_string(),
                score: Some(phi),
                technical_efficiency: Some(et),
                status,
                output_weights: variables[..num_outputs].to_vec(),
                input_weights: variables[num_outputs..num_outputs + num_inputs].to_vec(),
            }
        }
    }
}
