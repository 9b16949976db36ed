// LP Formulator: builds the CCR multiplier program for one target unit.
//
// Variable layout is orientation-dependent. Input orientation puts the input
// multipliers v first, then the output multipliers u; output orientation puts
// u first, then v. The interpreter relies on this layout when slicing the
// optimal vector back into labelled weights.

use crate::domain::{Dataset, DeaError, LpProblem, Orientation, Result};

/// Build the per-unit CCR multiplier LP.
///
/// Deterministic and pure: the same dataset, target index, orientation and
/// epsilon always produce an identical problem. The target unit's own row is
/// part of the envelope, which keeps the program feasible by construction.
pub fn formulate(
    dataset: &Dataset,
    target: usize,
    orientation: Orientation,
    epsilon: f64,
) -> Result<LpProblem> {
    let unit = dataset.get(target).ok_or(DeaError::UnitOutOfRange {
        index: target,
        len: dataset.len(),
    })?;

    let num_inputs = dataset.num_inputs();
    let num_outputs = dataset.num_outputs();
    let num_vars = num_inputs + num_outputs;

    let mut objective = Vec::with_capacity(num_vars);
    let mut normalization = Vec::with_capacity(num_vars);
    let mut labels = Vec::with_capacity(num_vars);

    match orientation {
        Orientation::Input => {
            // minimize v . x_m  subject to  u . y_m = 1
            objective.extend_from_slice(&unit.inputs);
            objective.extend(std::iter::repeat(0.0).take(num_outputs));

            normalization.extend(std::iter::repeat(0.0).take(num_inputs));
            normalization.extend_from_slice(&unit.outputs);

            labels.extend((1..=num_inputs).map(|i| format!("v_{}", i)));
            labels.extend((1..=num_outputs).map(|j| format!("u_{}", j)));
        }
        Orientation::Output => {
            // maximize u . y_m, expressed as minimizing the negated
            // coefficients, subject to v . x_m = 1
            objective.extend(unit.outputs.iter().map(|y| -y));
            objective.extend(std::iter::repeat(0.0).take(num_inputs));

            normalization.extend(std::iter::repeat(0.0).take(num_outputs));
            normalization.extend_from_slice(&unit.inputs);

            labels.extend((1..=num_outputs).map(|j| format!("u_{}", j)));
            labels.extend((1..=num_inputs).map(|i| format!("v_{}", i)));
        }
    }

    // Envelope: u . y_n - v . x_n <= 0 for every unit n, target included.
    // Identical family under both orientations, modulo the variable layout.
    let envelope = dataset
        .records()
        .iter()
        .map(|peer| {
            let mut row = Vec::with_capacity(num_vars);
            match orientation {
                Orientation::Input => {
                    row.extend(peer.inputs.iter().map(|x| -x));
                    row.extend_from_slice(&peer.outputs);
                }
                Orientation::Output => {
                    row.extend_from_slice(&peer.outputs);
                    row.extend(peer.inputs.iter().map(|x| -x));
                }
            }
            row
        })
        .collect();

    Ok(LpProblem {
        objective,
        normalization,
        envelope,
        lower_bound: epsilon,
        labels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DmuRecord;

    fn three_unit_dataset() -> Dataset {
        Dataset::new(vec![
            DmuRecord::new("A", vec![2.0], vec![1.0]),
            DmuRecord::new("B", vec![4.0], vec![3.0]),
            DmuRecord::new("C", vec![3.0], vec![2.0]),
        ])
        .unwrap()
    }

    #[test]
    fn input_oriented_coefficients_for_first_unit() {
        let ds = three_unit_dataset();
        let lp = formulate(&ds, 0, Orientation::Input, 1e-6).unwrap();

        // minimize 2 v_1; u . y_A = 1
        assert_eq!(lp.objective, vec![2.0, 0.0]);
        assert_eq!(lp.normalization, vec![0.0, 1.0]);

        // one envelope row per unit, target included
        assert_eq!(
            lp.envelope,
            vec![
                vec![-2.0, 1.0],
                vec![-4.0, 3.0],
                vec![-3.0, 2.0],
            ]
        );
        assert_eq!(lp.lower_bound, 1e-6);
        assert_eq!(lp.labels, vec!["v_1", "u_1"]);
    }

    #[test]
    fn output_oriented_swaps_variable_blocks() {
        let ds = three_unit_dataset();
        let lp = formulate(&ds, 1, Orientation::Output, 1e-6).unwrap();

        // maximize 3 u_1 as minimize -3 u_1; v . x_B = 1
        assert_eq!(lp.objective, vec![-3.0, 0.0]);
        assert_eq!(lp.normalization, vec![0.0, 4.0]);
        assert_eq!(
            lp.envelope,
            vec![
                vec![1.0, -2.0],
                vec![3.0, -4.0],
                vec![2.0, -3.0],
            ]
        );
        assert_eq!(lp.labels, vec!["u_1", "v_1"]);
    }

    #[test]
    fn formulation_is_deterministic() {
        let ds = three_unit_dataset();
        let a = formulate(&ds, 2, Orientation::Input, 1e-6).unwrap();
        let b = formulate(&ds, 2, Orientation::Input, 1e-6).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn multi_dimensional_layout() {
        let ds = Dataset::new(vec![
            DmuRecord::new("A", vec![1.0, 2.0], vec![3.0, 4.0, 5.0]),
            DmuRecord::new("B", vec![6.0, 7.0], vec![8.0, 9.0, 10.0]),
        ])
        .unwrap();

        let input = formulate(&ds, 0, Orientation::Input, 1e-6).unwrap();
        assert_eq!(input.objective, vec![1.0, 2.0, 0.0, 0.0, 0.0]);
        assert_eq!(input.normalization, vec![0.0, 0.0, 3.0, 4.0, 5.0]);
        assert_eq!(input.envelope[1], vec![-6.0, -7.0, 8.0, 9.0, 10.0]);

        let output = formulate(&ds, 0, Orientation::Output, 1e-6).unwrap();
        assert_eq!(output.objective, vec![-3.0, -4.0, -5.0, 0.0, 0.0]);
        assert_eq!(output.normalization, vec![0.0, 0.0, 0.0, 1.0, 2.0]);
        assert_eq!(output.envelope[1], vec![8.0, 9.0, 10.0, -6.0, -7.0]);
    }

    #[test]
    fn target_out_of_range_is_rejected() {
        let ds = three_unit_dataset();
        let err = formulate(&ds, 3, Orientation::Input, 1e-6).unwrap_err();
        assert!(matches!(err, DeaError::UnitOutOfRange { index: 3, len: 3 }));
    }
}
