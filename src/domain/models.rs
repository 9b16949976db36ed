use super::solver_service::{DeaError, Result};
use super::value_objects::{EfficiencyStatus, Orientation};
use serde::Serialize;
use std::fmt::Write as _;

/// One decision-making unit: an identifier plus its measured inputs and outputs
#[derive(Debug, Clone, PartialEq)]
pub struct DmuRecord {
    pub id: String,
    pub inputs: Vec<f64>,
    pub outputs: Vec<f64>,
}

impl DmuRecord {
    pub fn new(id: impl Into<String>, inputs: Vec<f64>, outputs: Vec<f64>) -> Self {
        Self {
            id: id.into(),
            inputs,
            outputs,
        }
    }
}

/// Ordered collection of units sharing the same input/output dimensions.
///
/// The construction order is the evaluation and reporting order. A dataset is
/// read-only for the duration of a run; no component mutates it.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<DmuRecord>,
    num_inputs: usize,
    num_outputs: usize,
}

impl Dataset {
    /// Build a dataset, checking the structural invariant: at least one unit,
    /// at least one input and output dimension, identical vector lengths
    /// across units, and finite measurements throughout.
    ///
    /// An empty record list is rejected rather than yielding an empty result
    /// table later: the input/output dimensions are derived from the first
    /// record, so a dataset with no units has no well-defined shape.
    pub fn new(records: Vec<DmuRecord>) -> Result<Self> {
        let first = records
            .first()
            .ok_or_else(|| DeaError::MalformedDataset("dataset contains no units".into()))?;

        let num_inputs = first.inputs.len();
        let num_outputs = first.outputs.len();

        if num_inputs == 0 {
            return Err(DeaError::MalformedDataset(
                "at least one input dimension is required".into(),
            ));
        }
        if num_outputs == 0 {
            return Err(DeaError::MalformedDataset(
                "at least one output dimension is required".into(),
            ));
        }

        for record in &records {
            if record.inputs.len() != num_inputs || record.outputs.len() != num_outputs {
                return Err(DeaError::MalformedDataset(format!(
                    "unit '{}' has {} inputs and {} outputs, expected {} and {}",
                    record.id,
                    record.inputs.len(),
                    record.outputs.len(),
                    num_inputs,
                    num_outputs
                )));
            }
            if record
                .inputs
                .iter()
                .chain(record.outputs.iter())
                .any(|m| !m.is_finite())
            {
                return Err(DeaError::MalformedDataset(format!(
                    "unit '{}' has a non-finite measurement",
                    record.id
                )));
            }
        }

        Ok(Self {
            records,
            num_inputs,
            num_outputs,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    pub fn num_outputs(&self) -> usize {
        self.num_outputs
    }

    pub fn records(&self) -> &[DmuRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&DmuRecord> {
        self.records.get(index)
    }

    /// Restrict the dataset to the named units, preserving the original order.
    pub fn select(&self, ids: &[&str]) -> Result<Dataset> {
        let subset: Vec<DmuRecord> = self
            .records
            .iter()
            .filter(|r| ids.contains(&r.id.as_str()))
            .cloned()
            .collect();
        Dataset::new(subset)
    }

    /// The conventional DEA discrimination rule: at least `3 * (I + O)` units.
    pub fn recommended_minimum_units(&self) -> usize {
        3 * (self.num_inputs + self.num_outputs)
    }

    /// Advisory check only; datasets below the threshold are still evaluated.
    pub fn meets_recommended_size(&self) -> bool {
        let minimum = self.recommended_minimum_units();
        if self.records.len() < minimum {
            tracing::warn!(
                units = self.records.len(),
                minimum,
                inputs = self.num_inputs,
                outputs = self.num_outputs,
                "dataset is below the recommended unit count for reliable discrimination"
            );
            false
        } else {
            true
        }
    }
}

/// Canonical per-unit LP in multiplier form, consumed once by a solver adapter.
///
/// All rows are dense over the same variable vector: `minimize objective · x`
/// subject to `normalization · x = 1`, `row · x <= 0` for every envelope row,
/// and `x >= lower_bound` elementwise with no upper bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct LpProblem {
    pub objective: Vec<f64>,
    pub normalization: Vec<f64>,
    pub envelope: Vec<Vec<f64>>,
    pub lower_bound: f64,
    pub labels: Vec<String>,
}

impl LpProblem {
    pub fn num_variables(&self) -> usize {
        self.objective.len()
    }

    /// Human-readable rendering of the full program, for diagnostics.
    /// Printing a transcript never changes what gets solved.
    pub fn transcript(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "minimize    {}", render_row(&self.objective, &self.labels));
        let _ = writeln!(
            out,
            "subject to  {} = 1",
            render_row(&self.normalization, &self.labels)
        );
        for row in &self.envelope {
            let _ = writeln!(out, "            {} <= 0", render_row(row, &self.labels));
        }
        let _ = writeln!(out, "bounds      {} >= {}", self.labels.join(", "), self.lower_bound);
        out
    }
}

fn render_row(coefficients: &[f64], labels: &[String]) -> String {
    let mut terms = String::new();
    for (coeff, label) in coefficients.iter().zip(labels) {
        if *coeff == 0.0 {
            continue;
        }
        if terms.is_empty() {
            if *coeff < 0.0 {
                terms.push('-');
            }
        } else if *coeff < 0.0 {
            terms.push_str(" - ");
        } else {
            terms.push_str(" + ");
        }
        let magnitude = coeff.abs();
        if magnitude == 1.0 {
            let _ = write!(terms, "{}", label);
        } else {
            let _ = write!(terms, "{} {}", magnitude, label);
        }
    }
    if terms.is_empty() {
        terms.push('0');
    }
    terms
}

/// One row of the evaluation output table.
///
/// `score` is the orientation's primary figure (theta for input orientation,
/// phi for output orientation); both it and `technical_efficiency` are absent
/// when the unit's LP could not be solved.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationRow {
    pub id: String,
    pub score: Option<f64>,
    pub technical_efficiency: Option<f64>,
    pub status: EfficiencyStatus,
    pub input_weights: Vec<f64>,
    pub output_weights: Vec<f64>,
}

impl EvaluationRow {
    pub fn unsolved(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            score: None,
            technical_efficiency: None,
            status: EfficiencyStatus::Unsolved,
            input_weights: Vec::new(),
            output_weights: Vec::new(),
        }
    }

    pub fn is_efficient(&self) -> bool {
        self.status == EfficiencyStatus::Efficient
    }
}

/// Run-level configuration for an evaluation batch
#[derive(Debug, Clone)]
pub struct EvaluationConfig {
    pub orientation: Orientation,
    /// Strictly positive lower bound on every multiplier
    pub epsilon: f64,
    /// Half-width of the band around 1 that classifies a unit as efficient
    pub efficiency_tolerance: f64,
    /// Optional per-unit solve time limit in seconds; expiry yields Unsolved
    pub time_limit: Option<f64>,
}

impl EvaluationConfig {
    pub const DEFAULT_EPSILON: f64 = 1e-6;
    pub const DEFAULT_EFFICIENCY_TOLERANCE: f64 = 1e-5;

    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            epsilon: Self::DEFAULT_EPSILON,
            efficiency_tolerance: Self::DEFAULT_EFFICIENCY_TOLERANCE,
            time_limit: None,
        }
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_efficiency_tolerance(mut self, tolerance: f64) -> Self {
        self.efficiency_tolerance = tolerance;
        self
    }

    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit = Some(seconds);
        self
    }

    /// Fatal at run start: an evaluation never begins with a bad configuration.
    pub fn validate(&self) -> Result<()> {
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(DeaError::InvalidConfig(format!(
                "epsilon must be strictly positive, got {}",
                self.epsilon
            )));
        }
        if !(self.efficiency_tolerance.is_finite() && self.efficiency_tolerance > 0.0) {
            return Err(DeaError::InvalidConfig(format!(
                "efficiency tolerance must be strictly positive, got {}",
                self.efficiency_tolerance
            )));
        }
        if let Some(limit) = self.time_limit {
            if !(limit.is_finite() && limit > 0.0) {
                return Err(DeaError::InvalidConfig(format!(
                    "time limit must be strictly positive, got {}",
                    limit
                )));
            }
        }
        Ok(())
    }
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self::new(Orientation::Input)
    }
}
