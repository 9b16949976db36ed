// Domain value objects representing core DEA concepts

use serde::{Deserialize, Serialize};
use std::fmt;

/// Orientation of the CCR multiplier model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    /// Minimize weighted input cost under unit-output normalization (CCR-I)
    Input,
    /// Maximize weighted output value under unit-input normalization (CCR-O)
    Output,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Input => write!(f, "input-oriented"),
            Orientation::Output => write!(f, "output-oriented"),
        }
    }
}

/// Efficiency classification of one evaluated unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EfficiencyStatus {
    /// On the efficiency frontier (score within tolerance of 1)
    Efficient,
    /// Solved, but dominated by a combination of peers
    Inefficient,
    /// The unit's LP could not be solved to optimality
    Unsolved,
}

impl fmt::Display for EfficiencyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EfficiencyStatus::Efficient => write!(f, "Efficient"),
            EfficiencyStatus::Inefficient => write!(f, "Inefficient"),
            EfficiencyStatus::Unsolved => write!(f, "Unsolved"),
        }
    }
}

/// LP backend to use for the per-unit solves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolverBackend {
    /// Automatically select the best available solver
    #[default]
    Auto,
    /// HiGHS
    Highs,
    /// COIN-OR CBC via good_lp
    #[cfg(feature = "coin-cbc")]
    CoinCbc,
}

impl fmt::Display for SolverBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverBackend::Auto => write!(f, "Auto"),
            SolverBackend::Highs => write!(f, "HiGHS"),
            #[cfg(feature = "coin-cbc")]
            SolverBackend::CoinCbc => write!(f, "COIN-OR CBC"),
        }
    }
}
