//! Solver tolerances and pivot handling
//!
//! A single [`SolverConfig`] drives every tolerance decision in the crate:
//! unit-diagonal validation, the LDR pivot test and the Thomas pivot test.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Numerical tolerance used for near-zero and near-unity comparisons.
pub const EPSILON: f64 = 1.0e-6;

/// What the LDR factorization does with a pivot smaller than the tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PivotPolicy {
    /// Accept non-zero pivots below the tolerance, record them and warn.
    ///
    /// Exact-zero pivots are rejected regardless.
    #[default]
    Lenient,
    /// Reject any pivot whose magnitude is below the tolerance.
    Strict,
}

/// Configuration shared by the direct solvers
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolverConfig {
    /// Magnitude under which a pivot counts as (nearly) zero
    #[cfg_attr(feature = "serde", serde(default = "default_tolerance"))]
    pub tolerance: f64,
    /// Handling of near-singular LDR pivots
    #[cfg_attr(feature = "serde", serde(default))]
    pub pivot_policy: PivotPolicy,
}

#[cfg(feature = "serde")]
fn default_tolerance() -> f64 {
    EPSILON
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: EPSILON,
            pivot_policy: PivotPolicy::Lenient,
        }
    }
}

impl SolverConfig {
    /// Default configuration with the strict pivot policy.
    pub fn strict() -> Self {
        Self {
            pivot_policy: PivotPolicy::Strict,
            ..Self::default()
        }
    }

    /// Replace the tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Replace the pivot policy.
    pub fn with_pivot_policy(mut self, pivot_policy: PivotPolicy) -> Self {
        self.pivot_policy = pivot_policy;
        self
    }

    pub(crate) fn is_strict(&self) -> bool {
        self.pivot_policy == PivotPolicy::Strict
    }
}
