use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::types::{FamilyPolicy, ThresholdRounding};
use crate::utils::validation::is_valid_tolerance;

/// Products closer than this to an integer are treated as that integer, so that
/// e.g. `0.07 * 100.0 = 7.000000000000001` does not ceil to 8.
const SNAP_EPSILON: f64 = 1e-9;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PolicyError {
    #[error("Tolerance must be between 0 and 1, got {0}")]
    InvalidTolerance(f64),

    #[error("Multi and mixed families are mutually exclusive")]
    MultiAndMixed,

    #[error("Mixed families need a tolerance below 1: at 100% every genome must have exactly one member")]
    MixedWithFullTolerance,

    #[error("Cannot compute a persistent genome over zero genomes")]
    NoGenomes,
}

/// Safely convert usize to f64 for threshold calculations
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Selection parameters for a persistent genome
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PersistentConfig {
    /// Minimum fraction of genomes a family must satisfy the policy in
    pub tolerance: f64,
    pub policy: FamilyPolicy,
    pub rounding: ThresholdRounding,
}

impl Default for PersistentConfig {
    /// Strict core genome
    fn default() -> Self {
        Self {
            tolerance: 1.0,
            policy: FamilyPolicy::Strict,
            rounding: ThresholdRounding::Ceil,
        }
    }
}

impl PersistentConfig {
    #[must_use]
    pub fn new(tolerance: f64, policy: FamilyPolicy, rounding: ThresholdRounding) -> Self {
        Self {
            tolerance,
            policy,
            rounding,
        }
    }

    /// Check the combination of parameters.
    ///
    /// # Errors
    ///
    /// Returns `PolicyError::InvalidTolerance` if the tolerance is not in `[0, 1]`,
    /// or `PolicyError::MixedWithFullTolerance` for mixed families at tolerance 1.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if !is_valid_tolerance(self.tolerance) {
            return Err(PolicyError::InvalidTolerance(self.tolerance));
        }
        if self.policy == FamilyPolicy::Mixed && self.is_full_tolerance() {
            return Err(PolicyError::MixedWithFullTolerance);
        }
        Ok(())
    }

    #[must_use]
    pub fn is_full_tolerance(&self) -> bool {
        (self.tolerance - 1.0).abs() < f64::EPSILON
    }

    /// Floor and ceiling coincide at tolerance 1, so asking for floor changes nothing
    #[must_use]
    pub fn floor_is_redundant(&self) -> bool {
        self.rounding == ThresholdRounding::Floor && self.is_full_tolerance()
    }

    /// Strict selection at tolerance 1
    #[must_use]
    pub fn is_core(&self) -> bool {
        self.policy == FamilyPolicy::Strict && self.is_full_tolerance()
    }

    /// Minimum number of genomes a family must satisfy the policy in
    #[must_use]
    pub fn min_members(&self, genome_count: usize) -> usize {
        let product = self.tolerance * count_to_f64(genome_count);
        let nearest = product.round();
        let product = if (product - nearest).abs() < SNAP_EPSILON {
            nearest
        } else {
            product
        };

        let threshold = match self.rounding {
            ThresholdRounding::Ceil => product.ceil(),
            ThresholdRounding::Floor => product.floor(),
        };

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // 0 <= threshold <= N
        let threshold = threshold.max(0.0) as usize;
        threshold.min(genome_count)
    }

    /// Human-readable description for logs and reports
    #[must_use]
    pub fn describe(&self) -> String {
        if self.is_core() {
            return "core genome".to_string();
        }
        let rounding = match self.rounding {
            ThresholdRounding::Ceil => "ceil",
            ThresholdRounding::Floor => "floor",
        };
        format!(
            "persistent genome ({}% of genomes, {rounding}, {} families)",
            self.tolerance * 100.0,
            self.policy
        )
    }
}
