use serde::{Deserialize, Serialize};

use crate::persistent::config::PolicyError;

/// Identifier of a gene family within one pan-genome file.
///
/// Ids are only stable inside the file they were read from. Ordering is numeric,
/// so `2 < 10` holds even though `"10" < "2"` lexicographically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FamilyId(pub u64);

impl FamilyId {
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for FamilyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for FamilyId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(Self)
    }
}

/// Membership rule a family must satisfy to be kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FamilyPolicy {
    /// Exactly one member in every represented genome
    #[default]
    Strict,
    /// Any number of members per represented genome
    Multi,
    /// Exactly one member in enough genomes, anything in the others
    Mixed,
}

impl FamilyPolicy {
    /// Map the `--multi` / `--mixed` pair of flags onto a single policy.
    ///
    /// # Errors
    ///
    /// Returns `PolicyError::MultiAndMixed` when both flags are set.
    pub fn from_flags(multi: bool, mixed: bool) -> Result<Self, PolicyError> {
        match (multi, mixed) {
            (true, true) => Err(PolicyError::MultiAndMixed),
            (true, false) => Ok(Self::Multi),
            (false, true) => Ok(Self::Mixed),
            (false, false) => Ok(Self::Strict),
        }
    }

    /// Suffix used in output file names (`-multi`, `-mixed`, or nothing)
    #[must_use]
    pub fn file_suffix(self) -> &'static str {
        match self {
            Self::Strict => "",
            Self::Multi => "-multi",
            Self::Mixed => "-mixed",
        }
    }
}

impl std::fmt::Display for FamilyPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Strict => write!(f, "strict"),
            Self::Multi => write!(f, "multi"),
            Self::Mixed => write!(f, "mixed"),
        }
    }
}

/// How `tolerance × genome count` is turned into a whole number of genomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdRounding {
    #[default]
    Ceil,
    Floor,
}

impl ThresholdRounding {
    #[must_use]
    pub fn from_floor_flag(floor: bool) -> Self {
        if floor {
            Self::Floor
        } else {
            Self::Ceil
        }
    }
}
