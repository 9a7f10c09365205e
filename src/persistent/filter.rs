use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::pangenome::{FamilyByStrain, FamilyMembers, StrainMembers};
use crate::core::types::{FamilyId, FamilyPolicy};
use crate::persistent::config::{PersistentConfig, PolicyError};
use crate::persistent::diagnostics::{Diagnostic, DiagnosticsSink};

/// Families kept by a persistent-genome selection, with their full member lists
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PersistentGenome {
    pub families: BTreeMap<FamilyId, Vec<String>>,
}

impl PersistentGenome {
    #[must_use]
    pub fn len(&self) -> usize {
        self.families.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: FamilyId) -> bool {
        self.families.contains_key(&id)
    }

    #[must_use]
    pub fn get(&self, id: FamilyId) -> Option<&Vec<String>> {
        self.families.get(&id)
    }

    /// Family ids in ascending numeric order
    pub fn ids(&self) -> impl Iterator<Item = FamilyId> + '_ {
        self.families.keys().copied()
    }
}

/// Select the families that satisfy `config` over `total_genome_count` genomes.
///
/// Inputs are only read. The member list of each kept family is copied as-is from
/// `all_members`. Genomes listed with no member are reported to `sink` and never
/// count as single-copy.
///
/// # Errors
///
/// Returns a `PolicyError` if `config` is invalid or `total_genome_count` is 0.
/// Nothing is evaluated in that case.
pub fn compute_persistent(
    family_by_strain: &FamilyByStrain,
    all_members: &FamilyMembers,
    total_genome_count: usize,
    config: &PersistentConfig,
    sink: &mut dyn DiagnosticsSink,
) -> Result<PersistentGenome, PolicyError> {
    config.validate()?;
    if total_genome_count == 0 {
        return Err(PolicyError::NoGenomes);
    }

    let min_members = config.min_members(total_genome_count);
    let mut persistent = PersistentGenome::default();

    for (&id, strains) in family_by_strain {
        report_empty_entries(id, strains, sink);

        let keep = match config.policy {
            FamilyPolicy::Mixed => mixed_family(strains, min_members),
            FamilyPolicy::Multi => strains.len() >= min_members,
            FamilyPolicy::Strict => strains.len() >= min_members && single_copy_family(strains),
        };
        if !keep {
            continue;
        }

        match all_members.get(&id) {
            Some(members) => {
                persistent.families.insert(id, members.clone());
            }
            None => sink.report(Diagnostic::MissingMemberList { family: id }),
        }
    }

    Ok(persistent)
}

fn report_empty_entries(id: FamilyId, strains: &StrainMembers, sink: &mut dyn DiagnosticsSink) {
    for (genome, members) in strains {
        if members.is_empty() {
            sink.report(Diagnostic::EmptyGenomeEntry {
                family: id,
                genome: genome.clone(),
            });
        }
    }
}

/// Every represented genome has exactly one member
fn single_copy_family(strains: &StrainMembers) -> bool {
    strains.values().all(|members| members.len() == 1)
}

/// At least `min_members` genomes have exactly one member; other genomes are free
fn mixed_family(strains: &StrainMembers, min_members: usize) -> bool {
    let mut single_copy = 0;
    for members in strains.values() {
        if single_copy >= min_members {
            return true;
        }
        if members.len() == 1 {
            single_copy += 1;
        }
    }
    single_copy >= min_members
}
