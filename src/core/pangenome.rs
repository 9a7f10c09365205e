use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::core::member::genome_of;
use crate::core::types::FamilyId;

/// Members of one family, grouped by the genome they come from
pub type StrainMembers = BTreeMap<String, Vec<String>>;

/// `family -> genome -> members`
pub type FamilyByStrain = BTreeMap<FamilyId, StrainMembers>;

/// `family -> all members`, in file order
pub type FamilyMembers = BTreeMap<FamilyId, Vec<String>>;

/// A parsed pan-genome: every family, its members, and the genomes they span
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanGenome {
    pub family_by_strain: FamilyByStrain,
    pub members: FamilyMembers,
    pub genomes: BTreeSet<String>,
}

impl PanGenome {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a family, grouping its members by genome.
    ///
    /// Returns `false` (and leaves the pan-genome untouched) if `id` is already present.
    pub fn insert_family(&mut self, id: FamilyId, members: Vec<String>) -> bool {
        if self.members.contains_key(&id) {
            return false;
        }

        let mut by_strain = StrainMembers::new();
        for member in &members {
            let genome = genome_of(member);
            if !self.genomes.contains(genome) {
                self.genomes.insert(genome.to_string());
            }
            by_strain
                .entry(genome.to_string())
                .or_default()
                .push(member.clone());
        }

        self.family_by_strain.insert(id, by_strain);
        self.members.insert(id, members);
        true
    }

    /// Number of families
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Number of distinct genomes, the `N` of the persistence threshold
    #[must_use]
    pub fn genome_count(&self) -> usize {
        self.genomes.len()
    }

    /// Keep only members of the given genomes.
    ///
    /// Families left without members are dropped. The genome set of the result is
    /// `genomes` itself, including names that never occur in any family, so that
    /// thresholds are computed against the full requested subset.
    #[must_use]
    pub fn restrict_to(&self, genomes: &BTreeSet<String>) -> Self {
        let mut restricted = Self {
            genomes: genomes.clone(),
            ..Self::default()
        };

        for (id, members) in &self.members {
            let kept: Vec<String> = members
                .iter()
                .filter(|m| genomes.contains(genome_of(m)))
                .cloned()
                .collect();
            if kept.is_empty() {
                continue;
            }

            let by_strain: StrainMembers = self
                .family_by_strain
                .get(id)
                .into_iter()
                .flatten()
                .filter(|(genome, _)| genomes.contains(genome.as_str()))
                .map(|(genome, members)| (genome.clone(), members.clone()))
                .collect();

            restricted.family_by_strain.insert(*id, by_strain);
            restricted.members.insert(*id, kept);
        }

        restricted
    }

    /// Histogram: number of genomes represented -> number of families
    #[must_use]
    pub fn genome_spread(&self) -> BTreeMap<usize, usize> {
        let mut spread = BTreeMap::new();
        for strains in self.family_by_strain.values() {
            *spread.entry(strains.len()).or_insert(0) += 1;
        }
        spread
    }

    /// Families with exactly one member in every genome of the pan-genome
    #[must_use]
    pub fn single_copy_core_count(&self) -> usize {
        let n = self.genome_count();
        self.family_by_strain
            .values()
            .filter(|strains| strains.len() == n && strains.values().all(|m| m.len() == 1))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn members(ids: &[&str]) -> Vec<String> {
        ids.iter().map(ToString::to_string).collect()
    }

    fn sample() -> PanGenome {
        let mut pan = PanGenome::new();
        pan.insert_family(
            FamilyId(1),
            members(&["GEN1.s.i1_1", "GEN2.s.i1_1", "GEN3.s.i1_1"]),
        );
        pan.insert_family(
            FamilyId(2),
            members(&["GEN1.s.i1_2", "GEN1.s.i1_3", "GEN2.s.i1_2"]),
        );
        pan.insert_family(FamilyId(3), members(&["GEN3.s.i1_4"]));
        pan
    }

    #[test]
    fn test_insert_groups_by_genome() {
        let pan = sample();
        assert_eq!(pan.len(), 3);
        assert_eq!(pan.genome_count(), 3);

        let fam2 = &pan.family_by_strain[&FamilyId(2)];
        assert_eq!(fam2.len(), 2);
        assert_eq!(fam2["GEN1.s"], members(&["GEN1.s.i1_2", "GEN1.s.i1_3"]));
        assert_eq!(pan.members[&FamilyId(2)].len(), 3);
    }

    #[test]
    fn test_insert_rejects_duplicate_id() {
        let mut pan = sample();
        assert!(!pan.insert_family(FamilyId(1), members(&["GEN9.s.i1_1"])));
        assert!(!pan.genomes.contains("GEN9.s"));
    }

    #[test]
    fn test_restrict_to_drops_other_genomes_and_empty_families() {
        let pan = sample();
        let subset: BTreeSet<String> = ["GEN1.s", "GEN2.s", "GEN7.s"]
            .iter()
            .map(ToString::to_string)
            .collect();
        let restricted = pan.restrict_to(&subset);

        assert_eq!(restricted.genome_count(), 3);
        assert_eq!(restricted.len(), 2);
        assert!(!restricted.members.contains_key(&FamilyId(3)));
        assert_eq!(restricted.members[&FamilyId(1)].len(), 2);
        assert!(!restricted.family_by_strain[&FamilyId(1)].contains_key("GEN3.s"));
    }

    #[test]
    fn test_genome_spread_and_core_count() {
        let pan = sample();
        let spread = pan.genome_spread();
        assert_eq!(spread.get(&1), Some(&1));
        assert_eq!(spread.get(&2), Some(&1));
        assert_eq!(spread.get(&3), Some(&1));
        assert_eq!(pan.single_copy_core_count(), 1);
    }
}
