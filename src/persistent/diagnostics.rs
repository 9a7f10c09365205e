use serde::Serialize;
use tracing::warn;

use crate::core::types::FamilyId;

/// Data-quality observations made while selecting families.
///
/// None of these stop the computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A genome is listed in a family with no members recorded for it
    EmptyGenomeEntry { family: FamilyId, genome: String },
    /// A family has a per-genome grouping but no flat member list
    MissingMemberList { family: FamilyId },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyGenomeEntry { family, genome } => write!(
                f,
                "Family {family} lists genome {genome} without any member; possible upstream data issue"
            ),
            Self::MissingMemberList { family } => {
                write!(f, "Family {family} has no member list; skipped")
            }
        }
    }
}

/// Receiver for diagnostics raised by [`compute_persistent`](super::filter::compute_persistent)
pub trait DiagnosticsSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Keeps every diagnostic for later inspection
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub diagnostics: Vec<Diagnostic>,
}

impl CollectingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Diagnostics concerning one family
    pub fn for_family(&self, id: FamilyId) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| match d {
            Diagnostic::EmptyGenomeEntry { family, .. } | Diagnostic::MissingMemberList { family } => {
                *family == id
            }
        })
    }
}

impl DiagnosticsSink for CollectingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

/// Forwards diagnostics to `tracing` as warnings and counts them
#[derive(Debug, Default)]
pub struct TracingSink {
    pub count: usize,
}

impl DiagnosticsSink for TracingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.count += 1;
        match &diagnostic {
            Diagnostic::EmptyGenomeEntry { family, genome } => {
                warn!(family = %family, genome = %genome, "{diagnostic}");
            }
            Diagnostic::MissingMemberList { family } => {
                warn!(family = %family, "{diagnostic}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_sink_filters_by_family() {
        let mut sink = CollectingSink::new();
        sink.report(Diagnostic::EmptyGenomeEntry {
            family: FamilyId(3),
            genome: "GEN1".to_string(),
        });
        sink.report(Diagnostic::MissingMemberList { family: FamilyId(4) });

        assert_eq!(sink.diagnostics.len(), 2);
        assert_eq!(sink.for_family(FamilyId(3)).count(), 1);
        assert_eq!(sink.for_family(FamilyId(5)).count(), 0);
    }

    #[test]
    fn test_tracing_sink_counts() {
        let mut sink = TracingSink::default();
        sink.report(Diagnostic::MissingMemberList { family: FamilyId(1) });
        assert_eq!(sink.count, 1);
    }

    #[test]
    fn test_display_names_family_and_genome() {
        let d = Diagnostic::EmptyGenomeEntry {
            family: FamilyId(12),
            genome: "ESCO.1216.00002".to_string(),
        };
        let text = d.to_string();
        assert!(text.contains("12"));
        assert!(text.contains("ESCO.1216.00002"));
    }

    #[test]
    fn test_serialize_tagged() {
        let d = Diagnostic::MissingMemberList { family: FamilyId(8) };
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["kind"], "missing_member_list");
        assert_eq!(json["family"], 8);
    }
}
