//! Persistent and core genome selection.
//!
//! - [`PersistentConfig`]: tolerance, family policy and threshold rounding
//! - [`compute_persistent`]: the family filter
//! - [`DiagnosticsSink`]: where data-quality warnings go
//!
//! ## Policies
//!
//! With `N` genomes and `min = ceil(tolerance × N)` (or `floor` with
//! [`ThresholdRounding::Floor`](crate::core::types::ThresholdRounding::Floor)):
//!
//! | Policy | A family is kept when |
//! |--------|-----------------------|
//! | Strict | it spans at least `min` genomes, each with exactly one member |
//! | Multi  | it spans at least `min` genomes, any number of members each |
//! | Mixed  | at least `min` genomes have exactly one member, the rest are free |
//!
//! Strict at tolerance 1 is the core genome. Mixed at tolerance 1 is rejected.
//!
//! ## Example
//!
//! ```rust
//! use corepers::parsing::pangenome::parse_pangenome_text;
//! use corepers::persistent::{compute_persistent, CollectingSink, PersistentConfig};
//!
//! let pan = parse_pangenome_text(
//!     "1 GEN1.c.i1_1 GEN2.c.i1_1\n2 GEN1.c.i1_2 GEN1.c.i1_3 GEN2.c.i1_2\n",
//! )
//! .unwrap();
//!
//! let mut sink = CollectingSink::new();
//! let core = compute_persistent(
//!     &pan.family_by_strain,
//!     &pan.members,
//!     pan.genome_count(),
//!     &PersistentConfig::default(),
//!     &mut sink,
//! )
//! .unwrap();
//! assert_eq!(core.len(), 1);
//! ```

pub mod config;
pub mod diagnostics;
pub mod filter;

pub use config::{PersistentConfig, PolicyError};
pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticsSink, TracingSink};
pub use filter::{compute_persistent, PersistentGenome};
