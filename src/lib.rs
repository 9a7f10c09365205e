//! # corepers
//!
//! A library for extracting core and persistent genomes from bacterial pan-genomes.
//!
//! A pan-genome groups every protein of a set of genomes into families of
//! putative orthologs. The *core genome* is the set of families with exactly one
//! member in every genome; the *persistent genome* relaxes this to a fraction of
//! the genomes, optionally allowing multi-copy families.
//!
//! ## Features
//!
//! - **Pan-genome reading**: plain or gzip files, with a binary cache
//! - **Three family policies**: strict, multi and mixed, selected once as a [`FamilyPolicy`]
//! - **Floor or ceiling thresholds**: `tolerance × genomes` rounded either way
//! - **Genome subsets**: compute over a listed subset of the genomes
//! - **Deterministic output**: families in numeric order, members grouped by genome
//!
//! ## Example
//!
//! ```rust,no_run
//! use corepers::parsing::pangenome::{read_pangenome, CacheMode};
//! use corepers::persistent::{compute_persistent, PersistentConfig, TracingSink};
//! use corepers::{FamilyPolicy, ThresholdRounding};
//! use std::path::Path;
//!
//! let pan = read_pangenome(Path::new("PanGenome-ESCO.lst"), CacheMode::Use).unwrap();
//!
//! // Single-copy in at least 95% of genomes, anything in the rest
//! let config = PersistentConfig::new(0.95, FamilyPolicy::Mixed, ThresholdRounding::Floor);
//! let mut sink = TracingSink::default();
//! let persistent = compute_persistent(
//!     &pan.family_by_strain,
//!     &pan.members,
//!     pan.genome_count(),
//!     &config,
//!     &mut sink,
//! )
//! .unwrap();
//!
//! corepers::output::write_persistent_genome(&persistent, Path::new("PersGenome.lst")).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Family ids, policies, member naming and the pan-genome structure
//! - [`parsing`]: Pan-genome and genome list readers
//! - [`persistent`]: Persistent genome selection
//! - [`output`]: Persistent genome and quantitative matrix writers
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod output;
pub mod parsing;
pub mod persistent;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::pangenome::PanGenome;
pub use crate::core::types::*;
pub use persistent::{compute_persistent, PersistentConfig, PersistentGenome};
