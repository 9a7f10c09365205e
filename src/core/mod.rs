//! Core data types for pan-genome families.
//!
//! - [`FamilyId`]: numeric identifier of a gene family
//! - [`FamilyPolicy`], [`ThresholdRounding`]: how families are selected
//! - [`PanGenome`]: families grouped by genome, plus the flat member lists
//! - [`member`]: member naming convention and ordering
//!
//! ## Member naming
//!
//! | Identifier | Genome | Contig | Protein |
//! |------------|--------|--------|---------|
//! | `ESCO.1216.00002.i0001_00001` | `ESCO.1216.00002` | `i0001` | `00001` |
//! | `strainA_00004` | `strainA` | | `00004` |

pub mod member;
pub mod pangenome;
pub mod types;
