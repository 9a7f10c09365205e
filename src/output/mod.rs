//! Writers for the files produced from a pan-genome.
//!
//! - [`persgenome`]: persistent/core genome family list (`PersGenome_*.lst`)
//! - [`quanti`]: family × genome member-count matrix

pub mod persgenome;
pub mod quanti;

pub use persgenome::{persistent_genome_filename, write_persistent_genome};
pub use quanti::write_quanti;
