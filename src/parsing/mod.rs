//! Parsers for pan-genome clustering output.
//!
//! This module provides parsers for:
//!
//! - **Pan-genome files**: one family per line, `<family_id> <member>...`,
//!   plain or gzip-compressed, with an optional binary cache
//! - **Genome lists**: the genomes to restrict a computation to
//!
//! ## Example
//!
//! ```rust,no_run
//! use corepers::parsing::pangenome::{read_pangenome, CacheMode};
//! use std::path::Path;
//!
//! let pan = read_pangenome(Path::new("PanGenome-ESCO.lst"), CacheMode::Use).unwrap();
//! println!("{} families over {} genomes", pan.len(), pan.genome_count());
//! ```

pub mod genome_list;
pub mod pangenome;
