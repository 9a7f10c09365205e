//! Command-line interface for corepers.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **corepers**: Compute the core or persistent genome of a pan-genome
//! - **inspect**: Summarize a pan-genome and optionally write its quantitative matrix
//!
//! ## Usage
//!
//! ```text
//! # Core genome: one member in every genome
//! corepers corepers PanGenome-ESCO.lst -o results
//!
//! # Persistent genome: one member in at least 95% of genomes (rounded down)
//! corepers corepers PanGenome-ESCO.lst -t 0.95 -F
//!
//! # Same, but allow multi-copy genes in the other 5%
//! corepers corepers PanGenome-ESCO.lst -t 0.95 -X
//!
//! # Only consider the genomes listed in a LSTINFO file
//! corepers corepers PanGenome-ESCO.lst -t 0.95 -l LSTINFO-subset.lst
//!
//! # Pan-genome summary as JSON
//! corepers inspect PanGenome-ESCO.lst --format json
//! ```

use clap::{Parser, Subcommand};

pub mod corepers;
pub mod inspect;

#[derive(Parser)]
#[command(name = "corepers")]
#[command(version)]
#[command(about = "Extract core and persistent genomes from a pan-genome")]
#[command(
    long_about = "corepers selects the gene families of a pan-genome that are present in enough genomes.\n\nFamilies can be required to be single-copy in every genome they span (strict), allowed any number of copies (multi), or be single-copy in enough genomes while the others are unconstrained (mixed)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute the core or persistent genome of a pan-genome
    Corepers(corepers::CorepersArgs),

    /// Summarize a pan-genome
    Inspect(inspect::InspectArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
