use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use serde::Serialize;
use tracing::info;

use crate::cli::OutputFormat;
use crate::output::write_quanti;
use crate::parsing::pangenome::{read_pangenome, CacheMode};

#[derive(Args)]
pub struct InspectArgs {
    /// Pan-genome file, one family per line (gzip accepted)
    #[arg(required = true)]
    pub pangenome: PathBuf,

    /// Write the family x genome member-count matrix to this file
    #[arg(long)]
    pub quanti: Option<PathBuf>,

    /// Do not read or write the binary pan-genome cache
    #[arg(long)]
    pub no_cache: bool,
}

#[derive(Debug, Serialize)]
struct PanGenomeSummary {
    pangenome: String,
    families: usize,
    genomes: usize,
    single_copy_core: usize,
    /// number of genomes represented -> number of families
    genome_spread: BTreeMap<usize, usize>,
}

/// Execute inspect subcommand
///
/// # Errors
///
/// Returns an error if the pan-genome cannot be read or the matrix cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: InspectArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let cache = if args.no_cache {
        CacheMode::Ignore
    } else {
        CacheMode::Use
    };
    let pangenome = read_pangenome(&args.pangenome, cache)
        .with_context(|| format!("Failed to read pan-genome {}", args.pangenome.display()))?;

    if let Some(path) = &args.quanti {
        write_quanti(&pangenome, path)
            .with_context(|| format!("Failed to write quantitative matrix {}", path.display()))?;
        info!(path = %path.display(), "Wrote quantitative matrix");
    }

    let summary = PanGenomeSummary {
        pangenome: args.pangenome.display().to_string(),
        families: pangenome.len(),
        genomes: pangenome.genome_count(),
        single_copy_core: pangenome.single_copy_core_count(),
        genome_spread: pangenome.genome_spread(),
    };

    match format {
        OutputFormat::Text => {
            print_text_summary(&summary);
            if verbose {
                println!("\nGenomes:");
                for genome in &pangenome.genomes {
                    println!("  {genome}");
                }
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Tsv => print_tsv_summary(&summary),
    }

    Ok(())
}

fn print_text_summary(summary: &PanGenomeSummary) {
    println!("Pan-genome Summary");
    println!("{}", "=".repeat(60));
    println!("\nPan-genome: {}", summary.pangenome);
    println!("  Families: {}", summary.families);
    println!("  Genomes: {}", summary.genomes);
    println!("  Single-copy core families: {}", summary.single_copy_core);

    println!("\nFamilies by number of genomes:");
    for (genomes, families) in &summary.genome_spread {
        println!("  {genomes:>6} genomes: {families}");
    }
}

fn print_tsv_summary(summary: &PanGenomeSummary) {
    println!("genomes_represented\tfamilies");
    for (genomes, families) in &summary.genome_spread {
        println!("{genomes}\t{families}");
    }
}
