use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cli::OutputFormat;
use crate::core::pangenome::PanGenome;
use crate::core::types::{FamilyPolicy, ThresholdRounding};
use crate::output::{persistent_genome_filename, write_persistent_genome};
use crate::parsing::genome_list::parse_genome_list_file;
use crate::parsing::pangenome::{read_pangenome, CacheMode};
use crate::persistent::{compute_persistent, PersistentConfig, TracingSink};
use crate::utils::validation::parse_tolerance;

#[derive(Args)]
pub struct CorepersArgs {
    /// Pan-genome file, one family per line (gzip accepted)
    #[arg(required = true)]
    pub pangenome: PathBuf,

    /// Directory where the persistent genome file is written
    #[arg(short, long, default_value = ".")]
    pub outdir: PathBuf,

    /// Minimum fraction of genomes (0-1, default 1 = core genome)
    #[arg(short = 't', long = "tol", default_value = "1.0", value_parser = parse_tolerance)]
    pub tolerance: f64,

    /// Allow families with several members in a genome
    #[arg(short = 'M', long, conflicts_with = "mixed")]
    pub multi: bool,

    /// Require single-copy members in the tolerated fraction of genomes only;
    /// the other genomes may have 0, 1 or several members
    #[arg(short = 'X', long)]
    pub mixed: bool,

    /// Round the minimum number of genomes down instead of up
    #[arg(short = 'F', long)]
    pub floor: bool,

    /// Only use the genomes listed in this file (first column, LSTINFO format accepted)
    #[arg(short = 'l', long = "genomes")]
    pub genome_list: Option<PathBuf>,

    /// Do not read or write the binary pan-genome cache
    #[arg(long)]
    pub no_cache: bool,
}

#[derive(Debug, Serialize)]
struct CorepersReport {
    pangenome: String,
    output: String,
    description: String,
    tolerance: f64,
    policy: FamilyPolicy,
    rounding: ThresholdRounding,
    genomes: usize,
    min_members: usize,
    families: usize,
    persistent_families: usize,
    warnings: usize,
}

/// Execute corepers subcommand
///
/// # Errors
///
/// Returns an error if the parameters are inconsistent, the inputs cannot be
/// parsed, or the output cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: CorepersArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let policy = FamilyPolicy::from_flags(args.multi, args.mixed)?;
    let config = PersistentConfig::new(
        args.tolerance,
        policy,
        ThresholdRounding::from_floor_flag(args.floor),
    );
    config.validate()?;
    if config.floor_is_redundant() {
        warn!("Floor rounding has no effect with a tolerance of 1; computing the core genome");
    }

    let cache = if args.no_cache {
        CacheMode::Ignore
    } else {
        CacheMode::Use
    };
    let mut pangenome = read_pangenome(&args.pangenome, cache)
        .with_context(|| format!("Failed to read pan-genome {}", args.pangenome.display()))?;

    let subset_name = match &args.genome_list {
        Some(list) => {
            pangenome = restrict_to_list(&pangenome, list)?;
            list.file_stem().map(|s| s.to_string_lossy().into_owned())
        }
        None => None,
    };

    let genome_count = pangenome.genome_count();
    let min_members = config.min_members(genome_count);
    info!(
        genomes = genome_count,
        min_members,
        "Computing {}",
        config.describe()
    );

    let mut sink = TracingSink::default();
    let persistent = compute_persistent(
        &pangenome.family_by_strain,
        &pangenome.members,
        genome_count,
        &config,
        &mut sink,
    )?;

    std::fs::create_dir_all(&args.outdir)
        .with_context(|| format!("Failed to create output directory {}", args.outdir.display()))?;
    let output = args.outdir.join(persistent_genome_filename(
        &args.pangenome,
        &config,
        subset_name.as_deref(),
    ));
    write_persistent_genome(&persistent, &output)
        .with_context(|| format!("Failed to write persistent genome {}", output.display()))?;
    info!(
        families = persistent.len(),
        path = %output.display(),
        "Wrote persistent genome"
    );

    let report = CorepersReport {
        pangenome: args.pangenome.display().to_string(),
        output: output.display().to_string(),
        description: config.describe(),
        tolerance: config.tolerance,
        policy: config.policy,
        rounding: config.rounding,
        genomes: genome_count,
        min_members,
        families: pangenome.len(),
        persistent_families: persistent.len(),
        warnings: sink.count,
    };

    match format {
        OutputFormat::Text => print_text_report(&report, &pangenome, verbose),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Tsv => print_tsv_report(&report),
    }

    Ok(())
}

fn restrict_to_list(pangenome: &PanGenome, list: &Path) -> anyhow::Result<PanGenome> {
    let genomes: BTreeSet<String> = parse_genome_list_file(list)
        .with_context(|| format!("Failed to read genome list {}", list.display()))?;

    for genome in genomes.difference(&pangenome.genomes) {
        warn!(genome = %genome, "Listed genome has no family in the pan-genome");
    }
    debug!(
        listed = genomes.len(),
        available = pangenome.genome_count(),
        "Restricting pan-genome to listed genomes"
    );

    Ok(pangenome.restrict_to(&genomes))
}

fn print_text_report(report: &CorepersReport, pangenome: &PanGenome, verbose: bool) {
    println!("Persistent Genome");
    println!("{}", "=".repeat(60));
    println!("\nPan-genome: {}", report.pangenome);
    println!("  Families: {}", report.families);
    println!("  Genomes: {}", report.genomes);
    if verbose {
        for genome in &pangenome.genomes {
            println!("    {genome}");
        }
    }

    println!("\nSelection: {}", report.description);
    println!("  Minimum genomes: {}", report.min_members);
    println!("  Families kept: {}", report.persistent_families);
    if report.warnings > 0 {
        println!("  Data-quality warnings: {}", report.warnings);
    }
    println!("\nOutput: {}", report.output);
}

fn print_tsv_report(report: &CorepersReport) {
    println!("pangenome\toutput\ttolerance\tpolicy\tgenomes\tmin_members\tfamilies\tpersistent_families");
    println!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
        report.pangenome,
        report.output,
        report.tolerance,
        report.policy,
        report.genomes,
        report.min_members,
        report.families,
        report.persistent_families,
    );
}
