use clap::Parser;
use tracing_subscriber::EnvFilter;

use corepers::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flags
    let filter = if cli.quiet {
        EnvFilter::new("corepers=error")
    } else if cli.verbose {
        EnvFilter::new("corepers=debug,info")
    } else {
        EnvFilter::new("corepers=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Corepers(args) => {
            cli::corepers::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Inspect(args) => {
            cli::inspect::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
