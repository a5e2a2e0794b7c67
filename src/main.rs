use clap::Parser;
use tracing_subscriber::EnvFilter;

mod batch;
mod catalog;
mod cli;
mod core;
mod matching;
mod parsing;
mod utils;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("cdr3_solver=debug,info")
    } else {
        EnvFilter::new("cdr3_solver=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Fix(args) => {
            cli::fix::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Align(args) => {
            cli::align::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Library(args) => {
            cli::library::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
