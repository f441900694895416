//! scanidx CLI binary.
//!
//! Compares a scanner-data index with a published index and ranks turnover
//! growth from the command line.

mod commands;
mod settings;

use clap::{Parser, Subcommand};
use commands::{CompareArgs, GroupsArgs, GrowthArgs, TrendsArgs};
use std::path::PathBuf;
use std::process;

#[derive(Debug, Parser)]
#[command(name = "scanidx")]
#[command(about = "Scanner-data sales index comparison and turnover growth", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compare the rebased scanner index with the published index
    Compare(CompareArgs),

    /// Rank turnover growth at the latest period
    Growth(GrowthArgs),

    /// Expenditure trends relative to each group's first period
    Trends(TrendsArgs),

    /// List configured commodity groups
    Groups(GroupsArgs),
}

fn main() {
    let cli = Cli::parse();
    settings::init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = settings::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Compare(args) => commands::compare::run(&args, &config)?,
        Commands::Growth(args) => commands::growth::run(&args, &config)?,
        Commands::Trends(args) => commands::trends::run(&args, &config)?,
        Commands::Groups(args) => commands::groups::run(&args, &config)?,
    }

    Ok(())
}
