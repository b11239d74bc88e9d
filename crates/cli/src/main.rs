mod args;
mod commands;
pub mod defaults;
mod printing;
mod utils;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing::debug;

use args::{DriftArgs, GlobalArgs, LdDecayArgs, RunArgs};
use commands::{drift, ld_decay, run};

/// wfsim: A Wright-Fisher Population Genetics Simulator
///
/// Simulates diploid populations under random mating, with optional
/// recombination, across independent replicates and reports allele
/// frequencies, linkage disequilibrium and heterozygosity over time.
#[derive(Parser, Debug)]
#[command(name = "wfsim")]
#[command(author, version, about = "Forward-time Wright-Fisher simulations of genetic drift and LD decay", long_about = None)]
struct Cli {
    /// Number of threads to use for parallel processing
    ///
    /// If not specified, defaults to the number of logical CPUs.
    #[arg(short = 't', long, global = true)]
    threads: Option<usize>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Genetic drift: allele frequency at one locus under random mating.
    ///
    /// Prints the frequency of the first allele in every replicate each
    /// sampled generation.
    Drift(DriftArgs),

    /// Decay of linkage disequilibrium between two loci due to recombination.
    ///
    /// Every individual starts as 01/10; the chosen LD measure is printed
    /// for every replicate each generation.
    LdDecay(LdDecayArgs),

    /// Run a simulation described by a JSON configuration file.
    Run(RunArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    utils::init_tracing(cli.verbose)?;

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()?;
        debug!(threads, "Configured global thread pool");
    }

    match &cli.command {
        Commands::Drift(args) => drift::run_drift(args, &cli.global)?,
        Commands::LdDecay(args) => ld_decay::run_ld_decay(args, &cli.global)?,
        Commands::Run(args) => run::run_simulation(args, &cli.global)?,
    }

    Ok(())
}
