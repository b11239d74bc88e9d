use clap::Args;
use std::path::PathBuf;
use wfsim_sim::statistics::LdMeasure;

use crate::defaults;

/// Accept integers greater than zero.
pub fn positive_int(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(format!("{value} is an invalid positive int value")),
    }
}

/// Accept values strictly between 0 and 1.
pub fn probability(value: &str) -> Result<f64, String> {
    match value.parse::<f64>() {
        Ok(v) if v > 0.0 && v < 1.0 => Ok(v),
        _ => Err(format!("{value} is an invalid frequency value")),
    }
}

/// Accept recombination rates in (0, 0.5].
pub fn recombination_rate(value: &str) -> Result<f64, String> {
    match value.parse::<f64>() {
        Ok(v) if v > 0.0 && v <= 0.5 => Ok(v),
        _ => Err(format!("{value} is an invalid recombination rate")),
    }
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Master random seed (default: fresh entropy)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Also write every sampled statistic to this file
    ///
    /// A `{rep}` placeholder writes one file per replicate. Files ending in
    /// `.jsonl` are written as JSON lines, anything else as CSV.
    #[arg(short, long, global = true)]
    pub output: Option<String>,

    /// Show progress bar
    #[arg(long, global = true)]
    pub progress: bool,
}

#[derive(Args, Debug)]
pub struct DriftArgs {
    /// Population size
    #[arg(long, alias = "popSize", default_value_t = defaults::DRIFT_POP_SIZE, value_parser = positive_int)]
    pub pop_size: usize,

    /// Initial allele frequency
    #[arg(long, default_value_t = defaults::DRIFT_INITIAL_FREQ, value_parser = probability)]
    pub p: f64,

    /// Number of generations
    #[arg(long, default_value_t = defaults::DRIFT_GENERATIONS, value_parser = positive_int)]
    pub generations: usize,

    /// Number of replicates
    #[arg(long, default_value_t = defaults::DRIFT_REPLICATIONS, value_parser = positive_int)]
    pub replications: usize,

    /// Print every N generations instead of the step derived from --generations
    #[arg(long, value_parser = positive_int)]
    pub step: Option<usize>,
}

#[derive(Args, Debug)]
pub struct LdDecayArgs {
    /// Population size
    #[arg(long, alias = "popSize", default_value_t = defaults::LD_POP_SIZE, value_parser = positive_int)]
    pub pop_size: usize,

    /// Generations to evolve
    #[arg(long = "gen", default_value_t = defaults::LD_GENERATIONS, value_parser = positive_int)]
    pub generations: usize,

    /// Recombination rate between the two loci (at most 0.5)
    #[arg(long, alias = "recRate", default_value_t = defaults::LD_REC_RATE, value_parser = recombination_rate)]
    pub rec_rate: f64,

    /// Number of replicates
    #[arg(long, alias = "numRep", default_value_t = defaults::LD_REPLICATES, value_parser = positive_int)]
    pub num_rep: usize,

    /// LD measure to be displayed (D, D' or R2)
    #[arg(long, default_value = "D")]
    pub measure: LdMeasure,

    /// File template for the displayed series, e.g. `ld_{rep}.csv`
    ///
    /// Takes precedence over --output.
    #[arg(long, alias = "saveFigure")]
    pub save_figure: Option<String>,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Simulation configuration (JSON)
    #[arg(short, long)]
    pub config: PathBuf,

    /// Statistic to print per replicate (repeatable; default: all requested)
    #[arg(long = "stat")]
    pub stats: Vec<String>,

    /// Override the configured number of generations
    #[arg(short, long, value_parser = positive_int)]
    pub generations: Option<usize>,

    /// Override the configured number of replicates
    #[arg(short, long, value_parser = positive_int)]
    pub replicates: Option<usize>,
}
