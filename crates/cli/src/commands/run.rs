use anyhow::{bail, Context, Result};
use tracing::info;
use wfsim_analysis::ReplicateSummary;
use wfsim_sim::reporting::ConsoleSink;
use wfsim_sim::simulation::{Configuration, SimulatorBuilder};

use super::execute;
use crate::args::{GlobalArgs, RunArgs};
use crate::defaults;
use crate::printing::{print_parameters, print_replicate_summary, print_run_summary};

/// Run a simulation described by a JSON configuration file.
pub fn run_simulation(args: &RunArgs, global: &GlobalArgs) -> Result<()> {
    println!("🧬 wfsim - Running Simulation");
    println!("============================================");

    let mut config = Configuration::from_json_file(&args.config)
        .with_context(|| format!("Failed to load configuration from {}", args.config.display()))?;
    if let Some(seed) = global.seed {
        config.execution.seed = Some(seed);
        config.execution.replicate_seeds = None;
    }
    if let Some(generations) = args.generations {
        config.execution.generations = generations;
    }
    if let Some(replicates) = args.replicates {
        config.execution.replicates = replicates;
    }
    config.validate().context("Invalid configuration")?;

    let available = config.statistics.names(&config.layout()?);
    let stats = if args.stats.is_empty() {
        available.clone()
    } else {
        if let Some(unknown) = args.stats.iter().find(|s| !available.contains(s)) {
            bail!(
                "Unknown statistic '{unknown}'. Available: {}",
                available.join(", ")
            );
        }
        args.stats.clone()
    };

    print_parameters(&config);
    if !stats.is_empty() {
        println!("Columns per replicate: {}", stats.join(" "));
    }

    let replicates = config.execution.replicates;
    info!(
        config = %args.config.display(),
        generations = config.execution.generations,
        replicates,
        "Running configured simulation"
    );
    let console = (!stats.is_empty()).then(|| {
        ConsoleSink::stdout(stats.clone(), replicates).precision(defaults::RUN_PRECISION)
    });
    let outcome = execute(
        SimulatorBuilder::from_config(config),
        console,
        global.output.as_deref(),
        global.progress,
    )?;

    print_run_summary(&outcome.summary);
    for stat in &stats {
        if let Some(summary) = ReplicateSummary::of_final(&outcome.records, stat) {
            print_replicate_summary(stat, &summary, None);
        }
    }

    Ok(())
}
