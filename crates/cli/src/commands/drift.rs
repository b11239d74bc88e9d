use anyhow::{Context, Result};
use tracing::info;
use wfsim_analysis::{expected_drift_variance, ReplicateSummary};
use wfsim_sim::reporting::{ConsoleSink, SamplingCadence};
use wfsim_sim::simulation::SimulatorBuilder;
use wfsim_sim::statistics::StatRequest;

use super::execute;
use crate::args::{DriftArgs, GlobalArgs};
use crate::defaults;
use crate::printing::{print_parameters, print_replicate_summary, print_run_summary};

/// Allele frequency at a single locus drifting under random mating.
pub fn run_drift(args: &DriftArgs, global: &GlobalArgs) -> Result<()> {
    println!("🧬 wfsim - Genetic Drift");
    println!("============================================");

    let stat = StatRequest::allele_freq_name(0, 0);
    let mut builder = SimulatorBuilder::new()
        .population_size(args.pop_size)
        .allele_frequency(args.p)
        .generations(args.generations)
        .replicates(args.replications)
        .statistics(StatRequest::allele_freq([0]))
        .sampling(args.step.map_or(SamplingCadence::Derived, SamplingCadence::Every));
    if let Some(seed) = global.seed {
        builder = builder.seed(seed);
    }
    print_parameters(builder.config());
    info!(
        pop_size = args.pop_size,
        p = args.p,
        generations = args.generations,
        replicates = args.replications,
        "Running genetic drift"
    );

    let console = ConsoleSink::stdout(vec![stat.clone()], args.replications)
        .precision(defaults::DRIFT_PRECISION);
    let outcome = execute(builder, Some(console), global.output.as_deref(), global.progress)?;

    print_run_summary(&outcome.summary);
    let finals = ReplicateSummary::of_final(&outcome.records, &stat)
        .context("No allele frequencies were recorded")?;
    let expected = expected_drift_variance(args.p, args.pop_size, outcome.summary.generations);
    print_replicate_summary(&stat, &finals, Some(("variance", expected)));
    println!("  • Fixed: {}  Lost: {}", finals.fixed, finals.lost);

    Ok(())
}
