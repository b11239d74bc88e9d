use anyhow::{Context, Result};
use tracing::info;
use wfsim_analysis::{expected_ld_decay, ReplicateSummary};
use wfsim_sim::reporting::{ConsoleSink, SamplingCadence};
use wfsim_sim::simulation::SimulatorBuilder;
use wfsim_sim::statistics::{LdMeasure, StatRequest};

use super::execute;
use crate::args::{GlobalArgs, LdDecayArgs};
use crate::defaults;
use crate::printing::{print_parameters, print_replicate_summary, print_run_summary};

/// Decay of linkage disequilibrium between two loci under recombination.
pub fn run_ld_decay(args: &LdDecayArgs, global: &GlobalArgs) -> Result<()> {
    println!("🧬 wfsim - Decay of Linkage Disequilibrium r={:.6}", args.rec_rate);
    println!("============================================");

    let stat = args.measure.stat_name(0, 1);
    let mut builder = SimulatorBuilder::new()
        .population_size(args.pop_size)
        .loci(vec![2])
        .init_genotype(defaults::LD_START_GENOTYPE.to_vec())
        .recombination_rate(args.rec_rate)
        .generations(args.generations)
        .replicates(args.num_rep)
        .statistics(StatRequest::allele_freq([0]).with_ld(0, 1))
        .sampling(SamplingCadence::Every(1));
    if let Some(seed) = global.seed {
        builder = builder.seed(seed);
    }
    print_parameters(builder.config());
    println!(
        "{} per generation and replicate (range 0 .. {})",
        args.measure,
        args.measure.upper_limit()
    );

    let console = ConsoleSink::stdout(vec![stat.clone()], args.num_rep)
        .precision(defaults::LD_PRECISION)
        .show_generation(false);
    info!(
        pop_size = args.pop_size,
        rec_rate = args.rec_rate,
        generations = args.generations,
        replicates = args.num_rep,
        measure = %args.measure,
        "Running LD decay"
    );
    let output = args.save_figure.as_deref().or(global.output.as_deref());
    let outcome = execute(builder, Some(console), output, global.progress)?;

    print_run_summary(&outcome.summary);
    let finals = ReplicateSummary::of_final(&outcome.records, &stat)
        .with_context(|| format!("{stat} was undefined in every replicate"))?;
    let expected = match args.measure {
        LdMeasure::D => Some((
            "|D|",
            expected_ld_decay(defaults::LD_INITIAL_D, args.rec_rate, outcome.summary.generations),
        )),
        LdMeasure::DPrime | LdMeasure::R2 => None,
    };
    print_replicate_summary(&stat, &finals, expected);

    Ok(())
}
