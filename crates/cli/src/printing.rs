use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use wfsim_analysis::ReplicateSummary;
use wfsim_sim::evolution::{RecombinationConfig, SexMode};
use wfsim_sim::reporting::SamplingCadence;
use wfsim_sim::simulation::{Configuration, InitGenotype, RunSummary};

pub fn print_parameters(config: &Configuration) {
    let population = &config.population;
    let execution = &config.execution;

    println!("\n📋 Simulation Configuration");
    println!("  • Population Size: {}", population.size);
    println!("  • Generations: {}", execution.generations);
    println!("  • Replicates: {}", execution.replicates);
    match (&execution.replicate_seeds, execution.seed) {
        (Some(seeds), _) => println!("  • Random Seeds: {seeds:?}"),
        (None, Some(seed)) => println!("  • Random Seed: {seed} [--seed]"),
        (None, None) => println!("  • Random Seed: Random [--seed]"),
    }

    println!("\n🧬 Genome");
    println!("  • Loci per Chromosome: {:?}", population.loci);
    println!("  • Alleles per Locus: {}", population.alleles);
    match &config.initialization {
        InitGenotype::Frequencies { freq } => println!("  • Initial Frequencies: {freq:?}"),
        InitGenotype::Genotype { genotype } => println!("  • Initial Genotype: {genotype:?}"),
    }

    println!("\n🔀 Mating");
    match config.mating.sex {
        SexMode::Random => println!("  • Parents: random, with replacement"),
        SexMode::Paired => println!("  • Parents: one male and one female"),
    }
    match &config.mating.recombination {
        None => println!("  • Recombination: none"),
        Some(RecombinationConfig::Uniform { rate }) => {
            println!("  • Recombination: {rate} between adjacent loci")
        }
        Some(RecombinationConfig::PerInterval { rates }) => {
            println!("  • Recombination: per interval {rates:?}")
        }
        Some(RecombinationConfig::Intensity { intensity }) => {
            println!("  • Recombination: intensity {intensity} per map unit")
        }
    }

    let step = execution.sampling.step(execution.generations);
    match execution.sampling {
        SamplingCadence::Derived => println!("\n📈 Sampling every {step} generations (derived)"),
        SamplingCadence::Every(_) => println!("\n📈 Sampling every {step} generations"),
    }
    println!();
}

/// Progress bar over the generations of a run.
pub fn progress_bar(generations: usize) -> Result<ProgressBar> {
    let pb = ProgressBar::new(generations as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {per_sec}")?
            .progress_chars("#>-"),
    );
    Ok(pb)
}

pub fn print_run_summary(summary: &RunSummary) {
    println!("\n✓ Simulation complete!");
    println!(
        "  • Generations: {}{}",
        summary.generations,
        if summary.stopped_early { " (stopped early)" } else { "" }
    );
    println!("  • Replicates: {}", summary.replicates);
    println!("  • Sampled Generations: {}", summary.samples);
    if summary.sink_errors > 0 {
        println!("  ⚠️  Output errors: {} (see log)", summary.sink_errors);
    }
}

pub fn print_replicate_summary(stat: &str, summary: &ReplicateSummary, expected: Option<(&str, f64)>) {
    println!("\n📊 Final {stat} across {} replicates", summary.replicates);
    println!("  • Mean: {:.4}  Median: {:.4}", summary.mean, summary.median);
    println!("  • Range: {:.4} .. {:.4}", summary.min, summary.max);
    println!("  • Variance: {:.4}", summary.variance);
    if let Some((label, value)) = expected {
        println!("  • Expected {label}: {value:.4}");
    }
}
