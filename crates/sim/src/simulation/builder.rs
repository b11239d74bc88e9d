//! Builder pattern for creating simulations.
//!
//! Provides a fluent API over [`Configuration`] with sensible defaults;
//! validation happens once, in [`SimulatorBuilder::build`].

use crate::base::Allele;
use crate::errors::SimulationError;
use crate::evolution::{RecombinationConfig, SexMode};
use crate::reporting::{SamplingCadence, StatisticsSink};
use crate::simulation::{Configuration, InitGenotype, Simulator};
use crate::statistics::StatRequest;

/// Builder for constructing [`Simulator`] instances with a fluent API.
///
/// Defaults: 100 individuals, one locus, allele frequencies `[0.5, 0.5]`,
/// 100 generations, one replicate, random mating without recombination,
/// derived sampling cadence and no sinks.
///
/// # Examples
///
/// ```
/// use wfsim_sim::simulation::SimulatorBuilder;
/// use wfsim_sim::statistics::StatRequest;
///
/// let mut sim = SimulatorBuilder::new()
///     .population_size(100)
///     .allele_frequency(0.2)
///     .generations(100)
///     .replicates(5)
///     .statistics(StatRequest::allele_freq([0]))
///     .seed(42)
///     .build()
///     .unwrap();
/// let summary = sim.run().unwrap();
/// assert_eq!(summary.generations, 100);
/// ```
#[derive(Default)]
pub struct SimulatorBuilder {
    config: Configuration,
    sinks: Vec<Box<dyn StatisticsSink>>,
}

impl SimulatorBuilder {
    /// Create a new simulation builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration.
    pub fn from_config(config: Configuration) -> Self {
        Self {
            config,
            sinks: Vec::new(),
        }
    }

    /// The configuration built so far.
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn population_size(mut self, size: usize) -> Self {
        self.config.population.size = size;
        self
    }

    /// Loci per chromosome, e.g. `vec![2]` for one chromosome with two loci.
    pub fn loci(mut self, loci_per_chromosome: Vec<usize>) -> Self {
        self.config.population.loci = loci_per_chromosome;
        self
    }

    /// Genetic map positions, one per locus.
    pub fn positions(mut self, positions: Vec<f64>) -> Self {
        self.config.population.positions = Some(positions);
        self
    }

    pub fn alleles(mut self, num_alleles: u8) -> Self {
        self.config.population.alleles = num_alleles;
        self
    }

    /// Initialize from allele frequencies, indexed by allele.
    pub fn init_frequencies(mut self, freq: Vec<f64>) -> Self {
        self.config.initialization = InitGenotype::Frequencies { freq };
        self
    }

    /// Biallelic shorthand: allele 0 at frequency `p`.
    pub fn allele_frequency(self, p: f64) -> Self {
        self.init_frequencies(vec![p, 1.0 - p])
    }

    /// Give every individual the same genotype (homolog 0 loci, then homolog 1 loci).
    pub fn init_genotype(mut self, genotype: Vec<Allele>) -> Self {
        self.config.initialization = InitGenotype::Genotype { genotype };
        self
    }

    pub fn sex_mode(mut self, mode: SexMode) -> Self {
        self.config.mating.sex = mode;
        self
    }

    /// Same recombination rate between every adjacent pair of loci.
    pub fn recombination_rate(self, rate: f64) -> Self {
        self.recombination(RecombinationConfig::Uniform { rate })
    }

    pub fn recombination(mut self, config: RecombinationConfig) -> Self {
        self.config.mating.recombination = Some(config);
        self
    }

    pub fn statistics(mut self, request: StatRequest) -> Self {
        self.config.statistics = request;
        self
    }

    pub fn generations(mut self, generations: usize) -> Self {
        self.config.execution.generations = generations;
        self
    }

    pub fn replicates(mut self, replicates: usize) -> Self {
        self.config.execution.replicates = replicates;
        self
    }

    /// Master seed; replicate streams are derived from it.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.execution.seed = Some(seed);
        self
    }

    /// Explicit seed per replicate. Also sets the replicate count.
    pub fn replicate_seeds(mut self, seeds: Vec<u64>) -> Self {
        self.config.execution.replicates = seeds.len();
        self.config.execution.replicate_seeds = Some(seeds);
        self
    }

    pub fn sampling(mut self, cadence: SamplingCadence) -> Self {
        self.config.execution.sampling = cadence;
        self
    }

    pub fn fail_on_sink_error(mut self, fail: bool) -> Self {
        self.config.execution.fail_on_sink_error = fail;
        self
    }

    /// Register a sink. Sinks receive snapshots in registration order.
    pub fn sink(mut self, sink: impl StatisticsSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Validate the configuration and create the driver.
    pub fn build(self) -> Result<Simulator, SimulationError> {
        let mut simulator = Simulator::new(self.config)?;
        for sink in self.sinks {
            simulator.add_sink(sink);
        }
        Ok(simulator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ConfigurationError;

    #[test]
    fn test_builder_defaults() {
        let builder = SimulatorBuilder::new();
        assert_eq!(builder.config(), &Configuration::default());

        let sim = builder.build().unwrap();
        assert_eq!(sim.config().population.size, 100);
        assert_eq!(sim.config().execution.generations, 100);
        assert_eq!(sim.layout().num_loci(), 1);
    }

    #[test]
    fn test_builder_sets_fields() {
        let builder = SimulatorBuilder::new()
            .population_size(1000)
            .loci(vec![2])
            .init_genotype(vec![0, 1, 1, 0])
            .recombination_rate(0.01)
            .sex_mode(SexMode::Paired)
            .generations(50)
            .replicate_seeds(vec![1, 2, 3])
            .sampling(SamplingCadence::Every(5))
            .statistics(StatRequest::default().with_ld(0, 1));
        let config = builder.config();
        assert_eq!(config.population.loci, vec![2]);
        assert_eq!(config.mating.recombination, Some(RecombinationConfig::Uniform { rate: 0.01 }));
        assert_eq!(config.execution.replicates, 3);
        assert!(builder.build().is_ok());
    }

    #[test]
    fn test_builder_reports_invalid_values() {
        let err = SimulatorBuilder::new().allele_frequency(1.0).build().unwrap_err();
        assert!(matches!(
            err,
            SimulationError::InvalidConfiguration(ConfigurationError::InvalidFrequencies { .. })
        ));

        let err = SimulatorBuilder::new().init_genotype(vec![0, 1, 1]).build().unwrap_err();
        assert!(matches!(
            err,
            SimulationError::InvalidConfiguration(ConfigurationError::GenotypeLengthMismatch { .. })
        ));
    }
}
