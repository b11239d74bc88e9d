//! Simulation configuration.
//!
//! A [`Configuration`] fully describes a run and can be loaded from JSON to
//! reproduce it. The core only ever receives values that passed
//! [`Configuration::validate`].

use crate::base::GenomeLayout;
use crate::errors::ConfigurationError;
use crate::evolution::{MatingScheme, RecombinationConfig, Recombinator, SexMode};
use crate::reporting::SamplingCadence;
use crate::simulation::replicates::{replicate_rngs, rngs_from_seeds};
use crate::simulation::InitGenotype;
use crate::statistics::StatRequest;
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The master configuration struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    pub population: PopulationConfig,
    #[serde(default = "default_initialization")]
    pub initialization: InitGenotype,
    #[serde(default)]
    pub mating: MatingConfig,
    #[serde(default)]
    pub statistics: StatRequest,
    pub execution: ExecutionConfig,
}

/// Population size and genome shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Number of diploid individuals `N`
    pub size: usize,
    /// Loci per chromosome
    #[serde(default = "default_loci")]
    pub loci: Vec<usize>,
    /// Optional genetic map positions, one per locus
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub positions: Option<Vec<f64>>,
    /// Allele states per locus
    #[serde(default = "default_alleles")]
    pub alleles: u8,
}

/// Mating scheme parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatingConfig {
    #[serde(default)]
    pub sex: SexMode,
    /// `None` means no recombination within chromosomes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recombination: Option<RecombinationConfig>,
}

/// Run length, replication and reporting behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// Total number of generations to simulate
    pub generations: usize,
    /// Number of independent replicates
    #[serde(default = "default_replicates")]
    pub replicates: usize,
    /// Master RNG seed for reproducibility
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Explicit per-replicate seeds; overrides `seed`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicate_seeds: Option<Vec<u64>>,
    #[serde(default)]
    pub sampling: SamplingCadence,
    /// Treat every sink error as fatal
    #[serde(default)]
    pub fail_on_sink_error: bool,
}

fn default_initialization() -> InitGenotype {
    InitGenotype::biallelic(0.5)
}

fn default_loci() -> Vec<usize> {
    vec![1]
}

fn default_alleles() -> u8 {
    2
}

fn default_replicates() -> usize {
    1
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            size: 100,
            loci: default_loci(),
            positions: None,
            alleles: default_alleles(),
        }
    }
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            generations: 100,
            replicates: default_replicates(),
            seed: None,
            replicate_seeds: None,
            sampling: SamplingCadence::Derived,
            fail_on_sink_error: false,
        }
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            population: PopulationConfig::default(),
            initialization: default_initialization(),
            mating: MatingConfig::default(),
            statistics: StatRequest::default(),
            execution: ExecutionConfig::default(),
        }
    }
}

impl Configuration {
    /// Load a configuration from a JSON file. The result is not validated.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigurationError::Invalid(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigurationError> {
        serde_json::from_str(content)
            .map_err(|e| ConfigurationError::Invalid(format!("malformed configuration: {e}")))
    }

    /// Build the genome layout described by the population block.
    pub fn layout(&self) -> Result<GenomeLayout, ConfigurationError> {
        let layout = match &self.population.positions {
            Some(positions) => {
                GenomeLayout::with_positions(self.population.loci.clone(), positions.clone())?
            }
            None => GenomeLayout::new(self.population.loci.clone())?,
        };
        layout.with_alleles(self.population.alleles)
    }

    /// Build the mating scheme for `layout`.
    pub fn mating_scheme(&self, layout: &GenomeLayout) -> Result<MatingScheme, ConfigurationError> {
        let recombinator = match &self.mating.recombination {
            Some(config) => Recombinator::new(layout, config)?,
            None => Recombinator::linked(layout),
        };
        Ok(MatingScheme::new(self.mating.sex, recombinator))
    }

    /// One random stream per replicate.
    pub fn replicate_rngs(&self) -> Vec<Xoshiro256PlusPlus> {
        match &self.execution.replicate_seeds {
            Some(seeds) => rngs_from_seeds(seeds),
            None => replicate_rngs(self.execution.replicates, self.execution.seed),
        }
    }

    /// Validate every block against the others.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.population.size == 0 {
            return Err(ConfigurationError::NonPositive("population size"));
        }
        if self.execution.generations == 0 {
            return Err(ConfigurationError::NonPositive("generations"));
        }
        if self.execution.replicates == 0 {
            return Err(ConfigurationError::NonPositive("replicate count"));
        }
        if self.execution.sampling == SamplingCadence::Every(0) {
            return Err(ConfigurationError::NonPositive("sampling step"));
        }
        if let Some(seeds) = &self.execution.replicate_seeds {
            if seeds.len() != self.execution.replicates {
                return Err(ConfigurationError::Invalid(format!(
                    "{} replicate seeds given for {} replicates",
                    seeds.len(),
                    self.execution.replicates
                )));
            }
        }

        let layout = self.layout()?;
        self.initialization.validate(&layout)?;
        self.mating_scheme(&layout)?;
        self.statistics.validate(&layout)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configuration_is_valid() {
        let config = Configuration::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.population.size, 100);
        assert_eq!(config.execution.generations, 100);
        assert_eq!(config.execution.replicates, 1);
        assert_eq!(config.mating.sex, SexMode::Random);
    }

    #[test]
    fn test_minimal_json_uses_defaults() {
        let config = Configuration::from_json_str(
            r#"{"population": {"size": 10}, "execution": {"generations": 5}}"#,
        )
        .unwrap();
        assert_eq!(config.population.loci, vec![1]);
        assert_eq!(config.population.alleles, 2);
        assert_eq!(config.initialization, InitGenotype::biallelic(0.5));
        assert_eq!(config.execution.replicates, 1);
        assert_eq!(config.execution.sampling, SamplingCadence::Derived);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_full_json_round_trip() {
        let json = r#"{
            "population": {"size": 1000, "loci": [2]},
            "initialization": {"genotype": {"genotype": [0, 1, 1, 0]}},
            "mating": {"sex": "paired", "recombination": {"kind": "uniform", "rate": 0.01}},
            "statistics": {"ld": [[0, 1]]},
            "execution": {"generations": 50, "replicates": 5, "seed": 7, "sampling": {"every": 10}}
        }"#;
        let config = Configuration::from_json_str(json).unwrap();
        config.validate().unwrap();
        assert_eq!(config.mating.sex, SexMode::Paired);
        assert_eq!(config.execution.sampling, SamplingCadence::Every(10));
        assert_eq!(config.statistics.ld, vec![[0, 1]]);

        let back = Configuration::from_json_str(&serde_json::to_string(&config).unwrap()).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sim.json");
        std::fs::write(&path, serde_json::to_string(&Configuration::default()).unwrap()).unwrap();
        assert_eq!(Configuration::from_json_file(&path).unwrap(), Configuration::default());

        let missing = Configuration::from_json_file(dir.path().join("nope.json"));
        assert!(matches!(missing, Err(ConfigurationError::Invalid(_))));
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        let err = Configuration::from_json_str("{\"population\": 3}").unwrap_err();
        assert!(err.to_string().contains("malformed configuration"));
    }

    #[test]
    fn test_validate_rejects_zero_sizes() {
        let mut config = Configuration::default();
        config.population.size = 0;
        assert_eq!(config.validate(), Err(ConfigurationError::NonPositive("population size")));

        let mut config = Configuration::default();
        config.execution.generations = 0;
        assert_eq!(config.validate(), Err(ConfigurationError::NonPositive("generations")));

        let mut config = Configuration::default();
        config.execution.replicates = 0;
        assert_eq!(config.validate(), Err(ConfigurationError::NonPositive("replicate count")));

        let mut config = Configuration::default();
        config.execution.sampling = SamplingCadence::Every(0);
        assert_eq!(config.validate(), Err(ConfigurationError::NonPositive("sampling step")));
    }

    #[test]
    fn test_validate_rejects_bad_blocks() {
        let mut config = Configuration::default();
        config.initialization = InitGenotype::Frequencies { freq: vec![0.3, 0.3] };
        assert!(matches!(config.validate(), Err(ConfigurationError::InvalidFrequencies { .. })));

        let mut config = Configuration::default();
        config.population.loci = vec![2];
        config.mating.recombination = Some(RecombinationConfig::Uniform { rate: 0.7 });
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::InvalidRecombinationRate { .. })
        ));

        let mut config = Configuration::default();
        config.statistics = StatRequest::allele_freq([3]);
        assert!(matches!(config.validate(), Err(ConfigurationError::LocusOutOfRange { .. })));

        let mut config = Configuration::default();
        config.execution.replicates = 3;
        config.execution.replicate_seeds = Some(vec![1, 2]);
        assert!(matches!(config.validate(), Err(ConfigurationError::Invalid(_))));
    }

    #[test]
    fn test_replicate_rngs_follow_seeds() {
        let mut config = Configuration::default();
        config.execution.replicates = 4;
        config.execution.seed = Some(1);
        assert_eq!(config.replicate_rngs().len(), 4);

        config.execution.replicates = 2;
        config.execution.replicate_seeds = Some(vec![10, 20]);
        assert_eq!(config.replicate_rngs(), rngs_from_seeds(&[10, 20]));
    }
}
