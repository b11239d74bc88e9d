//! Error types for the simulation core.
//!
//! Each concern has its own enum; [`SimulationError`] wraps them for the
//! driver so callers can use `?` across the whole generation pipeline.

use crate::base::Sex;
use thiserror::Error;

/// Rejected configuration. Detected before any generation executes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    /// A size-like parameter was zero.
    #[error("{0} must be a positive integer")]
    NonPositive(&'static str),

    /// Allele frequencies do not form a valid categorical distribution.
    #[error("invalid allele frequencies {freqs:?}: {reason}")]
    InvalidFrequencies { freqs: Vec<f64>, reason: &'static str },

    /// A fixed genotype does not cover every locus on both homologs.
    #[error("genotype has {actual} alleles, expected {expected} (loci x ploidy)")]
    GenotypeLengthMismatch { expected: usize, actual: usize },

    /// An allele value is outside `0..num_alleles`.
    #[error("allele {allele} is out of range for {num_alleles} alleles")]
    AlleleOutOfRange { allele: u8, num_alleles: u8 },

    /// A recombination rate is outside `[0, 0.5]`.
    #[error("invalid recombination rate {rate} for interval {interval} (must be between 0.0 and 0.5)")]
    InvalidRecombinationRate { interval: usize, rate: f64 },

    /// A statistic or map entry refers to a locus that does not exist.
    #[error("locus {locus} out of range ({loci} loci)")]
    LocusOutOfRange { locus: usize, loci: usize },

    /// Anything else that makes the configuration unusable.
    #[error("{0}")]
    Invalid(String),
}

/// Genotype store invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PopulationError {
    #[error("population size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("population is empty")]
    EmptyPopulation,

    #[error("index out of bounds: individual {individual}, locus {locus} (size {size}, loci {loci})")]
    IndexOutOfBounds {
        individual: usize,
        locus: usize,
        size: usize,
        loci: usize,
    },
}

/// Failures while drawing parents.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatingError {
    /// Sex-paired mating found no individual of the given sex.
    #[error("no eligible parents: population has no {0} individuals")]
    NoEligibleParents(Sex),

    #[error(transparent)]
    Population(#[from] PopulationError),
}

/// Failures while computing statistics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatisticsError {
    #[error("statistics requested on an empty population")]
    EmptyPopulation,

    /// A marginal allele frequency is 0 or 1, so the statistic is undefined.
    #[error("locus {locus} is fixed or lost; linkage disequilibrium is undefined")]
    DegenerateLocus { locus: usize },

    #[error("locus {locus} out of range ({loci} loci)")]
    LocusOutOfRange { locus: usize, loci: usize },
}

/// Errors raised by statistics sinks.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("sink I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Recoverable failure; the simulation keeps running.
    #[error("{0}")]
    Reported(String),

    /// Stops the simulation after the current generation's emission.
    #[error("fatal sink error: {0}")]
    Fatal(String),
}

impl SinkError {
    /// Whether this error must stop the simulation regardless of configuration.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal(_))
    }
}

/// Umbrella error for the evolution driver.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigurationError),

    #[error(transparent)]
    Population(#[from] PopulationError),

    #[error(transparent)]
    Mating(#[from] MatingError),

    #[error(transparent)]
    Statistics(#[from] StatisticsError),

    /// The driver already reached its terminal state.
    #[error("simulation already terminated at generation {generation}")]
    AlreadyTerminated { generation: usize },

    /// A sink failed fatally at the given generation.
    #[error("sink '{sink}' failed at generation {generation}: {source}")]
    Sink {
        sink: String,
        generation: usize,
        #[source]
        source: SinkError,
    },
}
