//! Generation-0 genotype initialization.
//!
//! Two modes are supported: every allele copy drawn independently from a
//! categorical distribution, or every individual receiving the same fixed
//! genotype (useful to seed a known linkage phase such as `01/10`).

use crate::base::{Allele, GenomeLayout, Sex};
use crate::errors::ConfigurationError;
use crate::genome::{Haplotype, Individual};
use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Tolerance on the sum of allele frequencies.
const FREQUENCY_SUM_TOLERANCE: f64 = 1e-9;

/// How the first generation's genotypes are produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitGenotype {
    /// Each allele at each locus drawn from `freq` (indexed by allele).
    Frequencies { freq: Vec<f64> },
    /// Every individual gets `genotype`, laid out as homolog 0 loci then
    /// homolog 1 loci.
    Genotype { genotype: Vec<Allele> },
}

impl InitGenotype {
    /// Biallelic frequencies `[p, 1 - p]`.
    pub fn biallelic(p: f64) -> Self {
        Self::Frequencies {
            freq: vec![p, 1.0 - p],
        }
    }

    /// Check this initializer against a layout.
    ///
    /// # Errors
    /// Frequencies must have one entry per allele, each strictly inside
    /// (0, 1), summing to 1. A fixed genotype must have `loci * 2` entries,
    /// each a valid allele.
    pub fn validate(&self, layout: &GenomeLayout) -> Result<(), ConfigurationError> {
        match self {
            Self::Frequencies { freq } => {
                let invalid = |reason| ConfigurationError::InvalidFrequencies {
                    freqs: freq.clone(),
                    reason,
                };
                if freq.len() != usize::from(layout.num_alleles()) {
                    return Err(invalid("expected one frequency per allele"));
                }
                if freq.iter().any(|&f| !(f > 0.0 && f < 1.0)) {
                    return Err(invalid("each frequency must be strictly between 0 and 1"));
                }
                if (freq.iter().sum::<f64>() - 1.0).abs() > FREQUENCY_SUM_TOLERANCE {
                    return Err(invalid("frequencies must sum to 1"));
                }
                Ok(())
            }
            Self::Genotype { genotype } => {
                let expected = layout.num_loci() * 2;
                if genotype.len() != expected {
                    return Err(ConfigurationError::GenotypeLengthMismatch {
                        expected,
                        actual: genotype.len(),
                    });
                }
                if let Some(&allele) = genotype.iter().find(|&&a| a >= layout.num_alleles()) {
                    return Err(ConfigurationError::AlleleOutOfRange {
                        allele,
                        num_alleles: layout.num_alleles(),
                    });
                }
                Ok(())
            }
        }
    }

    /// Create `size` individuals. Sex is drawn 0.5/0.5 per individual.
    pub fn create_individuals<R: Rng + ?Sized>(
        &self,
        size: usize,
        layout: &GenomeLayout,
        rng: &mut R,
    ) -> Result<Vec<Individual>, ConfigurationError> {
        self.validate(layout)?;
        let num_loci = layout.num_loci();

        match self {
            Self::Frequencies { freq } => {
                let dist = WeightedIndex::new(freq).map_err(|e| {
                    ConfigurationError::Invalid(format!("allele frequencies: {e}"))
                })?;
                let draw_haplotype = |rng: &mut R| {
                    Haplotype::new((0..num_loci).map(|_| dist.sample(rng) as Allele).collect())
                };
                Ok((0..size)
                    .map(|_| {
                        let sex = Sex::random(rng);
                        let hap1 = draw_haplotype(&mut *rng);
                        let hap2 = draw_haplotype(&mut *rng);
                        Individual::new(hap1, hap2, sex)
                    })
                    .collect())
            }
            Self::Genotype { genotype } => Ok((0..size)
                .map(|_| Individual::from_genotype(genotype, Sex::random(rng)))
                .collect()),
        }
    }
}
