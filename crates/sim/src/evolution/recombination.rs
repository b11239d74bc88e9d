//! Recombination during gamete formation.
//!
//! A [`Recombinator`] holds one switching probability per adjacent locus
//! pair. Gamete formation starts on a random homolog and, after each locus,
//! switches homolog with the interval's rate. Intervals that span two
//! chromosomes always use 0.5 so chromosomes assort independently.

use crate::base::GenomeLayout;
use crate::errors::ConfigurationError;
use crate::genome::{Haplotype, Individual};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Rate used between chromosomes (independent assortment).
pub const UNLINKED_RATE: f64 = 0.5;

/// How recombination rates between adjacent loci are specified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecombinationConfig {
    /// Same rate between every adjacent pair of loci on a chromosome.
    Uniform { rate: f64 },
    /// One rate per within-chromosome interval, in locus order.
    PerInterval { rates: Vec<f64> },
    /// Rate proportional to the position distance between adjacent loci,
    /// capped at 0.5.
    Intensity { intensity: f64 },
}

/// Per-interval strand-switch probabilities for a fixed layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Recombinator {
    /// `rates[i]` applies between locus `i` and locus `i + 1`.
    rates: Vec<f64>,
}

impl Recombinator {
    /// No recombination: each chromosome is inherited as one block.
    pub fn linked(layout: &GenomeLayout) -> Self {
        let rates = (0..layout.num_intervals())
            .map(|i| {
                if layout.is_chromosome_boundary(i) {
                    UNLINKED_RATE
                } else {
                    0.0
                }
            })
            .collect();
        Self { rates }
    }

    /// Resolve a recombination configuration against a layout.
    ///
    /// # Errors
    /// Returns an error if any resulting rate is outside `[0.0, 0.5]`, if the
    /// number of per-interval rates does not match the number of
    /// within-chromosome intervals, or if the intensity is negative.
    pub fn new(
        layout: &GenomeLayout,
        config: &RecombinationConfig,
    ) -> Result<Self, ConfigurationError> {
        let within: Vec<usize> = (0..layout.num_intervals())
            .filter(|&i| !layout.is_chromosome_boundary(i))
            .collect();

        let within_rates: Vec<f64> = match config {
            RecombinationConfig::Uniform { rate } => vec![*rate; within.len()],
            RecombinationConfig::PerInterval { rates } => {
                if rates.len() != within.len() {
                    return Err(ConfigurationError::Invalid(format!(
                        "{} recombination rates given for {} intervals",
                        rates.len(),
                        within.len()
                    )));
                }
                rates.clone()
            }
            RecombinationConfig::Intensity { intensity } => {
                if !(intensity.is_finite() && *intensity >= 0.0) {
                    return Err(ConfigurationError::Invalid(format!(
                        "recombination intensity must be non-negative, got {intensity}"
                    )));
                }
                let positions = layout.positions();
                within
                    .iter()
                    .map(|&i| (intensity * (positions[i + 1] - positions[i])).min(UNLINKED_RATE))
                    .collect()
            }
        };

        let mut rates = Self::linked(layout).rates;
        for (&interval, &rate) in within.iter().zip(&within_rates) {
            if !(0.0..=UNLINKED_RATE).contains(&rate) {
                return Err(ConfigurationError::InvalidRecombinationRate { interval, rate });
            }
            rates[interval] = rate;
        }
        Ok(Self { rates })
    }

    /// Strand-switch probability after each locus.
    #[inline]
    pub fn rates(&self) -> &[f64] {
        &self.rates
    }

    /// Whether any within-chromosome interval can recombine.
    pub fn is_linked(&self) -> bool {
        self.rates.iter().all(|&r| r == 0.0 || r == UNLINKED_RATE)
    }

    /// Form one gamete from `parent`.
    ///
    /// The starting homolog is drawn 0.5/0.5; after locus `i` the strand
    /// switches with probability `rates[i]`.
    pub fn gamete<R: Rng + ?Sized>(&self, parent: &Individual, rng: &mut R) -> Haplotype {
        let num_loci = parent.num_loci();
        let mut strand = usize::from(rng.random::<f64>() < 0.5);
        let mut gamete = Haplotype::with_capacity(num_loci);

        for locus in 0..num_loci {
            // Alleles always exist: every haplotype spans the full layout.
            gamete.push(parent.haplotype(strand).alleles()[locus]);
            if let Some(&rate) = self.rates.get(locus) {
                if rate > 0.0 && rng.random::<f64>() < rate {
                    strand ^= 1;
                }
            }
        }
        gamete
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::Sex;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn two_locus() -> GenomeLayout {
        GenomeLayout::new(vec![2]).unwrap()
    }

    #[test]
    fn test_linked_rates() {
        let layout = GenomeLayout::new(vec![2, 2]).unwrap();
        let rec = Recombinator::linked(&layout);
        assert_eq!(rec.rates(), &[0.0, 0.5, 0.0]);
        assert!(rec.is_linked());
    }

    #[test]
    fn test_uniform_rates_keep_boundaries_unlinked() {
        let layout = GenomeLayout::new(vec![3, 1]).unwrap();
        let rec = Recombinator::new(&layout, &RecombinationConfig::Uniform { rate: 0.1 }).unwrap();
        assert_eq!(rec.rates(), &[0.1, 0.1, 0.5]);
        assert!(!rec.is_linked());
    }

    #[test]
    fn test_per_interval_rates() {
        let layout = GenomeLayout::new(vec![3]).unwrap();
        let config = RecombinationConfig::PerInterval {
            rates: vec![0.01, 0.2],
        };
        let rec = Recombinator::new(&layout, &config).unwrap();
        assert_eq!(rec.rates(), &[0.01, 0.2]);

        let config = RecombinationConfig::PerInterval { rates: vec![0.01] };
        assert!(Recombinator::new(&layout, &config).is_err());
    }

    #[test]
    fn test_intensity_scales_with_distance() {
        let layout = GenomeLayout::with_positions(vec![3], vec![0.0, 2.0, 100.0]).unwrap();
        let rec =
            Recombinator::new(&layout, &RecombinationConfig::Intensity { intensity: 0.01 })
                .unwrap();
        assert!((rec.rates()[0] - 0.02).abs() < 1e-12);
        assert_eq!(rec.rates()[1], 0.5);
    }

    #[test]
    fn test_rejects_out_of_range_rate() {
        let err = Recombinator::new(&two_locus(), &RecombinationConfig::Uniform { rate: 0.7 })
            .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::InvalidRecombinationRate {
                interval: 0,
                rate: 0.7
            }
        );
        assert!(
            Recombinator::new(&two_locus(), &RecombinationConfig::Uniform { rate: -0.1 })
                .is_err()
        );
    }

    #[test]
    fn test_linked_gamete_is_a_parental_haplotype() {
        let rec = Recombinator::linked(&two_locus());
        let parent = Individual::from_genotype(&[0, 1, 1, 0], Sex::Male);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        for _ in 0..200 {
            let gamete = rec.gamete(&parent, &mut rng);
            assert!(gamete.alleles() == [0, 1] || gamete.alleles() == [1, 0]);
        }
    }

    #[test]
    fn test_free_recombination_produces_recombinants() {
        let rec =
            Recombinator::new(&two_locus(), &RecombinationConfig::Uniform { rate: 0.5 }).unwrap();
        let parent = Individual::from_genotype(&[0, 1, 1, 0], Sex::Male);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(2);
        let recombinants = (0..10_000)
            .filter(|_| {
                let g = rec.gamete(&parent, &mut rng);
                g.get(0) == g.get(1)
            })
            .count();
        // Expect half of the gametes to be 00 or 11.
        assert!((4_700..=5_300).contains(&recombinants), "{recombinants}");
    }

    #[test]
    fn test_strand_choice_is_balanced() {
        let rec = Recombinator::linked(&two_locus());
        let parent = Individual::from_genotype(&[0, 0, 1, 1], Sex::Female);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(3);
        let first = (0..10_000)
            .filter(|_| rec.gamete(&parent, &mut rng).get(0) == Some(0))
            .count();
        assert!((4_700..=5_300).contains(&first), "{first}");
    }
}
