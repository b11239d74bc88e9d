//! Random mating.
//!
//! Parents are drawn uniformly with replacement, either from the whole
//! population or (in sex-paired mode) one from each sex. Each parent then
//! contributes one gamete formed by the scheme's [`Recombinator`].

use crate::base::Sex;
use crate::errors::{MatingError, PopulationError};
use crate::evolution::Recombinator;
use crate::genome::Individual;
use crate::simulation::Population;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Whether parent selection respects sex labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SexMode {
    /// Both parents drawn from the whole population.
    #[default]
    Random,
    /// One male and one female parent per offspring.
    Paired,
}

/// Candidate parent indices for one generation.
#[derive(Debug, Clone)]
pub enum ParentPool {
    Any { size: usize },
    Paired { males: Vec<usize>, females: Vec<usize> },
}

impl ParentPool {
    /// Build the pool for `population` under `mode`.
    ///
    /// # Errors
    /// Returns `EmptyPopulation` for an empty population and, in paired mode,
    /// `NoEligibleParents` if either sex class is empty.
    pub fn new(population: &Population, mode: SexMode) -> Result<Self, MatingError> {
        match mode {
            SexMode::Random => {
                if population.is_empty() {
                    return Err(PopulationError::EmptyPopulation.into());
                }
                Ok(Self::Any {
                    size: population.size(),
                })
            }
            SexMode::Paired => {
                let (males, females): (Vec<usize>, Vec<usize>) = (0..population.size())
                    .partition(|&i| population.individuals()[i].sex() == Sex::Male);
                if males.is_empty() {
                    return Err(MatingError::NoEligibleParents(Sex::Male));
                }
                if females.is_empty() {
                    return Err(MatingError::NoEligibleParents(Sex::Female));
                }
                Ok(Self::Paired { males, females })
            }
        }
    }

    /// Draw one parent pair (with replacement).
    pub fn select<R: Rng + ?Sized>(&self, rng: &mut R) -> (usize, usize) {
        match self {
            Self::Any { size } => (rng.random_range(0..*size), rng.random_range(0..*size)),
            Self::Paired { males, females } => (
                males[rng.random_range(0..males.len())],
                females[rng.random_range(0..females.len())],
            ),
        }
    }
}

/// Random mating with optional recombination.
#[derive(Debug, Clone)]
pub struct MatingScheme {
    sex_mode: SexMode,
    recombinator: Recombinator,
}

impl MatingScheme {
    pub fn new(sex_mode: SexMode, recombinator: Recombinator) -> Self {
        Self {
            sex_mode,
            recombinator,
        }
    }

    #[inline]
    pub fn sex_mode(&self) -> SexMode {
        self.sex_mode
    }

    #[inline]
    pub fn recombinator(&self) -> &Recombinator {
        &self.recombinator
    }

    /// Draw one pair of parent indices from `population`.
    pub fn select_parents<R: Rng + ?Sized>(
        &self,
        population: &Population,
        rng: &mut R,
    ) -> Result<(usize, usize), MatingError> {
        Ok(ParentPool::new(population, self.sex_mode)?.select(rng))
    }

    /// Produce one offspring from two parents.
    ///
    /// Each parent contributes one gamete; offspring sex is drawn 0.5/0.5
    /// independently of the genotype.
    pub fn produce_offspring<R: Rng + ?Sized>(
        &self,
        parent_a: &Individual,
        parent_b: &Individual,
        rng: &mut R,
    ) -> Individual {
        let hap1 = self.recombinator.gamete(parent_a, rng);
        let hap2 = self.recombinator.gamete(parent_b, rng);
        Individual::new(hap1, hap2, Sex::random(rng))
    }

    /// Build the next generation: `N` offspring from `population`.
    ///
    /// The input population is left untouched; the caller installs the
    /// result with `Population::replace_generation`.
    pub fn advance_population<R: Rng + ?Sized>(
        &self,
        population: &Population,
        rng: &mut R,
    ) -> Result<Vec<Individual>, MatingError> {
        let pool = ParentPool::new(population, self.sex_mode)?;
        let parents = population.individuals();

        Ok((0..population.size())
            .map(|_| {
                let (a, b) = pool.select(rng);
                self.produce_offspring(&parents[a], &parents[b], rng)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::GenomeLayout;
    use crate::evolution::RecombinationConfig;
    use crate::genome::Haplotype;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;
    use std::sync::Arc;

    fn one_locus_population(sexes: &[Sex]) -> Population {
        let layout = Arc::new(GenomeLayout::new(vec![1]).unwrap());
        let individuals = sexes
            .iter()
            .enumerate()
            .map(|(i, &sex)| {
                let allele = (i % 2) as u8;
                Individual::new(Haplotype::new(vec![allele]), Haplotype::new(vec![allele]), sex)
            })
            .collect();
        Population::new("pop", layout, individuals)
    }

    fn scheme(mode: SexMode, layout: &GenomeLayout) -> MatingScheme {
        MatingScheme::new(mode, Recombinator::linked(layout))
    }

    #[test]
    fn test_select_parents_in_range() {
        let pop = one_locus_population(&[Sex::Male; 5]);
        let scheme = scheme(SexMode::Random, pop.layout());
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        for _ in 0..100 {
            let (a, b) = scheme.select_parents(&pop, &mut rng).unwrap();
            assert!(a < 5 && b < 5);
        }
    }

    #[test]
    fn test_random_mode_allows_selfing() {
        // With replacement: a single individual can mate with itself.
        let pop = one_locus_population(&[Sex::Female]);
        let scheme = scheme(SexMode::Random, pop.layout());
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        assert_eq!(scheme.select_parents(&pop, &mut rng).unwrap(), (0, 0));
    }

    #[test]
    fn test_paired_mode_draws_one_of_each_sex() {
        let pop = one_locus_population(&[Sex::Male, Sex::Female, Sex::Female, Sex::Male]);
        let scheme = scheme(SexMode::Paired, pop.layout());
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        for _ in 0..100 {
            let (a, b) = scheme.select_parents(&pop, &mut rng).unwrap();
            assert_eq!(pop.individuals()[a].sex(), Sex::Male);
            assert_eq!(pop.individuals()[b].sex(), Sex::Female);
        }
    }

    #[test]
    fn test_paired_mode_fails_without_females() {
        let pop = one_locus_population(&[Sex::Male, Sex::Male]);
        let scheme = scheme(SexMode::Paired, pop.layout());
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        assert_eq!(
            scheme.select_parents(&pop, &mut rng),
            Err(MatingError::NoEligibleParents(Sex::Female))
        );
        assert!(scheme.advance_population(&pop, &mut rng).is_err());
    }

    #[test]
    fn test_produce_offspring_takes_one_allele_per_parent() {
        let layout = GenomeLayout::new(vec![1]).unwrap();
        let scheme = scheme(SexMode::Random, &layout);
        let a = Individual::from_genotype(&[0, 0], Sex::Male);
        let b = Individual::from_genotype(&[1, 1], Sex::Female);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(5);
        for _ in 0..20 {
            let child = scheme.produce_offspring(&a, &b, &mut rng);
            assert_eq!(child.alleles_at(0), Some((0, 1)));
        }
    }

    #[test]
    fn test_advance_population_preserves_size_and_input() {
        let pop = one_locus_population(&[Sex::Male, Sex::Female, Sex::Male, Sex::Female]);
        let before = pop.clone();
        let rec = Recombinator::new(pop.layout(), &RecombinationConfig::Uniform { rate: 0.0 })
            .unwrap();
        let scheme = MatingScheme::new(SexMode::Random, rec);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(9);

        let offspring = scheme.advance_population(&pop, &mut rng).unwrap();
        assert_eq!(offspring.len(), 4);
        assert_eq!(pop.individuals(), before.individuals());
    }

    #[test]
    fn test_mating_preserves_frequency_in_expectation() {
        // Half the individuals are 0/0 and half 1/1; the offspring pool
        // frequency is unbiased around 0.5.
        let sexes: Vec<Sex> = (0..1000)
            .map(|i| if i % 2 == 0 { Sex::Male } else { Sex::Female })
            .collect();
        let pop = one_locus_population(&sexes);
        let scheme = scheme(SexMode::Random, pop.layout());
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(11);

        let mut total = 0.0;
        let rounds = 50;
        for _ in 0..rounds {
            let offspring = scheme.advance_population(&pop, &mut rng).unwrap();
            let zeros = offspring
                .iter()
                .map(|ind| {
                    let (a, b) = ind.alleles_at(0).unwrap();
                    usize::from(a == 0) + usize::from(b == 0)
                })
                .sum::<usize>();
            total += zeros as f64 / 2000.0;
        }
        let mean = total / rounds as f64;
        assert!((mean - 0.5).abs() < 0.01, "mean = {mean}");
    }
}
