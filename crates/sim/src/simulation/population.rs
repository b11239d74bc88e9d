//! Population management: the per-replicate genotype store.
//!
//! A `Population` owns `N` individuals sharing one `GenomeLayout`. Its size
//! is fixed at construction and every generation swap is checked against it.

use crate::base::{Allele, GenomeLayout};
use crate::errors::{ConfigurationError, PopulationError};
use crate::genome::Individual;
use crate::simulation::InitGenotype;
use rand::Rng;
use std::sync::Arc;

/// A population of diploid individuals.
#[derive(Debug, Clone)]
pub struct Population {
    /// The individuals in this population
    individuals: Vec<Individual>,
    /// Locus arrangement shared by every individual
    layout: Arc<GenomeLayout>,
    /// Population ID
    id: Arc<str>,
}

impl Population {
    /// Create a population from existing individuals.
    ///
    /// The population size is fixed to `individuals.len()` from here on.
    pub fn new(
        id: impl Into<Arc<str>>,
        layout: Arc<GenomeLayout>,
        individuals: Vec<Individual>,
    ) -> Self {
        Self {
            individuals,
            layout,
            id: id.into(),
        }
    }

    /// Populate `size` individuals from an initializer.
    ///
    /// # Errors
    /// Fails with a configuration error if `size` is zero or the initializer
    /// does not match the layout.
    pub fn initialize<R: Rng + ?Sized>(
        id: impl Into<Arc<str>>,
        size: usize,
        layout: Arc<GenomeLayout>,
        init: &InitGenotype,
        rng: &mut R,
    ) -> Result<Self, ConfigurationError> {
        if size == 0 {
            return Err(ConfigurationError::NonPositive("population size"));
        }
        let individuals = init.create_individuals(size, &layout, rng)?;
        Ok(Self::new(id, layout, individuals))
    }

    /// Get population ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Number of individuals `N`.
    pub fn size(&self) -> usize {
        self.individuals.len()
    }

    /// Check if population is empty.
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Number of loci `L`.
    pub fn num_loci(&self) -> usize {
        self.layout.num_loci()
    }

    pub fn layout(&self) -> &GenomeLayout {
        &self.layout
    }

    /// Get all individuals as a slice.
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Get a specific individual by index.
    pub fn get(&self, index: usize) -> Option<&Individual> {
        self.individuals.get(index)
    }

    /// Allele pair of `individual` at `locus`.
    pub fn read(&self, individual: usize, locus: usize) -> Result<(Allele, Allele), PopulationError> {
        self.individuals
            .get(individual)
            .and_then(|ind| ind.alleles_at(locus))
            .ok_or(PopulationError::IndexOutOfBounds {
                individual,
                locus,
                size: self.size(),
                loci: self.num_loci(),
            })
    }

    /// Replace the entire population with the next generation.
    ///
    /// # Errors
    /// Returns `SizeMismatch` (leaving the current generation in place) if
    /// the new generation has a different size.
    pub fn replace_generation(&mut self, individuals: Vec<Individual>) -> Result<(), PopulationError> {
        if individuals.len() != self.individuals.len() {
            return Err(PopulationError::SizeMismatch {
                expected: self.individuals.len(),
                actual: individuals.len(),
            });
        }
        self.individuals = individuals;
        Ok(())
    }

    /// Iterate over every allele copy at `locus` (both homologs of every
    /// individual).
    pub fn allele_copies(&self, locus: usize) -> impl Iterator<Item = Allele> + '_ {
        self.individuals.iter().flat_map(move |ind| {
            let (h1, h2) = ind.haplotypes();
            [h1.alleles()[locus], h2.alleles()[locus]]
        })
    }
}
