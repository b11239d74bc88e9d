//! Independent replicate populations advanced in lockstep.
//!
//! Every replicate owns its population and its own `Xoshiro256PlusPlus`
//! stream. Replicates share nothing mutable, so they are advanced in
//! parallel with rayon; results do not depend on the thread count.

use crate::base::GenomeLayout;
use crate::errors::{ConfigurationError, MatingError};
use crate::evolution::MatingScheme;
use crate::genome::Individual;
use crate::simulation::{InitGenotype, Population};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::debug;

/// Random streams for `count` replicates derived from one master seed.
///
/// Replicate `r` uses the master generator advanced by `r` jumps of 2^128
/// steps, so the streams never overlap. Without a seed the master is seeded
/// from the thread-local generator.
pub fn replicate_rngs(count: usize, seed: Option<u64>) -> Vec<Xoshiro256PlusPlus> {
    let mut master = match seed {
        Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
        None => Xoshiro256PlusPlus::from_seed(rand::rng().random()),
    };
    (0..count)
        .map(|_| {
            let rng = master.clone();
            master.jump();
            rng
        })
        .collect()
}

/// One seed per replicate.
pub fn rngs_from_seeds(seeds: &[u64]) -> Vec<Xoshiro256PlusPlus> {
    seeds
        .iter()
        .map(|&seed| Xoshiro256PlusPlus::seed_from_u64(seed))
        .collect()
}

/// A population paired with its private random stream.
#[derive(Debug, Clone)]
pub struct Replicate {
    population: Population,
    rng: Xoshiro256PlusPlus,
}

impl Replicate {
    pub fn new(population: Population, rng: Xoshiro256PlusPlus) -> Self {
        Self { population, rng }
    }

    pub fn population(&self) -> &Population {
        &self.population
    }
}

/// `R` independent populations sharing structure but not genetic material.
#[derive(Debug, Clone)]
pub struct ReplicateSet {
    replicates: Vec<Replicate>,
}

impl ReplicateSet {
    /// Wrap existing replicates.
    ///
    /// # Errors
    /// Fails if there are no replicates or if their sizes or layouts differ.
    pub fn new(replicates: Vec<Replicate>) -> Result<Self, ConfigurationError> {
        let first = replicates
            .first()
            .ok_or(ConfigurationError::NonPositive("replicate count"))?;
        let (size, layout) = (first.population.size(), first.population.layout().clone());
        if replicates
            .iter()
            .any(|r| r.population.size() != size || *r.population.layout() != layout)
        {
            return Err(ConfigurationError::Invalid(
                "replicates must share population size and layout".into(),
            ));
        }
        Ok(Self { replicates })
    }

    /// Initialize one population per random stream.
    pub fn initialize(
        size: usize,
        layout: Arc<GenomeLayout>,
        init: &InitGenotype,
        rngs: Vec<Xoshiro256PlusPlus>,
    ) -> Result<Self, ConfigurationError> {
        let replicates = rngs
            .into_par_iter()
            .enumerate()
            .map(|(i, mut rng)| {
                let population =
                    Population::initialize(format!("rep{i}"), size, Arc::clone(&layout), init, &mut rng)?;
                Ok(Replicate::new(population, rng))
            })
            .collect::<Result<Vec<_>, ConfigurationError>>()?;
        Self::new(replicates)
    }

    /// Number of replicates `R`.
    pub fn len(&self) -> usize {
        self.replicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replicates.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Population> {
        self.replicates.get(index).map(Replicate::population)
    }

    /// Iterate over the replicates' current populations in order.
    pub fn populations(&self) -> impl Iterator<Item = &Population> {
        self.replicates.iter().map(Replicate::population)
    }

    /// Advance every replicate by one generation.
    ///
    /// All offspring generations are built first (in parallel) and only
    /// installed once every replicate has succeeded, so a failure never
    /// leaves replicates at different generations.
    pub fn advance_all(&mut self, scheme: &MatingScheme, generation: usize) -> Result<(), MatingError> {
        let next: Vec<Vec<Individual>> = self
            .replicates
            .par_iter_mut()
            .map(|rep| scheme.advance_population(&rep.population, &mut rep.rng))
            .collect::<Result<_, _>>()?;

        for (rep, offspring) in self.replicates.iter_mut().zip(next) {
            rep.population.replace_generation(offspring)?;
        }
        debug!(generation, replicates = self.replicates.len(), "Advanced replicates");
        Ok(())
    }

    /// Apply a read-only function to each replicate's population, returning
    /// one result per replicate in replicate order.
    pub fn for_each<T, F>(&self, f: F) -> Vec<T>
    where
        T: Send,
        F: Fn(&Population) -> T + Sync + Send,
    {
        self.replicates
            .par_iter()
            .map(|rep| f(&rep.population))
            .collect()
    }
}
