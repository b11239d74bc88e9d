//! # Simulation Crate
//!
//! The `sim` crate provides the core of a forward-time Wright-Fisher
//! simulator: diploid genotypes at one or more loci, random mating with
//! optional recombination, independent replicate populations, per-generation
//! summary statistics and the sinks that receive them.

pub mod base;
pub mod errors;
pub mod evolution;
pub mod genome;
pub mod prelude;
pub mod reporting;
pub mod simulation;
pub mod statistics;

pub use base::{Allele, GenomeLayout, Sex};
