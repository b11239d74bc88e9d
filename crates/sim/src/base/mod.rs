//! Base types for genotype representation.
//!
//! This module provides allele values, sex labels and the genome layout
//! shared by every individual of a population.

mod layout;
mod sex;

pub use layout::GenomeLayout;
pub use sex::{Allele, Sex};
