//! Genome structures for representing haplotypes and individuals.

mod haplotype;
mod individual;

pub use haplotype::Haplotype;
pub use individual::Individual;
