//! Statistics engine.
//!
//! Pure reads over a population's current genotypes:
//! - Allele frequencies and observed heterozygosity
//! - Linkage disequilibrium (D, D', r²)
//! - Named per-generation snapshots consumed by reporting sinks

pub mod frequency;
pub mod linkage;
mod snapshot;

pub use frequency::{allele_frequencies, allele_frequency, heterozygosity};
pub use linkage::{linkage_disequilibrium, LdMeasure, LdStatistics};
pub use snapshot::{Snapshot, StatRequest};
