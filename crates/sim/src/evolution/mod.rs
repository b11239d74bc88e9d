//! Evolution module providing the mating engine.
//!
//! - **Mating**: random parent selection, optionally sex-paired
//! - **Recombination**: per-interval strand switching during gamete formation

pub mod mating;
pub mod recombination;

pub use mating::{MatingScheme, ParentPool, SexMode};
pub use recombination::{RecombinationConfig, Recombinator, UNLINKED_RATE};
