//! Population management and the evolution driver.
//!
//! - `Population`: the genotype store for one replicate.
//! - `ReplicateSet`: independent populations advanced in lockstep.
//! - `Simulator`: the driver that runs generations and emits statistics.
//! - `SimulatorBuilder`: fluent builder for constructing `Simulator`
//!   instances with sensible defaults and validation.

pub mod builder;
pub mod configs;
pub mod engine;
pub mod initialization;
pub mod population;
pub mod replicates;

pub use builder::SimulatorBuilder;
pub use configs::{Configuration, ExecutionConfig, MatingConfig, PopulationConfig};
pub use engine::{RunSummary, SimulationState, Simulator, StopHandle};
pub use initialization::InitGenotype;
pub use population::Population;
pub use replicates::{replicate_rngs, rngs_from_seeds, Replicate, ReplicateSet};
