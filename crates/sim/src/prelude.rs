//! Commonly used imports for convenience.
//!
//! # Example
//!
//! ```
//! use wfsim_sim::prelude::*;
//!
//! let recorder = TrajectoryRecorder::new();
//! let mut sim = SimulatorBuilder::new()
//!     .population_size(50)
//!     .generations(20)
//!     .statistics(StatRequest::allele_freq([0]))
//!     .sink(recorder.handle())
//!     .seed(1)
//!     .build()
//!     .unwrap();
//! sim.run().unwrap();
//! assert_eq!(recorder.series(0, "alleleFreq[0][0]").len(), 3);
//! ```

pub use crate::base::{Allele, GenomeLayout, Sex};
pub use crate::errors::{self, SimulationError, SinkError};
pub use crate::evolution::{MatingScheme, RecombinationConfig, Recombinator, SexMode};
pub use crate::genome::{Haplotype, Individual};
pub use crate::reporting::{
    ConsoleSink, DelimitedFileSink, SamplingCadence, StatisticsSink, TrajectoryRecorder,
};
pub use crate::simulation::{
    Configuration, InitGenotype, Population, ReplicateSet, RunSummary, Simulator,
    SimulatorBuilder, StopHandle,
};
pub use crate::statistics::{LdMeasure, Snapshot, StatRequest};
