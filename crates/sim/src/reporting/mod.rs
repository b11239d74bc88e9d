//! Reporting of sampled statistics.
//!
//! The evolution driver emits snapshots to any number of
//! [`StatisticsSink`]s on the generations selected by its
//! [`SamplingCadence`]. No sinks means no output.

mod console;
mod file;
mod recorder;
mod sink;
pub mod types;

pub use console::ConsoleSink;
pub use file::{DelimitedFileSink, FileFormat, REPLICATE_PLACEHOLDER};
pub use recorder::{Record, TrajectoryRecorder};
pub use sink::StatisticsSink;
pub use types::{derived_step, SamplingCadence};
