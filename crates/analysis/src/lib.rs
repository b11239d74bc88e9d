//! Population genetics analysis for wfsim
//!
//! Post-hoc tools over recorded time series and populations:
//! - Per-replicate trajectories and cross-replicate summaries
//! - Wright-Fisher expectations for drift and LD decay
//! - Gene diversity

pub mod analysis;

pub use analysis::{diversity, temporal, utils};
pub use analysis::{
    expected_drift_variance, expected_heterozygosity, expected_ld_decay, final_values,
    trajectories, ReplicateSummary, Trajectory,
};
