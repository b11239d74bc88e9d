//! Analysis modules.

pub mod diversity;
pub mod temporal;
pub mod utils;

// Re-export commonly used functions
pub use diversity::{expected_heterozygosity, mean_expected_heterozygosity};
pub use temporal::{
    expected_drift_variance, expected_ld_decay, final_values, trajectories, ReplicateSummary,
    Trajectory,
};
