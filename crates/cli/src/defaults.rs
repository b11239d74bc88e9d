//! Shared default values for the command-line front end.
//! The demonstration commands reproduce the classic genetic drift and
//! LD decay programs with these parameters.

// Genetic drift
pub const DRIFT_POP_SIZE: usize = 100;
pub const DRIFT_INITIAL_FREQ: f64 = 0.2;
pub const DRIFT_GENERATIONS: usize = 100;
pub const DRIFT_REPLICATIONS: usize = 5;
pub const DRIFT_PRECISION: usize = 3;

// LD decay
pub const LD_POP_SIZE: usize = 1000;
pub const LD_GENERATIONS: usize = 50;
pub const LD_REC_RATE: f64 = 0.01;
pub const LD_REPLICATES: usize = 5;
pub const LD_PRECISION: usize = 4;
/// Every individual starts as 01/10: complete disequilibrium.
pub const LD_START_GENOTYPE: [u8; 4] = [0, 1, 1, 0];
/// |D| of the starting genotype.
pub const LD_INITIAL_D: f64 = 0.25;

pub const RUN_PRECISION: usize = 4;
