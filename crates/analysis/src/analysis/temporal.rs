//! Temporal analysis
//!
//! Functions over the time series recorded by a
//! [`TrajectoryRecorder`](wfsim_sim::reporting::TrajectoryRecorder), plus the
//! Wright-Fisher expectations they are compared against.

use crate::analysis::utils::{mean, median, variance};
use serde::Serialize;
use std::collections::BTreeMap;
use wfsim_sim::reporting::Record;

/// Values within this distance of 0 or 1 count as lost or fixed.
const ABSORPTION_TOLERANCE: f64 = 1e-12;

/// The sampled values of one statistic in one replicate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trajectory {
    pub replicate: usize,
    /// `(generation, value)` pairs in emission order; undefined values are skipped
    pub points: Vec<(usize, f64)>,
}

impl Trajectory {
    /// Last recorded value.
    pub fn final_value(&self) -> Option<f64> {
        self.points.last().map(|&(_, v)| v)
    }

    /// First sampled generation at which a frequency reached 0 or 1.
    pub fn absorption_generation(&self) -> Option<usize> {
        self.points
            .iter()
            .find(|(_, v)| *v <= ABSORPTION_TOLERANCE || *v >= 1.0 - ABSORPTION_TOLERANCE)
            .map(|&(g, _)| g)
    }
}

/// Split records into one trajectory of `stat` per replicate, ordered by replicate.
pub fn trajectories(records: &[Record], stat: &str) -> Vec<Trajectory> {
    let mut by_replicate: BTreeMap<usize, Vec<(usize, f64)>> = BTreeMap::new();
    for record in records {
        let points = by_replicate.entry(record.replicate).or_default();
        if let Some(value) = record.snapshot.get(stat) {
            points.push((record.generation, value));
        }
    }
    by_replicate
        .into_iter()
        .map(|(replicate, points)| Trajectory { replicate, points })
        .collect()
}

/// Last defined value of `stat` in each replicate, ordered by replicate.
/// Replicates where `stat` was never defined are skipped.
pub fn final_values(records: &[Record], stat: &str) -> Vec<f64> {
    trajectories(records, stat)
        .iter()
        .filter_map(Trajectory::final_value)
        .collect()
}

/// Cross-replicate summary of a frequency-like statistic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReplicateSummary {
    pub replicates: usize,
    pub mean: f64,
    /// Sample variance across replicates
    pub variance: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    /// Replicates at 1
    pub fixed: usize,
    /// Replicates at 0
    pub lost: usize,
}

impl ReplicateSummary {
    /// Summarize one value per replicate. `None` for an empty slice.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        let median = median(&mut sorted);
        Some(Self {
            replicates: values.len(),
            mean: mean(values),
            variance: variance(values),
            median,
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            fixed: values.iter().filter(|&&v| v >= 1.0 - ABSORPTION_TOLERANCE).count(),
            lost: values.iter().filter(|&&v| v <= ABSORPTION_TOLERANCE).count(),
        })
    }

    /// Summarize the final value of `stat` across replicates.
    pub fn of_final(records: &[Record], stat: &str) -> Option<Self> {
        Self::from_values(&final_values(records, stat))
    }

    /// Fraction of replicates that reached 0 or 1.
    pub fn absorbed_fraction(&self) -> f64 {
        (self.fixed + self.lost) as f64 / self.replicates as f64
    }
}

/// Expected variance of an allele frequency after `t` generations of drift
/// in a diploid population of size `n`, starting from `p`:
/// `p(1-p)(1 - (1 - 1/2N)^t)`.
pub fn expected_drift_variance(p: f64, n: usize, t: usize) -> f64 {
    let retained = (1.0 - 1.0 / (2.0 * n as f64)).powf(t as f64);
    p * (1.0 - p) * (1.0 - retained)
}

/// Expected disequilibrium after `t` generations at recombination rate `r`:
/// `D0 (1 - r)^t`.
pub fn expected_ld_decay(d0: f64, r: f64, t: usize) -> f64 {
    d0 * (1.0 - r).powf(t as f64)
}
