//! Linkage disequilibrium
//!
//! Measures non-random association of alleles at two loci from the `2N`
//! haplotypes of a population. Statistics are computed for allele 0 at each
//! locus against all other alleles.
//!
//! # References
//!
//! Lewontin, R. C. (1964). The Interaction of Selection and Linkage. I. General
//! Considerations; Heterotic Models. Genetics, 49(1), 49-67.

use crate::errors::StatisticsError;
use crate::simulation::Population;
use crate::statistics::frequency::check_locus;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Linkage disequilibrium statistics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LdStatistics {
    /// D statistic (raw disequilibrium, signed)
    pub d: f64,
    /// D' (D normalized by its maximum given the marginals, signed)
    pub d_prime: f64,
    /// r² (correlation coefficient squared)
    pub r_squared: f64,
    /// Marginal frequency of allele 0 at the first locus
    pub p_a: f64,
    /// Marginal frequency of allele 0 at the second locus
    pub p_b: f64,
}

impl LdStatistics {
    /// Theoretical maximum of |D| for the observed marginals and the sign of D.
    pub fn d_max(&self) -> f64 {
        d_max(self.d, self.p_a, self.p_b)
    }
}

fn d_max(d: f64, p_a: f64, p_b: f64) -> f64 {
    if d >= 0.0 {
        (p_a * (1.0 - p_b)).min((1.0 - p_a) * p_b)
    } else {
        (p_a * p_b).min((1.0 - p_a) * (1.0 - p_b))
    }
}

/// Calculate linkage disequilibrium between two loci
///
/// # Errors
///
/// `DegenerateLocus` if allele 0 is fixed or lost at either locus, since D'
/// and r² are undefined there. `EmptyPopulation` and `LocusOutOfRange` as
/// for the other statistics.
pub fn linkage_disequilibrium(
    population: &Population,
    locus_i: usize,
    locus_j: usize,
) -> Result<LdStatistics, StatisticsError> {
    check_locus(population, locus_i)?;
    check_locus(population, locus_j)?;

    let mut count_a = 0usize;
    let mut count_b = 0usize;
    let mut count_ab = 0usize;
    for ind in population.individuals() {
        let (h1, h2) = ind.haplotypes();
        for hap in [h1.alleles(), h2.alleles()] {
            let a = hap[locus_i] == 0;
            let b = hap[locus_j] == 0;
            count_a += usize::from(a);
            count_b += usize::from(b);
            count_ab += usize::from(a && b);
        }
    }

    let n = (2 * population.size()) as f64;
    let p_a = count_a as f64 / n;
    let p_b = count_b as f64 / n;
    if count_a == 0 || count_a as f64 == n {
        return Err(StatisticsError::DegenerateLocus { locus: locus_i });
    }
    if count_b == 0 || count_b as f64 == n {
        return Err(StatisticsError::DegenerateLocus { locus: locus_j });
    }
    let p_ab = count_ab as f64 / n;

    let d = p_ab - p_a * p_b;
    // Marginals are strictly inside (0, 1), so both bounds are positive.
    let d_prime = d / d_max(d, p_a, p_b);
    let r_squared = (d * d) / (p_a * (1.0 - p_a) * p_b * (1.0 - p_b));

    Ok(LdStatistics {
        d,
        d_prime,
        r_squared: r_squared.min(1.0),
        p_a,
        p_b,
    })
}

/// Which LD measure to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LdMeasure {
    #[default]
    #[serde(rename = "D")]
    D,
    #[serde(rename = "D'")]
    DPrime,
    #[serde(rename = "R2")]
    R2,
}

impl LdMeasure {
    /// Snapshot name of this measure for a locus pair.
    pub fn stat_name(self, locus_i: usize, locus_j: usize) -> String {
        match self {
            Self::D => format!("LD[{locus_i}][{locus_j}]"),
            Self::DPrime => format!("LD_prime[{locus_i}][{locus_j}]"),
            Self::R2 => format!("R2[{locus_i}][{locus_j}]"),
        }
    }

    /// Upper bound of the reported magnitude (0.25 for D, 1 otherwise).
    pub fn upper_limit(self) -> f64 {
        match self {
            Self::D => 0.25,
            Self::DPrime | Self::R2 => 1.0,
        }
    }

    /// Reported (unsigned) value of this measure.
    pub fn value(self, ld: &LdStatistics) -> f64 {
        match self {
            Self::D => ld.d.abs(),
            Self::DPrime => ld.d_prime.abs(),
            Self::R2 => ld.r_squared,
        }
    }
}

impl fmt::Display for LdMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::D => f.write_str("D"),
            Self::DPrime => f.write_str("D'"),
            Self::R2 => f.write_str("R2"),
        }
    }
}

impl FromStr for LdMeasure {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "D" => Ok(Self::D),
            "D'" => Ok(Self::DPrime),
            "R2" => Ok(Self::R2),
            other => Err(format!("unknown LD measure '{other}' (expected D, D' or R2)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{GenomeLayout, Sex};
    use crate::genome::Individual;
    use std::sync::Arc;

    /// Population of two-locus individuals given as (haplotype1, haplotype2).
    fn population(pairs: &[([u8; 2], [u8; 2])]) -> Population {
        let layout = Arc::new(GenomeLayout::new(vec![2]).unwrap());
        let individuals = pairs
            .iter()
            .map(|(h1, h2)| Individual::from_genotype(&[h1[0], h1[1], h2[0], h2[1]], Sex::Male))
            .collect();
        Population::new("pop", layout, individuals)
    }

    #[test]
    fn test_repulsion_phase_is_complete_negative_ld() {
        // Every individual is 01/10.
        let pop = population(&[([0, 1], [1, 0]); 10]);
        let ld = linkage_disequilibrium(&pop, 0, 1).unwrap();
        assert!((ld.d + 0.25).abs() < 1e-12);
        assert!((ld.d_prime + 1.0).abs() < 1e-12);
        assert!((ld.r_squared - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_coupling_phase_is_complete_positive_ld() {
        let pop = population(&[([0, 0], [1, 1]); 4]);
        let ld = linkage_disequilibrium(&pop, 0, 1).unwrap();
        assert!((ld.d - 0.25).abs() < 1e-12);
        assert!((ld.d_prime - 1.0).abs() < 1e-12);
        assert!((ld.r_squared - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_linkage_equilibrium() {
        // All four haplotypes equally common.
        let pop = population(&[([0, 0], [0, 1]), ([1, 0], [1, 1])]);
        let ld = linkage_disequilibrium(&pop, 0, 1).unwrap();
        assert_eq!(ld.d, 0.0);
        assert_eq!(ld.d_prime, 0.0);
        assert_eq!(ld.r_squared, 0.0);
    }

    #[test]
    fn test_d_within_bounds() {
        let pop = population(&[
            ([0, 0], [0, 1]),
            ([0, 0], [1, 1]),
            ([1, 1], [1, 1]),
            ([0, 1], [1, 0]),
        ]);
        let ld = linkage_disequilibrium(&pop, 0, 1).unwrap();
        assert!(ld.d.abs() <= ld.d_max() + 1e-12);
        assert!((0.0..=1.0).contains(&ld.r_squared));
        assert!(ld.d_prime.abs() <= 1.0 + 1e-12);
    }

    #[test]
    fn test_degenerate_locus() {
        let pop = population(&[([0, 0], [0, 1]), ([0, 1], [0, 0])]);
        assert_eq!(
            linkage_disequilibrium(&pop, 0, 1),
            Err(StatisticsError::DegenerateLocus { locus: 0 })
        );
        let pop = population(&[([0, 1], [1, 1]), ([1, 1], [0, 1])]);
        assert_eq!(
            linkage_disequilibrium(&pop, 0, 1),
            Err(StatisticsError::DegenerateLocus { locus: 1 })
        );
    }

    #[test]
    fn test_measure_names_and_parsing() {
        assert_eq!(LdMeasure::D.stat_name(0, 1), "LD[0][1]");
        assert_eq!(LdMeasure::DPrime.stat_name(0, 1), "LD_prime[0][1]");
        assert_eq!(LdMeasure::R2.stat_name(0, 1), "R2[0][1]");
        assert_eq!("D'".parse::<LdMeasure>(), Ok(LdMeasure::DPrime));
        assert!("r2".parse::<LdMeasure>().is_err());
        assert_eq!(LdMeasure::D.upper_limit(), 0.25);
    }
}
