use serde::Serialize;
use std::ops::Range;

use crate::errors::ConfigurationError;

/// Physical arrangement of loci shared by every individual of a population.
///
/// Loci are numbered globally across chromosomes: with `loci_per_chromosome =
/// [2, 3]`, loci 0-1 sit on chromosome 0 and loci 2-4 on chromosome 1. Each
/// locus has a position (map distance) that recombination intensities scale
/// with. Positions default to `0, 1, 2, ...` within each chromosome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenomeLayout {
    loci_per_chromosome: Vec<usize>,
    positions: Vec<f64>,
    num_alleles: u8,
}

impl GenomeLayout {
    /// Create a biallelic layout with default positions.
    pub fn new(loci_per_chromosome: Vec<usize>) -> Result<Self, ConfigurationError> {
        let positions = loci_per_chromosome
            .iter()
            .flat_map(|&n| (0..n).map(|i| i as f64))
            .collect();
        Self::with_positions(loci_per_chromosome, positions)
    }

    /// Create a biallelic layout with explicit per-locus positions.
    ///
    /// Positions must be finite and non-decreasing within each chromosome.
    pub fn with_positions(
        loci_per_chromosome: Vec<usize>,
        positions: Vec<f64>,
    ) -> Result<Self, ConfigurationError> {
        if loci_per_chromosome.is_empty() || loci_per_chromosome.contains(&0) {
            return Err(ConfigurationError::NonPositive("loci per chromosome"));
        }
        let total: usize = loci_per_chromosome.iter().sum();
        if positions.len() != total {
            return Err(ConfigurationError::Invalid(format!(
                "{} positions given for {total} loci",
                positions.len()
            )));
        }

        let layout = Self {
            loci_per_chromosome,
            positions,
            num_alleles: 2,
        };
        for chr in 0..layout.num_chromosomes() {
            let pos = &layout.positions[layout.chromosome_range(chr)];
            if pos.iter().any(|p| !p.is_finite()) || pos.windows(2).any(|w| w[1] < w[0]) {
                return Err(ConfigurationError::Invalid(format!(
                    "positions on chromosome {chr} must be finite and non-decreasing"
                )));
            }
        }
        Ok(layout)
    }

    /// Set the number of allele states per locus (at least 2).
    pub fn with_alleles(mut self, num_alleles: u8) -> Result<Self, ConfigurationError> {
        if num_alleles < 2 {
            return Err(ConfigurationError::Invalid(format!(
                "at least 2 alleles are required, got {num_alleles}"
            )));
        }
        self.num_alleles = num_alleles;
        Ok(self)
    }

    /// Total number of loci `L`.
    #[inline]
    pub fn num_loci(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn num_chromosomes(&self) -> usize {
        self.loci_per_chromosome.len()
    }

    #[inline]
    pub fn num_alleles(&self) -> u8 {
        self.num_alleles
    }

    #[inline]
    pub fn loci_per_chromosome(&self) -> &[usize] {
        &self.loci_per_chromosome
    }

    #[inline]
    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    /// Global locus indices belonging to chromosome `chr`.
    pub fn chromosome_range(&self, chr: usize) -> Range<usize> {
        let start: usize = self.loci_per_chromosome[..chr].iter().sum();
        start..start + self.loci_per_chromosome[chr]
    }

    /// Chromosome index holding `locus`, or `None` if out of range.
    pub fn chromosome_of(&self, locus: usize) -> Option<usize> {
        let mut end = 0;
        for (chr, &n) in self.loci_per_chromosome.iter().enumerate() {
            end += n;
            if locus < end {
                return Some(chr);
            }
        }
        None
    }

    /// Whether locus `interval` and locus `interval + 1` sit on different
    /// chromosomes.
    pub fn is_chromosome_boundary(&self, interval: usize) -> bool {
        self.chromosome_of(interval) != self.chromosome_of(interval + 1)
    }

    /// Number of adjacent locus pairs across the whole genome (`L - 1`).
    #[inline]
    pub fn num_intervals(&self) -> usize {
        self.num_loci().saturating_sub(1)
    }

    /// Check that a locus index exists.
    pub fn check_locus(&self, locus: usize) -> Result<(), ConfigurationError> {
        if locus < self.num_loci() {
            Ok(())
        } else {
            Err(ConfigurationError::LocusOutOfRange {
                locus,
                loci: self.num_loci(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_single_chromosome() {
        let layout = GenomeLayout::new(vec![2]).unwrap();
        assert_eq!(layout.num_loci(), 2);
        assert_eq!(layout.num_chromosomes(), 1);
        assert_eq!(layout.num_alleles(), 2);
        assert_eq!(layout.positions(), &[0.0, 1.0]);
        assert_eq!(layout.num_intervals(), 1);
        assert!(!layout.is_chromosome_boundary(0));
    }

    #[test]
    fn test_layout_multiple_chromosomes() {
        let layout = GenomeLayout::new(vec![2, 3]).unwrap();
        assert_eq!(layout.num_loci(), 5);
        assert_eq!(layout.chromosome_range(1), 2..5);
        assert_eq!(layout.chromosome_of(1), Some(0));
        assert_eq!(layout.chromosome_of(4), Some(1));
        assert_eq!(layout.chromosome_of(5), None);
        assert!(layout.is_chromosome_boundary(1));
        assert!(!layout.is_chromosome_boundary(2));
    }

    #[test]
    fn test_layout_rejects_empty_chromosome() {
        assert_eq!(
            GenomeLayout::new(vec![]),
            Err(ConfigurationError::NonPositive("loci per chromosome"))
        );
        assert!(GenomeLayout::new(vec![1, 0]).is_err());
    }

    #[test]
    fn test_layout_rejects_bad_positions() {
        assert!(GenomeLayout::with_positions(vec![2], vec![0.0]).is_err());
        assert!(GenomeLayout::with_positions(vec![2], vec![1.0, 0.5]).is_err());
        assert!(GenomeLayout::with_positions(vec![2], vec![0.0, f64::NAN]).is_err());
        // Positions restart on a new chromosome.
        assert!(GenomeLayout::with_positions(vec![1, 1], vec![5.0, 0.0]).is_ok());
    }

    #[test]
    fn test_layout_alleles() {
        let layout = GenomeLayout::new(vec![1]).unwrap().with_alleles(4).unwrap();
        assert_eq!(layout.num_alleles(), 4);
        assert!(GenomeLayout::new(vec![1]).unwrap().with_alleles(1).is_err());
    }

    #[test]
    fn test_check_locus() {
        let layout = GenomeLayout::new(vec![3]).unwrap();
        assert!(layout.check_locus(2).is_ok());
        assert_eq!(
            layout.check_locus(3),
            Err(ConfigurationError::LocusOutOfRange { locus: 3, loci: 3 })
        );
    }
}
