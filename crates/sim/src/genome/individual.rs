use crate::base::{Allele, Sex};
use crate::genome::Haplotype;

/// A diploid individual.
///
/// `Individual` contains two `Haplotype`s of equal length and a sex label.
/// Individuals are built once per generation by the mating engine and never
/// modified afterwards; the next generation replaces them wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Individual {
    /// First homolog
    haplotype1: Haplotype,
    /// Second homolog
    haplotype2: Haplotype,
    sex: Sex,
}

impl Individual {
    /// Create a new `Individual` from two haplotypes.
    ///
    /// Both haplotypes must cover the same loci; this is checked in debug
    /// builds only since the mating engine always produces matching lengths.
    pub fn new(haplotype1: Haplotype, haplotype2: Haplotype, sex: Sex) -> Self {
        debug_assert_eq!(haplotype1.len(), haplotype2.len());
        Self {
            haplotype1,
            haplotype2,
            sex,
        }
    }

    /// Build an individual from a flat genotype laid out as homolog 0 loci
    /// followed by homolog 1 loci.
    pub fn from_genotype(genotype: &[Allele], sex: Sex) -> Self {
        let (first, second) = genotype.split_at(genotype.len() / 2);
        Self::new(
            Haplotype::new(first.to_vec()),
            Haplotype::new(second.to_vec()),
            sex,
        )
    }

    #[inline]
    pub fn haplotype1(&self) -> &Haplotype {
        &self.haplotype1
    }

    #[inline]
    pub fn haplotype2(&self) -> &Haplotype {
        &self.haplotype2
    }

    /// Borrow homolog `strand` (0 or 1).
    #[inline]
    pub fn haplotype(&self, strand: usize) -> &Haplotype {
        if strand == 0 {
            &self.haplotype1
        } else {
            &self.haplotype2
        }
    }

    /// Borrow both haplotypes as a pair of references.
    pub fn haplotypes(&self) -> (&Haplotype, &Haplotype) {
        (&self.haplotype1, &self.haplotype2)
    }

    #[inline]
    pub fn sex(&self) -> Sex {
        self.sex
    }

    /// Number of loci per haplotype.
    #[inline]
    pub fn num_loci(&self) -> usize {
        self.haplotype1.len()
    }

    /// Allele pair at `locus`, or `None` if out of bounds.
    #[inline]
    pub fn alleles_at(&self, locus: usize) -> Option<(Allele, Allele)> {
        Some((self.haplotype1.get(locus)?, self.haplotype2.get(locus)?))
    }

    /// Whether the two homologs carry different alleles at `locus`.
    pub fn is_heterozygous(&self, locus: usize) -> bool {
        matches!(self.alleles_at(locus), Some((a, b)) if a != b)
    }

    /// Flatten to homolog 0 loci followed by homolog 1 loci.
    pub fn genotype(&self) -> Vec<Allele> {
        let mut genotype = Vec::with_capacity(self.num_loci() * 2);
        genotype.extend_from_slice(self.haplotype1.alleles());
        genotype.extend_from_slice(self.haplotype2.alleles());
        genotype
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_individual_new() {
        let ind = Individual::new(
            Haplotype::new(vec![0, 1]),
            Haplotype::new(vec![1, 0]),
            Sex::Male,
        );
        assert_eq!(ind.num_loci(), 2);
        assert_eq!(ind.sex(), Sex::Male);
        assert_eq!(ind.alleles_at(0), Some((0, 1)));
        assert_eq!(ind.alleles_at(2), None);
    }

    #[test]
    fn test_individual_from_genotype_layout() {
        let ind = Individual::from_genotype(&[0, 1, 1, 0], Sex::Female);
        assert_eq!(ind.haplotype1().alleles(), &[0, 1]);
        assert_eq!(ind.haplotype2().alleles(), &[1, 0]);
        assert_eq!(ind.genotype(), vec![0, 1, 1, 0]);
    }

    #[test]
    fn test_individual_haplotype_by_strand() {
        let ind = Individual::from_genotype(&[0, 1], Sex::Male);
        assert_eq!(ind.haplotype(0).get(0), Some(0));
        assert_eq!(ind.haplotype(1).get(0), Some(1));
    }

    #[test]
    fn test_individual_heterozygosity() {
        let ind = Individual::from_genotype(&[0, 1, 0, 1], Sex::Male);
        assert!(!ind.is_heterozygous(0));
        assert!(!ind.is_heterozygous(1));
        let ind = Individual::from_genotype(&[0, 1, 1, 1], Sex::Male);
        assert!(ind.is_heterozygous(0));
        assert!(!ind.is_heterozygous(1));
        assert!(!ind.is_heterozygous(5));
    }
}
