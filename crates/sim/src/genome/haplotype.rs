use crate::base::Allele;

/// A haplotype: the alleles carried by one homologous copy of the genome,
/// one entry per locus in global locus order.
///
/// `Haplotype` spans every chromosome of the layout; chromosome boundaries
/// are a property of the shared `GenomeLayout`, not of the haplotype.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Haplotype {
    alleles: Vec<Allele>,
}

impl Haplotype {
    /// Create a haplotype from its alleles.
    pub fn new(alleles: Vec<Allele>) -> Self {
        Self { alleles }
    }

    /// Create a haplotype with every locus set to `allele`.
    pub fn uniform(allele: Allele, num_loci: usize) -> Self {
        Self {
            alleles: vec![allele; num_loci],
        }
    }

    /// Create an empty haplotype with room for `capacity` loci.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            alleles: Vec::with_capacity(capacity),
        }
    }

    /// Number of loci.
    #[inline]
    pub fn len(&self) -> usize {
        self.alleles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.alleles.is_empty()
    }

    /// Allele at `locus`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, locus: usize) -> Option<Allele> {
        self.alleles.get(locus).copied()
    }

    /// Append the allele of the next locus.
    #[inline]
    pub fn push(&mut self, allele: Allele) {
        self.alleles.push(allele);
    }

    /// Borrow the alleles as a slice.
    #[inline]
    pub fn alleles(&self) -> &[Allele] {
        &self.alleles
    }
}

impl From<Vec<Allele>> for Haplotype {
    fn from(alleles: Vec<Allele>) -> Self {
        Self::new(alleles)
    }
}
