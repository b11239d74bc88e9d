//! Single-locus statistics.

use crate::base::Allele;
use crate::errors::StatisticsError;
use crate::simulation::Population;

pub(crate) fn check_locus(population: &Population, locus: usize) -> Result<(), StatisticsError> {
    if population.is_empty() {
        return Err(StatisticsError::EmptyPopulation);
    }
    if locus >= population.num_loci() {
        return Err(StatisticsError::LocusOutOfRange {
            locus,
            loci: population.num_loci(),
        });
    }
    Ok(())
}

/// Fraction of the `2N` allele copies at `locus` equal to `allele`.
///
/// # Errors
/// `EmptyPopulation` if `N == 0`, `LocusOutOfRange` for an unknown locus.
pub fn allele_frequency(
    population: &Population,
    locus: usize,
    allele: Allele,
) -> Result<f64, StatisticsError> {
    check_locus(population, locus)?;
    let count = population
        .allele_copies(locus)
        .filter(|&a| a == allele)
        .count();
    Ok(count as f64 / (2 * population.size()) as f64)
}

/// Frequencies of every allele `0..num_alleles` at `locus`, in one pass.
pub fn allele_frequencies(population: &Population, locus: usize) -> Result<Vec<f64>, StatisticsError> {
    check_locus(population, locus)?;
    let mut counts = vec![0usize; usize::from(population.layout().num_alleles())];
    for allele in population.allele_copies(locus) {
        if let Some(c) = counts.get_mut(usize::from(allele)) {
            *c += 1;
        }
    }
    let total = (2 * population.size()) as f64;
    Ok(counts.into_iter().map(|c| c as f64 / total).collect())
}

/// Observed heterozygosity: fraction of individuals whose two homologs
/// differ at `locus`.
pub fn heterozygosity(population: &Population, locus: usize) -> Result<f64, StatisticsError> {
    check_locus(population, locus)?;
    let hets = population
        .individuals()
        .iter()
        .filter(|ind| ind.is_heterozygous(locus))
        .count();
    Ok(hets as f64 / population.size() as f64)
}
