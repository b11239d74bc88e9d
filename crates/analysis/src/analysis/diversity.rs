//! Diversity metrics for population genetics
//!
//! Gene diversity (expected heterozygosity) from allele frequencies, to be
//! compared with the observed heterozygosity the simulator reports.

use rayon::prelude::*;
use wfsim_sim::errors::StatisticsError;
use wfsim_sim::simulation::Population;
use wfsim_sim::statistics::allele_frequencies;

/// Expected heterozygosity at `locus` under Hardy-Weinberg proportions.
///
/// # Formula
///
/// $$H_e = 1 - \sum_a p_a^2$$
///
/// # References
///
/// Nei, M. (1973). Analysis of gene diversity in subdivided populations.
/// PNAS, 70(12), 3321-3323.
pub fn expected_heterozygosity(population: &Population, locus: usize) -> Result<f64, StatisticsError> {
    let freqs = allele_frequencies(population, locus)?;
    Ok(1.0 - freqs.iter().map(|p| p * p).sum::<f64>())
}

/// Mean expected heterozygosity over all loci, computed in parallel.
pub fn mean_expected_heterozygosity(population: &Population) -> Result<f64, StatisticsError> {
    let loci = population.num_loci();
    let total = (0..loci)
        .into_par_iter()
        .map(|locus| expected_heterozygosity(population, locus))
        .collect::<Result<Vec<f64>, _>>()?
        .iter()
        .sum::<f64>();
    Ok(total / loci as f64)
}
