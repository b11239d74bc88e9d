use crate::base::GenomeLayout;
use crate::errors::{ConfigurationError, StatisticsError};
use crate::simulation::Population;
use crate::statistics::{allele_frequencies, heterozygosity, linkage_disequilibrium, LdMeasure};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Statistic values of one replicate at one sampled generation.
///
/// Names whose value is undefined (for example LD at a fixed locus) are
/// kept in a separate set instead of being written as a number.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snapshot {
    values: BTreeMap<String, f64>,
    undefined: BTreeSet<String>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }

    pub fn mark_undefined(&mut self, name: impl Into<String>) {
        self.undefined.insert(name.into());
    }

    /// Value of `name`, or `None` if absent or undefined.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn is_undefined(&self, name: &str) -> bool {
        self.undefined.contains(name)
    }

    /// Defined values in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// Undefined names in order.
    pub fn undefined(&self) -> impl Iterator<Item = &str> {
        self.undefined.iter().map(String::as_str)
    }

    /// Number of defined values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.undefined.is_empty()
    }
}

/// Which statistics to compute at each sampled generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatRequest {
    /// Loci whose allele frequencies are reported (`alleleFreq[l][a]`).
    pub allele_freq: Vec<usize>,
    /// Locus pairs whose LD is reported (`LD`, `LD_prime`, `R2`).
    pub ld: Vec<[usize; 2]>,
    /// Loci whose observed heterozygosity is reported (`heteroFreq[l]`).
    pub hetero_freq: Vec<usize>,
    /// Report the population size (`popSize`).
    pub pop_size: bool,
}

impl StatRequest {
    /// Allele frequencies at the given loci.
    pub fn allele_freq(loci: impl IntoIterator<Item = usize>) -> Self {
        Self {
            allele_freq: loci.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Add an LD pair.
    pub fn with_ld(mut self, locus_i: usize, locus_j: usize) -> Self {
        self.ld.push([locus_i, locus_j]);
        self
    }

    /// Add heterozygosity loci.
    pub fn with_hetero_freq(mut self, loci: impl IntoIterator<Item = usize>) -> Self {
        self.hetero_freq.extend(loci);
        self
    }

    /// Check that every requested locus exists.
    pub fn validate(&self, layout: &GenomeLayout) -> Result<(), ConfigurationError> {
        self.allele_freq
            .iter()
            .chain(self.hetero_freq.iter())
            .chain(self.ld.iter().flatten())
            .try_for_each(|&locus| layout.check_locus(locus))
    }

    /// Name of an allele frequency entry.
    pub fn allele_freq_name(locus: usize, allele: usize) -> String {
        format!("alleleFreq[{locus}][{allele}]")
    }

    /// Name of a heterozygosity entry.
    pub fn hetero_freq_name(locus: usize) -> String {
        format!("heteroFreq[{locus}]")
    }

    /// Every statistic name `compute` emits for `layout`, in emission order.
    pub fn names(&self, layout: &GenomeLayout) -> Vec<String> {
        let mut names = Vec::new();
        if self.pop_size {
            names.push("popSize".to_string());
        }
        for &locus in &self.allele_freq {
            names.extend((0..usize::from(layout.num_alleles())).map(|a| Self::allele_freq_name(locus, a)));
        }
        names.extend(self.hetero_freq.iter().map(|&l| Self::hetero_freq_name(l)));
        for &[i, j] in &self.ld {
            names.extend([LdMeasure::D, LdMeasure::DPrime, LdMeasure::R2].map(|m| m.stat_name(i, j)));
        }
        names
    }

    /// Compute the requested statistics for one population.
    ///
    /// # Errors
    /// Degenerate loci are not errors here: their LD names are marked
    /// undefined in the snapshot. Any other statistics error is returned.
    pub fn compute(&self, population: &Population) -> Result<Snapshot, StatisticsError> {
        let mut snapshot = Snapshot::new();

        if self.pop_size {
            snapshot.insert("popSize", population.size() as f64);
        }

        for &locus in &self.allele_freq {
            for (allele, freq) in allele_frequencies(population, locus)?.into_iter().enumerate() {
                snapshot.insert(Self::allele_freq_name(locus, allele), freq);
            }
        }

        for &locus in &self.hetero_freq {
            snapshot.insert(Self::hetero_freq_name(locus), heterozygosity(population, locus)?);
        }

        let measures = [LdMeasure::D, LdMeasure::DPrime, LdMeasure::R2];
        for &[i, j] in &self.ld {
            match linkage_disequilibrium(population, i, j) {
                Ok(ld) => {
                    for m in measures {
                        snapshot.insert(m.stat_name(i, j), m.value(&ld));
                    }
                }
                Err(StatisticsError::DegenerateLocus { .. }) => {
                    for m in measures {
                        snapshot.mark_undefined(m.stat_name(i, j));
                    }
                }
                Err(e) => return Err(e),
            }
        }

        Ok(snapshot)
    }
}
