use core::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Allele value at a single locus.
///
/// Alleles are small non-negative integers in `0..num_alleles`; the default
/// biallelic model uses 0 and 1.
pub type Allele = u8;

/// Sex label of an individual.
///
/// Sex is drawn with equal probability at initialization and for every
/// offspring. It only matters to the mating scheme when sex-paired mating is
/// enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Draw a sex label with probability 0.5 each.
    #[inline]
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.random::<f64>() < 0.5 {
            Self::Male
        } else {
            Self::Female
        }
    }

    /// Return the other sex.
    #[inline(always)]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Male => Self::Female,
            Self::Female => Self::Male,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Male => f.write_str("male"),
            Self::Female => f.write_str("female"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    #[test]
    fn test_sex_display() {
        assert_eq!(Sex::Male.to_string(), "male");
        assert_eq!(Sex::Female.to_string(), "female");
    }

    #[test]
    fn test_sex_opposite() {
        assert_eq!(Sex::Male.opposite(), Sex::Female);
        assert_eq!(Sex::Female.opposite(), Sex::Male);
    }

    #[test]
    fn test_sex_random_is_balanced() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        let males = (0..10_000)
            .filter(|_| Sex::random(&mut rng) == Sex::Male)
            .count();
        assert!((4_700..=5_300).contains(&males), "males = {males}");
    }
}
