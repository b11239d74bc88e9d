use serde::{Deserialize, Serialize};

/// When statistics are computed and emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingCadence {
    /// Step derived from the total generation count (see [`derived_step`]).
    #[default]
    Derived,
    /// Every `n` generations.
    Every(usize),
}

/// Sampling step for a run of `generations`: 10 up to 200 generations, 20 up
/// to 500, 50 beyond.
pub fn derived_step(generations: usize) -> usize {
    if generations <= 200 {
        10
    } else if generations <= 500 {
        20
    } else {
        50
    }
}

impl SamplingCadence {
    /// Step in generations between samples.
    pub fn step(&self, generations: usize) -> usize {
        match self {
            Self::Derived => derived_step(generations),
            Self::Every(n) => (*n).max(1),
        }
    }

    /// Whether generation index `generation` (0-based) of a run of
    /// `generations` is sampled. The final generation always is.
    pub fn should_sample(&self, generation: usize, generations: usize) -> bool {
        generation.is_multiple_of(self.step(generations)) || generation + 1 == generations
    }

    /// All sampled generation indices of a run, in order.
    pub fn sampled_generations(&self, generations: usize) -> Vec<usize> {
        (0..generations)
            .filter(|&g| self.should_sample(g, generations))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_step_boundaries() {
        assert_eq!(derived_step(1), 10);
        assert_eq!(derived_step(100), 10);
        assert_eq!(derived_step(200), 10);
        assert_eq!(derived_step(201), 20);
        assert_eq!(derived_step(350), 20);
        assert_eq!(derived_step(500), 20);
        assert_eq!(derived_step(501), 50);
        assert_eq!(derived_step(1000), 50);
    }

    #[test]
    fn test_sampled_generations_include_final() {
        let gens = SamplingCadence::Derived.sampled_generations(100);
        let mut expected: Vec<usize> = (0..100).step_by(10).collect();
        expected.push(99);
        assert_eq!(gens, expected);
    }

    #[test]
    fn test_sampled_generations_for_long_runs() {
        let gens = SamplingCadence::Derived.sampled_generations(350);
        assert_eq!(&gens[..3], &[0, 20, 40]);
        assert_eq!(gens.last(), Some(&349));

        let gens = SamplingCadence::Derived.sampled_generations(1000);
        assert_eq!(&gens[..3], &[0, 50, 100]);
        assert_eq!(gens.len(), 21);
    }

    #[test]
    fn test_every_cadence() {
        let cadence = SamplingCadence::Every(1);
        assert_eq!(cadence.sampled_generations(5), vec![0, 1, 2, 3, 4]);
        // Zero is treated as every generation rather than dividing by zero.
        assert_eq!(SamplingCadence::Every(0).step(10), 1);
    }
}
