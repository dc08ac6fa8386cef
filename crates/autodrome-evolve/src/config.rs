//! Training configuration and its validation.

/// Fraction of each generation produced by one genetic operator.
///
/// The `random` rate is nominal: the random slice actually absorbs
/// whatever remains after the other slices are carved out, so rounding
/// never changes the population size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatorRates {
    pub best: f32,
    pub crossover: f32,
    pub random_crossover: f32,
    pub value_crossover: f32,
    pub smooth_crossover: f32,
    pub mutated: f32,
    pub random: f32,
}

impl Default for OperatorRates {
    fn default() -> Self {
        Self {
            best: 0.3,
            crossover: 0.1,
            random_crossover: 0.1,
            value_crossover: 0.1,
            smooth_crossover: 0.1,
            mutated: 0.2,
            random: 0.1,
        }
    }
}

impl OperatorRates {
    fn sum(&self) -> f32 {
        self.best
            + self.crossover
            + self.random_crossover
            + self.value_crossover
            + self.smooth_crossover
            + self.mutated
            + self.random
    }

    fn all(&self) -> [f32; 7] {
        [
            self.best,
            self.crossover,
            self.random_crossover,
            self.value_crossover,
            self.smooth_crossover,
            self.mutated,
            self.random,
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvolveConfig {
    /// Population size in groups of 10 genomes.
    pub population_groups: usize,
    /// Simulation ticks per second.
    pub tick_rate: f32,
    /// Per-gene probability of mutation in the mutated slice.
    pub mutation_rate: f64,
    /// Gates per checkpoint window.
    pub step_width: usize,
    /// Thread cap for parallel genome evaluation.
    pub max_parallelism: usize,
    pub rates: OperatorRates,
}

impl Default for EvolveConfig {
    fn default() -> Self {
        Self {
            population_groups: 20,
            tick_rate: 30.0,
            mutation_rate: 0.03,
            step_width: 3,
            max_parallelism: 12,
            rates: OperatorRates::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("population must have at least one group of 10")]
    EmptyPopulation,
    #[display("tick rate must be positive, got {rate}")]
    NonPositiveTickRate { rate: f32 },
    #[display("mutation rate must be within [0, 1], got {rate}")]
    MutationRateOutOfRange { rate: f64 },
    #[display("step width must be at least 2, got {width}")]
    StepWidthTooSmall { width: usize },
    #[display("max parallelism must be positive")]
    NoParallelism,
    #[display("operator rate must be within [0, 1], got {rate}")]
    RateOutOfRange { rate: f32 },
    #[display("operator rates must sum to 1, got {sum}")]
    RatesDoNotSumToOne { sum: f32 },
}

impl EvolveConfig {
    /// Total number of genomes per generation.
    #[must_use]
    pub fn population_size(&self) -> usize {
        self.population_groups * 10
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_groups == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if self.tick_rate <= 0.0 {
            return Err(ConfigError::NonPositiveTickRate {
                rate: self.tick_rate,
            });
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::MutationRateOutOfRange {
                rate: self.mutation_rate,
            });
        }
        if self.step_width < 2 {
            return Err(ConfigError::StepWidthTooSmall {
                width: self.step_width,
            });
        }
        if self.max_parallelism == 0 {
            return Err(ConfigError::NoParallelism);
        }
        for rate in self.rates.all() {
            if !(0.0..=1.0).contains(&rate) {
                return Err(ConfigError::RateOutOfRange { rate });
            }
        }
        let sum = self.rates.sum();
        if (sum - 1.0).abs() > 1e-4 {
            return Err(ConfigError::RatesDoNotSumToOne { sum });
        }
        Ok(())
    }
}
