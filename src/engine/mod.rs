//! The ICA optimizer.
//!
//! [`ImperialistCompetitive`] holds the configuration of a run (parameters,
//! seed, variant, optional starting population) and builds one [`Engine`]
//! per call to [`optimize`](ImperialistCompetitive::optimize).
//!
//! # Algorithm
//!
//! ```text
//! 1. Sample countries, crown the best as imperialists,
//!    deal the rest out as colonies in proportion to power
//! 2. Every decade, per empire:
//!    assimilate -> revolve -> (explore) -> possess
//! 3. Unite the first pair of empires with close imperialists
//! 4. With small probability, move a colony of the weakest
//!    empire to a power-weighted winner; collapse it if drained
//! 5. Track the best imperialist seen
//! ```
//!
//! # Example
//!
//! ```
//! use aprender_ica::prelude::*;
//!
//! let problem = Benchmark::Sphere.problem(3).unwrap();
//! let ica = ImperialistCompetitive::new(
//!     IcaConfig::default().with_population(30, 3).with_decades(100),
//! )
//! .with_seed(42);
//!
//! let result = ica.optimize(&problem).unwrap();
//! assert_eq!(result.history.len(), 100);
//! assert!(result.objective_value < 1.0);
//! ```
//!
//! # References
//!
//! - Atashpaz-Gargari & Lucas (2007): "Imperialist Competitive Algorithm:
//!   An algorithm for optimization inspired by imperialistic competition"

mod result;
mod state;

pub use result::{IcaResult, TerminationReason};
pub use state::{DecadeStatus, Engine};

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::config::IcaConfig;
use crate::error::Result;
use crate::problem::Problem;
use crate::sink::{DecadeSink, NullSink};

/// Which per-empire update rules run each decade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum IcaVariant {
    /// Assimilation, revolution and possession.
    #[default]
    Original,
    /// Adds the explorer step before possession.
    ///
    /// The explorer may grow an empire's colony set by one per decade, so
    /// long runs can accumulate colonies.
    Explorer,
}

/// Caller-supplied starting countries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct InitialPopulation {
    positions: Vec<Vec<f64>>,
    num_empires: usize,
}

/// Imperialist Competitive Algorithm optimizer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImperialistCompetitive {
    /// Run parameters
    #[serde(default)]
    pub config: IcaConfig,
    /// Update rules (default: [`IcaVariant::Original`])
    #[serde(default)]
    pub variant: IcaVariant,
    /// Random seed
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    initial_population: Option<InitialPopulation>,
}

impl ImperialistCompetitive {
    /// Optimizer with the given parameters.
    #[must_use]
    pub fn new(config: IcaConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Set the update rules.
    #[must_use]
    pub fn with_variant(mut self, variant: IcaVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Set random seed for reproducibility.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Start every run from `positions` ruled by `num_empires` empires
    /// instead of random countries.
    #[must_use]
    pub fn with_initial_population(mut self, positions: Vec<Vec<f64>>, num_empires: usize) -> Self {
        self.initial_population = Some(InitialPopulation {
            positions,
            num_empires,
        });
        self
    }

    /// Configured seed, if any.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Create RNG from seed or entropy.
    fn make_rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Build the engine for one run without starting it.
    pub fn engine<'p, P: Problem + ?Sized>(&self, problem: &'p P) -> Result<Engine<'p, P, StdRng>> {
        let rng = self.make_rng();
        match &self.initial_population {
            Some(initial) => Engine::with_population(
                problem,
                self.config.clone(),
                self.variant,
                initial.positions.clone(),
                initial.num_empires,
                rng,
            ),
            None => Engine::new(problem, self.config.clone(), self.variant, rng),
        }
    }

    /// Minimize `problem`.
    pub fn optimize<P: Problem + ?Sized>(&self, problem: &P) -> Result<IcaResult> {
        self.optimize_with_sink(problem, &mut NullSink)
    }

    /// Minimize `problem`, reporting each decade's best cost to `sink`.
    pub fn optimize_with_sink<P, S>(&self, problem: &P, sink: &mut S) -> Result<IcaResult>
    where
        P: Problem + ?Sized,
        S: DecadeSink + ?Sized,
    {
        Ok(self.engine(problem)?.run(sink))
    }
}
