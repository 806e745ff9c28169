//! Repeated independent runs and their aggregate statistics.
//!
//! [`RunHarness`] executes the same optimizer `runs` times against one cost
//! surface. With the `parallel` feature (default) runs are spread over a
//! dedicated rayon pool of [`thread_count`](RunHarness::thread_count)
//! workers; without it they run one after another. A run that returns an
//! error or panics is logged, reported as [`IcaError::RunFailed`] and left
//! out of the [`RunSummary`].
//!
//! # Example
//!
//! ```
//! use aprender_ica::prelude::*;
//!
//! let problem = Benchmark::Sphere.problem(2).unwrap();
//! let ica = ImperialistCompetitive::new(
//!     IcaConfig::default().with_population(20, 2).with_decades(50),
//! )
//! .with_seed(7);
//!
//! let summary = RunHarness::new(ica, 6).evaluate(&problem).unwrap();
//! assert_eq!(summary.successful_runs, 6);
//! assert!(summary.best <= summary.mean);
//! ```

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::engine::{IcaResult, ImperialistCompetitive};
use crate::error::{IcaError, Result};
use crate::problem::Problem;

/// Runs one optimizer several times with derived seeds.
#[derive(Debug, Clone)]
pub struct RunHarness {
    optimizer: ImperialistCompetitive,
    runs: usize,
    threads: Option<usize>,
}

impl RunHarness {
    /// Harness for `runs` independent runs of `optimizer`.
    ///
    /// When the optimizer has a seed `s`, run `i` uses seed `s + i`;
    /// otherwise every run draws its own entropy.
    #[must_use]
    pub fn new(optimizer: ImperialistCompetitive, runs: usize) -> Self {
        Self {
            optimizer,
            runs,
            threads: None,
        }
    }

    /// Override the worker count.
    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Number of runs.
    #[must_use]
    pub fn runs(&self) -> usize {
        self.runs
    }

    /// Worker count: the override, else `max(1, runs / 3)`.
    #[must_use]
    pub fn thread_count(&self) -> usize {
        self.threads.unwrap_or(self.runs / 3).max(1)
    }

    /// Execute every run and aggregate the successful ones.
    pub fn evaluate<P: Problem + ?Sized>(&self, problem: &P) -> Result<RunSummary> {
        let outcomes = self.run_all(problem)?;
        let summary = RunSummary::from_outcomes(&outcomes)?;
        info!(
            problem = problem.name(),
            runs = self.runs,
            failed = summary.failed_runs,
            best = summary.best,
            mean = summary.mean,
            std_dev = summary.std_dev,
            "harness finished"
        );
        Ok(summary)
    }

    /// Execute every run, returning each outcome in run order.
    pub fn run_all<P: Problem + ?Sized>(&self, problem: &P) -> Result<Vec<Result<IcaResult>>> {
        if self.runs == 0 {
            return Err(IcaError::invalid_param("runs", self.runs, "> 0"));
        }

        #[cfg(feature = "parallel")]
        let outcomes = {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.thread_count())
                .build()
                .map_err(|e| IcaError::ThreadPool(e.to_string()))?;
            pool.install(|| {
                (0..self.runs)
                    .into_par_iter()
                    .map(|run| self.run_once(problem, run))
                    .collect::<Vec<_>>()
            })
        };

        #[cfg(not(feature = "parallel"))]
        let outcomes: Vec<_> = (0..self.runs)
            .map(|run| self.run_once(problem, run))
            .collect();

        Ok(outcomes)
    }

    fn run_once<P: Problem + ?Sized>(&self, problem: &P, run: usize) -> Result<IcaResult> {
        let optimizer = match self.optimizer.seed() {
            Some(seed) => self.optimizer.clone().with_seed(seed.wrapping_add(run as u64)),
            None => self.optimizer.clone(),
        };

        let outcome = match panic::catch_unwind(AssertUnwindSafe(|| optimizer.optimize(problem))) {
            Ok(result) => result.map_err(|e| IcaError::RunFailed {
                run,
                reason: e.to_string(),
            }),
            Err(payload) => Err(IcaError::RunFailed {
                run,
                reason: panic_message(payload.as_ref()),
            }),
        };

        match &outcome {
            Ok(result) => info!(
                run,
                objective = result.objective_value,
                decades = result.decades,
                empires = result.empires_remaining,
                "run finished"
            ),
            Err(err) => warn!(run, error = %err, "run failed"),
        }
        outcome
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        format!("panicked: {msg}")
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        format!("panicked: {msg}")
    } else {
        "panicked".to_string()
    }
}

/// Aggregate over the successful runs of a harness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Lowest final cost
    pub best: f64,
    /// Solution of the best run
    pub best_solution: Vec<f64>,
    /// Index of the best run
    pub best_run: usize,
    /// Mean final cost
    pub mean: f64,
    /// Population variance of the final costs (divisor = count)
    pub variance: f64,
    /// Square root of [`variance`](Self::variance)
    pub std_dev: f64,
    /// Runs that produced a result
    pub successful_runs: usize,
    /// Runs that errored or panicked
    pub failed_runs: usize,
}

impl RunSummary {
    /// Aggregate `outcomes`, indexed by run; failed runs are skipped.
    pub fn from_outcomes(outcomes: &[Result<IcaResult>]) -> Result<Self> {
        let successes: Vec<(usize, &IcaResult)> = outcomes
            .iter()
            .enumerate()
            .filter_map(|(run, outcome)| outcome.as_ref().ok().map(|r| (run, r)))
            .collect();

        let Some(&(best_run, best)) = successes
            .iter()
            .min_by(|a, b| a.1.objective_value.total_cmp(&b.1.objective_value))
        else {
            return Err(IcaError::NoSuccessfulRuns {
                requested: outcomes.len(),
            });
        };

        let count = successes.len() as f64;
        let mean = successes.iter().map(|(_, r)| r.objective_value).sum::<f64>() / count;
        let variance = successes
            .iter()
            .map(|(_, r)| (r.objective_value - mean).powi(2))
            .sum::<f64>()
            / count;

        Ok(Self {
            best: best.objective_value,
            best_solution: best.solution.clone(),
            best_run,
            mean,
            variance,
            std_dev: variance.sqrt(),
            successful_runs: successes.len(),
            failed_runs: outcomes.len() - successes.len(),
        })
    }
}

#[cfg(test)]
#[path = "harness_tests.rs"]
mod tests;
