//! Aprender-ICA: the Imperialist Competitive Algorithm in pure Rust.
//!
//! ICA is a population-based optimizer for bounded, derivative-free
//! minimization. Candidate points ("countries") are grouped into empires;
//! each empire pulls its colonies toward its imperialist, randomly
//! re-seeds a decaying share of them, and promotes any colony that beats
//! its ruler. Close empires unite and the weakest empire slowly loses
//! colonies to the others until it collapses.
//!
//! # Quick Start
//!
//! ```
//! use aprender_ica::prelude::*;
//!
//! let bounds = Bounds::uniform(2, -5.0, 5.0).unwrap();
//! let problem = FnProblem::new("shifted", bounds, |x: &[f64]| {
//!     (x[0] - 1.0).powi(2) + (x[1] + 2.0).powi(2)
//! });
//!
//! let ica = ImperialistCompetitive::new(
//!     IcaConfig::default().with_population(40, 4).with_decades(200),
//! )
//! .with_seed(42);
//!
//! let result = ica.optimize(&problem).unwrap();
//! assert!(result.objective_value < 1e-3);
//! ```
//!
//! # Modules
//!
//! - [`problem`]: Cost-surface trait, closure surfaces and benchmark catalog
//! - [`engine`]: The optimizer facade and the per-run decade loop
//! - [`empire`]: Countries and empires with their update rules
//! - [`harness`]: Repeated runs on a worker pool with aggregate statistics
//! - [`sink`]: Per-decade progress sinks
//! - [`config`]: Run parameters
//! - [`numeric`]: Vector helpers
//!
//! # Features
//!
//! - `parallel` (default): run harness runs on a rayon thread pool.
//!
//! Log events go through [`tracing`]; install a subscriber to see them.

pub mod config;
pub mod empire;
pub mod engine;
pub mod error;
pub mod harness;
pub mod numeric;
pub mod prelude;
pub mod problem;
pub mod search_space;
pub mod sink;

pub use config::IcaConfig;
pub use empire::{Country, Empire};
pub use engine::{Engine, IcaResult, IcaVariant, ImperialistCompetitive, TerminationReason};
pub use error::{IcaError, Result};
pub use harness::{RunHarness, RunSummary};
pub use problem::{Benchmark, BenchmarkProblem, Bounds, FnProblem, Problem};
pub use search_space::SearchSpace;
pub use sink::{DecadeSink, NullSink, TraceSink, WriterSink};
