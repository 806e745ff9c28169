//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use aprender_ica::prelude::*;
//! ```

pub use crate::config::IcaConfig;
pub use crate::engine::{IcaResult, IcaVariant, ImperialistCompetitive, TerminationReason};
pub use crate::error::{IcaError, Result};
pub use crate::harness::{RunHarness, RunSummary};
pub use crate::problem::{Benchmark, BenchmarkProblem, Bounds, FnProblem, Problem};
pub use crate::sink::{DecadeSink, NullSink, TraceSink, WriterSink};
