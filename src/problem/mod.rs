//! Cost surfaces the optimizer minimizes.
//!
//! A [`Problem`] is a pure mapping from a bounded point to a scalar cost.
//! Implementations must be `Send + Sync`: the run harness evaluates one
//! surface from many worker threads at once.
//!
//! # Example
//!
//! ```
//! use aprender_ica::problem::{Bounds, FnProblem, Problem};
//!
//! let bounds = Bounds::uniform(2, -5.0, 5.0).unwrap();
//! let booth = FnProblem::new("booth", bounds, |x: &[f64]| {
//!     (x[0] + 2.0 * x[1] - 7.0).powi(2) + (2.0 * x[0] + x[1] - 5.0).powi(2)
//! });
//!
//! assert_eq!(booth.dimension(), 2);
//! assert!(booth.evaluate(&[1.0, 3.0]).unwrap().abs() < 1e-12);
//! assert!(booth.evaluate(&[1.0]).is_err());
//! ```

pub mod benchmarks;

use std::fmt;
use std::sync::OnceLock;

use crate::error::{IcaError, Result};
use crate::search_space::SearchSpace;

pub use benchmarks::{Benchmark, BenchmarkProblem};

/// Capability interface for a bounded scalar cost function (lower is better).
pub trait Problem: Send + Sync {
    /// Human-readable name.
    fn name(&self) -> &str;

    /// Box constraints of the surface.
    fn bounds(&self) -> &Bounds;

    /// Cost at `x`. Callers guarantee `x.len() == self.dimension()`.
    fn value_at(&self, x: &[f64]) -> f64;

    /// Number of decision variables.
    fn dimension(&self) -> usize {
        self.bounds().dimension()
    }

    /// Lower bound of dimension `index`.
    fn lower_bound(&self, index: usize) -> f64 {
        self.bounds().lower_bound(index)
    }

    /// Upper bound of dimension `index`.
    fn upper_bound(&self, index: usize) -> f64 {
        self.bounds().upper_bound(index)
    }

    /// Materialized bound vectors.
    fn space(&self) -> &SearchSpace {
        self.bounds().space()
    }

    /// Checked evaluation: rejects vectors of the wrong length.
    fn evaluate(&self, x: &[f64]) -> Result<f64> {
        IcaError::check_dimension(self.dimension(), x.len())?;
        Ok(self.value_at(x))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum BoundsKind {
    Uniform { dim: usize, lower: f64, upper: f64 },
    PerDimension,
}

/// Bounds of a cost surface.
///
/// Uniform bounds answer scalar queries directly and only build the full
/// [`SearchSpace`] vectors on first request. The cache sits behind a
/// [`OnceLock`], so concurrent first access from several runs initializes it
/// exactly once and no reader ever sees a partial vector.
#[derive(Debug, Clone)]
pub struct Bounds {
    kind: BoundsKind,
    space: OnceLock<SearchSpace>,
}

impl Bounds {
    /// Same `[lower, upper]` interval on every dimension.
    pub fn uniform(dim: usize, lower: f64, upper: f64) -> Result<Self> {
        if dim == 0 {
            return Err(IcaError::invalid_param("dimension", dim, "> 0"));
        }
        if !lower.is_finite() || !upper.is_finite() || lower > upper {
            return Err(IcaError::InvalidBounds {
                index: 0,
                lower,
                upper,
            });
        }
        Ok(Self {
            kind: BoundsKind::Uniform { dim, lower, upper },
            space: OnceLock::new(),
        })
    }

    /// Explicit per-dimension bounds.
    pub fn per_dimension(lower: Vec<f64>, upper: Vec<f64>) -> Result<Self> {
        let space = SearchSpace::new(lower, upper)?;
        Ok(Self {
            kind: BoundsKind::PerDimension,
            space: OnceLock::from(space),
        })
    }

    /// Number of dimensions.
    #[must_use]
    pub fn dimension(&self) -> usize {
        match self.kind {
            BoundsKind::Uniform { dim, .. } => dim,
            BoundsKind::PerDimension => self.space().dimension(),
        }
    }

    /// Whether every dimension shares one interval.
    #[must_use]
    pub fn is_uniform(&self) -> bool {
        matches!(self.kind, BoundsKind::Uniform { .. })
    }

    /// Lower bound of dimension `index`.
    #[must_use]
    pub fn lower_bound(&self, index: usize) -> f64 {
        match self.kind {
            BoundsKind::Uniform { lower, .. } => lower,
            BoundsKind::PerDimension => self.space().lower()[index],
        }
    }

    /// Upper bound of dimension `index`.
    #[must_use]
    pub fn upper_bound(&self, index: usize) -> f64 {
        match self.kind {
            BoundsKind::Uniform { upper, .. } => upper,
            BoundsKind::PerDimension => self.space().upper()[index],
        }
    }

    /// Whether the bound vectors have been built yet.
    #[must_use]
    pub fn is_materialized(&self) -> bool {
        self.space.get().is_some()
    }

    /// Full bound vectors, built on first call.
    pub fn space(&self) -> &SearchSpace {
        self.space.get_or_init(|| match self.kind {
            BoundsKind::Uniform { dim, lower, upper } => {
                SearchSpace::continuous(dim, lower, upper)
            }
            // per-dimension bounds are stored at construction
            BoundsKind::PerDimension => unreachable!("per-dimension bounds are eagerly stored"),
        })
    }
}

/// A cost surface backed by a closure.
pub struct FnProblem<F> {
    name: String,
    bounds: Bounds,
    f: F,
}

impl<F> FnProblem<F>
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    /// Wrap `f` as a problem over `bounds`.
    pub fn new(name: impl Into<String>, bounds: Bounds, f: F) -> Self {
        Self {
            name: name.into(),
            bounds,
            f,
        }
    }
}

impl<F> fmt::Debug for FnProblem<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnProblem")
            .field("name", &self.name)
            .field("bounds", &self.bounds)
            .finish_non_exhaustive()
    }
}

impl<F> Problem for FnProblem<F>
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    fn value_at(&self, x: &[f64]) -> f64 {
        (self.f)(x)
    }
}

impl<P: Problem + ?Sized> Problem for std::sync::Arc<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn bounds(&self) -> &Bounds {
        (**self).bounds()
    }

    fn value_at(&self, x: &[f64]) -> f64 {
        (**self).value_at(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn square() -> FnProblem<impl Fn(&[f64]) -> f64 + Send + Sync> {
        let bounds = Bounds::uniform(1, -10.0, 10.0).expect("valid bounds");
        FnProblem::new("square", bounds, |x: &[f64]| x[0] * x[0])
    }

    #[test]
    fn test_uniform_bounds_are_lazy() {
        let bounds = Bounds::uniform(3, -1.0, 2.0).expect("valid");
        assert!(bounds.is_uniform());
        assert!((bounds.lower_bound(2) + 1.0).abs() < 1e-12);
        assert!(!bounds.is_materialized());

        let space = bounds.space();
        assert!(bounds.is_materialized());
        assert_eq!(space.upper(), &[2.0, 2.0, 2.0]);
    }

    #[test]
    fn test_per_dimension_bounds() {
        let bounds = Bounds::per_dimension(vec![0.0, -1.0], vec![1.0, 1.0]).expect("valid");
        assert!(!bounds.is_uniform());
        assert_eq!(bounds.dimension(), 2);
        assert!((bounds.lower_bound(1) + 1.0).abs() < 1e-12);
        assert!((bounds.upper_bound(0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_uniform_rejects_bad_input() {
        assert!(Bounds::uniform(0, -1.0, 1.0).is_err());
        assert!(Bounds::uniform(2, 1.0, -1.0).is_err());
        assert!(Bounds::uniform(2, f64::NEG_INFINITY, 1.0).is_err());
    }

    #[test]
    fn test_evaluate_checks_dimension() {
        let p = square();
        assert!((p.evaluate(&[3.0]).expect("1-d input") - 9.0).abs() < 1e-12);
        assert!(matches!(
            p.evaluate(&[1.0, 2.0]),
            Err(IcaError::DimensionMismatch {
                expected: 1,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_concurrent_first_access_builds_one_cache() {
        let bounds = Arc::new(Bounds::uniform(16, -3.0, 3.0).expect("valid"));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let b = Arc::clone(&bounds);
                std::thread::spawn(move || b.space() as *const SearchSpace as usize)
            })
            .collect();
        let addrs: Vec<usize> = handles
            .into_iter()
            .map(|h| h.join().expect("thread panicked"))
            .collect();
        assert!(addrs.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(bounds.space().dimension(), 16);
    }

    #[test]
    fn test_arc_problem_delegates() {
        let p = Arc::new(square());
        assert_eq!(p.name(), "square");
        assert_eq!(p.dimension(), 1);
        assert!((p.value_at(&[2.0]) - 4.0).abs() < 1e-12);
    }
}
