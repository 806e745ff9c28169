//! Bounded continuous search space.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{IcaError, Result};
use crate::numeric;

/// Box-constrained region of `R^d`.
///
/// # Example
///
/// ```
/// use aprender_ica::SearchSpace;
///
/// let space = SearchSpace::continuous(3, -10.0, 10.0);
/// assert_eq!(space.dimension(), 3);
/// assert_eq!(space.spread(), vec![20.0, 20.0, 20.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSpace {
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl SearchSpace {
    /// Uniform bounds `[lower, upper]` on every dimension.
    ///
    /// # Panics
    ///
    /// Panics if `lower > upper` or either bound is not finite; use
    /// [`SearchSpace::new`] for a fallible constructor.
    #[must_use]
    pub fn continuous(dim: usize, lower: f64, upper: f64) -> Self {
        assert!(
            lower.is_finite() && upper.is_finite() && lower <= upper,
            "invalid uniform bounds [{lower}, {upper}]"
        );
        Self {
            lower: vec![lower; dim],
            upper: vec![upper; dim],
        }
    }

    /// Per-dimension bounds.
    pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> Result<Self> {
        IcaError::check_dimension(lower.len(), upper.len())?;
        if lower.is_empty() {
            return Err(IcaError::invalid_param("dimension", 0, "> 0"));
        }
        for (index, (&lo, &hi)) in lower.iter().zip(upper.iter()).enumerate() {
            if !lo.is_finite() || !hi.is_finite() || lo > hi {
                return Err(IcaError::InvalidBounds {
                    index,
                    lower: lo,
                    upper: hi,
                });
            }
        }
        Ok(Self { lower, upper })
    }

    /// Number of dimensions.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.lower.len()
    }

    /// Lower bound vector.
    #[must_use]
    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    /// Upper bound vector.
    #[must_use]
    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// `upper[i] - lower[i]` for every dimension.
    #[must_use]
    pub fn spread(&self) -> Vec<f64> {
        self.lower
            .iter()
            .zip(self.upper.iter())
            .map(|(lo, hi)| hi - lo)
            .collect()
    }

    /// Euclidean length of [`spread`](Self::spread), the diagonal of the box.
    #[must_use]
    pub fn diagonal(&self) -> f64 {
        numeric::norm(&self.spread())
    }

    /// Clamp a single coordinate to its dimension's bounds.
    #[must_use]
    pub fn clamp_at(&self, index: usize, value: f64) -> f64 {
        value.clamp(self.lower[index], self.upper[index])
    }

    /// Clamp every coordinate of `x` in place.
    pub fn clip(&self, x: &mut [f64]) {
        for (i, xi) in x.iter_mut().enumerate() {
            *xi = self.clamp_at(i, *xi);
        }
    }

    /// Whether `x` lies inside the box (inclusive).
    #[must_use]
    pub fn contains(&self, x: &[f64]) -> bool {
        x.len() == self.dimension()
            && x
                .iter()
                .enumerate()
                .all(|(i, &xi)| xi >= self.lower[i] && xi <= self.upper[i])
    }

    /// Draw a point uniformly from the box.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<f64> {
        self.lower
            .iter()
            .zip(self.upper.iter())
            .map(|(&lo, &hi)| ((hi - lo) * rng.gen::<f64>() + lo).clamp(lo, hi))
            .collect()
    }

    /// Draw `n` points uniformly from the box.
    pub fn sample_many<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<Vec<f64>> {
        (0..n).map(|_| self.sample(rng)).collect()
    }
}
