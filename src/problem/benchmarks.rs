//! Benchmark cost surfaces for optimizer evaluation.
//!
//! Each surface is available as a pure function over `&[f64]` and, bundled
//! with its customary search domain, as a [`BenchmarkProblem`].
//!
//! References:
//! - Jamil & Yang (2013) "A Literature Survey of Benchmark Functions for
//!   Global Optimization Problems"
//! - Surjanovic & Bingham, Virtual Library of Simulation Experiments

use std::f64::consts::{E, PI};

use serde::{Deserialize, Serialize};

use super::{Bounds, Problem};
use crate::error::Result;

/// Sphere - unimodal, separable. Minimum 0 at the origin.
///
/// # Example
/// ```
/// use aprender_ica::problem::benchmarks::sphere;
/// assert!((sphere(&[1.0, 2.0, 3.0]) - 14.0).abs() < 1e-10);
/// ```
#[must_use]
pub fn sphere(x: &[f64]) -> f64 {
    x.iter().map(|xi| xi * xi).sum()
}

/// Rosenbrock - unimodal, non-separable. Minimum 0 at `(1, ..., 1)`.
#[must_use]
pub fn rosenbrock(x: &[f64]) -> f64 {
    x.windows(2)
        .map(|w| {
            let a = w[1] - w[0] * w[0];
            let b = w[0] - 1.0;
            100.0 * a * a + b * b
        })
        .sum()
}

/// Rastrigin - multimodal, separable. Minimum 0 at the origin.
#[must_use]
pub fn rastrigin(x: &[f64]) -> f64 {
    x.iter()
        .map(|xi| xi * xi - 10.0 * (2.0 * PI * xi).cos() + 10.0)
        .sum()
}

/// Ackley - multimodal, non-separable. Minimum 0 at the origin.
#[must_use]
pub fn ackley(x: &[f64]) -> f64 {
    if x.is_empty() {
        return 0.0;
    }
    let n = x.len() as f64;
    let sum_sq: f64 = x.iter().map(|xi| xi * xi).sum();
    let sum_cos: f64 = x.iter().map(|xi| (2.0 * PI * xi).cos()).sum();
    20.0 + E - 20.0 * (-0.2 * (sum_sq / n).sqrt()).exp() - (sum_cos / n).exp()
}

/// Griewank - multimodal, non-separable. Minimum 0 at the origin.
#[must_use]
pub fn griewank(x: &[f64]) -> f64 {
    let sum: f64 = x.iter().map(|xi| xi * xi).sum::<f64>() / 4000.0;
    let prod: f64 = x
        .iter()
        .enumerate()
        .map(|(i, xi)| (xi / ((i + 1) as f64).sqrt()).cos())
        .product();
    sum - prod + 1.0
}

/// Schwefel 2.26 - multimodal, deceptive. Minimum ≈ 0 at `420.9687` per dimension.
#[must_use]
pub fn schwefel(x: &[f64]) -> f64 {
    let n = x.len() as f64;
    418.9829 * n - x.iter().map(|xi| xi * xi.abs().sqrt().sin()).sum::<f64>()
}

/// Schwefel 2.21 - `max |x_i|`. Minimum 0 at the origin.
#[must_use]
pub fn schwefel_2_21(x: &[f64]) -> f64 {
    x.iter().fold(0.0, |acc: f64, xi| acc.max(xi.abs()))
}

/// Schwefel 2.22 - `Σ|x_i| + Π|x_i|`. Minimum 0 at the origin.
#[must_use]
pub fn schwefel_2_22(x: &[f64]) -> f64 {
    let sum: f64 = x.iter().map(|xi| xi.abs()).sum();
    let prod: f64 = x.iter().map(|xi| xi.abs()).product();
    sum + prod
}

/// Sum of squares `Σ i·x_i²` (1-based `i`). Minimum 0 at the origin.
#[must_use]
pub fn sum_squares(x: &[f64]) -> f64 {
    x.iter()
        .enumerate()
        .map(|(i, xi)| (i + 1) as f64 * xi * xi)
        .sum()
}

/// Sum of different powers `Σ |x_i|^(i+1)` (1-based `i`). Minimum 0 at the origin.
#[must_use]
pub fn sum_of_different_powers(x: &[f64]) -> f64 {
    x.iter()
        .enumerate()
        .map(|(i, xi)| xi.abs().powi(i as i32 + 2))
        .sum()
}

/// Zakharov - unimodal. Minimum 0 at the origin.
#[must_use]
pub fn zakharov(x: &[f64]) -> f64 {
    let sum1: f64 = x.iter().map(|xi| xi * xi).sum();
    let sum2: f64 = x
        .iter()
        .enumerate()
        .map(|(i, xi)| 0.5 * (i + 1) as f64 * xi)
        .sum();
    sum1 + sum2.powi(2) + sum2.powi(4)
}

/// Dixon-Price - unimodal. Minimum 0.
#[must_use]
pub fn dixon_price(x: &[f64]) -> f64 {
    let Some(first) = x.first() else {
        return 0.0;
    };
    let head = (first - 1.0).powi(2);
    let tail: f64 = x
        .windows(2)
        .enumerate()
        .map(|(i, w)| (i + 2) as f64 * (2.0 * w[1] * w[1] - w[0]).powi(2))
        .sum();
    head + tail
}

/// Trid - unimodal. Minimum `-d(d+4)(d-1)/6`.
#[must_use]
pub fn trid(x: &[f64]) -> f64 {
    let sum1: f64 = x.iter().map(|xi| (xi - 1.0).powi(2)).sum();
    let sum2: f64 = x.windows(2).map(|w| w[0] * w[1]).sum();
    sum1 - sum2
}

/// Styblinski-Tang - multimodal. Minimum ≈ `-39.16599·d`.
#[must_use]
pub fn styblinski_tang(x: &[f64]) -> f64 {
    0.5 * x
        .iter()
        .map(|xi| xi.powi(4) - 16.0 * xi * xi + 5.0 * xi)
        .sum::<f64>()
}

/// Michalewicz with steepness `m = 10`. Dimension-dependent minimum.
#[must_use]
pub fn michalewicz(x: &[f64]) -> f64 {
    -x.iter()
        .enumerate()
        .map(|(i, xi)| xi.sin() * ((i + 1) as f64 * xi * xi / PI).sin().powi(20))
        .sum::<f64>()
}

/// Powell singular function over consecutive groups of four. Minimum 0.
///
/// Trailing coordinates that do not fill a group are ignored.
#[must_use]
pub fn powell(x: &[f64]) -> f64 {
    x.chunks_exact(4)
        .map(|c| {
            (c[0] + 10.0 * c[1]).powi(2)
                + 5.0 * (c[2] - c[3]).powi(2)
                + (c[1] - 2.0 * c[2]).powi(4)
                + 10.0 * (c[0] - c[3]).powi(4)
        })
        .sum()
}

/// Whitley - multimodal, non-separable. Minimum 0 at `(1, ..., 1)`.
#[must_use]
pub fn whitley(x: &[f64]) -> f64 {
    let mut total = 0.0;
    for xi in x {
        for xj in x {
            let t = 100.0 * (xi * xi - xj).powi(2) + (1.0 - xj).powi(2);
            total += t * t / 4000.0 - t.cos() + 1.0;
        }
    }
    total
}

/// Shifted double sum `Σ_i Σ_{j<=i} (x_j - (j+1))²`. Minimum 0 at `(1, 2, ..., d)`.
#[must_use]
pub fn double_sum(x: &[f64]) -> f64 {
    let mut inner = 0.0;
    let mut total = 0.0;
    for (j, xj) in x.iter().enumerate() {
        inner += (xj - (j + 1) as f64).powi(2);
        total += inner;
    }
    total
}

/// Generalized Schaffer F6. Minimum 0 at the origin.
#[must_use]
pub fn schaffer(x: &[f64]) -> f64 {
    let sum_sq: f64 = x.iter().map(|xi| xi * xi).sum();
    0.5 + (sum_sq.sqrt().sin().powi(2) - 0.5) / (1.0 + 0.001 * sum_sq).powi(2)
}

/// Catalog of the built-in surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Benchmark {
    /// [`sphere`]
    Sphere,
    /// [`rosenbrock`]
    Rosenbrock,
    /// [`rastrigin`]
    Rastrigin,
    /// [`ackley`]
    Ackley,
    /// [`griewank`]
    Griewank,
    /// [`schwefel`]
    Schwefel,
    /// [`schwefel_2_21`]
    Schwefel221,
    /// [`schwefel_2_22`]
    Schwefel222,
    /// [`sum_squares`]
    SumSquares,
    /// [`sum_of_different_powers`]
    SumOfDifferentPowers,
    /// [`zakharov`]
    Zakharov,
    /// [`dixon_price`]
    DixonPrice,
    /// [`trid`]
    Trid,
    /// [`styblinski_tang`]
    StyblinskiTang,
    /// [`michalewicz`]
    Michalewicz,
    /// [`powell`]
    Powell,
    /// [`whitley`]
    Whitley,
    /// [`double_sum`]
    DoubleSum,
    /// [`schaffer`]
    Schaffer,
}

impl Benchmark {
    /// Every catalog entry.
    pub const ALL: [Benchmark; 19] = [
        Benchmark::Sphere,
        Benchmark::Rosenbrock,
        Benchmark::Rastrigin,
        Benchmark::Ackley,
        Benchmark::Griewank,
        Benchmark::Schwefel,
        Benchmark::Schwefel221,
        Benchmark::Schwefel222,
        Benchmark::SumSquares,
        Benchmark::SumOfDifferentPowers,
        Benchmark::Zakharov,
        Benchmark::DixonPrice,
        Benchmark::Trid,
        Benchmark::StyblinskiTang,
        Benchmark::Michalewicz,
        Benchmark::Powell,
        Benchmark::Whitley,
        Benchmark::DoubleSum,
        Benchmark::Schaffer,
    ];

    /// Display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Sphere => "Sphere",
            Self::Rosenbrock => "Rosenbrock",
            Self::Rastrigin => "Rastrigin",
            Self::Ackley => "Ackley",
            Self::Griewank => "Griewank",
            Self::Schwefel => "Schwefel",
            Self::Schwefel221 => "Schwefel 2.21",
            Self::Schwefel222 => "Schwefel 2.22",
            Self::SumSquares => "Sum Squares",
            Self::SumOfDifferentPowers => "Sum of Different Powers",
            Self::Zakharov => "Zakharov",
            Self::DixonPrice => "Dixon-Price",
            Self::Trid => "Trid",
            Self::StyblinskiTang => "Styblinski-Tang",
            Self::Michalewicz => "Michalewicz",
            Self::Powell => "Powell",
            Self::Whitley => "Whitley",
            Self::DoubleSum => "Double Sum",
            Self::Schaffer => "Schaffer",
        }
    }

    /// Evaluate the surface at `x`.
    #[must_use]
    pub fn value(self, x: &[f64]) -> f64 {
        match self {
            Self::Sphere => sphere(x),
            Self::Rosenbrock => rosenbrock(x),
            Self::Rastrigin => rastrigin(x),
            Self::Ackley => ackley(x),
            Self::Griewank => griewank(x),
            Self::Schwefel => schwefel(x),
            Self::Schwefel221 => schwefel_2_21(x),
            Self::Schwefel222 => schwefel_2_22(x),
            Self::SumSquares => sum_squares(x),
            Self::SumOfDifferentPowers => sum_of_different_powers(x),
            Self::Zakharov => zakharov(x),
            Self::DixonPrice => dixon_price(x),
            Self::Trid => trid(x),
            Self::StyblinskiTang => styblinski_tang(x),
            Self::Michalewicz => michalewicz(x),
            Self::Powell => powell(x),
            Self::Whitley => whitley(x),
            Self::DoubleSum => double_sum(x),
            Self::Schaffer => schaffer(x),
        }
    }

    /// Customary search interval for dimension `dim`.
    #[must_use]
    pub fn default_bounds(self, dim: usize) -> (f64, f64) {
        match self {
            Self::Sphere | Self::Schwefel221 | Self::Schaffer => (-100.0, 100.0),
            Self::Rosenbrock => (-30.0, 30.0),
            Self::Rastrigin => (-5.12, 5.12),
            Self::Ackley => (-32.0, 32.0),
            Self::Griewank => (-600.0, 600.0),
            Self::Schwefel => (-500.0, 500.0),
            Self::Schwefel222 | Self::SumSquares | Self::DixonPrice => (-10.0, 10.0),
            Self::SumOfDifferentPowers => (-1.0, 1.0),
            Self::Zakharov => (-5.0, 10.0),
            Self::Trid => {
                let d2 = (dim * dim) as f64;
                (-d2, d2)
            }
            Self::StyblinskiTang => (-5.0, 5.0),
            Self::Michalewicz => (0.0, PI),
            Self::Powell => (-4.0, 5.0),
            Self::Whitley => (-10.24, 10.24),
            Self::DoubleSum => (-65.536, 65.536),
        }
    }

    /// Known global minimum for dimension `dim`, when it has a closed form.
    #[must_use]
    pub fn optimum(self, dim: usize) -> Option<f64> {
        let d = dim as f64;
        match self {
            Self::Michalewicz => None,
            Self::Trid => Some(-d * (d + 4.0) * (d - 1.0) / 6.0),
            Self::StyblinskiTang => Some(-39.166_165_703_771_42 * d),
            _ => Some(0.0),
        }
    }

    /// Bundle the surface with its default bounds.
    pub fn problem(self, dim: usize) -> Result<BenchmarkProblem> {
        BenchmarkProblem::new(self, dim)
    }
}

/// A catalog surface bound to a concrete dimension and domain.
#[derive(Debug, Clone)]
pub struct BenchmarkProblem {
    benchmark: Benchmark,
    bounds: Bounds,
}

impl BenchmarkProblem {
    /// Use the benchmark's customary domain.
    pub fn new(benchmark: Benchmark, dim: usize) -> Result<Self> {
        let (lower, upper) = benchmark.default_bounds(dim);
        Ok(Self::with_bounds(
            benchmark,
            Bounds::uniform(dim, lower, upper)?,
        ))
    }

    /// Use caller-supplied bounds.
    #[must_use]
    pub fn with_bounds(benchmark: Benchmark, bounds: Bounds) -> Self {
        Self { benchmark, bounds }
    }

    /// Which catalog entry this is.
    #[must_use]
    pub fn benchmark(&self) -> Benchmark {
        self.benchmark
    }

    /// Known minimum for this dimension, if any.
    #[must_use]
    pub fn optimum(&self) -> Option<f64> {
        self.benchmark.optimum(self.bounds.dimension())
    }
}

impl Problem for BenchmarkProblem {
    fn name(&self) -> &str {
        self.benchmark.name()
    }

    fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    fn value_at(&self, x: &[f64]) -> f64 {
        self.benchmark.value(x)
    }
}

#[cfg(test)]
#[path = "benchmarks_tests.rs"]
mod tests;
