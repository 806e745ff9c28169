//! Empires: one imperialist ruling a variable set of colonies.
//!
//! A [`Country`] pairs a position with its cost and is only ever replaced as
//! a whole, so the two can never drift apart. All mutation goes through
//! [`Empire`] methods that re-evaluate the cost surface when a position
//! changes.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::IcaConfig;
use crate::error::Result;
use crate::numeric;
use crate::problem::Problem;

/// A point of the search space together with its cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    position: Vec<f64>,
    cost: f64,
}

impl Country {
    /// Evaluate `position` on `problem`, rejecting a wrong length.
    pub fn new<P: Problem + ?Sized>(problem: &P, position: Vec<f64>) -> Result<Self> {
        let cost = problem.evaluate(&position)?;
        Ok(Self { position, cost })
    }

    /// Unchecked: callers guarantee `position.len() == problem.dimension()`.
    pub(crate) fn evaluated<P: Problem + ?Sized>(problem: &P, position: Vec<f64>) -> Self {
        let cost = problem.value_at(&position);
        Self { position, cost }
    }

    /// Uniformly random country inside the problem bounds.
    pub(crate) fn random<P: Problem + ?Sized, R: Rng + ?Sized>(problem: &P, rng: &mut R) -> Self {
        let position = problem.space().sample(rng);
        Self::evaluated(problem, position)
    }

    /// Coordinates.
    #[must_use]
    pub fn position(&self) -> &[f64] {
        &self.position
    }

    /// Cost at [`position`](Self::position).
    #[must_use]
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Consume the country, keeping the coordinates.
    #[must_use]
    pub fn into_position(self) -> Vec<f64> {
        self.position
    }
}

/// A sub-population led by its best known country.
///
/// # Invariants
///
/// - Every colony's cost equals the cost surface at its position.
/// - Right after [`possess`](Self::possess) the imperialist is no worse than
///   any colony. Assimilation and revolution may break this until the next
///   possession.
/// - [`total_cost`](Self::total_cost) is only refreshed by
///   [`update_total_cost`](Self::update_total_cost).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Empire {
    imperialist: Country,
    colonies: Vec<Country>,
    total_cost: f64,
    zeta: f64,
    revolution_rate: f64,
    damp_ratio: f64,
    initial_colony_count: Option<usize>,
}

impl Empire {
    /// Empire ruled by `imperialist` with no colonies yet.
    ///
    /// Zeta, the initial revolution rate and the damp ratio come from
    /// `config`.
    #[must_use]
    pub fn new(imperialist: Country, config: &IcaConfig) -> Self {
        let total_cost = imperialist.cost;
        Self {
            imperialist,
            colonies: Vec::new(),
            total_cost,
            zeta: config.zeta,
            revolution_rate: config.revolution_rate,
            damp_ratio: config.damp_ratio,
            initial_colony_count: None,
        }
    }

    /// Replace the imperialist with a freshly evaluated `position`.
    ///
    /// The total cost is stale until [`update_total_cost`](Self::update_total_cost).
    pub fn set_imperialist<P: Problem + ?Sized>(
        &mut self,
        problem: &P,
        position: Vec<f64>,
    ) -> Result<()> {
        self.imperialist = Country::new(problem, position)?;
        Ok(())
    }

    /// Replace every colony, re-evaluating each row.
    ///
    /// Nothing changes if any row has the wrong length. The first call fixes
    /// [`initial_colony_count`](Self::initial_colony_count).
    pub fn set_colonies<P: Problem + ?Sized>(
        &mut self,
        problem: &P,
        positions: Vec<Vec<f64>>,
    ) -> Result<()> {
        let colonies = positions
            .into_iter()
            .map(|p| Country::new(problem, p))
            .collect::<Result<Vec<_>>>()?;
        self.assign_colonies(colonies);
        Ok(())
    }

    pub(crate) fn assign_colonies(&mut self, colonies: Vec<Country>) {
        if self.initial_colony_count.is_none() {
            self.initial_colony_count = Some(colonies.len());
        }
        self.colonies = colonies;
    }

    /// Pull every colony toward the imperialist.
    ///
    /// Each colony draws one `r ~ U(0, 1)` shared by all of its coordinates
    /// and moves by `2 * coefficient * r * (imperialist - colony)`, clamped
    /// to the bounds.
    pub fn assimilate<P, R>(&mut self, problem: &P, coefficient: f64, rng: &mut R)
    where
        P: Problem + ?Sized,
        R: Rng + ?Sized,
    {
        let space = problem.space();
        let ruler = &self.imperialist.position;
        for colony in &mut self.colonies {
            let step = 2.0 * coefficient * rng.gen::<f64>();
            let mut moved: Vec<f64> = colony
                .position
                .iter()
                .zip(ruler.iter())
                .map(|(&x, &target)| x + step * (target - x))
                .collect();
            space.clip(&mut moved);
            *colony = Country::evaluated(problem, moved);
        }
    }

    /// Decay the revolution rate, then re-randomize
    /// `round(rate * n_colonies)` randomly chosen colonies.
    pub fn revolve<P, R>(&mut self, problem: &P, rng: &mut R)
    where
        P: Problem + ?Sized,
        R: Rng + ?Sized,
    {
        self.revolution_rate *= self.damp_ratio;
        let n = self.colonies.len();
        let k = numeric::round_count(self.revolution_rate * n as f64).min(n);
        if k == 0 {
            return;
        }
        let order = numeric::randperm(n, rng);
        for &index in &order[..k] {
            self.colonies[index] = Country::random(problem, rng);
        }
    }

    /// Swap roles with the cheapest colony if it strictly beats the
    /// imperialist. Returns whether a swap happened.
    pub fn possess(&mut self) -> bool {
        let costs: Vec<f64> = self.colonies.iter().map(Country::cost).collect();
        match numeric::argmin(&costs) {
            Some(best) if costs[best] < self.imperialist.cost => {
                std::mem::swap(&mut self.imperialist, &mut self.colonies[best]);
                true
            }
            _ => false,
        }
    }

    /// `imperialist cost + zeta * mean(colony costs)`; the mean of no
    /// colonies is 0.
    pub fn update_total_cost(&mut self) {
        let costs: Vec<f64> = self.colonies.iter().map(Country::cost).collect();
        self.total_cost = self.imperialist.cost + self.zeta * numeric::mean(&costs);
    }

    /// Remove and return the colony at `index`, shifting later colonies down.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.num_colonies()`.
    pub fn remove_colony(&mut self, index: usize) -> Country {
        self.colonies.remove(index)
    }

    /// Append `country` as a colony.
    pub fn absorb(&mut self, country: Country) {
        self.colonies.push(country);
    }

    /// Explorer step: probe single-coordinate moves of the imperialist.
    ///
    /// Makes `max(1, round(power * d))` attempts. Each one copies the
    /// imperialist, picks a random dimension `p` and a random colony `c`,
    /// and sets `site[p] += (U(0,1) - 0.5) * 2 * (site[p] - c[p])`. If the
    /// cheapest site beats the imperialist, the old imperialist overwrites a
    /// random colony slot and the site takes over. With probability
    /// `power * (initial_colony_count / n_colonies)^2` the overwritten colony
    /// is kept as an extra colony, so colony counts can grow without bound.
    ///
    /// Returns whether the imperialist moved. Does nothing for an empire
    /// without colonies.
    pub fn explore<P, R>(&mut self, problem: &P, power: f64, rng: &mut R) -> bool
    where
        P: Problem + ?Sized,
        R: Rng + ?Sized,
    {
        let n = self.colonies.len();
        if n == 0 {
            return false;
        }
        let dim = self.imperialist.position.len();
        let attempts = numeric::round_count(power * dim as f64).max(1);

        let mut best = self.find_new_site(problem, rng);
        for _ in 1..attempts {
            let candidate = self.find_new_site(problem, rng);
            if candidate.cost < best.cost {
                best = candidate;
            }
        }
        if best.cost >= self.imperialist.cost {
            return false;
        }

        let slot = rng.gen_range(0..n);
        let former = std::mem::replace(&mut self.imperialist, best);
        let overwritten = std::mem::replace(&mut self.colonies[slot], former);

        let initial = self.initial_colony_count.unwrap_or(n) as f64;
        let retain = power * (initial / n as f64).powi(2);
        if rng.gen::<f64>() < retain {
            self.colonies.push(overwritten);
        }
        self.update_total_cost();
        true
    }

    fn find_new_site<P, R>(&self, problem: &P, rng: &mut R) -> Country
    where
        P: Problem + ?Sized,
        R: Rng + ?Sized,
    {
        let dim = self.imperialist.position.len();
        let p = rng.gen_range(0..dim);
        let neighbour = &self.colonies[rng.gen_range(0..self.colonies.len())];
        let mut site = self.imperialist.position.clone();
        let offset = (rng.gen::<f64>() - 0.5) * 2.0 * (site[p] - neighbour.position[p]);
        site[p] = problem.space().clamp_at(p, site[p] + offset);
        Country::evaluated(problem, site)
    }

    /// The ruling country.
    #[must_use]
    pub fn imperialist(&self) -> &Country {
        &self.imperialist
    }

    /// Colonies in index order.
    #[must_use]
    pub fn colonies(&self) -> &[Country] {
        &self.colonies
    }

    /// Last computed total cost.
    #[must_use]
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Current (decayed) revolution rate.
    #[must_use]
    pub fn revolution_rate(&self) -> f64 {
        self.revolution_rate
    }

    /// Number of colonies.
    #[must_use]
    pub fn num_colonies(&self) -> usize {
        self.colonies.len()
    }

    /// Colony count of the first assignment, `None` before any.
    #[must_use]
    pub fn initial_colony_count(&self) -> Option<usize> {
        self.initial_colony_count
    }

    /// Consume the empire, yielding the imperialist then every colony.
    pub fn into_countries(self) -> impl Iterator<Item = Country> {
        std::iter::once(self.imperialist).chain(self.colonies)
    }
}

/// Total number of countries (imperialists and colonies) held by `empires`.
#[must_use]
pub fn country_count(empires: &[Empire]) -> usize {
    empires.iter().map(|e| 1 + e.num_colonies()).sum()
}

#[cfg(test)]
#[path = "empire_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "empire_proptests.rs"]
mod proptests;
