//! Per-run engine: the empire set and the decade loop.

use rand::Rng;
use tracing::{debug, trace, warn};

use super::result::{IcaResult, TerminationReason};
use super::IcaVariant;
use crate::config::IcaConfig;
use crate::empire::{self, Country, Empire};
use crate::error::{IcaError, Result};
use crate::numeric;
use crate::problem::Problem;
use crate::sink::DecadeSink;

/// What happened in one decade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecadeStatus {
    /// The loop may continue.
    Continue,
    /// A single empire remains and early stopping is on.
    SingleEmpire,
}

/// State of one optimization run.
///
/// Owns the empires, the run's random generator and the best country seen.
/// Borrows the cost surface for its whole lifetime.
#[derive(Debug)]
pub struct Engine<'p, P: Problem + ?Sized, R: Rng> {
    problem: &'p P,
    config: IcaConfig,
    variant: IcaVariant,
    empires: Vec<Empire>,
    best: Country,
    decade: usize,
    uniting_distance: f64,
    rng: R,
}

impl<'p, P: Problem + ?Sized, R: Rng> Engine<'p, P, R> {
    /// Start a run from `config.num_countries` uniformly random countries.
    pub fn new(problem: &'p P, config: IcaConfig, variant: IcaVariant, mut rng: R) -> Result<Self> {
        config.validate()?;
        let countries = (0..config.num_countries)
            .map(|_| Country::random(problem, &mut rng))
            .collect();
        Ok(Self::from_countries(problem, config, variant, countries, rng))
    }

    /// Start a run from caller-supplied positions ruled by `num_empires`
    /// empires.
    ///
    /// The population size and empire count of `config` are replaced by the
    /// supplied ones. Every row is checked before anything is built.
    pub fn with_population(
        problem: &'p P,
        mut config: IcaConfig,
        variant: IcaVariant,
        population: Vec<Vec<f64>>,
        num_empires: usize,
        rng: R,
    ) -> Result<Self> {
        if population.is_empty() {
            return Err(IcaError::EmptyPopulation);
        }
        config.num_countries = population.len();
        config.num_empires = num_empires;
        config.validate()?;
        let countries = population
            .into_iter()
            .map(|row| Country::new(problem, row))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_countries(problem, config, variant, countries, rng))
    }

    fn from_countries(
        problem: &'p P,
        config: IcaConfig,
        variant: IcaVariant,
        countries: Vec<Country>,
        mut rng: R,
    ) -> Self {
        let empires = create_empires(problem, &config, countries, &mut rng);
        let best = best_imperialist(&empires).clone();
        let uniting_distance = config.uniting_threshold * problem.space().diagonal();
        debug!(
            problem = problem.name(),
            empires = empires.len(),
            countries = empire::country_count(&empires),
            best_cost = best.cost(),
            "initialized empires"
        );
        Self {
            problem,
            config,
            variant,
            empires,
            best,
            decade: 0,
            uniting_distance,
            rng,
        }
    }

    /// Active empires in list order.
    #[must_use]
    pub fn empires(&self) -> &[Empire] {
        &self.empires
    }

    /// Best country seen so far.
    #[must_use]
    pub fn best(&self) -> &Country {
        &self.best
    }

    /// Decades executed so far.
    #[must_use]
    pub fn decade(&self) -> usize {
        self.decade
    }

    /// Imperialists plus colonies across all empires.
    #[must_use]
    pub fn country_count(&self) -> usize {
        empire::country_count(&self.empires)
    }

    /// Imperialist distance under which two empires unite.
    #[must_use]
    pub fn uniting_distance(&self) -> f64 {
        self.uniting_distance
    }

    /// Run one decade.
    ///
    /// Internal moves for every empire, then at most one union, then at most
    /// one competition, then the best-so-far update. An early stop returns
    /// before the best-so-far update.
    pub fn step_decade(&mut self) -> DecadeStatus {
        self.decade += 1;
        for i in 0..self.empires.len() {
            self.advance_empire(i);
        }
        self.unite_similar_empires();
        self.imperialistic_competition();

        if self.empires.len() == 1 && self.config.stop_if_single_empire {
            debug!(decade = self.decade, "single empire left, stopping");
            return DecadeStatus::SingleEmpire;
        }

        let ruler = best_imperialist(&self.empires);
        if ruler.cost() < self.best.cost() {
            self.best = ruler.clone();
        }
        DecadeStatus::Continue
    }

    /// Run every configured decade, reporting each to `sink`.
    pub fn run<S: DecadeSink + ?Sized>(mut self, sink: &mut S) -> IcaResult {
        let mut history = Vec::with_capacity(self.config.num_decades);
        let mut termination = TerminationReason::MaxDecades;
        let mut sink_failures = 0;

        for decade in 0..self.config.num_decades {
            if self.step_decade() == DecadeStatus::SingleEmpire {
                termination = TerminationReason::SingleEmpire;
                break;
            }
            let best_cost = self.best.cost();
            history.push(best_cost);
            trace!(decade, best_cost, empires = self.empires.len(), "decade complete");
            if let Err(err) = sink.record(decade, best_cost) {
                sink_failures += 1;
                warn!(decade, error = %err, "decade sink failed");
            }
        }

        IcaResult {
            objective_value: self.best.cost(),
            solution: self.best.into_position(),
            decades: self.decade,
            history,
            termination,
            empires_remaining: self.empires.len(),
            sink_failures,
        }
    }

    fn advance_empire(&mut self, index: usize) {
        let problem = self.problem;
        let empire = &mut self.empires[index];
        empire.assimilate(problem, self.config.assimilation_coefficient, &mut self.rng);
        empire.revolve(problem, &mut self.rng);
        empire.update_total_cost();

        // power reflects the total cost just refreshed above
        if self.variant == IcaVariant::Explorer {
            let power = self.normalized_power(index);
            self.empires[index].explore(problem, power, &mut self.rng);
        }

        let empire = &mut self.empires[index];
        empire.possess();
        empire.update_total_cost();
    }

    /// Share of the empire at `index` in the set's total power, from the
    /// current total costs. Uniform when the powers sum to nothing.
    fn normalized_power(&self, index: usize) -> f64 {
        let costs: Vec<f64> = self.empires.iter().map(Empire::total_cost).collect();
        let powers = powers_from_costs(&costs);
        let sum = numeric::sum(&powers);
        if sum > 0.0 && sum.is_finite() {
            powers[index] / sum
        } else {
            1.0 / powers.len() as f64
        }
    }

    /// Merge the first pair of empires whose imperialists are within
    /// [`uniting_distance`](Self::uniting_distance). Returns whether a merge
    /// happened.
    fn unite_similar_empires(&mut self) -> bool {
        let n = self.empires.len();
        for i in 0..n.saturating_sub(1) {
            for j in (i + 1)..n {
                let distance = numeric::distance(
                    self.empires[i].imperialist().position(),
                    self.empires[j].imperialist().position(),
                );
                if distance > self.uniting_distance {
                    continue;
                }
                let (better, worse) = if self.empires[i].imperialist().cost()
                    < self.empires[j].imperialist().cost()
                {
                    (i, j)
                } else {
                    (j, i)
                };
                let loser = self.empires.remove(worse);
                let keeper = if better > worse { better - 1 } else { better };
                let absorbed = loser.num_colonies() + 1;
                let winner = &mut self.empires[keeper];
                for country in loser.into_countries() {
                    winner.absorb(country);
                }
                winner.update_total_cost();
                debug!(
                    decade = self.decade,
                    absorbed,
                    distance,
                    empires = self.empires.len(),
                    "united empires"
                );
                return true;
            }
        }
        false
    }

    /// Move one colony from the weakest empire to a power-weighted winner.
    ///
    /// The weakest empire takes part in the draw with zero power; if it
    /// wins, nothing moves and it cannot collapse this decade. Returns
    /// whether a competition took place.
    fn imperialistic_competition(&mut self) -> bool {
        if self.rng.gen::<f64>() > self.config.competition_probability {
            return false;
        }
        let n = self.empires.len();
        if n <= 1 {
            return false;
        }

        let costs: Vec<f64> = self.empires.iter().map(Empire::total_cost).collect();
        let Some(weakest) = numeric::argmax(&costs) else {
            return false;
        };
        let powers: Vec<f64> = costs.iter().map(|&c| costs[weakest] - c).collect();
        let sum = numeric::sum(&powers);
        let probabilities: Vec<f64> = if sum > 0.0 && sum.is_finite() {
            powers.iter().map(|p| p / sum).collect()
        } else {
            vec![1.0 / n as f64; n]
        };

        // one draw per empire, the weakest included
        let scores: Vec<f64> = probabilities
            .iter()
            .map(|p| p - self.rng.gen::<f64>())
            .collect();
        let Some(winner) = numeric::argmax(&scores) else {
            return false;
        };
        if winner == weakest {
            trace!(decade = self.decade, weakest, "weakest empire kept its colonies");
            return true;
        }

        let colonies = self.empires[weakest].num_colonies();
        if colonies > 0 {
            let pick = self.rng.gen_range(0..colonies);
            let colony = self.empires[weakest].remove_colony(pick);
            self.empires[winner].absorb(colony);
            self.empires[winner].update_total_cost();
        }

        if self.empires[weakest].num_colonies() <= 1 {
            let fallen = self.empires.remove(weakest);
            let winner = if winner > weakest { winner - 1 } else { winner };
            let empire = &mut self.empires[winner];
            for country in fallen.into_countries() {
                empire.absorb(country);
            }
            empire.update_total_cost();
            debug!(
                decade = self.decade,
                empires = self.empires.len(),
                "weakest empire collapsed"
            );
        } else {
            self.empires[weakest].update_total_cost();
        }
        true
    }
}

/// `1.3 * max - c` when the largest cost is positive, else `0.7 * max - c`.
fn powers_from_costs(costs: &[f64]) -> Vec<f64> {
    let max = costs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let scale = if max > 0.0 { 1.3 } else { 0.7 };
    costs.iter().map(|&c| scale * max - c).collect()
}

/// Number of colonies per empire, proportional to power.
///
/// Rounded shares clamped at zero; the last empire takes what is left.
fn allocate_colonies(powers: &[f64], num_colonies: usize) -> Vec<usize> {
    let n = powers.len();
    let sum = numeric::sum(powers);
    let mut counts: Vec<usize> = powers
        .iter()
        .map(|&p| {
            let share = if sum > 0.0 && sum.is_finite() {
                p / sum
            } else {
                1.0 / n as f64
            };
            numeric::round_count(share * num_colonies as f64)
        })
        .collect();
    if let Some((last, others)) = counts.split_last_mut() {
        let assigned: usize = others.iter().sum();
        *last = num_colonies.saturating_sub(assigned);
    }
    counts
}

/// Sort countries by cost, crown the best `num_empires` and deal the rest
/// out as colonies in random order.
fn create_empires<P, R>(
    problem: &P,
    config: &IcaConfig,
    mut countries: Vec<Country>,
    rng: &mut R,
) -> Vec<Empire>
where
    P: Problem + ?Sized,
    R: Rng + ?Sized,
{
    let mut costs: Vec<f64> = countries.iter().map(Country::cost).collect();
    numeric::sort_by_cost(&mut costs, &mut countries);

    let pool = countries.split_off(config.num_empires);
    let imperialist_costs = &costs[..config.num_empires];
    let counts = allocate_colonies(&powers_from_costs(imperialist_costs), pool.len());

    let order = numeric::randperm(pool.len(), rng);
    let mut slots: Vec<Option<Country>> = pool.into_iter().map(Some).collect();
    let mut dealt: Vec<Country> = order.iter().filter_map(|&i| slots[i].take()).collect();
    dealt.reverse();

    countries
        .into_iter()
        .zip(counts)
        .map(|(imperialist, count)| {
            let mut empire = Empire::new(imperialist, config);
            let take = count.min(dealt.len());
            let mut colonies: Vec<Country> = Vec::with_capacity(take.max(1));
            for _ in 0..take {
                if let Some(country) = dealt.pop() {
                    colonies.push(country);
                }
            }
            empire.assign_colonies(colonies);
            if empire.num_colonies() == 0 {
                empire.absorb(Country::random(problem, rng));
            }
            empire.update_total_cost();
            empire
        })
        .collect()
}

fn best_imperialist(empires: &[Empire]) -> &Country {
    let costs: Vec<f64> = empires.iter().map(|e| e.imperialist().cost()).collect();
    let index = numeric::argmin(&costs).unwrap_or(0);
    empires[index].imperialist()
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
