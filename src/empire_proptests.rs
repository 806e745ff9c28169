use super::*;
use crate::problem::{Benchmark, BenchmarkProblem};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn random_empire(problem: &BenchmarkProblem, colonies: usize, rng: &mut StdRng) -> Empire {
    let mut empire = Empire::new(Country::random(problem, rng), &IcaConfig::default());
    let rows = problem.space().sample_many(colonies, rng);
    empire.set_colonies(problem, rows).expect("sampled rows match");
    empire.update_total_cost();
    empire
}

proptest! {
    /// One decade of internal moves keeps costs paired and the ruler best.
    #[test]
    fn prop_internal_moves_preserve_invariants(
        seed in any::<u64>(),
        colonies in 1_usize..20,
        dim in 1_usize..6,
        beta in 0.0_f64..3.0,
    ) {
        let problem = Benchmark::Rastrigin.problem(dim).expect("valid dimension");
        let mut rng = StdRng::seed_from_u64(seed);
        let mut empire = random_empire(&problem, colonies, &mut rng);

        empire.assimilate(&problem, beta, &mut rng);
        empire.revolve(&problem, &mut rng);
        empire.update_total_cost();
        empire.possess();
        empire.update_total_cost();

        prop_assert_eq!(empire.num_colonies(), colonies);
        let ruler = empire.imperialist();
        prop_assert_eq!(ruler.cost(), problem.value_at(ruler.position()));
        for colony in empire.colonies() {
            prop_assert_eq!(colony.cost(), problem.value_at(colony.position()));
            prop_assert!(problem.space().contains(colony.position()));
            prop_assert!(ruler.cost() <= colony.cost());
        }
    }

    /// Possession lands on the minimum of the ruler and all colonies.
    #[test]
    fn prop_possess_yields_minimum(seed in any::<u64>(), colonies in 0_usize..16) {
        let problem = Benchmark::Sphere.problem(3).expect("valid dimension");
        let mut rng = StdRng::seed_from_u64(seed);
        let mut empire = random_empire(&problem, colonies, &mut rng);

        let expected = empire
            .colonies()
            .iter()
            .map(Country::cost)
            .fold(empire.imperialist().cost(), f64::min);
        empire.possess();
        prop_assert_eq!(empire.imperialist().cost(), expected);
        prop_assert_eq!(empire.num_colonies(), colonies);
    }

    /// The explorer never loses a colony and grows by at most one.
    #[test]
    fn prop_explore_bounded_growth(
        seed in any::<u64>(),
        colonies in 1_usize..10,
        power in 0.0_f64..1.0,
    ) {
        let problem = Benchmark::Ackley.problem(4).expect("valid dimension");
        let mut rng = StdRng::seed_from_u64(seed);
        let mut empire = random_empire(&problem, colonies, &mut rng);
        let before = empire.imperialist().cost();

        empire.explore(&problem, power, &mut rng);

        prop_assert!(empire.imperialist().cost() <= before);
        prop_assert!(empire.num_colonies() >= colonies);
        prop_assert!(empire.num_colonies() <= colonies + 1);
        prop_assert!(problem.space().contains(empire.imperialist().position()));
    }
}
