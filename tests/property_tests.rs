//! Property-based tests using proptest.
//!
//! These tests check run-level invariants of the optimizer across random
//! parameter choices and seeds.

use aprender_ica::numeric;
use aprender_ica::prelude::*;
use proptest::prelude::*;

fn benchmark_strategy() -> impl Strategy<Value = Benchmark> {
    prop::sample::select(Benchmark::ALL.to_vec())
}

fn config_strategy() -> impl Strategy<Value = IcaConfig> {
    (
        1usize..5,
        0usize..20,
        1usize..25,
        0.0f64..3.0,
        0.0f64..0.5,
        0.0f64..1.0,
        0.0f64..1.0,
        0.0f64..0.2,
        any::<bool>(),
    )
        .prop_map(
            |(empires, extra, decades, beta, zeta, rate, damp, unite, stop)| {
                IcaConfig::default()
                    .with_population(empires + extra, empires)
                    .with_decades(decades)
                    .with_assimilation_coefficient(beta)
                    .with_zeta(zeta)
                    .with_revolution(rate, damp)
                    .with_uniting_threshold(unite)
                    .with_stop_if_single_empire(stop)
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn run_result_is_consistent(
        bench in benchmark_strategy(),
        dim in 2usize..6,
        config in config_strategy(),
        explorer in any::<bool>(),
        seed in any::<u64>(),
    ) {
        let problem = bench.problem(dim).expect("valid dimension");
        let variant = if explorer { IcaVariant::Explorer } else { IcaVariant::Original };
        let max_decades = config.num_decades;
        let result = ImperialistCompetitive::new(config)
            .with_variant(variant)
            .with_seed(seed)
            .optimize(&problem)
            .expect("valid config");

        prop_assert!(problem.space().contains(&result.solution));
        prop_assert_eq!(result.objective_value, problem.value_at(&result.solution));
        prop_assert!(result.history.windows(2).all(|w| w[1] <= w[0]));
        prop_assert!(result.decades >= 1 && result.decades <= max_decades);
        prop_assert!(result.empires_remaining >= 1);
        if let Some(&last) = result.history.last() {
            prop_assert_eq!(last, result.objective_value);
        }
        match result.termination {
            TerminationReason::MaxDecades => {
                prop_assert_eq!(result.history.len(), max_decades);
            }
            TerminationReason::SingleEmpire => {
                prop_assert_eq!(result.empires_remaining, 1);
                prop_assert_eq!(result.history.len(), result.decades - 1);
            }
        }
    }

    #[test]
    fn same_seed_same_result(
        bench in benchmark_strategy(),
        config in config_strategy(),
        seed in any::<u64>(),
    ) {
        let problem = bench.problem(3).expect("valid dimension");
        let ica = ImperialistCompetitive::new(config).with_seed(seed);
        let a = ica.optimize(&problem).expect("valid config");
        let b = ica.optimize(&problem).expect("valid config");
        prop_assert_eq!(a, b);
    }

    #[test]
    fn argmin_picks_a_minimum(values in proptest::collection::vec(-1e6f64..1e6, 1..40)) {
        let i = numeric::argmin(&values).expect("non-empty");
        prop_assert!(values.iter().all(|&v| values[i] <= v));
        prop_assert!(values[..i].iter().all(|&v| v > values[i]));
    }

    #[test]
    fn sampled_points_lie_in_bounds(
        lower in proptest::collection::vec(-50.0f64..0.0, 1..8),
        width in 0.0f64..100.0,
        seed in any::<u64>(),
    ) {
        use rand::SeedableRng;
        let upper: Vec<f64> = lower.iter().map(|l| l + width).collect();
        let space = aprender_ica::SearchSpace::new(lower, upper).expect("ordered bounds");
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        for point in space.sample_many(10, &mut rng) {
            prop_assert!(space.contains(&point));
        }
    }
}
