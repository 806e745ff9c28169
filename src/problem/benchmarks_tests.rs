use super::*;

// ---- Known values ----

#[test]
fn test_sphere_known_value() {
    assert!((sphere(&[1.0, 2.0, 3.0]) - 14.0).abs() < 1e-10);
    assert!(sphere(&[]).abs() < 1e-10);
}

#[test]
fn test_rosenbrock_optimum_and_value() {
    assert!(rosenbrock(&[1.0; 5]).abs() < 1e-10);
    // 100*(0-0)^2 + (0-1)^2 = 1
    assert!((rosenbrock(&[0.0, 0.0]) - 1.0).abs() < 1e-10);
    // single dimension has no pairs
    assert!(rosenbrock(&[5.0]).abs() < 1e-10);
}

#[test]
fn test_rastrigin_single_dim() {
    // 1 - 10*cos(2π) + 10 = 1
    assert!((rastrigin(&[1.0]) - 1.0).abs() < 1e-10);
}

#[test]
fn test_schwefel_2_21_is_max_abs() {
    assert!((schwefel_2_21(&[1.0, -7.5, 3.0]) - 7.5).abs() < 1e-12);
}

#[test]
fn test_schwefel_2_22_sum_plus_product() {
    // |1|+|-2|+|3| + 1*2*3 = 12
    assert!((schwefel_2_22(&[1.0, -2.0, 3.0]) - 12.0).abs() < 1e-12);
}

#[test]
fn test_sum_squares_weights_by_index() {
    // 1*1 + 2*1 + 3*1
    assert!((sum_squares(&[1.0, -1.0, 1.0]) - 6.0).abs() < 1e-12);
}

#[test]
fn test_sum_of_different_powers() {
    // |2|^2 + |2|^3 = 4 + 8
    assert!((sum_of_different_powers(&[2.0, -2.0]) - 12.0).abs() < 1e-12);
}

#[test]
fn test_trid_optimum_2d() {
    // x* = (2, 2), f* = -2
    assert!((trid(&[2.0, 2.0]) + 2.0).abs() < 1e-12);
    assert_eq!(Benchmark::Trid.optimum(2), Some(-2.0));
}

#[test]
fn test_styblinski_tang_near_optimum() {
    let x = vec![-2.903_534; 3];
    let expected = Benchmark::StyblinskiTang.optimum(3).expect("closed form");
    assert!((styblinski_tang(&x) - expected).abs() < 1e-4);
}

#[test]
fn test_powell_ignores_partial_group() {
    assert!(powell(&[0.0; 4]).abs() < 1e-12);
    assert!((powell(&[0.0, 0.0, 0.0, 0.0, 9.0]) - 0.0).abs() < 1e-12);
}

#[test]
fn test_double_sum_shifted_optimum() {
    assert!(double_sum(&[1.0, 2.0, 3.0]).abs() < 1e-12);
    // (0-1)^2 + [(0-1)^2 + (0-2)^2] = 1 + 5
    assert!((double_sum(&[0.0, 0.0]) - 6.0).abs() < 1e-12);
}

#[test]
fn test_michalewicz_negative_inside_domain() {
    assert!(michalewicz(&[2.20, 1.57]) < -1.8);
}

// ---- Catalog ----

#[test]
fn test_catalog_optima_hold_at_known_minimizers() {
    let cases: [(Benchmark, Vec<f64>); 11] = [
        (Benchmark::Sphere, vec![0.0; 4]),
        (Benchmark::Rosenbrock, vec![1.0; 4]),
        (Benchmark::Rastrigin, vec![0.0; 4]),
        (Benchmark::Ackley, vec![0.0; 4]),
        (Benchmark::Griewank, vec![0.0; 4]),
        (Benchmark::Schwefel221, vec![0.0; 4]),
        (Benchmark::Schwefel222, vec![0.0; 4]),
        (Benchmark::Zakharov, vec![0.0; 4]),
        (Benchmark::Powell, vec![0.0; 4]),
        (Benchmark::Whitley, vec![1.0; 4]),
        (Benchmark::Schaffer, vec![0.0; 4]),
    ];
    for (bench, x) in cases {
        let opt = bench.optimum(4).expect("closed-form optimum");
        assert!(
            (bench.value(&x) - opt).abs() < 1e-9,
            "{} at {x:?} = {}",
            bench.name(),
            bench.value(&x)
        );
    }
}

#[test]
fn test_schwefel_optimum_is_approximate() {
    let x = vec![420.9687; 3];
    assert!(schwefel(&x).abs() < 1e-3);
}

#[test]
fn test_default_bounds_are_ordered() {
    for bench in Benchmark::ALL {
        let (lo, hi) = bench.default_bounds(10);
        assert!(lo < hi, "{}: [{lo}, {hi}]", bench.name());
    }
}

#[test]
fn test_benchmark_problem_wraps_surface() {
    let p = Benchmark::Rastrigin.problem(3).expect("valid dimension");
    assert_eq!(p.name(), "Rastrigin");
    assert_eq!(p.dimension(), 3);
    assert!((p.lower_bound(0) + 5.12).abs() < 1e-12);
    assert_eq!(p.optimum(), Some(0.0));
    assert!(p.evaluate(&[0.0, 0.0, 0.0]).expect("3-d input").abs() < 1e-12);
    assert!(p.evaluate(&[0.0]).is_err());
}

#[test]
fn test_benchmark_problem_rejects_zero_dimension() {
    assert!(Benchmark::Sphere.problem(0).is_err());
}

#[test]
fn test_custom_bounds() {
    let bounds = Bounds::per_dimension(vec![-1.0, 0.0], vec![1.0, 4.0]).expect("valid");
    let p = BenchmarkProblem::with_bounds(Benchmark::Sphere, bounds);
    assert!((p.upper_bound(1) - 4.0).abs() < 1e-12);
    assert_eq!(p.benchmark(), Benchmark::Sphere);
}
