//! Benchmark Suite Example
//!
//! Runs the imperialist competitive optimizer several times on every
//! catalog surface and prints the aggregate statistics. Pass a directory
//! to also write the per-decade best cost of one Sphere run there.
//!
//! Run with: `RUST_LOG=info cargo run --example benchmark_suite [log-dir]`

use std::path::PathBuf;

use aprender_ica::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Imperialist Competitive Algorithm Benchmark Suite ===\n");

    let dim = 4;
    let runs = 9;
    let ica = ImperialistCompetitive::new(
        IcaConfig::default()
            .with_population(80, 8)
            .with_decades(500),
    )
    .with_seed(42);

    println!(
        "{:<24} {:>12} {:>12} {:>12} {:>12}",
        "surface", "optimum", "best", "mean", "std"
    );
    for bench in Benchmark::ALL {
        let problem = bench.problem(dim)?;
        let summary = RunHarness::new(ica.clone(), runs).evaluate(&problem)?;
        let optimum = problem
            .optimum()
            .map_or_else(|| "-".to_string(), |v| format!("{v:.4}"));
        println!(
            "{:<24} {:>12} {:>12.4e} {:>12.4e} {:>12.4e}",
            bench.name(),
            optimum,
            summary.best,
            summary.mean,
            summary.std_dev
        );
    }

    println!("\nExplorer variant on Rastrigin:");
    let problem = Benchmark::Rastrigin.problem(dim)?;
    let summary = RunHarness::new(ica.clone().with_variant(IcaVariant::Explorer), runs)
        .evaluate(&problem)?;
    println!(
        "   best = {:.4e}, mean = {:.4e}, failed runs = {}",
        summary.best, summary.mean, summary.failed_runs
    );

    if let Some(dir) = std::env::args().nth(1).map(PathBuf::from) {
        std::fs::create_dir_all(&dir)?;
        let path = dir.join(format!("sphere-{dim}.txt"));
        let mut sink = WriterSink::create(&path)?;
        let problem = Benchmark::Sphere.problem(dim)?;
        let result = ica.optimize_with_sink(&problem, &mut sink)?;
        println!(
            "\nWrote {} decades to {} (final cost {:.4e})",
            sink.lines_written(),
            path.display(),
            result.objective_value
        );
    }

    Ok(())
}
