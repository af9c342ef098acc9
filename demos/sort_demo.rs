// Demonstration: rule-based sorting run, optionally followed by a parameter sweep.
//
// Build/run from this repo root:
//   RUST_LOG=antsort=info cargo run --release --example sort_demo -- --steps 10000 --ants 50
//   cargo run --release --example sort_demo -- --sweep --steps 2000 --runs 3

use std::env;

use antsort::grid::AddressingMode;
use antsort::simulation::{ParameterSweep, Simulation, SimulationConfig};

fn main() {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    let mut config = SimulationConfig::default();
    if let Some(v) = arg_value(&args, "--steps").and_then(|s| s.parse().ok()) {
        config.max_steps = v;
    }
    if let Some(v) = arg_value(&args, "--ants").and_then(|s| s.parse().ok()) {
        config.n_ants = v;
    }
    if let Some(v) = arg_value(&args, "--colors").and_then(|s| s.parse().ok()) {
        config.grid.colors = v;
    }
    if let Some(v) = arg_value(&args, "--fill").and_then(|s| s.parse().ok()) {
        config.grid.fill_percentage = v;
    }
    if let Some(v) = arg_value(&args, "--seed").and_then(|s| s.parse().ok()) {
        config.seed = v;
    }
    if args.iter().any(|a| a == "--torus") {
        config.grid.addressing = AddressingMode::Toroidal;
    }
    config.track_interval = (config.max_steps / 10).max(1);

    if args.iter().any(|a| a == "--sweep") {
        let runs: usize = arg_value(&args, "--runs")
            .and_then(|s| s.parse().ok())
            .unwrap_or(3);
        run_sweep(config, runs);
    } else {
        run_single(config);
    }
}

fn run_single(config: SimulationConfig) {
    let mut sim = match Simulation::new(config) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };
    println!("Initial grid:\n{}", sim.world());

    if let Err(e) = sim.run() {
        eprintln!("Simulation aborted: {}", e);
        std::process::exit(1);
    }
    for sample in sim.history() {
        println!("step {:>6}  score {:.4}", sample.step, sample.score);
    }
    println!("\nFinal grid:\n{}", sim.world());
    println!("{}", sim.summary());
}

fn run_sweep(config: SimulationConfig, runs: usize) {
    let sweep = ParameterSweep::new(config)
        .with_k1_values(vec![0.1, 0.3, 0.5, 0.7])
        .with_k2_values(vec![0.05, 0.15, 0.25, 0.35])
        .with_ant_counts(vec![5, 10, 20])
        .with_runs_per_point(runs);

    match sweep.run() {
        Ok(points) => {
            println!("{:>5} {:>5} {:>5} {:>9} {:>9}", "k1", "k2", "ants", "initial", "final");
            for p in points {
                println!(
                    "{:>5.2} {:>5.2} {:>5} {:>9.4} {:>9.4}",
                    p.params.k1,
                    p.params.k2,
                    p.params.n_ants,
                    p.mean_initial_score,
                    p.mean_final_score
                );
            }
        }
        Err(e) => {
            eprintln!("Sweep aborted: {}", e);
            std::process::exit(1);
        }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn arg_value<'a>(args: &'a [String], key: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
}
