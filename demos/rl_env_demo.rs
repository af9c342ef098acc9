// Demonstration: run the RL sorting environment and evaluate a baseline policy.
//
// Build/run from this repo root:
//   cargo run --example rl_env_demo -- --policy heuristic --episodes 20 --memory

use std::env;

use antsort::algorithms::rl::{
    AntSortEnv, EvaluationMetrics, HeuristicPolicy, Policy, RandomPolicy, RlConfig,
};

fn main() {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    let policy_name = arg_value(&args, "--policy").unwrap_or("heuristic");
    let episodes: usize = arg_value(&args, "--episodes")
        .and_then(|s| s.parse().ok())
        .unwrap_or(10);
    let seed: u64 = arg_value(&args, "--seed")
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    let horizon: u32 = arg_value(&args, "--horizon")
        .and_then(|s| s.parse().ok())
        .unwrap_or(500);

    let config = RlConfig {
        episode_horizon: horizon,
        action_memory: args.iter().any(|a| a == "--memory"),
        seed,
        ..RlConfig::default()
    };

    let mut policy: Box<dyn Policy> = match policy_name {
        "random" => Box::new(RandomPolicy::new(seed)),
        "heuristic" => match HeuristicPolicy::new(config.observation_layout(), 0.3, 0.15, seed) {
            Ok(p) => Box::new(p),
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(2);
            }
        },
        other => {
            eprintln!("Unknown --policy '{}'; expected 'heuristic' or 'random'.", other);
            std::process::exit(2);
        }
    };

    let mut env = match AntSortEnv::new(config.clone()) {
        Ok(env) => env,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };

    println!(
        "Observation dim: {}, action dim: {}",
        config.observation_dim(),
        config.action_dim()
    );
    match EvaluationMetrics::evaluate(&mut env, policy.as_mut(), episodes) {
        Ok(metrics) => {
            println!("Policy: {}", policy.name());
            println!("{}", metrics);
            println!("\nLast episode, final grid:\n{}", env.world());
        }
        Err(e) => {
            eprintln!("Evaluation aborted: {}", e);
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
