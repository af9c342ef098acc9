//! End-to-end scenarios for the rule-based loop and the RL environment.

use antsort::algorithms::rl::{
    Action, AntSortEnv, EnvError, EvaluationMetrics, HeuristicPolicy, PolicyBehavior, RlConfig,
};
use antsort::config::GridConfig;
use antsort::grid::{AddressingMode, Color, GridWorld, Position};
use antsort::simulation::{ParameterSweep, Simulation, SimulationConfig, SimulationState};
use antsort::ClusteringMetric;

fn five_by_five() -> SimulationConfig {
    SimulationConfig {
        grid: GridConfig {
            height: 5,
            width: 5,
            colors: 1,
            fill_percentage: 20.0,
            addressing: AddressingMode::Bounded,
        },
        n_ants: 1,
        max_steps: 50,
        k1: 0.3,
        k2: 0.15,
        seed: 2024,
        ..SimulationConfig::default()
    }
}

#[test]
fn small_bounded_run_conserves_items() {
    let mut sim = Simulation::new(five_by_five()).unwrap();
    assert_eq!(sim.world().occupied_count(), 5);
    let initial = sim.initial_score();
    assert!((0.0..=ClusteringMetric::MAX_SCORE).contains(&initial));

    sim.run().unwrap();
    let carried = sim.ants().iter().filter(|a| a.is_carrying()).count();
    assert_eq!(sim.world().occupied_count() + carried, 5);
    assert_eq!(sim.history().len(), 50);
    assert!(sim
        .history()
        .scores()
        .iter()
        .all(|s| (0.0..=ClusteringMetric::MAX_SCORE).contains(s)));
}

#[test]
fn small_bounded_run_across_seeds() {
    for seed in 0..20 {
        let mut sim = Simulation::new(SimulationConfig {
            seed,
            ..five_by_five()
        })
        .unwrap();
        sim.run().unwrap();
        let carried = sim.ants().iter().filter(|a| a.is_carrying()).count();
        assert_eq!(sim.world().occupied_count() + carried, 5, "seed {}", seed);
        assert_eq!(sim.state(), SimulationState::Completed);
    }
}

#[test]
fn observation_lengths_for_two_colors() {
    let mut config = RlConfig::default();
    let mut env = AntSortEnv::new(config.clone()).unwrap();
    assert_eq!(env.reset().unwrap().len(), 9 * 3 + 3 + 9);

    config.action_memory = true;
    let mut env = AntSortEnv::new(config).unwrap();
    assert_eq!(env.reset().unwrap().len(), 39 + 7);
}

#[test]
fn fully_sorted_torus_scores_two() {
    let mut world = GridWorld::new(4, 4, 1, AddressingMode::Toroidal).unwrap();
    for row in 0..4 {
        for col in 0..4 {
            world.place(Position::new(row, col), Color(0)).unwrap();
        }
    }
    assert_eq!(ClusteringMetric::pair_count(&world), 32);
    assert_eq!(ClusteringMetric::score(&world), 2.0);
}

#[test]
fn empty_world_scores_zero() {
    let world = GridWorld::new(6, 6, 3, AddressingMode::Bounded).unwrap();
    assert_eq!(ClusteringMetric::score(&world), 0.0);
}

#[test]
fn env_rejects_masked_actions_at_the_boundary() {
    let mut env = AntSortEnv::new(RlConfig::default()).unwrap();
    env.reset().unwrap();
    let mask = env.legal_actions();
    let blocked = if mask[Action::Pick.index()] {
        Action::Drop
    } else {
        Action::Pick
    };
    assert!(matches!(
        env.step_action(blocked),
        Err(EnvError::IllegalAction { action, .. }) if action == blocked
    ));
}

#[test]
fn heuristic_policy_runs_in_env_and_simulation() {
    let rl = RlConfig {
        grid: GridConfig {
            height: 10,
            width: 10,
            ..GridConfig::default()
        },
        episode_horizon: 100,
        ..RlConfig::default()
    };
    let layout = rl.observation_layout();

    let mut env = AntSortEnv::new(rl).unwrap();
    let mut policy = HeuristicPolicy::new(layout, 0.3, 0.15, 3).unwrap();
    let metrics = EvaluationMetrics::evaluate(&mut env, &mut policy, 2).unwrap();
    assert_eq!(metrics.n_episodes, 2);

    let sim_config = SimulationConfig {
        n_ants: 5,
        max_steps: 100,
        ..SimulationConfig::default()
    };
    let behavior = PolicyBehavior::new(HeuristicPolicy::new(layout, 0.3, 0.15, 3).unwrap(), false);
    let mut sim = Simulation::with_behavior(sim_config, behavior).unwrap();
    sim.run().unwrap();
    assert_eq!(sim.summary().steps, 100);
}

#[test]
fn sweep_over_colors_and_fill() {
    let base = SimulationConfig {
        grid: GridConfig {
            height: 10,
            width: 10,
            ..GridConfig::default()
        },
        n_ants: 5,
        max_steps: 30,
        track_interval: 10,
        ..SimulationConfig::default()
    };
    let sweep = ParameterSweep::new(base)
        .with_color_counts(vec![2, 3, 4])
        .with_fill_percentages(vec![20.0, 30.0, 40.0, 50.0])
        .with_runs_per_point(2);
    let points = sweep.run().unwrap();
    assert_eq!(points.len(), 12);
    assert_eq!(points[0].params.colors, 2);
    assert_eq!(points[0].params.fill_percentage, 20.0);
    assert_eq!(points[11].params.colors, 4);
    assert_eq!(points[11].params.fill_percentage, 50.0);
    for point in &points {
        assert_eq!(point.mean_history.steps(), vec![10, 20, 30]);
    }
}

#[cfg(feature = "serde")]
#[test]
fn configs_and_history_round_trip_through_json() {
    let config = five_by_five();
    let json = serde_json::to_string(&config).unwrap();
    let back: SimulationConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
    assert!(json.contains("\"addressing\":\"bounded\""));

    let mut sim = Simulation::new(config).unwrap();
    let history = sim.run().unwrap().clone();
    let json = serde_json::to_string(&history).unwrap();
    let back: antsort::simulation::History = serde_json::from_str(&json).unwrap();
    assert_eq!(back, history);

    let rl = RlConfig::default();
    let back: RlConfig = serde_json::from_str(&serde_json::to_string(&rl).unwrap()).unwrap();
    assert_eq!(back, rl);
}
