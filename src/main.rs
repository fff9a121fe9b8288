//! Lattice games CLI - Run simulations and optimizations from JSON
//! configuration.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use lattice_games::{
    automata::{Automaton, GameOfLifeRule, LatticeStats},
    evolution::{EvolutionEngine, SnowdriftOptimizer},
    schema::{OptimizeConfig, RunConfig, SimulationConfig},
};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <config.json> [steps]", args[0]);
        eprintln!();
        eprintln!("Run a lattice simulation or a snowdrift optimization.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json  Path to run configuration file");
        eprintln!("  steps        Simulation steps (default: 100, ignored when optimizing)");
        eprintln!();
        eprintln!("Example configurations are generated with --example.");
        std::process::exit(1);
    }

    if args[1] == "--example" {
        print_example_configs();
        return;
    }

    let config_path = PathBuf::from(&args[1]);
    let steps: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(100);

    let config_str = fs::read_to_string(&config_path).unwrap_or_else(|e| {
        eprintln!("Error reading config file: {}", e);
        std::process::exit(1);
    });

    let config: RunConfig = serde_json::from_str(&config_str).unwrap_or_else(|e| {
        eprintln!("Error parsing config: {}", e);
        std::process::exit(1);
    });

    match config {
        RunConfig::Simulate(sim) => simulate(sim, steps),
        RunConfig::Optimize(opt) => optimize(opt),
    }
}

fn simulate(config: SimulationConfig, steps: u64) {
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    println!("Game of Life Simulation");
    println!("=======================");
    println!("Grid: {}x{}", config.rows, config.cols);
    println!("Steps: {}", steps);
    println!();

    let lattice = config.seed.generate(config.rows, config.cols);
    let initial_stats = LatticeStats::from_lattice(&lattice);
    println!("Initial state:");
    println!("  Live cells: {}", initial_stats.live_cells);
    println!("  Density: {:.4}", initial_stats.density);
    println!();

    let mut automaton = Automaton::new(lattice, GameOfLifeRule).unwrap_or_else(|e| {
        eprintln!("Invalid initial lattice: {}", e);
        std::process::exit(1);
    });

    println!("Running simulation...");
    let start = Instant::now();
    let report_every = (steps / 10).max(1);

    let mut last = None;
    for (i, snapshot) in automaton.iterate(steps).enumerate() {
        if i > 0 && i as u64 % report_every == 0 {
            let stats = LatticeStats::from_lattice(&snapshot);
            let elapsed = start.elapsed().as_secs_f32();
            println!(
                "  Step {}/{}: live={}, density={:.4}, {:.1} steps/s",
                i,
                steps,
                stats.live_cells,
                stats.density,
                i as f32 / elapsed
            );
        }
        last = Some(snapshot);
    }

    let elapsed = start.elapsed();
    let final_stats = LatticeStats::from_lattice(&last.expect("at least the initial snapshot"));
    println!();
    println!("Final state:");
    println!("  Live cells: {}", final_stats.live_cells);
    println!("  Density: {:.4}", final_stats.density);
    println!(
        "Time: {:.2}s ({:.1} steps/s)",
        elapsed.as_secs_f32(),
        steps as f32 / elapsed.as_secs_f32()
    );
}

fn optimize(config: OptimizeConfig) {
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    println!("Snowdrift Optimization");
    println!("======================");
    println!("Population: {}", config.optimizer.population_size);
    println!("Generations: {}", config.optimizer.max_generations);
    println!(
        "Mutation probability: {}",
        config.optimizer.mutation_probability
    );
    println!(
        "Rollout: {}x{} lattice, {} steps",
        config.evaluation.rows, config.evaluation.cols, config.evaluation.steps
    );
    println!();

    let optimizer = SnowdriftOptimizer::new(config.evaluation).unwrap_or_else(|e| {
        eprintln!("Invalid evaluation configuration: {}", e);
        std::process::exit(1);
    });
    let mut engine = EvolutionEngine::new(optimizer, config.optimizer).unwrap_or_else(|e| {
        eprintln!("Invalid optimizer configuration: {}", e);
        std::process::exit(1);
    });

    let start = Instant::now();
    let mut final_mean = None;
    for (generation, mean) in engine.run().enumerate() {
        println!(
            "  Generation {}: mean benefit={:.4}, mean cost={:.4}",
            generation + 1,
            mean.benefit,
            mean.cost
        );
        final_mean = Some(mean);
    }

    let elapsed = start.elapsed();
    println!();
    match final_mean {
        Some(mean) => println!(
            "Final mean individual: benefit={:.4}, cost={:.4}",
            mean.benefit, mean.cost
        ),
        None => println!("No generations were run."),
    }
    println!("Time: {:.2}s", elapsed.as_secs_f32());
}

fn print_example_configs() {
    let simulate = RunConfig::Simulate(SimulationConfig::default());
    let optimize = RunConfig::Optimize(OptimizeConfig::default());

    println!("Example simulation configuration (config.json):");
    println!("{}", serde_json::to_string_pretty(&simulate).unwrap());
    println!();
    println!("Example optimization configuration (config.json):");
    println!("{}", serde_json::to_string_pretty(&optimize).unwrap());
}
