//! Road evolver CLI - Evolve road scenarios from a difficulty or JSON configuration.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use road_evolver::{
    compute::GenerationDriver,
    scenario::{JsonScenarioExporter, SvgVisualizer, TraceDirClient},
    schema::{Difficulty, EvolutionConfig, GeneratorConfig},
};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!(
            "Usage: {} <difficulty|config.json> [generations] [output_dir] [trace_dir]",
            args[0]
        );
        eprintln!();
        eprintln!("Evolve road scenarios and export them as JSON document pairs.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  difficulty   EASY, MEDIUM or HARD (case-insensitive)");
        eprintln!("  config.json  Path to an evolution configuration file");
        eprintln!("  generations  Number of generations to run (default: 1)");
        eprintln!("  output_dir   Directory for scenario documents (default: scenarios)");
        eprintln!("  trace_dir    Directory of <id>.trace.json execution traces");
        eprintln!();
        eprintln!("Example configuration is generated with --example flag.");
        std::process::exit(1);
    }

    if args[1] == "--example" {
        print_example_config();
        return;
    }

    let config = load_config(&args[1]);
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    let generations: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(1);
    let output_dir = PathBuf::from(args.get(3).map_or("scenarios", String::as_str));
    let trace_dir = args.get(4).map(PathBuf::from);

    let profile = &config.generator.profile;
    println!("Road Evolver");
    println!("============");
    println!(
        "Profile: degree {}, segments {}..{}, width {}, nodes {}..{}",
        profile.spline_degree,
        profile.min_segment_length,
        profile.max_segment_length,
        profile.width,
        profile.min_nodes,
        profile.max_nodes
    );
    println!(
        "Population: {} ({} elites)",
        config.population_size, config.number_elites
    );
    println!("Generations: {}", generations);
    println!("Output: {}", output_dir.display());
    println!();

    let exporter = JsonScenarioExporter::new(&output_dir).unwrap_or_else(|e| {
        eprintln!("Error creating output directory: {}", e);
        std::process::exit(1);
    });
    let visualizer = SvgVisualizer::new(output_dir.join("plots")).unwrap_or_else(|e| {
        eprintln!("Error creating plot directory: {}", e);
        std::process::exit(1);
    });

    let mut driver = GenerationDriver::new(config, Box::new(exporter))
        .unwrap_or_else(|e| {
            eprintln!("Error creating driver: {}", e);
            std::process::exit(1);
        })
        .with_visualizer(Box::new(visualizer));
    if let Some(dir) = trace_dir {
        println!("Reading traces from {}", dir.display());
        driver = driver.with_client(Box::new(TraceDirClient::new(dir)));
    }

    let start = Instant::now();
    for _ in 0..generations {
        let report = driver.step().unwrap_or_else(|e| {
            eprintln!("Generation failed: {}", e);
            std::process::exit(1);
        });
        println!(
            "  Generation {}: {} exported, {} failed, {} evaluated, best={}, mean={}",
            report.generation,
            report.exported.len(),
            report.failed.len(),
            report.evaluated,
            format_fitness(report.best_fitness),
            format_fitness(report.mean_fitness),
        );
    }

    println!();
    println!(
        "Time: {:.2}s, {} individuals carried over",
        start.elapsed().as_secs_f32(),
        driver.population().len()
    );
}

fn load_config(arg: &str) -> EvolutionConfig {
    if let Ok(difficulty) = arg.parse::<Difficulty>() {
        return EvolutionConfig {
            generator: GeneratorConfig::for_difficulty(difficulty),
            ..EvolutionConfig::default()
        };
    }

    let config_str = fs::read_to_string(Path::new(arg)).unwrap_or_else(|e| {
        eprintln!("Error reading config file: {}", e);
        std::process::exit(1);
    });
    serde_json::from_str(&config_str).unwrap_or_else(|e| {
        eprintln!("Error parsing config: {}", e);
        std::process::exit(1);
    })
}

fn format_fitness(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.4}"))
}

fn print_example_config() {
    let config = EvolutionConfig::default().with_difficulty("EASY");
    match serde_json::to_string_pretty(&config) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing example config: {}", e),
    }
}
