//! STEMulator headless runner
//!
//! Runs the population simulation from the command line, optionally configured
//! from a lab, and prints a per-generation table or the final state as JSON.

use std::path::PathBuf;

use clap::Parser;
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

use stemulator::core::config::SimulationConfig;
use stemulator::core::error::{Result, StemError};
use stemulator::lab::LabCatalog;
use stemulator::llm::{CoachClient, CoachContext};
use stemulator::simulation::{GenerationReport, Simulation, SettingsPatch};

/// Generational predator-prey simulation for guided science labs
#[derive(Parser, Debug)]
#[command(name = "stemulator")]
#[command(about = "Run the STEMulator population simulation headlessly")]
struct Args {
    /// Number of generations to run
    #[arg(long, short = 'n', default_value_t = 10)]
    generations: u32,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// forest, desert or arctic
    #[arg(long)]
    environment: Option<String>,

    /// low, medium or high
    #[arg(long)]
    predation: Option<String>,

    /// low, medium or high
    #[arg(long)]
    food: Option<String>,

    /// 0-10
    #[arg(long)]
    mutation_rate: Option<i64>,

    /// TOML file overriding simulation constants
    #[arg(long)]
    config: Option<PathBuf>,

    /// Lab id to configure the run from
    #[arg(long)]
    lab: Option<String>,

    /// JSON file with one lab or an array of labs (replaces the built-in catalog)
    #[arg(long, requires = "lab")]
    lab_file: Option<PathBuf>,

    /// Only read this lab part's setup
    #[arg(long, requires = "lab")]
    part: Option<u32>,

    /// Output format: text or json
    #[arg(long, default_value = "text")]
    format: String,

    /// Ask the coach a question about the final state
    #[arg(long)]
    ask: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("stemulator=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let json = match args.format.as_str() {
        "json" => true,
        "text" => false,
        other => return Err(StemError::invalid("format", other)),
    };

    let config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    let catalog = match &args.lab_file {
        Some(path) => LabCatalog::load(path)?,
        None => LabCatalog::builtin(),
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!("Seed {}", seed);
    let mut sim = Simulation::with_config(config, Some(seed))?;

    let lab = match &args.lab {
        Some(id) => {
            let lab = catalog.get(id)?;
            sim.apply_lab(lab, args.part);
            Some(lab)
        }
        None => None,
    };

    let patch = SettingsPatch::parse(
        args.environment.as_deref(),
        args.predation.as_deref(),
        args.food.as_deref(),
        args.mutation_rate,
    )?;
    if !patch.is_empty() {
        sim.update_settings(patch)?;
    }

    if !json {
        let s = sim.settings();
        println!(
            "{} | predation {} | food {} | mutation {}/10 | seed {}",
            s.environment, s.predation, s.food_availability, s.mutation_rate, seed
        );
        println!("{:>4} {:>6} {:>6} {:>6} {:>9}", "gen", "alive", "prey", "pred", "survival");
    }

    for _ in 0..args.generations {
        let report = sim.run_generation();
        if !json {
            print_row(&report, sim.state().survival_rate);
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(sim.state())?);
    } else {
        println!();
        println!("{}", serde_json::to_string_pretty(&sim.lab_snapshot())?);
    }

    if let Some(question) = &args.ask {
        let catalog_lab = match lab {
            Some(lab) => lab.clone(),
            None => stemulator::lab::natural_selection_lab(),
        };
        let context = CoachContext::from_state(sim.state(), &catalog_lab);
        let client = CoachClient::from_env();
        let rt = Runtime::new()?;
        match rt.block_on(client.chat(question, &context, &[])) {
            Ok(reply) => println!("\n{}", reply),
            Err(e) => tracing::warn!("Coach unavailable: {}", e),
        }
    }

    Ok(())
}

fn print_row(report: &GenerationReport, survival_rate: f64) {
    println!(
        "{:>4} {:>6} {:>6} {:>6} {:>8.1}%",
        report.generation,
        report.alive,
        report.prey,
        report.predators,
        survival_rate * 100.0
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lab_options_require_lab() {
        assert!(Args::try_parse_from(["stemulator", "--part", "1"]).is_err());
        assert!(Args::try_parse_from(["stemulator", "--lab-file", "labs.json"]).is_err());

        let args = Args::try_parse_from(["stemulator", "--lab", "HS-LS4-2", "--part", "1"]).unwrap();
        assert_eq!(args.lab.as_deref(), Some("HS-LS4-2"));
        assert_eq!(args.part, Some(1));
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["stemulator"]).unwrap();
        assert_eq!(args.generations, 10);
        assert_eq!(args.format, "text");
        assert!(args.seed.is_none());
    }
}
