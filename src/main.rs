//! Goal timer headless runner.
//!
//! Loads timers and a trigger script from an INI file, runs them for a fixed
//! number of frames, and prints every progress and completion event.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --config timers.ini --json
//! RUST_LOG=debug cargo run -- --config timers.ini
//! ```

use std::path::PathBuf;

use clap::Parser;
use goaltimer::resources::simconfig::SimConfig;
use goaltimer::simulation::Simulation;

/// Goal timer headless runner
#[derive(Parser)]
#[command(version, about = "Runs goal timers from an INI file and prints their events")]
struct Cli {
    /// Path to the INI configuration file.
    #[arg(short, long, value_name = "PATH", default_value = "./timers.ini")]
    config: PathBuf,

    /// Number of frames to run (overrides the file).
    #[arg(long)]
    frames: Option<u32>,

    /// Unscaled frame delta in seconds (overrides the file).
    #[arg(long)]
    delta: Option<f32>,

    /// RNG seed (overrides the file).
    #[arg(long)]
    seed: Option<u64>,

    /// Print events as JSON lines.
    #[arg(long)]
    json: bool,

    /// Only print completion events.
    #[arg(long)]
    completions_only: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = SimConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        log::error!("{}", e);
        std::process::exit(1);
    }
    if let Some(frames) = cli.frames {
        config.frames = frames;
    }
    if let Some(delta) = cli.delta {
        config.delta = delta;
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if config.timers.is_empty() {
        log::warn!("No [timer.*] sections in {:?}, nothing to run", config.config_path);
    }

    let mut sim = Simulation::from_config(&config);
    sim.run(config.frames, config.delta, &config.script);

    for record in sim.records() {
        if cli.completions_only && !record.is_complete() {
            continue;
        }
        if cli.json {
            match serde_json::to_string(record) {
                Ok(line) => println!("{line}"),
                Err(e) => {
                    log::error!("Failed to serialize event: {}", e);
                    std::process::exit(1);
                }
            }
        } else {
            println!("{record}");
        }
    }

    log::info!(
        "Ran {} frames ({:.3}s simulated), {} event(s) recorded",
        config.frames,
        sim.elapsed(),
        sim.records().len()
    );
}
