//! Goalie CLI
//!
//! 스냅샷(JSON) → 결정(JSON) 변환 도구
//! Runs the keeper controller over recorded world snapshots.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use goalie_core::engine::PressingState;
use goalie_core::{Decision, GoalieConfig, GoalieController, GoalieError, WorldSnapshot};
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::filter::EnvFilter;

#[derive(Parser)]
#[command(name = "goalie_cli")]
#[command(about = "Goalkeeper decisions from recorded world snapshots", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decide one cycle from a snapshot file
    Decide {
        /// Snapshot JSON file
        #[arg(long)]
        snapshot: PathBuf,

        /// Config file (.yaml/.yml or .json)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Preset profile (standard, sweeper, line)
        #[arg(long)]
        profile: Option<String>,
    },

    /// Run one controller over a JSON array of snapshots
    Replay {
        /// Snapshot array JSON file
        #[arg(long)]
        snapshots: PathBuf,

        /// Config file (.yaml/.yml or .json)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Preset profile (standard, sweeper, line)
        #[arg(long)]
        profile: Option<String>,
    },

    /// Print the effective configuration as YAML
    Config {
        /// Preset profile (standard, sweeper, line)
        #[arg(long)]
        profile: Option<String>,
    },
}

/// One output line of a replay
#[derive(Serialize)]
struct ReplayLine<'a> {
    cycle: u64,
    decision: &'a Decision,
    pressing: PressingState,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("❌ {:#}", err);
        let code = match err.downcast_ref::<GoalieError>() {
            Some(e) if e.is_input_error() => 2,
            _ => 1,
        };
        std::process::exit(code);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Decide {
            snapshot,
            config,
            profile,
        } => {
            let cfg = load_config(config.as_deref(), profile.as_deref())?;
            let wm = read_snapshot(&snapshot)?;
            let mut keeper = GoalieController::new(cfg);
            let decision = keeper.decide(&wm);
            println!("{}", serde_json::to_string_pretty(&decision)?);
        }

        Commands::Replay {
            snapshots,
            config,
            profile,
        } => {
            let cfg = load_config(config.as_deref(), profile.as_deref())?;
            let cycles = read_snapshots(&snapshots)?;
            info!(cycles = cycles.len(), path = %snapshots.display(), "replay");
            let mut keeper = GoalieController::new(cfg);
            for line in replay_lines(&mut keeper, &cycles)? {
                println!("{}", line);
            }
        }

        Commands::Config { profile } => {
            let cfg = load_config(None, profile.as_deref())?;
            print!("{}", cfg.to_yaml_string()?);
        }
    }

    Ok(())
}

/// Config file first, then an explicit profile, then `GOALIE_PROFILE`
fn load_config(path: Option<&Path>, profile: Option<&str>) -> Result<GoalieConfig> {
    if let Some(path) = path {
        return GoalieConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()));
    }
    Ok(match profile {
        Some(name) => GoalieConfig::from_profile(name),
        None => GoalieConfig::from_env_or_default(),
    })
}

fn read_snapshot(path: &Path) -> Result<WorldSnapshot> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading snapshot {}", path.display()))?;
    WorldSnapshot::from_json_str(&text)
        .with_context(|| format!("parsing snapshot {}", path.display()))
}

fn read_snapshots(path: &Path) -> Result<Vec<WorldSnapshot>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading snapshots {}", path.display()))?;
    let values: Vec<Value> = serde_json::from_str(&text)
        .map_err(GoalieError::from)
        .with_context(|| format!("parsing snapshots {}", path.display()))?;
    values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            WorldSnapshot::from_json_str(&value.to_string())
                .with_context(|| format!("snapshot #{} in {}", i, path.display()))
        })
        .collect()
}

fn replay_lines(keeper: &mut GoalieController, cycles: &[WorldSnapshot]) -> Result<Vec<String>> {
    cycles
        .iter()
        .map(|wm| -> Result<String> {
            let decision = keeper.decide(wm);
            let line = ReplayLine {
                cycle: wm.cycle,
                decision: &decision,
                pressing: keeper.pressing(),
            };
            Ok(serde_json::to_string(&line)?)
        })
        .collect()
}
