#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter for replaying and inspecting wrapping tasks.

mod render;

use std::{fs, path::Path, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;
use wrapbot_core::{parse_solution, Task, ValidatorReply};
use wrapbot_system_replay::{replay, ReplayOutcome};
use wrapbot_world::{Game, GridTask, Rules};

#[derive(Debug, Parser)]
#[command(name = "wrapbot")]
#[command(about = "Replays and inspects bot wrapping tasks")]
struct Cli {
    /// Log at debug level unless RUST_LOG is set.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Replay a solution against a task and report the finishing time.
    Replay {
        /// Task description file.
        #[arg(long)]
        task: PathBuf,
        /// Solution file with one action stream per bot.
        #[arg(long)]
        solution: PathBuf,
        /// TOML file overriding booster durations.
        #[arg(long)]
        rules: Option<PathBuf>,
        /// Print a JSON summary instead of plain text.
        #[arg(long)]
        json: bool,
    },
    /// Print the rasterized task with boosters and the start cell.
    Render {
        /// Task description file.
        #[arg(long)]
        task: PathBuf,
    },
    /// Classify a reply from the reference checker.
    CheckReply {
        /// Reply text as printed by the checker.
        reply: String,
        /// Print the classification as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Serialize)]
struct ReplayReport {
    #[serde(flatten)]
    outcome: ReplayOutcome,
    solution: String,
}

/// Entry point for the wrapbot command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Command::Replay {
            task,
            solution,
            rules,
            json,
        } => run_replay(&task, &solution, rules.as_deref(), json),
        Command::Render { task } => {
            let terrain = load_terrain(&task)?;
            println!("{}", render::render(&terrain));
            Ok(())
        }
        Command::CheckReply { reply, json } => check_reply(&reply, json),
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_terrain(path: &Path) -> Result<GridTask> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read task {}", path.display()))?;
    let task = Task::parse(&text).with_context(|| format!("malformed task {}", path.display()))?;
    GridTask::new(&task).with_context(|| format!("invalid terrain in {}", path.display()))
}

fn load_rules(path: Option<&Path>) -> Result<Rules> {
    let Some(path) = path else {
        return Ok(Rules::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read rules {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("malformed rules {}", path.display()))
}

fn run_replay(task: &Path, solution: &Path, rules: Option<&Path>, json: bool) -> Result<()> {
    let terrain = load_terrain(task)?;
    let rules = load_rules(rules)?;
    let text = fs::read_to_string(solution)
        .with_context(|| format!("failed to read solution {}", solution.display()))?;
    let streams = parse_solution(&text)
        .with_context(|| format!("malformed solution {}", solution.display()))?;

    let mut game = Game::with_rules(terrain, rules);
    info!(bots = streams.len(), task = %task.display(), "replaying solution");
    let outcome = replay(&mut game, &streams).context("solution rejected")?;

    if json {
        let report = ReplayReport {
            outcome,
            solution: game.solution(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        match outcome.finished {
            Some(turn) => println!("finished in {turn} turns"),
            None => println!(
                "unfinished after {} turns: {} cells unwrapped",
                outcome.turn, outcome.remaining_unwrapped
            ),
        }
    }
    Ok(())
}

fn check_reply(reply: &str, json: bool) -> Result<()> {
    let reply = ValidatorReply::classify(reply);
    if json {
        println!("{}", serde_json::to_string(&reply)?);
        return Ok(());
    }
    match reply {
        ValidatorReply::Success { time } => println!("success: {time}"),
        ValidatorReply::Failure { raw } => println!("failure: {raw}"),
    }
    Ok(())
}
