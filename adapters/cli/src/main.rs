#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that replays scripted input against a Maze Runner session.

mod render;
mod script;

use anyhow::{Context, Result};
use clap::Parser;
use maze_runner_session::{Config, Session};
use tracing_subscriber::EnvFilter;

use crate::script::Input;

#[derive(Parser, Debug)]
#[command(name = "maze-runner", about = "Replay scripted moves through generated mazes")]
struct Args {
    /// Seed for the maze generator.
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Level to start from.
    #[arg(long, default_value_t = 1)]
    level: u32,

    /// Inputs to replay: U/D/L/R move, T advances the clock one second.
    #[arg(long, default_value = "")]
    script: String,

    /// Print the maze before and after the script runs.
    #[arg(long)]
    map: bool,
}

/// Entry point for the Maze Runner command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let inputs = script::parse(&args.script).context("invalid --script")?;

    let mut session = Session::new(Config::new(args.seed));
    println!("{}", session.welcome_banner());

    let snapshot = session
        .start_level(args.level)
        .with_context(|| format!("failed to start level {}", args.level))?;
    if args.map {
        print!("{}", render::ascii_map(&snapshot));
    }

    for input in inputs {
        let outcome = match input {
            Input::Move(direction) => session.move_player(direction),
            Input::Tick => session.tick(),
        };
        let events = match outcome {
            Ok(events) => events,
            Err(error) => {
                for event in error.events() {
                    println!("{}", render::describe(event));
                }
                return Err(error.into());
            }
        };
        for event in &events {
            println!("{}", render::describe(event));
        }
    }

    println!("{}", session.hud());
    if let Some(direction) = session.hint() {
        println!("hint: {direction:?}");
    }
    if args.map {
        if let Some(snapshot) = session.snapshot() {
            print!("{}", render::ascii_map(&snapshot));
        }
    }

    Ok(())
}
