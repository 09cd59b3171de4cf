//! Chipfire terminal front end
//!
//! Plays chip-firing puzzles from stdin: tutorials first, then random
//! winnable graphs that grow as you win. Progress is saved as JSON.

mod command;
mod config;

use std::fmt::Write as _;
use std::io::{self, BufRead};

use chipfire_engine::{Session, SessionConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::command::{Command, USAGE};
use crate::config::CliConfig;

/// Human-readable board: one line per node plus a status line.
fn render(session: &Session) -> String {
    let graph = session.graph();
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Level {} | difficulty {:.1} | moves {} | total {} | genus {}",
        session.current_level() + 1,
        session.difficulty(),
        session.moves(),
        graph.total_value(),
        graph.genus(),
    );
    for node in graph.nodes() {
        let neighbors: Vec<String> = graph
            .neighbors(node.id())
            .map(|id| id.to_string())
            .collect();
        let _ = writeln!(
            out,
            "  #{:<3} {:>4}  at ({:.1}, {:.1}){}  -> [{}]",
            node.id(),
            node.value,
            node.position.x,
            node.position.y,
            if node.pinned { " (held)" } else { "" },
            neighbors.join(", "),
        );
    }
    if session.is_won() {
        let _ = writeln!(out, "You won in {} moves! Type 'next' for a new puzzle.", session.moves());
    }
    out
}

fn load_session(config: &CliConfig) -> Session {
    match std::fs::read_to_string(&config.save_path) {
        Ok(json) => {
            tracing::info!(path = %config.save_path.display(), "Loading saved progress");
            Session::restore_json(config.session.clone(), &json)
        }
        Err(_) => Session::new(config.session.clone()),
    }
}

fn save_session(session: &Session, config: &CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    let json = session.save_state().to_json()?;
    std::fs::write(&config.save_path, json)?;
    tracing::debug!(path = %config.save_path.display(), "Saved progress");
    Ok(())
}

/// Apply one command. Returns `false` when the player quits.
fn run(
    command: Command,
    session: &mut Session,
    config: &CliConfig,
) -> Result<bool, Box<dyn std::error::Error>> {
    match command {
        Command::Show => print!("{}", render(session)),
        Command::Fire(node) => match session.click_node(node) {
            Ok(Some(outcome)) => {
                println!("#{} gave {} token(s)", node, outcome.transfers.len());
                print!("{}", render(session));
                if outcome.won {
                    save_session(session, config)?;
                }
            }
            Ok(None) => println!("Board already won. Type 'next' for a new puzzle."),
            Err(e) => println!("{}", e),
        },
        Command::Tick(frames) => {
            for _ in 0..frames {
                session.tick();
            }
            print!("{}", render(session));
        }
        Command::Drag(node, position) => {
            if !session.drag(node, position) {
                println!("no node #{}", node);
            }
        }
        Command::Release(node) => {
            if !session.release(node) {
                println!("no node #{}", node);
            }
        }
        Command::Next => {
            if session.click_background() {
                print!("{}", render(session));
            } else {
                println!("Solve this board first.");
            }
        }
        Command::Save => {
            save_session(session, config)?;
            println!("Saved to {}", config.save_path.display());
        }
        Command::Help => println!("{}", USAGE),
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chipfire=info,chipfire_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = CliConfig::from_env();
    let SessionConfig { scene_width, scene_height, .. } = config.session;
    tracing::info!(scene_width, scene_height, "Starting chipfire");

    let mut session = load_session(&config);
    println!("Chipfire");
    println!("========");
    println!("Clear every debt: firing a node gives one token to each neighbor.");
    println!("Type 'help' for commands.");
    println!();
    print!("{}", render(&session));

    for line in io::stdin().lock().lines() {
        let line = line?;
        match Command::parse(&line) {
            Ok(command) => {
                if !run(command, &mut session, &config)? {
                    break;
                }
            }
            Err(e) => println!("{}", e),
        }
    }

    save_session(&session, &config)?;
    Ok(())
}
