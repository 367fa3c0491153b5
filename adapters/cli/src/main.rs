#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a Phrase Push puzzle in the terminal.

mod config;
mod keymap;
mod layout_code;
mod terminal;

use std::{
    io::{self, BufRead},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use keymap::Input;
use phrase_push_rendering::{RenderingBackend, TextScene};
use phrase_push_system_session::{MoveOutcome, Session};
use phrase_push_world::query;
use terminal::TerminalBackend;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Greeting printed before the first board.
const WELCOME_BANNER: &str = "Welcome to Phrase Push.";

type TerminalSession<'o> = Session<'o, TextScene>;

/// Push fragment blocks around the board until they spell the hidden phrase.
#[derive(Debug, Parser)]
#[command(name = "phrase-push", version)]
struct Cli {
    /// Path to a TOML puzzle layout.
    #[arg(long, value_name = "PATH", conflicts_with = "code")]
    layout: Option<PathBuf>,
    /// Layout share code produced by `--export-code`.
    #[arg(long, value_name = "CODE")]
    code: Option<String>,
    /// Moves to play instead of reading standard input, written as U, D, L and R.
    #[arg(long, value_name = "SCRIPT")]
    moves: Option<String>,
    /// Print the share code of the selected layout and exit.
    #[arg(long)]
    export_code: bool,
}

/// Entry point for the Phrase Push command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let layout = config::load(cli.layout.as_deref(), cli.code.as_deref())?;

    if cli.export_code {
        println!("{}", layout_code::encode(&layout)?);
        return Ok(());
    }

    let mut backend = TerminalBackend::new(io::stdout());
    let mut scene = TextScene::new(layout.board_side());
    let mut session =
        Session::start(&layout, &mut scene).context("failed to start puzzle session")?;

    backend.announce(WELCOME_BANNER)?;
    backend.present(session.observer())?;

    match cli.moves {
        Some(script) => play_script(&mut session, &mut backend, &script)?,
        None => play_interactive(&mut session, &mut backend)?,
    }

    session.end();
    let moves = query::move_count(session.world());
    if session.observer().solved_phrase().is_some() {
        backend.announce(&format!("Phrase assembled in {moves} moves."))?;
    } else {
        backend.announce(&format!("Stopped after {moves} moves."))?;
    }
    Ok(())
}

fn play_script<W: io::Write>(
    session: &mut TerminalSession<'_>,
    backend: &mut TerminalBackend<W>,
    script: &str,
) -> Result<()> {
    let directions = keymap::parse_script(script).context("invalid move script")?;
    info!(moves = directions.len(), "playing scripted moves");

    for direction in directions {
        let outcome = session.submit(direction);
        debug!(?direction, ?outcome, "scripted move resolved");
        match outcome {
            MoveOutcome::Moved | MoveOutcome::Solved => backend.present(session.observer())?,
            MoveOutcome::Blocked => {}
            MoveOutcome::Inactive => break,
        }
    }
    Ok(())
}

fn play_interactive<W: io::Write>(
    session: &mut TerminalSession<'_>,
    backend: &mut TerminalBackend<W>,
) -> Result<()> {
    backend.announce("Move with w/a/s/d, h/j/k/l or arrow names; q quits.")?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read input")?;
        for token in line.split_whitespace() {
            match keymap::parse_token(token) {
                Some(Input::Quit) => return Ok(()),
                Some(Input::Move(direction)) => {
                    let outcome = session.submit(direction);
                    debug!(?direction, ?outcome, "move resolved");
                    if outcome == MoveOutcome::Moved || outcome == MoveOutcome::Solved {
                        backend.present(session.observer())?;
                    }
                }
                None => backend.announce(&format!("Unrecognised input `{token}`."))?,
            }
            if !session.is_active() {
                return Ok(());
            }
        }
    }
    Ok(())
}
