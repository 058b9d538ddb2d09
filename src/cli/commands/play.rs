//! Play command - Play against the trained agents in the terminal

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    app::App,
    session::{
        AGENT_MARK, GameState, HUMAN_MARK, MSG_AGENT_WINS, MSG_DRAW, MSG_GAME_OVER, MSG_HUMAN_WINS,
        MoveRequest, PlaySession,
    },
};

#[derive(Parser, Debug)]
#[command(about = "Play against the trained agents")]
pub struct PlayArgs {
    /// Trained first-mover agent
    #[arg(long)]
    pub first: PathBuf,

    /// Trained second-mover agent
    #[arg(long)]
    pub second: PathBuf,

    /// Let the agent open the game
    #[arg(long)]
    pub agent_first: bool,
}

fn render(state: &GameState) {
    println!();
    for row in &state.board {
        let marks: Vec<&str> = row
            .iter()
            .map(|m| if m.is_empty() { "." } else { m.as_str() })
            .collect();
        println!("  {}", marks.join(" "));
    }
    if !state.message.is_empty() {
        println!("\n{}", state.message);
    }
}

fn is_finished(state: &GameState) -> bool {
    [MSG_AGENT_WINS, MSG_HUMAN_WINS, MSG_DRAW, MSG_GAME_OVER].contains(&state.message.as_str())
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let app = App::new();
    let first = app
        .load_table(&args.first)
        .with_context(|| format!("failed to load {}", args.first.display()))?;
    let second = app
        .load_table(&args.second)
        .with_context(|| format!("failed to load {}", args.second.display()))?;
    let mut session = PlaySession::new(first.into(), second.into());

    let mut state = if args.agent_first {
        session.opening_move()?
    } else {
        GameState::new(HUMAN_MARK)
    };
    println!("You are {HUMAN_MARK}, the agent is {AGENT_MARK}. Enter moves as `row col`.");
    render(&state);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    while !is_finished(&state) {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let coords: Vec<i64> = line?
            .split_whitespace()
            .filter_map(|token| token.parse().ok())
            .collect();
        let &[x, y] = coords.as_slice() else {
            println!("Enter two numbers between 0 and 2.");
            continue;
        };
        state = session.make_move(MoveRequest { state, x, y })?;
        render(&state);
    }
    Ok(())
}
