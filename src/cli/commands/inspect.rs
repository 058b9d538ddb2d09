//! Inspect command - Show learned values for one board

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    app::App,
    cli::output::{format_number, print_kv, print_section},
    tictactoe::{Action, Board},
    types::StateKey,
};

#[derive(Parser, Debug)]
#[command(about = "Show the learned action values for a state")]
pub struct InspectArgs {
    /// Trained agent file
    #[arg(long)]
    pub agent: PathBuf,

    /// Nine-digit state key (0 empty, 1 agent, 2 opponent), row-major
    #[arg(long, default_value = "000000000")]
    pub state: StateKey,
}

pub fn execute(args: InspectArgs) -> Result<()> {
    let app = App::new();
    let agent = app
        .load_agent(&args.agent)
        .with_context(|| format!("failed to load agent {}", args.agent.display()))?;
    let table = agent.q_table();
    let board = Board::from_state_key(&args.state);
    let legal = board.legal_actions();

    print_section(&format!("State {}", args.state));
    print_kv("Table entries", &format_number(table.len()));
    print_kv("Symmetry policy", agent.symmetry_policy().as_str());
    println!("\n{board}\n");

    for row in 0..3 {
        let cells: Vec<String> = (0..3)
            .map(|col| {
                let action = Action::new(row, col);
                if board.is_legal(action) {
                    format!("{:>8.4}", table.get(&args.state, action))
                } else {
                    format!("{:>8}", board.cell(action).to_digit())
                }
            })
            .collect();
        println!("  {}", cells.join(" "));
    }

    let best = table.best_actions(&args.state, &legal);
    if best.is_empty() {
        println!("\nNo legal actions: the board is full.");
    } else {
        let best: Vec<String> = best.iter().map(ToString::to_string).collect();
        println!("\nGreedy choice: {}", best.join(" or "));
    }
    Ok(())
}
