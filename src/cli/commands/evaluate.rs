//! Evaluate command - Play trained first and second movers against each other

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result, bail};
use clap::Parser;

use crate::{
    adapters::{AgentOpponent, WinFirst},
    app::App,
    cli::output::{format_number, percent, print_kv, print_section},
    q_learning::{QLearningAgent, QTable},
    training::{MatchReport, Role, evaluate_match},
};

#[derive(Parser, Debug)]
#[command(about = "Evaluate trained agents against each other")]
pub struct EvaluateArgs {
    /// Trained first-mover agent
    #[arg(long)]
    pub first: PathBuf,

    /// Trained second-mover agent
    #[arg(long)]
    pub second: PathBuf,

    /// Number of games per direction
    #[arg(long, short = 'g', default_value_t = 50_000)]
    pub games: usize,

    /// Only evaluate this seat; both seats by default
    #[arg(long)]
    pub role: Option<Role>,

    /// Exploration rate of the sparring agent
    #[arg(long, default_value_t = 0.1)]
    pub opponent_epsilon: f64,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Exit with an error if the evaluated agent loses any game
    #[arg(long)]
    pub fail_on_loss: bool,
}

fn run_direction(
    agent: &mut QLearningAgent,
    sparring: Arc<QTable>,
    role: Role,
    args: &EvaluateArgs,
) -> Result<MatchReport> {
    let mut opponent = WinFirst::new(
        AgentOpponent::new(sparring, args.seed.map(|s| s.wrapping_add(1)))
            .with_epsilon(args.opponent_epsilon),
    );
    let report = evaluate_match(agent, &mut opponent, role, args.games, args.seed)?;

    print_section(&format!("{role} mover (greedy) vs {}", opponent_label(role)));
    print_kv("Games", &format_number(report.games));
    print_kv(
        "Wins",
        &format!(
            "{} ({})",
            report.agent_wins,
            percent(report.agent_wins as f64 / report.games.max(1) as f64)
        ),
    );
    print_kv("Draws", &format_number(report.draws));
    print_kv(
        "Losses",
        &format!("{} ({})", report.opponent_wins, percent(report.loss_rate())),
    );
    Ok(report)
}

fn opponent_label(role: Role) -> &'static str {
    match role {
        Role::First => "second mover",
        Role::Second => "first mover",
    }
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    let app = App::new();
    let load = |path: &PathBuf| {
        app.load_agent(path)
            .with_context(|| format!("failed to load agent {}", path.display()))
    };
    let mut first = load(&args.first)?;
    let mut second = load(&args.second)?;

    let roles = match args.role {
        Some(role) => vec![role],
        None => vec![Role::First, Role::Second],
    };

    let mut losses = 0;
    for role in roles {
        let report = match role {
            Role::First => run_direction(&mut first, second.share_table(), role, &args)?,
            Role::Second => run_direction(&mut second, first.share_table(), role, &args)?,
        };
        losses += report.opponent_wins;
    }

    if args.fail_on_loss && losses > 0 {
        bail!("evaluated agents lost {losses} games");
    }
    Ok(())
}
