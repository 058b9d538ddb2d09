//! Train command - Train a first-mover or second-mover agent

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;

use crate::{
    adapters::{AgentOpponent, RandomOpponent, WinFirst},
    app::{AgentConfig, App},
    cli::output::{ProgressObserver, format_number, percent, print_kv, print_section},
    ports::Opponent,
    q_learning::SymmetryPolicy,
    training::{Role, Trainer, TrainingConfig, trainer::SECOND_MOVER_OPPONENT_EPSILON},
};

#[derive(Parser, Debug)]
#[command(about = "Train a Q-learning agent")]
pub struct TrainArgs {
    /// Seat the agent learns to play (`first` or `second`)
    #[arg(long, short = 'r', default_value = "first")]
    pub role: Role,

    /// Number of training episodes
    #[arg(long, short = 'e', default_value_t = 1_000_000)]
    pub episodes: usize,

    /// Where to write the trained agent (MessagePack)
    #[arg(long, short = 'O')]
    pub output: PathBuf,

    /// Trained first mover to play against; required for `--role second`
    #[arg(long, short = 'o')]
    pub opponent: Option<PathBuf>,

    /// Exploration rate of the opponent agent
    #[arg(long, default_value_t = SECOND_MOVER_OPPONENT_EPSILON)]
    pub opponent_epsilon: f64,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, default_value_t = 0.1)]
    pub alpha: f64,

    #[arg(long, default_value_t = 1.0)]
    pub gamma: f64,

    #[arg(long, default_value_t = 0.1)]
    pub epsilon: f64,

    /// How updates spread over board symmetries (`all`, `distinct`, `post_move_orbit`)
    #[arg(long, default_value = "all")]
    pub symmetry_policy: SymmetryPolicy,

    /// JSON training schedule (decay, rewards, report interval); flags win
    /// over the episode count and seed it contains
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the training report as JSON
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => TrainingConfig::load(path)
            .with_context(|| format!("failed to load training config {}", path.display()))?,
        None => TrainingConfig::default(),
    };
    config.episodes = args.episodes;
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let app = App::new();
    let mut agent_config = AgentConfig::new()
        .with_alpha(args.alpha)
        .with_gamma(args.gamma)
        .with_epsilon(args.epsilon)
        .with_symmetry_policy(args.symmetry_policy);
    if let Some(seed) = config.seed {
        agent_config = agent_config.with_seed(seed);
    }
    let mut agent = app.create_agent(agent_config)?;

    let opponent_seed = config.seed.map(|seed| seed.wrapping_add(1));
    let mut opponent: Box<dyn Opponent> = match (args.role, &args.opponent) {
        (_, Some(path)) => {
            let table = app
                .load_table(path)
                .with_context(|| format!("failed to load opponent {}", path.display()))?;
            Box::new(WinFirst::new(
                AgentOpponent::new(table.into(), opponent_seed).with_epsilon(args.opponent_epsilon),
            ))
        }
        (Role::First, None) => Box::new(WinFirst::new(RandomOpponent::new(opponent_seed))),
        (Role::Second, None) => {
            return Err(anyhow!(
                "--role second needs a trained first mover passed with --opponent"
            ));
        }
    };

    print_section(&format!("Training {} mover", args.role));
    print_kv("Episodes", &format_number(config.episodes));
    print_kv("Opponent", opponent.name());
    print_kv("Symmetry policy", args.symmetry_policy.as_str());

    let mut trainer = Trainer::new(config)?;
    if !args.no_progress {
        trainer = trainer.with_observer(Box::new(ProgressObserver::new()));
    }
    let report = trainer.run(&mut agent, &mut opponent, args.role)?;

    print_section("Results");
    print_kv("Wins", &format!("{} ({})", report.wins, percent(report.win_rate())));
    print_kv("Draws", &format!("{} ({})", report.draws, percent(report.draw_rate())));
    print_kv(
        "Losses",
        &format!("{} ({})", report.losses, percent(report.loss_rate())),
    );
    print_kv("Final alpha", &format!("{:.6}", report.final_alpha));
    print_kv("Average reward", &format!("{:.4}", report.average_reward));
    print_kv("Table entries", &format_number(report.table_size));

    app.save_agent(&agent, report.metadata(), &args.output)
        .with_context(|| format!("failed to save agent to {}", args.output.display()))?;
    println!("\nSaved agent to {}", args.output.display());

    if let Some(path) = &args.report {
        report
            .save(path)
            .with_context(|| format!("failed to write report {}", path.display()))?;
        println!("Saved report to {}", path.display());
    }
    Ok(())
}
