//! Training pipeline for the Q-learning agent

use std::{path::Path, sync::Arc, time::Instant};

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use super::{
    Role,
    config::TrainingConfig,
    episode::{REWARD_EMA, play_episode},
};
use crate::{
    Error, Result,
    adapters::{AgentOpponent, RandomOpponent, WinFirst},
    ports::{Observer, Opponent},
    q_learning::{QLearningAgent, QTable, TrainingMetadata},
    tictactoe::{Board, GameOutcome, Player},
};

/// Exploration rate of the pre-trained first mover that a second mover
/// trains against.
pub const SECOND_MOVER_OPPONENT_EPSILON: f64 = 0.5;

/// Result of a training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub role: Role,
    pub opponent: String,

    /// Total episodes played
    pub episodes: usize,

    pub wins: usize,
    pub draws: usize,
    pub losses: usize,

    /// Learning rate after the last decay step
    pub final_alpha: f64,

    /// Exponential moving average of terminal rewards
    pub average_reward: f64,

    /// Number of (state, action) entries in the table
    pub table_size: usize,

    pub elapsed_secs: f64,
}

impl TrainingReport {
    fn rate(&self, count: usize) -> f64 {
        if self.episodes > 0 {
            count as f64 / self.episodes as f64
        } else {
            0.0
        }
    }

    pub fn win_rate(&self) -> f64 {
        self.rate(self.wins)
    }

    pub fn draw_rate(&self) -> f64 {
        self.rate(self.draws)
    }

    pub fn loss_rate(&self) -> f64 {
        self.rate(self.losses)
    }

    /// Provenance to store next to the trained table
    pub fn metadata(&self) -> TrainingMetadata {
        TrainingMetadata {
            role: Some(self.role),
            episodes: self.episodes,
        }
    }

    /// Save report to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|source| Error::Io {
            operation: format!("create report file {path:?}"),
            source,
        })?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load report from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }
}

/// Runs training episodes for one agent against one opponent
pub struct Trainer {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
    rng: StdRng,
}

impl Trainer {
    /// Create a trainer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the configuration does not
    /// validate.
    pub fn new(config: TrainingConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Ok(Self {
            config,
            observers: Vec::new(),
            rng,
        })
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Train `agent` in seat `role` against `opponent`.
    ///
    /// The learning rate is multiplied by `alpha_decay` every `decay_every`
    /// episodes, counted from the first one.
    pub fn run<O: Opponent + ?Sized>(
        &mut self,
        agent: &mut QLearningAgent,
        opponent: &mut O,
        role: Role,
    ) -> Result<TrainingReport> {
        let episodes = self.config.episodes;
        let rewards = self.config.rewards;
        let start = Instant::now();

        let mut board = Board::new();
        let (mut wins, mut draws, mut losses) = (0, 0, 0);
        let mut average_reward = 0.0;

        log::info!(
            "training {role} mover for {episodes} episodes against {} (alpha {}, gamma {}, epsilon {})",
            opponent.name(),
            agent.alpha(),
            agent.gamma(),
            agent.epsilon()
        );
        for observer in &mut self.observers {
            observer.on_training_start(episodes)?;
        }

        for episode in 0..episodes {
            if episode > 0 {
                if self.config.decay_every > 0 && episode % self.config.decay_every == 0 {
                    agent.decay_alpha(self.config.alpha_decay);
                }
                if self.config.report_every > 0 && episode % self.config.report_every == 0 {
                    log::info!(
                        "trained {episode} episodes, alpha {:.6}, average reward {average_reward:.4}, {:.2?} elapsed",
                        agent.alpha(),
                        start.elapsed()
                    );
                }
            }

            let result = play_episode(
                &mut board,
                agent,
                opponent,
                role,
                &rewards,
                true,
                &mut self.rng,
            )?;
            average_reward = REWARD_EMA * average_reward + (1.0 - REWARD_EMA) * result.terminal_reward;

            match result.outcome {
                GameOutcome::Win(Player::One) => wins += 1,
                GameOutcome::Win(Player::Two) => losses += 1,
                GameOutcome::Draw => draws += 1,
            }

            for observer in &mut self.observers {
                observer.on_episode_end(episode, result.outcome, agent.alpha())?;
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        let report = TrainingReport {
            role,
            opponent: opponent.name().to_string(),
            episodes,
            wins,
            draws,
            losses,
            final_alpha: agent.alpha(),
            average_reward,
            table_size: agent.q_table().len(),
            elapsed_secs: start.elapsed().as_secs_f64(),
        };
        log::info!(
            "finished: {wins} wins, {draws} draws, {losses} losses, {} table entries",
            report.table_size
        );
        Ok(report)
    }
}

fn opponent_seed(config: &TrainingConfig) -> Option<u64> {
    config.seed.map(|seed| seed.wrapping_add(1))
}

/// Train an opening agent against a random opponent that never misses an
/// immediate win.
pub fn train_first_mover(
    agent: &mut QLearningAgent,
    config: TrainingConfig,
) -> Result<TrainingReport> {
    let mut opponent = WinFirst::new(RandomOpponent::new(opponent_seed(&config)));
    Trainer::new(config)?.run(agent, &mut opponent, Role::First)
}

/// Train a responding agent against a pre-trained first mover.
///
/// The first mover explores with [`SECOND_MOVER_OPPONENT_EPSILON`] so the
/// responder also learns to punish weak openings, and it never misses an
/// immediate win.
pub fn train_second_mover(
    agent: &mut QLearningAgent,
    first_mover: Arc<QTable>,
    config: TrainingConfig,
) -> Result<TrainingReport> {
    let mut opponent = WinFirst::new(
        AgentOpponent::new(first_mover, opponent_seed(&config))
            .with_epsilon(SECOND_MOVER_OPPONENT_EPSILON),
    );
    Trainer::new(config)?.run(agent, &mut opponent, Role::Second)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use tempfile::TempDir;

    use super::*;

    #[derive(Default)]
    struct Recorded {
        started: Option<usize>,
        episodes: usize,
        alphas: Vec<f64>,
        ended: bool,
    }

    struct RecordingObserver(Arc<Mutex<Recorded>>);

    impl Observer for RecordingObserver {
        fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
            self.0.lock().unwrap().started = Some(total_episodes);
            Ok(())
        }

        fn on_episode_end(&mut self, _episode: usize, _outcome: GameOutcome, alpha: f64) -> Result<()> {
            let mut recorded = self.0.lock().unwrap();
            recorded.episodes += 1;
            recorded.alphas.push(alpha);
            Ok(())
        }

        fn on_training_end(&mut self) -> Result<()> {
            self.0.lock().unwrap().ended = true;
            Ok(())
        }
    }

    fn small_config(episodes: usize) -> TrainingConfig {
        TrainingConfig {
            episodes,
            decay_every: 10,
            report_every: 0,
            ..TrainingConfig::default()
        }
        .with_seed(11)
    }

    #[test]
    fn test_counts_add_up_and_alpha_decays() {
        let mut agent = QLearningAgent::new(0.1, 1.0, 0.1).with_seed(1);
        let report = train_first_mover(&mut agent, small_config(25)).unwrap();

        assert_eq!(report.episodes, 25);
        assert_eq!(report.wins + report.draws + report.losses, 25);
        // Decays before episodes 10 and 20.
        assert!((report.final_alpha - 0.1 * 0.99 * 0.99).abs() < 1e-12);
        assert_eq!(report.table_size, agent.q_table().len());
        assert_eq!(report.metadata().role, Some(Role::First));
    }

    #[test]
    fn test_observer_sees_every_episode() {
        let recorded = Arc::new(Mutex::new(Recorded::default()));
        let mut trainer = Trainer::new(small_config(12))
            .unwrap()
            .with_observer(Box::new(RecordingObserver(Arc::clone(&recorded))));

        let mut agent = QLearningAgent::new(0.1, 1.0, 0.1).with_seed(2);
        let mut opponent = RandomOpponent::new(Some(3));
        trainer.run(&mut agent, &mut opponent, Role::First).unwrap();

        let recorded = recorded.lock().unwrap();
        assert_eq!(recorded.started, Some(12));
        assert_eq!(recorded.episodes, 12);
        assert!(recorded.ended);
        assert_eq!(recorded.alphas[9], 0.1);
        assert!(recorded.alphas[10] < 0.1);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let run = || {
            let mut agent = QLearningAgent::new(0.1, 1.0, 0.1).with_seed(5);
            train_first_mover(&mut agent, small_config(50)).unwrap();
            agent.into_table()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_second_mover_trains_against_table() {
        let mut first = QLearningAgent::new(0.1, 1.0, 0.1).with_seed(6);
        train_first_mover(&mut first, small_config(50)).unwrap();

        let mut second = QLearningAgent::new(0.1, 1.0, 0.1).with_seed(7);
        let report = train_second_mover(&mut second, first.share_table(), small_config(50)).unwrap();

        assert_eq!(report.role, Role::Second);
        assert_eq!(report.opponent, "win-first agent");
        assert!(!second.q_table().is_empty());
    }

    #[test]
    fn test_report_json_roundtrip() {
        let mut agent = QLearningAgent::new(0.1, 1.0, 0.1).with_seed(8);
        let report = train_first_mover(&mut agent, small_config(5)).unwrap();

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.json");
        report.save(&path).unwrap();
        let loaded = TrainingReport::load(&path).unwrap();
        assert_eq!(loaded.role, report.role);
        assert_eq!(
            (loaded.wins, loaded.draws, loaded.losses),
            (report.wins, report.draws, report.losses)
        );
        assert_eq!(loaded.table_size, report.table_size);
    }
}
