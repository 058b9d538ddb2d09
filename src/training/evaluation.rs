//! Greedy evaluation of a trained agent

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use super::{
    Role,
    config::Rewards,
    episode::{REWARD_EMA, play_episode},
};
use crate::{
    Result,
    ports::Opponent,
    q_learning::QLearningAgent,
    tictactoe::{Board, GameOutcome, Player},
};

/// Tally of an evaluation match, from the evaluated agent's seat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub role: Role,
    pub games: usize,
    pub agent_wins: usize,
    pub opponent_wins: usize,
    pub draws: usize,
    /// Exponential moving average of terminal rewards
    pub average_reward: f64,
}

impl MatchReport {
    fn new(role: Role) -> Self {
        Self {
            role,
            games: 0,
            agent_wins: 0,
            opponent_wins: 0,
            draws: 0,
            average_reward: 0.0,
        }
    }

    /// Wins of whoever opened the game
    pub fn first_wins(&self) -> usize {
        match self.role {
            Role::First => self.agent_wins,
            Role::Second => self.opponent_wins,
        }
    }

    /// Wins of whoever replied
    pub fn second_wins(&self) -> usize {
        match self.role {
            Role::First => self.opponent_wins,
            Role::Second => self.agent_wins,
        }
    }

    pub fn is_unbeaten(&self) -> bool {
        self.opponent_wins == 0
    }

    pub fn loss_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.opponent_wins as f64 / self.games as f64
        }
    }
}

/// Play `games` games with `agent` greedy in seat `role`.
///
/// The agent's table is not modified. When the agent plays second the
/// opponent opens with a uniformly random move drawn from a generator seeded
/// by `seed`. Every loss is logged at warn level with the final board.
pub fn evaluate_match<O: Opponent + ?Sized>(
    agent: &mut QLearningAgent,
    opponent: &mut O,
    role: Role,
    games: usize,
    seed: Option<u64>,
) -> Result<MatchReport> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    let rewards = Rewards::default();
    let mut board = Board::new();
    let mut report = MatchReport::new(role);

    for game in 0..games {
        let result = play_episode(
            &mut board,
            agent,
            opponent,
            role,
            &rewards,
            false,
            &mut rng,
        )?;

        report.games += 1;
        report.average_reward =
            REWARD_EMA * report.average_reward + (1.0 - REWARD_EMA) * result.terminal_reward;
        match result.outcome {
            GameOutcome::Win(Player::One) => report.agent_wins += 1,
            GameOutcome::Win(Player::Two) => {
                report.opponent_wins += 1;
                log::warn!(
                    "{role} mover lost game {game} to {}:\n{board}",
                    opponent.name()
                );
            }
            GameOutcome::Draw => report.draws += 1,
        }
    }

    log::info!(
        "{role} mover vs {}: {} wins, {} draws, {} losses over {} games",
        opponent.name(),
        report.agent_wins,
        report.draws,
        report.opponent_wins,
        report.games
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adapters::{RandomOpponent, WinFirst},
        tictactoe::Action,
        types::StateKey,
    };

    #[test]
    fn test_counts_add_up() {
        let mut agent = QLearningAgent::new(0.1, 1.0, 0.1).with_seed(1);
        let mut opponent = WinFirst::new(RandomOpponent::new(Some(2)));
        let report = evaluate_match(&mut agent, &mut opponent, Role::Second, 40, Some(3)).unwrap();

        assert_eq!(report.games, 40);
        assert_eq!(report.agent_wins + report.opponent_wins + report.draws, 40);
        assert_eq!(report.first_wins(), report.opponent_wins);
        assert!(agent.q_table().is_empty());
    }

    #[test]
    fn test_greedy_agent_takes_its_win() {
        // Opening in the centre and then completing any line is enough to
        // beat an opponent that only ever plays the top-left free cell.
        struct TopLeft;
        impl Opponent for TopLeft {
            fn select_move(&mut self, board: &Board, _player: Player) -> Result<Action> {
                Ok(board.legal_actions()[0])
            }
            fn name(&self) -> &str {
                "top-left"
            }
        }

        let mut agent = QLearningAgent::new(0.1, 1.0, 0.0);
        // 1 in the centre, 2 at (0,0): go for the middle column.
        agent.set_value(StateKey::empty(), Action::new(1, 1), 1.0);
        agent.set_value(StateKey::parse("200010000").unwrap(), Action::new(0, 1), 1.0);
        // 2 at (0,0) and (0,2): finish the column.
        agent.set_value(StateKey::parse("212010000").unwrap(), Action::new(2, 1), 1.0);

        let report = evaluate_match(&mut agent, &mut TopLeft, Role::First, 3, Some(0)).unwrap();
        assert_eq!(report.agent_wins, 3);
        assert!(report.is_unbeaten());
    }
}
