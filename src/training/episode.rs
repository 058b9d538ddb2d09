//! One game between the learning agent and an opponent.

use rand::{Rng, seq::IndexedRandom};

use super::{Role, config::Rewards};
use crate::{
    Error, Result,
    ports::Opponent,
    q_learning::QLearningAgent,
    tictactoe::{Action, Board, GameOutcome, Player},
};

/// Smoothing factor of the running average over terminal rewards
pub(crate) const REWARD_EMA: f64 = 0.9999;

#[derive(Debug, Clone, Copy)]
pub(crate) struct Episode {
    pub outcome: GameOutcome,
    /// Reward of the agent's last transition
    pub terminal_reward: f64,
}

fn place(board: &mut Board, action: Action, player: Player) -> Result<()> {
    if board.apply_move(action, player) {
        Ok(())
    } else {
        Err(Error::IllegalTransition {
            state: board.state_key().to_string(),
            action,
        })
    }
}

fn reward_for(outcome: Option<GameOutcome>, rewards: &Rewards) -> f64 {
    match outcome {
        Some(GameOutcome::Win(Player::One)) => rewards.win,
        Some(GameOutcome::Win(Player::Two)) => rewards.loss,
        Some(GameOutcome::Draw) => rewards.draw,
        None => rewards.step,
    }
}

/// Play a game on `board` with the agent as [`Player::One`].
///
/// A transition spans the agent's move and the opponent's reply, so the
/// next state the agent learns from is always one where it is to move again
/// (or a terminal one, learned with no next actions). With `learning` unset
/// the agent plays greedily and its table is left untouched.
pub(crate) fn play_episode<O, R>(
    board: &mut Board,
    agent: &mut QLearningAgent,
    opponent: &mut O,
    role: Role,
    rewards: &Rewards,
    learning: bool,
    rng: &mut R,
) -> Result<Episode>
where
    O: Opponent + ?Sized,
    R: Rng + ?Sized,
{
    board.reset();

    if role == Role::Second {
        let opening = board
            .legal_actions()
            .choose(rng)
            .copied()
            .ok_or_else(|| Error::NoLegalActions {
                state: board.state_key().to_string(),
            })?;
        place(board, opening, Player::Two)?;
    }

    loop {
        let state = board.state_key();
        let action = agent.choose_action(&state, &board.legal_actions(), learning)?;
        place(board, action, Player::One)?;

        if board.outcome().is_none() {
            let reply = opponent.select_move(board, Player::Two)?;
            place(board, reply, Player::Two)?;
        }

        let outcome = board.outcome();
        let reward = reward_for(outcome, rewards);

        if learning {
            let next_legal = if outcome.is_some() {
                Vec::new()
            } else {
                board.legal_actions()
            };
            agent.learn(&state, action, reward, &board.state_key(), &next_legal)?;
        }

        if let Some(outcome) = outcome {
            return Ok(Episode {
                outcome,
                terminal_reward: reward,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::adapters::RandomOpponent;

    #[test]
    fn test_first_mover_episode_ends_terminal() {
        let mut board = Board::new();
        let mut agent = QLearningAgent::new(0.1, 1.0, 0.1).with_seed(1);
        let mut opponent = RandomOpponent::new(Some(2));
        let mut rng = StdRng::seed_from_u64(3);

        let episode = play_episode(
            &mut board,
            &mut agent,
            &mut opponent,
            Role::First,
            &Rewards::default(),
            true,
            &mut rng,
        )
        .unwrap();

        assert!(board.is_terminal());
        assert_eq!(board.history()[0].player, Player::One);
        assert_eq!(Some(episode.outcome), board.outcome());
        assert!(!agent.q_table().is_empty());
    }

    #[test]
    fn test_second_mover_episode_lets_opponent_open() {
        let mut board = Board::new();
        let mut agent = QLearningAgent::new(0.1, 1.0, 0.1).with_seed(4);
        let mut opponent = RandomOpponent::new(Some(5));
        let mut rng = StdRng::seed_from_u64(6);

        play_episode(
            &mut board,
            &mut agent,
            &mut opponent,
            Role::Second,
            &Rewards::default(),
            true,
            &mut rng,
        )
        .unwrap();

        assert_eq!(board.history()[0].player, Player::Two);
        assert_eq!(board.history()[1].player, Player::One);
    }

    #[test]
    fn test_greedy_episode_does_not_learn() {
        let mut board = Board::new();
        let mut agent = QLearningAgent::new(0.1, 1.0, 0.5).with_seed(7);
        let mut opponent = RandomOpponent::new(Some(8));
        let mut rng = StdRng::seed_from_u64(9);

        play_episode(
            &mut board,
            &mut agent,
            &mut opponent,
            Role::First,
            &Rewards::default(),
            false,
            &mut rng,
        )
        .unwrap();

        assert!(agent.q_table().is_empty());
    }

    #[test]
    fn test_reward_mapping() {
        let rewards = Rewards::default();
        assert_eq!(reward_for(Some(GameOutcome::Win(Player::One)), &rewards), 1.0);
        assert_eq!(reward_for(Some(GameOutcome::Win(Player::Two)), &rewards), -1.0);
        assert_eq!(reward_for(Some(GameOutcome::Draw), &rewards), 0.0);
        assert_eq!(reward_for(None, &rewards), -0.1);
    }
}
