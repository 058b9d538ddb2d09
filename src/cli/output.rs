//! Output formatting and progress bars for CLI

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    Error, Result,
    ports::Observer,
    tictactoe::{GameOutcome, Player},
};

/// Progress observer - shows a progress bar with running win/draw/loss counts
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    wins: usize,
    draws: usize,
    losses: usize,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            wins: 0,
            draws: 0,
            losses: 0,
        }
    }

    fn summary(&self, alpha: Option<f64>) -> String {
        let counts = format!("W:{} D:{} L:{}", self.wins, self.draws, self.losses);
        match alpha {
            Some(alpha) => format!("{counts} alpha {alpha:.5}"),
            None => counts,
        }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, outcome: GameOutcome, alpha: f64) -> Result<()> {
        match outcome {
            GameOutcome::Win(Player::One) => self.wins += 1,
            GameOutcome::Win(Player::Two) => self.losses += 1,
            GameOutcome::Draw => self.draws += 1,
        }

        // Redrawing on every episode dominates short games.
        if episode % 1000 == 0
            && let Some(pb) = &self.progress_bar
        {
            pb.set_position(episode as u64 + 1);
            pb.set_message(self.summary(Some(alpha)));
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.summary(None));
        }
        Ok(())
    }
}

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Format a rate as a percentage with one decimal
pub fn percent(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1_000_000), "1,000,000");
    }

    #[test]
    fn test_observer_counts_from_first_seat() {
        let mut observer = ProgressObserver::new();
        observer
            .on_episode_end(0, GameOutcome::Win(Player::One), 0.1)
            .unwrap();
        observer
            .on_episode_end(1, GameOutcome::Win(Player::Two), 0.1)
            .unwrap();
        observer.on_episode_end(2, GameOutcome::Draw, 0.1).unwrap();
        assert_eq!(observer.summary(None), "W:1 D:1 L:1");
    }

    #[test]
    fn test_progress_bar_advances_on_reporting_episodes() {
        let mut observer = ProgressObserver::new();
        observer.on_training_start(3_000).unwrap();
        for episode in 0..1_500 {
            observer.on_episode_end(episode, GameOutcome::Draw, 0.1).unwrap();
        }
        let position = observer.progress_bar.as_ref().map(ProgressBar::position);
        assert_eq!(position, Some(1_001));
        observer.on_training_end().unwrap();
    }
}
