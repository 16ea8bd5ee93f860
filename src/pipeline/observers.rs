//! Observer implementations for training pipelines

use indicatif::{ProgressBar, ProgressStyle};

use crate::{Result, pipeline::EpisodeOutcome, ports::Observer};

/// Progress bar observer - shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    passes: usize,
    crashes: usize,
    best_streak: u64,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            passes: 0,
            crashes: 0,
            best_streak: 0,
        }
    }

    fn message(&self) -> String {
        format!(
            "P:{} C:{} best:{}",
            self.passes, self.crashes, self.best_streak
        )
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
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(
        &mut self,
        episode: usize,
        outcome: EpisodeOutcome,
        streak: u64,
    ) -> Result<()> {
        match outcome {
            EpisodeOutcome::Passed => self.passes += 1,
            EpisodeOutcome::Crashed => self.crashes += 1,
        }
        self.best_streak = self.best_streak.max(streak);

        if let Some(pb) = &self.progress_bar {
            pb.set_position(episode as u64 + 1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Metrics observer - tracks pass/crash counts and streaks
#[derive(Debug, Default)]
pub struct MetricsObserver {
    passes: usize,
    crashes: usize,
    best_streak: u64,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self::default()
    }

    /// Episodes that cleared a tube.
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Episodes that ended in a crash.
    pub fn crashes(&self) -> usize {
        self.crashes
    }

    /// Longest observed run of consecutive cleared tubes.
    pub fn best_streak(&self) -> u64 {
        self.best_streak
    }
}

impl Observer for MetricsObserver {
    fn on_episode_end(
        &mut self,
        _episode: usize,
        outcome: EpisodeOutcome,
        streak: u64,
    ) -> Result<()> {
        match outcome {
            EpisodeOutcome::Passed => self.passes += 1,
            EpisodeOutcome::Crashed => self.crashes += 1,
        }
        self.best_streak = self.best_streak.max(streak);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_accumulate() {
        let mut metrics = MetricsObserver::new();
        metrics.on_episode_end(0, EpisodeOutcome::Passed, 1).unwrap();
        metrics.on_episode_end(1, EpisodeOutcome::Passed, 2).unwrap();
        metrics.on_episode_end(2, EpisodeOutcome::Crashed, 0).unwrap();

        assert_eq!(metrics.passes(), 2);
        assert_eq!(metrics.crashes(), 1);
        assert_eq!(metrics.best_streak(), 2);
    }
}
