//! Episode bookkeeping.
use std::{collections::VecDeque, fmt};

/// Capacity of the window of recent episode returns.
pub const RECENT_RETURNS_CAPACITY: usize = 100;

/// Summary of a completed episode.
#[derive(Clone, Debug, PartialEq)]
pub struct EpisodeSummary {
    /// Index of the episode, starting from 1.
    pub episode: usize,

    /// The number of steps in the episode.
    pub steps: usize,

    /// Sum of rewards in the episode.
    pub episode_return: f32,

    /// Mean of the returns of recent episodes, this one included.
    pub recent_mean: f32,
}

impl fmt::Display for EpisodeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Step: {}  Reward: {}  Recent Reward: {}",
            self.steps, self.episode_return, self.recent_mean
        )
    }
}

/// Accumulates per-episode statistics from step-level signals.
pub trait EpisodeTracker {
    /// Called once per environment step.
    fn on_step(&mut self, reward: f32);

    /// Called once when an episode ends. Resets the per-episode statistics.
    fn on_episode_end(&mut self) -> EpisodeSummary;
}

/// Tracks the return of the current episode and of the last 100 episodes.
#[derive(Clone, Debug, Default)]
pub struct RecentReturns {
    steps: usize,
    rall: f32,
    episode: usize,
    recent: VecDeque<f32>,
}

impl RecentReturns {
    /// Creates a tracker with no completed episodes.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of steps in the current episode.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Sum of rewards in the current episode.
    pub fn episode_return(&self) -> f32 {
        self.rall
    }

    /// The number of completed episodes.
    pub fn episodes(&self) -> usize {
        self.episode
    }

    /// Returns of recent episodes, oldest first.
    pub fn recent(&self) -> &VecDeque<f32> {
        &self.recent
    }
}

impl EpisodeTracker for RecentReturns {
    fn on_step(&mut self, reward: f32) {
        self.steps += 1;
        self.rall += reward;
    }

    fn on_episode_end(&mut self) -> EpisodeSummary {
        if self.recent.len() == RECENT_RETURNS_CAPACITY {
            self.recent.pop_front();
        }
        self.recent.push_back(self.rall);
        self.episode += 1;

        let recent_mean = self.recent.iter().sum::<f32>() / self.recent.len() as f32;
        let summary = EpisodeSummary {
            episode: self.episode,
            steps: self.steps,
            episode_return: self.rall,
            recent_mean,
        };

        self.steps = 0;
        self.rall = 0.0;
        summary
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_episode_summary() {
        let mut tracker = RecentReturns::new();
        for r in [0.0, 0.0, 0.0, 1.0].iter() {
            tracker.on_step(*r);
        }
        let summary = tracker.on_episode_end();
        assert_eq!(
            summary,
            EpisodeSummary {
                episode: 1,
                steps: 4,
                episode_return: 1.0,
                recent_mean: 1.0,
            }
        );
        assert_eq!(tracker.steps(), 0);
        assert_eq!(tracker.episode_return(), 0.0);

        tracker.on_step(3.0);
        let summary = tracker.on_episode_end();
        assert_eq!(summary.episode, 2);
        assert_eq!(summary.steps, 1);
        assert_eq!(summary.recent_mean, 2.0);
    }

    #[test]
    fn test_recent_window_drops_oldest() {
        let mut tracker = RecentReturns::new();
        for i in 0..150 {
            tracker.on_step(i as f32);
            tracker.on_episode_end();
            assert!(tracker.recent().len() <= RECENT_RETURNS_CAPACITY);
        }
        assert_eq!(tracker.episodes(), 150);
        assert_eq!(tracker.recent().len(), RECENT_RETURNS_CAPACITY);
        assert_eq!(tracker.recent().front(), Some(&50.0));
        assert_eq!(tracker.recent().back(), Some(&149.0));
    }

    #[test]
    fn test_summary_line() {
        let summary = EpisodeSummary {
            episode: 3,
            steps: 10,
            episode_return: 1.0,
            recent_mean: 0.5,
        };
        assert_eq!(format!("{}", summary), "Step: 10  Reward: 1  Recent Reward: 0.5");
    }
}
