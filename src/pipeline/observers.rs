//! Observer implementations for training pipelines
//!
//! Observers allow composable data collection during training without coupling
//! the training loop to specific output formats.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    Result,
    ports::{EpisodeSummary, Observer, Transition},
    utils::mean,
};

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    recent: Vec<f32>,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            recent: Vec::new(),
        }
    }

    fn message(&self, epsilon: Option<f32>) -> String {
        match epsilon {
            Some(epsilon) => format!("avg reward {:.2}, eps {epsilon:.3}", mean(&self.recent)),
            None => format!("avg reward {:.2}", mean(&self.recent)),
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
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, summary: &EpisodeSummary) -> Result<()> {
        if self.recent.len() == 100 {
            self.recent.remove(0);
        }
        self.recent.push(summary.total_reward);

        if let Some(pb) = &self.progress_bar {
            pb.set_position(summary.episode as u64 + 1);
            pb.set_message(self.message(summary.epsilon));
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message(None));
        }
        Ok(())
    }
}

/// Logging observer - emits a progress line every `interval` episodes
pub struct LoggingObserver {
    interval: usize,
    total_episodes: usize,
}

impl LoggingObserver {
    /// An `interval` of zero disables logging.
    pub fn new(interval: usize) -> Self {
        Self {
            interval,
            total_episodes: 0,
        }
    }
}

impl Observer for LoggingObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        self.total_episodes = total_episodes;
        Ok(())
    }

    fn on_episode_end(&mut self, summary: &EpisodeSummary) -> Result<()> {
        let episode = summary.episode + 1;
        if self.interval > 0 && episode.is_multiple_of(self.interval) {
            let eps = summary
                .epsilon
                .map_or_else(|| "n/a".to_string(), |epsilon| format!("{epsilon:.3}"));
            info!(
                "Ep {}/{}: reward={:.2} eps={}",
                episode, self.total_episodes, summary.total_reward, eps
            );
        }
        Ok(())
    }
}

/// Metrics observer - Tracks training metrics
pub struct MetricsObserver {
    rewards: Vec<f32>,
    lengths: Vec<usize>,
    successes: usize,
    current_steps: usize,
}

impl MetricsObserver {
    pub fn new() -> Self {
        Self {
            rewards: Vec::new(),
            lengths: Vec::new(),
            successes: 0,
            current_steps: 0,
        }
    }

    /// Episodes that reached the goal
    pub fn successes(&self) -> usize {
        self.successes
    }

    /// Fraction of episodes that reached the goal
    pub fn success_rate(&self) -> f32 {
        if self.rewards.is_empty() {
            0.0
        } else {
            self.successes as f32 / self.rewards.len() as f32
        }
    }

    /// Get average episode length
    pub fn avg_episode_length(&self) -> f32 {
        if self.lengths.is_empty() {
            0.0
        } else {
            self.lengths.iter().sum::<usize>() as f32 / self.lengths.len() as f32
        }
    }

    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            episodes: self.rewards.len(),
            mean_reward: mean(&self.rewards),
            avg_episode_length: self.avg_episode_length(),
            successes: self.successes,
            success_rate: self.success_rate(),
        }
    }
}

/// Summary of training metrics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub episodes: usize,
    pub mean_reward: f32,
    pub avg_episode_length: f32,
    pub successes: usize,
    pub success_rate: f32,
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for MetricsObserver {
    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        self.current_steps = 0;
        Ok(())
    }

    fn on_step(&mut self, _episode: usize, _step: usize, _transition: &Transition) -> Result<()> {
        self.current_steps += 1;
        Ok(())
    }

    fn on_episode_end(&mut self, summary: &EpisodeSummary) -> Result<()> {
        self.rewards.push(summary.total_reward);
        self.lengths.push(self.current_steps);
        if summary.reached_goal {
            self.successes += 1;
        }
        Ok(())
    }
}

/// Shares an observer with the caller so its data can be read after the
/// pipeline that owns the boxed copy has finished.
pub struct SharedObserver<O> {
    inner: Arc<Mutex<O>>,
}

impl<O: Observer> SharedObserver<O> {
    /// Wrap `observer`, returning the pipeline side and the caller's handle.
    pub fn new(observer: O) -> (Self, Arc<Mutex<O>>) {
        let inner = Arc::new(Mutex::new(observer));
        let handle = Arc::clone(&inner);
        (Self { inner }, handle)
    }

    fn observer(&self) -> MutexGuard<'_, O> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<O: Observer> Observer for SharedObserver<O> {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        self.observer().on_training_start(total_episodes)
    }

    fn on_episode_start(&mut self, episode: usize) -> Result<()> {
        self.observer().on_episode_start(episode)
    }

    fn on_step(&mut self, episode: usize, step: usize, transition: &Transition) -> Result<()> {
        self.observer().on_step(episode, step, transition)
    }

    fn on_episode_end(&mut self, summary: &EpisodeSummary) -> Result<()> {
        self.observer().on_episode_end(summary)
    }

    fn on_training_end(&mut self) -> Result<()> {
        self.observer().on_training_end()
    }
}

/// One line of the JSONL episode log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    #[serde(flatten)]
    pub summary: EpisodeSummary,
    /// Actions taken, in order
    pub actions: Vec<usize>,
}

/// JSONL observer - Exports one JSON object per episode
pub struct JsonlObserver {
    writer: BufWriter<File>,
    current_actions: Vec<usize>,
}

impl JsonlObserver {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            current_actions: Vec::new(),
        })
    }
}

impl Observer for JsonlObserver {
    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        self.current_actions.clear();
        Ok(())
    }

    fn on_step(&mut self, _episode: usize, _step: usize, transition: &Transition) -> Result<()> {
        self.current_actions.push(transition.action);
        Ok(())
    }

    fn on_episode_end(&mut self, summary: &EpisodeSummary) -> Result<()> {
        let record = EpisodeRecord {
            summary: *summary,
            actions: std::mem::take(&mut self.current_actions),
        };
        serde_json::to_writer(&mut self.writer, &record)?;
        writeln!(&mut self.writer)?;
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(episode: usize, total_reward: f32, reached_goal: bool) -> EpisodeSummary {
        EpisodeSummary {
            episode,
            total_reward,
            steps: 0,
            terminated: true,
            reached_goal,
            epsilon: Some(0.1),
        }
    }

    fn transition(action: usize) -> Transition {
        Transition {
            state: 0,
            action,
            reward: -1.0,
            next_state: 1,
            done: false,
        }
    }

    #[test]
    fn test_metrics_observer() {
        let mut metrics = MetricsObserver::new();
        metrics.on_episode_start(0).unwrap();
        for step in 0..4 {
            metrics.on_step(0, step, &transition(1)).unwrap();
        }
        metrics.on_episode_end(&summary(0, 7.0, true)).unwrap();
        metrics.on_episode_start(1).unwrap();
        for step in 0..2 {
            metrics.on_step(1, step, &transition(0)).unwrap();
        }
        metrics.on_episode_end(&summary(1, -2.0, false)).unwrap();

        let stats = metrics.summary();
        assert_eq!(stats.episodes, 2);
        assert_eq!(stats.mean_reward, 2.5);
        assert_eq!(stats.avg_episode_length, 3.0);
        assert_eq!(stats.successes, 1);
        assert_eq!(stats.success_rate, 0.5);
    }

    #[test]
    fn test_shared_observer_exposes_data() {
        let (mut shared, handle) = SharedObserver::new(MetricsObserver::new());
        shared.on_episode_start(0).unwrap();
        shared.on_step(0, 0, &transition(2)).unwrap();
        shared.on_episode_end(&summary(0, 10.0, true)).unwrap();

        let metrics = handle.lock().unwrap();
        assert_eq!(metrics.successes(), 1);
        assert_eq!(metrics.avg_episode_length(), 1.0);
    }

    #[test]
    fn test_jsonl_observer_writes_one_line_per_episode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("episodes.jsonl");

        let mut observer = JsonlObserver::new(&path).unwrap();
        observer.on_training_start(2).unwrap();
        for episode in 0..2 {
            observer.on_episode_start(episode).unwrap();
            observer.on_step(episode, 0, &transition(2)).unwrap();
            observer.on_step(episode, 1, &transition(1)).unwrap();
            observer
                .on_episode_end(&summary(episode, 8.0, true))
                .unwrap();
        }
        observer.on_training_end().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let records: Vec<EpisodeRecord> = contents
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].summary.episode, 1);
        assert_eq!(records[1].actions, vec![2, 1]);
    }
}
