//! CSV export of per-episode learning curves
//!
//! One row per episode with the columns
//! `episode,total_reward,steps,epsilon,reached_goal`. The epsilon column holds
//! the rate after the episode's decay and is left empty for learners without an
//! exploration rate. `reached_goal` is false for episodes cut off by a step cap.

use std::{fs::File, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    ports::{EpisodeSummary, Observer},
};

/// A single row in the learning-curve CSV
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LearningCurveRow {
    pub episode: usize,
    pub total_reward: f32,
    pub steps: usize,
    pub epsilon: Option<f32>,
    pub reached_goal: bool,
}

impl From<&EpisodeSummary> for LearningCurveRow {
    fn from(summary: &EpisodeSummary) -> Self {
        Self {
            episode: summary.episode,
            total_reward: summary.total_reward,
            steps: summary.steps,
            epsilon: summary.epsilon,
            reached_goal: summary.reached_goal,
        }
    }
}

/// Observer that streams episode results to a CSV file
pub struct LearningCurveWriter {
    writer: csv::Writer<File>,
    rows: usize,
}

impl LearningCurveWriter {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            writer: csv::Writer::from_path(path)?,
            rows: 0,
        })
    }

    /// Number of rows written so far
    pub fn rows(&self) -> usize {
        self.rows
    }
}

impl Observer for LearningCurveWriter {
    fn on_episode_end(&mut self, summary: &EpisodeSummary) -> Result<()> {
        self.writer.serialize(LearningCurveRow::from(summary))?;
        self.rows += 1;
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Read a learning curve written by [`LearningCurveWriter`].
pub fn read_learning_curve<P: AsRef<Path>>(path: P) -> Result<Vec<LearningCurveRow>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rewards.csv");

        let mut writer = LearningCurveWriter::create(&path).unwrap();
        writer
            .on_episode_end(&EpisodeSummary {
                episode: 0,
                total_reward: -50.0,
                steps: 50,
                terminated: true,
                reached_goal: false,
                epsilon: Some(0.5),
            })
            .unwrap();
        writer
            .on_episode_end(&EpisodeSummary {
                episode: 1,
                total_reward: 7.0,
                steps: 4,
                terminated: true,
                reached_goal: true,
                epsilon: None,
            })
            .unwrap();
        writer.on_training_end().unwrap();
        assert_eq!(writer.rows(), 2);

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next(),
            Some("episode,total_reward,steps,epsilon,reached_goal")
        );
        assert_eq!(lines.next(), Some("0,-50.0,50,0.5,false"));
        assert_eq!(lines.next(), Some("1,7.0,4,,true"));

        let rows = read_learning_curve(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].epsilon, None);
        assert!(!rows[0].reached_goal);
        assert!(rows[1].reached_goal);
        assert_eq!(rows[0].total_reward, -50.0);
    }
}
