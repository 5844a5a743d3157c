//! Run configuration shared by the CLI commands
//!
//! A run is described by three sections that can be loaded from a JSON file.
//! Every field has a default, so a file only needs the values it changes:
//!
//! ```json
//! { "grid": { "width": 3, "height": 3 }, "training": { "episodes": 2000 } }
//! ```

use std::{fs::File, io::BufReader, path::Path, str::FromStr};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::{
    gridworld::{GridConfig, Position},
    q_learning::{EpsilonSchedule, QLearningConfig},
};

/// Environment layout section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSection {
    pub width: usize,
    pub height: usize,
    /// Defaults to the top-left corner
    pub start: Option<Position>,
    /// Defaults to the bottom-right corner
    pub goal: Option<Position>,
    pub max_steps: usize,
    pub obstacles: Vec<Position>,
}

impl Default for GridSection {
    fn default() -> Self {
        let defaults = GridConfig::default();
        Self {
            width: defaults.width,
            height: defaults.height,
            start: None,
            goal: None,
            max_steps: defaults.max_steps,
            obstacles: Vec::new(),
        }
    }
}

impl GridSection {
    pub fn to_grid_config(&self) -> GridConfig {
        let mut config = GridConfig::new(self.width, self.height)
            .with_max_steps(self.max_steps)
            .with_obstacles(self.obstacles.iter().copied());
        if let Some(start) = self.start {
            config = config.with_start(start);
        }
        if let Some(goal) = self.goal {
            config = config.with_goal(goal);
        }
        config
    }
}

/// Agent hyperparameter section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSection {
    pub learning_rate: f32,
    pub discount: f32,
    pub epsilon: f32,
    pub seed: Option<u64>,
}

impl Default for AgentSection {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            discount: 0.99,
            epsilon: 0.3,
            seed: Some(42),
        }
    }
}

impl AgentSection {
    pub fn to_agent_config(&self) -> QLearningConfig {
        let config = QLearningConfig::new(self.learning_rate, self.discount, self.epsilon);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

/// Training schedule section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingSection {
    pub episodes: usize,
    pub epsilon_decay: f32,
    pub min_epsilon: f32,
    /// Episodes between progress log lines; defaults to a tenth of the run
    pub log_interval: Option<usize>,
}

impl Default for TrainingSection {
    fn default() -> Self {
        Self {
            episodes: 1000,
            epsilon_decay: 0.995,
            min_epsilon: 0.01,
            log_interval: None,
        }
    }
}

impl TrainingSection {
    pub fn epsilon_schedule(&self) -> EpsilonSchedule {
        EpsilonSchedule::exponential(self.epsilon_decay, self.min_epsilon)
    }

    pub fn log_interval(&self) -> usize {
        self.log_interval.unwrap_or((self.episodes / 10).max(1))
    }
}

/// Complete description of a training or demo run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub grid: GridSection,
    pub agent: AgentSection,
    pub training: TrainingSection,
}

impl RunConfig {
    /// Load a JSON run configuration.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("failed to open config file {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Defaults, or the contents of `path` when given.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}

/// Grid flags shared by `train` and `demo`; each one overrides the config file.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct GridArgs {
    /// Grid width [default: 5]
    #[arg(long)]
    pub width: Option<usize>,

    /// Grid height [default: 5]
    #[arg(long)]
    pub height: Option<usize>,

    /// Episode step cap [default: 50]
    #[arg(long)]
    pub max_steps: Option<usize>,

    /// Obstacle cell as `x,y` (repeatable)
    #[arg(long = "obstacle", value_name = "X,Y")]
    pub obstacles: Vec<CellArg>,
}

impl GridArgs {
    pub fn apply(&self, grid: &mut GridSection) {
        if let Some(width) = self.width {
            grid.width = width;
        }
        if let Some(height) = self.height {
            grid.height = height;
        }
        if let Some(max_steps) = self.max_steps {
            grid.max_steps = max_steps;
        }
        if !self.obstacles.is_empty() {
            grid.obstacles = self.obstacles.iter().map(|cell| cell.0).collect();
        }
    }
}

/// A grid cell given on the command line as `x,y`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellArg(pub Position);

impl FromStr for CellArg {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        let (x, y) = value
            .split_once(',')
            .ok_or_else(|| anyhow!("expected a cell as 'x,y', got '{value}'"))?;
        let x = x
            .trim()
            .parse()
            .with_context(|| format!("invalid x coordinate in '{value}'"))?;
        let y = y
            .trim()
            .parse()
            .with_context(|| format!("invalid y coordinate in '{value}'"))?;
        Ok(Self(Position::new(x, y)))
    }
}
