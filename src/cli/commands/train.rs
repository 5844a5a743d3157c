//! Train command - Train a Q-learning agent on a grid world

use std::{
    fs::{self, File},
    io::BufWriter,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use serde_json::to_writer_pretty;
use tracing::info;

use crate::{
    cli::{
        config::{GridArgs, RunConfig},
        output::{print_kv, print_section, print_stats_table, print_subsection, print_written},
    },
    export::LearningCurveWriter,
    gridworld::{Action, GridConfig, GridWorld, render_policy},
    pipeline::{
        JsonlObserver, LoggingObserver, MetricsObserver, MetricsSummary, ProgressObserver,
        Rollout, SharedObserver, TrainingConfig, TrainingPipeline, TrainingResult,
        greedy_rollout,
    },
    q_learning::QLearningAgent,
};

pub const Q_TABLE_FILE: &str = "q_table.msgpack";
pub const REWARDS_FILE: &str = "rewards.csv";
pub const POLICY_FILE: &str = "final_policy.txt";
pub const SUMMARY_FILE: &str = "training_summary.json";

/// Contents of `training_summary.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingSummaryFile {
    pub config: RunConfig,
    pub training: TrainingResult,
    pub metrics: MetricsSummary,
    pub evaluation: Rollout,
}

#[derive(Parser, Debug)]
#[command(about = "Train a Q-learning agent", allow_negative_numbers = true)]
pub struct TrainArgs {
    /// Number of training episodes [default: 1000]
    #[arg(long, short = 'e')]
    pub episodes: Option<usize>,

    #[command(flatten)]
    pub grid: GridArgs,

    /// Random seed for reproducibility [default: 42]
    #[arg(long)]
    pub seed: Option<u64>,

    /// Learning rate α [default: 0.1]
    #[arg(long)]
    pub learning_rate: Option<f32>,

    /// Discount factor γ [default: 0.99]
    #[arg(long)]
    pub discount: Option<f32>,

    /// Initial exploration rate ε [default: 0.3]
    #[arg(long)]
    pub epsilon: Option<f32>,

    /// Multiplicative ε decay applied after each episode [default: 0.995]
    #[arg(long)]
    pub epsilon_decay: Option<f32>,

    /// Lower bound for ε [default: 0.01]
    #[arg(long)]
    pub min_epsilon: Option<f32>,

    /// Episodes between progress log lines [default: episodes / 10]
    #[arg(long)]
    pub log_interval: Option<usize>,

    /// JSON run configuration; explicit flags take precedence
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory receiving the table, learning curve, policy and summary
    #[arg(long, short = 'O', default_value = "outputs")]
    pub output_dir: PathBuf,

    /// Optional file for per-episode JSONL observations
    #[arg(long)]
    pub observations: Option<PathBuf>,

    /// Show progress bar
    #[arg(long, default_value_t = false)]
    pub progress: bool,
}

impl TrainArgs {
    /// Merge the config file (if any) with the explicit flags.
    pub fn resolve(&self) -> Result<RunConfig> {
        let mut config = RunConfig::load_or_default(self.config.as_deref())?;

        self.grid.apply(&mut config.grid);
        if let Some(episodes) = self.episodes {
            config.training.episodes = episodes;
        }
        if let Some(seed) = self.seed {
            config.agent.seed = Some(seed);
        }
        if let Some(learning_rate) = self.learning_rate {
            config.agent.learning_rate = learning_rate;
        }
        if let Some(discount) = self.discount {
            config.agent.discount = discount;
        }
        if let Some(epsilon) = self.epsilon {
            config.agent.epsilon = epsilon;
        }
        if let Some(decay) = self.epsilon_decay {
            config.training.epsilon_decay = decay;
        }
        if let Some(min_epsilon) = self.min_epsilon {
            config.training.min_epsilon = min_epsilon;
        }
        if let Some(interval) = self.log_interval {
            config.training.log_interval = Some(interval);
        }

        Ok(config)
    }
}

/// Greedy action per cell as an arrow map.
pub fn policy_map(agent: &mut QLearningAgent, grid: &GridConfig) -> String {
    render_policy(grid, |state| {
        Action::try_from(agent.greedy_action(state)).unwrap_or(Action::Up)
    })
}

fn write_summary(path: &Path, summary: &TrainingSummaryFile) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create summary file {}", path.display()))?;
    to_writer_pretty(BufWriter::new(file), summary)
        .with_context(|| format!("failed to write summary to {}", path.display()))
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let config = args.resolve()?;
    let grid = config.grid.to_grid_config();

    let mut env = GridWorld::new(grid.clone()).context("invalid grid configuration")?;
    let mut agent = QLearningAgent::new(
        env.n_states(),
        env.n_actions(),
        config.agent.to_agent_config(),
    )
    .context("invalid agent configuration")?;

    let output_dir = &args.output_dir;
    fs::create_dir_all(output_dir).with_context(|| {
        format!("failed to create output directory {}", output_dir.display())
    })?;

    let training = TrainingConfig {
        episodes: config.training.episodes,
        max_steps_per_episode: grid.max_steps,
        seed: config.agent.seed,
        epsilon_schedule: config.training.epsilon_schedule(),
    };

    let rewards_path = output_dir.join(REWARDS_FILE);
    let (metrics_observer, metrics) = SharedObserver::new(MetricsObserver::new());
    let mut pipeline = TrainingPipeline::new(training)
        .with_observer(Box::new(LoggingObserver::new(
            config.training.log_interval(),
        )))
        .with_observer(Box::new(metrics_observer))
        .with_observer(Box::new(
            LearningCurveWriter::create(&rewards_path).with_context(|| {
                format!("failed to create learning curve {}", rewards_path.display())
            })?,
        ));
    if args.progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(path) = &args.observations {
        pipeline = pipeline.with_observer(Box::new(
            JsonlObserver::new(path)
                .with_context(|| format!("failed to create {}", path.display()))?,
        ));
    }

    print_section("Q-Learning Training");
    print_stats_table(&[
        ("Grid", format!("{}x{}", grid.width, grid.height)),
        ("Start", grid.start.to_string()),
        ("Goal", grid.goal.to_string()),
        ("Obstacles", grid.obstacles.len().to_string()),
        ("Episodes", config.training.episodes.to_string()),
        ("Seed", format!("{:?}", config.agent.seed)),
    ]);

    info!(
        episodes = config.training.episodes,
        width = grid.width,
        height = grid.height,
        "starting training"
    );
    let result = pipeline.run(&mut env, &mut agent).context("training failed")?;

    let evaluation = greedy_rollout(&mut env, &mut agent, grid.max_steps)
        .context("greedy evaluation failed")?;
    let policy = policy_map(&mut agent, &grid);

    let table_path = output_dir.join(Q_TABLE_FILE);
    agent
        .save(&table_path)
        .with_context(|| format!("failed to save Q-table to {}", table_path.display()))?;

    let policy_path = output_dir.join(POLICY_FILE);
    fs::write(&policy_path, format!("{policy}\n"))
        .with_context(|| format!("failed to write policy to {}", policy_path.display()))?;

    let summary_path = output_dir.join(SUMMARY_FILE);
    let metrics = metrics
        .lock()
        .map(|observer| observer.summary())
        .unwrap_or_else(|poisoned| poisoned.into_inner().summary());
    let summary = TrainingSummaryFile {
        config,
        training: result,
        metrics,
        evaluation,
    };
    write_summary(&summary_path, &summary)?;

    print_subsection("Results");
    print_stats_table(&[
        ("Mean reward", format!("{:.2}", summary.training.mean_reward)),
        (
            "Recent mean",
            format!("{:.2}", summary.training.recent_mean_reward),
        ),
        ("Final epsilon", format!("{:?}", summary.training.final_epsilon)),
        (
            "Success rate",
            format!(
                "{:.1}% ({} episodes)",
                summary.metrics.success_rate * 100.0,
                summary.metrics.successes
            ),
        ),
        ("Greedy steps", summary.evaluation.steps().to_string()),
        (
            "Greedy reward",
            format!("{:.1}", summary.evaluation.total_reward),
        ),
    ]);
    print_kv("Reached goal", &summary.evaluation.reached_goal.to_string());

    print_subsection("Greedy policy");
    println!("{policy}");

    print_subsection("Outputs");
    print_written("Q-table", &table_path);
    print_written("Learning curve", &rewards_path);
    print_written("Policy", &policy_path);
    print_written("Summary", &summary_path);

    Ok(())
}
