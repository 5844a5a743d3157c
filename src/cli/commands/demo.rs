//! Demo command - Replay a trained policy step by step

use std::{
    io::{self, Write},
    path::{Path, PathBuf},
    thread,
    time::Duration,
};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use crate::{
    cli::{
        config::{GridArgs, RunConfig},
        output::{print_kv, print_section},
    },
    gridworld::{GridWorld, render_ascii},
    pipeline::{Learner, RandomLearner},
    q_learning::QLearningAgent,
};

#[derive(Parser, Debug)]
#[command(about = "Replay a trained policy on the grid")]
pub struct DemoArgs {
    /// Q-table written by `gridq train`; a random policy is used when missing
    #[arg(long, default_value = "outputs/q_table.msgpack")]
    pub table: PathBuf,

    #[command(flatten)]
    pub grid: GridArgs,

    /// JSON run configuration; explicit flags take precedence
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Seed for the random fallback policy and tie-breaking [default: 42]
    #[arg(long)]
    pub seed: Option<u64>,

    /// Pause between frames in milliseconds
    #[arg(long, default_value_t = 0)]
    pub delay_ms: u64,
}

/// How a demo episode ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemoOutcome {
    pub steps: usize,
    pub total_reward: f32,
    pub reached_goal: bool,
}

/// Greedy agent from `table`, or a uniformly random learner when the file
/// does not exist.
pub fn load_learner(
    table: &Path,
    env: &GridWorld,
    config: &RunConfig,
) -> Result<Box<dyn Learner>> {
    let seed = config.agent.seed.unwrap_or(42);

    if !table.exists() {
        warn!(path = %table.display(), "no trained table found, using a random policy");
        return Ok(Box::new(RandomLearner::with_seed(
            "Random",
            env.n_actions(),
            seed,
        )));
    }

    let agent_config = config.agent.to_agent_config().with_epsilon(0.0).with_seed(seed);
    let mut agent = QLearningAgent::new(env.n_states(), env.n_actions(), agent_config)?;
    agent
        .load(table)
        .with_context(|| format!("failed to load Q-table from {}", table.display()))?;
    info!(path = %table.display(), "loaded trained table");
    Ok(Box::new(agent))
}

/// Play one greedy episode, writing an ASCII frame after every step.
pub fn play_episode<W: Write>(
    env: &mut GridWorld,
    learner: &mut dyn Learner,
    delay: Duration,
    out: &mut W,
) -> Result<DemoOutcome> {
    let mut state = env.reset();
    let mut total_reward = 0.0;
    let mut reached_goal = false;

    writeln!(out, "{}\n", render_ascii(env))?;

    loop {
        let action = learner.select_action(state, true);
        let outcome = env.step_index(action)?;
        total_reward += outcome.reward;
        state = outcome.state;

        writeln!(
            out,
            "step {}: reward {:+.0}, total {:+.0}",
            outcome.info.steps, outcome.reward, total_reward
        )?;
        writeln!(out, "{}\n", render_ascii(env))?;

        if !delay.is_zero() {
            thread::sleep(delay);
        }

        if outcome.done {
            reached_goal = !outcome.truncated;
            break;
        }
    }

    Ok(DemoOutcome {
        steps: env.steps(),
        total_reward,
        reached_goal,
    })
}

pub fn execute(args: DemoArgs) -> Result<()> {
    let mut config = RunConfig::load_or_default(args.config.as_deref())?;
    args.grid.apply(&mut config.grid);
    if let Some(seed) = args.seed {
        config.agent.seed = Some(seed);
    }

    let mut env =
        GridWorld::new(config.grid.to_grid_config()).context("invalid grid configuration")?;
    let mut learner = load_learner(&args.table, &env, &config)?;

    print_section(&format!("Demo: {}", learner.name()));
    let stdout = io::stdout();
    let outcome = play_episode(
        &mut env,
        learner.as_mut(),
        Duration::from_millis(args.delay_ms),
        &mut stdout.lock(),
    )?;

    print_kv("Steps", &outcome.steps.to_string());
    print_kv("Total reward", &format!("{:.1}", outcome.total_reward));
    print_kv("Reached goal", &outcome.reached_goal.to_string());

    Ok(())
}
