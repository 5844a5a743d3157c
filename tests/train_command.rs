use clap::Parser;
use gridq::{
    cli::commands::train::{
        POLICY_FILE, Q_TABLE_FILE, REWARDS_FILE, SUMMARY_FILE, TrainArgs, TrainingSummaryFile,
        execute,
    },
    export::read_learning_curve,
};
use tempfile::tempdir;

fn parse_args<I, T>(args: I) -> TrainArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    TrainArgs::parse_from(args)
}

#[test]
fn train_writes_all_outputs() {
    let tmp = tempdir().unwrap();
    let out = tmp.path().join("run");

    let args = parse_args([
        "gridq-train",
        "--episodes",
        "60",
        "--width",
        "3",
        "--height",
        "3",
        "--seed",
        "7",
        "--output-dir",
        out.to_str().unwrap(),
    ]);
    execute(args).expect("training should succeed");

    for file in [Q_TABLE_FILE, REWARDS_FILE, POLICY_FILE, SUMMARY_FILE] {
        assert!(out.join(file).exists(), "missing {file}");
    }

    let rows = read_learning_curve(out.join(REWARDS_FILE)).unwrap();
    assert_eq!(rows.len(), 60);
    assert_eq!(rows[0].episode, 0);

    let policy = std::fs::read_to_string(out.join(POLICY_FILE)).unwrap();
    let lines: Vec<_> = policy.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with(" S "));
    assert!(lines[2].ends_with(" G "));

    let contents = std::fs::read_to_string(out.join(SUMMARY_FILE)).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["training"]["episodes"], 60);
    assert_eq!(parsed["config"]["grid"]["width"], 3);
    assert_eq!(parsed["config"]["agent"]["seed"], 7);
    assert!(parsed["evaluation"]["states"].is_array());

    let summary: TrainingSummaryFile = serde_json::from_str(&contents).unwrap();
    let rewards: Vec<f32> = rows.iter().map(|row| row.total_reward).collect();
    assert_eq!(summary.training.rewards, rewards);

    // 50-episode moving average over 60 episodes
    let smoothed = &summary.training.smoothed_rewards;
    assert_eq!(smoothed.len(), 11);
    for (start, value) in smoothed.iter().enumerate() {
        let expected = rewards[start..start + 50].iter().sum::<f32>() / 50.0;
        assert!((value - expected).abs() < 1e-4, "point {start}: {value} != {expected}");
    }

    let successes = rows.iter().filter(|row| row.reached_goal).count();
    assert_eq!(summary.metrics.successes, successes);
    assert_eq!(summary.metrics.episodes, 60);
}

#[test]
fn unreachable_goal_is_never_reported_as_reached() {
    let tmp = tempdir().unwrap();
    let out = tmp.path().join("capped");

    // The goal of a 5x5 grid is 8 steps away; every episode stops after 3.
    let args = parse_args([
        "gridq-train",
        "--episodes",
        "5",
        "--max-steps",
        "3",
        "--output-dir",
        out.to_str().unwrap(),
    ]);
    execute(args).unwrap();

    let rows = read_learning_curve(out.join(REWARDS_FILE)).unwrap();
    assert_eq!(rows.len(), 5);
    for row in &rows {
        assert_eq!(row.steps, 3);
        assert_eq!(row.total_reward, -3.0);
        assert!(!row.reached_goal);
    }

    let contents = std::fs::read_to_string(out.join(SUMMARY_FILE)).unwrap();
    let summary: TrainingSummaryFile = serde_json::from_str(&contents).unwrap();
    assert_eq!(summary.metrics.successes, 0);
    assert_eq!(summary.metrics.success_rate, 0.0);
    assert!(!summary.evaluation.reached_goal);
}

#[test]
fn config_file_is_overridden_by_flags() {
    let tmp = tempdir().unwrap();
    let config_path = tmp.path().join("run.json");
    std::fs::write(
        &config_path,
        r#"{ "grid": { "width": 4, "height": 2, "obstacles": [{ "x": 1, "y": 0 }] },
            "training": { "episodes": 500 } }"#,
    )
    .unwrap();
    let out = tmp.path().join("out");

    let args = parse_args([
        "gridq-train",
        "--config",
        config_path.to_str().unwrap(),
        "--episodes",
        "10",
        "--output-dir",
        out.to_str().unwrap(),
    ]);
    execute(args).unwrap();

    let contents = std::fs::read_to_string(out.join(SUMMARY_FILE)).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["training"]["episodes"], 10);
    assert_eq!(parsed["config"]["grid"]["width"], 4);
    assert_eq!(parsed["config"]["grid"]["obstacles"][0]["x"], 1);

    let policy = std::fs::read_to_string(out.join(POLICY_FILE)).unwrap();
    assert!(policy.lines().next().unwrap().contains(" X "));
}

#[test]
fn invalid_grid_is_reported() {
    let tmp = tempdir().unwrap();
    let args = parse_args([
        "gridq-train",
        "--episodes",
        "1",
        "--obstacle",
        "4,4",
        "--output-dir",
        tmp.path().to_str().unwrap(),
    ]);
    let err = execute(args).unwrap_err();
    assert!(format!("{err:#}").contains("invalid grid configuration"));
}
