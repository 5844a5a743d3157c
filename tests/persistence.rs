mod common;

use gridq::{
    Error,
    adapters::InMemoryRepository,
    q_learning::{QLearningAgent, QLearningConfig},
};
use tempfile::tempdir;

#[test]
fn saved_table_reproduces_greedy_choices() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("q_table.msgpack");

    let mut env = common::three_by_three();
    let mut trained = common::default_agent(&env, 11);
    common::train(&mut env, &mut trained, 300, 11);
    trained.save(&path).unwrap();

    let mut from_file = common::default_agent(&env, 99);
    from_file.load(&path).unwrap();
    let mut from_memory = common::default_agent(&env, 99);
    from_memory
        .replace_table(trained.q_table().clone())
        .unwrap();

    assert_eq!(from_file.q_table(), trained.q_table());
    for state in 0..env.n_states() {
        assert_eq!(
            from_file.q_table().best_actions(state),
            trained.q_table().best_actions(state)
        );
        assert_eq!(
            from_file.select_action(state, true),
            from_memory.select_action(state, true)
        );
    }
}

#[test]
fn loading_a_table_of_another_shape_fails() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("q_table.msgpack");

    let env = common::three_by_three();
    common::default_agent(&env, 1).save(&path).unwrap();

    let mut smaller = QLearningAgent::new(4, 4, QLearningConfig::default()).unwrap();
    let err = smaller.load(&path).unwrap_err();
    assert!(matches!(
        err,
        Error::ShapeMismatch {
            expected: (4, 4),
            found: (9, 4)
        }
    ));
    assert!(smaller.q_table().values().iter().all(|&q| q == 0.0));
}

#[test]
fn missing_file_reports_io_error() {
    let tmp = tempdir().unwrap();
    let mut agent = QLearningAgent::new(4, 4, QLearningConfig::default()).unwrap();

    let err = agent.load(tmp.path().join("absent.msgpack")).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}

#[test]
fn in_memory_repository_round_trip() {
    let repo = InMemoryRepository::new();
    let key = std::path::Path::new("checkpoint");

    let mut agent = QLearningAgent::new(2, 4, QLearningConfig::default()).unwrap();
    agent.update(0, 3, 2.5, 1, true);
    agent.save_with(&repo, key).unwrap();

    let mut restored = QLearningAgent::new(2, 4, QLearningConfig::default()).unwrap();
    restored.load_with(&repo, key).unwrap();
    assert_eq!(restored.q_table(), agent.q_table());
}
