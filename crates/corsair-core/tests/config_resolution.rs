//! End-to-end tests for run-configuration resolution.
//!
//! These drive the full load → resolve path through real files in a
//! temporary config directory.

use corsair_core::config::{ConfigError, RunConfig, loading};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs;
use std::path::Path;

const FULL_SOURCE: &str = r#"
[environment]
env_use_default = false
env_size = 10
env_nbr_enemies = 3
env_nbr_merchants = 4
env_epsilon_start = 1.0
env_epsilon_end = 0.05
env_epsilon_decay = 0.99
env_random_map = false
env_random_enemies = false
env_random_merchants = false
env_move_enemies_merchants = true
env_action_success_prob = 0.8
env_pirate_depth_of_view = 2
env_frozen_lake_state = false

[agent]
agent_discount_factor_gamma = 0.9
agent_stepsize_alpha = 0.1
agent_buffer_size = 100000
agent_batch_size = 64
agent_gamma = 0.99
agent_tau = 0.001
agent_learning_rate = 0.0005
agent_update_nn_every = 8
agent_update_mem_every = 4
agent_update_mem_par_every = 3000
agent_uniform_sampling = false

[experiment]
exp_max_nbr_of_steps = 100
exp_nbr_episodes = 500

[buffer]
buf_alpha = 0.5
buf_alpha_decay = 0.99
buf_beta = 0.5
buf_beta_growth = 1.001
"#;

fn write_source(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(format!("{name}.toml")), content).expect("Failed to write source");
}

fn resolve_from(dir: &Path, name: &str, seed: u64) -> Result<RunConfig, ConfigError> {
    let raw = loading::load_source_from(dir, name)?;
    RunConfig::resolve(&raw, &mut StdRng::seed_from_u64(seed))
}

#[test]
fn test_explicit_source_resolves_end_to_end() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    write_source(temp_dir.path(), "voyage", FULL_SOURCE);

    let config = resolve_from(temp_dir.path(), "voyage", 1).unwrap();

    assert_eq!(config.env.size, 10);
    assert_eq!(config.env.state_size, 25);
    assert_eq!(config.env.action_success_prob, 0.8);
    assert_eq!(config.agent.experiences_per_sampling, 32);
    assert_eq!(config.agent.update_mem_par_every, 3000);
    assert_eq!(config.experiment.max_nbr_of_steps, 100);
    assert_eq!(config.buffer.alpha, 0.5);
}

#[test]
fn test_frozen_lake_state_sizes_from_whole_map() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    write_source(
        temp_dir.path(),
        "frozen",
        &FULL_SOURCE.replace(
            "env_frozen_lake_state = false",
            "env_frozen_lake_state = true",
        ),
    );

    let config = resolve_from(temp_dir.path(), "frozen", 1).unwrap();
    assert_eq!(config.env.state_size, 100);
}

#[test]
fn test_default_mode_ignores_source_values() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    // Absurd values everywhere and most keys missing entirely; only
    // env_use_default may be read.
    write_source(
        temp_dir.path(),
        "defaulted",
        r#"
[environment]
env_use_default = true
env_size = 9999
env_nbr_enemies = 9999
"#,
    );

    let config = resolve_from(temp_dir.path(), "defaulted", 1).unwrap();
    assert_eq!(config, RunConfig::default());
}

#[test]
fn test_missing_source_is_soft_until_resolution() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");

    // Loading an absent source succeeds with an empty mapping.
    let raw = loading::load_source_from(temp_dir.path(), "absent").unwrap();
    assert!(raw.is_empty());

    // Resolution then fails on its first required read.
    let err = RunConfig::resolve(&raw, &mut StdRng::seed_from_u64(1)).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::MissingSection {
            section: "environment"
        }
    ));
}

#[test]
fn test_unparseable_source_is_a_hard_error() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    write_source(temp_dir.path(), "broken", "invalid toml [[[");

    let err = loading::load_source_from(temp_dir.path(), "broken").unwrap_err();
    assert!(matches!(err, ConfigError::SourceParse { .. }));
}

#[test]
fn test_missing_required_key_fails_with_section_and_key() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    write_source(
        temp_dir.path(),
        "partial",
        &FULL_SOURCE.replace("agent_batch_size = 64\n", ""),
    );

    let err = resolve_from(temp_dir.path(), "partial", 1).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::MissingKey {
            section: "agent",
            key: "agent_batch_size"
        }
    ));
    let rendered = err.to_string();
    assert!(rendered.contains("agent_batch_size"));
    assert!(rendered.contains("[agent]"));
}

#[test]
fn test_random_map_respects_documented_ranges() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    write_source(
        temp_dir.path(),
        "randomized",
        &FULL_SOURCE.replace("env_random_map = false", "env_random_map = true"),
    );

    for seed in 0..32 {
        let config = resolve_from(temp_dir.path(), "randomized", seed).unwrap();
        assert!((5..=100).contains(&config.env.size));
        assert!((1..=config.env.size).contains(&config.env.nbr_enemies));
        assert!((1..=config.env.size).contains(&config.env.nbr_merchants));
        // View-depth sizing does not depend on the redrawn map.
        assert_eq!(config.env.state_size, 25);
    }
}

#[test]
fn test_random_merchants_only_leaves_size_alone() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    write_source(
        temp_dir.path(),
        "merchants",
        &FULL_SOURCE.replace(
            "env_random_merchants = false",
            "env_random_merchants = true",
        ),
    );

    for seed in 0..16 {
        let config = resolve_from(temp_dir.path(), "merchants", seed).unwrap();
        assert_eq!(config.env.size, 10);
        assert_eq!(config.env.nbr_enemies, 3);
        assert!((1..=10).contains(&config.env.nbr_merchants));
    }
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    write_source(
        temp_dir.path(),
        "randomized",
        &FULL_SOURCE.replace("env_random_map = false", "env_random_map = true"),
    );

    let first = resolve_from(temp_dir.path(), "randomized", 42).unwrap();
    let second = resolve_from(temp_dir.path(), "randomized", 42).unwrap();
    assert_eq!(first, second);
}
