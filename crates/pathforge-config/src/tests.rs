//! Tests for planner configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        name = "QRRT"
        stop_level = 2
        random_seed = 42

        [termination]
        seconds_spent_limit = 30
        quantum_count_limit = 10000

        [qrrt]
        range = 0.5
        max_samples = 2000

        [params]
        goal_bias = "0.2"
    "#;

    let config = PlannerConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.name(), "QRRT");
    assert_eq!(config.stop_level, Some(2));
    assert_eq!(config.random_seed, Some(42));
    let termination = config.termination.clone().unwrap();
    assert_eq!(termination.seconds_spent_limit, Some(30));
    assert_eq!(termination.quantum_count_limit, Some(10000));
    assert_eq!(config.qrrt.range, Some(0.5));
    assert_eq!(config.qrrt.goal_bias, 0.05);
    assert_eq!(config.qrrt.max_samples, Some(2000));
    assert_eq!(config.params.get("goal_bias").map(String::as_str), Some("0.2"));
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        stop_level: 1
        random_seed: 42
        termination:
          milliseconds_spent_limit: 250
        qrrt:
          goal_bias: 0.1
    "#;

    let config = PlannerConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.stop_level, Some(1));
    assert_eq!(config.time_limit(), Some(Duration::from_millis(250)));
    assert_eq!(config.qrrt.goal_bias, 0.1);
}

#[test]
fn test_defaults() {
    let config = PlannerConfig::from_toml_str("").unwrap();
    assert_eq!(config.name(), DEFAULT_PLANNER_NAME);
    assert_eq!(config.stop_level, None);
    assert_eq!(config.time_limit(), None);
    assert_eq!(config.qrrt.goal_bias, 0.05);
    assert!(config.params.is_empty());
}

#[test]
fn test_rejects_goal_bias_out_of_range() {
    let err = PlannerConfig::from_toml_str("[qrrt]\ngoal_bias = 1.5\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_rejects_non_positive_range() {
    let err = PlannerConfig::from_yaml_str("qrrt:\n  range: 0.0\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = PlannerConfig::load("does/not/exist/planner.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_builder() {
    let config = PlannerConfig::new()
        .with_name("MultiQRRT")
        .with_stop_level(1)
        .with_random_seed(123)
        .with_termination_seconds(60)
        .with_quantum_count_limit(500)
        .with_param("range", "0.3");

    assert_eq!(config.name(), "MultiQRRT");
    assert_eq!(config.stop_level, Some(1));
    assert_eq!(config.level_seed(2), Some(125));
    assert_eq!(config.time_limit(), Some(Duration::from_secs(60)));
    let termination = config.termination.unwrap();
    assert_eq!(termination.quantum_count_limit, Some(500));
    assert!(!termination.is_unbounded());
    assert_eq!(config.params.len(), 1);
}

#[test]
fn test_combined_time_limit() {
    let termination = TerminationConfig {
        seconds_spent_limit: Some(2),
        milliseconds_spent_limit: Some(500),
        quantum_count_limit: None,
    };
    assert_eq!(termination.time_limit(), Some(Duration::from_millis(2500)));
    assert!(TerminationConfig::default().is_unbounded());
}

#[test]
fn test_huge_time_limit_saturates() {
    let config = PlannerConfig::from_toml_str(
        "[termination]\nseconds_spent_limit = 9223372036854775807\nmilliseconds_spent_limit = 9223372036854775807\n",
    )
    .unwrap();
    let limit = config.time_limit().unwrap();
    assert!(limit >= Duration::from_secs(9_223_372_036_854_775_807));

    let termination = TerminationConfig {
        seconds_spent_limit: Some(u64::MAX),
        milliseconds_spent_limit: Some(u64::MAX),
        quantum_count_limit: None,
    };
    assert_eq!(termination.time_limit(), Some(Duration::MAX));
}
