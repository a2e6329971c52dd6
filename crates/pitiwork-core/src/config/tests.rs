//! Tests for configuration module.

use super::*;

#[test_log::test]
fn test_defaults_apply_without_overrides() {
    let settings = Settings::from_toml_str("").unwrap();

    assert_eq!(settings.recurrence.max_iterations, DEFAULT_MAX_ITERATIONS);
    assert_eq!(settings.recurrence.horizon_years, DEFAULT_HORIZON_YEARS);
    assert_eq!(settings.logging.level, DEFAULT_LOG_LEVEL);
}

#[test_log::test]
fn test_toml_overrides_defaults() {
    let settings = Settings::from_toml_str(
        r#"
[recurrence]
max_iterations = 730

[logging]
level = "debug"
"#,
    )
    .unwrap();

    assert_eq!(settings.recurrence.max_iterations, 730);
    assert_eq!(settings.recurrence.horizon_years, DEFAULT_HORIZON_YEARS);
    assert_eq!(settings.logging.level, "debug");
}

#[test]
fn test_zero_iteration_cap_rejected() {
    let result = Settings::from_toml_str("[recurrence]\nmax_iterations = 0\n");
    assert!(result.is_err());
}

#[test]
fn test_recurrence_config_validate() {
    assert!(RecurrenceConfig::default().validate().is_ok());

    let config = RecurrenceConfig {
        max_iterations: 10,
        horizon_years: 0,
    };
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("horizon_years"));
}
