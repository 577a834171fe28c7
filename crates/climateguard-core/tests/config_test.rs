//! Config loading: partial TOML files fall back to defaults section by section.

use std::io::Write;

use chrono::TimeDelta;
use climateguard_core::config::{ClimateGuardConfig, EstimationConfig, LedgerConfig};
use climateguard_core::ClimateGuardError;

// ═══════════════════════════════════════════════════════════════════════════
// Defaults
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn empty_toml_yields_defaults() {
    let config = ClimateGuardConfig::from_toml("").unwrap();
    assert_eq!(config, ClimateGuardConfig::default());
    assert_eq!(config.ledger.history_cap, 100);
    assert_eq!(config.ledger.recent_window_secs, 300);
    assert_eq!(config.ledger.retention_days, 7);
    assert_eq!(config.ledger.prune_interval_secs, 3600);
    assert_eq!(config.runtime.poll_interval_ms, 2000);
    assert_eq!(config.runtime.activity_cap, 20);
    assert_eq!(config.estimation.timeout_ms, 10_000);
    assert_eq!(config.estimation.api_key_env, "CLIMATIQ_API_KEY");
    assert!(config.storage.db_path.is_none());
}

#[test]
fn partial_section_keeps_other_fields() {
    let config = ClimateGuardConfig::from_toml(
        r#"
        [ledger]
        history_cap = 5

        [estimation]
        remote_enabled = false
        rng_seed = 42
        "#,
    )
    .unwrap();
    assert_eq!(config.ledger.history_cap, 5);
    assert_eq!(config.ledger.retention_days, 7);
    assert!(!config.estimation.remote_enabled);
    assert_eq!(config.estimation.rng_seed, Some(42));
    assert_eq!(config.estimation.currency, "usd");
}

#[test]
fn malformed_toml_is_an_error() {
    assert!(ClimateGuardConfig::from_toml("[ledger\nhistory_cap = ").is_err());
    assert!(ClimateGuardConfig::from_toml("[ledger]\nhistory_cap = \"lots\"").is_err());
}

// ═══════════════════════════════════════════════════════════════════════════
// Files
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn from_file_reads_toml() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[storage]\ndb_path = \"/tmp/cg.db\"\nbackground_writes = false").unwrap();
    let config = ClimateGuardConfig::from_file(file.path()).unwrap();
    assert_eq!(config.storage.db_path.as_deref(), Some("/tmp/cg.db"));
    assert!(!config.storage.background_writes);
}

#[test]
fn missing_file_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ClimateGuardConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ClimateGuardError::Config(_)));
}

// ═══════════════════════════════════════════════════════════════════════════
// Validation
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn defaults_validate() {
    assert!(ClimateGuardConfig::default().validate().is_ok());
}

#[test]
fn huge_retention_is_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[ledger]\nretention_days = 9223372036854775807").unwrap();
    let err = ClimateGuardConfig::from_file(file.path()).unwrap_err();
    assert!(matches!(err, ClimateGuardError::Config(ref m) if m.contains("retention_days")));
}

#[test]
fn negative_window_is_rejected() {
    let config = ClimateGuardConfig::from_toml("[ledger]\nrecent_window_secs = -5").unwrap();
    let err = config.validate().unwrap_err();
    assert!(matches!(err, ClimateGuardError::Config(ref m) if m.contains("recent_window_secs")));
}

#[test]
fn durations_saturate_instead_of_panicking() {
    let config = LedgerConfig {
        recent_window_secs: i64::MAX,
        retention_days: i64::MAX,
        ..LedgerConfig::default()
    };
    assert_eq!(config.recent_window(), TimeDelta::MAX);
    assert_eq!(config.retention(), TimeDelta::MAX);

    let negative = LedgerConfig {
        recent_window_secs: -1,
        retention_days: -1,
        ..LedgerConfig::default()
    };
    assert_eq!(negative.recent_window(), TimeDelta::zero());
    assert_eq!(negative.retention(), TimeDelta::zero());
}

// ═══════════════════════════════════════════════════════════════════════════
// Credential
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn credential_never_serialized() {
    let toml = toml::to_string(&ClimateGuardConfig::default()).unwrap();
    assert!(toml.contains("api_key_env"));
    assert!(!toml.contains("api_key ="));
}

#[test]
fn blank_credential_counts_as_absent() {
    let config = EstimationConfig {
        api_key_env: "CLIMATEGUARD_TEST_BLANK_KEY".into(),
        ..EstimationConfig::default()
    };
    std::env::set_var("CLIMATEGUARD_TEST_BLANK_KEY", "   ");
    assert_eq!(config.resolve_api_key(), None);
    std::env::set_var("CLIMATEGUARD_TEST_BLANK_KEY", "k-123");
    assert_eq!(config.resolve_api_key().as_deref(), Some("k-123"));
    std::env::remove_var("CLIMATEGUARD_TEST_BLANK_KEY");
}
