//! Config tests. They mutate process env, so each runs serially.

use crate::config::RelayConfig;
use chrono::{NaiveTime, Timelike};
use relay_core::RelayError;
use serial_test::serial;
use std::env;
use std::io::Write;
use std::time::Duration;

const VARS: &[&str] = &[
    "BOT_TOKEN",
    "TOKEN_FILE",
    "ALLOWED_IDS_FILE",
    "LOG_FILE",
    "TELEGRAM_API_URL",
    "TELOXIDE_API_URL",
    "WORKING_UTC_OFFSET",
    "WORK_START",
    "WORK_END",
    "WORK_DAYS",
    "DRAIN_GRACE_SECS",
    "GREETING_HTML",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

fn relay_error(err: anyhow::Error) -> RelayError {
    err.downcast::<RelayError>().expect("expected a RelayError")
}

#[test]
#[serial]
fn test_load_config_with_defaults() {
    clear_env();
    env::set_var("BOT_TOKEN", "test_token");

    let config = RelayConfig::load(None).unwrap();

    assert_eq!(config.bot_token(), "test_token");
    assert!(config.telegram_api_url().is_none());
    assert_eq!(config.allowed_ids_file().to_str(), Some("allowed_ids.txt"));
    assert_eq!(config.log_file().to_str(), Some("logs/support-relay.log"));
    let policy = config.policy();
    assert_eq!(policy.offset().local_minus_utc(), 2 * 3600);
    assert_eq!(policy.start(), NaiveTime::from_hms_opt(8, 0, 0).unwrap());
    assert_eq!(policy.end(), NaiveTime::from_hms_opt(19, 0, 0).unwrap());
    assert_eq!(policy.weekdays().collect::<Vec<_>>(), [0, 1, 2, 3, 4, 5, 6]);
    assert_eq!(config.drain_grace(), Duration::from_secs(10));
    assert!(config.greeting_html().contains("Вітаю"));
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn test_load_config_with_custom_values() {
    clear_env();
    env::set_var("BOT_TOKEN", "custom_token");
    env::set_var("ALLOWED_IDS_FILE", "/etc/relay/staff.txt");
    env::set_var("WORKING_UTC_OFFSET", "+05:30");
    env::set_var("WORK_START", "09:15");
    env::set_var("WORK_END", "18:00:30");
    env::set_var("WORK_DAYS", "1, 2,3,4,5");
    env::set_var("DRAIN_GRACE_SECS", "60");
    env::set_var("GREETING_HTML", "<b>Hello</b>");

    let config = RelayConfig::load(None).unwrap();

    assert_eq!(config.allowed_ids_file().to_str(), Some("/etc/relay/staff.txt"));
    let policy = config.policy();
    assert_eq!(policy.offset().local_minus_utc(), 5 * 3600 + 30 * 60);
    assert_eq!(policy.start().minute(), 15);
    assert_eq!(policy.end().second(), 30);
    assert_eq!(policy.weekdays().collect::<Vec<_>>(), [1, 2, 3, 4, 5]);
    assert_eq!(config.drain_grace(), Duration::from_secs(60));
    assert_eq!(config.greeting_html(), "<b>Hello</b>");
    clear_env();
}

#[test]
#[serial]
fn test_token_precedence() {
    clear_env();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "file_token  \nsecond line ignored").unwrap();
    env::set_var("TOKEN_FILE", file.path());

    assert_eq!(RelayConfig::load(None).unwrap().bot_token(), "file_token");

    env::set_var("BOT_TOKEN", "env_token");
    assert_eq!(RelayConfig::load(None).unwrap().bot_token(), "env_token");

    let config = RelayConfig::load(Some("override_token".to_string())).unwrap();
    assert_eq!(config.bot_token(), "override_token");
    clear_env();
}

#[test]
#[serial]
fn test_missing_token_file_is_configuration_missing() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    env::set_var("TOKEN_FILE", dir.path().join("token.txt"));

    let err = relay_error(RelayConfig::load(None).err().unwrap());
    assert!(matches!(err, RelayError::ConfigurationMissing(_)));
    assert!(err.is_fatal());
    clear_env();
}

#[test]
#[serial]
fn test_empty_token_file_is_configuration_missing() {
    clear_env();
    let file = tempfile::NamedTempFile::new().unwrap();
    env::set_var("TOKEN_FILE", file.path());

    let err = relay_error(RelayConfig::load(None).err().unwrap());
    assert!(matches!(err, RelayError::ConfigurationMissing(_)));
    clear_env();
}

#[test]
#[serial]
fn test_malformed_hours_are_rejected() {
    for (var, value) in [
        ("WORK_DAYS", "mon,tue"),
        ("WORK_DAYS", "0,7"),
        ("WORK_START", "8am"),
        ("WORK_END", "07:00"),
        ("WORKING_UTC_OFFSET", "Kyiv"),
        ("DRAIN_GRACE_SECS", "-1"),
    ] {
        clear_env();
        env::set_var("BOT_TOKEN", "t");
        env::set_var(var, value);
        let err = relay_error(RelayConfig::load(None).err().unwrap());
        assert!(
            matches!(err, RelayError::ConfigurationMalformed(_)),
            "{}={} gave {:?}",
            var,
            value,
            err
        );
    }
    clear_env();
}

#[test]
#[serial]
fn test_validate_telegram_api_url_invalid() {
    clear_env();
    env::set_var("BOT_TOKEN", "test_token");
    env::set_var("TELEGRAM_API_URL", "not-a-valid-url");

    let config = RelayConfig::load(None).unwrap();
    assert!(config.validate().is_err());

    env::set_var("TELEGRAM_API_URL", "http://127.0.0.1:8081");
    assert!(RelayConfig::load(None).unwrap().validate().is_ok());
    clear_env();
}
