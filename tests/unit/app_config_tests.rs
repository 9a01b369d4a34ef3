/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use termbatch::app_config::{Config, LogLevel};

use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.api.endpoint, "https://www.wikidata.org/w/api.php");
    assert!(config.api.user_agent.starts_with("termbatch/"));
    assert!(config.api.access_token.is_empty());
    assert_eq!(config.api.timeout_secs, 30);
    assert_eq!(config.edit.summary, "");
    assert_eq!(config.edit.maxlag, 5);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();

    config.api.endpoint = "not a url".to_string();
    assert!(config.validate().is_err());

    config.api.endpoint = "ftp://example.org/w/api.php".to_string();
    assert!(config.validate().is_err());

    config.api.endpoint = "http://localhost:8080/w/api.php".to_string();
    assert!(config.validate().is_ok());

    config.api.user_agent = "  ".to_string();
    assert!(config.validate().is_err());
    config.api.user_agent = "test-agent".to_string();

    config.api.timeout_secs = 0;
    assert!(config.validate().is_err());
}

/// A user agent that cannot be sent as a header is rejected
#[test]
fn test_config_validation_withHeaderBreakingUserAgent_shouldFail() {
    let mut config = Config::default();
    config.api.user_agent = "termbatch/1.0\r\nX-Injected: yes".to_string();
    assert!(config.validate().is_err());

    config.api.user_agent = "termbatch/1.0 (https://example.org; ops@example.org)".to_string();
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_partialJson_shouldFillDefaults() -> Result<()> {
    let config: Config = serde_json::from_str(
        r#"{"api": {"endpoint": "https://test.wikidata.org/w/api.php"}, "edit": {"summary": "batch"}, "log_level": "debug"}"#,
    )?;

    assert_eq!(config.api.endpoint, "https://test.wikidata.org/w/api.php");
    assert_eq!(config.api.timeout_secs, 30);
    assert_eq!(config.edit.summary, "batch");
    assert_eq!(config.edit.maxlag, 5);
    assert_eq!(config.log_level, LogLevel::Debug);

    let options = config.edit.options();
    assert_eq!(options.summary, "batch");
    assert_eq!(options.maxlag, 5);
    Ok(())
}

#[test]
fn test_config_loadOrCreate_missingFile_shouldWriteDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let created = Config::load_or_create(&path)?;
    assert!(path.exists());

    let loaded = Config::load_or_create(&path)?;
    assert_eq!(loaded.api.endpoint, created.api.endpoint);
    assert_eq!(loaded.edit, created.edit);
    Ok(())
}

#[test]
fn test_config_loadOrCreate_invalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json")?;

    assert!(Config::load_or_create(&path).is_err());
    Ok(())
}

#[test]
fn test_logLevel_toLevelFilter_shouldMapEveryLevel() {
    assert_eq!(LogLevel::Error.to_level_filter(), log::LevelFilter::Error);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
}
