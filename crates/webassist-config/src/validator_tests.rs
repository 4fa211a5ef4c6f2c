use super::*;

fn config_with_key() -> Config {
    let mut config = Config::default();
    config.llm.api_key = Some("key".to_string());
    config
}

#[test]
fn test_validate_default_config() {
    let result = ConfigValidator::validate(&config_with_key());
    assert!(result.is_valid());
    assert!(result.warnings.is_empty());
}

#[test]
fn test_missing_api_key_is_warning() {
    let result = ConfigValidator::validate(&Config::default());
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.path == "llm.api_key"));
}

#[test]
fn test_disabled_llm_skips_key_check() {
    let mut config = Config::default();
    config.llm.provider = "none".to_string();
    let result = ConfigValidator::validate(&config);
    assert!(result.warnings.iter().all(|w| w.path != "llm.api_key"));
}

#[test]
fn test_unsupported_provider() {
    let mut config = config_with_key();
    config.llm.provider = "mystery".to_string();
    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "llm.provider"));
}

#[test]
fn test_zero_retries_rejected() {
    let mut config = config_with_key();
    config.automation.max_retries = 0;
    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.path == "automation.max_retries"));
}

#[test]
fn test_zero_history_rejected() {
    let mut config = config_with_key();
    config.automation.max_history = 0;
    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "automation.max_history"));
}

#[test]
fn test_short_timeout_warning() {
    let mut config = config_with_key();
    config.automation.element_timeout_ms = 200;
    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.path == "automation.element_timeout_ms"));
}

#[test]
fn test_headless_voice_warning() {
    let mut config = config_with_key();
    config.browser.headless = true;
    config.voice.initial_mode = InputMode::Voice;
    let result = ConfigValidator::validate(&config);
    assert!(result.warnings.iter().any(|w| w.path == "browser.headless"));
}

#[test]
fn test_relative_login_url_rejected() {
    let mut config = config_with_key();
    config.automation.login_url = "/#/signin".to_string();
    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "automation.login_url"));
}

#[test]
fn test_error_display() {
    let err = ValidationError::new("automation.max_retries", "must be at least 1");
    assert_eq!(err.to_string(), "automation.max_retries: must be at least 1");
}
