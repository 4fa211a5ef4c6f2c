//! Configuration validation.

use crate::schema::{Config, InputMode};

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_browser(config, &mut result);
        Self::validate_llm(config, &mut result);
        Self::validate_automation(config, &mut result);

        result
    }

    fn validate_browser(config: &Config, result: &mut ValidationResult) {
        if config.browser.debug_port == 0 {
            result.add_error(ValidationError::new("browser.debug_port", "Port cannot be 0"));
        }

        if config.browser.headless && config.voice.initial_mode == InputMode::Voice {
            result.add_warning(ValidationWarning::new(
                "browser.headless",
                "voice mode with a headless browser gives no visual feedback",
            ));
        }
    }

    fn validate_llm(config: &Config, result: &mut ValidationResult) {
        if !config.llm.is_enabled() {
            return;
        }

        if config.llm.provider != "gemini" {
            result.add_error(ValidationError::new(
                "llm.provider",
                format!("unsupported provider '{}'", config.llm.provider),
            ));
        }

        if config.llm.api_key.as_deref().is_none_or(str::is_empty) {
            result.add_warning(ValidationWarning::new(
                "llm.api_key",
                "no API key configured, LLM fallbacks are disabled",
            ));
        }

        if !(0.0..=2.0).contains(&config.llm.temperature) {
            result.add_error(ValidationError::new(
                "llm.temperature",
                "temperature must be between 0.0 and 2.0",
            ));
        }

        if config.llm.timeout_seconds == 0 {
            result.add_error(ValidationError::new(
                "llm.timeout_seconds",
                "timeout must be greater than 0",
            ));
        }
    }

    fn validate_automation(config: &Config, result: &mut ValidationResult) {
        let automation = &config.automation;

        if automation.max_retries == 0 {
            result.add_error(ValidationError::new(
                "automation.max_retries",
                "max_retries must be at least 1",
            ));
        }

        if automation.max_retries > 10 {
            result.add_warning(ValidationWarning::new(
                "automation.max_retries",
                "max_retries above 10 makes failed commands very slow",
            ));
        }

        if automation.element_timeout_ms == 0 || automation.navigation_timeout_ms == 0 {
            result.add_error(ValidationError::new(
                "automation",
                "element and navigation timeouts must be greater than 0",
            ));
        }

        if automation.element_timeout_ms < 500 {
            result.add_warning(ValidationWarning::new(
                "automation.element_timeout_ms",
                "element timeout below 500ms will miss slow renders",
            ));
        }

        if automation.max_history == 0 {
            result.add_error(ValidationError::new(
                "automation.max_history",
                "history capacity must be at least 1",
            ));
        }

        if !(0.0..=1.0).contains(&automation.fuzzy_threshold) {
            result.add_error(ValidationError::new(
                "automation.fuzzy_threshold",
                "threshold must be between 0.0 and 1.0",
            ));
        }

        if !automation.login_url.starts_with("http") {
            result.add_error(ValidationError::new(
                "automation.login_url",
                "login_url must be an absolute http(s) URL",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
