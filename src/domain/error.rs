use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A single schema violation found while validating relay settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Field path, e.g. `port` or `ssl.verify_peer`
    pub field: String,

    /// Human-readable reason
    pub message: String,

    /// Offending value as read from the environment. Always `None` for secrets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Violation {
    pub fn new(field: impl Into<String>, message: impl Into<String>, value: Option<&str>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: value.map(ToString::to_string),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}: {} (got {value:?})", self.field, self.message),
            None => write!(f, "{}: {}", self.field, self.message),
        }
    }
}

fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Aggregate validation failure carrying every violation, not just the first
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid SMTP configuration: {}", format_violations(.violations))]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

impl ValidationError {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Field paths of all violations, in schema order
    pub fn fields(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.field.as_str()).collect()
    }
}

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    InvalidRelay(#[from] ValidationError),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),
}

/// Errors raised while turning relay settings into a live SMTP transport
#[derive(Error, Debug)]
pub enum MailerError {
    #[error("Mail client is not in SMTP mode")]
    NotSmtp,

    #[error("SMTP host has not been configured")]
    MissingHost,

    #[error("Sender identity has not been configured")]
    MissingSender,

    #[error("Invalid mailbox {address:?}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("Failed to build message: {0}")]
    Message(String),

    #[error("TLS setup failed: {0}")]
    Tls(String),

    #[error("SMTP delivery failed: {0}")]
    Delivery(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_lists_every_violation() {
        let err = ValidationError::new(vec![
            Violation::new("host", "This value is not a valid IP address or hostname.", Some("bad host")),
            Violation::new("pass", "This value should not be blank.", None),
        ]);

        let message = err.to_string();
        assert!(message.starts_with("Invalid SMTP configuration"));
        assert!(message.contains("host: This value is not a valid IP address or hostname. (got \"bad host\")"));
        assert!(message.contains("pass: This value should not be blank."));
        assert_eq!(err.fields(), vec!["host", "pass"]);
    }

    #[test]
    fn test_config_error_is_transparent_over_validation() {
        let err: ConfigError = ValidationError::new(vec![Violation::new("port", "bad", None)]).into();
        assert_eq!(err.to_string(), "Invalid SMTP configuration: port: bad");
    }
}
