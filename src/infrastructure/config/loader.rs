use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use secrecy::SecretString;
use std::path::Path;
use tracing::{error, info};

use super::validator::ConfigValidator;
use crate::domain::error::ConfigError;
use crate::domain::models::{AppConfig, MailRelayConfig, RelaySettings, SslSettings, TlsPolicy};
use crate::domain::ports::EnvSource;

pub const EMAIL_FROM_NAME: &str = "EMAIL_FROM_NAME";
pub const EMAIL_FROM_EMAIL: &str = "EMAIL_FROM_EMAIL";
pub const SMTP_HOST: &str = "SMTP_HOST";
pub const SMTP_PORT: &str = "SMTP_PORT";
pub const SMTP_USER: &str = "SMTP_USER";
pub const SMTP_PASS: &str = "SMTP_PASS";
pub const SMTP_SECURE: &str = "SMTP_SECURE";
pub const SMTP_DEBUG: &str = "SMTP_DEBUG";
pub const SMTP_SSL_VERIFY_PEER: &str = "SMTP_SSL_VERIFY_PEER";
pub const SMTP_SSL_VERIFY_PEER_NAME: &str = "SMTP_SSL_VERIFY_PEER_NAME";
pub const SMTP_SSL_ALLOW_SELF_SIGNED: &str = "SMTP_SSL_ALLOW_SELF_SIGNED";

/// Default application settings file, relative to the working directory
pub const DEFAULT_SETTINGS_FILE: &str = "mailrelay.yaml";

/// Prefix for application settings taken from the environment
pub const SETTINGS_ENV_PREFIX: &str = "MAILRELAY_";

/// Loads relay settings from the environment and application settings via figment
pub struct ConfigLoader;

impl ConfigLoader {
    /// Read the raw relay settings
    ///
    /// Never fails: absent values stay `None` and are reported by validation.
    /// `secure` defaults to `""` and `debug` to `"0"`. The `SMTP_SSL_*` flags
    /// are only read under [`TlsPolicy::Configurable`]. The password keeps its
    /// surrounding whitespace; only a pair of enclosing quotes is removed.
    pub fn read(env: &dyn EnvSource, policy: TlsPolicy) -> RelaySettings {
        let ssl = match policy {
            TlsPolicy::Strict => None,
            TlsPolicy::Configurable => Some(SslSettings {
                verify_peer: lookup(env, SMTP_SSL_VERIFY_PEER),
                verify_peer_name: lookup(env, SMTP_SSL_VERIFY_PEER_NAME),
                allow_self_signed: lookup(env, SMTP_SSL_ALLOW_SELF_SIGNED),
            }),
        };

        RelaySettings {
            from_name: lookup(env, EMAIL_FROM_NAME),
            from_email: lookup(env, EMAIL_FROM_EMAIL),
            host: lookup(env, SMTP_HOST),
            port: lookup(env, SMTP_PORT),
            user: lookup(env, SMTP_USER),
            pass: env.get(SMTP_PASS).map(|raw| SecretString::new(strip_quotes(&raw).to_string())),
            secure: lookup(env, SMTP_SECURE)
                .filter(|v| !v.is_empty())
                .unwrap_or_default(),
            debug: lookup(env, SMTP_DEBUG)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| "0".to_string()),
            ssl,
        }
    }

    /// Read and validate the relay configuration
    ///
    /// On failure an error event carrying every violation is emitted before the
    /// error is returned.
    pub fn load(env: &dyn EnvSource, policy: TlsPolicy) -> Result<MailRelayConfig, ConfigError> {
        let settings = Self::read(env, policy);

        match ConfigValidator::validate(&settings) {
            Ok(config) => {
                info!(
                    host = config.host(),
                    port = config.port(),
                    secure = %config.secure(),
                    debug = %config.debug(),
                    tls_strict = config.tls().is_strict(),
                    policy = ?policy,
                    "SMTP relay configuration loaded"
                );
                Ok(config)
            }
            Err(err) => {
                error!(
                    violation_count = err.violations.len(),
                    violations = %serde_json::to_string(&err.violations).unwrap_or_default(),
                    "Invalid SMTP configuration"
                );
                Err(err.into())
            }
        }
    }

    /// Load application settings with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. `mailrelay.yaml` in the working directory (optional)
    /// 3. Environment variables (`MAILRELAY_*` prefix, `__` for nesting)
    pub fn load_app() -> Result<AppConfig> {
        Self::load_app_from(Path::new(DEFAULT_SETTINGS_FILE))
    }

    /// Same as [`ConfigLoader::load_app`] with an explicit settings file
    pub fn load_app_from(path: impl AsRef<Path>) -> Result<AppConfig> {
        let config: AppConfig = Figment::new()
            .merge(Serialized::defaults(AppConfig::default()))
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed(SETTINGS_ENV_PREFIX).split("__"))
            .extract()
            .context(format!(
                "Failed to load settings from {}",
                path.as_ref().display()
            ))?;

        Self::validate_app(&config)?;
        Ok(config)
    }

    /// Validate application settings after loading
    pub fn validate_app(config: &AppConfig) -> Result<(), ConfigError> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        Ok(())
    }
}

/// Look up a value, trimming whitespace and one pair of matching quotes
fn lookup(env: &dyn EnvSource, key: &str) -> Option<String> {
    env.get(key).map(|raw| normalize(&raw))
}

fn normalize(raw: &str) -> String {
    strip_quotes(raw.trim()).to_string()
}

/// Remove one pair of matching surrounding quotes, leaving everything else intact
fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
