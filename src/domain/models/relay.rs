//! Relay configuration models
//!
//! `RelaySettings` is the raw record read from the environment; `MailRelayConfig`
//! is the typed value produced by a successful validation and never mutated after.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Transport security mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecureMode {
    /// No explicit security (`""`); STARTTLS is still used when the server offers it
    #[default]
    #[serde(rename = "")]
    None,
    /// STARTTLS on a plain connection (`"tls"`)
    Tls,
    /// Implicit TLS from the first byte (`"ssl"`)
    Ssl,
}

impl SecureMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Tls => "tls",
            Self::Ssl => "ssl",
        }
    }
}

impl FromStr for SecureMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(Self::None),
            "tls" => Ok(Self::Tls),
            "ssl" => Ok(Self::Ssl),
            other => Err(format!("unknown security mode: {other}")),
        }
    }
}

impl fmt::Display for SecureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transport debug verbosity
///
/// Levels are ordered, so `level >= DebugLevel::Client` reads naturally.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(into = "u8", try_from = "u8")]
pub enum DebugLevel {
    /// No transport output
    #[default]
    Off,
    /// Commands sent by the client
    Client,
    /// Client commands and server replies
    Server,
}

impl DebugLevel {
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Off => 0,
            Self::Client => 1,
            Self::Server => 2,
        }
    }
}

impl From<DebugLevel> for u8 {
    fn from(level: DebugLevel) -> Self {
        level.as_u8()
    }
}

impl TryFrom<u8> for DebugLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Off),
            1 => Ok(Self::Client),
            2 => Ok(Self::Server),
            other => Err(format!("unknown debug level: {other}")),
        }
    }
}

impl fmt::Display for DebugLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// Certificate checks applied to the TLS handshake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TlsOptions {
    pub verify_peer: bool,
    pub verify_peer_name: bool,
    pub allow_self_signed: bool,
}

impl TlsOptions {
    /// Full verification, no self-signed certificates
    pub const fn strict() -> Self {
        Self {
            verify_peer: true,
            verify_peer_name: true,
            allow_self_signed: false,
        }
    }

    pub const fn is_strict(&self) -> bool {
        self.verify_peer && self.verify_peer_name && !self.allow_self_signed
    }
}

impl Default for TlsOptions {
    fn default() -> Self {
        Self::strict()
    }
}

/// Whether the TLS verification flags may be set from the environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TlsPolicy {
    /// Flags are fixed to [`TlsOptions::strict`]; `SMTP_SSL_*` is never read
    #[default]
    Strict,
    /// Flags are read from `SMTP_SSL_*`, defaulting to the strict values
    Configurable,
}

impl FromStr for TlsPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "configurable" => Ok(Self::Configurable),
            other => Err(format!("unknown TLS policy: {other} (expected strict or configurable)")),
        }
    }
}

/// Raw TLS flag inputs, only populated under [`TlsPolicy::Configurable`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SslSettings {
    pub verify_peer: Option<String>,
    pub verify_peer_name: Option<String>,
    pub allow_self_signed: Option<String>,
}

/// Relay settings exactly as read from the environment, defaults applied
#[derive(Debug, Clone, Default)]
pub struct RelaySettings {
    pub from_name: Option<String>,
    pub from_email: Option<String>,
    pub host: Option<String>,
    pub port: Option<String>,
    pub user: Option<String>,
    pub pass: Option<SecretString>,
    pub secure: String,
    pub debug: String,
    /// `None` under [`TlsPolicy::Strict`]
    pub ssl: Option<SslSettings>,
}

/// Validated SMTP relay configuration
///
/// Only [`crate::infrastructure::config::ConfigValidator`] builds this value.
#[derive(Debug, Clone)]
pub struct MailRelayConfig {
    from_name: String,
    from_email: String,
    host: String,
    port: u16,
    user: String,
    pass: SecretString,
    secure: SecureMode,
    debug: DebugLevel,
    tls: TlsOptions,
}

impl MailRelayConfig {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        from_name: String,
        from_email: String,
        host: String,
        port: u16,
        user: String,
        pass: SecretString,
        secure: SecureMode,
        debug: DebugLevel,
        tls: TlsOptions,
    ) -> Self {
        Self {
            from_name,
            from_email,
            host,
            port,
            user,
            pass,
            secure,
            debug,
            tls,
        }
    }

    pub fn from_name(&self) -> &str {
        &self.from_name
    }

    pub fn from_email(&self) -> &str {
        &self.from_email
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub const fn port(&self) -> u16 {
        self.port
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub const fn pass(&self) -> &SecretString {
        &self.pass
    }

    pub const fn secure(&self) -> SecureMode {
        self.secure
    }

    pub const fn debug(&self) -> DebugLevel {
        self.debug
    }

    pub const fn tls(&self) -> TlsOptions {
        self.tls
    }
}
