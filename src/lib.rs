//! Mailrelay - authenticated SMTP relay for host applications
//!
//! Mailrelay loads SMTP relay settings from the process environment, validates
//! them against a fixed schema, and attaches two callbacks to a host's event
//! system: a sender override and a transport initializer that points every mail
//! client the host constructs at the relay.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): relay models, errors and ports
//! - **Service Layer** (`services`): relay handler and in-process hook registry
//! - **Infrastructure Layer** (`infrastructure`): environment, figment settings,
//!   tracing, and the lettre SMTP client
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use mailrelay::domain::models::TlsPolicy;
//! use mailrelay::infrastructure::config::ProcessEnv;
//! use mailrelay::services::{install_on_load, HookRegistry};
//!
//! let mut host = HookRegistry::new();
//! install_on_load(&mut host, Arc::new(ProcessEnv), TlsPolicy::Strict);
//! host.finish_loading();
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::error::{ConfigError, MailerError, ValidationError, Violation};
pub use domain::models::{
    AppConfig, DebugLevel, MailRelayConfig, RelaySettings, SecureMode, TlsOptions, TlsPolicy,
};
pub use domain::ports::{EnvSource, MailClient, MailHost, MapEnv};
pub use infrastructure::config::{ConfigLoader, ConfigValidator, ProcessEnv};
pub use services::{install, install_on_load, HookRegistry, MailRelayHandler};
