//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the interfaces the relay core depends on:
//! - EnvSource: environment-style key/value lookup
//! - MailClient: the host's mail-client handle
//! - MailHost: the host's event system
//!
//! These traits keep the core independent of the process environment, the SMTP
//! library and the host platform.

pub mod env_source;
pub mod mail_client;
pub mod mail_host;

pub use env_source::{EnvSource, MapEnv};
pub use mail_client::{DebugSink, MailClient};
pub use mail_host::{LoadedCallback, MailHost, MailerInitAction, SenderFilter};
