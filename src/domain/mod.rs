//! Domain layer for the mail relay
//!
//! This module contains the relay configuration models, error types and the
//! ports the core talks to.

pub mod error;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use error::{ConfigError, MailerError, ValidationError, Violation};
