//! Infrastructure layer module
//!
//! This module contains the adapters behind the domain ports:
//! - Configuration loading and validation (process environment, figment)
//! - Logging infrastructure (tracing)
//! - SMTP mail client (lettre)

pub mod config;
pub mod logging;
pub mod mailer;
