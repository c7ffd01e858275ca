//! Mail-client adapters
//!
//! The SMTP wire protocol is delegated to lettre.

pub mod lettre_client;

pub use lettre_client::{LettreMailer, SendReport};
