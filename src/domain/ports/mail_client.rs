use secrecy::SecretString;
use std::sync::Arc;

use crate::domain::models::{DebugLevel, SecureMode, TlsOptions};

/// Receiver for a mail client's internal debug strings
pub type DebugSink = Arc<dyn Fn(&str, DebugLevel) + Send + Sync>;

/// Port trait for the host's mail-client handle
///
/// The transport initializer receives a mutable handle implementing this trait
/// each time the host constructs a mail client, and assigns every connection
/// parameter through it. The trait mirrors the public knobs of a typical SMTP
/// client: transport mode, server address, authentication, security, sender
/// identity, TLS verification and debug output.
///
/// Implementations:
/// - [`crate::infrastructure::mailer::LettreMailer`] builds a real `lettre`
///   SMTP transport from the assigned values
/// - test doubles record the assignments for inspection
pub trait MailClient {
    /// Switch the client from its default transport to SMTP
    fn use_smtp(&mut self);

    fn set_host(&mut self, host: &str);

    fn set_port(&mut self, port: u16);

    /// Enable SMTP authentication with the given credentials
    fn set_auth(&mut self, user: &str, pass: &SecretString);

    fn set_secure(&mut self, mode: SecureMode);

    fn set_tls_options(&mut self, options: TlsOptions);

    /// Envelope and header sender
    fn set_from(&mut self, email: &str, name: &str);

    /// Debug verbosity and where debug strings go
    fn set_debug(&mut self, level: DebugLevel, sink: DebugSink);
}
