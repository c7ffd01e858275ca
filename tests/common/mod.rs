//! Common test utilities for integration tests
//!
//! Provides shared fixtures and a recording mail client used across
//! multiple integration test files.

use mailrelay::domain::models::{DebugLevel, SecureMode, TlsOptions};
use mailrelay::domain::ports::{DebugSink, MailClient, MapEnv};
use secrecy::{ExposeSecret, SecretString};
use std::io;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// Environment of a correctly configured site
#[allow(dead_code)]
pub fn site_env() -> MapEnv {
    MapEnv::from_pairs([
        ("EMAIL_FROM_NAME", "Site"),
        ("EMAIL_FROM_EMAIL", "no-reply@site.com"),
        ("SMTP_HOST", "smtp.example.com"),
        ("SMTP_PORT", "587"),
        ("SMTP_USER", "u"),
        ("SMTP_PASS", "p"),
        ("SMTP_SECURE", "tls"),
        ("SMTP_DEBUG", "0"),
    ])
}

/// Mail client double recording every assignment, named after the fields of a
/// classic mailer object
#[derive(Default)]
pub struct RecordingClient {
    pub is_smtp: bool,
    pub host: String,
    pub port: u16,
    pub smtp_auth: bool,
    pub username: String,
    pub password: String,
    pub smtp_secure: String,
    pub tls_options: Option<TlsOptions>,
    pub from: String,
    pub from_name: String,
    pub smtp_debug: u8,
    pub debug_output: Option<DebugSink>,
}

impl MailClient for RecordingClient {
    fn use_smtp(&mut self) {
        self.is_smtp = true;
    }

    fn set_host(&mut self, host: &str) {
        self.host = host.to_string();
    }

    fn set_port(&mut self, port: u16) {
        self.port = port;
    }

    fn set_auth(&mut self, user: &str, pass: &SecretString) {
        self.smtp_auth = true;
        self.username = user.to_string();
        self.password = pass.expose_secret().clone();
    }

    fn set_secure(&mut self, mode: SecureMode) {
        self.smtp_secure = mode.as_str().to_string();
    }

    fn set_tls_options(&mut self, options: TlsOptions) {
        self.tls_options = Some(options);
    }

    fn set_from(&mut self, email: &str, name: &str) {
        self.from = email.to_string();
        self.from_name = name.to_string();
    }

    fn set_debug(&mut self, level: DebugLevel, sink: DebugSink) {
        self.smtp_debug = level.as_u8();
        self.debug_output = Some(sink);
    }
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
#[allow(dead_code)]
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// In-memory log sink for asserting on emitted tracing events
#[derive(Clone, Default)]
#[allow(dead_code)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

#[allow(dead_code)]
impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` with a debug-level subscriber writing plain text into the returned buffer
#[allow(dead_code)]
pub fn capture_logs<F: FnOnce()>(f: F) -> String {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .finish();

    tracing::subscriber::with_default(subscriber, f);
    logs.contents()
}
