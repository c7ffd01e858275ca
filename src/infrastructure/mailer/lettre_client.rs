use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::{Credentials, Mechanism};
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use std::fmt;
use tracing::{info, instrument};

use crate::domain::error::MailerError;
use crate::domain::models::{DebugLevel, SecureMode, TlsOptions};
use crate::domain::ports::{DebugSink, MailClient};

/// Outcome of a delivered message as reported by the relay
#[derive(Debug, Clone, Serialize)]
pub struct SendReport {
    pub code: String,
    pub message: Vec<String>,
}

/// [`MailClient`] backed by lettre's async SMTP transport
///
/// The transport initializer assigns settings through the trait; the transport
/// itself is only built when a message is sent.
#[derive(Default)]
pub struct LettreMailer {
    smtp: bool,
    host: Option<String>,
    port: Option<u16>,
    credentials: Option<(String, SecretString)>,
    secure: SecureMode,
    tls_options: TlsOptions,
    from: Option<(String, String)>,
    debug_level: DebugLevel,
    debug_sink: Option<DebugSink>,
}

impl LettreMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn is_smtp(&self) -> bool {
        self.smtp
    }

    /// Port to connect to: the assigned one, or the conventional port for the mode
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(match self.secure {
            SecureMode::Ssl => 465,
            SecureMode::Tls => 587,
            SecureMode::None => 25,
        })
    }

    /// Build the SMTP transport from the assigned settings
    pub fn build_transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, MailerError> {
        if !self.smtp {
            return Err(MailerError::NotSmtp);
        }
        let host = self.host.as_deref().ok_or(MailerError::MissingHost)?;

        let tls = match self.secure {
            SecureMode::Ssl => Tls::Wrapper(self.tls_parameters(host)?),
            SecureMode::Tls => Tls::Required(self.tls_parameters(host)?),
            SecureMode::None => Tls::Opportunistic(self.tls_parameters(host)?),
        };

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
            .port(self.port())
            .tls(tls);

        if let Some((user, pass)) = &self.credentials {
            builder = builder
                .credentials(Credentials::new(
                    user.clone(),
                    pass.expose_secret().clone(),
                ))
                .authentication(vec![Mechanism::Plain, Mechanism::Login]);
        }

        Ok(builder.build())
    }

    /// Configured sender as a mailbox
    pub fn sender(&self) -> Result<Mailbox, MailerError> {
        let (email, name) = self.from.as_ref().ok_or(MailerError::MissingSender)?;
        let address = parse_address(email)?;
        let name = (!name.is_empty()).then(|| name.clone());
        Ok(Mailbox::new(name, address))
    }

    /// Send a single plain-text message from the configured sender
    #[instrument(skip(self, body), fields(host = ?self.host, port = self.port()))]
    pub async fn send_text(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<SendReport, MailerError> {
        let transport = self.build_transport()?;
        let from = self.sender()?;
        let recipient = Mailbox::new(None, parse_address(to)?);

        let message = Message::builder()
            .from(from.clone())
            .to(recipient)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| MailerError::Message(e.to_string()))?;

        for line in self.send_summary(&from, to) {
            self.emit(DebugLevel::Client, &line);
        }

        match transport.send(message).await {
            Ok(response) => {
                let report = SendReport {
                    code: response.code().to_string(),
                    message: response.message().map(ToString::to_string).collect(),
                };
                self.emit(
                    DebugLevel::Server,
                    &format!("relay reply: {} {}", report.code, report.message.join(" ")),
                );
                info!(code = %report.code, "Message accepted by relay");
                Ok(report)
            }
            Err(err) => {
                self.emit(DebugLevel::Server, &format!("relay error: {err}"));
                Err(MailerError::Delivery(err.to_string()))
            }
        }
    }

    /// Description of the delivery about to be attempted
    ///
    /// The transport negotiates the session itself, so these lines describe
    /// what was requested rather than the exchanged commands.
    fn send_summary(&self, from: &Mailbox, to: &str) -> Vec<String> {
        let mut lines = vec![format!(
            "send summary: relay {}:{} secure={:?}",
            self.host.as_deref().unwrap_or_default(),
            self.port(),
            self.secure.as_str()
        )];
        if let Some((user, _)) = &self.credentials {
            lines.push(format!("send summary: credentials for {user} offered if the relay asks"));
        }
        lines.push(format!("send summary: envelope <{}> -> <{to}>", from.email));
        lines
    }

    fn tls_parameters(&self, host: &str) -> Result<TlsParameters, MailerError> {
        let accept_invalid_certs =
            !self.tls_options.verify_peer || self.tls_options.allow_self_signed;
        TlsParameters::builder(host.to_string())
            .dangerous_accept_invalid_certs(accept_invalid_certs)
            .dangerous_accept_invalid_hostnames(!self.tls_options.verify_peer_name)
            .build()
            .map_err(|e| MailerError::Tls(e.to_string()))
    }

    fn emit(&self, level: DebugLevel, message: &str) {
        if self.debug_level >= level {
            if let Some(sink) = &self.debug_sink {
                sink(message, level);
            }
        }
    }
}

fn parse_address(value: &str) -> Result<Address, MailerError> {
    value
        .parse::<Address>()
        .map_err(|e| MailerError::InvalidAddress {
            address: value.to_string(),
            reason: e.to_string(),
        })
}

impl MailClient for LettreMailer {
    fn use_smtp(&mut self) {
        self.smtp = true;
    }

    fn set_host(&mut self, host: &str) {
        self.host = Some(host.to_string());
    }

    fn set_port(&mut self, port: u16) {
        self.port = Some(port);
    }

    fn set_auth(&mut self, user: &str, pass: &SecretString) {
        self.credentials = Some((user.to_string(), pass.clone()));
    }

    fn set_secure(&mut self, mode: SecureMode) {
        self.secure = mode;
    }

    fn set_tls_options(&mut self, options: TlsOptions) {
        self.tls_options = options;
    }

    fn set_from(&mut self, email: &str, name: &str) {
        self.from = Some((email.to_string(), name.to_string()));
    }

    fn set_debug(&mut self, level: DebugLevel, sink: DebugSink) {
        self.debug_level = level;
        self.debug_sink = Some(sink);
    }
}

impl fmt::Debug for LettreMailer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LettreMailer")
            .field("smtp", &self.smtp)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.credentials.as_ref().map(|(user, _)| user))
            .field("secure", &self.secure)
            .field("tls_options", &self.tls_options)
            .field("from", &self.from)
            .field("debug_level", &self.debug_level)
            .finish_non_exhaustive()
    }
}
