//! Mail relay handler
//!
//! Holds the validated relay configuration and implements the two host
//! callbacks: sender override and transport initialization.

use secrecy::ExposeSecret;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::domain::error::ConfigError;
use crate::domain::models::{FilterHook, MailRelayConfig, TlsPolicy};
use crate::domain::ports::{DebugSink, EnvSource, MailClient, MailHost};
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::logging::{transport_debug_sink, SecretScrubber};

/// Routes the host's outbound mail through the configured SMTP relay
pub struct MailRelayHandler {
    config: Arc<MailRelayConfig>,
    debug_sink: DebugSink,
}

impl fmt::Debug for MailRelayHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailRelayHandler")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl MailRelayHandler {
    /// Handler whose transport debug output goes to the tracing stream, scrubbed
    pub fn new(config: MailRelayConfig) -> Self {
        let scrubber = SecretScrubber::new()
            .with_smtp_credentials(config.user(), config.pass().expose_secret());
        Self::with_debug_sink(config, transport_debug_sink(scrubber))
    }

    pub fn with_debug_sink(config: MailRelayConfig, debug_sink: DebugSink) -> Self {
        Self {
            config: Arc::new(config),
            debug_sink,
        }
    }

    pub fn config(&self) -> &MailRelayConfig {
        &self.config
    }

    /// Sender identity to use for every outgoing message: `(name, email)`
    pub fn resolve_sender(&self) -> (&str, &str) {
        (self.config.from_name(), self.config.from_email())
    }

    /// Replacement for the host-proposed sender name; the proposal is ignored
    pub fn from_name_filter(&self, _proposed: &str) -> String {
        self.config.from_name().to_string()
    }

    /// Replacement for the host-proposed sender address; the proposal is ignored
    pub fn from_email_filter(&self, _proposed: &str) -> String {
        self.config.from_email().to_string()
    }

    /// Point a freshly constructed mail client at the relay
    #[instrument(skip(self, client), fields(host = self.config.host(), port = self.config.port()))]
    pub fn configure_transport(&self, client: &mut dyn MailClient) {
        let config = &self.config;

        client.use_smtp();
        client.set_tls_options(config.tls());
        client.set_host(config.host());
        client.set_port(config.port());
        client.set_auth(config.user(), config.pass());
        client.set_secure(config.secure());
        client.set_from(config.from_email(), config.from_name());
        client.set_debug(config.debug(), Arc::clone(&self.debug_sink));

        debug!(secure = %config.secure(), debug = %config.debug(), "Mail client configured for SMTP relay");
    }

    /// Attach the sender filters and the transport initializer to the host
    pub fn register(self: &Arc<Self>, host: &mut dyn MailHost) {
        let handler = Arc::clone(self);
        host.add_filter(
            FilterHook::MailFromName,
            Box::new(move |proposed: &str| handler.from_name_filter(proposed)),
        );

        let handler = Arc::clone(self);
        host.add_filter(
            FilterHook::MailFrom,
            Box::new(move |proposed: &str| handler.from_email_filter(proposed)),
        );

        let handler = Arc::clone(self);
        host.on_mailer_init(Box::new(move |client: &mut dyn MailClient| {
            handler.configure_transport(client);
        }));

        info!(
            from = self.config.from_email(),
            relay = %format!("{}:{}", self.config.host(), self.config.port()),
            "SMTP relay hooks registered"
        );
    }
}

/// Load the relay configuration and attach its hooks to the host
///
/// Returns `Ok(None)` without touching anything when no host is available. An
/// invalid configuration registers nothing, so the host keeps its default
/// transport.
pub fn install(
    host: Option<&mut dyn MailHost>,
    env: &dyn EnvSource,
    policy: TlsPolicy,
) -> Result<Option<Arc<MailRelayHandler>>, ConfigError> {
    let Some(host) = host else {
        warn!("mail relay handler not loaded");
        return Ok(None);
    };

    let config = ConfigLoader::load(env, policy)?;
    let handler = Arc::new(MailRelayHandler::new(config));
    handler.register(host);
    Ok(Some(handler))
}

/// Defer [`install`] until the host reports it finished loading
pub fn install_on_load(host: &mut dyn MailHost, env: Arc<dyn EnvSource>, policy: TlsPolicy) {
    host.on_loaded(Box::new(move |host: &mut dyn MailHost| {
        if let Err(err) = install(Some(host), env.as_ref(), policy) {
            warn!(error = %err, "SMTP relay left unconfigured, host keeps its default transport");
        }
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MapEnv;

    fn env() -> MapEnv {
        MapEnv::from_pairs([
            ("EMAIL_FROM_NAME", "Site"),
            ("EMAIL_FROM_EMAIL", "no-reply@site.com"),
            ("SMTP_HOST", "smtp.example.com"),
            ("SMTP_PORT", "587"),
            ("SMTP_USER", "u"),
            ("SMTP_PASS", "p"),
        ])
    }

    #[test]
    fn test_filters_ignore_proposed_values() {
        let config = ConfigLoader::load(&env(), TlsPolicy::Strict).unwrap();
        let handler = MailRelayHandler::new(config);

        assert_eq!(handler.from_name_filter("WordPress"), "Site");
        assert_eq!(handler.from_email_filter("wordpress@localhost"), "no-reply@site.com");
        assert_eq!(handler.resolve_sender(), ("Site", "no-reply@site.com"));
    }

    #[test]
    fn test_install_without_host_is_a_no_op() {
        let result = install(None, &MapEnv::new(), TlsPolicy::Strict);
        assert!(matches!(result, Ok(None)));
    }
}
