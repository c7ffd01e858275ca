//! Implementation of the `mailrelay show` command.

use anyhow::Result;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{DebugLevel, MailRelayConfig, SecureMode, TlsOptions, TlsPolicy};
use crate::domain::ports::EnvSource;
use crate::infrastructure::config::ConfigLoader;

const REDACTED: &str = "********";

#[derive(Debug, Serialize)]
pub struct ShowOutput {
    pub from_name: String,
    pub from_email: String,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: &'static str,
    pub secure: SecureMode,
    pub debug: DebugLevel,
    pub tls: TlsOptions,
    pub policy: TlsPolicy,
}

impl ShowOutput {
    pub fn new(config: &MailRelayConfig, policy: TlsPolicy) -> Self {
        Self {
            from_name: config.from_name().to_string(),
            from_email: config.from_email().to_string(),
            host: config.host().to_string(),
            port: config.port(),
            user: config.user().to_string(),
            pass: REDACTED,
            secure: config.secure(),
            debug: config.debug(),
            tls: config.tls(),
            policy,
        }
    }
}

impl CommandOutput for ShowOutput {
    fn to_human(&self) -> String {
        let secure = if self.secure == SecureMode::None {
            "(none, opportunistic STARTTLS)"
        } else {
            self.secure.as_str()
        };
        [
            format!("From:        {} <{}>", self.from_name, self.from_email),
            format!("Relay:       {}:{}", self.host, self.port),
            format!("User:        {}", self.user),
            format!("Password:    {}", self.pass),
            format!("Secure:      {secure}"),
            format!("Debug:       {}", self.debug),
            format!(
                "TLS:         verify_peer={} verify_peer_name={} allow_self_signed={} ({:?} policy)",
                self.tls.verify_peer, self.tls.verify_peer_name, self.tls.allow_self_signed, self.policy
            ),
        ]
        .join("\n")
    }
}

pub fn execute(env: &dyn EnvSource, policy: TlsPolicy, json_mode: bool) -> Result<()> {
    let config = ConfigLoader::load(env, policy)?;
    output(&ShowOutput::new(&config, policy), json_mode);
    Ok(())
}
