//! Implementation of the `mailrelay send` command.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::cli::types::SendArgs;
use crate::domain::models::{FilterHook, TlsPolicy};
use crate::domain::ports::{EnvSource, MailClient};
use crate::infrastructure::mailer::{LettreMailer, SendReport};
use crate::services::{install, HookRegistry};

/// Placeholder sender the host would propose before the relay filters apply
const HOST_DEFAULT_NAME: &str = "mailrelay";
const HOST_DEFAULT_EMAIL: &str = "mailrelay@localhost";

#[derive(Debug, Serialize)]
pub struct SendOutput {
    pub to: String,
    pub from: String,
    pub report: SendReport,
}

impl CommandOutput for SendOutput {
    fn to_human(&self) -> String {
        format!(
            "Sent to {} from {}\nRelay replied: {} {}",
            self.to,
            self.from,
            self.report.code,
            self.report.message.join(" ")
        )
    }
}

/// Build a mail client the way the host does: run the mailer-init hooks, then
/// resolve the sender through the filters
pub fn prepare_mailer(registry: &HookRegistry) -> LettreMailer {
    let mut mailer = LettreMailer::new();
    mailer.set_from(HOST_DEFAULT_EMAIL, HOST_DEFAULT_NAME);
    registry.init_mailer(&mut mailer);

    let name = registry.apply_filter(FilterHook::MailFromName, HOST_DEFAULT_NAME);
    let email = registry.apply_filter(FilterHook::MailFrom, HOST_DEFAULT_EMAIL);
    mailer.set_from(&email, &name);
    mailer
}

pub async fn execute(
    args: SendArgs,
    env: &dyn EnvSource,
    policy: TlsPolicy,
    json_mode: bool,
) -> Result<()> {
    let mut registry = HookRegistry::new();
    install(Some(&mut registry), env, policy)?;

    let mailer = prepare_mailer(&registry);
    let from = registry.apply_filter(FilterHook::MailFrom, HOST_DEFAULT_EMAIL);
    let report = mailer
        .send_text(&args.to, &args.subject, &args.body)
        .await
        .with_context(|| format!("Failed to send test message to {}", args.to))?;

    output(
        &SendOutput {
            to: args.to,
            from,
            report,
        },
        json_mode,
    );
    Ok(())
}
