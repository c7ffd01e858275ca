//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::models::TlsPolicy;

#[derive(Parser)]
#[command(name = "mailrelay")]
#[command(about = "Mailrelay - authenticated SMTP relay configuration", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Application settings file
    #[arg(short, long, global = true, default_value = "mailrelay.yaml")]
    pub config: PathBuf,

    /// TLS policy override: strict or configurable
    #[arg(long, global = true)]
    pub tls_policy: Option<TlsPolicy>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate the relay configuration from the environment
    Check,

    /// Print the resolved relay configuration (password redacted)
    Show,

    /// Send one test message through the relay
    Send(SendArgs),
}

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Recipient address
    #[arg(long)]
    pub to: String,

    /// Message subject
    #[arg(long, default_value = "mailrelay test message")]
    pub subject: String,

    /// Plain-text message body
    #[arg(long, default_value = "This message was sent through the configured SMTP relay.")]
    pub body: String,
}
