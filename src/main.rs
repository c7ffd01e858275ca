//! Mailrelay CLI entry point.

use clap::Parser;

use mailrelay::cli::commands::{check, send, show};
use mailrelay::cli::{handle_error, Cli, Commands};
use mailrelay::infrastructure::config::{ConfigLoader, ProcessEnv};
use mailrelay::infrastructure::logging::LoggerImpl;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let settings = match ConfigLoader::load_app_from(&cli.config) {
        Ok(settings) => settings,
        Err(err) => handle_error(err, cli.json),
    };

    let _logger = match LoggerImpl::init(&settings.logging) {
        Ok(logger) => logger,
        Err(err) => handle_error(err, cli.json),
    };

    let policy = cli.tls_policy.unwrap_or(settings.tls_policy);
    let env = ProcessEnv;

    let result = match cli.command {
        Commands::Check => check::execute(&env, policy, cli.json),
        Commands::Show => show::execute(&env, policy, cli.json),
        Commands::Send(args) => send::execute(args, &env, policy, cli.json).await,
    };

    if let Err(err) = result {
        handle_error(err, cli.json);
    }
}
