use clap::Parser;
use mailrelay::cli::{Cli, Commands};
use mailrelay::domain::models::TlsPolicy;
use std::path::PathBuf;

#[test]
fn test_parse_check() {
    let cli = Cli::try_parse_from(["mailrelay", "check"]).unwrap();

    assert!(matches!(cli.command, Commands::Check));
    assert!(!cli.json);
    assert_eq!(cli.config, PathBuf::from("mailrelay.yaml"));
    assert_eq!(cli.tls_policy, None);
}

#[test]
fn test_parse_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "mailrelay",
        "show",
        "--json",
        "--config",
        "/etc/mailrelay.yaml",
        "--tls-policy",
        "configurable",
    ])
    .unwrap();

    assert!(matches!(cli.command, Commands::Show));
    assert!(cli.json);
    assert_eq!(cli.config, PathBuf::from("/etc/mailrelay.yaml"));
    assert_eq!(cli.tls_policy, Some(TlsPolicy::Configurable));
}

#[test]
fn test_parse_send() {
    let cli = Cli::try_parse_from(["mailrelay", "send", "--to", "ops@site.com", "--subject", "ping"]).unwrap();

    match cli.command {
        Commands::Send(args) => {
            assert_eq!(args.to, "ops@site.com");
            assert_eq!(args.subject, "ping");
            assert!(!args.body.is_empty());
        }
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_send_requires_recipient() {
    assert!(Cli::try_parse_from(["mailrelay", "send"]).is_err());
}

#[test]
fn test_rejects_unknown_tls_policy() {
    assert!(Cli::try_parse_from(["mailrelay", "check", "--tls-policy", "lenient"]).is_err());
}
