//! End-to-end tests: environment -> validation -> host hooks -> mail client

mod common;

use common::{capture_logs, setup_test_logging, site_env, RecordingClient};
use mailrelay::domain::models::{DebugLevel, FilterHook, HookEvent, TlsOptions, TlsPolicy};
use mailrelay::domain::ports::{DebugSink, EnvSource, MailHost};
use mailrelay::infrastructure::config::{ConfigLoader, ProcessEnv};
use mailrelay::services::{install, install_on_load, HookRegistry, MailRelayHandler};
use mailrelay::ConfigError;
use std::sync::{Arc, Mutex};

#[test]
fn test_site_environment_configures_transport() {
    setup_test_logging();
    let mut host = HookRegistry::new();
    let handler = install(Some(&mut host), &site_env(), TlsPolicy::Strict)
        .expect("configuration should be valid")
        .expect("host is available");

    let mut client = RecordingClient::default();
    host.init_mailer(&mut client);

    assert!(client.is_smtp);
    assert_eq!(client.host, "smtp.example.com");
    assert_eq!(client.port, 587);
    assert_eq!(client.smtp_secure, "tls");
    assert!(client.smtp_auth);
    assert_eq!(client.username, "u");
    assert_eq!(client.password, "p");
    assert_eq!(client.from, "no-reply@site.com");
    assert_eq!(client.from_name, "Site");
    assert_eq!(client.smtp_debug, 0);
    assert_eq!(client.tls_options, Some(TlsOptions::strict()));
    assert!(client.debug_output.is_some());

    assert_eq!(handler.config().port(), 587);
}

#[test]
fn test_sender_filters_override_host_proposals() {
    let mut host = HookRegistry::new();
    install(Some(&mut host), &site_env(), TlsPolicy::Strict).unwrap();

    assert_eq!(host.apply_filter(FilterHook::MailFromName, "WordPress"), "Site");
    assert_eq!(
        host.apply_filter(FilterHook::MailFrom, "wordpress@example.org"),
        "no-reply@site.com"
    );
}

#[test]
fn test_invalid_configuration_registers_nothing() {
    let mut host = HookRegistry::new();
    let env = site_env().with("SMTP_PORT", "65536").with("SMTP_SECURE", "starttls");

    let err = install(Some(&mut host), &env, TlsPolicy::Strict).unwrap_err();
    match err {
        ConfigError::InvalidRelay(validation) => {
            assert_eq!(validation.fields(), vec!["port", "secure"]);
        }
        other => panic!("Expected InvalidRelay error, got {other:?}"),
    }

    assert_eq!(host.hook_count(HookEvent::MailFromName), 0);
    assert_eq!(host.hook_count(HookEvent::MailFrom), 0);
    assert_eq!(host.hook_count(HookEvent::MailerInit), 0);
    assert_eq!(host.apply_filter(FilterHook::MailFrom, "default@host"), "default@host");
}

#[test]
fn test_install_on_load_waits_for_host() {
    let mut host = HookRegistry::new();
    install_on_load(&mut host, Arc::new(site_env()), TlsPolicy::Strict);

    assert_eq!(host.hook_count(HookEvent::MailerInit), 0);
    host.finish_loading();
    assert_eq!(host.hook_count(HookEvent::MailerInit), 1);
    assert_eq!(host.hook_count(HookEvent::MailFromName), 1);
    assert_eq!(host.hook_count(HookEvent::MailFrom), 1);
}

#[test]
fn test_install_on_load_with_invalid_config_keeps_host_default() {
    let mut host = HookRegistry::new();
    let env: Arc<dyn EnvSource> = Arc::new(site_env().without("SMTP_PASS"));
    install_on_load(&mut host, env, TlsPolicy::Strict);

    host.finish_loading();

    let mut client = RecordingClient::default();
    host.init_mailer(&mut client);
    assert!(!client.is_smtp);
    assert!(!client.smtp_auth);
}

#[test]
fn test_each_client_gets_configured() {
    let mut host = HookRegistry::new();
    install(Some(&mut host), &site_env(), TlsPolicy::Strict).unwrap();

    for _ in 0..3 {
        let mut client = RecordingClient::default();
        host.init_mailer(&mut client);
        assert_eq!(client.host, "smtp.example.com");
    }
}

#[test]
fn test_configurable_policy_flows_to_client() {
    let mut host = HookRegistry::new();
    let env = site_env()
        .with("SMTP_SSL_VERIFY_PEER", "false")
        .with("SMTP_SSL_ALLOW_SELF_SIGNED", "true");
    install(Some(&mut host), &env, TlsPolicy::Configurable).unwrap();

    let mut client = RecordingClient::default();
    host.init_mailer(&mut client);
    assert_eq!(
        client.tls_options,
        Some(TlsOptions {
            verify_peer: false,
            verify_peer_name: true,
            allow_self_signed: true,
        })
    );
}

#[test]
fn test_custom_debug_sink_receives_client_output() {
    let config = ConfigLoader::load(&site_env().with("SMTP_DEBUG", "2"), TlsPolicy::Strict).unwrap();
    let lines = Arc::new(Mutex::new(Vec::new()));
    let captured = Arc::clone(&lines);
    let sink: DebugSink = Arc::new(move |msg: &str, level: DebugLevel| {
        captured.lock().unwrap().push(format!("{level}:{msg}"));
    });
    let handler = MailRelayHandler::with_debug_sink(config, sink);

    let mut client = RecordingClient::default();
    handler.configure_transport(&mut client);
    assert_eq!(client.smtp_debug, 2);

    let debug_output = client.debug_output.expect("debug sink installed");
    debug_output("SERVER -> CLIENT: 250 OK", DebugLevel::Server);
    assert_eq!(lines.lock().unwrap().as_slice(), ["2:SERVER -> CLIENT: 250 OK"]);
}

#[test]
fn test_default_debug_sink_logs_scrubbed_transport_lines() {
    let logs = capture_logs(|| {
        let mut host = HookRegistry::new();
        install(Some(&mut host), &site_env().with("SMTP_DEBUG", "1"), TlsPolicy::Strict).unwrap();

        let mut client = RecordingClient::default();
        host.init_mailer(&mut client);
        let sink = client.debug_output.expect("debug sink installed");
        sink("CLIENT -> SERVER: AUTH PLAIN AHUAcA==", DebugLevel::Client);
        sink("CLIENT -> SERVER: cA==", DebugLevel::Client);
    });

    let transport_lines: Vec<&str> = logs
        .lines()
        .filter(|line| line.contains("mailrelay::transport"))
        .collect();
    assert_eq!(transport_lines.len(), 2, "{logs}");
    assert!(transport_lines[0].contains("DEBUG"));
    assert!(transport_lines[0].contains("AUTH PLAIN [CREDENTIALS_REDACTED]"));
    assert!(transport_lines[1].contains("CLIENT -> SERVER: [REDACTED]"));
    assert!(!logs.contains("AHUAcA=="));
    assert!(!logs.contains("cA=="));
}

#[test]
fn test_invalid_configuration_emits_error_event() {
    let logs = capture_logs(|| {
        let env = site_env().with("SMTP_PORT", "0").without("SMTP_PASS");
        let mut host = HookRegistry::new();
        assert!(install(Some(&mut host), &env, TlsPolicy::Strict).is_err());
    });

    let line = logs
        .lines()
        .find(|line| line.contains("Invalid SMTP configuration"))
        .unwrap_or_else(|| panic!("no error event in {logs}"));
    assert!(line.contains("ERROR"));
    assert!(line.contains("violation_count=2"));
    assert!(line.contains(r#""field":"port""#));
    assert!(line.contains(r#""value":"0""#));
    assert!(line.contains(r#""field":"pass""#));
}

#[test]
fn test_missing_host_logs_not_loaded() {
    let logs = capture_logs(|| {
        assert!(matches!(install(None, &site_env(), TlsPolicy::Strict), Ok(None)));
    });

    assert!(logs.contains("WARN"));
    assert!(logs.contains("mail relay handler not loaded"));
}

#[test]
fn test_process_environment_end_to_end() {
    temp_env::with_vars(
        [
            ("EMAIL_FROM_NAME", Some("Site")),
            ("EMAIL_FROM_EMAIL", Some("no-reply@site.com")),
            ("SMTP_HOST", Some("203.0.113.7")),
            ("SMTP_PORT", Some("2525")),
            ("SMTP_USER", Some("relay")),
            ("SMTP_PASS", Some("s3cret")),
            ("SMTP_SECURE", None),
            ("SMTP_DEBUG", None),
        ],
        || {
            let mut host = HookRegistry::new();
            install(Some(&mut host as &mut dyn MailHost), &ProcessEnv, TlsPolicy::Strict).unwrap();

            let mut client = RecordingClient::default();
            host.init_mailer(&mut client);
            assert_eq!(client.host, "203.0.113.7");
            assert_eq!(client.port, 2525);
            assert_eq!(client.smtp_secure, "");
            assert_eq!(client.smtp_debug, 0);
        },
    );
}
