use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use std::net::IpAddr;
use std::sync::LazyLock;

use crate::domain::error::{ValidationError, Violation};
use crate::domain::models::{
    DebugLevel, MailRelayConfig, RelaySettings, SecureMode, SslSettings, TlsOptions,
};

const NOT_BLANK: &str = "This value should not be blank.";
const INVALID_EMAIL: &str = "This value is not a valid email address.";
const INVALID_HOST: &str = "This value is not a valid IP address or hostname.";
const INVALID_NUMBER: &str = "This value should be a valid number.";
const PORT_RANGE: &str = "This value should be between 1 and 65535.";
const INVALID_CHOICE: &str = "The value you selected is not a valid choice.";
const INVALID_BOOL: &str = "This value should be of type bool.";

/// HTML5 email grammar, with at least one dot in the domain part
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$",
    )
    .expect("email pattern is a valid regex")
});

/// Schema validator for relay settings
///
/// Every field is checked; a field contributes at most one violation (its first
/// failing rule) and any violation rejects the whole configuration.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate raw settings and produce the typed configuration
    pub fn validate(settings: &RelaySettings) -> Result<MailRelayConfig, ValidationError> {
        let mut violations = Vec::new();

        let from_name = collect(&mut violations, not_blank("from_name", settings.from_name.as_deref()));
        let from_email = collect(&mut violations, valid_email("from_email", settings.from_email.as_deref()));
        let host = collect(&mut violations, valid_host("host", settings.host.as_deref()));
        let port = collect(&mut violations, valid_port("port", settings.port.as_deref()));
        let user = collect(&mut violations, not_blank("user", settings.user.as_deref()));
        let pass = collect(&mut violations, secret_not_blank("pass", settings.pass.as_ref()));
        let secure = collect(&mut violations, valid_secure("secure", &settings.secure));
        let debug = collect(&mut violations, valid_debug("debug", &settings.debug));
        let tls = tls_options(&mut violations, settings.ssl.as_ref());

        match (from_name, from_email, host, port, user, pass, secure, debug, tls) {
            (
                Some(from_name),
                Some(from_email),
                Some(host),
                Some(port),
                Some(user),
                Some(pass),
                Some(secure),
                Some(debug),
                Some(tls),
            ) if violations.is_empty() => Ok(MailRelayConfig::new(
                from_name, from_email, host, port, user, pass, secure, debug, tls,
            )),
            _ => Err(ValidationError::new(violations)),
        }
    }

    /// Whether `value` is an IPv4/IPv6 literal or a hostname with a top-level domain
    pub fn is_valid_host(value: &str) -> bool {
        value.parse::<IpAddr>().is_ok() || is_valid_hostname(value)
    }

    pub fn is_valid_email(value: &str) -> bool {
        EMAIL_PATTERN.is_match(value)
    }
}

fn collect<T>(violations: &mut Vec<Violation>, result: Result<T, Violation>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(violation) => {
            violations.push(violation);
            None
        }
    }
}

fn not_blank(field: &str, value: Option<&str>) -> Result<String, Violation> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.to_string()),
        other => Err(Violation::new(field, NOT_BLANK, other)),
    }
}

fn secret_not_blank(field: &str, value: Option<&SecretString>) -> Result<SecretString, Violation> {
    match value {
        Some(v) if !v.expose_secret().trim().is_empty() => Ok(v.clone()),
        _ => Err(Violation::new(field, NOT_BLANK, None)),
    }
}

fn valid_email(field: &str, value: Option<&str>) -> Result<String, Violation> {
    let value = not_blank(field, value)?;
    if ConfigValidator::is_valid_email(&value) {
        Ok(value)
    } else {
        Err(Violation::new(field, INVALID_EMAIL, Some(value.as_str())))
    }
}

fn valid_host(field: &str, value: Option<&str>) -> Result<String, Violation> {
    let value = not_blank(field, value)?;
    if ConfigValidator::is_valid_host(&value) {
        Ok(value)
    } else {
        Err(Violation::new(field, INVALID_HOST, Some(value.as_str())))
    }
}

fn valid_port(field: &str, value: Option<&str>) -> Result<u16, Violation> {
    let value = not_blank(field, value)?;
    let number: i64 = value
        .parse()
        .map_err(|_| Violation::new(field, INVALID_NUMBER, Some(value.as_str())))?;
    match u16::try_from(number) {
        Ok(port) if port >= 1 => Ok(port),
        _ => Err(Violation::new(field, PORT_RANGE, Some(value.as_str()))),
    }
}

fn valid_secure(field: &str, value: &str) -> Result<SecureMode, Violation> {
    value
        .parse()
        .map_err(|_| Violation::new(field, INVALID_CHOICE, Some(value)))
}

fn valid_debug(field: &str, value: &str) -> Result<DebugLevel, Violation> {
    value
        .parse::<u8>()
        .ok()
        .and_then(|n| DebugLevel::try_from(n).ok())
        .ok_or_else(|| Violation::new(field, INVALID_CHOICE, Some(value)))
}

fn boolean(field: &str, value: Option<&str>, default: bool) -> Result<bool, Violation> {
    match value {
        None => Ok(default),
        Some(v) if v.eq_ignore_ascii_case("true") => Ok(true),
        Some(v) if v.eq_ignore_ascii_case("false") => Ok(false),
        Some(v) => Err(Violation::new(field, INVALID_BOOL, Some(v))),
    }
}

fn tls_options(violations: &mut Vec<Violation>, ssl: Option<&SslSettings>) -> Option<TlsOptions> {
    let Some(ssl) = ssl else {
        return Some(TlsOptions::strict());
    };

    let strict = TlsOptions::strict();
    let verify_peer = collect(
        violations,
        boolean("ssl.verify_peer", ssl.verify_peer.as_deref(), strict.verify_peer),
    );
    let verify_peer_name = collect(
        violations,
        boolean(
            "ssl.verify_peer_name",
            ssl.verify_peer_name.as_deref(),
            strict.verify_peer_name,
        ),
    );
    let allow_self_signed = collect(
        violations,
        boolean(
            "ssl.allow_self_signed",
            ssl.allow_self_signed.as_deref(),
            strict.allow_self_signed,
        ),
    );

    Some(TlsOptions {
        verify_peer: verify_peer?,
        verify_peer_name: verify_peer_name?,
        allow_self_signed: allow_self_signed?,
    })
}

fn is_valid_hostname(value: &str) -> bool {
    let name = value.strip_suffix('.').unwrap_or(value);
    if name.is_empty() || name.len() > 253 {
        return false;
    }

    let labels: Vec<&str> = name.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });

    let tld_ok = labels
        .last()
        .is_some_and(|tld| !tld.chars().all(|c| c.is_ascii_digit()));

    labels_ok && tld_ok
}
