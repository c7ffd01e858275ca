use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use regex::Regex;
use std::fmt;

/// Characters that continue a token; a literal only matches between other characters
const TOKEN_CHARS: &str = r"A-Za-z0-9+/=_.@-";

/// Redacts credentials from SMTP transport debug strings
///
/// SMTP debug output echoes `AUTH` commands whose arguments are base64-encoded
/// credentials, so every string forwarded to the log goes through here first.
#[derive(Clone)]
pub struct SecretScrubber {
    auth_pattern: Regex,
    password_pattern: Regex,
    literals: Vec<Regex>,
}

impl SecretScrubber {
    /// Create a new secret scrubber
    pub fn new() -> Self {
        Self {
            // AUTH PLAIN dGVzdAB0ZXN0AHRlc3Q=, AUTH XOAUTH2 ...
            auth_pattern: Regex::new(r"(?i)\bAUTH\s+(PLAIN|LOGIN|XOAUTH2|CRAM-MD5)\s+\S+").unwrap(),
            // Match password fields
            password_pattern: Regex::new(r#"["']?pass(?:word)?["']?\s*[:=]\s*["']?([^"'\s,}]+)["']?"#).unwrap(),
            literals: Vec::new(),
        }
    }

    /// Also redact `secret` wherever it appears as a whole token
    ///
    /// Occurrences inside a longer word are left alone, so a short secret never
    /// punches holes into unrelated text.
    #[must_use]
    pub fn with_literal(mut self, secret: impl Into<String>) -> Self {
        let secret = secret.into();
        if secret.is_empty() {
            return self;
        }
        let pattern = format!(
            "(^|[^{TOKEN_CHARS}]){}($|[^{TOKEN_CHARS}])",
            regex::escape(&secret)
        );
        if let Ok(literal) = Regex::new(&pattern) {
            self.literals.push(literal);
        }
        self
    }

    /// Redact SMTP credentials in every form they take on the wire
    ///
    /// Covers the raw password, its base64 form (`AUTH LOGIN` password line)
    /// and the base64 `AUTH PLAIN` response `\0user\0pass`.
    #[must_use]
    pub fn with_smtp_credentials(self, user: &str, pass: &str) -> Self {
        if pass.is_empty() {
            return self;
        }
        let plain_response = STANDARD.encode(format!("\0{user}\0{pass}"));
        self.with_literal(pass)
            .with_literal(STANDARD.encode(pass))
            .with_literal(plain_response)
    }

    /// Scrub a message of sensitive data
    pub fn scrub_message(&self, message: &str) -> String {
        let mut scrubbed = message.to_string();
        for literal in &self.literals {
            scrubbed = literal
                .replace_all(&scrubbed, "${1}[REDACTED]${2}")
                .to_string();
        }
        scrubbed = self
            .auth_pattern
            .replace_all(&scrubbed, "AUTH $1 [CREDENTIALS_REDACTED]")
            .to_string();
        self.password_pattern
            .replace_all(&scrubbed, "password=[REDACTED]")
            .to_string()
    }
}

impl Default for SecretScrubber {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SecretScrubber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretScrubber")
            .field("literals", &self.literals.len())
            .finish()
    }
}
