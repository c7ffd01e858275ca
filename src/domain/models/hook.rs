//! Host hook points the relay attaches to

use serde::{Deserialize, Serialize};
use std::fmt;

/// Host events the relay listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookEvent {
    /// Fired once after the host finished loading its extensions
    Loaded,
    /// Filter over the proposed sender display name
    MailFromName,
    /// Filter over the proposed sender address
    MailFrom,
    /// Fired each time the host constructs a mail client
    MailerInit,
}

/// Hooks that take a proposed value and return a replacement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterHook {
    MailFromName,
    MailFrom,
}

impl From<FilterHook> for HookEvent {
    fn from(hook: FilterHook) -> Self {
        match hook {
            FilterHook::MailFromName => Self::MailFromName,
            FilterHook::MailFrom => Self::MailFrom,
        }
    }
}

impl fmt::Display for HookEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Loaded => "loaded",
            Self::MailFromName => "mail_from_name",
            Self::MailFrom => "mail_from",
            Self::MailerInit => "mailer_init",
        };
        f.write_str(name)
    }
}
