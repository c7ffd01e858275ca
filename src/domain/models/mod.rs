pub mod config;
pub mod hook;
pub mod relay;

pub use config::{AppConfig, LoggingConfig};
pub use hook::{FilterHook, HookEvent};
pub use relay::{
    DebugLevel, MailRelayConfig, RelaySettings, SecureMode, SslSettings, TlsOptions, TlsPolicy,
};
