//! Service layer
//!
//! - HookRegistry: in-process host event system
//! - MailRelayHandler: sender override and transport initialization

pub mod hook_registry;
pub mod relay_handler;

pub use hook_registry::HookRegistry;
pub use relay_handler::{install, install_on_load, MailRelayHandler};
