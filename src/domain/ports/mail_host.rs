use crate::domain::models::FilterHook;

use super::mail_client::MailClient;

/// Callback fired once when the host has finished loading
pub type LoadedCallback = Box<dyn FnOnce(&mut dyn MailHost) + Send>;

/// Filter receiving the host-proposed value and returning the one to use
pub type SenderFilter = Box<dyn Fn(&str) -> String + Send + Sync>;

/// Action receiving every mail client the host constructs
pub type MailerInitAction = Box<dyn Fn(&mut dyn MailClient) + Send + Sync>;

/// Port trait for the host's event system
///
/// The relay never dispatches events itself. It only attaches callbacks to the
/// points below and lets the host invoke them at its own discretion:
///
/// - `on_loaded`: fired once after the host finished loading, triggers relay setup
/// - `add_filter`: sender name/address resolution
/// - `on_mailer_init`: mail-client construction
///
/// [`crate::services::HookRegistry`] is the in-process implementation.
pub trait MailHost {
    fn on_loaded(&mut self, callback: LoadedCallback);

    fn add_filter(&mut self, hook: FilterHook, filter: SenderFilter);

    fn on_mailer_init(&mut self, action: MailerInitAction);
}
