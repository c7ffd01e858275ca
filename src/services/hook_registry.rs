//! Hook Registry Service
//!
//! In-process implementation of the host event system: stores the callbacks
//! attached by the relay and dispatches them when the host asks.

use std::collections::HashMap;
use std::fmt;
use tracing::{debug, info, instrument};

use crate::domain::models::{FilterHook, HookEvent};
use crate::domain::ports::{LoadedCallback, MailClient, MailHost, MailerInitAction, SenderFilter};

/// Registry for attaching and dispatching host hooks
#[derive(Default)]
pub struct HookRegistry {
    /// Callbacks waiting for the host to finish loading
    loaded: Vec<LoadedCallback>,

    /// Filters organized by hook, in registration order
    filters: HashMap<FilterHook, Vec<SenderFilter>>,

    /// Actions run on every constructed mail client
    mailer_init: Vec<MailerInitAction>,

    /// Whether `finish_loading` already ran
    loaded_fired: bool,
}

impl HookRegistry {
    /// Create a new hook registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal that the host finished loading
    ///
    /// Loaded callbacks fire exactly once; callbacks they register are kept.
    /// Callbacks attached after this point run immediately.
    #[instrument(skip(self))]
    pub fn finish_loading(&mut self) {
        if self.loaded_fired {
            debug!("Host already loaded, ignoring");
            return;
        }
        self.loaded_fired = true;

        let callbacks = std::mem::take(&mut self.loaded);
        info!(callbacks = callbacks.len(), event = %HookEvent::Loaded, "Host finished loading");
        for callback in callbacks {
            callback(&mut *self);
        }
    }

    /// Run every filter for `hook` over the proposed value
    pub fn apply_filter(&self, hook: FilterHook, proposed: &str) -> String {
        let Some(filters) = self.filters.get(&hook) else {
            return proposed.to_string();
        };

        filters
            .iter()
            .fold(proposed.to_string(), |value, filter| filter(value.as_str()))
    }

    /// Hand a freshly constructed mail client to every mailer-init action
    #[instrument(skip(self, client))]
    pub fn init_mailer(&self, client: &mut dyn MailClient) {
        debug!(actions = self.mailer_init.len(), event = %HookEvent::MailerInit, "Initializing mail client");
        for action in &self.mailer_init {
            action(client);
        }
    }

    /// Number of callbacks attached to an event
    pub fn hook_count(&self, event: HookEvent) -> usize {
        match event {
            HookEvent::Loaded => self.loaded.len(),
            HookEvent::MailFromName => self.filters.get(&FilterHook::MailFromName).map_or(0, Vec::len),
            HookEvent::MailFrom => self.filters.get(&FilterHook::MailFrom).map_or(0, Vec::len),
            HookEvent::MailerInit => self.mailer_init.len(),
        }
    }

    pub const fn is_loaded(&self) -> bool {
        self.loaded_fired
    }
}

impl MailHost for HookRegistry {
    fn on_loaded(&mut self, callback: LoadedCallback) {
        if self.loaded_fired {
            callback(self);
        } else {
            self.loaded.push(callback);
        }
    }

    fn add_filter(&mut self, hook: FilterHook, filter: SenderFilter) {
        debug!(event = %HookEvent::from(hook), "Registering filter");
        self.filters.entry(hook).or_default().push(filter);
    }

    fn on_mailer_init(&mut self, action: MailerInitAction) {
        debug!(event = %HookEvent::MailerInit, "Registering action");
        self.mailer_init.push(action);
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookRegistry")
            .field("loaded", &self.loaded.len())
            .field("mail_from_name", &self.hook_count(HookEvent::MailFromName))
            .field("mail_from", &self.hook_count(HookEvent::MailFrom))
            .field("mailer_init", &self.mailer_init.len())
            .field("loaded_fired", &self.loaded_fired)
            .finish()
    }
}
