use std::sync::Arc;
use tracing::debug;

use super::secret_scrubbing::SecretScrubber;
use crate::domain::models::DebugLevel;
use crate::domain::ports::DebugSink;

/// Target used for events carrying raw transport debug strings
pub const TRANSPORT_TARGET: &str = "mailrelay::transport";

/// Debug sink forwarding mail-client debug strings to the tracing stream
///
/// Strings are scrubbed before they are emitted, at debug level, under
/// [`TRANSPORT_TARGET`].
pub fn transport_debug_sink(scrubber: SecretScrubber) -> DebugSink {
    Arc::new(move |message: &str, level: DebugLevel| {
        let message = scrubber.scrub_message(message.trim_end());
        debug!(target: TRANSPORT_TARGET, level = level.as_u8(), message = %message);
    })
}
