//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - Pretty or JSON stderr output
//! - Daily-rotated JSON log files
//! - Scrubbed forwarding of SMTP transport debug strings

pub mod logger;
pub mod secret_scrubbing;
pub mod transport;

pub use logger::LoggerImpl;
pub use secret_scrubbing::SecretScrubber;
pub use transport::{transport_debug_sink, TRANSPORT_TARGET};
