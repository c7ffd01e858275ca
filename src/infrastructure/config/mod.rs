//! Configuration management infrastructure
//!
//! - Relay settings read from fixed environment variables
//! - Schema validation producing the immutable relay configuration
//! - Application settings via figment (YAML file, `MAILRELAY_*` overrides)

pub mod env;
pub mod loader;
pub mod validator;

pub use env::ProcessEnv;
pub use loader::ConfigLoader;
pub use validator::ConfigValidator;
