use std::env::{self, VarError};
use tracing::warn;

use crate::domain::ports::EnvSource;

/// [`EnvSource`] backed by the process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        match env::var(key) {
            Ok(value) => Some(value),
            Err(VarError::NotPresent) => None,
            Err(VarError::NotUnicode(_)) => {
                warn!(key, "Ignoring environment variable that is not valid UTF-8");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_process_environment() {
        temp_env::with_vars(
            [("MAILRELAY_TEST_PRESENT", Some("value")), ("MAILRELAY_TEST_ABSENT", None)],
            || {
                assert_eq!(ProcessEnv.get("MAILRELAY_TEST_PRESENT").as_deref(), Some("value"));
                assert_eq!(ProcessEnv.get("MAILRELAY_TEST_ABSENT"), None);
            },
        );
    }
}
