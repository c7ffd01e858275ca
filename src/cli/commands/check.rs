//! Implementation of the `mailrelay check` command.

use anyhow::Result;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::domain::error::{ConfigError, Violation};
use crate::domain::models::TlsPolicy;
use crate::domain::ports::EnvSource;
use crate::infrastructure::config::ConfigLoader;

#[derive(Debug, Serialize)]
pub struct CheckOutput {
    pub valid: bool,
    pub policy: TlsPolicy,
    pub violations: Vec<Violation>,
}

impl CommandOutput for CheckOutput {
    fn to_human(&self) -> String {
        if self.valid {
            return "OK: SMTP relay configuration is valid".to_string();
        }

        let mut lines = vec![format!(
            "Invalid SMTP configuration ({} violation(s)):",
            self.violations.len()
        )];
        for violation in &self.violations {
            lines.push(format!("  - {violation}"));
        }
        lines.join("\n")
    }
}

/// Validate the relay settings; prints the outcome and reports an error when invalid
pub fn run(env: &dyn EnvSource, policy: TlsPolicy) -> Result<CheckOutput> {
    match ConfigLoader::load(env, policy) {
        Ok(_) => Ok(CheckOutput {
            valid: true,
            policy,
            violations: vec![],
        }),
        Err(ConfigError::InvalidRelay(err)) => Ok(CheckOutput {
            valid: false,
            policy,
            violations: err.violations,
        }),
        Err(other) => Err(other.into()),
    }
}

pub fn execute(env: &dyn EnvSource, policy: TlsPolicy, json_mode: bool) -> Result<()> {
    let result = run(env, policy)?;
    output(&result, json_mode);

    if !result.valid {
        anyhow::bail!("SMTP relay configuration is invalid");
    }
    Ok(())
}
