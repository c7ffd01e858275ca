use std::collections::HashMap;

/// Port trait for environment-style key/value lookup
///
/// The relay reads a fixed set of named values and treats each one as either
/// present (as text) or absent. Implementations decide where the values come
/// from: the process environment in production, an in-memory map in tests or
/// when a host hands over its own settings.
///
/// # Examples
///
/// ```
/// use mailrelay::domain::ports::{EnvSource, MapEnv};
///
/// let env = MapEnv::from_pairs([("SMTP_HOST", "smtp.example.com")]);
/// assert_eq!(env.get("SMTP_HOST").as_deref(), Some("smtp.example.com"));
/// assert_eq!(env.get("SMTP_PORT"), None);
/// ```
pub trait EnvSource: Send + Sync {
    /// Look up a single value; `None` when the key is not set
    fn get(&self, key: &str) -> Option<String>;
}

/// In-memory [`EnvSource`]
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    values: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Set or replace a value
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Remove a value so lookups report it as absent
    #[must_use]
    pub fn without(mut self, key: &str) -> Self {
        self.values.remove(key);
        self
    }
}

impl EnvSource for MapEnv {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}
