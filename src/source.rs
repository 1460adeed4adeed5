//! Valid-key sources.

use std::env;
use std::sync::RwLock;

/// Trait for loading the authoritative set of valid API keys.
///
/// The gate calls [`load`](KeySource::load) on every authentication check, so
/// implementations should return the current state of their backing store; a
/// configuration change then takes effect on the very next request.
///
/// # Example
///
/// ```ignore
/// struct FileKeySource {
///     path: PathBuf,
/// }
///
/// impl KeySource for FileKeySource {
///     fn load(&self) -> Vec<String> {
///         std::fs::read_to_string(&self.path)
///             .unwrap_or_default()
///             .lines()
///             .filter(|l| !l.is_empty())
///             .map(String::from)
///             .collect()
///     }
/// }
/// ```
pub trait KeySource: Send + Sync {
    /// Returns the current valid-key set.
    fn load(&self) -> Vec<String>;
}

/// Key source backed by a process environment variable.
///
/// The variable is read as a comma-separated list; empty segments are
/// dropped, so a trailing comma is harmless and an unset or empty variable
/// yields an empty set. An empty set means every protected route is denied,
/// which is the intended fail-closed behavior for missing configuration.
#[derive(Debug, Clone)]
pub struct EnvKeySource {
    var_name: String,
}

impl EnvKeySource {
    /// Creates a source reading the given environment variable.
    pub fn new(var_name: impl Into<String>) -> Self {
        Self {
            var_name: var_name.into(),
        }
    }

    /// Returns the environment variable name this source reads.
    pub fn get_var_name(&self) -> &str {
        &self.var_name
    }
}

impl KeySource for EnvKeySource {
    fn load(&self) -> Vec<String> {
        env::var(&self.var_name)
            .unwrap_or_default()
            .split(',')
            .filter(|segment| !segment.is_empty())
            .map(String::from)
            .collect()
    }
}

/// In-memory key source.
///
/// Useful for tests and for deployments where the key set is fixed at
/// startup. Keys can still be added or cleared at runtime; the gate sees the
/// change on the next request.
///
/// # Example
///
/// ```ignore
/// let source = StaticKeySource::new()
///     .with_key("abc123")
///     .with_key("def456");
/// ```
#[derive(Debug, Default)]
pub struct StaticKeySource {
    keys: RwLock<Vec<String>>,
}

impl StaticKeySource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a key, builder style.
    ///
    /// See [`add_key`](Self::add_key) for the caveat on empty keys.
    pub fn with_key(self, key: impl Into<String>) -> Self {
        self.add_key(key);
        self
    }

    /// Adds a key.
    ///
    /// Keys are stored verbatim. In particular an empty-string key is kept,
    /// and a request carrying a present-but-empty header value will then
    /// authenticate; only a request with no key channel at all is always
    /// denied. The environment-backed source never produces an empty key
    /// because empty segments are dropped.
    pub fn add_key(&self, key: impl Into<String>) {
        let mut keys = self.keys.write().unwrap();
        keys.push(key.into());
    }

    /// Removes all keys.
    pub fn clear(&self) {
        let mut keys = self.keys.write().unwrap();
        keys.clear();
    }

    /// Returns the number of keys currently held.
    pub fn len(&self) -> usize {
        let keys = self.keys.read().unwrap();
        keys.len()
    }

    /// Returns true if no keys are held.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeySource for StaticKeySource {
    fn load(&self) -> Vec<String> {
        let keys = self.keys.read().unwrap();
        keys.clone()
    }
}
