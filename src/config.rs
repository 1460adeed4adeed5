//! Gate configuration.

use std::collections::HashSet;

/// Configuration for the API key gate.
///
/// Built once at setup time, immutable afterwards, shared read-only by every
/// request.
///
/// # Example
///
/// ```ignore
/// let config = ApiKeyConfig::new()
///     .env_var("MY_SERVICE_KEYS")
///     .unprotected_route("/v1/health")
///     .unprotected_route("/v1/login")
///     .custom_header("my-custom-apikey-header");
/// ```
#[derive(Debug, Clone)]
pub struct ApiKeyConfig {
    /// Name of the environment variable holding the comma-separated key list.
    env_var_name: String,
    /// Exact paths (query string excluded) that skip authentication entirely.
    unprotected_routes: HashSet<String>,
    /// Header checked before the standard channels.
    custom_header_name: Option<String>,
    /// Log extracted and loaded keys in redacted form.
    debug_logging_with_secrets: bool,
}

impl Default for ApiKeyConfig {
    fn default() -> Self {
        Self {
            env_var_name: "REST_API_KEYS".to_string(),
            unprotected_routes: HashSet::new(),
            custom_header_name: None,
            debug_logging_with_secrets: false,
        }
    }
}

impl ApiKeyConfig {
    /// Creates a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the environment variable the valid-key list is read from.
    ///
    /// Defaults to `REST_API_KEYS`.
    pub fn env_var(mut self, name: impl Into<String>) -> Self {
        self.env_var_name = name.into();
        self
    }

    /// Adds a route that skips authentication.
    ///
    /// Matching is exact string equality against the request path with any
    /// query string stripped; no patterns or prefixes.
    pub fn unprotected_route(mut self, path: impl Into<String>) -> Self {
        self.unprotected_routes.insert(path.into());
        self
    }

    /// Adds several unprotected routes at once.
    pub fn unprotected_routes<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.unprotected_routes
            .extend(paths.into_iter().map(Into::into));
        self
    }

    /// Sets a header name checked before the standard key channels.
    pub fn custom_header(mut self, name: impl Into<String>) -> Self {
        self.custom_header_name = Some(name.into());
        self
    }

    /// Enables debug logging of extracted and loaded keys.
    ///
    /// Values are redacted before they reach the log sink, but keys shorter
    /// than 8 characters cannot be masked and are logged verbatim.
    pub fn debug_logging_with_secrets(mut self, enabled: bool) -> Self {
        self.debug_logging_with_secrets = enabled;
        self
    }

    /// Returns the environment variable name for the valid-key list.
    pub fn get_env_var_name(&self) -> &str {
        &self.env_var_name
    }

    /// Returns the configured custom header name, if any.
    pub fn get_custom_header_name(&self) -> Option<&str> {
        self.custom_header_name.as_deref()
    }

    /// Returns whether redacted secret logging is enabled.
    pub fn should_log_secrets(&self) -> bool {
        self.debug_logging_with_secrets
    }

    /// Returns whether the given path is exempt from authentication.
    ///
    /// Any query component is stripped before the exact-match lookup.
    pub fn is_unprotected(&self, path: &str) -> bool {
        let path = path.split('?').next().unwrap_or(path);
        self.unprotected_routes.contains(path)
    }
}
