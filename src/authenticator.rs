//! API key authenticator implementation.

use std::sync::Arc;

use actix_web::dev::ServiceRequest;
use tracing::{debug, error};

use crate::config::ApiKeyConfig;
use crate::error::ApiKeyError;
use crate::extract::extract_api_key;
use crate::redact::{redact, EMPTY_PLACEHOLDER};
use crate::source::{EnvKeySource, KeySource};

/// Decides ALLOW or DENY for one request.
///
/// Exempt routes pass immediately; everything else must carry a key that
/// matches one member of the set returned by the [`KeySource`]. The source is
/// queried fresh on every check, so key changes apply on the next request.
///
/// Holds only read-only state and is cheap to clone.
///
/// # Example
///
/// ```ignore
/// let authenticator = ApiKeyAuthenticator::with_source(
///     ApiKeyConfig::new().unprotected_route("/v1/health"),
///     StaticKeySource::new().with_key("abc123"),
/// );
/// ```
pub struct ApiKeyAuthenticator<K: KeySource> {
    source: Arc<K>,
    config: ApiKeyConfig,
}

impl ApiKeyAuthenticator<EnvKeySource> {
    /// Creates an authenticator reading keys from the environment variable
    /// named by the configuration.
    pub fn new(config: ApiKeyConfig) -> Self {
        let source = EnvKeySource::new(config.get_env_var_name());
        Self {
            source: Arc::new(source),
            config,
        }
    }
}

impl<K: KeySource> ApiKeyAuthenticator<K> {
    /// Creates an authenticator with a custom key source.
    pub fn with_source(config: ApiKeyConfig, source: K) -> Self {
        Self {
            source: Arc::new(source),
            config,
        }
    }

    /// Creates an authenticator with a shared key source.
    pub fn with_shared_source(config: ApiKeyConfig, source: Arc<K>) -> Self {
        Self { source, config }
    }

    /// Authenticates one request.
    ///
    /// Returns `Ok(())` when the route is exempt or the request carries a
    /// valid key; `Err(ApiKeyError::AuthenticationFailure)` otherwise. The
    /// request is never mutated.
    pub fn authenticate(&self, req: &ServiceRequest) -> Result<(), ApiKeyError> {
        if self.config.is_unprotected(req.path()) {
            return Ok(());
        }

        let candidate = extract_api_key(req, self.config.get_custom_header_name());
        if self.config.should_log_secrets() {
            debug!(
                "API key from request: {}",
                redacted_candidate(candidate.as_deref())
            );
        }

        let valid_keys = self.source.load();
        if self.config.should_log_secrets() {
            for key in &valid_keys {
                debug!("valid API key loaded: {}", redact(key));
            }
        }

        // An absent candidate always denies, even against an empty-string
        // member a custom source might hold.
        let allowed = match candidate.as_deref() {
            Some(candidate) => valid_keys
                .iter()
                .any(|key| constant_time_eq(candidate.as_bytes(), key.as_bytes())),
            None => false,
        };

        if allowed {
            Ok(())
        } else {
            if self.config.should_log_secrets() {
                error!(
                    "invalid API key passed: {}",
                    redacted_candidate(candidate.as_deref())
                );
            }
            Err(ApiKeyError::AuthenticationFailure)
        }
    }
}

impl<K: KeySource> Clone for ApiKeyAuthenticator<K> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            config: self.config.clone(),
        }
    }
}

fn redacted_candidate(candidate: Option<&str>) -> String {
    match candidate {
        Some(candidate) => redact(candidate),
        None => EMPTY_PLACEHOLDER.to_string(),
    }
}

/// Compares two byte strings without short-circuiting on the first mismatch,
/// so the comparison time does not reveal how much of a key matched.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter()
        .zip(b.iter())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}
