//! API Key authentication gate for Actix Web.
//!
//! # Overview
//!
//! This crate provides a middleware that sits in front of your route handlers
//! and rejects any request to a protected route that does not carry a valid
//! API key. Keys are opaque bearer strings compared by equality against a set
//! loaded from process configuration (by default the `REST_API_KEYS`
//! environment variable, read as a comma-separated list).
//!
//! # Key Channels
//!
//! The key is extracted from the first present of (checked in order):
//! - a custom header, if one was configured,
//! - the `x-apikey` header,
//! - the `x-api-key` header,
//! - the `apikey` header,
//! - the `api-key` query parameter,
//! - the `apikey` query parameter.
//!
//! # Usage
//!
//! ```ignore
//! use actix_apikey::{ApiKeyConfig, ApiKeyGate};
//! use actix_web::{get, App, HttpResponse, HttpServer, Responder};
//!
//! #[get("/v1/health")]
//! async fn health() -> impl Responder {
//!     HttpResponse::Ok().body("healthy")
//! }
//!
//! #[get("/v1/protected")]
//! async fn protected() -> impl Responder {
//!     HttpResponse::Ok().body("welcome")
//! }
//!
//! // REST_API_KEYS=abc123,def456 ./server
//! HttpServer::new(|| {
//!     App::new()
//!         .wrap(ApiKeyGate::new(
//!             ApiKeyConfig::new()
//!                 .unprotected_route("/v1/health")
//!                 .custom_header("my-custom-apikey-header"),
//!         ))
//!         .service(health)
//!         .service(protected)
//! })
//! ```
//!
//! ## Custom Key Source
//!
//! The valid-key set is loaded through the [`KeySource`] trait, re-read on
//! every request so a configuration change takes effect on the very next one.
//! Tests and fixed deployments can inject a [`StaticKeySource`] instead of
//! the environment-backed default:
//!
//! ```ignore
//! let source = StaticKeySource::new().with_key("abc123");
//! let gate = ApiKeyGate::with_source(ApiKeyConfig::new(), source);
//! ```
//!
//! # Security Considerations
//!
//! 1. **Use HTTPS** - API keys are transmitted in plaintext
//! 2. **Deny-all on missing configuration** - an unset or empty key variable
//!    means every protected route answers 401; this is deliberate, not an
//!    error, so check your deployment configuration
//! 3. **Query parameters leak** - prefer headers; URLs end up in access logs
//! 4. **Redacted logging** - with `debug_logging_with_secrets(true)` the gate
//!    logs extracted and loaded keys in redacted form (`abcd****wxyz`); keys
//!    shorter than 8 characters cannot be masked and are logged as-is, so
//!    avoid enabling it with short keys in production

mod authenticator;
mod config;
mod error;
mod extract;
mod middleware;
mod redact;
mod source;

pub use authenticator::ApiKeyAuthenticator;
pub use config::ApiKeyConfig;
pub use error::ApiKeyError;
pub use middleware::{ApiKeyGate, ApiKeyGateService};
pub use redact::redact;
pub use source::{EnvKeySource, KeySource, StaticKeySource};
