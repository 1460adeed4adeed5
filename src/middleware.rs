//! API key gate middleware for Actix Web.

use std::rc::Rc;

use actix_service::{Service, Transform};
use actix_web::body::EitherBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::{Error, ResponseError};
use futures_util::future::{ok, LocalBoxFuture, Ready};

use crate::authenticator::ApiKeyAuthenticator;
use crate::config::ApiKeyConfig;
use crate::source::{EnvKeySource, KeySource};

/// Middleware factory that gates every request behind an API key check.
///
/// Wrap an `App` (or a scope) with it; requests to unprotected routes and
/// requests carrying a valid key reach the inner handlers untouched, all
/// others are answered with `401 Unauthorized` before any handler runs.
///
/// # Example
/// ```ignore
/// App::new()
///     .wrap(ApiKeyGate::new(
///         ApiKeyConfig::new().unprotected_route("/v1/health"),
///     ))
///     .service(my_endpoint)
/// ```
pub struct ApiKeyGate<K: KeySource = EnvKeySource> {
    authenticator: ApiKeyAuthenticator<K>,
}

impl ApiKeyGate<EnvKeySource> {
    /// Creates a gate reading keys from the environment variable named by
    /// the configuration.
    pub fn new(config: ApiKeyConfig) -> Self {
        Self {
            authenticator: ApiKeyAuthenticator::new(config),
        }
    }
}

impl<K: KeySource> ApiKeyGate<K> {
    /// Creates a gate with a custom key source.
    pub fn with_source(config: ApiKeyConfig, source: K) -> Self {
        Self {
            authenticator: ApiKeyAuthenticator::with_source(config, source),
        }
    }
}

impl Default for ApiKeyGate<EnvKeySource> {
    fn default() -> Self {
        Self::new(ApiKeyConfig::default())
    }
}

impl<S, B, K> Transform<S, ServiceRequest> for ApiKeyGate<K>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    K: KeySource + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = ApiKeyGateService<K, S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(ApiKeyGateService {
            authenticator: self.authenticator.clone(),
            service: Rc::new(service),
        })
    }
}

/// The per-app service produced by [`ApiKeyGate`].
pub struct ApiKeyGateService<K: KeySource, S> {
    authenticator: ApiKeyAuthenticator<K>,
    service: Rc<S>,
}

impl<S, B, K> Service<ServiceRequest> for ApiKeyGateService<K, S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    K: KeySource,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // The decision is synchronous: one environment-style read, no I/O.
        match self.authenticator.authenticate(&req) {
            Ok(()) => {
                let service = Rc::clone(&self.service);
                Box::pin(async move {
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                })
            }
            Err(err) => Box::pin(async move {
                Ok(req.into_response(err.error_response().map_into_right_body()))
            }),
        }
    }
}
