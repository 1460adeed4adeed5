//! Integration tests for the API key gate middleware.
//!
//! These drive a full Actix Web test app wrapped with `ApiKeyGate` and check
//! the end-to-end allow/deny behavior across the supported key channels.
//!
//! Tests that read real environment variables each use a distinct variable
//! name so they stay independent under the parallel test runner.

use actix_apikey::{ApiKeyConfig, ApiKeyGate, StaticKeySource};
use actix_web::http::StatusCode;
use actix_web::{get, test, App, HttpResponse, Responder};

#[get("/v1/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().body("healthy")
}

#[get("/v1/protected")]
async fn protected() -> impl Responder {
    HttpResponse::Ok().body("Congratulations! You have the power to access this protected route!")
}

async fn create_app(
    gate: ApiKeyGate<StaticKeySource>,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = actix_web::dev::ServiceResponse<
        actix_web::body::EitherBody<actix_web::body::BoxBody>,
    >,
    Error = actix_web::Error,
> {
    test::init_service(App::new().wrap(gate).service(health).service(protected)).await
}

fn gate_with_keys(config: ApiKeyConfig, keys: &[&str]) -> ApiKeyGate<StaticKeySource> {
    let mut source = StaticKeySource::new();
    for key in keys {
        source = source.with_key(*key);
    }
    ApiKeyGate::with_source(config, source)
}

#[actix_web::test]
async fn allows_unprotected_route_without_key() {
    let gate = gate_with_keys(ApiKeyConfig::new().unprotected_route("/v1/health"), &[]);
    let app = create_app(gate).await;

    let req = test::TestRequest::get().uri("/v1/health").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = test::read_body(res).await;
    assert_eq!(body, "healthy");
}

#[actix_web::test]
async fn denies_protected_route_with_missing_key() {
    let gate = gate_with_keys(ApiKeyConfig::new().unprotected_route("/v1/health"), &[]);
    let app = create_app(gate).await;

    let req = test::TestRequest::get().uri("/v1/protected").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn denies_protected_route_with_invalid_key() {
    let gate = gate_with_keys(ApiKeyConfig::new(), &["abc123"]);
    let app = create_app(gate).await;

    let req = test::TestRequest::get()
        .uri("/v1/protected")
        .insert_header(("x-apikey", "invalid"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn allows_protected_route_with_valid_key() {
    let gate = gate_with_keys(ApiKeyConfig::new(), &["abc123"]);
    let app = create_app(gate).await;

    let req = test::TestRequest::get()
        .uri("/v1/protected")
        .insert_header(("x-apikey", "abc123"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = test::read_body(res).await;
    assert_eq!(
        body,
        "Congratulations! You have the power to access this protected route!"
    );
}

#[actix_web::test]
async fn allows_valid_key_among_multiple_keys() {
    let gate = gate_with_keys(ApiKeyConfig::new(), &["abc123", "def456"]);
    let app = create_app(gate).await;

    let req = test::TestRequest::get()
        .uri("/v1/protected")
        .insert_header(("x-apikey", "def456"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[actix_web::test]
async fn allows_valid_key_in_custom_header() {
    let gate = gate_with_keys(
        ApiKeyConfig::new().custom_header("my-custom-apikey-header"),
        &["abc123"],
    );
    let app = create_app(gate).await;

    let req = test::TestRequest::get()
        .uri("/v1/protected")
        .insert_header(("my-custom-apikey-header", "abc123"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[actix_web::test]
async fn falls_back_to_standard_header_when_custom_absent() {
    let gate = gate_with_keys(
        ApiKeyConfig::new().custom_header("my-custom-apikey-header"),
        &["abc123"],
    );
    let app = create_app(gate).await;

    let req = test::TestRequest::get()
        .uri("/v1/protected")
        .insert_header(("x-apikey", "abc123"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[actix_web::test]
async fn custom_header_takes_precedence_over_standard_header() {
    let gate = gate_with_keys(
        ApiKeyConfig::new().custom_header("my-custom-apikey-header"),
        &["abc123"],
    );
    let app = create_app(gate).await;

    // A bad value in the custom header must deny even though x-apikey holds
    // a valid one.
    let req = test::TestRequest::get()
        .uri("/v1/protected")
        .insert_header(("my-custom-apikey-header", "invalid"))
        .insert_header(("x-apikey", "abc123"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn allows_valid_key_in_query_parameter() {
    let gate = gate_with_keys(ApiKeyConfig::new(), &["abc123"]);
    let app = create_app(gate).await;

    let req = test::TestRequest::get()
        .uri("/v1/protected?api-key=abc123")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/v1/protected?apikey=abc123")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[actix_web::test]
async fn denies_everything_when_key_set_is_empty() {
    let gate = gate_with_keys(ApiKeyConfig::new(), &[]);
    let app = create_app(gate).await;

    let req = test::TestRequest::get()
        .uri("/v1/protected")
        .insert_header(("x-apikey", "abc123"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn unauthorized_response_has_json_body() {
    let gate = gate_with_keys(ApiKeyConfig::new(), &[]);
    let app = create_app(gate).await;

    let req = test::TestRequest::get().uri("/v1/protected").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let body = test::read_body(res).await;
    let body = std::str::from_utf8(&body).unwrap();
    assert!(body.contains("Unauthorized"));
}

// Environment-backed scenarios, each with its own variable name.

async fn create_env_app(
    config: ApiKeyConfig,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = actix_web::dev::ServiceResponse<
        actix_web::body::EitherBody<actix_web::body::BoxBody>,
    >,
    Error = actix_web::Error,
> {
    test::init_service(
        App::new()
            .wrap(ApiKeyGate::new(config))
            .service(health)
            .service(protected),
    )
    .await
}

#[actix_web::test]
async fn env_unset_variable_denies_protected_and_allows_unprotected() {
    let config = ApiKeyConfig::new()
        .env_var("GATE_TEST_UNSET")
        .unprotected_route("/v1/health");
    let app = create_env_app(config).await;

    let req = test::TestRequest::get().uri("/v1/health").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/v1/protected").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn env_variable_provides_valid_keys() {
    std::env::set_var("GATE_TEST_KEYS", "abc123,def456");
    let app = create_env_app(ApiKeyConfig::new().env_var("GATE_TEST_KEYS")).await;

    let req = test::TestRequest::get()
        .uri("/v1/protected")
        .insert_header(("x-apikey", "def456"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/v1/protected")
        .insert_header(("x-apikey", "invalid"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn env_variable_change_applies_on_next_request() {
    std::env::set_var("GATE_TEST_ROTATION", "abc123");
    let app = create_env_app(ApiKeyConfig::new().env_var("GATE_TEST_ROTATION")).await;

    let req = test::TestRequest::get()
        .uri("/v1/protected")
        .insert_header(("x-apikey", "rotated"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    std::env::set_var("GATE_TEST_ROTATION", "abc123,rotated");
    let req = test::TestRequest::get()
        .uri("/v1/protected")
        .insert_header(("x-apikey", "rotated"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
}
