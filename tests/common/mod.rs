#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use billing_mock::application::assertion::AssertionBuilder;
use billing_mock::application::coordinator::RedirectCoordinator;
use billing_mock::domain::payout::{AssertionOptions, PayoutAssertion};
use billing_mock::infrastructure::in_memory::PositionalLedger;
use billing_mock::infrastructure::jwt::Hs256Signer;
use billing_mock::interfaces::http::{AppState, router};
use serde_json::{Value, json};
use tower::ServiceExt;

pub const SECRET: &str = "test-billing-secret-key-2024";
pub const CONFIRMATION_URL: &str = "http://localhost:4201/checkin";

pub fn app() -> Router {
    app_with_fallback(None)
}

pub fn app_with_fallback(fallback_url: Option<&str>) -> Router {
    let signer = Hs256Signer::new(SECRET).unwrap();
    let coordinator = RedirectCoordinator::new(
        Box::new(PositionalLedger::new()),
        AssertionBuilder::new(Box::new(signer), AssertionOptions::default()),
        CONFIRMATION_URL,
    )
    .with_fallback_url(fallback_url.map(str::to_string));
    router(AppState::new(coordinator, 2))
}

pub fn line_item(provider: &str, amount: Value, currency: &str) -> Value {
    json!({
        "productProviderExternalId": provider,
        "amount": amount,
        "currency": currency,
        "paymentItemExternalId": format!("bill-{provider}")
    })
}

pub fn start_body(success_url: &str, error_url: &str, items: Vec<Value>) -> Value {
    json!({
        "processSuccessUrl": success_url,
        "processErrorUrl": error_url,
        "baseAttributes": { "paymentItems": items }
    })
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post(app: &Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn start_payment(app: &Router, body: &Value, token: Option<&str>) -> Response<Body> {
    post_json(app, "/api/payment-start", body, token).await
}

pub async fn post_json(
    app: &Router,
    uri: &str,
    body: &Value,
    token: Option<&str>,
) -> Response<Body> {
    let mut request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        request = request.header("authorization", format!("Bearer {token}"));
    }

    app.clone()
        .oneshot(request.body(Body::from(serde_json::to_vec(body).unwrap())).unwrap())
        .await
        .unwrap()
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn location(response: &Response<Body>) -> String {
    response.headers()["location"].to_str().unwrap().to_string()
}

pub fn query_param(url: &str, key: &str) -> Option<String> {
    let (_, query) = url.split_once('?')?;
    query
        .split('&')
        .find_map(|pair| pair.strip_prefix(&format!("{key}=")).map(str::to_string))
}

pub fn decode_assertion(url: &str) -> PayoutAssertion {
    let jwt = query_param(url, "jwt").expect("redirect should carry a jwt");
    Hs256Signer::new(SECRET).unwrap().decode(&jwt).unwrap()
}
