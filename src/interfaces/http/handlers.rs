use super::AppState;
use super::dto::{ErrorBody, PaymentStartRequest, PaymentStartResponse};
use crate::domain::checkout::Redirect;
use crate::error::GatewayError;
use axum::Json;
use axum::extract::{RawQuery, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use tracing::{debug, error};

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match self {
            GatewayError::NothingPending => StatusCode::NOT_FOUND,
            _ => {
                error!("Request failed: {}", self);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl IntoResponse for Redirect {
    fn into_response(self) -> Response {
        (StatusCode::FOUND, [(header::LOCATION, self.location)]).into_response()
    }
}

/// Extracts the bearer token, stripping the `Bearer ` prefix.
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    Some(value.strip_prefix("Bearer ").unwrap_or(value).to_string())
}

pub async fn gateway_count(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Json<u32> {
    debug!(query = ?query, "Gateway count requested");
    Json(state.gateway_count)
}

pub async fn clear(State(state): State<AppState>) -> Result<Json<&'static str>, GatewayError> {
    state.coordinator.clear().await?;
    Ok(Json("OK"))
}

pub async fn payment_start(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<PaymentStartRequest>,
) -> Result<Json<PaymentStartResponse>, GatewayError> {
    debug!(request = ?request, "Received payment start");
    let redirect_url = state
        .coordinator
        .start(
            &request.base_attributes.payment_items,
            request.process_success_url,
            request.process_error_url,
            bearer_token(&headers),
        )
        .await?;
    Ok(Json(PaymentStartResponse { redirect_url }))
}

pub async fn checkin(State(state): State<AppState>) -> Result<Redirect, GatewayError> {
    state.coordinator.complete().await
}

pub async fn bad_checkin(State(state): State<AppState>) -> Result<Redirect, GatewayError> {
    state.coordinator.complete_as_cancellation().await
}

pub async fn set_pending(State(state): State<AppState>) -> Json<&'static str> {
    state.coordinator.set_pending_next().await;
    Json("OK")
}
