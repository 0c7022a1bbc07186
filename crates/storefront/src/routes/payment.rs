//! Payment endpoint.
//!
//! Browser clients on other origins may call it, so it answers CORS preflight
//! for any origin. The order id is derived from the request id.

use std::time::Duration;

use axum::{
    Json, Router,
    body::Bytes,
    http::{Method, StatusCode, header},
    routing::post,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::instrument;

use crate::middleware::RequestId;
use crate::payment::{PaymentRequest, PaymentResponse, endpoint};
use crate::state::AppState;

/// How long browsers may cache a preflight answer.
const PREFLIGHT_MAX_AGE: Duration = Duration::from_secs(86_400);

/// Create the payment endpoint router.
pub fn routes() -> Router<AppState> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(PREFLIGHT_MAX_AGE);

    Router::new()
        .route("/api/payment", post(create_payment))
        .layer(cors)
}

/// Validate a payment request and issue a pending receipt.
///
/// Any malformed or invalid body is answered with 400 and
/// `{"error": "Invalid request", "message": ...}`.
#[instrument(skip(request_id, body), fields(request_id = %request_id.as_str()))]
pub async fn create_payment(
    request_id: RequestId,
    body: Bytes,
) -> (StatusCode, Json<PaymentResponse>) {
    let request: PaymentRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => return invalid(e.to_string()),
    };

    if let Err(e) = endpoint::validate(&request) {
        return invalid(e.to_string());
    }

    let receipt = endpoint::issue_receipt(&request, request_id.as_str());
    tracing::info!(
        order_id = receipt.order_id.as_deref().unwrap_or_default(),
        amount = request.amount.units(),
        method = %request.payment_method,
        "Payment registered"
    );
    (StatusCode::OK, Json(receipt))
}

fn invalid(message: String) -> (StatusCode, Json<PaymentResponse>) {
    tracing::debug!(%message, "Rejected payment request");
    (
        StatusCode::BAD_REQUEST,
        Json(PaymentResponse::failure("Invalid request", message)),
    )
}
