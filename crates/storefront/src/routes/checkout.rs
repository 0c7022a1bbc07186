//! Checkout route handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use boxpaper_core::{CustomerInfo, PaymentMethod};

use crate::error::Result;
use crate::middleware::{checkout_key, load_cart};
use crate::services::{CheckoutOutcome, CheckoutState};
use crate::state::AppState;

/// Checkout form.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
    #[serde(default)]
    pub payment_method: PaymentMethod,
    pub customer_info: CustomerInfo,
}

/// Checkout state of the visitor's session.
pub async fn state(State(state): State<AppState>, session: Session) -> Json<CheckoutState> {
    Json(state.checkout().state(&checkout_key(&session)))
}

/// Place an order for the session cart.
///
/// Once accepted, the attempt runs to completion even if the client goes
/// away; the emptied cart is then written back to the session by the
/// reconciler. On error the session cart is left as it was.
#[instrument(skip(state, session, form), fields(method = %form.payment_method))]
pub async fn place_order(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<CheckoutForm>,
) -> Result<(StatusCode, Json<CheckoutOutcome>)> {
    let cart = load_cart(&session).await;
    let key = checkout_key(&session);

    let outcome = state
        .checkout()
        .checkout(&key, session, cart, form.customer_info, form.payment_method)
        .await?;

    Ok((StatusCode::CREATED, Json(outcome)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    use crate::routes::test_support::*;

    fn customer() -> Value {
        json!({
            "fullName": "Иван Петров",
            "email": "ivan@example.com",
            "phone": "+79000000000",
            "address": "ул. Ленина, 1",
            "city": "Москва",
        })
    }

    #[tokio::test]
    async fn test_checkout_with_unreachable_payment_falls_back() {
        let state = state();
        let app = app(&state);

        let response = call(
            &app,
            send_json("POST", "/api/cart/add", &json!({"productId": 1}), None),
        )
        .await;
        let cookie = session_cookie(&response).unwrap();
        call(
            &app,
            send_json("POST", "/api/cart/add", &json!({"productId": 1}), Some(&cookie)),
        )
        .await;

        let response = call(
            &app,
            send_json(
                "POST",
                "/api/checkout",
                &json!({"paymentMethod": "tbank", "customerInfo": customer()}),
                Some(&cookie),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = json_body(response).await;
        assert_eq!(body["order"]["totalAmount"], 700);
        assert_eq!(body["order"]["status"], "pending");
        assert_eq!(body["order"]["paymentMethod"], "tbank");
        assert_eq!(body["resolution"]["kind"], "fallback");
        let order_id = body["order"]["orderId"].as_str().unwrap();
        assert!(order_id.starts_with("ORDER-"));

        let cart = json_body(call(&app, get("/api/cart", Some(&cookie))).await).await;
        assert_eq!(cart["items"], json!([]));

        let orders = json_body(call(&app, get("/api/orders", None)).await).await;
        assert_eq!(orders[0]["orderId"], order_id);

        let checkout = json_body(call(&app, get("/api/checkout", Some(&cookie))).await).await;
        assert_eq!(checkout["state"], "complete");
        assert_eq!(checkout["orderId"], order_id);

        let checkout = json_body(call(&app, get("/api/checkout", None)).await).await;
        assert_eq!(checkout["state"], "idle");
    }

    #[tokio::test]
    async fn test_checkout_empty_cart_is_bad_request() {
        let state = state();
        let response = call(
            &app(&state),
            send_json(
                "POST",
                "/api/checkout",
                &json!({"customerInfo": customer()}),
                None,
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(state.orders().orders().is_empty());
    }

    #[tokio::test]
    async fn test_checkout_missing_fields_keeps_cart() {
        let state = state();
        let app = app(&state);

        let response = call(
            &app,
            send_json("POST", "/api/cart/add", &json!({"productId": 3}), None),
        )
        .await;
        let cookie = session_cookie(&response).unwrap();

        let mut info = customer();
        info["phone"] = json!("");
        let response = call(
            &app,
            send_json(
                "POST",
                "/api/checkout",
                &json!({"paymentMethod": "sber", "customerInfo": info}),
                Some(&cookie),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["fields"], json!(["phone"]));

        let cart = json_body(call(&app, get("/api/cart", Some(&cookie))).await).await;
        assert_eq!(cart["items"].as_array().unwrap().len(), 1);
        assert!(state.orders().orders().is_empty());
    }
}
