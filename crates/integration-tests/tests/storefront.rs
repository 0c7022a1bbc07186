//! Storefront API flows over HTTP.

#![allow(clippy::indexing_slicing)]

use reqwest::StatusCode;
use serde_json::{Value, json};

use boxpaper_integration_tests::{TestServer, checkout_form, client};

async fn get_json(client: &reqwest::Client, url: String) -> Value {
    client
        .get(url)
        .send()
        .await
        .expect("Request failed")
        .json()
        .await
        .expect("Body is not JSON")
}

#[tokio::test]
async fn test_health_and_catalog() {
    let server = TestServer::start(&[]).await;
    let client = client();

    let resp = client
        .get(server.url("/health"))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));

    let catalog = get_json(&client, server.url("/api/products")).await;
    assert_eq!(catalog["products"].as_array().expect("products").len(), 7);

    let cases = get_json(&client, server.url("/api/products?category=Чехлы")).await;
    assert_eq!(cases["products"].as_array().expect("products").len(), 3);
}

#[tokio::test]
async fn test_cart_is_kept_per_visitor() {
    let server = TestServer::start(&[]).await;
    let alice = client();
    let bob = client();

    alice
        .post(server.url("/api/cart/add"))
        .json(&json!({"productId": 7}))
        .send()
        .await
        .expect("Request failed");

    let cart = get_json(&alice, server.url("/api/cart")).await;
    assert_eq!(cart["total"], 250);

    let cart = get_json(&bob, server.url("/api/cart")).await;
    assert_eq!(cart["items"], json!([]));
}

#[tokio::test]
async fn test_order_history_lifecycle() {
    let server = TestServer::start(&[]).await;
    let client = client();

    for product in [2, 5] {
        client
            .post(server.url("/api/cart/add"))
            .json(&json!({"productId": product}))
            .send()
            .await
            .expect("Request failed");
    }
    let placed: Value = client
        .post(server.url("/api/checkout"))
        .json(&checkout_form("tbank"))
        .send()
        .await
        .expect("Request failed")
        .json()
        .await
        .expect("Body is not JSON");
    let order_id = placed["order"]["orderId"]
        .as_str()
        .expect("orderId")
        .to_string();
    assert_eq!(placed["order"]["totalAmount"], 750);

    let orders = get_json(&client, server.url("/api/orders")).await;
    assert_eq!(orders[0]["orderId"], order_id.as_str());

    let resp = client
        .post(server.url(&format!("/api/orders/{order_id}/status")))
        .json(&json!({"status": "confirmed"}))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let order = get_json(&client, server.url(&format!("/api/orders/{order_id}"))).await;
    assert_eq!(order["status"], "confirmed");
    assert_eq!(order["totalAmount"], 750);

    let resp = client
        .delete(server.url(&format!("/api/orders/{order_id}")))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(server.orders_on_disk().orders().is_empty());

    let resp = client
        .delete(server.url(&format!("/api/orders/{order_id}")))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_account_lifecycle() {
    let server = TestServer::start(&[]).await;
    let client = client();

    let resp = client
        .get(server.url("/api/account"))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = client
        .post(server.url("/api/account/register"))
        .json(&json!({"name": "Анна", "email": "anna@example.com", "password": "pw"}))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let account = get_json(&client, server.url("/api/account")).await;
    assert_eq!(account["name"], "Анна");
    assert!(server.state().identity().is_authenticated());

    let resp = client
        .post(server.url("/api/account/logout"))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = client
        .post(server.url("/api/account/login"))
        .json(&json!({"email": "anna@example.com", "password": "pw"}))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
