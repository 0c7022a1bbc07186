//! Cart route handlers.
//!
//! The cart is kept in the visitor's session. Every handler loads it, applies
//! one operation and writes it back, then answers with the full cart view.

use axum::Json;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use boxpaper_core::{Cart, CartItem, Money, ProductId};

use crate::catalog;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::{load_cart, save_cart};

/// Cart response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartItem>,
    pub item_count: u32,
    pub total: Money,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items().to_vec(),
            item_count: cart.item_count(),
            total: cart.total(),
        }
    }
}

/// Body naming a product.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRef {
    pub product_id: ProductId,
}

/// Body for a quantity change.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuantity {
    pub product_id: ProductId,
    pub delta: i64,
}

/// Display the cart.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Json<CartView> {
    Json(CartView::from(&load_cart(&session).await))
}

/// Add one unit of a catalog product.
#[instrument(skip(session))]
pub async fn add(session: Session, Json(body): Json<ProductRef>) -> Result<Json<CartView>> {
    let product = catalog::find(body.product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {}", body.product_id)))?;

    let mut cart = load_cart(&session).await;
    cart.add(product);
    save_cart(&session, &cart).await?;

    add_breadcrumb(
        "cart",
        "Added to cart",
        Some(&[("product_id", &body.product_id.to_string())]),
    );
    Ok(Json(CartView::from(&cart)))
}

/// Change a line's quantity by `delta`. Reaching zero removes the line.
#[instrument(skip(session))]
pub async fn update(
    session: Session,
    Json(body): Json<UpdateQuantity>,
) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session).await;
    if cart.update_quantity(body.product_id, body.delta) {
        save_cart(&session, &cart).await?;
    }
    Ok(Json(CartView::from(&cart)))
}

/// Remove a line.
#[instrument(skip(session))]
pub async fn remove(session: Session, Json(body): Json<ProductRef>) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session).await;
    if cart.remove(body.product_id) {
        save_cart(&session, &cart).await?;
    }
    Ok(Json(CartView::from(&cart)))
}
