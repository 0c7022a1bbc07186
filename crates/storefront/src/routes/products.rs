//! Catalog route handlers.

use axum::{
    Json,
    extract::{Path, Query},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use boxpaper_core::{Product, ProductId};

use crate::catalog;
use crate::error::{AppError, Result};

/// Query parameters for the product listing.
#[derive(Debug, Deserialize)]
pub struct ProductsQuery {
    #[serde(default)]
    pub category: Option<String>,
}

/// Product listing response.
#[derive(Debug, Serialize)]
pub struct ProductList {
    pub categories: Vec<&'static str>,
    pub products: Vec<&'static Product>,
}

/// Display the catalog, optionally narrowed to one category.
#[instrument]
pub async fn index(Query(query): Query<ProductsQuery>) -> Json<ProductList> {
    let category = query.category.as_deref().unwrap_or(catalog::ALL_CATEGORIES);
    Json(ProductList {
        categories: catalog::categories(),
        products: catalog::by_category(category),
    })
}

/// Display a single product.
#[instrument]
pub async fn show(Path(id): Path<u32>) -> Result<Json<&'static Product>> {
    catalog::find(ProductId::new(id))
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use axum::http::StatusCode;

    use crate::routes::test_support::*;

    #[tokio::test]
    async fn test_index_lists_everything() {
        let state = state();
        let response = call(&app(&state), get("/api/products", None)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["products"].as_array().unwrap().len(), 7);
        assert_eq!(body["categories"][0], "Все");
    }

    #[tokio::test]
    async fn test_index_filters_by_category() {
        let state = state();
        let uri = "/api/products?category=%D0%A1%D1%82%D0%B8%D0%BB%D1%83%D1%81%D1%8B";
        let body = json_body(call(&app(&state), get(uri, None)).await).await;

        let products = body["products"].as_array().unwrap();
        assert_eq!(products.len(), 3);
        assert!(products.iter().all(|p| p["category"] == "Стилусы"));
    }

    #[tokio::test]
    async fn test_show() {
        let state = state();
        let app = app(&state);

        let body = json_body(call(&app, get("/api/products/6", None)).await).await;
        assert_eq!(body["name"], "Стилус Pro");
        assert_eq!(body["price"], 250);
        assert_eq!(body["badge"], "Pro");

        let response = call(&app, get("/api/products/42", None)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
