//! Catalog product type.

use serde::{Deserialize, Serialize};

use super::{Money, ProductId};

/// A product as listed in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub price: Money,
    pub image: String,
    /// Promotional badge such as "Хит" or "Новинка".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
}
