//! Orders and the checkout contact details they are built from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CartItem, Money, OrderId, OrderStatus, PaymentMethod};

/// Contact and delivery details entered on the checkout form.
///
/// Everything except `postal_code` is required before checkout can start.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    #[serde(default)]
    pub postal_code: String,
}

impl CustomerInfo {
    /// Names of required fields that are empty or whitespace-only, in form order.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("fullName", &self.full_name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("address", &self.address),
            ("city", &self.city),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// Whether every required field is filled in.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// The subset of the form that is stored on the order.
    #[must_use]
    pub fn delivery_address(&self) -> DeliveryAddress {
        DeliveryAddress {
            full_name: self.full_name.clone(),
            address: self.address.clone(),
            city: self.city.clone(),
            phone: self.phone.clone(),
        }
    }
}

/// Where an order ships to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryAddress {
    pub full_name: String,
    pub address: String,
    pub city: String,
    pub phone: String,
}

/// A saved order.
///
/// The line items are a by-value snapshot of the cart at checkout time and the
/// total is computed once, on construction. After that only the status can
/// change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    order_id: OrderId,
    date: DateTime<Utc>,
    items: Vec<CartItem>,
    total_amount: Money,
    status: OrderStatus,
    payment_method: PaymentMethod,
    delivery_address: DeliveryAddress,
}

impl Order {
    /// Build a new pending order from a snapshot of cart lines.
    #[must_use]
    pub fn new(
        order_id: OrderId,
        date: DateTime<Utc>,
        items: Vec<CartItem>,
        payment_method: PaymentMethod,
        delivery_address: DeliveryAddress,
    ) -> Self {
        let total_amount = items.iter().map(CartItem::line_total).sum();
        Self {
            order_id,
            date,
            items,
            total_amount,
            status: OrderStatus::Pending,
            payment_method,
            delivery_address,
        }
    }

    #[must_use]
    pub const fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    #[must_use]
    pub const fn date(&self) -> DateTime<Utc> {
        self.date
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub const fn total_amount(&self) -> Money {
        self.total_amount
    }

    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        self.status
    }

    #[must_use]
    pub const fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    #[must_use]
    pub const fn delivery_address(&self) -> &DeliveryAddress {
        &self.delivery_address
    }

    /// Change the order status. This is the only post-creation mutation.
    pub const fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
    }
}
