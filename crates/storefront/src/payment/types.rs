//! Payment wire types.
//!
//! Field names are camelCase on the wire to match the browser client that
//! also talks to the payment endpoint.

use serde::{Deserialize, Serialize};

use boxpaper_core::{CartItem, CustomerInfo, Money, OrderId, PaymentMethod};

use super::{PaymentError, PaymentReceipt};

/// Body of a payment request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub amount: Money,
    pub payment_method: PaymentMethod,
    pub customer_info: CustomerInfo,
    pub items: Vec<CartItem>,
}

/// Customer echo included in a successful response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSummary {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Body of a payment response.
///
/// Only `success` is guaranteed. A successful response carries the order id
/// and payment details; a failed one carries `error` and usually `message`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<CustomerSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl PaymentResponse {
    /// A failure body with an error title and detail message.
    #[must_use]
    pub fn failure(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Interpret the body as a receipt.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError::Declined` if `success` is false and
    /// `PaymentError::MissingOrderId` if it is true without an order id.
    pub fn into_receipt(self) -> Result<PaymentReceipt, PaymentError> {
        if !self.success {
            return Err(PaymentError::Declined(self.message.or(self.error)));
        }

        let order_id = self
            .order_id
            .filter(|id| !id.trim().is_empty())
            .ok_or(PaymentError::MissingOrderId)?;

        Ok(PaymentReceipt {
            order_id: OrderId::new(order_id),
            payment_url: self.payment_url,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_success_body() {
        let body: PaymentResponse =
            serde_json::from_str(r#"{"success": true, "orderId": "ORDER-ABCD1234"}"#).unwrap();
        let receipt = body.into_receipt().unwrap();
        assert_eq!(receipt.order_id.as_str(), "ORDER-ABCD1234");
        assert_eq!(receipt.payment_url, None);
    }

    #[test]
    fn test_error_body_is_a_decline() {
        let body: PaymentResponse =
            serde_json::from_str(r#"{"error": "Invalid request", "message": "amount"}"#).unwrap();
        assert!(!body.success);
        assert!(matches!(
            body.into_receipt(),
            Err(PaymentError::Declined(Some(msg))) if msg == "amount"
        ));
    }

    #[test]
    fn test_success_without_order_id() {
        let body = PaymentResponse {
            success: true,
            order_id: Some("  ".to_string()),
            ..PaymentResponse::default()
        };
        assert!(matches!(
            body.into_receipt(),
            Err(PaymentError::MissingOrderId)
        ));
    }

    #[test]
    fn test_request_wire_format() {
        let request = PaymentRequest {
            amount: Money::new(700),
            payment_method: PaymentMethod::Sbp,
            customer_info: CustomerInfo::default(),
            items: Vec::new(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json.get("amount").unwrap(), 700);
        assert_eq!(json.get("paymentMethod").unwrap(), "sbp");
        assert!(json.get("customerInfo").unwrap().get("postalCode").is_some());
    }
}
