//! Server side of the payment exchange.
//!
//! Validates incoming payment requests and issues a pending receipt with a
//! provider payment link. No money moves here: the link points at the
//! provider's hosted payment page, which is outside this system.

use thiserror::Error;

use boxpaper_core::{Money, PaymentMethod};

use super::{CustomerSummary, PaymentRequest, PaymentResponse};

/// Reasons a payment request is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentValidationError {
    #[error("amount must be greater than zero")]
    NonPositiveAmount,

    #[error("at least one item is required")]
    NoItems,

    #[error("item {0}: price must be greater than zero")]
    NonPositivePrice(u32),

    #[error("item {0}: quantity must be greater than zero")]
    NonPositiveQuantity(u32),

    #[error("customerInfo.{0} must not be empty")]
    MissingCustomerField(&'static str),
}

/// Check a payment request before issuing a receipt.
///
/// # Errors
///
/// Returns the first problem found, in field order.
pub fn validate(request: &PaymentRequest) -> Result<(), PaymentValidationError> {
    if !request.amount.is_positive() {
        return Err(PaymentValidationError::NonPositiveAmount);
    }

    if let Some(field) = request.customer_info.missing_fields().first().copied() {
        return Err(PaymentValidationError::MissingCustomerField(field));
    }

    if request.items.is_empty() {
        return Err(PaymentValidationError::NoItems);
    }

    for item in &request.items {
        if !item.price.is_positive() {
            return Err(PaymentValidationError::NonPositivePrice(item.id.as_u32()));
        }
        if item.quantity == 0 {
            return Err(PaymentValidationError::NonPositiveQuantity(
                item.id.as_u32(),
            ));
        }
    }

    Ok(())
}

/// Order id derived from the request id: `ORDER-` plus its first eight
/// characters, uppercased.
#[must_use]
pub fn order_id_for(request_id: &str) -> String {
    let prefix: String = request_id.chars().take(8).collect();
    format!("ORDER-{}", prefix.to_uppercase())
}

/// Hosted payment page for a provider.
#[must_use]
pub fn payment_url(method: PaymentMethod, order_id: &str, amount: Money) -> String {
    let amount = amount.units();
    match method {
        PaymentMethod::Sbp => {
            format!("https://sbp.payment.ru/pay?order={order_id}&amount={amount}")
        }
        PaymentMethod::Tbank => {
            format!("https://securepay.tinkoff.ru/pay?order={order_id}&amount={amount}")
        }
        PaymentMethod::Sber => {
            format!("https://securepayments.sberbank.ru/payment?order={order_id}&amount={amount}")
        }
    }
}

/// Build the success response for a validated request.
#[must_use]
pub fn issue_receipt(request: &PaymentRequest, request_id: &str) -> PaymentResponse {
    let order_id = order_id_for(request_id);
    let payment_url = payment_url(request.payment_method, &order_id, request.amount);

    PaymentResponse {
        success: true,
        amount: Some(request.amount),
        payment_method: Some(request.payment_method),
        payment_url: Some(payment_url),
        customer: Some(CustomerSummary {
            name: request.customer_info.full_name.clone(),
            email: request.customer_info.email.clone(),
            phone: request.customer_info.phone.clone(),
        }),
        items_count: Some(request.items.len()),
        status: Some("pending".to_owned()),
        order_id: Some(order_id),
        error: None,
        message: None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use boxpaper_core::{CartItem, CustomerInfo, ProductId};

    use super::*;

    fn request() -> PaymentRequest {
        PaymentRequest {
            amount: Money::new(700),
            payment_method: PaymentMethod::Tbank,
            customer_info: CustomerInfo {
                full_name: "Иван Петров".to_string(),
                email: "ivan@example.com".to_string(),
                phone: "+79000000000".to_string(),
                address: "ул. Ленина, 1".to_string(),
                city: "Москва".to_string(),
                postal_code: String::new(),
            },
            items: vec![CartItem {
                id: ProductId::new(1),
                name: "Картхолдер MagSafe".to_string(),
                price: Money::new(350),
                quantity: 2,
                image: String::new(),
            }],
        }
    }

    #[test]
    fn test_valid_request() {
        assert_eq!(validate(&request()), Ok(()));
    }

    #[test]
    fn test_rejects_zero_amount() {
        let mut req = request();
        req.amount = Money::ZERO;
        assert_eq!(
            validate(&req),
            Err(PaymentValidationError::NonPositiveAmount)
        );
    }

    #[test]
    fn test_rejects_empty_items() {
        let mut req = request();
        req.items.clear();
        assert_eq!(validate(&req), Err(PaymentValidationError::NoItems));
    }

    #[test]
    fn test_rejects_bad_item() {
        let mut req = request();
        req.items[0].quantity = 0;
        assert_eq!(
            validate(&req),
            Err(PaymentValidationError::NonPositiveQuantity(1))
        );
    }

    #[test]
    fn test_rejects_blank_customer_field() {
        let mut req = request();
        req.customer_info.email = String::new();
        assert_eq!(
            validate(&req),
            Err(PaymentValidationError::MissingCustomerField("email"))
        );
    }

    #[test]
    fn test_order_id_from_request_id() {
        assert_eq!(
            order_id_for("3f9c1a7e-0b4d-4c2e-9a51-6f1d2e3c4b5a"),
            "ORDER-3F9C1A7E"
        );
    }

    #[test]
    fn test_issue_receipt() {
        let response = issue_receipt(&request(), "abcdef1234567890");
        assert!(response.success);
        assert_eq!(response.order_id.as_deref(), Some("ORDER-ABCDEF12"));
        assert_eq!(
            response.payment_url.as_deref(),
            Some("https://securepay.tinkoff.ru/pay?order=ORDER-ABCDEF12&amount=700")
        );
        assert_eq!(response.items_count, Some(1));
        assert_eq!(response.status.as_deref(), Some("pending"));
        assert_eq!(response.customer.unwrap().name, "Иван Петров");
    }
}
