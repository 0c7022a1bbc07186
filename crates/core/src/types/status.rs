//! Status and method enums for orders.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a stored order.
///
/// Every order starts out `Pending`, whether or not the payment endpoint
/// confirmed it. Status is the only field that changes after an order is saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::Confirmed,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// Wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Label shown in the order history.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Ожидает оплаты",
            Self::Confirmed => "Подтверждён",
            Self::Delivered => "Доставлен",
            Self::Cancelled => "Отменён",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// Payment provider chosen at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Faster Payments System.
    #[default]
    Sbp,
    /// T-Bank acquiring.
    Tbank,
    /// Sberbank acquiring.
    Sber,
}

impl PaymentMethod {
    /// Wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sbp => "sbp",
            Self::Tbank => "tbank",
            Self::Sber => "sber",
        }
    }

    /// Label shown on the confirmation screen.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Sbp => "СБП",
            Self::Tbank => "Т-Банк",
            Self::Sber => "Сбер",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sbp" => Ok(Self::Sbp),
            "tbank" => Ok(Self::Tbank),
            "sber" => Ok(Self::Sber),
            _ => Err(format!("invalid payment method: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Cancelled).unwrap(),
            "\"cancelled\""
        );
        let parsed: OrderStatus = serde_json::from_str("\"delivered\"").unwrap();
        assert_eq!(parsed, OrderStatus::Delivered);
    }

    #[test]
    fn test_order_status_from_str_matches_display() {
        for status in OrderStatus::ALL {
            assert_eq!(status.to_string().parse::<OrderStatus>().unwrap(), status);
        }
        assert!("shipped".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_payment_method_wire_format() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Tbank).unwrap(),
            "\"tbank\""
        );
        assert_eq!("sber".parse::<PaymentMethod>().unwrap(), PaymentMethod::Sber);
        assert!("visa".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
        assert_eq!(PaymentMethod::default(), PaymentMethod::Sbp);
    }
}
