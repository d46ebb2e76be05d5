//! Order fulfillment state machine.

use serde::{Deserialize, Serialize};

/// Fulfillment status of an order.
///
/// Allowed transitions:
/// ```text
/// pending ──► processing ──► delivered
///    │             │
///    └─────────────┴──► cancelled
/// ```
/// `delivered` and `cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Newly created, awaiting fulfillment.
    #[default]
    Pending,

    /// Being prepared for delivery.
    Processing,

    /// Handed over to the customer (terminal).
    Delivered,

    /// Called off before delivery (terminal).
    Cancelled,
}

impl OrderStatus {
    /// Returns true if the fulfillment graph allows moving to `next`.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Processing) | (Pending, Cancelled) | (Processing, Delivered) | (Processing, Cancelled)
        )
    }

    /// Returns true if no further transition is expected.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Returns the wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether the order has been paid.
///
/// Strictly derived from the fulfillment status: cash on delivery means
/// an order is paid exactly when it is delivered. Never set this
/// independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    #[default]
    Unpaid,
}

impl PaymentStatus {
    /// Derives the payment status for a fulfillment status.
    pub fn derived_from(status: OrderStatus) -> Self {
        if status == OrderStatus::Delivered {
            PaymentStatus::Paid
        } else {
            PaymentStatus::Unpaid
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Paid => write!(f, "paid"),
            PaymentStatus::Unpaid => write!(f, "unpaid"),
        }
    }
}

/// How the order is paid. Cash on delivery is the only supported method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    CashOnDelivery,
}
