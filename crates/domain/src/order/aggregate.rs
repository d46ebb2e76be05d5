//! Order aggregate.
//!
//! An order is a priced snapshot of a cart at checkout time plus the
//! shipping details the buyer supplied. Line prices are copied from the
//! catalog when the order is placed and never re-read, so later catalog
//! edits leave existing orders untouched.

use chrono::{DateTime, Utc};
use common::{BookId, Money, UserId};
use serde::{Deserialize, Serialize};

use super::pricing::PricedCheckout;
use super::status::{OrderStatus, PaymentMethod, PaymentStatus};
use super::OrderError;

/// Street-level shipping address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
}

/// Who the order ships to and where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: Address,
}

/// One entry of the order's status trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub status: OrderStatus,
    pub date: DateTime<Utc>,
}

/// A priced order line. `unit_price` and `line_total` are snapshots
/// taken at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub book: BookId,
    pub quantity: u32,
    pub unit_price: Money,
    pub line_total: Money,
}

/// Fields of an order a buyer may correct after placing it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactUpdate {
    pub phone: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
}

/// A placed order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    owner: UserId,
    lines: Vec<OrderLine>,
    total_amount: Money,
    shipping_cost: Money,
    status: OrderStatus,
    payment_method: PaymentMethod,
    payment_status: PaymentStatus,
    shipping_details: ShippingDetails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    order_history: Vec<HistoryEntry>,
    created_at: DateTime<Utc>,
}

impl Order {
    /// Places a new order from a priced checkout. Starts `pending`,
    /// unpaid, cash on delivery, with the status trail seeded.
    pub fn place(
        owner: UserId,
        priced: PricedCheckout,
        shipping_details: ShippingDetails,
        notes: Option<String>,
    ) -> Self {
        let now = Utc::now();
        let status = OrderStatus::Pending;
        Self {
            owner,
            lines: priced.lines,
            total_amount: priced.total_amount,
            shipping_cost: priced.shipping_cost,
            status,
            payment_method: PaymentMethod::CashOnDelivery,
            payment_status: PaymentStatus::derived_from(status),
            shipping_details,
            notes,
            order_history: vec![HistoryEntry { status, date: now }],
            created_at: now,
        }
    }

    pub fn owner(&self) -> UserId {
        self.owner
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    pub fn shipping_cost(&self) -> Money {
        self.shipping_cost
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub fn payment_status(&self) -> PaymentStatus {
        self.payment_status
    }

    pub fn shipping_details(&self) -> &ShippingDetails {
        &self.shipping_details
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.order_history
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Moves the order to `next`, re-deriving the payment status and
    /// appending to the status trail. Rejects moves the fulfillment
    /// graph does not allow.
    pub fn transition(&mut self, next: OrderStatus) -> Result<(), OrderError> {
        if !self.status.can_transition_to(next) {
            return Err(OrderError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        self.payment_status = PaymentStatus::derived_from(next);
        self.order_history.push(HistoryEntry {
            status: next,
            date: Utc::now(),
        });
        Ok(())
    }

    /// Applies a buyer correction to phone and address. Absent fields
    /// are left as they are; nothing else is touchable this way.
    pub fn update_contact(&mut self, update: &ContactUpdate) {
        if let Some(phone) = &update.phone {
            self.shipping_details.phone = phone.clone();
        }
        if let Some(street) = &update.street {
            self.shipping_details.address.street = street.clone();
        }
        if let Some(city) = &update.city {
            self.shipping_details.address.city = city.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::pricing::{price_checkout, SHIPPING_COST};

    fn sample_shipping() -> ShippingDetails {
        ShippingDetails {
            name: "Mara Holt".into(),
            email: "mara@example.com".into(),
            phone: "555-0100".into(),
            address: Address {
                street: "12 Elm St".into(),
                city: "Springfield".into(),
            },
        }
    }

    fn placed_order() -> Order {
        let priced = price_checkout([(BookId::new(), 2, Money::from_units(50))]);
        Order::place(UserId::new(), priced, sample_shipping(), None)
    }

    #[test]
    fn place_starts_pending_unpaid_with_seeded_history() {
        let order = placed_order();
        assert_eq!(order.status(), OrderStatus::Pending);
        assert_eq!(order.payment_status(), PaymentStatus::Unpaid);
        assert_eq!(order.payment_method(), PaymentMethod::CashOnDelivery);
        assert_eq!(order.history().len(), 1);
        assert_eq!(order.history()[0].status, OrderStatus::Pending);
        assert_eq!(order.shipping_cost(), SHIPPING_COST);
    }

    #[test]
    fn delivery_marks_paid_and_extends_history() {
        let mut order = placed_order();
        order.transition(OrderStatus::Processing).unwrap();
        order.transition(OrderStatus::Delivered).unwrap();

        assert_eq!(order.status(), OrderStatus::Delivered);
        assert_eq!(order.payment_status(), PaymentStatus::Paid);
        let trail: Vec<OrderStatus> = order.history().iter().map(|e| e.status).collect();
        assert_eq!(
            trail,
            vec![
                OrderStatus::Pending,
                OrderStatus::Processing,
                OrderStatus::Delivered
            ]
        );
    }

    #[test]
    fn illegal_transition_leaves_order_untouched() {
        let mut order = placed_order();
        let err = order.transition(OrderStatus::Delivered).unwrap_err();
        assert!(matches!(
            err,
            OrderError::InvalidTransition {
                from: OrderStatus::Pending,
                to: OrderStatus::Delivered
            }
        ));
        assert_eq!(order.status(), OrderStatus::Pending);
        assert_eq!(order.history().len(), 1);
    }

    #[test]
    fn cancelled_order_rejects_everything() {
        let mut order = placed_order();
        order.transition(OrderStatus::Cancelled).unwrap();
        assert!(order.transition(OrderStatus::Processing).is_err());
        assert!(order.transition(OrderStatus::Delivered).is_err());
        assert_eq!(order.payment_status(), PaymentStatus::Unpaid);
    }

    #[test]
    fn contact_update_touches_only_named_fields() {
        let mut order = placed_order();
        order.update_contact(&ContactUpdate {
            phone: Some("555-0199".into()),
            street: None,
            city: Some("Shelbyville".into()),
        });

        let details = order.shipping_details();
        assert_eq!(details.phone, "555-0199");
        assert_eq!(details.address.street, "12 Elm St");
        assert_eq!(details.address.city, "Shelbyville");
        assert_eq!(details.name, "Mara Holt");
    }

    #[test]
    fn order_serializes_with_camel_case_keys() {
        let order = placed_order();
        let value = serde_json::to_value(&order).unwrap();
        assert!(value.get("totalAmount").is_some());
        assert!(value.get("shippingCost").is_some());
        assert!(value.get("paymentStatus").is_some());
        assert!(value.get("orderHistory").is_some());
        assert_eq!(value["paymentMethod"], "cash_on_delivery");
        assert_eq!(value["status"], "pending");
    }
}
