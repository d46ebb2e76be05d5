//! Checkout pricing.
//!
//! Prices are snapshotted from the catalog at checkout: each line gets
//! the book's current unit price, the line total is price times
//! quantity, and the order total adds the flat shipping fee on top.

use common::{BookId, Money};

use super::aggregate::OrderLine;

/// Flat shipping fee added to every order.
pub const SHIPPING_COST: Money = Money::from_units(100);

/// The priced lines and totals for a checkout.
#[derive(Debug, Clone)]
pub struct PricedCheckout {
    pub lines: Vec<OrderLine>,
    pub shipping_cost: Money,
    pub total_amount: Money,
}

/// Prices a checkout from `(book, quantity, unit price)` triples.
pub fn price_checkout<I>(items: I) -> PricedCheckout
where
    I: IntoIterator<Item = (BookId, u32, Money)>,
{
    let lines: Vec<OrderLine> = items
        .into_iter()
        .map(|(book, quantity, unit_price)| OrderLine {
            book,
            quantity,
            unit_price,
            line_total: unit_price.times(quantity),
        })
        .collect();

    let subtotal: Money = lines.iter().map(|line| line.line_total).sum();

    PricedCheckout {
        lines,
        shipping_cost: SHIPPING_COST,
        total_amount: subtotal + SHIPPING_COST,
    }
}
