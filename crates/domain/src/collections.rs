//! Document collection names shared by the services and projections.

pub const BOOKS: &str = "books";
pub const CARTS: &str = "carts";
pub const ORDERS: &str = "orders";
pub const USERS: &str = "users";
