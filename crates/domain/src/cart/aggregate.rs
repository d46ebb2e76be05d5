//! Cart aggregate.

use common::{BookId, UserId};
use serde::{Deserialize, Serialize};

use super::CartError;

/// One (book, quantity) intent in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub book: BookId,
    pub quantity: u32,
}

/// A user's mutable book selection, one cart per user.
///
/// Invariant: no two lines reference the same book, and every stored
/// quantity is at least 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    owner: UserId,
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates an empty cart for a user.
    pub fn new(owner: UserId) -> Self {
        Self {
            owner,
            lines: Vec::new(),
        }
    }

    pub fn owner(&self) -> UserId {
        self.owner
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the line for a book, if present.
    pub fn line(&self, book: BookId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.book == book)
    }

    /// Adds one copy of a book: increments an existing line or appends
    /// a new line with quantity 1.
    pub fn add_book(&mut self, book: BookId) {
        match self.lines.iter_mut().find(|l| l.book == book) {
            Some(line) => line.quantity += 1,
            None => self.lines.push(CartLine { book, quantity: 1 }),
        }
    }

    /// Replaces a line's quantity. The quantity must already be
    /// validated to be at least 1.
    pub fn set_quantity(&mut self, book: BookId, quantity: u32) -> Result<(), CartError> {
        let line = self
            .lines
            .iter_mut()
            .find(|l| l.book == book)
            .ok_or(CartError::LineNotFound { book_id: book })?;
        line.quantity = quantity;
        Ok(())
    }

    /// Removes a line entirely.
    pub fn remove_book(&mut self, book: BookId) -> Result<(), CartError> {
        let position = self
            .lines
            .iter()
            .position(|l| l.book == book)
            .ok_or(CartError::LineNotFound { book_id: book })?;
        self.lines.remove(position);
        Ok(())
    }

    /// Empties the line sequence; the cart itself persists.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
