//! User directory.
//!
//! Account management lives elsewhere; this core reads user profiles and
//! appends order ids to the user's `orderHistory` back-reference. The
//! back-reference is a convenience index, never the source of truth —
//! `Order.owner` is authoritative.

use common::{OrderId, UserId};
use doc_store::{DocumentStore, StoreError};
use serde::{Deserialize, Serialize};

use crate::cas;
use crate::collections;
use crate::error::Result;

/// A user profile as this core sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    pub email: String,
    pub avatar: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default)]
    pub order_history: Vec<OrderId>,
}

fn default_role() -> String {
    "member".to_string()
}

/// Lookup and back-reference maintenance for user documents.
#[derive(Clone)]
pub struct Directory<S> {
    store: S,
}

impl<S: DocumentStore> Directory<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Looks a user up by id.
    pub async fn find_user(&self, id: UserId) -> Result<Option<User>> {
        let doc = self.store.get(collections::USERS, id.as_uuid()).await?;
        match doc {
            Some(doc) => Ok(Some(doc.decode()?)),
            None => Ok(None),
        }
    }

    /// Appends an order id to the user's order history.
    ///
    /// Idempotent: re-recording an already-listed order is a no-op, so
    /// callers may retry safely.
    pub async fn record_order(&self, user: UserId, order: OrderId) -> Result<()> {
        let updated = cas::mutate(
            &self.store,
            collections::USERS,
            user.as_uuid(),
            |profile: &mut User| {
                if !profile.order_history.contains(&order) {
                    profile.order_history.push(order);
                }
                Ok(())
            },
        )
        .await?;

        match updated {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound {
                collection: collections::USERS.to_string(),
                id: user.as_uuid(),
            }
            .into()),
        }
    }
}
