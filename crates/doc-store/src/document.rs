use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::{Result, StoreError};

/// Monotonic document version used for compare-and-swap replacement.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Version(i64);

impl Version {
    /// Version assigned to a freshly inserted document.
    pub fn first() -> Self {
        Self(1)
    }

    /// Creates a version from a raw value.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// The version after this one.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    /// Returns the raw value.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored JSON document with its version and timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Document id, unique within its collection.
    pub id: Uuid,

    /// Current version, bumped on every replace.
    pub version: Version,

    /// The serialized entity.
    pub body: serde_json::Value,

    /// When the document was first inserted.
    pub created_at: DateTime<Utc>,

    /// When the document was last replaced.
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Creates a first-version document from a serializable entity.
    pub fn new<T: Serialize>(id: Uuid, entity: &T) -> Result<Self> {
        let now = Utc::now();
        Ok(Self {
            id,
            version: Version::first(),
            body: serde_json::to_value(entity).map_err(StoreError::Serialization)?,
            created_at: now,
            updated_at: now,
        })
    }

    /// Decodes the body into a typed entity.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(self.body.clone()).map_err(StoreError::Serialization)
    }
}
