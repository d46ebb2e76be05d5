use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::{Document, DocumentStore, Result, StoreError, Version};

/// PostgreSQL-backed document store.
///
/// Every collection shares one `documents` table keyed by
/// `(collection, id)`, with the entity body in a JSONB column. The
/// compare-and-swap replace is a conditional `UPDATE` on the stored
/// version, so atomicity comes from the database row lock.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a store on an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await
    }

    fn row_to_document(row: PgRow) -> Result<Document> {
        Ok(Document {
            id: row.try_get::<Uuid, _>("id")?,
            version: Version::new(row.try_get("version")?),
            body: row.try_get("body")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[async_trait]
impl DocumentStore for PostgresStore {
    async fn insert(&self, collection: &str, document: Document) -> Result<Document> {
        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, version, body, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(collection)
        .bind(document.id)
        .bind(document.version.as_i64())
        .bind(&document.body)
        .bind(document.created_at)
        .bind(document.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.constraint() == Some("documents_pkey")
            {
                return StoreError::AlreadyExists {
                    collection: collection.to_string(),
                    id: document.id,
                };
            }
            StoreError::Database(e)
        })?;

        Ok(document)
    }

    async fn get(&self, collection: &str, id: Uuid) -> Result<Option<Document>> {
        let row = sqlx::query(
            r#"
            SELECT id, version, body, created_at, updated_at
            FROM documents
            WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_document).transpose()
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>> {
        let rows = sqlx::query(
            r#"
            SELECT id, version, body, created_at, updated_at
            FROM documents
            WHERE collection = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(collection)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_document).collect()
    }

    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &serde_json::Value,
    ) -> Result<Vec<Document>> {
        let rows = sqlx::query(
            r#"
            SELECT id, version, body, created_at, updated_at
            FROM documents
            WHERE collection = $1 AND body -> $2 = $3
            ORDER BY created_at ASC
            "#,
        )
        .bind(collection)
        .bind(field)
        .bind(value)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_document).collect()
    }

    async fn replace(
        &self,
        collection: &str,
        id: Uuid,
        expected: Version,
        body: serde_json::Value,
    ) -> Result<Document> {
        let updated_at = Utc::now();
        let row = sqlx::query(
            r#"
            UPDATE documents
            SET version = $4, body = $5, updated_at = $6
            WHERE collection = $1 AND id = $2 AND version = $3
            RETURNING id, version, body, created_at, updated_at
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(expected.as_i64())
        .bind(expected.next().as_i64())
        .bind(&body)
        .bind(updated_at)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = row {
            return Self::row_to_document(row);
        }

        // Distinguish a missing document from a concurrent writer.
        let current: Option<i64> =
            sqlx::query_scalar("SELECT version FROM documents WHERE collection = $1 AND id = $2")
                .bind(collection)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        match current {
            Some(actual) => Err(StoreError::VersionConflict {
                collection: collection.to_string(),
                id,
                expected,
                actual: Version::new(actual),
            }),
            None => Err(StoreError::NotFound {
                collection: collection.to_string(),
                id,
            }),
        }
    }

    async fn delete(&self, collection: &str, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
