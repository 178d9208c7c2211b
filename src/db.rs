use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::postgres::PgPool;
use sqlx::types::Json;

use crate::error::Result;

/// A persisted summary. Immutable once created, apart from deletion.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SummaryRecord {
    pub id: i32,
    pub content: String,
    pub keywords: Json<Vec<String>>,
    pub url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Store for saved summaries, backed by an injected connection pool.
#[derive(Clone)]
pub struct SummaryStore {
    pool: PgPool,
}

impl SummaryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the summaries table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS summaries (
                id SERIAL PRIMARY KEY,
                content TEXT NOT NULL,
                keywords JSONB NOT NULL DEFAULT '[]'::jsonb,
                url TEXT,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn insert(
        &self,
        content: &str,
        keywords: Vec<String>,
        url: Option<&str>,
    ) -> Result<SummaryRecord> {
        let record = sqlx::query_as::<_, SummaryRecord>(
            r#"
            INSERT INTO summaries (content, keywords, url)
            VALUES ($1, $2, $3)
            RETURNING id, content, keywords, url, created_at
            "#,
        )
        .bind(content)
        .bind(Json(keywords))
        .bind(url)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    /// Idempotent; deleting an absent id is not an error.
    pub async fn delete(&self, id: i32) -> Result<()> {
        sqlx::query("DELETE FROM summaries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Returns up to `limit` records, newest first.
    pub async fn list(&self, limit: i64) -> Result<Vec<SummaryRecord>> {
        let records = sqlx::query_as::<_, SummaryRecord>(
            r#"
            SELECT id, content, keywords, url, created_at
            FROM summaries
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}
