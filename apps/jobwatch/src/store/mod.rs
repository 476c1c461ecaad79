//! Dedup store: an append-only SQLite table of postings already notified.
//!
//! `(source_name, source_id)` is enforced unique by the schema, so `insert`
//! fails with `DuplicateKey` even when the caller skipped `exists`.

use std::path::Path;

use chrono::Utc;
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{debug, info};

use crate::db::create_pool;
use crate::models::posting::{Posting, SeenPosting, SourceName};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("posting {source_name}/{source_id} is already recorded")]
    DuplicateKey {
        source_name: SourceName,
        source_id: String,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Failed to encode matched keywords: {0}")]
    Encode(#[from] serde_json::Error),
}

pub struct DedupStore {
    pool: SqlitePool,
}

impl DedupStore {
    /// Opens the store file, creating file and schema when missing.
    pub async fn open(path: &Path) -> Result<Self, StoreError> {
        let store = Self {
            pool: create_pool(path).await?,
        };
        store.run_migrations().await?;
        Ok(store)
    }

    #[cfg(test)]
    pub async fn in_memory() -> Result<Self, StoreError> {
        let store = Self {
            pool: crate::db::create_memory_pool().await?,
        };
        store.run_migrations().await?;
        Ok(store)
    }

    async fn run_migrations(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS postings (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                source_name TEXT NOT NULL,
                source_id TEXT NOT NULL,
                title TEXT NOT NULL,
                company TEXT NOT NULL,
                location TEXT NOT NULL,
                description TEXT NOT NULL,
                url TEXT NOT NULL,
                date_posted TEXT NOT NULL,
                is_remote INTEGER NOT NULL,
                is_international INTEGER NOT NULL,
                is_ngo INTEGER NOT NULL,
                matched_keywords TEXT NOT NULL DEFAULT '[]',
                match_count INTEGER NOT NULL,
                relevance_score INTEGER NOT NULL,
                first_seen_at TEXT NOT NULL,
                UNIQUE (source_name, source_id)
            );

            CREATE INDEX IF NOT EXISTS idx_postings_first_seen_at ON postings(first_seen_at);
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn exists(&self, source_name: SourceName, source_id: &str) -> Result<bool, StoreError> {
        let found: Option<i64> = sqlx::query_scalar(
            "SELECT id FROM postings WHERE source_name = $1 AND source_id = $2",
        )
        .bind(source_name.as_str())
        .bind(source_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(found.is_some())
    }

    /// Records a posting. Never overwrites: an existing key yields `DuplicateKey`.
    pub async fn insert(&self, posting: &Posting) -> Result<SeenPosting, StoreError> {
        let first_seen_at = Utc::now();
        let keywords: Vec<&String> = posting.matched_keywords.iter().collect();
        let matched_keywords = serde_json::to_string(&keywords)?;

        let result = sqlx::query(
            r#"
            INSERT INTO postings
                (source_name, source_id, title, company, location, description, url,
                 date_posted, is_remote, is_international, is_ngo, matched_keywords,
                 match_count, relevance_score, first_seen_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(posting.source_name.as_str())
        .bind(&posting.source_id)
        .bind(&posting.title)
        .bind(&posting.company)
        .bind(&posting.location)
        .bind(&posting.description)
        .bind(&posting.url)
        .bind(posting.date_posted)
        .bind(posting.is_remote)
        .bind(posting.is_international)
        .bind(posting.is_ngo)
        .bind(matched_keywords)
        .bind(i64::from(posting.match_count))
        .bind(i64::from(posting.relevance_score))
        .bind(first_seen_at)
        .execute(&self.pool)
        .await;

        let result = match result {
            Ok(r) => r,
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                debug!(
                    "Duplicate key {}/{} rejected by store",
                    posting.source_name, posting.source_id
                );
                return Err(StoreError::DuplicateKey {
                    source_name: posting.source_name,
                    source_id: posting.source_id.clone(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        let id = result.last_insert_rowid();
        info!(
            "Recorded posting {id}: {} ({}/{})",
            posting.title, posting.source_name, posting.source_id
        );

        Ok(SeenPosting {
            id,
            posting: posting.clone(),
            first_seen_at,
        })
    }

    pub async fn close(self) {
        self.pool.close().await;
    }

    pub async fn count(&self) -> Result<i64, StoreError> {
        Ok(sqlx::query_scalar("SELECT COUNT(*) FROM postings")
            .fetch_one(&self.pool)
            .await?)
    }
}
