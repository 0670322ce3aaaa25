//! SQLite storage implementation.
//!
//! Provides [`SqliteStore`] as the default backend for the
//! conversation log and the knowledge base.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use uuid::Uuid;

use crate::conversation::{ConversationKind, Document, Turn};
use crate::storage::{ContextStore, StorageError};

/// SQLite-backed context store.
///
/// Uses connection pooling and WAL mode. The schema is created on
/// open. Row identities are UUIDv7 strings, so the (created_at, id)
/// sort is stable even for turns recorded within the same millisecond.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open a store from a database URL of the form
    /// `sqlite:path/to/database.db`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Database`] if the connection or schema
    /// setup fails.
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let path = database_url
            .strip_prefix("sqlite:")
            .unwrap_or(database_url);

        // Ensure parent directory exists
        let file = PathBuf::from(path);
        if let Some(parent) = file.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                StorageError::Database(format!("failed to create database directory: {e}"))
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| StorageError::Database(e.to_string()))?;

        let store = Self { pool };
        store.create_schema().await?;

        Ok(store)
    }

    /// Create tables and indexes if they do not exist yet.
    async fn create_schema(&self) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS turns (
                id TEXT PRIMARY KEY,
                project_id TEXT NOT NULL,
                kind TEXT NOT NULL,
                related_id TEXT,
                speaker_id TEXT,
                is_player INTEGER NOT NULL,
                message TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Database(e.to_string()))?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_turns_scope
            ON turns (project_id, kind, related_id, created_at)
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Database(e.to_string()))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                id TEXT PRIMARY KEY,
                project_id TEXT NOT NULL,
                title TEXT NOT NULL,
                content TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Database(e.to_string()))?;

        Ok(())
    }

    fn parse_uuid(s: &str) -> Result<Uuid, StorageError> {
        Uuid::parse_str(s).map_err(|e| StorageError::InvalidData(format!("invalid UUID: {e}")))
    }

    fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, StorageError> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| StorageError::InvalidData(format!("invalid datetime: {e}")))
    }

    fn turn_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Turn, StorageError> {
        let id: String = row.get("id");
        let project_id: String = row.get("project_id");
        let kind: String = row.get("kind");
        let related_id: Option<String> = row.get("related_id");
        let speaker_id: Option<String> = row.get("speaker_id");
        let is_player: i64 = row.get("is_player");
        let created_at: String = row.get("created_at");

        Ok(Turn {
            id: Self::parse_uuid(&id)?,
            project_id: Self::parse_uuid(&project_id)?,
            kind: ConversationKind::parse(&kind)
                .ok_or_else(|| StorageError::InvalidData(format!("unknown kind: {kind}")))?,
            related_id: related_id.as_deref().map(Self::parse_uuid).transpose()?,
            speaker_id: speaker_id.as_deref().map(Self::parse_uuid).transpose()?,
            is_player: is_player != 0,
            message: row.get("message"),
            created_at: Self::parse_timestamp(&created_at)?,
        })
    }
}

#[async_trait]
impl ContextStore for SqliteStore {
    async fn append(&self, turn: &Turn) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO turns (id, project_id, kind, related_id, speaker_id, is_player, message, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(turn.id.to_string())
        .bind(turn.project_id.to_string())
        .bind(turn.kind.as_str())
        .bind(turn.related_id.map(|id| id.to_string()))
        .bind(turn.speaker_id.map(|id| id.to_string()))
        .bind(turn.is_player as i64)
        .bind(&turn.message)
        .bind(turn.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Database(e.to_string()))?;

        Ok(())
    }

    async fn history(
        &self,
        project_id: Uuid,
        kind: ConversationKind,
        related_id: Option<Uuid>,
        limit: u32,
    ) -> Result<Vec<Turn>, StorageError> {
        // Most recent `limit` rows first, then reversed to chronological
        // order before they feed a model.
        let rows = match related_id {
            Some(related_id) => {
                sqlx::query(
                    r#"
                    SELECT id, project_id, kind, related_id, speaker_id, is_player, message, created_at
                    FROM turns
                    WHERE project_id = ? AND kind = ? AND related_id = ?
                    ORDER BY created_at DESC, id DESC
                    LIMIT ?
                    "#,
                )
                .bind(project_id.to_string())
                .bind(kind.as_str())
                .bind(related_id.to_string())
                .bind(limit as i64)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query(
                    r#"
                    SELECT id, project_id, kind, related_id, speaker_id, is_player, message, created_at
                    FROM turns
                    WHERE project_id = ? AND kind = ?
                    ORDER BY created_at DESC, id DESC
                    LIMIT ?
                    "#,
                )
                .bind(project_id.to_string())
                .bind(kind.as_str())
                .bind(limit as i64)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| StorageError::Database(e.to_string()))?;

        let mut turns = rows
            .iter()
            .map(Self::turn_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        turns.reverse();

        Ok(turns)
    }

    async fn search_documents(
        &self,
        project_id: Uuid,
        query: &str,
        limit: u32,
    ) -> Result<Vec<Document>, StorageError> {
        let pattern = format!("%{query}%");

        let rows = sqlx::query(
            r#"
            SELECT title, content
            FROM documents
            WHERE project_id = ? AND (title LIKE ? OR content LIKE ?)
            ORDER BY created_at DESC
            LIMIT ?
            "#,
        )
        .bind(project_id.to_string())
        .bind(&pattern)
        .bind(&pattern)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Database(e.to_string()))?;

        Ok(rows
            .iter()
            .map(|row| Document {
                title: row.get("title"),
                content: row.get("content"),
            })
            .collect())
    }

    async fn add_document(
        &self,
        project_id: Uuid,
        title: &str,
        content: &str,
    ) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO documents (id, project_id, title, content, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(Uuid::now_v7().to_string())
        .bind(project_id.to_string())
        .bind(title)
        .bind(content)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Database(e.to_string()))?;

        Ok(())
    }
}

/// Create a store from an optional database URL.
///
/// Defaults to `sqlite:~/.config/venture/game.db` when no URL is
/// provided.
///
/// # Errors
///
/// Returns [`StorageError`] if the store cannot be opened.
pub async fn create_store(
    database_url: Option<&str>,
) -> Result<Box<dyn ContextStore>, StorageError> {
    let url = match database_url {
        Some(url) => url.to_string(),
        None => {
            let config_dir = dirs::home_dir()
                .ok_or_else(|| {
                    StorageError::Database("could not determine home directory".to_string())
                })?
                .join(".config/venture");

            format!("sqlite:{}", config_dir.join("game.db").display())
        }
    };

    let store = SqliteStore::new(&url).await?;
    Ok(Box::new(store))
}
