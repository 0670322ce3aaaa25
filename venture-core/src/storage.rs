//! Storage abstraction for conversation persistence.
//!
//! Provides the [`ContextStore`] trait as a port for storage
//! implementations, along with error types and the SQLite adapter.
//! The store is the only shared mutable state in the crate; bots are
//! reconstructed per call and go through this port for history and
//! background documents.

pub mod sqlite;

pub use sqlite::{SqliteStore, create_store};

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::conversation::{ConversationKind, Document, Turn};

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// A stored row could not be decoded.
    #[error("invalid data: {0}")]
    InvalidData(String),
}

/// Port for conversation-log storage implementations.
///
/// Turns are append-only: nothing in this interface mutates or deletes
/// a recorded turn. History queries return turns in strict
/// chronological order, scoped to one project. Model input is
/// order-sensitive, so implementations must not reorder.
#[async_trait]
pub trait ContextStore: Send + Sync {
    /// Durably record one turn. Atomic: the turn is fully recorded or
    /// not at all.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Database`] if the insert fails.
    async fn append(&self, turn: &Turn) -> Result<(), StorageError>;

    /// Up to `limit` most recent turns for the scope, returned in
    /// chronological order.
    ///
    /// `related_id == None` scopes to the whole (project, kind) pair.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Database`] if the query fails, or
    /// [`StorageError::InvalidData`] if a row cannot be decoded.
    async fn history(
        &self,
        project_id: Uuid,
        kind: ConversationKind,
        related_id: Option<Uuid>,
        limit: u32,
    ) -> Result<Vec<Turn>, StorageError>;

    /// Up to `limit` background documents whose title or content
    /// contains `query` as a case-insensitive substring, newest first.
    ///
    /// Plain substring matching, not ranked retrieval; replace the
    /// implementation when a real retrieval pipeline lands.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Database`] if the query fails.
    async fn search_documents(
        &self,
        project_id: Uuid,
        query: &str,
        limit: u32,
    ) -> Result<Vec<Document>, StorageError>;

    /// Add a document to the project's knowledge base.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Database`] if the insert fails.
    async fn add_document(
        &self,
        project_id: Uuid,
        title: &str,
        content: &str,
    ) -> Result<(), StorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display() {
        let db_err = StorageError::Database("connection failed".to_string());
        assert_eq!(db_err.to_string(), "database error: connection failed");

        let invalid_err = StorageError::InvalidData("corrupt row".to_string());
        assert_eq!(invalid_err.to_string(), "invalid data: corrupt row");
    }
}
