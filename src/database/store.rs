use async_trait::async_trait;
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{Note, NoteChanges, NoteFields, User};

/// Username + password-hash persistence. Usernames are unique.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Insert a new user; `DatabaseError::Duplicate` when the username is taken.
    async fn insert_user(&self, user: User) -> Result<User, DatabaseError>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError>;
}

/// Owner-scoped note persistence. Every operation filters on `owner_id`.
#[async_trait]
pub trait NoteStore: Send + Sync {
    async fn create_note(&self, owner_id: Uuid, fields: NoteFields) -> Result<Note, DatabaseError>;

    async fn list_notes(&self, owner_id: Uuid) -> Result<Vec<Note>, DatabaseError>;

    /// `DatabaseError::NotFound` unless `id` exists and belongs to `owner_id`.
    async fn update_note(
        &self,
        owner_id: Uuid,
        id: Uuid,
        changes: NoteChanges,
    ) -> Result<Note, DatabaseError>;

    /// Returns whether a note was removed; missing or foreign ids are a no-op.
    async fn delete_note(&self, owner_id: Uuid, id: Uuid) -> Result<bool, DatabaseError>;

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
