use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{Note, NoteChanges, NoteFields, User};
use super::store::{CredentialStore, NoteStore};

/// In-process store for development and tests. Contents vanish on restart.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    // keyed by username
    users: Arc<RwLock<HashMap<String, User>>>,
    // insertion order doubles as creation order
    notes: Arc<RwLock<Vec<Note>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn insert_user(&self, user: User) -> Result<User, DatabaseError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.username) {
            return Err(DatabaseError::Duplicate(format!(
                "username '{}' already exists",
                user.username
            )));
        }
        users.insert(user.username.clone(), user.clone());
        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        Ok(self.users.read().await.get(username).cloned())
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn create_note(&self, owner_id: Uuid, fields: NoteFields) -> Result<Note, DatabaseError> {
        let note = Note::new(owner_id, fields);
        self.notes.write().await.push(note.clone());
        Ok(note)
    }

    async fn list_notes(&self, owner_id: Uuid) -> Result<Vec<Note>, DatabaseError> {
        Ok(self
            .notes
            .read()
            .await
            .iter()
            .filter(|note| note.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn update_note(
        &self,
        owner_id: Uuid,
        id: Uuid,
        changes: NoteChanges,
    ) -> Result<Note, DatabaseError> {
        let mut notes = self.notes.write().await;
        let note = notes
            .iter_mut()
            .find(|note| note.id == id && note.owner_id == owner_id)
            .ok_or_else(|| DatabaseError::NotFound("Note not found".to_string()))?;

        note.apply(changes);
        Ok(note.clone())
    }

    async fn delete_note(&self, owner_id: Uuid, id: Uuid) -> Result<bool, DatabaseError> {
        let mut notes = self.notes.write().await;
        let before = notes.len();
        notes.retain(|note| !(note.id == id && note.owner_id == owner_id));
        Ok(notes.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(title: &str) -> NoteFields {
        NoteFields {
            title: title.to_string(),
            content: "body".to_string(),
            image: None,
        }
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let store = MemoryStore::new();
        store.insert_user(User::new("alice", "h1")).await.unwrap();

        let err = store.insert_user(User::new("alice", "h2")).await.unwrap_err();
        assert!(matches!(err, DatabaseError::Duplicate(_)));

        let stored = store.find_user_by_username("alice").await.unwrap().unwrap();
        assert_eq!(stored.password_hash, "h1");
    }

    #[tokio::test]
    async fn test_list_is_owner_scoped() {
        let store = MemoryStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        store.create_note(alice, fields("a1")).await.unwrap();
        store.create_note(bob, fields("b1")).await.unwrap();
        store.create_note(alice, fields("a2")).await.unwrap();

        let titles: Vec<String> = store
            .list_notes(alice)
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.title)
            .collect();
        assert_eq!(titles, vec!["a1", "a2"]);
        assert_eq!(store.list_notes(bob).await.unwrap().len(), 1);
        assert!(store.list_notes(Uuid::new_v4()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_foreign_note_not_found() {
        let store = MemoryStore::new();
        let alice = Uuid::new_v4();
        let note = store.create_note(alice, fields("mine")).await.unwrap();

        let changes = NoteChanges {
            title: Some("stolen".to_string()),
            ..Default::default()
        };
        let err = store
            .update_note(Uuid::new_v4(), note.id, changes.clone())
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound(_)));

        let updated = store.update_note(alice, note.id, changes).await.unwrap();
        assert_eq!(updated.title, "stolen");
        assert_eq!(updated.content, "body");
    }

    #[tokio::test]
    async fn test_delete_is_idempotent_and_scoped() {
        let store = MemoryStore::new();
        let alice = Uuid::new_v4();
        let note = store.create_note(alice, fields("keep")).await.unwrap();

        assert!(!store.delete_note(Uuid::new_v4(), note.id).await.unwrap());
        assert_eq!(store.list_notes(alice).await.unwrap().len(), 1);

        assert!(store.delete_note(alice, note.id).await.unwrap());
        assert!(!store.delete_note(alice, note.id).await.unwrap());
        assert!(store.list_notes(alice).await.unwrap().is_empty());
    }
}
