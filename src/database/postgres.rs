use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::manager::{DatabaseError, DatabaseManager};
use super::models::{Note, NoteChanges, NoteFields, User};
use super::store::{CredentialStore, NoteStore};

const NOTE_COLUMNS: &str = "id, owner_id, title, content, image, created_at, updated_at";

/// Postgres-backed credential and note store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl CredentialStore for PgStore {
    async fn insert_user(&self, user: User) -> Result<User, DatabaseError> {
        let inserted = sqlx::query_as::<_, User>(
            "INSERT INTO users (id, username, password_hash, created_at)
             VALUES ($1, $2, $3, $4)
             RETURNING id, username, password_hash, created_at",
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if DatabaseError::is_unique_violation(&e) {
                DatabaseError::Duplicate(format!("username '{}' already exists", user.username))
            } else {
                DatabaseError::Sqlx(e)
            }
        })?;

        Ok(inserted)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, created_at
             FROM users
             WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

#[async_trait]
impl NoteStore for PgStore {
    async fn create_note(&self, owner_id: Uuid, fields: NoteFields) -> Result<Note, DatabaseError> {
        let note = Note::new(owner_id, fields);
        let sql = format!(
            "INSERT INTO notes ({NOTE_COLUMNS})
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {NOTE_COLUMNS}"
        );

        let created = sqlx::query_as::<_, Note>(&sql)
            .bind(note.id)
            .bind(note.owner_id)
            .bind(&note.title)
            .bind(&note.content)
            .bind(&note.image)
            .bind(note.created_at)
            .bind(note.updated_at)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    async fn list_notes(&self, owner_id: Uuid) -> Result<Vec<Note>, DatabaseError> {
        let sql = format!(
            "SELECT {NOTE_COLUMNS} FROM notes
             WHERE owner_id = $1
             ORDER BY created_at, id"
        );

        let notes = sqlx::query_as::<_, Note>(&sql)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(notes)
    }

    async fn update_note(
        &self,
        owner_id: Uuid,
        id: Uuid,
        changes: NoteChanges,
    ) -> Result<Note, DatabaseError> {
        let replace_image = changes.image.is_some();
        let sql = format!(
            "UPDATE notes SET
                title = COALESCE($3, title),
                content = COALESCE($4, content),
                image = CASE WHEN $6 THEN $5 ELSE image END,
                updated_at = now()
             WHERE id = $1 AND owner_id = $2
             RETURNING {NOTE_COLUMNS}"
        );

        sqlx::query_as::<_, Note>(&sql)
            .bind(id)
            .bind(owner_id)
            .bind(changes.title)
            .bind(changes.content)
            .bind(changes.image.flatten())
            .bind(replace_image)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound("Note not found".to_string()))
    }

    async fn delete_note(&self, owner_id: Uuid, id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
