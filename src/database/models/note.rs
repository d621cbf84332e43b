use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Note {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when creating a note. The owner is never part of it.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteFields {
    pub title: String,
    pub content: String,
    pub image: Option<String>,
}

/// Partial update; `None` leaves the stored value untouched.
/// For `image`, `Some(None)` removes the stored image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub image: Option<Option<String>>,
}

impl Note {
    pub fn new(owner_id: Uuid, fields: NoteFields) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            title: fields.title,
            content: fields.content,
            image: fields.image,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, changes: NoteChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(content) = changes.content {
            self.content = content;
        }
        if let Some(image) = changes.image {
            self.image = image;
        }
        self.updated_at = Utc::now();
    }
}

impl NoteChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.image.is_none()
    }
}
