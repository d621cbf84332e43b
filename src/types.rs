//! Request and response schemas shared by the server and the API client

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::database::{NoteChanges, NoteFields};
use crate::error::ApiError;

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 50;

/// Body of `POST /register` and `POST /login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Body returned by `POST /login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Body of `POST /notes`. The owner comes from the token, never the body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateNoteRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Body of `PUT /notes/:id`; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateNoteRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Both fields present; used by login
    pub fn require_filled(&self) -> Result<(), ApiError> {
        let mut field_errors = HashMap::new();
        if self.username.trim().is_empty() {
            field_errors.insert("username".to_string(), "Username is required".to_string());
        }
        if self.password.is_empty() {
            field_errors.insert("password".to_string(), "Password is required".to_string());
        }

        if field_errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_error("Fill both fields", Some(field_errors)))
        }
    }

    /// Full rules for a new account
    pub fn validate_for_registration(&self) -> Result<(), ApiError> {
        self.require_filled()?;
        validate_username_format(&self.username)
            .map_err(|problem| ApiError::field_error("username", problem))
    }
}

impl CreateNoteRequest {
    pub fn validate(self) -> Result<NoteFields, ApiError> {
        let mut field_errors = HashMap::new();
        if self.title.trim().is_empty() {
            field_errors.insert("title".to_string(), "Title is required".to_string());
        }
        if self.content.trim().is_empty() {
            field_errors.insert("content".to_string(), "Content is required".to_string());
        }
        if !field_errors.is_empty() {
            return Err(ApiError::validation_error("Fill title & content", Some(field_errors)));
        }

        Ok(NoteFields {
            title: self.title,
            content: self.content,
            image: self.image.filter(|image| !image.is_empty()),
        })
    }
}

impl UpdateNoteRequest {
    pub fn validate(self) -> Result<NoteChanges, ApiError> {
        if matches!(&self.title, Some(title) if title.trim().is_empty()) {
            return Err(ApiError::field_error("title", "Title cannot be empty"));
        }
        if matches!(&self.content, Some(content) if content.trim().is_empty()) {
            return Err(ApiError::field_error("content", "Content cannot be empty"));
        }

        let changes = NoteChanges {
            title: self.title,
            content: self.content,
            // an empty image removes the stored one
            image: self.image.map(|image| Some(image).filter(|image| !image.is_empty())),
        };
        if changes.is_empty() {
            return Err(ApiError::bad_request("Nothing to update"));
        }
        Ok(changes)
    }
}

/// Username rules: 3-50 characters, letters, digits, underscore and hyphen,
/// starting with a letter or digit.
pub fn validate_username_format(username: &str) -> Result<(), String> {
    let length = username.chars().count();
    if length < USERNAME_MIN {
        return Err(format!("Username must be at least {} characters", USERNAME_MIN));
    }
    if length > USERNAME_MAX {
        return Err(format!("Username must be at most {} characters", USERNAME_MAX));
    }

    if !username.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-') {
        return Err("Username can only contain letters, numbers, underscore, and hyphen".to_string());
    }

    if !username.chars().next().is_some_and(char::is_alphanumeric) {
        return Err("Username must start with a letter or number".to_string());
    }

    Ok(())
}
