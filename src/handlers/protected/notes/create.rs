use axum::extract::{rejection::JsonRejection, Extension, State};
use axum::Json;

use crate::database::Note;
use crate::handlers::parse_body;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;
use crate::types::CreateNoteRequest;

/// POST /notes - create a note owned by the caller
///
/// Input: `{"title": "x", "content": "y", "image": "data:..."}` (image optional).
/// Any owner field in the body is ignored; the owner is the token's user.
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<CreateNoteRequest>, JsonRejection>,
) -> ApiResult<Note> {
    let fields = parse_body(payload)?.validate()?;

    let note = state.notes.create_note(user.user_id, fields).await?;
    tracing::info!("Created note {} for '{}'", note.id, user.username);
    Ok(ApiResponse::created(note))
}
