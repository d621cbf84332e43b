use axum::extract::{rejection::JsonRejection, Extension, Path, State};
use axum::Json;

use super::parse_note_id;
use crate::database::Note;
use crate::handlers::parse_body;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;
use crate::types::UpdateNoteRequest;

/// PUT /notes/:id - partial update of an owned note, 404 otherwise
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateNoteRequest>, JsonRejection>,
) -> ApiResult<Note> {
    let id = parse_note_id(&id)?;
    let changes = parse_body(payload)?.validate()?;

    let note = state.notes.update_note(user.user_id, id, changes).await?;
    tracing::info!("Updated note {} for '{}'", note.id, user.username);
    Ok(ApiResponse::success(note))
}
