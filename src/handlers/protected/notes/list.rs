use axum::extract::{Extension, State};

use crate::database::Note;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// GET /notes - all notes owned by the caller
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Vec<Note>> {
    let notes = state.notes.list_notes(user.user_id).await?;
    tracing::debug!("Listed {} notes for '{}'", notes.len(), user.username);
    Ok(ApiResponse::success(notes))
}
