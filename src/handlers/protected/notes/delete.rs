use axum::extract::{Extension, Path, State};

use super::parse_note_id;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// DELETE /notes/:id - 204 when an owned note was removed.
///
/// Missing and foreign ids leave the store untouched and answer 404.
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let id = parse_note_id(&id)?;

    if !state.notes.delete_note(user.user_id, id).await? {
        tracing::debug!("Delete of missing or foreign note {} by '{}'", id, user.username);
        return Err(ApiError::not_found("Note not found"));
    }

    tracing::info!("Deleted note {} for '{}'", id, user.username);
    Ok(ApiResponse::no_content())
}
