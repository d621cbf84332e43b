pub mod create;
pub mod delete;
pub mod list;
pub mod update;

pub use create::create as notes_create;
pub use delete::delete as notes_delete;
pub use list::list as notes_list;
pub use update::update as notes_update;

use uuid::Uuid;

use crate::error::ApiError;

/// An id that does not parse cannot name an owned note
pub(crate) fn parse_note_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::not_found("Note not found"))
}
