pub mod note;
pub mod user;

pub use note::{Note, NoteChanges, NoteFields};
pub use user::User;
