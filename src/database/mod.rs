pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryStore;
pub use models::{Note, NoteChanges, NoteFields, User};
pub use postgres::PgStore;
pub use store::{CredentialStore, NoteStore};
