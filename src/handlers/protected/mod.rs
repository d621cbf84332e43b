// handlers/protected/mod.rs - Protected handlers (token required)
//
// Every handler here runs behind `jwt_auth_middleware` and receives the
// verified `AuthUser`. All store access is scoped to that user's id.

pub mod notes;

pub use notes::*;
