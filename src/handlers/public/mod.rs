// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Token acquisition. Every input is untrusted and validated here.

pub mod auth;

pub use auth::*;
