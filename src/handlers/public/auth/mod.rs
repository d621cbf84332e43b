// handlers/public/auth/mod.rs - Account creation and token issuance

pub mod login;    // POST /login - authenticate and get a session token
pub mod register; // POST /register - create a new account

pub use login::login_post;
pub use register::register_post;
