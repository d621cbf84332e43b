pub mod password;
pub mod token;

pub use password::{hash_password, verify_password, HashParams};
pub use token::{Claims, TokenError, TokenService};
