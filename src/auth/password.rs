//! Argon2id password hashing.
//!
//! Hashes are stored as PHC strings (`$argon2id$v=19$m=...,t=...,p=1$salt$hash`),
//! so verification reads the cost parameters back out of the stored value and
//! keeps working after the configured cost changes.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use crate::config::SecurityConfig;

/// Argon2 cost parameters for newly created hashes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashParams {
    pub memory_kib: u32,
    pub iterations: u32,
}

impl HashParams {
    pub fn from_config(security: &SecurityConfig) -> Self {
        Self {
            memory_kib: security.password_hash_memory_kib,
            iterations: security.password_hash_iterations,
        }
    }

    fn hasher(&self) -> Result<Argon2<'static>, String> {
        let params = Params::new(self.memory_kib, self.iterations, 1, None)
            .map_err(|e| format!("Invalid Argon2 parameters: {}", e))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

impl Default for HashParams {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
        }
    }
}

/// Hash a password with a fresh random salt. Returns a PHC-format string.
pub fn hash_password(password: &str, params: &HashParams) -> Result<String, String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = params
        .hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| format!("Failed to hash password: {}", e))?;
    Ok(hash.to_string())
}

/// Verify a password against a PHC-format hash string.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, String> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| format!("Invalid password hash: {}", e))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap() -> HashParams {
        HashParams {
            memory_kib: 1024,
            iterations: 1,
        }
    }

    #[test]
    fn hash_then_verify() {
        let hash = hash_password("pw", &cheap()).unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("pw", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let a = hash_password("pw", &cheap()).unwrap();
        let b = hash_password("pw", &cheap()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(verify_password("pw", "plaintext").is_err());
    }

    #[test]
    fn zero_iterations_rejected() {
        let params = HashParams {
            memory_kib: 1024,
            iterations: 0,
        };
        assert!(hash_password("pw", &params).is_err());
    }
}
