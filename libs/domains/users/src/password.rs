//! Password hashing seam used by the service.

use argon2::{
    Argon2,
    password_hash::{PasswordHasher as _, SaltString, rand_core::OsRng},
};

use crate::error::{UserError, UserResult};

/// Turns a plain password into the stored hash
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> UserResult<String>;
}

/// Argon2id with default parameters and a random salt per password
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> UserResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| UserError::PasswordHash(e.to_string()))
    }
}
