//! Salted password hash gating edit and delete of a book.

use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;

use crate::error::DomainError;

/// Authorization failure for a password-gated operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthzError {
    /// The supplied password does not match the stored credential.
    #[error("Password does not match")]
    PasswordMismatch,
}

/// Salted SHA-256 digest of a book's edit password.
///
/// The plaintext password is never stored.
#[derive(Clone, PartialEq, Eq)]
pub struct EditCredential {
    salt: String,
    digest: String,
}

impl EditCredential {
    /// Hashes a new password with a fresh random salt.
    pub fn from_password(password: &str) -> Result<Self, DomainError> {
        if password.is_empty() {
            return Err(DomainError::EmptyField { field: "password" });
        }
        let salt = Uuid::new_v4().simple().to_string();
        let digest = hash(&salt, password);
        Ok(Self { salt, digest })
    }

    /// Rebuilds a credential from its stored salt and digest.
    pub fn from_parts(salt: impl Into<String>, digest: impl Into<String>) -> Self {
        Self {
            salt: salt.into(),
            digest: digest.into(),
        }
    }

    pub fn salt(&self) -> &str {
        &self.salt
    }

    pub fn digest(&self) -> &str {
        &self.digest
    }

    /// Checks a candidate password against the stored digest.
    pub fn verify(&self, password: &str) -> Result<(), AuthzError> {
        let candidate = hash(&self.salt, password);
        if constant_time_eq(candidate.as_bytes(), self.digest.as_bytes()) {
            Ok(())
        } else {
            Err(AuthzError::PasswordMismatch)
        }
    }
}

impl std::fmt::Debug for EditCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("EditCredential(..)")
    }
}

fn hash(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
