//! Password hashing.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use super::AuthError;
use crate::config::PasswordHashing;

/// Argon2id hasher configured from [`PasswordHashing`].
#[derive(Clone)]
pub struct Hasher {
    argon2: Argon2<'static>,
}

impl std::fmt::Debug for Hasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hasher").finish_non_exhaustive()
    }
}

impl Hasher {
    /// Build a hasher with the given cost parameters.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordHash` if the parameters are out of range.
    pub fn new(cost: &PasswordHashing) -> Result<Self, AuthError> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map_err(|_| AuthError::PasswordHash)?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash a password with a fresh random salt.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordHash` if hashing fails.
    pub fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|_| AuthError::PasswordHash)
    }

    /// Whether `password` matches the stored PHC `hash`.
    ///
    /// An unparsable hash never matches.
    #[must_use]
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        PasswordHash::new(hash).is_ok_and(|parsed| {
            self.argon2
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn hasher() -> Hasher {
        Hasher::new(&PasswordHashing::minimal()).unwrap()
    }

    #[test]
    fn test_hash_is_salted_and_verifies() {
        let hasher = hasher();
        let a = hasher.hash("farinha123").unwrap();
        let b = hasher.hash("farinha123").unwrap();

        assert_ne!(a, b);
        assert!(a.starts_with("$argon2id$"));
        assert!(hasher.verify("farinha123", &a));
        assert!(hasher.verify("farinha123", &b));
        assert!(!hasher.verify("farinha124", &a));
    }

    #[test]
    fn test_garbage_hash_never_matches() {
        assert!(!hasher().verify("anything", "plaintext-from-old-data"));
    }

    #[test]
    fn test_rejects_invalid_cost() {
        let cost = PasswordHashing {
            memory_kib: 1,
            iterations: 0,
            parallelism: 1,
        };
        assert!(matches!(Hasher::new(&cost), Err(AuthError::PasswordHash)));
    }
}
