use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Salted one-way password hashing (Argon2id).
///
/// Hashes are PHC strings, so each one records the algorithm, parameters and
/// salt it was produced with. Verification reads those back from the stored
/// hash rather than using the hasher's own parameters, which keeps old hashes
/// verifiable after the parameters change.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Hasher with the Argon2 crate's recommended defaults.
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }

    /// Hasher with explicit Argon2id cost parameters.
    ///
    /// # Arguments
    /// * `memory_kib` - Memory cost in KiB
    /// * `iterations` - Number of passes
    /// * `parallelism` - Degree of parallelism
    ///
    /// # Errors
    /// * `InvalidParameters` - Parameters are outside Argon2's accepted range
    pub fn with_params(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, PasswordError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| PasswordError::InvalidParameters(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash a plaintext password with a fresh random salt.
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Check a candidate password against a stored hash.
    ///
    /// The candidate is re-hashed with the stored salt and parameters and
    /// compared in constant time.
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `MalformedHash` - Stored hash is not a parseable PHC string
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| PasswordError::MalformedHash(e.to_string()))?;

        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap_hasher() -> PasswordHasher {
        PasswordHasher::with_params(8, 1, 1).expect("Failed to build hasher")
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");
        assert!(hash.starts_with("$argon2id$"));

        assert!(hasher.verify(password, &hash).unwrap());
        assert!(!hasher.verify("wrong_password", &hash).unwrap());
    }

    #[test]
    fn test_same_password_hashes_differently() {
        let hasher = cheap_hasher();

        let first = hasher.hash("secret1").unwrap();
        let second = hasher.hash("secret1").unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_uses_parameters_from_stored_hash() {
        let old = cheap_hasher();
        let hash = old.hash("secret1").unwrap();

        let current = PasswordHasher::new();
        assert!(current.verify("secret1", &hash).unwrap());
    }

    #[test]
    fn test_verify_invalid_hash() {
        let hasher = cheap_hasher();
        let result = hasher.verify("password", "invalid_hash");
        assert!(matches!(result, Err(PasswordError::MalformedHash(_))));
    }

    #[test]
    fn test_with_params_rejects_zero_iterations() {
        let result = PasswordHasher::with_params(8, 0, 1);
        assert!(matches!(result, Err(PasswordError::InvalidParameters(_))));
    }
}
