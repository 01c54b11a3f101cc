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

/// Password hashing implementation.
///
/// Argon2id with a configurable iteration cost. Digests are PHC strings that
/// embed their own parameters, so hashes produced under an older cost still verify.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Create a hasher with the given iteration cost.
    ///
    /// # Arguments
    /// * `cost` - Argon2 time cost (number of passes), must be at least 1
    ///
    /// # Errors
    /// * `InvalidCost` - The cost is rejected by Argon2
    pub fn with_cost(cost: u32) -> Result<Self, PasswordError> {
        let params = Params::new(Params::DEFAULT_M_COST, cost, Params::DEFAULT_P_COST, None)
            .map_err(|e| PasswordError::InvalidCost {
                cost,
                reason: e.to_string(),
            })?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash a plaintext password with a fresh random salt.
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
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

    /// Verify a password against a stored hash.
    ///
    /// The derived output is compared in constant time.
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `VerificationFailed` - Hash format is invalid or verification could not run
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|e| {
            PasswordError::VerificationFailed(format!("Invalid password hash: {}", e))
        })?;

        match self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
        {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(PasswordError::VerificationFailed(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::with_cost(2).unwrap();
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");
        assert_ne!(hash, password);

        assert!(hasher
            .verify(password, &hash)
            .expect("Failed to verify password"));

        assert!(!hasher
            .verify("wrong_password", &hash)
            .expect("Failed to verify password"));
    }

    #[test]
    fn test_same_password_different_salts() {
        let hasher = PasswordHasher::with_cost(1).unwrap();

        let first = hasher.hash("secret").unwrap();
        let second = hasher.hash("secret").unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_hash_from_other_cost_still_verifies() {
        let old = PasswordHasher::with_cost(1).unwrap();
        let new = PasswordHasher::with_cost(3).unwrap();

        let hash = old.hash("secret").unwrap();
        assert!(new.verify("secret", &hash).unwrap());
    }

    #[test]
    fn test_zero_cost_rejected() {
        let result = PasswordHasher::with_cost(0);
        assert!(matches!(
            result,
            Err(PasswordError::InvalidCost { cost: 0, .. })
        ));
    }

    #[test]
    fn test_verify_invalid_hash() {
        let hasher = PasswordHasher::with_cost(1).unwrap();
        let result = hasher.verify("password", "invalid_hash");
        assert!(result.is_err());
    }
}
