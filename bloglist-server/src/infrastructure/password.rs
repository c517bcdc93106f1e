use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
        rand_core::OsRng,
    },
};

use crate::application::credentials::CredentialHasher;
use crate::domain::error::DomainError;

/// Argon2id with OWASP minimum parameters (19 MiB, t=2, p=1).
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Argon2Hasher;

impl Argon2Hasher {
    fn argon2() -> Result<Argon2<'static>, DomainError> {
        let params = Params::new(19 * 1024, 2, 1, None)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, raw_password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Self::argon2()?
            .hash_password(raw_password.as_bytes(), &salt)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Ok(password_hash.to_string())
    }

    fn verify(&self, raw_password: &str, credential_hash: &str) -> Result<bool, DomainError> {
        let parsed_hash = PasswordHash::new(credential_hash)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        match Self::argon2()?.verify_password(raw_password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(PasswordHashError::Password) => Ok(false),
            Err(err) => Err(DomainError::Unexpected(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Argon2Hasher;
    use crate::application::credentials::CredentialHasher;

    #[test]
    fn hash_is_not_the_raw_password_and_verifies() {
        let hasher = Argon2Hasher;
        let hash = hasher.hash("sekret").expect("hash must be created");

        assert_ne!(hash, "sekret");
        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("sekret", &hash).expect("verify must run"));
        assert!(!hasher.verify("wrong", &hash).expect("verify must run"));
    }

    #[test]
    fn garbage_hash_is_an_error() {
        assert!(Argon2Hasher.verify("sekret", "not-a-phc-string").is_err());
    }
}
