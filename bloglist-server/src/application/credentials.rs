use crate::domain::error::DomainError;

/// One-way password hashing capability.
///
/// `verify` returns `Ok(false)` on a mismatch; `Err` is reserved for a hash
/// that cannot be processed at all.
pub(crate) trait CredentialHasher: Send + Sync {
    fn hash(&self, raw_password: &str) -> Result<String, DomainError>;
    fn verify(&self, raw_password: &str, credential_hash: &str) -> Result<bool, DomainError>;
}
