pub(crate) mod account;
pub(crate) mod error;
pub(crate) mod post;
pub(crate) mod stats;

use uuid::Uuid;

use error::DomainError;

/// Parses a client-supplied identifier. A malformed value is an
/// `InvalidId`, never a `NotFound`.
pub(crate) fn parse_id(raw: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(raw.trim()).map_err(|_| DomainError::InvalidId(raw.to_string()))
}
