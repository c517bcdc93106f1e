use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum DomainError {
    #[error("validation failed for '{field}': {message}")]
    Validation {
        field: &'static str,
        message: &'static str,
    },

    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("malformed id: {0}")]
    InvalidId(String),

    #[error("User validation failed: {field}: Error, expected `{field}` to be unique")]
    Conflict { field: &'static str },

    #[error("forbidden")]
    Forbidden,

    #[error("invalid username or password")]
    Unauthorized,

    #[error("unexpected domain error: {0}")]
    Unexpected(String),
}

#[cfg(test)]
mod tests {
    use super::DomainError;

    #[test]
    fn conflict_message_names_the_unique_field() {
        let err = DomainError::Conflict { field: "username" };
        assert!(err.to_string().contains("expected `username` to be unique"));
    }

    #[test]
    fn missing_fields_lists_every_field() {
        let err = DomainError::MissingFields(vec!["title", "url"]);
        assert_eq!(err.to_string(), "missing required fields: title, url");
    }
}
