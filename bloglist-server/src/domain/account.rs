use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::DomainError;

const MIN_USERNAME_LEN: usize = 3;
const MAX_USERNAME_LEN: usize = 64;
const MIN_PASSWORD_LEN: usize = 3;
const MAX_PASSWORD_LEN: usize = 128;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct RegisterRequest {
    pub(crate) username: String,
    pub(crate) name: Option<String>,
    pub(crate) password: String,
}

impl RegisterRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let username = normalize_username(&self.username)?;
        let password_len = self.password.chars().count();
        if !(MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&password_len) {
            return Err(DomainError::Validation {
                field: "password",
                message: "must be 3..128 chars",
            });
        }
        Ok(Self {
            username,
            name: normalize_name(self.name),
            password: self.password,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct LoginRequest {
    pub(crate) username: String,
    pub(crate) password: String,
}

#[derive(Debug, Clone)]
pub(crate) struct Account {
    pub(crate) id: Uuid,
    pub(crate) username: String,
    pub(crate) name: Option<String>,
    pub(crate) created_at: DateTime<Utc>,
}

impl Account {
    pub(crate) fn new(
        id: Uuid,
        username: impl Into<String>,
        name: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let username = normalize_username(&username.into())?;

        Ok(Self {
            id,
            username,
            name: normalize_name(name),
            created_at,
        })
    }
}

/// The authenticated caller a catalog operation runs on behalf of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ActingAccount {
    pub(crate) id: Uuid,
    pub(crate) username: String,
}

fn normalize_username(username: &str) -> Result<String, DomainError> {
    let username = username.trim();
    let len = username.chars().count();
    if !(MIN_USERNAME_LEN..=MAX_USERNAME_LEN).contains(&len) {
        return Err(DomainError::Validation {
            field: "username",
            message: "must be 3..64 chars",
        });
    }
    Ok(username.to_string())
}

fn normalize_name(name: Option<String>) -> Option<String> {
    name.map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::{Account, DomainError, RegisterRequest, normalize_name, normalize_username};

    fn register(username: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            name: Some("Jessie James".to_string()),
            password: password.to_string(),
        }
    }

    #[test]
    fn username_rules_are_applied() {
        assert!(normalize_username("ab").is_err());
        assert!(normalize_username("  ab  ").is_err());
        assert!(normalize_username("root").is_ok());
    }

    #[test]
    fn two_char_username_is_a_validation_error() {
        let err = register("ab", "sekret")
            .validate()
            .expect_err("short username must fail");
        assert!(matches!(err, DomainError::Validation { field: "username", .. }));
    }

    #[test]
    fn short_password_is_a_validation_error() {
        let err = register("jessie", "pw")
            .validate()
            .expect_err("short password must fail");
        assert!(matches!(err, DomainError::Validation { field: "password", .. }));
    }

    #[test]
    fn three_char_credentials_are_accepted() {
        let validated = register("  abc ", "abc").validate().expect("must be valid");
        assert_eq!(validated.username, "abc");
        assert_eq!(validated.password, "abc");
    }

    #[test]
    fn blank_name_becomes_none() {
        assert_eq!(normalize_name(Some("   ".to_string())), None);
        assert_eq!(
            normalize_name(Some(" Superuser".to_string())),
            Some("Superuser".to_string())
        );
    }

    #[test]
    fn account_new_rejects_short_username() {
        assert!(Account::new(Uuid::new_v4(), "xy", None, Utc::now()).is_err());
    }
}
