use std::sync::Arc;

use tracing::{info, warn};

use crate::application::credentials::CredentialHasher;
use crate::data::account_repository::{AccountRepository, NewAccount};
use crate::domain::account::{Account, LoginRequest, RegisterRequest};
use crate::domain::error::DomainError;
use crate::infrastructure::jwt::JwtService;

#[derive(Debug, Clone)]
pub(crate) struct AuthResult {
    pub(crate) account: Account,
    pub(crate) access_token: String,
}

pub(crate) struct AccountService {
    repo: Arc<dyn AccountRepository>,
    hasher: Arc<dyn CredentialHasher>,
    jwt: Arc<JwtService>,
}

impl AccountService {
    pub(crate) fn new(
        repo: Arc<dyn AccountRepository>,
        hasher: Arc<dyn CredentialHasher>,
        jwt: Arc<JwtService>,
    ) -> Self {
        Self { repo, hasher, jwt }
    }

    pub(crate) async fn register(&self, req: RegisterRequest) -> Result<Account, DomainError> {
        let req = req.validate()?;

        let credential_hash = self.hasher.hash(&req.password)?;
        let new_account = NewAccount {
            username: req.username,
            name: req.name,
            credential_hash,
        };

        match self.repo.create_account(new_account).await {
            Ok(account) => {
                info!(account_id = %account.id, username = %account.username, "account registered");
                Ok(account)
            }
            Err(err @ DomainError::Conflict { .. }) => {
                warn!("registration rejected: username already taken");
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Unknown usernames and wrong passwords fail identically.
    pub(crate) async fn authenticate(&self, req: LoginRequest) -> Result<Account, DomainError> {
        let username = req.username.trim();

        let creds = match self.repo.find_by_username(username).await? {
            Some(creds) => creds,
            None => {
                // spend one hash so a miss costs about as much as a hit
                self.hasher.hash(&req.password)?;
                return Err(DomainError::Unauthorized);
            }
        };

        if !self.hasher.verify(&req.password, &creds.credential_hash)? {
            return Err(DomainError::Unauthorized);
        }

        Ok(creds.account)
    }

    pub(crate) async fn login(&self, req: LoginRequest) -> Result<AuthResult, DomainError> {
        let account = self.authenticate(req).await?;

        let access_token = self
            .jwt
            .generate_token(account.id, &account.username)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;

        Ok(AuthResult {
            account,
            access_token,
        })
    }

    pub(crate) async fn list_accounts(&self) -> Result<Vec<Account>, DomainError> {
        self.repo.list_accounts().await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::AccountService;
    use crate::application::credentials::CredentialHasher;
    use crate::data::repositories::memory::InMemoryStore;
    use crate::domain::account::{LoginRequest, RegisterRequest};
    use crate::domain::error::DomainError;
    use crate::infrastructure::jwt::JwtService;

    /// Reversible stand-in for the real hasher that records every input.
    #[derive(Default)]
    struct FakeHasher {
        hashed: Mutex<Vec<String>>,
    }

    impl CredentialHasher for FakeHasher {
        fn hash(&self, raw_password: &str) -> Result<String, DomainError> {
            self.hashed
                .lock()
                .expect("hashed mutex poisoned")
                .push(raw_password.to_string());
            Ok(format!("fake${raw_password}"))
        }

        fn verify(&self, raw_password: &str, credential_hash: &str) -> Result<bool, DomainError> {
            Ok(credential_hash == format!("fake${raw_password}"))
        }
    }

    fn service_with(hasher: Arc<FakeHasher>) -> AccountService {
        let store = InMemoryStore::new();
        AccountService::new(Arc::new(store.account_repository()), hasher, test_jwt())
    }

    fn register_req(username: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            name: Some("Superuser".to_string()),
            password: password.to_string(),
        }
    }

    fn login_req(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    fn test_jwt() -> Arc<JwtService> {
        Arc::new(JwtService::new("0123456789abcdef0123456789abcdef", 3600))
    }

    #[tokio::test]
    async fn register_stores_hash_not_password() {
        let hasher = Arc::new(FakeHasher::default());
        let service = service_with(hasher.clone());

        let account = service
            .register(register_req("  jessie  ", "passwrd"))
            .await
            .expect("register must succeed");
        assert_eq!(account.username, "jessie");
        assert_eq!(account.name.as_deref(), Some("Superuser"));
        assert_eq!(
            hasher.hashed.lock().expect("hashed mutex poisoned").clone(),
            vec!["passwrd".to_string()]
        );
    }

    #[tokio::test]
    async fn duplicate_username_is_conflict_and_leaves_accounts_unchanged() {
        let service = service_with(Arc::new(FakeHasher::default()));
        service
            .register(register_req("root", "sekret"))
            .await
            .expect("first register must succeed");
        let before = service.list_accounts().await.expect("list").len();

        let err = service
            .register(register_req("root", "password"))
            .await
            .expect_err("duplicate must fail");
        assert!(matches!(err, DomainError::Conflict { field: "username" }));
        assert!(err.to_string().contains("expected `username` to be unique"));

        let after = service.list_accounts().await.expect("list").len();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn short_username_is_rejected_before_hashing() {
        let hasher = Arc::new(FakeHasher::default());
        let service = service_with(hasher.clone());

        let err = service
            .register(register_req("ab", "sekret"))
            .await
            .expect_err("short username must fail");
        assert!(matches!(err, DomainError::Validation { field: "username", .. }));
        assert!(hasher.hashed.lock().expect("hashed mutex poisoned").is_empty());
    }

    #[tokio::test]
    async fn short_password_is_rejected() {
        let service = service_with(Arc::new(FakeHasher::default()));

        let err = service
            .register(register_req("jessie", "pw"))
            .await
            .expect_err("short password must fail");
        assert!(matches!(err, DomainError::Validation { field: "password", .. }));
    }

    #[tokio::test]
    async fn authenticate_accepts_correct_password() {
        let service = service_with(Arc::new(FakeHasher::default()));
        let registered = service
            .register(register_req("root", "sekret"))
            .await
            .expect("register must succeed");

        let account = service
            .authenticate(login_req("root", "sekret"))
            .await
            .expect("authenticate must succeed");
        assert_eq!(account.id, registered.id);
    }

    #[tokio::test]
    async fn unknown_user_and_wrong_password_fail_identically() {
        let hasher = Arc::new(FakeHasher::default());
        let service = service_with(hasher.clone());
        service
            .register(register_req("root", "sekret"))
            .await
            .expect("register must succeed");

        let wrong_password = service
            .authenticate(login_req("root", "nope"))
            .await
            .expect_err("wrong password must fail");
        let unknown_user = service
            .authenticate(login_req("ghost", "sekret"))
            .await
            .expect_err("unknown user must fail");

        assert!(matches!(wrong_password, DomainError::Unauthorized));
        assert!(matches!(unknown_user, DomainError::Unauthorized));
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
        // register + the decoy hash for the unknown user
        assert_eq!(hasher.hashed.lock().expect("hashed mutex poisoned").len(), 2);
    }

    #[tokio::test]
    async fn login_issues_token_for_account() {
        let jwt = test_jwt();
        let store = InMemoryStore::new();
        let service = AccountService::new(
            Arc::new(store.account_repository()),
            Arc::new(FakeHasher::default()),
            jwt.clone(),
        );
        let registered = service
            .register(register_req("root", "sekret"))
            .await
            .expect("register must succeed");

        let result = service
            .login(login_req("root", "sekret"))
            .await
            .expect("login must succeed");
        let claims = jwt
            .verify_token(&result.access_token)
            .expect("token must verify");
        assert_eq!(claims.account_id, registered.id);
        assert_eq!(claims.username, "root");
    }
}
