use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use application::account_service::AccountService;
use application::catalog_service::CatalogService;
use data::account_repository::AccountRepository;
use data::post_repository::PostRepository;
use data::repositories::memory::InMemoryStore;
use data::repositories::postgres::account_repository::PostgresAccountRepository;
use data::repositories::postgres::post_repository::PostgresPostRepository;
use infrastructure::database::{create_pool, run_migrations};
use infrastructure::jwt::JwtService;
use infrastructure::logging::init_logging;
use infrastructure::password::Argon2Hasher;
use infrastructure::settings::Settings;
use presentation::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;

    let (post_repo, account_repo) = match &settings.database_url {
        Some(database_url) => {
            let pool = create_pool(database_url, settings.database_max_connections).await?;
            run_migrations(&pool).await?;
            info!("using PostgreSQL storage");
            let posts: Arc<dyn PostRepository> = Arc::new(PostgresPostRepository::new(pool.clone()));
            let accounts: Arc<dyn AccountRepository> =
                Arc::new(PostgresAccountRepository::new(pool));
            (posts, accounts)
        }
        None => {
            warn!("DATABASE_URL not set, using in-memory storage; data is lost on exit");
            let store = InMemoryStore::new();
            let posts: Arc<dyn PostRepository> = Arc::new(store.post_repository());
            let accounts: Arc<dyn AccountRepository> = Arc::new(store.account_repository());
            (posts, accounts)
        }
    };

    let jwt = Arc::new(JwtService::new(&settings.jwt_secret, settings.jwt_ttl_seconds));
    let catalog_service = Arc::new(CatalogService::new(post_repo));
    let account_service = Arc::new(AccountService::new(
        account_repo,
        Arc::new(Argon2Hasher),
        jwt.clone(),
    ));

    let state = AppState::new(catalog_service, account_service, jwt);
    server::run_http(&settings, state).await
}
