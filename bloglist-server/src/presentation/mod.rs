use std::sync::Arc;

use crate::application::account_service::AccountService;
use crate::application::catalog_service::CatalogService;
use crate::infrastructure::jwt::JwtService;

pub(crate) mod app_error;
pub(crate) mod handlers;
pub(crate) mod middleware;
pub(crate) mod openapi;
pub(crate) mod routes;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) catalog_service: Arc<CatalogService>,
    pub(crate) account_service: Arc<AccountService>,
    pub(crate) jwt: Arc<JwtService>,
}

impl AppState {
    pub(crate) fn new(
        catalog_service: Arc<CatalogService>,
        account_service: Arc<AccountService>,
        jwt: Arc<JwtService>,
    ) -> Self {
        Self {
            catalog_service,
            account_service,
            jwt,
        }
    }
}
