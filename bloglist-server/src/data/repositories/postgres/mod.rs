pub(crate) mod account_repository;
pub(crate) mod post_repository;
