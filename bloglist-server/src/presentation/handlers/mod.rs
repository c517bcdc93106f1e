pub(crate) mod login;
pub(crate) mod posts;
pub(crate) mod users;
