pub mod auth;

pub use auth::{fetch_user, AuthUser, AUTH_TOKEN_HEADER};
