pub mod auth;

pub use auth::{AuthenticatedUser, TokenTable, auth_middleware};
