pub mod auth;

pub use auth::{staff_auth_middleware, SessionClaims};
