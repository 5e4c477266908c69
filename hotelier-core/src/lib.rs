pub mod credentials;
pub mod customer;
pub mod memory;
pub mod repository;
pub mod validation;

pub use customer::CustomerService;

/// First identifier handed out by an empty customer store.
pub const FIRST_CUSTOMER_ID: i32 = 1001;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Authentication failed: {0}")]
    AuthenticationError(String),
    #[error("Internal service error: {0}")]
    InternalError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
