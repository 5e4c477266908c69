use async_trait::async_trait;
use hotelier_shared::{Customer, Employee, NewCustomer};

pub type RepoError = Box<dyn std::error::Error + Send + Sync>;

/// Repository trait for customer records.
///
/// `insert` allocates the identifier itself and must do so atomically:
/// two concurrent inserts never receive the same id.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn insert(&self, customer: &NewCustomer) -> Result<Customer, RepoError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Customer>, RepoError>;

    async fn list(&self) -> Result<Vec<Customer>, RepoError>;

    /// Returns `None` when no row has this id.
    async fn update(&self, id: i32, customer: &NewCustomer) -> Result<Option<Customer>, RepoError>;

    /// Returns `false` when no row has this id.
    async fn delete(&self, id: i32) -> Result<bool, RepoError>;
}

/// Repository trait for provisioned employees.
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn find_by_ssn(&self, ssn: &str) -> Result<Option<Employee>, RepoError>;
}
