pub mod app_config;
pub mod customer_repo;
pub mod database;
pub mod employee_repo;

pub use customer_repo::PgCustomerRepository;
pub use database::DbClient;
pub use employee_repo::PgEmployeeRepository;
