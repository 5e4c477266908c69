use std::sync::Arc;
use hotelier_core::repository::{CustomerRepository, EmployeeRepository};
use hotelier_core::CustomerService;

use crate::token::TokenIssuer;

#[derive(Clone)]
pub struct AppState {
    pub customers: CustomerService,
    pub employees: Arc<dyn EmployeeRepository>,
    pub tokens: Arc<TokenIssuer>,
}

impl AppState {
    pub fn new(
        customers: Arc<dyn CustomerRepository>,
        employees: Arc<dyn EmployeeRepository>,
        tokens: TokenIssuer,
    ) -> Self {
        Self {
            customers: CustomerService::new(customers),
            employees,
            tokens: Arc::new(tokens),
        }
    }
}
