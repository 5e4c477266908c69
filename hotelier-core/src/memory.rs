use async_trait::async_trait;
use chrono::Utc;
use hotelier_shared::{Customer, Employee, NewCustomer};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicI32, Ordering};
use tokio::sync::RwLock;

use crate::repository::{CustomerRepository, EmployeeRepository, RepoError};
use crate::FIRST_CUSTOMER_ID;

/// Process-local customer store. Ids come from an atomic counter, so
/// concurrent inserts never share one.
pub struct InMemoryCustomerRepository {
    customers: RwLock<BTreeMap<i32, Customer>>,
    next_id: AtomicI32,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self {
            customers: RwLock::new(BTreeMap::new()),
            next_id: AtomicI32::new(FIRST_CUSTOMER_ID),
        }
    }

    pub async fn count(&self) -> usize {
        self.customers.read().await.len()
    }
}

impl Default for InMemoryCustomerRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn insert(&self, customer: &NewCustomer) -> Result<Customer, RepoError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let row = Customer {
            id,
            name: customer.name.clone(),
            id_type: customer.id_type,
            id_number: customer.id_number.clone(),
            address: customer.address.clone(),
            registration_date: customer
                .registration_date
                .unwrap_or_else(|| Utc::now().date_naive()),
            payment: customer.payment.clone(),
        };

        self.customers.write().await.insert(id, row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Customer>, RepoError> {
        Ok(self.customers.read().await.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Customer>, RepoError> {
        Ok(self.customers.read().await.values().cloned().collect())
    }

    async fn update(&self, id: i32, customer: &NewCustomer) -> Result<Option<Customer>, RepoError> {
        let mut customers = self.customers.write().await;
        let Some(row) = customers.get_mut(&id) else {
            return Ok(None);
        };

        row.name = customer.name.clone();
        row.id_type = customer.id_type;
        row.id_number = customer.id_number.clone();
        row.address = customer.address.clone();
        if let Some(date) = customer.registration_date {
            row.registration_date = date;
        }
        row.payment = customer.payment.clone();

        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i32) -> Result<bool, RepoError> {
        Ok(self.customers.write().await.remove(&id).is_some())
    }
}

/// Employee directory seeded up front; there is no creation path.
#[derive(Default)]
pub struct InMemoryEmployeeRepository {
    employees: HashMap<String, Employee>,
}

impl InMemoryEmployeeRepository {
    pub fn with_employees(employees: impl IntoIterator<Item = Employee>) -> Self {
        Self {
            employees: employees.into_iter().map(|e| (e.ssn.clone(), e)).collect(),
        }
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryEmployeeRepository {
    async fn find_by_ssn(&self, ssn: &str) -> Result<Option<Employee>, RepoError> {
        Ok(self.employees.get(ssn).cloned())
    }
}
