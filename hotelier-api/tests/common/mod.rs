#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use hotelier_api::{app, AppState, TokenIssuer};
use hotelier_core::credentials::hash_password;
use hotelier_core::memory::{InMemoryCustomerRepository, InMemoryEmployeeRepository};
use hotelier_core::repository::{CustomerRepository, RepoError};
use hotelier_shared::{Customer, Employee, Masked, NewCustomer, Role};
use hotelier_store::app_config::AuthConfig;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub const SECRET: &str = "integration-secret";
pub const MANAGER_SSN: &str = "123-45-6789";
pub const MANAGER_PASSWORD: &str = "correct horse";

pub struct TestApp {
    pub router: Router,
    pub customers: Arc<InMemoryCustomerRepository>,
}

/// Text of every error raised by [`FailingCustomerRepository`].
pub const STORE_FAILURE: &str = "connection refused: db.internal:5432";

/// Customer store that is down.
pub struct FailingCustomerRepository;

#[async_trait]
impl CustomerRepository for FailingCustomerRepository {
    async fn insert(&self, _: &NewCustomer) -> Result<Customer, RepoError> {
        Err(STORE_FAILURE.into())
    }

    async fn find_by_id(&self, _: i32) -> Result<Option<Customer>, RepoError> {
        Err(STORE_FAILURE.into())
    }

    async fn list(&self) -> Result<Vec<Customer>, RepoError> {
        Err(STORE_FAILURE.into())
    }

    async fn update(&self, _: i32, _: &NewCustomer) -> Result<Option<Customer>, RepoError> {
        Err(STORE_FAILURE.into())
    }

    async fn delete(&self, _: i32) -> Result<bool, RepoError> {
        Err(STORE_FAILURE.into())
    }
}

pub fn test_app() -> TestApp {
    let customers = Arc::new(InMemoryCustomerRepository::new());
    TestApp {
        router: router_over(customers.clone()),
        customers,
    }
}

/// Router whose customer store fails every call.
pub fn failing_app() -> TestApp {
    TestApp {
        router: router_over(Arc::new(FailingCustomerRepository)),
        customers: Arc::new(InMemoryCustomerRepository::new()),
    }
}

fn router_over(customers: Arc<dyn CustomerRepository>) -> Router {
    let employees = InMemoryEmployeeRepository::with_employees([Employee {
        ssn: MANAGER_SSN.into(),
        first_name: "Grace".into(),
        last_name: "Hopper".into(),
        role: Role::Manager,
        hotel_id: 7,
        password_hash: Masked(hash_password(MANAGER_PASSWORD).unwrap()),
    }]);

    let tokens = TokenIssuer::new(&AuthConfig {
        jwt_secret: SECRET.into(),
        customer_token_hours: 24,
        employee_token_hours: 8,
    });

    app(AppState::new(customers, Arc::new(employees), tokens))
}

impl TestApp {
    pub async fn send(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn staff_token(&self) -> String {
        let (status, body) = self
            .send(
                Method::POST,
                "/employee/login",
                None,
                Some(serde_json::json!({ "ssn": MANAGER_SSN, "password": MANAGER_PASSWORD })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }
}

pub fn customer_body() -> Value {
    serde_json::json!({
        "firstName": "Ada",
        "middleName": "King",
        "lastName": "Lovelace",
        "street": "1 Main St",
        "city": "Springfield",
        "state": "IL",
        "zipCode": "62701",
        "idType": "Passport",
        "idNumber": "P123456",
        "registrationDate": "2024-03-01"
    })
}
