//! HTTP client for the customer REST API

use std::time::Duration;

use async_trait::async_trait;
use hotelier_shared::{CreateCustomerResponse, Customer, CustomerForm, LoginRequest, LoginResponse};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::{ClientError, ClientResult};

/// Operations the "Manage Customers" page needs from the server.
#[async_trait]
pub trait CustomerApi: Send + Sync {
    async fn get_customers(&self) -> ClientResult<Vec<Customer>>;
    async fn get_customer(&self, id: i32) -> ClientResult<Customer>;
    async fn create_customer(&self, form: &CustomerForm) -> ClientResult<CreateCustomerResponse>;
    async fn update_customer(&self, id: i32, form: &CustomerForm) -> ClientResult<Customer>;
    async fn delete_customer(&self, id: i32) -> ClientResult<()>;
}

/// Body shape of every non-2xx response from the server.
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// reqwest-backed implementation of [`CustomerApi`]
#[derive(Debug, Clone)]
pub struct HttpCustomerApi {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpCustomerApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ClientResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            token: None,
        })
    }

    /// Set the bearer token sent with every request
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Log in as staff and keep the returned token for later calls
    pub async fn login(&mut self, ssn: &str, password: &str) -> ClientResult<LoginResponse> {
        let request = LoginRequest {
            ssn: ssn.to_string(),
            password: password.to_string(),
        };

        let response = self.request(Method::POST, "employee/login").json(&request).send().await?;
        let login: LoginResponse = Self::handle_response(response).await?;
        self.token = Some(login.token.clone());
        Ok(login)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        let request = self.client.request(method, url);

        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn check_status(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await?;
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.error)
            .unwrap_or(text);

        Err(match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized(message),
            StatusCode::FORBIDDEN => ClientError::Forbidden(message),
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            StatusCode::BAD_REQUEST => ClientError::Validation(message),
            _ => ClientError::Server(message),
        })
    }

    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let response = Self::check_status(response).await?;
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl CustomerApi for HttpCustomerApi {
    async fn get_customers(&self) -> ClientResult<Vec<Customer>> {
        let response = self.request(Method::GET, "customers").send().await?;
        Self::handle_response(response).await
    }

    async fn get_customer(&self, id: i32) -> ClientResult<Customer> {
        let response = self.request(Method::GET, &format!("customers/{id}")).send().await?;
        Self::handle_response(response).await
    }

    async fn create_customer(&self, form: &CustomerForm) -> ClientResult<CreateCustomerResponse> {
        let response = self.request(Method::POST, "customers").json(form).send().await?;
        Self::handle_response(response).await
    }

    async fn update_customer(&self, id: i32, form: &CustomerForm) -> ClientResult<Customer> {
        let response = self
            .request(Method::PUT, &format!("customers/{id}"))
            .json(form)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn delete_customer(&self, id: i32) -> ClientResult<()> {
        let response = self.request(Method::DELETE, &format!("customers/{id}")).send().await?;
        Self::check_status(response).await?;
        Ok(())
    }
}
