use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 { 5 }

#[derive(Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    #[serde(default = "default_customer_token_hours")]
    pub customer_token_hours: i64,
    #[serde(default = "default_employee_token_hours")]
    pub employee_token_hours: i64,
}

fn default_customer_token_hours() -> i64 { 24 }
fn default_employee_token_hours() -> i64 { 8 }

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"********")
            .field("customer_token_hours", &self.customer_token_hours)
            .field("employee_token_hours", &self.employee_token_hours)
            .finish()
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, never checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `HOTELIER__SERVER__PORT=8080` sets `server.port`
            .add_source(config::Environment::with_prefix("HOTELIER").separator("__"))
            // The signing secret is also accepted under its conventional bare name
            .set_override_option("auth.jwt_secret", env::var("JWT_SECRET").ok())?;

        Self::from_builder(builder)
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, config::ConfigError> {
        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Refuse to start with settings that would make every token forgeable or
    /// instantly expired.
    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "auth.jwt_secret must be set (HOTELIER__AUTH__JWT_SECRET or JWT_SECRET)".into(),
            ));
        }
        if self.auth.customer_token_hours <= 0 || self.auth.employee_token_hours <= 0 {
            return Err(config::ConfigError::Message(
                "token lifetimes must be positive".into(),
            ));
        }
        Ok(())
    }
}
