use anyhow::Context;
use chrono::{Duration, Utc};
use hotelier_shared::{Employee, Role};
use hotelier_store::app_config::AuthConfig;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::middleware::auth::SessionClaims;

/// Mints and checks HS256 session tokens.
///
/// Built once at startup from validated config; handlers never read the
/// secret themselves.
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    customer_ttl: Duration,
    employee_ttl: Duration,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            customer_ttl: Duration::hours(config.customer_token_hours),
            employee_ttl: Duration::hours(config.employee_token_hours),
        }
    }

    /// Token handed back on customer registration: `{id, role: "customer"}`.
    pub fn issue_customer(&self, customer_id: i32) -> anyhow::Result<String> {
        self.issue(customer_id.to_string(), Role::Customer, None, self.customer_ttl)
    }

    /// Token handed back on employee login, carrying the hotel affiliation.
    pub fn issue_employee(&self, employee: &Employee) -> anyhow::Result<String> {
        self.issue(
            employee.ssn.clone(),
            employee.role,
            Some(employee.hotel_id),
            self.employee_ttl,
        )
    }

    pub fn verify(&self, token: &str) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
        decode::<SessionClaims>(token, &self.decoding, &Validation::default()).map(|data| data.claims)
    }

    fn issue(
        &self,
        id: String,
        role: Role,
        hotel_id: Option<i32>,
        ttl: Duration,
    ) -> anyhow::Result<String> {
        let now = Utc::now();
        let claims = SessionClaims {
            id,
            role,
            hotel_id,
            iat: now.timestamp() as usize,
            exp: (now + ttl).timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding).context("Token encoding failed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotelier_shared::Masked;

    fn issuer(secret: &str) -> TokenIssuer {
        TokenIssuer::new(&AuthConfig {
            jwt_secret: secret.to_string(),
            customer_token_hours: 24,
            employee_token_hours: 8,
        })
    }

    #[test]
    fn test_customer_token_lasts_a_day() {
        let issuer = issuer("secret");
        let claims = issuer.verify(&issuer.issue_customer(1001).unwrap()).unwrap();

        assert_eq!(claims.id, "1001");
        assert_eq!(claims.role, Role::Customer);
        assert_eq!(claims.hotel_id, None);
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn test_employee_token_carries_hotel() {
        let issuer = issuer("secret");
        let employee = Employee {
            ssn: "123-45-6789".into(),
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            role: Role::Employee,
            hotel_id: 3,
            password_hash: Masked(String::new()),
        };

        let claims = issuer.verify(&issuer.issue_employee(&employee).unwrap()).unwrap();
        assert_eq!(claims.role, Role::Employee);
        assert_eq!(claims.hotel_id, Some(3));
        assert_eq!(claims.exp - claims.iat, 8 * 3600);
    }

    #[test]
    fn test_foreign_signature_is_rejected() {
        let token = issuer("one").issue_customer(1001).unwrap();
        assert!(issuer("two").verify(&token).is_err());
    }
}
