use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use hotelier_shared::{Employee, LoginRequest};
use tracing::warn;

use crate::repository::EmployeeRepository;
use crate::{CoreError, CoreResult};

/// Produce an argon2 PHC string with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Check an employee login against the directory.
pub async fn authenticate(
    employees: &dyn EmployeeRepository,
    req: &LoginRequest,
) -> CoreResult<Employee> {
    let ssn = req.ssn.trim();
    if ssn.is_empty() || req.password.is_empty() {
        return Err(CoreError::ValidationError(
            "SSN and password are required".to_string(),
        ));
    }

    let employee = employees
        .find_by_ssn(ssn)
        .await
        .map_err(|e| CoreError::InternalError(e.to_string()))?
        .ok_or_else(|| {
            warn!("Login attempt for unknown employee");
            CoreError::AuthenticationError("Invalid employee SSN".to_string())
        })?;

    if !verify_password(&req.password, employee.password_hash.expose()) {
        warn!(hotel_id = employee.hotel_id, "Login attempt with wrong password");
        return Err(CoreError::AuthenticationError(
            "Invalid credentials".to_string(),
        ));
    }

    Ok(employee)
}
