use serde::{Deserialize, Deserializer, Serialize};

use super::employee::EmployeeProfile;

/// POST /employee/login body. Missing and `null` keys deserialize as empty strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub ssn: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub password: String,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: EmployeeProfile,
}
