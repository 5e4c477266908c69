use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::UnknownVariant;
use crate::pii::Masked;

/// Role carried in session tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Employee,
    Manager,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Employee => "employee",
            Role::Manager => "manager",
        }
    }

    /// Hotel staff may manage customer records.
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Employee | Role::Manager)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Role::Customer),
            "employee" => Ok(Role::Employee),
            "manager" => Ok(Role::Manager),
            other => Err(UnknownVariant { kind: "role", value: other.to_string() }),
        }
    }
}

/// A provisioned hotel employee, keyed by SSN.
#[derive(Debug, Clone)]
pub struct Employee {
    pub ssn: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub hotel_id: i32,
    pub password_hash: Masked<String>,
}

impl Employee {
    /// Public projection returned at login. Excludes the SSN and the hash.
    pub fn profile(&self) -> EmployeeProfile {
        EmployeeProfile {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            role: self.role,
            hotel_id: self.hotel_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeProfile {
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub hotel_id: i32,
}
