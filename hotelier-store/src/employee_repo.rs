use async_trait::async_trait;
use hotelier_core::repository::{EmployeeRepository, RepoError};
use hotelier_shared::{Employee, Masked};
use sqlx::PgPool;

pub struct PgEmployeeRepository {
    pool: PgPool,
}

impl PgEmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct EmployeeRow {
    ssn: String,
    first_name: String,
    last_name: String,
    role: String,
    hotel_id: i32,
    password_hash: String,
}

#[async_trait]
impl EmployeeRepository for PgEmployeeRepository {
    async fn find_by_ssn(&self, ssn: &str) -> Result<Option<Employee>, RepoError> {
        let row: Option<EmployeeRow> = sqlx::query_as(
            "SELECT ssn, first_name, last_name, role, hotel_id, password_hash FROM employees WHERE ssn = $1",
        )
        .bind(ssn)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(Employee {
            ssn: row.ssn,
            first_name: row.first_name,
            last_name: row.last_name,
            role: row.role.parse()?,
            hotel_id: row.hotel_id,
            password_hash: Masked(row.password_hash),
        }))
    }
}
