use async_trait::async_trait;
use chrono::NaiveDate;
use hotelier_core::repository::{CustomerRepository, RepoError};
use hotelier_shared::{Customer, Masked, NewCustomer, PaymentCard, PersonName, PostalAddress};
use sqlx::PgPool;

pub struct PgCustomerRepository {
    pool: PgPool,
}

impl PgCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const CUSTOMER_COLUMNS: &str = "id, first_name, middle_name, last_name, id_type, id_number, \
     street, city, state, zip_code, registration_date, \
     credit_card_number, credit_card_expiration, credit_card_cvc";

// Internal struct for type-safe querying
#[derive(sqlx::FromRow)]
struct CustomerRow {
    id: i32,
    first_name: String,
    middle_name: Option<String>,
    last_name: String,
    id_type: String,
    id_number: String,
    street: String,
    city: String,
    state: String,
    zip_code: String,
    registration_date: NaiveDate,
    credit_card_number: Option<String>,
    credit_card_expiration: Option<String>,
    credit_card_cvc: Option<String>,
}

impl TryFrom<CustomerRow> for Customer {
    type Error = RepoError;

    fn try_from(row: CustomerRow) -> Result<Self, Self::Error> {
        let payment = match (row.credit_card_number, row.credit_card_expiration, row.credit_card_cvc) {
            (Some(number), Some(expiration), Some(cvc)) => Some(PaymentCard {
                number: Masked(number),
                expiration,
                cvc: Masked(cvc),
            }),
            _ => None,
        };

        Ok(Customer {
            id: row.id,
            name: PersonName {
                first_name: row.first_name,
                middle_name: row.middle_name,
                last_name: row.last_name,
            },
            id_type: row.id_type.parse()?,
            id_number: row.id_number,
            address: PostalAddress {
                street: row.street,
                city: row.city,
                state: row.state,
                zip_code: row.zip_code,
            },
            registration_date: row.registration_date,
            payment,
        })
    }
}

#[async_trait]
impl CustomerRepository for PgCustomerRepository {
    async fn insert(&self, customer: &NewCustomer) -> Result<Customer, RepoError> {
        let payment = customer.payment.as_ref();
        let sql = format!(
            r#"
            INSERT INTO customers (first_name, middle_name, last_name, id_type, id_number,
                                   street, city, state, zip_code, registration_date,
                                   credit_card_number, credit_card_expiration, credit_card_cvc)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, COALESCE($10, CURRENT_DATE), $11, $12, $13)
            RETURNING {CUSTOMER_COLUMNS}
            "#
        );

        let row: CustomerRow = sqlx::query_as(&sql)
            .bind(&customer.name.first_name)
            .bind(&customer.name.middle_name)
            .bind(&customer.name.last_name)
            .bind(customer.id_type.as_str())
            .bind(&customer.id_number)
            .bind(&customer.address.street)
            .bind(&customer.address.city)
            .bind(&customer.address.state)
            .bind(&customer.address.zip_code)
            .bind(customer.registration_date)
            .bind(payment.map(|p| p.number.expose().as_str()))
            .bind(payment.map(|p| p.expiration.as_str()))
            .bind(payment.map(|p| p.cvc.expose().as_str()))
            .fetch_one(&self.pool)
            .await?;

        row.try_into()
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Customer>, RepoError> {
        let sql = format!("SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = $1");
        let row: Option<CustomerRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Customer::try_from).transpose()
    }

    async fn list(&self) -> Result<Vec<Customer>, RepoError> {
        let sql = format!("SELECT {CUSTOMER_COLUMNS} FROM customers ORDER BY id");
        let rows: Vec<CustomerRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;

        rows.into_iter().map(Customer::try_from).collect()
    }

    async fn update(&self, id: i32, customer: &NewCustomer) -> Result<Option<Customer>, RepoError> {
        let payment = customer.payment.as_ref();
        let sql = format!(
            r#"
            UPDATE customers
            SET first_name = $1, middle_name = $2, last_name = $3, id_type = $4, id_number = $5,
                street = $6, city = $7, state = $8, zip_code = $9,
                registration_date = COALESCE($10, registration_date),
                credit_card_number = $11, credit_card_expiration = $12, credit_card_cvc = $13,
                updated_at = NOW()
            WHERE id = $14
            RETURNING {CUSTOMER_COLUMNS}
            "#
        );

        let row: Option<CustomerRow> = sqlx::query_as(&sql)
            .bind(&customer.name.first_name)
            .bind(&customer.name.middle_name)
            .bind(&customer.name.last_name)
            .bind(customer.id_type.as_str())
            .bind(&customer.id_number)
            .bind(&customer.address.street)
            .bind(&customer.address.city)
            .bind(&customer.address.state)
            .bind(&customer.address.zip_code)
            .bind(customer.registration_date)
            .bind(payment.map(|p| p.number.expose().as_str()))
            .bind(payment.map(|p| p.expiration.as_str()))
            .bind(payment.map(|p| p.cvc.expose().as_str()))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Customer::try_from).transpose()
    }

    async fn delete(&self, id: i32) -> Result<bool, RepoError> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
