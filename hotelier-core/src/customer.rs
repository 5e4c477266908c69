use chrono::Utc;
use hotelier_shared::{Customer, CustomerForm};
use std::sync::Arc;
use tracing::info;

use crate::repository::{CustomerRepository, RepoError};
use crate::validation::validate_customer_form;
use crate::{CoreError, CoreResult};

/// Create, read, update and delete customer records.
#[derive(Clone)]
pub struct CustomerService {
    repo: Arc<dyn CustomerRepository>,
}

impl CustomerService {
    pub fn new(repo: Arc<dyn CustomerRepository>) -> Self {
        Self { repo }
    }

    /// Validate the form, default the registration date to today, and insert.
    pub async fn create(&self, form: &CustomerForm) -> CoreResult<Customer> {
        let mut draft = validate_customer_form(form)?;
        draft
            .registration_date
            .get_or_insert_with(|| Utc::now().date_naive());

        let customer = self.repo.insert(&draft).await.map_err(internal)?;
        info!(customer_id = customer.id, "Customer created");
        Ok(customer)
    }

    pub async fn get(&self, id: i32) -> CoreResult<Customer> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(internal)?
            .ok_or_else(|| not_found(id))
    }

    pub async fn list(&self) -> CoreResult<Vec<Customer>> {
        self.repo.list().await.map_err(internal)
    }

    /// Replace every field of an existing customer. An omitted
    /// registration date keeps the stored one.
    pub async fn update(&self, id: i32, form: &CustomerForm) -> CoreResult<Customer> {
        let draft = validate_customer_form(form)?;
        let customer = self
            .repo
            .update(id, &draft)
            .await
            .map_err(internal)?
            .ok_or_else(|| not_found(id))?;

        info!(customer_id = id, "Customer updated");
        Ok(customer)
    }

    pub async fn delete(&self, id: i32) -> CoreResult<()> {
        if !self.repo.delete(id).await.map_err(internal)? {
            return Err(not_found(id));
        }

        info!(customer_id = id, "Customer deleted");
        Ok(())
    }
}

fn not_found(id: i32) -> CoreError {
    CoreError::NotFound(format!("Customer {} not found", id))
}

fn internal(err: RepoError) -> CoreError {
    CoreError::InternalError(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryCustomerRepository;
    use crate::validation::tests::complete_form;
    use crate::FIRST_CUSTOMER_ID;
    use chrono::NaiveDate;

    fn service() -> (CustomerService, Arc<InMemoryCustomerRepository>) {
        let repo = Arc::new(InMemoryCustomerRepository::new());
        (CustomerService::new(repo.clone()), repo)
    }

    #[tokio::test]
    async fn test_create_then_fetch() {
        let (service, _) = service();

        let created = service.create(&complete_form()).await.unwrap();
        assert_eq!(created.id, FIRST_CUSTOMER_ID);
        assert_eq!(created.registration_date, Utc::now().date_naive());

        let fetched = service.get(created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.name.last_name, "Lovelace");
        assert_eq!(fetched.address.zip_code, "62701");
    }

    #[tokio::test]
    async fn test_ids_strictly_increase() {
        let (service, _) = service();

        let first = service.create(&complete_form()).await.unwrap();
        let second = service.create(&complete_form()).await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_invalid_form_inserts_nothing() {
        let (service, repo) = service();
        let mut form = complete_form();
        form.last_name = None;

        let err = service.create(&form).await.unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
        assert_eq!(repo.count().await, 0);
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let (service, _) = service();

        assert!(matches!(service.get(999999).await, Err(CoreError::NotFound(_))));
        assert!(matches!(
            service.update(999999, &complete_form()).await,
            Err(CoreError::NotFound(_))
        ));
        assert!(matches!(service.delete(999999).await, Err(CoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_keeps_registration_date_when_omitted() {
        let (service, _) = service();
        let mut form = complete_form();
        form.registration_date = Some("2022-01-15".into());
        let created = service.create(&form).await.unwrap();

        let mut edit = complete_form();
        edit.city = Some("Shelbyville".into());
        let updated = service.update(created.id, &edit).await.unwrap();

        assert_eq!(updated.address.city, "Shelbyville");
        assert_eq!(updated.registration_date, NaiveDate::from_ymd_opt(2022, 1, 15).unwrap());
    }

    #[tokio::test]
    async fn test_delete_removes_row() {
        let (service, repo) = service();
        let created = service.create(&complete_form()).await.unwrap();

        service.delete(created.id).await.unwrap();
        assert_eq!(repo.count().await, 0);
        assert!(matches!(service.get(created.id).await, Err(CoreError::NotFound(_))));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_creates_get_distinct_ids() {
        let (service, _) = service();

        let a = tokio::spawn({
            let service = service.clone();
            async move { service.create(&complete_form()).await }
        });
        let b = tokio::spawn({
            let service = service.clone();
            async move { service.create(&complete_form()).await }
        });

        let mut ids = vec![a.await.unwrap().unwrap().id, b.await.unwrap().unwrap().id];
        ids.sort();
        assert_eq!(ids, vec![FIRST_CUSTOMER_ID, FIRST_CUSTOMER_ID + 1]);

        let listed: Vec<i32> = service.list().await.unwrap().iter().map(|c| c.id).collect();
        assert_eq!(listed, ids);
    }
}
