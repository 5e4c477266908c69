use tracing::{info, warn};

use crate::api::CustomerApi;
use crate::page::{FormMode, LoadTicket, ManageCustomersPage, PageError};
use crate::render::Render;

/// Drives a [`ManageCustomersPage`] against a [`CustomerApi`], re-rendering
/// after every state change.
pub struct CustomersController<A, R> {
    api: A,
    renderer: R,
    page: ManageCustomersPage,
}

impl<A: CustomerApi, R: Render> CustomersController<A, R> {
    pub fn new(api: A, renderer: R) -> Self {
        Self {
            api,
            renderer,
            page: ManageCustomersPage::new(),
        }
    }

    pub fn page(&self) -> &ManageCustomersPage {
        &self.page
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    fn render(&mut self) {
        self.renderer.render(&self.page);
    }

    /// Fetch the full list.
    pub async fn load(&mut self) {
        let ticket = self.page.begin_load();
        self.render();
        self.fetch(ticket).await;
    }

    /// Reload after a failed load.
    pub async fn retry(&mut self) -> Result<(), PageError> {
        let ticket = self.page.retry()?;
        self.render();
        self.fetch(ticket).await;
        Ok(())
    }

    async fn fetch(&mut self, ticket: LoadTicket) {
        let result = self.api.get_customers().await.map_err(|e| {
            warn!(error = %e, "Failed to load customers");
            e.to_string()
        });
        if self.page.finish_load(ticket, result) {
            self.render();
        }
    }

    /// Open the modal blank for `None`, or prefilled with a fresh copy of the
    /// record for `Some(id)`. A failed fetch leaves the modal closed.
    pub async fn open_form(&mut self, customer_id: Option<i32>) -> Result<(), PageError> {
        match customer_id {
            None => self.page.open_create()?,
            Some(id) => match self.api.get_customer(id).await {
                Ok(customer) => self.page.open_edit(&customer)?,
                Err(e) => {
                    warn!(customer_id = id, error = %e, "Failed to fetch customer for editing");
                    self.page.show_alert(format!("Error loading customer: {e}"));
                }
            },
        }
        self.render();
        Ok(())
    }

    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), PageError> {
        self.page.set_field(field, value)?;
        self.render();
        Ok(())
    }

    /// Send the form. Create posts, edit puts; the list reloads on success.
    pub async fn submit(&mut self) -> Result<(), PageError> {
        let submission = self.page.begin_submit()?;
        self.render();

        let result = match submission.mode {
            FormMode::Create => self
                .api
                .create_customer(&submission.form)
                .await
                .map(|created| info!(customer_id = created.id, "Customer created")),
            FormMode::Edit(id) => self
                .api
                .update_customer(id, &submission.form)
                .await
                .map(|_| info!(customer_id = id, "Customer updated")),
        };

        match result {
            Ok(()) => {
                self.page.finish_submit(Ok(()))?;
                self.load().await;
            }
            Err(e) => {
                self.page.finish_submit(Err(e.to_string()))?;
                self.render();
            }
        }
        Ok(())
    }

    pub fn close_form(&mut self) -> Result<(), PageError> {
        self.page.close_modal()?;
        self.render();
        Ok(())
    }

    /// Ask for confirmation before deleting.
    pub fn request_delete(&mut self, customer_id: i32) {
        self.page.request_delete(customer_id);
        self.render();
    }

    /// Answer the pending prompt. Declining sends nothing to the server.
    pub async fn answer_delete(&mut self, confirmed: bool) {
        if !confirmed {
            self.page.cancel_delete();
            self.render();
            return;
        }

        let Some(id) = self.page.confirm_delete() else {
            return;
        };

        match self.api.delete_customer(id).await {
            Ok(()) => {
                info!(customer_id = id, "Customer deleted");
                self.load().await;
            }
            Err(e) => {
                warn!(customer_id = id, error = %e, "Failed to delete customer");
                self.page.show_alert(format!("Error deleting customer: {e}"));
                self.render();
            }
        }
    }

    pub fn dismiss_alert(&mut self) {
        self.page.dismiss_alert();
        self.render();
    }
}
