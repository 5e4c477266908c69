//! View-model for the "Manage Customers" page.
//!
//! Holds the list, the add/edit modal, the pending delete prompt and the alert
//! banner. Nothing here performs I/O; the controller feeds results in and a
//! [`Render`](crate::render::Render) adapter reads the state back out.

use hotelier_shared::{Customer, CustomerForm, Masked};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState {
    Loading,
    Loaded(Vec<Customer>),
    Failed(String),
}

impl ListState {
    fn name(&self) -> &'static str {
        match self {
            ListState::Loading => "Loading",
            ListState::Loaded(_) => "Loaded",
            ListState::Failed(_) => "Failed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i32),
}

impl FormMode {
    pub fn title(&self) -> &'static str {
        match self {
            FormMode::Create => "Add Customer",
            FormMode::Edit(_) => "Edit Customer",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            FormMode::Create => "Create Customer",
            FormMode::Edit(_) => "Update Customer",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    Open { mode: FormMode, form: CustomerForm },
    Submitting { mode: FormMode, form: CustomerForm },
}

impl ModalState {
    fn name(&self) -> &'static str {
        match self {
            ModalState::Closed => "Closed",
            ModalState::Open { .. } => "Open",
            ModalState::Submitting { .. } => "Submitting",
        }
    }
}

/// Issued by [`ManageCustomersPage::begin_load`]; only the newest ticket may
/// complete a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Snapshot of the modal taken when the user presses submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub mode: FormMode,
    pub form: CustomerForm,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("Invalid transition from {from} on {action}")]
    InvalidTransition {
        from: &'static str,
        action: &'static str,
    },

    #[error("Unknown form field: {0}")]
    UnknownField(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManageCustomersPage {
    list: ListState,
    modal: ModalState,
    pending_delete: Option<i32>,
    alert: Option<String>,
    generation: u64,
}

impl Default for ManageCustomersPage {
    fn default() -> Self {
        Self::new()
    }
}

impl ManageCustomersPage {
    pub fn new() -> Self {
        Self {
            list: ListState::Loading,
            modal: ModalState::Closed,
            pending_delete: None,
            alert: None,
            generation: 0,
        }
    }

    pub fn list(&self) -> &ListState {
        &self.list
    }

    pub fn modal(&self) -> &ModalState {
        &self.modal
    }

    pub fn pending_delete(&self) -> Option<i32> {
        self.pending_delete
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    // ------------------------------------------------------------------
    // List
    // ------------------------------------------------------------------

    /// Enter `Loading` and invalidate any load still in flight.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.list = ListState::Loading;
        LoadTicket(self.generation)
    }

    /// Apply a load result. Returns `false` when a newer load has started
    /// since `ticket` was issued, in which case the result is dropped.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Vec<Customer>, String>) -> bool {
        if ticket.0 != self.generation {
            return false;
        }

        self.list = match result {
            Ok(customers) => ListState::Loaded(customers),
            Err(message) => ListState::Failed(message),
        };
        true
    }

    /// `Failed → Loading`
    pub fn retry(&mut self) -> Result<LoadTicket, PageError> {
        if !matches!(self.list, ListState::Failed(_)) {
            return Err(PageError::InvalidTransition {
                from: self.list.name(),
                action: "retry",
            });
        }
        Ok(self.begin_load())
    }

    // ------------------------------------------------------------------
    // Modal
    // ------------------------------------------------------------------

    /// `Closed → Open(Create)` with every field blank.
    pub fn open_create(&mut self) -> Result<(), PageError> {
        self.ensure_modal_closed("open_create")?;
        self.modal = ModalState::Open {
            mode: FormMode::Create,
            form: CustomerForm::default(),
        };
        Ok(())
    }

    /// `Closed → Open(Edit(id))` prefilled from the freshly fetched record.
    pub fn open_edit(&mut self, customer: &Customer) -> Result<(), PageError> {
        self.ensure_modal_closed("open_edit")?;
        self.modal = ModalState::Open {
            mode: FormMode::Edit(customer.id),
            form: CustomerForm::from(customer),
        };
        Ok(())
    }

    /// Set one form field by its wire name (`firstName`, `zipCode`, ...).
    /// An empty value clears the field.
    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), PageError> {
        let from = self.modal.name();
        let ModalState::Open { form, .. } = &mut self.modal else {
            return Err(PageError::InvalidTransition {
                from,
                action: "set_field",
            });
        };

        let value = Some(value.to_string()).filter(|v| !v.is_empty());
        match field {
            "firstName" => form.first_name = value,
            "middleName" => form.middle_name = value,
            "lastName" => form.last_name = value,
            "street" => form.street = value,
            "city" => form.city = value,
            "state" => form.state = value,
            "zipCode" => form.zip_code = value,
            "idType" => form.id_type = value,
            "idNumber" => form.id_number = value,
            "registrationDate" => form.registration_date = value,
            "creditCardNumber" => form.credit_card_number = value.map(Masked),
            "creditCardExpiration" => form.credit_card_expiration = value,
            "creditCardCvc" => form.credit_card_cvc = value.map(Masked),
            other => return Err(PageError::UnknownField(other.to_string())),
        }
        Ok(())
    }

    /// `Open → Submitting`; the returned snapshot is what gets sent.
    pub fn begin_submit(&mut self) -> Result<Submission, PageError> {
        let ModalState::Open { mode, form } = &self.modal else {
            return Err(PageError::InvalidTransition {
                from: self.modal.name(),
                action: "begin_submit",
            });
        };

        let submission = Submission {
            mode: *mode,
            form: form.clone(),
        };
        self.modal = ModalState::Submitting {
            mode: submission.mode,
            form: submission.form.clone(),
        };
        Ok(submission)
    }

    /// `Submitting → Closed` on success. On failure the modal reopens with
    /// the user's input intact and the server message is shown.
    pub fn finish_submit(&mut self, result: Result<(), String>) -> Result<(), PageError> {
        match std::mem::replace(&mut self.modal, ModalState::Closed) {
            ModalState::Submitting { mode, form } => {
                if let Err(message) = result {
                    self.alert = Some(format!("Error saving customer: {message}"));
                    self.modal = ModalState::Open { mode, form };
                }
                Ok(())
            }
            other => {
                let from = other.name();
                self.modal = other;
                Err(PageError::InvalidTransition {
                    from,
                    action: "finish_submit",
                })
            }
        }
    }

    /// `Open → Closed`, discarding the draft.
    pub fn close_modal(&mut self) -> Result<(), PageError> {
        match self.modal {
            ModalState::Open { .. } => {
                self.modal = ModalState::Closed;
                Ok(())
            }
            ModalState::Closed => Ok(()),
            ModalState::Submitting { .. } => Err(PageError::InvalidTransition {
                from: "Submitting",
                action: "close_modal",
            }),
        }
    }

    fn ensure_modal_closed(&self, action: &'static str) -> Result<(), PageError> {
        match self.modal {
            ModalState::Closed => Ok(()),
            _ => Err(PageError::InvalidTransition {
                from: self.modal.name(),
                action,
            }),
        }
    }

    // ------------------------------------------------------------------
    // Delete prompt and alerts
    // ------------------------------------------------------------------

    pub fn request_delete(&mut self, customer_id: i32) {
        self.pending_delete = Some(customer_id);
    }

    /// Take the id awaiting confirmation, clearing the prompt.
    pub fn confirm_delete(&mut self) -> Option<i32> {
        self.pending_delete.take()
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn show_alert(&mut self, message: impl Into<String>) {
        self.alert = Some(message.into());
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }
}
