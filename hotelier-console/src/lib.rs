//! Client side of the "Manage Customers" admin page.
//!
//! `page` holds the view-model, `render` turns it into text, `api` talks to
//! the REST server, and `controller` wires the three together.

pub mod api;
pub mod controller;
pub mod error;
pub mod page;
pub mod render;

pub use api::{CustomerApi, HttpCustomerApi};
pub use controller::CustomersController;
pub use error::{ClientError, ClientResult};
pub use page::{FormMode, ListState, ManageCustomersPage, ModalState, PageError};
pub use render::{Render, TextRenderer};
