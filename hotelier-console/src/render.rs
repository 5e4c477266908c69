use std::io::Write;

use hotelier_shared::Customer;
use tracing::warn;

use crate::page::{ListState, ManageCustomersPage, ModalState};

const COLUMNS: [&str; 6] = ["ID", "Name", "ID Type", "ID Number", "Address", "Registration Date"];

/// Draws the page. Implementations only read the view-model.
pub trait Render {
    fn render(&mut self, page: &ManageCustomersPage);
}

/// Plain-text table renderer for terminals and logs.
pub struct TextRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Render for TextRenderer<W> {
    fn render(&mut self, page: &ManageCustomersPage) {
        let text = render_to_string(page);
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            warn!(error = %e, "Failed to write page");
        }
    }
}

pub fn render_to_string(page: &ManageCustomersPage) -> String {
    let mut out = String::from("== Manage Customers ==\n");

    if let Some(alert) = page.alert() {
        out.push_str(&format!("! {alert}\n"));
    }

    match page.list() {
        ListState::Loading => out.push_str("Loading customers...\n"),
        ListState::Failed(message) => {
            out.push_str(&format!("Error loading customers: {message}\n"));
            out.push_str("[Retry]\n");
        }
        ListState::Loaded(customers) if customers.is_empty() => {
            out.push_str("No customers found\n");
        }
        ListState::Loaded(customers) => out.push_str(&table(customers)),
    }

    if let Some(id) = page.pending_delete() {
        out.push_str(&format!(
            "Are you sure you want to delete customer {id}? [yes/no]\n"
        ));
    }

    match page.modal() {
        ModalState::Closed => {}
        ModalState::Open { mode, form } | ModalState::Submitting { mode, form } => {
            out.push_str(&format!("-- {} --\n", mode.title()));
            let fields = [
                ("firstName", form.first_name.clone()),
                ("middleName", form.middle_name.clone()),
                ("lastName", form.last_name.clone()),
                ("street", form.street.clone()),
                ("city", form.city.clone()),
                ("state", form.state.clone()),
                ("zipCode", form.zip_code.clone()),
                ("idType", form.id_type.clone()),
                ("idNumber", form.id_number.clone()),
                ("registrationDate", form.registration_date.clone()),
                ("creditCardNumber", form.credit_card_number.as_ref().map(|v| v.to_string())),
                ("creditCardExpiration", form.credit_card_expiration.clone()),
                ("creditCardCvc", form.credit_card_cvc.as_ref().map(|v| v.to_string())),
            ];
            for (name, value) in fields {
                out.push_str(&format!("  {name}: {}\n", value.unwrap_or_default()));
            }

            if matches!(page.modal(), ModalState::Submitting { .. }) {
                out.push_str("Saving...\n");
            } else {
                out.push_str(&format!("[{}] [Cancel]\n", mode.submit_label()));
            }
        }
    }

    out
}

fn row(customer: &Customer) -> [String; 6] {
    [
        customer.id.to_string(),
        customer.name.full_name(),
        customer.id_type.to_string(),
        customer.id_number.clone(),
        customer.address.to_string(),
        customer.registration_date.format("%Y-%m-%d").to_string(),
    ]
}

fn table(customers: &[Customer]) -> String {
    let rows: Vec<[String; 6]> = customers.iter().map(row).collect();

    let mut widths = COLUMNS.map(str::len);
    for cells in &rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: &[&str]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect();
        format!("{}\n", padded.join(" | ").trim_end())
    };

    let mut out = line(&COLUMNS);
    for cells in &rows {
        let cells: Vec<&str> = cells.iter().map(String::as_str).collect();
        out.push_str(&line(&cells));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::tests::customer;

    fn loaded(customers: Vec<Customer>) -> ManageCustomersPage {
        let mut page = ManageCustomersPage::new();
        let ticket = page.begin_load();
        page.finish_load(ticket, Ok(customers));
        page
    }

    #[test]
    fn test_table_lists_customers() {
        let mut c = customer(1001, "Lovelace");
        c.name.middle_name = Some("King".into());
        let text = render_to_string(&loaded(vec![c, customer(1002, "Hopper")]));

        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[1].starts_with("ID"));
        assert!(lines[1].contains("Registration Date"));
        assert!(lines[2].contains("1001"));
        assert!(lines[2].contains("Ada King Lovelace"));
        assert!(lines[2].contains("1 Main St, Springfield, IL 62701"));
        assert!(lines[2].contains("2024-01-15"));
        assert!(lines[3].contains("Ada Hopper"));
    }

    #[test]
    fn test_empty_and_failed_states() {
        assert!(render_to_string(&loaded(vec![])).contains("No customers found"));

        let mut page = ManageCustomersPage::new();
        let ticket = page.begin_load();
        page.finish_load(ticket, Err("timed out".into()));
        let text = render_to_string(&page);
        assert!(text.contains("Error loading customers: timed out"));
        assert!(text.contains("[Retry]"));

        assert!(render_to_string(&ManageCustomersPage::new()).contains("Loading customers..."));
    }

    #[test]
    fn test_form_masks_card_fields() {
        let mut page = loaded(vec![]);
        page.open_create().unwrap();
        page.set_field("creditCardNumber", "4111111111111111").unwrap();
        page.set_field("city", "Springfield").unwrap();

        let text = render_to_string(&page);
        assert!(text.contains("-- Add Customer --"));
        assert!(text.contains("city: Springfield"));
        assert!(text.contains("creditCardNumber: ********"));
        assert!(!text.contains("4111"));
        assert!(text.contains("[Create Customer]"));
    }

    #[test]
    fn test_text_renderer_writes_to_sink() {
        let mut renderer = TextRenderer::new(Vec::new());
        renderer.render(&loaded(vec![customer(1001, "Lovelace")]));
        let written = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(written.contains("Lovelace"));
    }
}
