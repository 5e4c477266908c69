use chrono::NaiveDate;
use hotelier_shared::{CustomerForm, IdType, Masked, NewCustomer, PaymentCard, PersonName, PostalAddress};

use crate::{CoreError, CoreResult};

/// Checks a submitted customer form and turns it into a storable field set.
///
/// Required: firstName, lastName, street, city, state, zipCode, idType,
/// idNumber. Card fields are optional but must be supplied together.
pub fn validate_customer_form(form: &CustomerForm) -> CoreResult<NewCustomer> {
    let mut missing = Vec::new();

    let first_name = required(&form.first_name, "firstName", &mut missing);
    let last_name = required(&form.last_name, "lastName", &mut missing);
    let street = required(&form.street, "street", &mut missing);
    let city = required(&form.city, "city", &mut missing);
    let state = required(&form.state, "state", &mut missing);
    let zip_code = required(&form.zip_code, "zipCode", &mut missing);
    let id_type = required(&form.id_type, "idType", &mut missing);
    let id_number = required(&form.id_number, "idNumber", &mut missing);

    if !missing.is_empty() {
        return Err(CoreError::ValidationError(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    let id_type: IdType = id_type
        .parse()
        .map_err(|_| CoreError::ValidationError(format!("Invalid idType: {}", id_type)))?;

    let registration_date = optional(&form.registration_date)
        .map(|raw| {
            NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|_| {
                CoreError::ValidationError(format!("Invalid registrationDate: {}", raw))
            })
        })
        .transpose()?;

    Ok(NewCustomer {
        name: PersonName {
            first_name,
            middle_name: optional(&form.middle_name),
            last_name,
        },
        id_type,
        id_number,
        address: PostalAddress { street, city, state, zip_code },
        registration_date,
        payment: payment_card(form)?,
    })
}

fn required(value: &Option<String>, field: &'static str, missing: &mut Vec<&'static str>) -> String {
    match optional(value) {
        Some(v) => v,
        None => {
            missing.push(field);
            String::new()
        }
    }
}

fn optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn payment_card(form: &CustomerForm) -> CoreResult<Option<PaymentCard>> {
    let number = optional(&form.credit_card_number.as_ref().map(|m| m.expose().clone()));
    let expiration = optional(&form.credit_card_expiration);
    let cvc = optional(&form.credit_card_cvc.as_ref().map(|m| m.expose().clone()));

    match (number, expiration, cvc) {
        (None, None, None) => Ok(None),
        (Some(number), Some(expiration), Some(cvc)) => Ok(Some(PaymentCard {
            number: Masked(number),
            expiration,
            cvc: Masked(cvc),
        })),
        (number, expiration, cvc) => {
            let absent: Vec<&str> = [
                (number.is_none(), "creditCardNumber"),
                (expiration.is_none(), "creditCardExpiration"),
                (cvc.is_none(), "creditCardCvc"),
            ]
            .into_iter()
            .filter_map(|(gone, field)| gone.then_some(field))
            .collect();
            Err(CoreError::ValidationError(format!(
                "Incomplete payment card, missing: {}",
                absent.join(", ")
            )))
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn complete_form() -> CustomerForm {
        CustomerForm {
            first_name: Some("Ada".into()),
            middle_name: None,
            last_name: Some("Lovelace".into()),
            street: Some("1 Main St".into()),
            city: Some("Springfield".into()),
            state: Some("IL".into()),
            zip_code: Some("62701".into()),
            id_type: Some("Passport".into()),
            id_number: Some("P123456".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_complete_form_is_accepted() {
        let customer = validate_customer_form(&complete_form()).unwrap();
        assert_eq!(customer.name.first_name, "Ada");
        assert_eq!(customer.id_type, IdType::Passport);
        assert_eq!(customer.registration_date, None);
        assert_eq!(customer.payment, None);
    }

    #[test]
    fn test_missing_and_blank_fields_are_reported() {
        let mut form = complete_form();
        form.last_name = None;
        form.city = Some("   ".into());

        match validate_customer_form(&form) {
            Err(CoreError::ValidationError(msg)) => {
                assert_eq!(msg, "Missing required fields: lastName, city");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_middle_name_and_date_are_optional() {
        let mut form = complete_form();
        form.middle_name = Some("".into());
        form.registration_date = Some("2023-11-05".into());

        let customer = validate_customer_form(&form).unwrap();
        assert_eq!(customer.name.middle_name, None);
        assert_eq!(customer.registration_date, NaiveDate::from_ymd_opt(2023, 11, 5));
    }

    #[test]
    fn test_unknown_id_type_is_rejected() {
        let mut form = complete_form();
        form.id_type = Some("Library Card".into());
        assert!(matches!(validate_customer_form(&form), Err(CoreError::ValidationError(_))));
    }

    #[test]
    fn test_malformed_registration_date_is_rejected() {
        let mut form = complete_form();
        form.registration_date = Some("05/11/2023".into());
        assert!(matches!(validate_customer_form(&form), Err(CoreError::ValidationError(_))));
    }

    #[test]
    fn test_payment_card_must_be_complete() {
        let mut form = complete_form();
        form.credit_card_number = Some("4111111111111111".into());
        form.credit_card_expiration = Some("12/29".into());

        match validate_customer_form(&form) {
            Err(CoreError::ValidationError(msg)) => assert!(msg.ends_with("creditCardCvc")),
            other => panic!("expected validation error, got {:?}", other),
        }

        form.credit_card_cvc = Some("123".into());
        let card = validate_customer_form(&form).unwrap().payment.unwrap();
        assert_eq!(card.number.expose(), "4111111111111111");
        assert_eq!(card.expiration, "12/29");
    }
}
