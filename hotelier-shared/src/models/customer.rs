use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::UnknownVariant;
use crate::pii::Masked;

/// Identity document presented at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdType {
    Passport,
    #[serde(rename = "Driver License")]
    DriverLicense,
    #[serde(rename = "National ID")]
    NationalId,
}

impl IdType {
    pub const ALL: [IdType; 3] = [IdType::Passport, IdType::DriverLicense, IdType::NationalId];

    pub fn as_str(&self) -> &'static str {
        match self {
            IdType::Passport => "Passport",
            IdType::DriverLicense => "Driver License",
            IdType::NationalId => "National ID",
        }
    }
}

impl fmt::Display for IdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IdType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownVariant { kind: "id type", value: s.to_string() })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonName {
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    pub last_name: String,
}

impl PersonName {
    pub fn full_name(&self) -> String {
        match self.middle_name.as_deref() {
            Some(middle) if !middle.is_empty() => {
                format!("{} {} {}", self.first_name, middle, self.last_name)
            }
            _ => format!("{} {}", self.first_name, self.last_name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostalAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

impl fmt::Display for PostalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {} {}", self.street, self.city, self.state, self.zip_code)
    }
}

/// Card on file. Stored and returned as plain text; only log output is masked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentCard {
    #[serde(rename = "creditCardNumber")]
    pub number: Masked<String>,
    #[serde(rename = "creditCardExpiration")]
    pub expiration: String,
    #[serde(rename = "creditCardCvc", alias = "creditCardCVC")]
    pub cvc: Masked<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i32,
    #[serde(flatten)]
    pub name: PersonName,
    pub id_type: IdType,
    pub id_number: String,
    #[serde(flatten)]
    pub address: PostalAddress,
    pub registration_date: NaiveDate,
    #[serde(flatten)]
    pub payment: Option<PaymentCard>,
}

/// A validated customer field set, ready to be written to the store.
///
/// `registration_date` is `None` when the caller did not supply one: inserts
/// default it to today, updates keep the stored value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: PersonName,
    pub id_type: IdType,
    pub id_number: String,
    pub address: PostalAddress,
    pub registration_date: Option<NaiveDate>,
    pub payment: Option<PaymentCard>,
}

/// Raw create/edit form as submitted by the admin page.
///
/// Every field is optional on the wire so that a missing key and an empty
/// string are rejected the same way, with a 400 rather than a body-parse error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_card_number: Option<Masked<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_card_expiration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "creditCardCVC")]
    pub credit_card_cvc: Option<Masked<String>>,
}

impl From<&Customer> for CustomerForm {
    fn from(customer: &Customer) -> Self {
        let payment = customer.payment.as_ref();
        Self {
            first_name: Some(customer.name.first_name.clone()),
            middle_name: customer.name.middle_name.clone(),
            last_name: Some(customer.name.last_name.clone()),
            street: Some(customer.address.street.clone()),
            city: Some(customer.address.city.clone()),
            state: Some(customer.address.state.clone()),
            zip_code: Some(customer.address.zip_code.clone()),
            id_type: Some(customer.id_type.to_string()),
            id_number: Some(customer.id_number.clone()),
            registration_date: Some(customer.registration_date.format("%Y-%m-%d").to_string()),
            credit_card_number: payment.map(|p| p.number.clone()),
            credit_card_expiration: payment.map(|p| p.expiration.clone()),
            credit_card_cvc: payment.map(|p| p.cvc.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCustomerResponse {
    pub id: i32,
    pub token: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Customer {
        Customer {
            id: 1001,
            name: PersonName {
                first_name: "Ada".into(),
                middle_name: None,
                last_name: "Lovelace".into(),
            },
            id_type: IdType::DriverLicense,
            id_number: "D-42".into(),
            address: PostalAddress {
                street: "1 Main St".into(),
                city: "Springfield".into(),
                state: "IL".into(),
                zip_code: "62701".into(),
            },
            registration_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            payment: None,
        }
    }

    #[test]
    fn test_customer_wire_shape_is_flat_camel_case() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 1001,
                "firstName": "Ada",
                "lastName": "Lovelace",
                "idType": "Driver License",
                "idNumber": "D-42",
                "street": "1 Main St",
                "city": "Springfield",
                "state": "IL",
                "zipCode": "62701",
                "registrationDate": "2024-03-01"
            })
        );
    }

    #[test]
    fn test_customer_payment_card_round_trips_through_flatten() {
        let mut customer = sample();
        customer.payment = Some(PaymentCard {
            number: "4111111111111111".into(),
            expiration: "12/29".into(),
            cvc: "123".into(),
        });

        let value = serde_json::to_value(&customer).unwrap();
        assert_eq!(value["creditCardNumber"], "4111111111111111");
        assert_eq!(value["creditCardCvc"], "123");

        let parsed: Customer = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, customer);
        assert!(!format!("{:?}", parsed).contains("4111"));
    }

    #[test]
    fn test_id_type_parses_display_labels() {
        assert_eq!("National ID".parse::<IdType>().unwrap(), IdType::NationalId);
        assert!("Library Card".parse::<IdType>().is_err());
    }

    #[test]
    fn test_full_name_skips_blank_middle_name() {
        let mut name = sample().name;
        assert_eq!(name.full_name(), "Ada Lovelace");
        name.middle_name = Some("King".into());
        assert_eq!(name.full_name(), "Ada King Lovelace");
    }

    #[test]
    fn test_form_prefills_from_customer() {
        let form = CustomerForm::from(&sample());
        assert_eq!(form.id_type.as_deref(), Some("Driver License"));
        assert_eq!(form.registration_date.as_deref(), Some("2024-03-01"));
        assert!(form.credit_card_number.is_none());
    }

    #[test]
    fn test_upper_case_cvc_key_is_accepted() {
        let form: CustomerForm = serde_json::from_value(json!({
            "creditCardNumber": "4111111111111111",
            "creditCardExpiration": "12/29",
            "creditCardCVC": "123"
        }))
        .unwrap();
        assert_eq!(form.credit_card_cvc, Some(Masked("123".to_string())));

        let card: PaymentCard = serde_json::from_value(json!({
            "creditCardNumber": "4111111111111111",
            "creditCardExpiration": "12/29",
            "creditCardCVC": "123"
        }))
        .unwrap();
        assert_eq!(card.cvc.expose(), "123");
    }
}
