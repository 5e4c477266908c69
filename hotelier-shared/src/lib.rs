pub mod models;
pub mod pii;

pub use models::{
    auth::{LoginRequest, LoginResponse},
    customer::{CreateCustomerResponse, Customer, CustomerForm, IdType, NewCustomer, PaymentCard, PersonName, PostalAddress},
    employee::{Employee, EmployeeProfile, Role},
};
pub use pii::Masked;
