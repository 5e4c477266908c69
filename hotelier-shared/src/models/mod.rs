pub mod auth;
pub mod customer;
pub mod employee;

/// Returned by the parsers in this module when a stored or submitted
/// label does not match any known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}
