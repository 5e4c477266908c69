use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// A wrapper for sensitive data that masks its value in Debug and Display output.
///
/// Serialization passes the real value through: API responses need it, log
/// macros like `tracing::info!("{:?}", customer)` must not.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Masked<T>(pub T);

impl<T> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T: Serialize> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<T> Masked<T> {
    pub fn expose(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl From<String> for Masked<String> {
    fn from(value: String) -> Self {
        Masked(value)
    }
}

impl From<&str> for Masked<String> {
    fn from(value: &str) -> Self {
        Masked(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masked_hides_value_in_formatting() {
        let card = Masked::from("4111111111111111");
        assert_eq!(format!("{:?}", card), "********");
        assert_eq!(card.to_string(), "********");
        assert_eq!(card.expose(), "4111111111111111");
    }

    #[test]
    fn test_masked_serializes_real_value() {
        let cvc = Masked::from("123");
        assert_eq!(serde_json::to_string(&cvc).unwrap(), "\"123\"");

        let parsed: Masked<String> = serde_json::from_str("\"987\"").unwrap();
        assert_eq!(parsed.into_inner(), "987");
    }
}
