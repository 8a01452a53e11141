//! Generated record seed types.
//!
//! These types mirror the user and bank payloads of the random-data API
//! without depending on backend domain types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A generated example user record.
///
/// # Example
///
/// ```
/// use example_data::ExampleUserSeed;
/// use uuid::Uuid;
///
/// let user = ExampleUserSeed {
///     id: Uuid::nil(),
///     first_name: "Ada".to_owned(),
///     last_name: "Lovelace".to_owned(),
///     username: "alovelace".to_owned(),
///     email: "alovelace@example.com".to_owned(),
/// };
///
/// assert_eq!(user.username, "alovelace");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleUserSeed {
    /// Unique identifier for the user.
    pub id: Uuid,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Login handle derived from the name.
    pub username: String,
    /// Contact address on a reserved example domain.
    pub email: String,
}

/// A generated example bank record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleBankSeed {
    /// Unique identifier for the bank.
    pub id: Uuid,
    /// Display name of the bank.
    pub bank_name: String,
    /// Nine-digit ABA routing number with a valid check digit.
    pub routing_number: String,
    /// Eight or eleven character SWIFT/BIC code.
    pub swift_bic: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_seed_serializes_with_api_field_names() {
        let user = ExampleUserSeed {
            id: Uuid::nil(),
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            username: "alovelace".to_owned(),
            email: "alovelace@example.com".to_owned(),
        };
        let json = serde_json::to_string(&user).expect("serialize");
        assert!(json.contains("first_name"));
        assert!(json.contains("last_name"));
    }

    #[test]
    fn bank_seed_serializes_with_api_field_names() {
        let bank = ExampleBankSeed {
            id: Uuid::nil(),
            bank_name: "Harbour Bank".to_owned(),
            routing_number: "011000015".to_owned(),
            swift_bic: "HARBGB2L".to_owned(),
        };
        let json = serde_json::to_string(&bank).expect("serialize");
        assert!(json.contains("bank_name"));
        assert!(json.contains("routing_number"));
        assert!(json.contains("swift_bic"));
    }
}
