//! Field validation for generated records.
//!
//! # Validation Rules
//!
//! - Usernames: 3 to 32 characters of lowercase ASCII letters, digits,
//!   underscores, or dots, starting with a letter
//! - Routing numbers: nine ASCII digits satisfying the ABA 3-7-1 checksum
//! - SWIFT/BIC: four letter institution code, two letter country code, two
//!   alphanumeric location characters, and an optional three character branch

/// Minimum allowed length for a username.
pub const USERNAME_MIN: usize = 3;

/// Maximum allowed length for a username.
pub const USERNAME_MAX: usize = 32;

/// Number of digits in an ABA routing number.
const ROUTING_NUMBER_LEN: usize = 9;

/// ABA checksum weights applied to each routing number digit.
const ROUTING_WEIGHTS: [u32; ROUTING_NUMBER_LEN] = [3, 7, 1, 3, 7, 1, 3, 7, 1];

/// Validates a username against the generation constraints.
///
/// # Examples
///
/// ```
/// use example_data::is_valid_username;
///
/// assert!(is_valid_username("ada.lovelace"));
/// assert!(is_valid_username("alovelace_42"));
/// assert!(!is_valid_username("al"));          // Too short
/// assert!(!is_valid_username("O'Brien"));     // Invalid characters
/// assert!(!is_valid_username("9lives"));      // Must start with a letter
/// ```
#[must_use]
pub fn is_valid_username(name: &str) -> bool {
    let length = name.chars().count();
    if !(USERNAME_MIN..=USERNAME_MAX).contains(&length) {
        return false;
    }
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_lowercase()) && chars.all(is_valid_username_char)
}

const fn is_valid_username_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '.'
}

/// Lowercases a raw name and drops characters a username may not contain.
#[must_use]
pub(crate) fn sanitize_username(raw: &str) -> String {
    raw.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| is_valid_username_char(*c))
        .collect()
}

/// Validates a nine-digit ABA routing number including its check digit.
///
/// # Examples
///
/// ```
/// use example_data::is_valid_routing_number;
///
/// assert!(is_valid_routing_number("011000015"));
/// assert!(!is_valid_routing_number("011000016")); // Wrong check digit
/// assert!(!is_valid_routing_number("01100001"));  // Too short
/// ```
#[must_use]
pub fn is_valid_routing_number(value: &str) -> bool {
    if value.len() != ROUTING_NUMBER_LEN {
        return false;
    }
    let Some(digits) = value
        .chars()
        .map(|c| c.to_digit(10))
        .collect::<Option<Vec<u32>>>()
    else {
        return false;
    };
    let sum: u32 = digits
        .iter()
        .zip(ROUTING_WEIGHTS)
        .map(|(digit, weight)| digit * weight)
        .sum();
    sum % 10 == 0
}

/// Computes the ABA check digit for the first eight routing number digits.
#[must_use]
pub(crate) fn routing_check_digit(prefix: &[u32; 8]) -> u32 {
    let sum: u32 = prefix
        .iter()
        .zip(ROUTING_WEIGHTS)
        .map(|(digit, weight)| digit * weight)
        .sum();
    (10 - sum % 10) % 10
}

/// Validates the shape of a SWIFT/BIC code.
///
/// # Examples
///
/// ```
/// use example_data::is_valid_swift_bic;
///
/// assert!(is_valid_swift_bic("DEUTDEFF"));
/// assert!(is_valid_swift_bic("DEUTDEFF500"));
/// assert!(!is_valid_swift_bic("DEUT1EFF"));   // Digit in the country code
/// assert!(!is_valid_swift_bic("deutdeff"));   // Lowercase
/// ```
#[must_use]
pub fn is_valid_swift_bic(value: &str) -> bool {
    if value.len() != 8 && value.len() != 11 {
        return false;
    }
    value.chars().enumerate().all(|(position, c)| {
        if position < 6 {
            c.is_ascii_uppercase()
        } else {
            c.is_ascii_uppercase() || c.is_ascii_digit()
        }
    })
}

#[cfg(test)]
mod tests {
    //! Covers username, routing number, and SWIFT/BIC validation.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("ada", true)]
    #[case("ada.lovelace", true)]
    #[case("grace_hopper99", true)]
    #[case("ab", false)]
    #[case("", false)]
    #[case("Ada", false)]
    #[case("_ada", false)]
    #[case("ada lovelace", false)]
    #[case("o'brien", false)]
    fn username_validation(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_valid_username(name), expected);
    }

    #[test]
    fn rejects_usernames_exceeding_max_length() {
        let long_name = "a".repeat(USERNAME_MAX + 1);
        assert!(!is_valid_username(&long_name));
    }

    #[test]
    fn sanitize_lowercases_and_drops_invalid_characters() {
        assert_eq!(sanitize_username("O'Brien-Smith"), "obriensmith");
    }

    #[rstest]
    #[case("011000015", true)]
    #[case("021000021", true)]
    #[case("121000358", true)]
    #[case("011000016", false)]
    #[case("0110000150", false)]
    #[case("01100001X", false)]
    fn routing_number_validation(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(is_valid_routing_number(value), expected);
    }

    #[test]
    fn check_digit_completes_a_valid_routing_number() {
        let prefix = [0, 1, 1, 0, 0, 0, 0, 1];
        assert_eq!(routing_check_digit(&prefix), 5);
    }

    #[rstest]
    #[case("DEUTDEFF", true)]
    #[case("NWBKGB2L", true)]
    #[case("CHASUS33XXX", true)]
    #[case("DEUTDE", false)]
    #[case("DEUTDEFF5", false)]
    #[case("DEU1DEFF", false)]
    #[case("deutdeff", false)]
    fn swift_bic_validation(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(is_valid_swift_bic(value), expected);
    }
}
