//! Deterministic user and bank generation.
//!
//! An [`ExampleDataGenerator`] owns a seeded RNG. Successive calls continue
//! the same stream, so two generators built from the same seed and driven by
//! the same sequence of calls produce identical batches, while identifiers
//! never repeat within one generator.

use std::collections::HashSet;

use fake::Fake;
use fake::faker::company::raw::CompanyName;
use fake::faker::name::raw::{FirstName, LastName};
use fake::locales::EN;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

use crate::error::GenerationError;
use crate::seed::{ExampleBankSeed, ExampleUserSeed};
use crate::validation::{USERNAME_MAX, is_valid_username, routing_check_digit, sanitize_username};

/// Maximum number of attempts to generate a valid username.
const MAX_NAME_ATTEMPTS: usize = 100;

/// Reserved example domains used for generated email addresses.
const EMAIL_DOMAINS: [&str; 3] = ["example.com", "example.org", "example.net"];

/// Country codes used in generated SWIFT/BIC codes.
const SWIFT_COUNTRIES: [&str; 8] = ["US", "GB", "DE", "FR", "NL", "CA", "AU", "JP"];

/// Probability numerator for emitting the optional SWIFT branch code.
const BRANCH_PROBABILITY_NUMERATOR: u32 = 1;

/// Probability denominator for emitting the optional SWIFT branch code.
const BRANCH_PROBABILITY_DENOMINATOR: u32 = 3;

/// Seeded generator for example users and banks.
///
/// # Example
///
/// ```
/// use example_data::ExampleDataGenerator;
///
/// let mut first = ExampleDataGenerator::new(7);
/// let mut second = ExampleDataGenerator::new(7);
///
/// assert_eq!(first.banks(2), second.banks(2));
/// ```
#[derive(Debug, Clone)]
pub struct ExampleDataGenerator {
    rng: ChaCha8Rng,
    issued_ids: HashSet<Uuid>,
}

impl ExampleDataGenerator {
    /// Creates a generator whose output is fully determined by `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            issued_ids: HashSet::new(),
        }
    }

    /// Generates `count` users.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::UsernameGenerationFailed`] if no valid
    /// username could be derived from the fake name corpus.
    pub fn users(&mut self, count: usize) -> Result<Vec<ExampleUserSeed>, GenerationError> {
        (0..count).map(|_| self.user()).collect()
    }

    /// Generates `count` banks.
    #[must_use]
    pub fn banks(&mut self, count: usize) -> Vec<ExampleBankSeed> {
        (0..count).map(|_| self.bank()).collect()
    }

    fn user(&mut self) -> Result<ExampleUserSeed, GenerationError> {
        let id = self.next_id();
        for _ in 0..MAX_NAME_ATTEMPTS {
            let first_name: String = FirstName(EN).fake_with_rng(&mut self.rng);
            let last_name: String = LastName(EN).fake_with_rng(&mut self.rng);
            let suffix: u8 = self.rng.random_range(1..100);
            let initial = first_name.chars().next().map(String::from).unwrap_or_default();
            let candidate: String = sanitize_username(&format!("{initial}{last_name}{suffix}"))
                .chars()
                .take(USERNAME_MAX)
                .collect();
            if !is_valid_username(&candidate) {
                continue;
            }
            let domain = self.pick(&EMAIL_DOMAINS);
            let email = format!("{candidate}@{domain}");
            return Ok(ExampleUserSeed {
                id,
                first_name,
                last_name,
                username: candidate,
                email,
            });
        }

        Err(GenerationError::UsernameGenerationFailed {
            max_attempts: MAX_NAME_ATTEMPTS,
        })
    }

    fn bank(&mut self) -> ExampleBankSeed {
        let id = self.next_id();
        let company: String = CompanyName(EN).fake_with_rng(&mut self.rng);
        let bank_name = format!("{company} Bank");
        let routing_number = self.routing_number();
        let swift_bic = self.swift_bic(&company);
        ExampleBankSeed {
            id,
            bank_name,
            routing_number,
            swift_bic,
        }
    }

    /// Draws UUIDs from the RNG until one has not been issued before.
    fn next_id(&mut self) -> Uuid {
        loop {
            let id = Uuid::from_u128(self.rng.random());
            if self.issued_ids.insert(id) {
                return id;
            }
        }
    }

    /// Builds a routing number with a Federal Reserve prefix (01-12) and a
    /// valid check digit.
    fn routing_number(&mut self) -> String {
        let district: u32 = self.rng.random_range(1..=12);
        let mut prefix = [0_u32; 8];
        for (position, digit) in prefix.iter_mut().enumerate() {
            *digit = match position {
                0 => district / 10,
                1 => district % 10,
                _ => self.rng.random_range(0..10),
            };
        }
        let check = routing_check_digit(&prefix);
        prefix
            .iter()
            .chain(std::iter::once(&check))
            .map(|digit| char::from_digit(*digit, 10).unwrap_or('0'))
            .collect()
    }

    /// Derives the institution code from the company name, padding with
    /// random letters when it has fewer than four ASCII letters.
    fn swift_bic(&mut self, company: &str) -> String {
        let mut code: String = company
            .chars()
            .filter(char::is_ascii_alphabetic)
            .map(|c| c.to_ascii_uppercase())
            .take(4)
            .collect();
        while code.len() < 4 {
            code.push(self.letter());
        }
        code.push_str(self.pick(&SWIFT_COUNTRIES));
        for _ in 0..2 {
            let c = self.alphanumeric();
            code.push(c);
        }
        if self
            .rng
            .random_ratio(BRANCH_PROBABILITY_NUMERATOR, BRANCH_PROBABILITY_DENOMINATOR)
        {
            for _ in 0..3 {
                let c = self.alphanumeric();
                code.push(c);
            }
        }
        code
    }

    fn letter(&mut self) -> char {
        char::from(self.rng.random_range(b'A'..=b'Z'))
    }

    fn alphanumeric(&mut self) -> char {
        if self.rng.random_ratio(1, 4) {
            char::from(self.rng.random_range(b'0'..=b'9'))
        } else {
            self.letter()
        }
    }

    fn pick<'a>(&mut self, options: &[&'a str]) -> &'a str {
        let index = self.rng.random_range(0..options.len());
        options.get(index).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::validation::{is_valid_routing_number, is_valid_swift_bic};

    #[fixture]
    fn generator() -> ExampleDataGenerator {
        ExampleDataGenerator::new(42)
    }

    #[rstest]
    fn generates_requested_user_count(mut generator: ExampleDataGenerator) {
        let users = generator.users(10).expect("generated");
        assert_eq!(users.len(), 10);
    }

    #[rstest]
    fn generates_requested_bank_count(mut generator: ExampleDataGenerator) {
        assert_eq!(generator.banks(4).len(), 4);
    }

    #[test]
    fn generation_is_deterministic() {
        let mut first = ExampleDataGenerator::new(42);
        let mut second = ExampleDataGenerator::new(42);

        assert_eq!(
            first.users(5).expect("generated"),
            second.users(5).expect("generated")
        );
        assert_eq!(first.banks(5), second.banks(5));
    }

    #[test]
    fn different_seeds_produce_different_records() {
        let mut first = ExampleDataGenerator::new(42);
        let mut second = ExampleDataGenerator::new(123);

        let first_ids: Vec<_> = first.banks(3).into_iter().map(|b| b.id).collect();
        let second_ids: Vec<_> = second.banks(3).into_iter().map(|b| b.id).collect();
        assert_ne!(first_ids, second_ids);
    }

    #[rstest]
    fn identifiers_stay_unique_across_batches(mut generator: ExampleDataGenerator) {
        let mut ids = HashSet::new();
        for _ in 0..5 {
            for user in generator.users(4).expect("generated") {
                assert!(ids.insert(user.id), "duplicate user id {}", user.id);
            }
            for bank in generator.banks(4) {
                assert!(ids.insert(bank.id), "duplicate bank id {}", bank.id);
            }
        }
    }

    #[rstest]
    fn usernames_and_emails_are_consistent(mut generator: ExampleDataGenerator) {
        for user in generator.users(20).expect("generated") {
            assert!(is_valid_username(&user.username), "{user:?}");
            assert!(
                user.email.starts_with(&format!("{}@", user.username)),
                "{user:?}"
            );
        }
    }

    #[rstest]
    fn bank_codes_are_well_formed(mut generator: ExampleDataGenerator) {
        for bank in generator.banks(20) {
            assert!(is_valid_routing_number(&bank.routing_number), "{bank:?}");
            assert!(is_valid_swift_bic(&bank.swift_bic), "{bank:?}");
            assert!(bank.bank_name.ends_with(" Bank"), "{bank:?}");
        }
    }

    #[rstest]
    fn empty_batches_are_allowed(mut generator: ExampleDataGenerator) {
        assert!(generator.users(0).expect("generated").is_empty());
        assert!(generator.banks(0).is_empty());
    }
}
