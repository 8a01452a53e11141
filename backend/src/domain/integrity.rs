//! Referential integrity between users and banks.
//!
//! Integrity is enforced only when a bank is deleted. Saving a user whose
//! bank reference points nowhere is allowed; [`dangling_bank_references`]
//! reports such users for diagnostics.

use std::collections::HashSet;

use super::{BankRecord, RecordId, UserRecord};

/// Returns `false` iff at least one user references `bank_id`.
///
/// # Examples
/// ```
/// use userbank::domain::{RecordId, can_delete_bank};
///
/// let bank_id = RecordId::new("B1").expect("valid id");
/// assert!(can_delete_bank(&bank_id, &[]));
/// ```
#[must_use]
pub fn can_delete_bank(bank_id: &RecordId, users: &[UserRecord]) -> bool {
    !users
        .iter()
        .any(|user| user.bank_id.as_ref() == Some(bank_id))
}

/// Identifiers of the users that reference `bank_id`, in collection order.
#[must_use]
pub fn referencing_users(bank_id: &RecordId, users: &[UserRecord]) -> Vec<RecordId> {
    users
        .iter()
        .filter(|user| user.bank_id.as_ref() == Some(bank_id))
        .map(|user| user.id.clone())
        .collect()
}

/// Identifiers of users whose bank reference matches no bank.
#[must_use]
pub fn dangling_bank_references(users: &[UserRecord], banks: &[BankRecord]) -> Vec<RecordId> {
    let known: HashSet<&RecordId> = banks.iter().map(|bank| &bank.id).collect();
    users
        .iter()
        .filter(|user| {
            user.bank_id
                .as_ref()
                .is_some_and(|bank_id| !known.contains(bank_id))
        })
        .map(|user| user.id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn id(raw: &str) -> RecordId {
        RecordId::new(raw).expect("valid id")
    }

    fn user(raw_id: &str, bank: Option<&str>) -> UserRecord {
        UserRecord {
            id: id(raw_id),
            first_name: "Test".to_owned(),
            last_name: "User".to_owned(),
            username: format!("user{raw_id}"),
            email: format!("user{raw_id}@example.com"),
            bank_id: bank.map(id),
        }
    }

    fn bank(raw_id: &str) -> BankRecord {
        BankRecord {
            id: id(raw_id),
            bank_name: format!("Bank {raw_id}"),
            routing_number: "011000015".to_owned(),
            swift_bic: "BANKUS33".to_owned(),
        }
    }

    #[rstest]
    #[case(vec![], true)]
    #[case(vec![user("1", None)], true)]
    #[case(vec![user("1", Some("B2"))], true)]
    #[case(vec![user("1", Some("B1"))], false)]
    #[case(vec![user("1", None), user("2", Some("B1"))], false)]
    fn deletion_is_blocked_only_by_references(
        #[case] users: Vec<UserRecord>,
        #[case] expected: bool,
    ) {
        assert_eq!(can_delete_bank(&id("B1"), &users), expected);
    }

    #[test]
    fn lists_every_referencing_user_in_order() {
        let users = [
            user("3", Some("B1")),
            user("4", Some("B2")),
            user("1", Some("B1")),
        ];
        assert_eq!(referencing_users(&id("B1"), &users), [id("3"), id("1")]);
    }

    #[test]
    fn reports_dangling_references_only() {
        let users = [
            user("1", Some("B1")),
            user("2", Some("B9")),
            user("3", None),
        ];
        let banks = [bank("B1")];
        assert_eq!(dangling_bank_references(&users, &banks), [id("2")]);
    }
}
