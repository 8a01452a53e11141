//! User records.

use serde::{Deserialize, Serialize};

use super::record::{EntityKind, FieldError, Record, RecordBatch, RecordId};

/// A user as shown on the users screen.
///
/// `bank_id` refers to a [`BankRecord`](super::BankRecord) by identifier. It
/// is not validated against the banks collection on save; the reference is
/// only checked when a bank is deleted.
///
/// # Examples
/// ```
/// use userbank::domain::{Record, RecordId, UserRecord};
///
/// let mut user = UserRecord {
///     id: RecordId::new("1").expect("valid id"),
///     first_name: "Ada".to_owned(),
///     last_name: "Lovelace".to_owned(),
///     username: "alovelace".to_owned(),
///     email: "ada@example.com".to_owned(),
///     bank_id: None,
/// };
/// user.set_field("bank_id", "B1").expect("editable field");
/// assert_eq!(user.bank_id.as_ref().map(RecordId::as_str), Some("B1"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Source-assigned identifier.
    pub id: RecordId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Login handle.
    pub username: String,
    /// Contact address.
    pub email: String,
    /// Identifier of the user's bank, if one is selected.
    #[serde(default)]
    pub bank_id: Option<RecordId>,
}

impl Record for UserRecord {
    const KIND: EntityKind = EntityKind::Users;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn set_field(&mut self, field: &str, value: &str) -> Result<(), FieldError> {
        match field {
            "id" => return Err(FieldError::read_only(field)),
            "first_name" => self.first_name = value.to_owned(),
            "last_name" => self.last_name = value.to_owned(),
            "username" => self.username = value.to_owned(),
            "email" => self.email = value.to_owned(),
            // An empty selection clears the reference.
            "bank_id" if value.trim().is_empty() => self.bank_id = None,
            "bank_id" => {
                let id = RecordId::new(value).map_err(|err| FieldError::Invalid {
                    field: field.to_owned(),
                    message: err.to_string(),
                })?;
                self.bank_id = Some(id);
            }
            other => return Err(FieldError::unknown(other)),
        }
        Ok(())
    }

    fn from_batch(batch: RecordBatch) -> Result<Vec<Self>, RecordBatch> {
        match batch {
            RecordBatch::Users(records) => Ok(records),
            other => Err(other),
        }
    }
}
