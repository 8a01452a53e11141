//! Shared record vocabulary: identifiers, entity kinds, and the [`Record`]
//! trait implemented by users and banks.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::{BankRecord, UserRecord};

/// Opaque record identifier assigned by the record source.
///
/// The remote API issues integer identifiers while the synthetic source
/// issues UUIDs, so the identifier is kept as text. It deserialises from a
/// JSON string or integer and always serialises as a string.
///
/// ## Invariants
/// - Non-empty and free of surrounding whitespace.
///
/// # Examples
/// ```
/// use userbank::domain::RecordId;
///
/// let id = RecordId::new("B1").expect("valid id");
/// assert_eq!(id.as_str(), "B1");
/// assert!(RecordId::new(" B1").is_err());
///
/// let numeric: RecordId = serde_json::from_str("8614").expect("integer id");
/// assert_eq!(numeric.as_str(), "8614");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

/// Validation errors returned when constructing [`RecordId`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordIdError {
    /// Identifier is empty after trimming whitespace.
    #[error("record identifier must not be empty")]
    Empty,
    /// Identifier has leading or trailing whitespace.
    #[error("record identifier must not contain surrounding whitespace")]
    SurroundingWhitespace,
}

impl RecordId {
    /// Validate and wrap an identifier.
    pub fn new(value: impl Into<String>) -> Result<Self, RecordIdError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(RecordIdError::Empty);
        }
        if raw.trim() != raw {
            return Err(RecordIdError::SurroundingWhitespace);
        }
        Ok(Self(raw))
    }

    /// Borrow the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<Uuid> for RecordId {
    fn from(value: Uuid) -> Self {
        Self(value.to_string())
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Unsigned(u64),
            Signed(i64),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Text(text) => Self::new(text).map_err(serde::de::Error::custom),
            Raw::Unsigned(number) => Ok(Self::from(number)),
            Raw::Signed(number) => Ok(Self(number.to_string())),
        }
    }
}

/// The two record collections managed by the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// The users collection.
    Users,
    /// The banks collection.
    Banks,
}

impl EntityKind {
    /// Singular noun used in user-facing messages.
    #[must_use]
    pub fn singular(self) -> &'static str {
        match self {
            Self::Users => "user",
            Self::Banks => "bank",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Users => "users",
            Self::Banks => "banks",
        })
    }
}

/// Errors raised when writing a named field of a record draft.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The record type has no field with this name.
    #[error("unknown field '{field}'")]
    Unknown {
        /// Requested field name.
        field: String,
    },
    /// The field exists but cannot be edited.
    #[error("field '{field}' is read-only")]
    ReadOnly {
        /// Requested field name.
        field: String,
    },
    /// The value cannot be stored in the field.
    #[error("invalid value for field '{field}': {message}")]
    Invalid {
        /// Requested field name.
        field: String,
        /// Why the value was rejected.
        message: String,
    },
}

impl FieldError {
    pub(crate) fn unknown(field: &str) -> Self {
        Self::Unknown {
            field: field.to_owned(),
        }
    }

    pub(crate) fn read_only(field: &str) -> Self {
        Self::ReadOnly {
            field: field.to_owned(),
        }
    }
}

/// A batch of freshly generated records for one entity kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordBatch {
    /// Users batch.
    Users(Vec<UserRecord>),
    /// Banks batch.
    Banks(Vec<BankRecord>),
}

impl RecordBatch {
    /// Entity kind carried by this batch.
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Users(_) => EntityKind::Users,
            Self::Banks(_) => EntityKind::Banks,
        }
    }

    /// Number of records in the batch.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Users(records) => records.len(),
            Self::Banks(records) => records.len(),
        }
    }

    /// Whether the batch carries no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Behaviour shared by the record types held in a screen.
pub trait Record: Clone + fmt::Debug + Send + Sync + 'static {
    /// Entity kind of this record type.
    const KIND: EntityKind;

    /// Identifier used for replace and remove.
    fn id(&self) -> &RecordId;

    /// Overwrite one editable field, addressed by its wire name.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError`] for unknown, read-only, or invalid fields.
    fn set_field(&mut self, field: &str, value: &str) -> Result<(), FieldError>;

    /// Extract records of this type from a batch, handing the batch back
    /// unchanged when it carries the other kind.
    ///
    /// # Errors
    ///
    /// Returns the original batch on a kind mismatch.
    fn from_batch(batch: RecordBatch) -> Result<Vec<Self>, RecordBatch>;
}
