//! At most one record open for editing per screen.
//!
//! The session holds a private copy of the record. Field writes touch only
//! the copy; the store sees the draft when the owning screen commits it.

use thiserror::Error;

use super::record::{FieldError, Record};

/// Whether a draft is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No record is being edited.
    Idle,
    /// A draft is open.
    Editing,
}

/// Errors raised by [`EditSession`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditSessionError {
    /// The operation needs an open draft and there is none.
    #[error("no record is being edited")]
    Inactive,
    /// The draft rejected a field write.
    #[error(transparent)]
    Field(#[from] FieldError),
}

/// Edit session holding an optional draft.
///
/// # Examples
/// ```
/// use userbank::domain::{BankRecord, EditSession, RecordId, SessionState};
///
/// let bank = BankRecord {
///     id: RecordId::new("B1").expect("valid id"),
///     bank_name: "Harbour Bank".to_owned(),
///     routing_number: "011000015".to_owned(),
///     swift_bic: "HARBUS33".to_owned(),
/// };
///
/// let mut session = EditSession::new();
/// session.begin(&bank);
/// session.update_field("bank_name", "Meadow Bank").expect("open draft");
/// let saved = session.commit().expect("open draft");
///
/// assert_eq!(saved.bank_name, "Meadow Bank");
/// assert_eq!(session.state(), SessionState::Idle);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession<R> {
    draft: Option<R>,
}

impl<R> Default for EditSession<R> {
    fn default() -> Self {
        Self { draft: None }
    }
}

impl<R: Record> EditSession<R> {
    /// Create an idle session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a draft copied from `record`, discarding any previous draft.
    pub fn begin(&mut self, record: &R) {
        self.draft = Some(record.clone());
    }

    /// The open draft, if any.
    #[must_use]
    pub fn current_draft(&self) -> Option<&R> {
        self.draft.as_ref()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.draft.is_some() {
            SessionState::Editing
        } else {
            SessionState::Idle
        }
    }

    /// Write one field of the open draft.
    ///
    /// # Errors
    ///
    /// Returns [`EditSessionError::Inactive`] when idle, leaving the session
    /// unchanged, or [`EditSessionError::Field`] when the draft rejects the
    /// write.
    pub fn update_field(&mut self, field: &str, value: &str) -> Result<(), EditSessionError> {
        let draft = self.draft.as_mut().ok_or(EditSessionError::Inactive)?;
        draft.set_field(field, value)?;
        Ok(())
    }

    /// Close the session and hand back the draft.
    ///
    /// # Errors
    ///
    /// Returns [`EditSessionError::Inactive`] when idle.
    pub fn commit(&mut self) -> Result<R, EditSessionError> {
        self.draft.take().ok_or(EditSessionError::Inactive)
    }

    /// Close the session, discarding the draft.
    pub fn cancel(&mut self) {
        self.draft = None;
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::{RecordId, UserRecord};

    #[fixture]
    fn user() -> UserRecord {
        UserRecord {
            id: RecordId::new("1").expect("valid id"),
            first_name: "Grace".to_owned(),
            last_name: "Hopper".to_owned(),
            username: "ghopper".to_owned(),
            email: "grace@example.com".to_owned(),
            bank_id: None,
        }
    }

    #[rstest]
    fn commit_returns_edited_copy_and_goes_idle(user: UserRecord) {
        let mut session = EditSession::new();
        session.begin(&user);
        session
            .update_field("email", "grace@navy.example")
            .expect("open draft");

        let saved = session.commit().expect("open draft");

        let expected = UserRecord {
            email: "grace@navy.example".to_owned(),
            ..user
        };
        assert_eq!(saved, expected);
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.current_draft().is_none());
    }

    #[rstest]
    fn begin_replaces_previous_draft(user: UserRecord) {
        let other = UserRecord {
            id: RecordId::new("2").expect("valid id"),
            ..user.clone()
        };
        let mut session = EditSession::new();
        session.begin(&user);
        session.update_field("first_name", "Changed").expect("open draft");
        session.begin(&other);

        assert_eq!(session.current_draft(), Some(&other));
    }

    #[rstest]
    fn draft_edits_do_not_touch_the_original(user: UserRecord) {
        let mut session = EditSession::new();
        session.begin(&user);
        session.update_field("first_name", "Changed").expect("open draft");

        assert_eq!(user.first_name, "Grace");
    }

    #[test]
    fn idle_session_rejects_updates_and_commits() {
        let mut session: EditSession<UserRecord> = EditSession::new();

        assert_eq!(
            session.update_field("email", "x"),
            Err(EditSessionError::Inactive)
        );
        assert_eq!(session.commit(), Err(EditSessionError::Inactive));
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[rstest]
    fn field_errors_keep_the_draft_open(user: UserRecord) {
        let mut session = EditSession::new();
        session.begin(&user);

        let err = session.update_field("nickname", "x").expect_err("unknown");
        assert!(matches!(err, EditSessionError::Field(FieldError::Unknown { .. })));
        assert_eq!(session.current_draft(), Some(&user));
    }

    #[rstest]
    fn cancel_discards_the_draft(user: UserRecord) {
        let mut session = EditSession::new();
        session.begin(&user);
        session.cancel();

        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.commit(), Err(EditSessionError::Inactive));
    }
}
