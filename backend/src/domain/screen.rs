//! Screen controllers: one record store plus one edit session, driven by the
//! add, edit, save, and delete operations of a screen.
//!
//! Fetches go through an explicit ticket so a controller shared behind a lock
//! never has to be held across the source call. At most one fetch may be
//! outstanding per screen: a second `begin_fetch` is rejected, and a batch
//! presented with any ticket other than the outstanding one is dropped.
//! Dropping a ticket without completing it abandons the fetch and frees the
//! screen for the next one.

use std::sync::{Arc, Weak};

use serde_json::json;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::edit_session::{EditSession, EditSessionError, SessionState};
use super::integrity::referencing_users;
use super::ports::{BatchSize, RecordSource, RecordSourceError};
use super::record::{EntityKind, FieldError, Record, RecordBatch, RecordId};
use super::record_store::RecordStore;
use super::{BankRecord, Error, UserRecord};

/// Controller for the users screen.
pub type UsersScreen = ScreenController<UserRecord>;

/// Controller for the banks screen.
pub type BanksScreen = ScreenController<BankRecord>;

/// Errors returned by screen operations. Every error leaves the screen's
/// records and edit session as they were before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScreenError {
    /// No record has the requested identifier.
    #[error("{} '{id}' not found", kind.singular())]
    NotFound {
        /// Screen that was searched.
        kind: EntityKind,
        /// Requested identifier.
        id: RecordId,
    },
    /// Save or field update was requested with no open draft.
    #[error("no {} is being edited", kind.singular())]
    NoActiveEdit {
        /// Screen without a draft.
        kind: EntityKind,
    },
    /// The draft rejected a field write.
    #[error(transparent)]
    Field(#[from] FieldError),
    /// The bank is still referenced by users.
    #[error("cannot delete bank '{bank_id}' with associated users")]
    IntegrityViolation {
        /// Bank whose deletion was refused.
        bank_id: RecordId,
        /// Users referencing the bank.
        user_ids: Vec<RecordId>,
    },
    /// Another fetch for this screen has not completed yet.
    #[error("a {} fetch is already in progress", kind.singular())]
    FetchInFlight {
        /// Screen with the outstanding fetch.
        kind: EntityKind,
    },
    /// The batch arrived with a ticket that is no longer outstanding.
    #[error("discarded a stale {} batch", kind.singular())]
    StaleFetch {
        /// Screen the batch was meant for.
        kind: EntityKind,
    },
    /// The record source failed; nothing was appended.
    #[error("{kind} source unavailable: {source}")]
    SourceUnavailable {
        /// Screen that requested the batch.
        kind: EntityKind,
        /// Underlying source failure.
        #[source]
        source: RecordSourceError,
    },
}

impl From<ScreenError> for Error {
    fn from(error: ScreenError) -> Self {
        let message = error.to_string();
        match error {
            ScreenError::NotFound { kind, id } => Self::not_found(message)
                .with_details(json!({ "kind": kind, "id": id, "code": "record_not_found" })),
            ScreenError::NoActiveEdit { kind } => Self::not_found(message)
                .with_details(json!({ "kind": kind, "code": "no_active_edit" })),
            ScreenError::Field(field_error) => {
                let field = match &field_error {
                    FieldError::Unknown { field }
                    | FieldError::ReadOnly { field }
                    | FieldError::Invalid { field, .. } => field.clone(),
                };
                Self::invalid_request(message)
                    .with_details(json!({ "field": field, "code": "invalid_field" }))
            }
            ScreenError::IntegrityViolation { bank_id, user_ids } => Self::conflict(message)
                .with_details(json!({
                    "bankId": bank_id,
                    "userIds": user_ids,
                    "code": "bank_in_use",
                })),
            ScreenError::FetchInFlight { kind } => Self::conflict(message)
                .with_details(json!({ "kind": kind, "code": "fetch_in_flight" })),
            ScreenError::StaleFetch { kind } => Self::conflict(message)
                .with_details(json!({ "kind": kind, "code": "stale_fetch" })),
            ScreenError::SourceUnavailable { kind, .. } => Self::service_unavailable(message)
                .with_details(json!({ "kind": kind, "code": "source_unavailable" })),
        }
    }
}

/// Proof that a fetch was started for one screen.
///
/// Tickets are not `Clone`; completing a fetch consumes its ticket. A ticket
/// dropped before completion releases the screen, so a cancelled request or
/// a timed-out future never leaves the screen stuck in the fetching state.
#[derive(Debug, PartialEq, Eq)]
pub struct FetchTicket {
    kind: EntityKind,
    sequence: u64,
    lease: Arc<()>,
}

impl FetchTicket {
    /// Screen this fetch belongs to.
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        self.kind
    }
}

/// Read-only view bound by the presentation layer.
#[derive(Debug, Clone, Copy)]
pub struct ScreenSnapshot<'a, R> {
    /// Records in display order.
    pub records: &'a [R],
    /// Open draft, if any.
    pub draft: Option<&'a R>,
}

/// Controller owning one screen's records and edit session.
#[derive(Debug, Clone)]
pub struct ScreenController<R> {
    store: RecordStore<R>,
    session: EditSession<R>,
    outstanding: Option<OutstandingFetch>,
    next_sequence: u64,
}

/// The controller's side of a live ticket.
#[derive(Debug, Clone)]
struct OutstandingFetch {
    sequence: u64,
    lease: Weak<()>,
}

impl OutstandingFetch {
    fn is_live(&self) -> bool {
        self.lease.strong_count() > 0
    }

    fn issued(&self, ticket: &FetchTicket) -> bool {
        self.sequence == ticket.sequence
            && Weak::ptr_eq(&self.lease, &Arc::downgrade(&ticket.lease))
    }
}

impl<R> Default for ScreenController<R> {
    fn default() -> Self {
        Self {
            store: RecordStore::default(),
            session: EditSession::default(),
            outstanding: None,
            next_sequence: 0,
        }
    }
}

impl<R: Record> ScreenController<R> {
    /// Create an idle controller with an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a controller pre-populated with `records`.
    #[must_use]
    pub fn with_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = R>,
    {
        let mut screen = Self::new();
        screen.store.append(records);
        screen
    }

    /// Records in display order.
    #[must_use]
    pub fn records(&self) -> &[R] {
        self.store.all()
    }

    /// The open draft, if any.
    #[must_use]
    pub fn draft(&self) -> Option<&R> {
        self.session.current_draft()
    }

    /// Whether a draft is open.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    /// Whether a fetch is outstanding.
    #[must_use]
    pub fn is_fetching(&self) -> bool {
        self.live_sequence().is_some()
    }

    fn live_sequence(&self) -> Option<u64> {
        self.outstanding
            .as_ref()
            .filter(|fetch| fetch.is_live())
            .map(|fetch| fetch.sequence)
    }

    /// Read-only view for the presentation layer.
    #[must_use]
    pub fn snapshot(&self) -> ScreenSnapshot<'_, R> {
        ScreenSnapshot {
            records: self.records(),
            draft: self.draft(),
        }
    }

    /// Request `initial_count` records when the screen is activated.
    ///
    /// # Errors
    ///
    /// See [`ScreenController::add_records`].
    pub async fn load<S>(
        &mut self,
        source: &S,
        initial_count: BatchSize,
    ) -> Result<usize, ScreenError>
    where
        S: RecordSource + ?Sized,
    {
        info!(kind = %R::KIND, count = initial_count.get(), "activating screen");
        self.add_records(source, initial_count).await
    }

    /// Request `count` new records and append them.
    ///
    /// Returns the number of records appended.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::FetchInFlight`] if another fetch is outstanding
    /// and [`ScreenError::SourceUnavailable`] if the source fails; the store is
    /// unchanged in both cases.
    pub async fn add_records<S>(
        &mut self,
        source: &S,
        count: BatchSize,
    ) -> Result<usize, ScreenError>
    where
        S: RecordSource + ?Sized,
    {
        let ticket = self.begin_fetch()?;
        let result = source.fetch_batch(R::KIND, count).await;
        self.complete_fetch(ticket, result)
    }

    /// Mark a fetch as outstanding until `ticket` is completed or dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::FetchInFlight`] while another fetch is
    /// outstanding.
    pub fn begin_fetch(&mut self) -> Result<FetchTicket, ScreenError> {
        if self.live_sequence().is_some() {
            debug!(kind = %R::KIND, "rejecting overlapping fetch");
            return Err(ScreenError::FetchInFlight { kind: R::KIND });
        }
        if let Some(abandoned) = self.outstanding.take() {
            info!(kind = %R::KIND, sequence = abandoned.sequence, "previous fetch was abandoned");
        }
        let sequence = self.next_sequence;
        self.next_sequence = self.next_sequence.wrapping_add(1);
        let lease = Arc::new(());
        self.outstanding = Some(OutstandingFetch {
            sequence,
            lease: Arc::downgrade(&lease),
        });
        Ok(FetchTicket {
            kind: R::KIND,
            sequence,
            lease,
        })
    }

    /// Apply the outcome of the fetch identified by `ticket`.
    ///
    /// A successful batch is appended in full; any failure appends nothing.
    /// The outstanding fetch is released whenever `ticket` is the outstanding
    /// one, whatever the outcome.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::StaleFetch`] for a ticket that is not
    /// outstanding, and [`ScreenError::SourceUnavailable`] for source
    /// failures or batches of the wrong kind.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<RecordBatch, RecordSourceError>,
    ) -> Result<usize, ScreenError> {
        let issued_here = self
            .outstanding
            .as_ref()
            .is_some_and(|fetch| fetch.issued(&ticket));
        if ticket.kind != R::KIND || !issued_here {
            warn!(kind = %R::KIND, "dropping batch for a fetch that is not outstanding");
            return Err(ScreenError::StaleFetch { kind: R::KIND });
        }
        self.outstanding = None;

        let records = result
            .and_then(|batch| {
                R::from_batch(batch).map_err(|other| {
                    RecordSourceError::kind_mismatch(R::KIND, other.kind())
                })
            })
            .map_err(|source| {
                warn!(kind = %R::KIND, error = %source, "record source failed");
                ScreenError::SourceUnavailable {
                    kind: R::KIND,
                    source,
                }
            })?;

        let added = records.len();
        self.store.append(records);
        let duplicates = self.store.duplicate_ids();
        if !duplicates.is_empty() {
            warn!(kind = %R::KIND, ?duplicates, "store holds duplicate identifiers");
        }
        info!(kind = %R::KIND, added, total = self.store.len(), "appended batch");
        Ok(added)
    }

    /// Open the record `id` for editing, replacing any open draft.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::NotFound`] if no record has `id`.
    pub fn start_edit(&mut self, id: &RecordId) -> Result<&R, ScreenError> {
        let record = self.store.find(id).ok_or_else(|| ScreenError::NotFound {
            kind: R::KIND,
            id: id.clone(),
        })?;
        self.session.begin(record);
        debug!(kind = %R::KIND, %id, "editing record");
        self.session
            .current_draft()
            .ok_or(ScreenError::NoActiveEdit { kind: R::KIND })
    }

    /// Write one field of the open draft.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::NoActiveEdit`] when idle and
    /// [`ScreenError::Field`] when the draft rejects the write.
    pub fn update_field(&mut self, field: &str, value: &str) -> Result<&R, ScreenError> {
        self.session
            .update_field(field, value)
            .map_err(Self::map_session_error)?;
        self.session
            .current_draft()
            .ok_or(ScreenError::NoActiveEdit { kind: R::KIND })
    }

    /// Commit the draft into the store, in place of the record it was copied
    /// from.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::NoActiveEdit`] when idle, or
    /// [`ScreenError::NotFound`] if the record was removed while being
    /// edited; the draft then stays open so it can be cancelled.
    pub fn save_edit(&mut self) -> Result<R, ScreenError> {
        let draft = self
            .session
            .current_draft()
            .ok_or(ScreenError::NoActiveEdit { kind: R::KIND })?;
        if !self.store.contains(draft.id()) {
            return Err(ScreenError::NotFound {
                kind: R::KIND,
                id: draft.id().clone(),
            });
        }
        let record = self.session.commit().map_err(Self::map_session_error)?;
        self.store.replace(record.clone());
        info!(kind = %R::KIND, id = %record.id(), "saved record");
        Ok(record)
    }

    /// Discard the open draft, if any.
    pub fn cancel_edit(&mut self) {
        self.session.cancel();
    }

    /// Remove the record `id` without further checks.
    fn remove_record(&mut self, id: &RecordId) -> Result<R, ScreenError> {
        let removed = self.store.remove(id).ok_or_else(|| ScreenError::NotFound {
            kind: R::KIND,
            id: id.clone(),
        })?;
        if self.draft().is_some_and(|draft| draft.id() == id) {
            self.session.cancel();
        }
        info!(kind = %R::KIND, %id, "deleted record");
        Ok(removed)
    }

    fn map_session_error(error: EditSessionError) -> ScreenError {
        match error {
            EditSessionError::Inactive => ScreenError::NoActiveEdit { kind: R::KIND },
            EditSessionError::Field(field) => ScreenError::Field(field),
        }
    }
}

impl ScreenController<UserRecord> {
    /// Delete the user `id`. Users can always be deleted.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::NotFound`] if no user has `id`.
    pub fn delete_record(&mut self, id: &RecordId) -> Result<UserRecord, ScreenError> {
        self.remove_record(id)
    }
}

impl ScreenController<BankRecord> {
    /// Delete the bank `id` unless a user in `users` references it.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::IntegrityViolation`] listing the referencing
    /// users, or [`ScreenError::NotFound`] if no bank has `id`.
    pub fn delete_record(
        &mut self,
        id: &RecordId,
        users: &[UserRecord],
    ) -> Result<BankRecord, ScreenError> {
        let user_ids = referencing_users(id, users);
        if !user_ids.is_empty() {
            warn!(bank_id = %id, users = user_ids.len(), "refusing to delete referenced bank");
            return Err(ScreenError::IntegrityViolation {
                bank_id: id.clone(),
                user_ids,
            });
        }
        self.remove_record(id)
    }
}

#[cfg(test)]
#[path = "screen_tests.rs"]
mod tests;
