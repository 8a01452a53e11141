//! Both screens and the rules that span them.
//!
//! The workspace is the single owner of the users and banks collections.
//! Bank deletion is checked against the users the workspace holds, so the
//! integrity rule always sees the live data.

use tracing::{info, warn};

use super::integrity::dangling_bank_references;
use super::ports::{BatchSize, RecordSource, RecordSourceError};
use super::record::{EntityKind, RecordBatch, RecordId};
use super::screen::{BanksScreen, FetchTicket, ScreenError, UsersScreen};
use super::{BankRecord, UserRecord};

/// Outcome of activating one screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationReport {
    /// Screen that was activated.
    pub kind: EntityKind,
    /// Records loaded, or the error that left the screen empty.
    pub outcome: Result<usize, ScreenError>,
}

/// Users and banks screens owned together.
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    users: UsersScreen,
    banks: BanksScreen,
}

impl Workspace {
    /// Create a workspace with two empty screens.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a workspace from existing screens.
    #[must_use]
    pub fn from_screens(users: UsersScreen, banks: BanksScreen) -> Self {
        Self { users, banks }
    }

    /// The users screen.
    #[must_use]
    pub fn users(&self) -> &UsersScreen {
        &self.users
    }

    /// The users screen, mutably.
    pub fn users_mut(&mut self) -> &mut UsersScreen {
        &mut self.users
    }

    /// The banks screen.
    #[must_use]
    pub fn banks(&self) -> &BanksScreen {
        &self.banks
    }

    /// The banks screen, mutably.
    pub fn banks_mut(&mut self) -> &mut BanksScreen {
        &mut self.banks
    }

    /// Load the initial batch into both screens.
    ///
    /// A failing screen is reported and left empty; the other screen still
    /// loads.
    pub async fn activate<S>(
        &mut self,
        source: &S,
        initial_count: BatchSize,
    ) -> [ActivationReport; 2]
    where
        S: RecordSource + ?Sized,
    {
        let users = self.users.load(source, initial_count).await;
        let banks = self.banks.load(source, initial_count).await;
        for (kind, outcome) in [(EntityKind::Users, &users), (EntityKind::Banks, &banks)] {
            if let Err(error) = outcome {
                warn!(%kind, %error, "screen activation failed");
            }
        }
        [
            ActivationReport {
                kind: EntityKind::Users,
                outcome: users,
            },
            ActivationReport {
                kind: EntityKind::Banks,
                outcome: banks,
            },
        ]
    }

    /// Start a fetch for the screen of `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::FetchInFlight`] if that screen is already
    /// fetching.
    pub fn begin_fetch(&mut self, kind: EntityKind) -> Result<FetchTicket, ScreenError> {
        match kind {
            EntityKind::Users => self.users.begin_fetch(),
            EntityKind::Banks => self.banks.begin_fetch(),
        }
    }

    /// Hand a fetch result to the screen that issued `ticket`.
    ///
    /// # Errors
    ///
    /// See [`super::ScreenController::complete_fetch`].
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<RecordBatch, RecordSourceError>,
    ) -> Result<usize, ScreenError> {
        match ticket.kind() {
            EntityKind::Users => self.users.complete_fetch(ticket, result),
            EntityKind::Banks => self.banks.complete_fetch(ticket, result),
        }
    }

    /// Delete a user.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::NotFound`] if no user has `id`.
    pub fn delete_user(&mut self, id: &RecordId) -> Result<UserRecord, ScreenError> {
        self.users.delete_record(id)
    }

    /// Delete a bank unless a user references it.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::IntegrityViolation`] or
    /// [`ScreenError::NotFound`].
    pub fn delete_bank(&mut self, id: &RecordId) -> Result<BankRecord, ScreenError> {
        self.banks.delete_record(id, self.users.records())
    }

    /// Save the users draft. A bank reference that matches no bank is
    /// accepted and logged.
    ///
    /// # Errors
    ///
    /// See [`super::ScreenController::save_edit`].
    pub fn save_user_edit(&mut self) -> Result<UserRecord, ScreenError> {
        let saved = self.users.save_edit()?;
        let dangling = saved
            .bank_id
            .as_ref()
            .filter(|bank_id| self.banks.records().iter().all(|bank| &bank.id != *bank_id));
        if let Some(bank_id) = dangling {
            warn!(user_id = %saved.id, %bank_id, "saved user references an unknown bank");
        }
        Ok(saved)
    }

    /// Save the banks draft.
    ///
    /// # Errors
    ///
    /// See [`super::ScreenController::save_edit`].
    pub fn save_bank_edit(&mut self) -> Result<BankRecord, ScreenError> {
        self.banks.save_edit()
    }

    /// Users whose bank reference matches no bank.
    #[must_use]
    pub fn dangling_references(&self) -> Vec<RecordId> {
        let dangling = dangling_bank_references(self.users.records(), self.banks.records());
        if !dangling.is_empty() {
            info!(count = dangling.len(), "users reference unknown banks");
        }
        dangling
    }
}
