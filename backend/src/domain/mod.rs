//! Domain primitives and aggregates.
//!
//! Purpose: hold the users and banks collections, the edit sessions over
//! them, and the referential rule tying users to banks. Nothing here knows
//! about HTTP or the remote record source; adapters reach the domain through
//! [`ports`].
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport-agnostic error payload.
//! - Workspace: both screens plus the cross-screen rules.
//! - ScreenController: one screen's store and edit session.
//! - UserRecord / BankRecord: the two record types.

mod bank_record;
mod edit_session;
pub mod error;
mod integrity;
pub mod ports;
mod record;
mod record_store;
mod screen;
mod trace_id;
mod user_record;
mod workspace;

pub use self::bank_record::BankRecord;
pub use self::edit_session::{EditSession, EditSessionError, SessionState};
pub use self::error::{Error, ErrorCode};
pub use self::integrity::{can_delete_bank, dangling_bank_references, referencing_users};
pub use self::record::{EntityKind, FieldError, Record, RecordBatch, RecordId, RecordIdError};
pub use self::record_store::RecordStore;
pub use self::screen::{
    BanksScreen, FetchTicket, ScreenController, ScreenError, ScreenSnapshot, UsersScreen,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user_record::UserRecord;
pub use self::workspace::{ActivationReport, Workspace};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use userbank::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::not_found("bank 'B7' not found"))
/// }
///
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
