//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data`. The workspace sits
//! behind a synchronous mutex; handlers lock it only between awaits, so a
//! slow record source never blocks other requests.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::error;

use crate::domain::ports::RecordSource;
use crate::domain::{Error, Workspace};

/// Dependency bundle for HTTP handlers.
pub struct HttpState {
    workspace: Mutex<Workspace>,
    source: Arc<dyn RecordSource>,
}

impl HttpState {
    /// Bundle an activated workspace with the source used for later fetches.
    pub fn new(workspace: Workspace, source: Arc<dyn RecordSource>) -> Self {
        Self {
            workspace: Mutex::new(workspace),
            source,
        }
    }

    /// Lock the workspace.
    ///
    /// # Errors
    ///
    /// Returns an internal error if a previous holder panicked.
    pub fn workspace(&self) -> Result<MutexGuard<'_, Workspace>, Error> {
        self.workspace.lock().map_err(|_| {
            error!("workspace lock poisoned");
            Error::internal("workspace lock poisoned")
        })
    }

    /// Record source for add-records requests.
    pub fn source(&self) -> &dyn RecordSource {
        self.source.as_ref()
    }
}
