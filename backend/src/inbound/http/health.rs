//! Health endpoints.
//!
//! Readiness flips once the server is bound, after both screens have been
//! activated. Its body says which screens loaded their initial batch and
//! which started empty because the record source failed.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{ActivationReport, EntityKind};

/// Outcome of a screen's startup fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ScreenLoad {
    /// The initial batch arrived.
    Loaded,
    /// The record source failed and the screen started with no records.
    Empty,
}

/// Readiness payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReadinessReport {
    /// Startup outcome of the users screen.
    pub users: ScreenLoad,
    /// Startup outcome of the banks screen.
    pub banks: ScreenLoad,
}

/// Shared readiness state.
#[derive(Debug, Default)]
pub struct HealthState {
    ready: AtomicBool,
    users_loaded: AtomicBool,
    banks_loaded: AtomicBool,
}

impl HealthState {
    /// Create a state that is not yet ready.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember which screens loaded at startup.
    pub fn record_activation(&self, reports: &[ActivationReport]) {
        for report in reports {
            let flag = match report.kind {
                EntityKind::Users => &self.users_loaded,
                EntityKind::Banks => &self.banks_loaded,
            };
            flag.store(report.outcome.is_ok(), Ordering::Release);
        }
    }

    /// Mark the service as ready.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Whether [`Self::mark_ready`] has been called.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Per-screen startup outcome.
    #[must_use]
    pub fn report(&self) -> ReadinessReport {
        let load = |flag: &AtomicBool| {
            if flag.load(Ordering::Acquire) {
                ScreenLoad::Loaded
            } else {
                ScreenLoad::Empty
            }
        };
        ReadinessReport {
            users: load(&self.users_loaded),
            banks: load(&self.banks_loaded),
        }
    }
}

/// Readiness check. Returns 200 with the screen load report once the server
/// is bound, 503 before.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is ready to handle traffic", body = ReadinessReport),
        (status = 503, description = "Server is not ready")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    if !state.is_ready() {
        return HttpResponse::ServiceUnavailable()
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish();
    }
    HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(state.report())
}

/// Liveness check.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses((status = 200, description = "Process is serving requests"))
)]
#[get("/health/live")]
pub async fn live() -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .finish()
}
