//! Screen HTTP handlers.
//!
//! ```text
//! GET    /api/v1/{screen}
//! POST   /api/v1/{screen}/batches
//! POST   /api/v1/{screen}/{id}/edit
//! PATCH  /api/v1/{screen}/draft
//! POST   /api/v1/{screen}/draft
//! DELETE /api/v1/{screen}/draft
//! DELETE /api/v1/{screen}/{id}
//! ```
//!
//! `{screen}` is `users` or `banks`. Draft routes are registered before the
//! `{id}` routes, so `draft` is never read as a record identifier.

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::ports::BatchSize;
use crate::domain::{
    BankRecord, EntityKind, Error, Record, RecordId, ScreenController, SessionState, UserRecord,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::json_config;
use crate::inbound::http::schemas::{EntityKindSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;

/// Wire form of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRecordDto {
    /// Record id, unique within the users screen.
    #[schema(example = "7451")]
    pub id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Login handle.
    pub username: String,
    /// Contact address.
    pub email: String,
    /// Id of the bank this user banks with, if any.
    #[schema(example = "3")]
    pub bank_id: Option<String>,
}

/// Wire form of a bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BankRecordDto {
    /// Record id, unique within the banks screen.
    #[schema(example = "3")]
    pub id: String,
    /// Display name of the bank.
    pub bank_name: String,
    /// Nine digit routing number.
    #[schema(example = "011000015")]
    pub routing_number: String,
    /// SWIFT/BIC code.
    #[schema(example = "HARBUS33XXX")]
    pub swift_bic: String,
}

/// A record of either screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum RecordDto {
    /// A users screen record.
    User(UserRecordDto),
    /// A banks screen record.
    Bank(BankRecordDto),
}

impl From<&UserRecord> for RecordDto {
    fn from(user: &UserRecord) -> Self {
        Self::User(UserRecordDto {
            id: user.id.to_string(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            bank_id: user.bank_id.as_ref().map(ToString::to_string),
        })
    }
}

impl From<&BankRecord> for RecordDto {
    fn from(bank: &BankRecord) -> Self {
        Self::Bank(BankRecordDto {
            id: bank.id.to_string(),
            bank_name: bank.bank_name.clone(),
            routing_number: bank.routing_number.clone(),
            swift_bic: bank.swift_bic.clone(),
        })
    }
}

/// Snapshot of one screen.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScreenResponse {
    #[schema(value_type = EntityKindSchema)]
    pub screen: EntityKind,
    pub records: Vec<RecordDto>,
    pub draft: Option<RecordDto>,
    pub editing: bool,
    pub fetching: bool,
}

/// Request payload for adding records.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddRecordsRequest {
    #[schema(minimum = 1, maximum = 100, example = 10)]
    pub count: usize,
}

/// Response payload after a batch was appended.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddRecordsResponse {
    pub added: usize,
    pub total: usize,
}

/// Request payload for writing one draft field.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFieldRequest {
    #[schema(example = "bankId")]
    pub field: String,
    pub value: String,
}

/// The open draft.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DraftResponse {
    pub draft: RecordDto,
}

fn parse_screen(raw: &str) -> Result<EntityKind, Error> {
    match raw {
        "users" => Ok(EntityKind::Users),
        "banks" => Ok(EntityKind::Banks),
        _ => Err(Error::not_found(format!("unknown screen '{raw}'"))
            .with_details(json!({ "screen": raw, "code": "unknown_screen" }))),
    }
}

fn parse_record_id(raw: String) -> Result<RecordId, Error> {
    RecordId::new(raw).map_err(|err| {
        Error::invalid_request(err.to_string())
            .with_details(json!({ "field": "id", "code": "invalid_id" }))
    })
}

fn parse_batch_size(count: usize) -> Result<BatchSize, Error> {
    BatchSize::new(count).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": "count",
            "max": BatchSize::MAX,
            "code": "invalid_batch_size",
        }))
    })
}

/// Map a camelCase wire field name onto the record's field name.
///
/// Names that are not camelCase are rejected here so the error reports the
/// name the client sent.
fn domain_field_name(wire: &str) -> Result<String, Error> {
    let invalid = || {
        Error::invalid_request(format!("field name `{wire}` is not camelCase"))
            .with_details(json!({ "field": wire, "code": "invalid_field_name" }))
    };
    if !wire.starts_with(|ch: char| ch.is_ascii_lowercase()) {
        return Err(invalid());
    }

    let mut name = String::with_capacity(wire.len() + 2);
    let mut previous_upper = false;
    for ch in wire.chars() {
        if ch.is_ascii_uppercase() {
            // Acronym runs such as `bankID` have no single snake_case form.
            if previous_upper {
                return Err(invalid());
            }
            name.push('_');
            name.push(ch.to_ascii_lowercase());
            previous_upper = true;
        } else if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            name.push(ch);
            previous_upper = false;
        } else {
            return Err(invalid());
        }
    }
    Ok(name)
}

fn screen_response<R>(screen: &ScreenController<R>) -> ScreenResponse
where
    R: Record,
    for<'a> RecordDto: From<&'a R>,
{
    let snapshot = screen.snapshot();
    ScreenResponse {
        screen: R::KIND,
        records: snapshot.records.iter().map(RecordDto::from).collect(),
        draft: snapshot.draft.map(RecordDto::from),
        editing: screen.state() == SessionState::Editing,
        fetching: screen.is_fetching(),
    }
}

/// Register the screen routes in match order.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(add_records)
        .service(update_draft_field)
        .service(save_draft)
        .service(cancel_draft)
        .service(start_edit)
        .service(delete_record)
        .service(get_screen);
}

/// Fetch a screen's records and open draft.
#[utoipa::path(
    get,
    path = "/api/v1/{screen}",
    params(("screen" = EntityKindSchema, Path, description = "Screen name")),
    responses(
        (status = 200, description = "Screen snapshot", body = ScreenResponse),
        (status = 404, description = "Unknown screen", body = ErrorSchema)
    ),
    tags = ["screens"],
    operation_id = "getScreen"
)]
#[get("/{screen}")]
pub async fn get_screen(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ScreenResponse>> {
    let kind = parse_screen(&path)?;
    let workspace = state.workspace()?;
    let response = match kind {
        EntityKind::Users => screen_response(workspace.users()),
        EntityKind::Banks => screen_response(workspace.banks()),
    };
    Ok(web::Json(response))
}

/// Fetch `count` new records from the source and append them.
#[utoipa::path(
    post,
    path = "/api/v1/{screen}/batches",
    params(("screen" = EntityKindSchema, Path, description = "Screen name")),
    request_body = AddRecordsRequest,
    responses(
        (status = 200, description = "Batch appended", body = AddRecordsResponse),
        (status = 400, description = "Invalid batch size", body = ErrorSchema),
        (status = 409, description = "A fetch is already running", body = ErrorSchema),
        (status = 503, description = "Record source unavailable", body = ErrorSchema)
    ),
    tags = ["screens"],
    operation_id = "addRecords"
)]
#[post("/{screen}/batches")]
pub async fn add_records(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<AddRecordsRequest>,
) -> ApiResult<web::Json<AddRecordsResponse>> {
    let kind = parse_screen(&path)?;
    let size = parse_batch_size(payload.count)?;
    let ticket = state.workspace()?.begin_fetch(kind)?;
    debug!(%kind, %size, "fetching batch");
    let result = state.source().fetch_batch(kind, size).await;

    let mut workspace = state.workspace()?;
    let added = workspace.complete_fetch(ticket, result)?;
    let total = match kind {
        EntityKind::Users => workspace.users().records().len(),
        EntityKind::Banks => workspace.banks().records().len(),
    };
    Ok(web::Json(AddRecordsResponse { added, total }))
}

/// Open a record for editing.
#[utoipa::path(
    post,
    path = "/api/v1/{screen}/{id}/edit",
    params(
        ("screen" = EntityKindSchema, Path, description = "Screen name"),
        ("id" = String, Path, description = "Record identifier")
    ),
    responses(
        (status = 200, description = "Draft opened", body = DraftResponse),
        (status = 404, description = "Record not found", body = ErrorSchema)
    ),
    tags = ["screens"],
    operation_id = "startEdit"
)]
#[post("/{screen}/{id}/edit")]
pub async fn start_edit(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<DraftResponse>> {
    let (screen, raw_id) = path.into_inner();
    let kind = parse_screen(&screen)?;
    let id = parse_record_id(raw_id)?;
    let mut workspace = state.workspace()?;
    let draft = match kind {
        EntityKind::Users => RecordDto::from(workspace.users_mut().start_edit(&id)?),
        EntityKind::Banks => RecordDto::from(workspace.banks_mut().start_edit(&id)?),
    };
    Ok(web::Json(DraftResponse { draft }))
}

/// Write one field of the open draft.
#[utoipa::path(
    patch,
    path = "/api/v1/{screen}/draft",
    params(("screen" = EntityKindSchema, Path, description = "Screen name")),
    request_body = UpdateFieldRequest,
    responses(
        (status = 200, description = "Draft updated", body = DraftResponse),
        (status = 400, description = "Unknown, read-only, or invalid field", body = ErrorSchema),
        (status = 404, description = "No draft is open", body = ErrorSchema)
    ),
    tags = ["screens"],
    operation_id = "updateDraftField"
)]
#[patch("/{screen}/draft")]
pub async fn update_draft_field(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateFieldRequest>,
) -> ApiResult<web::Json<DraftResponse>> {
    let kind = parse_screen(&path)?;
    let UpdateFieldRequest { field, value } = payload.into_inner();
    let field = domain_field_name(&field)?;
    let mut workspace = state.workspace()?;
    let draft = match kind {
        EntityKind::Users => RecordDto::from(workspace.users_mut().update_field(&field, &value)?),
        EntityKind::Banks => RecordDto::from(workspace.banks_mut().update_field(&field, &value)?),
    };
    Ok(web::Json(DraftResponse { draft }))
}

/// Commit the open draft.
#[utoipa::path(
    post,
    path = "/api/v1/{screen}/draft",
    params(("screen" = EntityKindSchema, Path, description = "Screen name")),
    responses(
        (status = 200, description = "Saved record", body = RecordDto),
        (status = 404, description = "No draft is open or the record is gone", body = ErrorSchema)
    ),
    tags = ["screens"],
    operation_id = "saveDraft"
)]
#[post("/{screen}/draft")]
pub async fn save_draft(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<RecordDto>> {
    let kind = parse_screen(&path)?;
    let mut workspace = state.workspace()?;
    let saved = match kind {
        EntityKind::Users => RecordDto::from(&workspace.save_user_edit()?),
        EntityKind::Banks => RecordDto::from(&workspace.save_bank_edit()?),
    };
    Ok(web::Json(saved))
}

/// Discard the open draft. Succeeds when no draft is open.
#[utoipa::path(
    delete,
    path = "/api/v1/{screen}/draft",
    params(("screen" = EntityKindSchema, Path, description = "Screen name")),
    responses(
        (status = 204, description = "Draft discarded"),
        (status = 404, description = "Unknown screen", body = ErrorSchema)
    ),
    tags = ["screens"],
    operation_id = "cancelDraft"
)]
#[delete("/{screen}/draft")]
pub async fn cancel_draft(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let kind = parse_screen(&path)?;
    let mut workspace = state.workspace()?;
    match kind {
        EntityKind::Users => workspace.users_mut().cancel_edit(),
        EntityKind::Banks => workspace.banks_mut().cancel_edit(),
    }
    Ok(HttpResponse::NoContent().finish())
}

/// Delete a record. Banks referenced by users are kept.
#[utoipa::path(
    delete,
    path = "/api/v1/{screen}/{id}",
    params(
        ("screen" = EntityKindSchema, Path, description = "Screen name"),
        ("id" = String, Path, description = "Record identifier")
    ),
    responses(
        (status = 200, description = "Deleted record", body = RecordDto),
        (status = 404, description = "Record not found", body = ErrorSchema),
        (status = 409, description = "Bank still has users", body = ErrorSchema)
    ),
    tags = ["screens"],
    operation_id = "deleteRecord"
)]
#[delete("/{screen}/{id}")]
pub async fn delete_record(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<RecordDto>> {
    let (screen, raw_id) = path.into_inner();
    let kind = parse_screen(&screen)?;
    let id = parse_record_id(raw_id)?;
    let mut workspace = state.workspace()?;
    let removed = match kind {
        EntityKind::Users => RecordDto::from(&workspace.delete_user(&id)?),
        EntityKind::Banks => RecordDto::from(&workspace.delete_bank(&id)?),
    };
    Ok(web::Json(removed))
}

#[cfg(test)]
#[path = "screens_tests.rs"]
mod tests;
