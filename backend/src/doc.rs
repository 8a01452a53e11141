//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every inbound HTTP path plus the schema wrappers from
//! [`crate::inbound::http::schemas`], so domain types stay free of utoipa.
//! The document backs Swagger UI in debug builds.

use utoipa::OpenApi;

use crate::inbound::http::health::{ReadinessReport, ScreenLoad};
use crate::inbound::http::home::{HomeResponse, ScreenLink};
use crate::inbound::http::schemas::{EntityKindSchema, ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::screens::{
    AddRecordsRequest, AddRecordsResponse, BankRecordDto, DraftResponse, RecordDto,
    ScreenResponse, UpdateFieldRequest, UserRecordDto,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Userbank API",
        description = "Users and banks screens backed by a random-data source."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::home::home,
        crate::inbound::http::screens::get_screen,
        crate::inbound::http::screens::add_records,
        crate::inbound::http::screens::start_edit,
        crate::inbound::http::screens::update_draft_field,
        crate::inbound::http::screens::save_draft,
        crate::inbound::http::screens::cancel_draft,
        crate::inbound::http::screens::delete_record,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        EntityKindSchema,
        UserRecordDto,
        BankRecordDto,
        RecordDto,
        ScreenResponse,
        AddRecordsRequest,
        AddRecordsResponse,
        UpdateFieldRequest,
        DraftResponse,
        HomeResponse,
        ScreenLink,
        ReadinessReport,
        ScreenLoad,
    )),
    tags(
        (name = "screens", description = "Users and banks screen operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
