//! Actix response mapping for [`Error`].
//!
//! Every failure leaves the process as the same JSON payload. The status
//! follows the error code, the `trace-id` header echoes the payload's trace
//! id, and internal failures lose their message and details on the way out.
//! Body extraction failures are folded into the same shape by
//! [`json_config`].

use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::http::header::HeaderValue;
use actix_web::{HttpRequest, HttpResponse, ResponseError, web};
use serde_json::json;
use tracing::{debug, error};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

pub use crate::domain::ApiResult;

const REDACTED_MESSAGE: &str = "Internal server error";

fn http_status(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Payload actually sent for `error`.
fn client_payload(error: &Error) -> Error {
    if error.code() != ErrorCode::InternalError {
        return error.clone();
    }
    let redacted = Error::internal(REDACTED_MESSAGE);
    match error.trace_id() {
        Some(id) => redacted.with_trace_id(id),
        None => redacted,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        http_status(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!(code = ?self.code(), trace_id = self.trace_id(), message = self.message(), "request failed");
        } else {
            debug!(code = ?self.code(), message = self.message(), "request rejected");
        }

        let mut response = HttpResponse::build(status);
        if let Some(value) = self.trace_id().and_then(|id| HeaderValue::from_str(id).ok()) {
            response.insert_header((TRACE_ID_HEADER, value));
        }
        response.json(client_payload(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        let status = err.as_response_error().status_code();
        if status.is_client_error() {
            return Error::invalid_request(err.to_string());
        }
        error!(error = %err, "actix error promoted to domain error");
        Error::internal(REDACTED_MESSAGE)
    }
}

fn reject_json_body(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let reason = err.to_string();
    Error::invalid_request("request body is not valid JSON for this operation")
        .with_details(json!({ "reason": reason }))
        .into()
}

/// JSON extractor configuration reporting malformed bodies as
/// [`ErrorCode::InvalidRequest`] payloads.
#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(reject_json_body)
}
