//! Reqwest-backed random-data source adapter.
//!
//! This adapter owns transport details only: endpoint selection, timeout and
//! HTTP error mapping, and JSON decoding into domain records.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::dto::{BankDto, OneOrMany, UserDto};
use crate::domain::ports::{BatchSize, RecordSource, RecordSourceError};
use crate::domain::{EntityKind, RecordBatch};

const USER_AGENT: &str = "userbank/0.1";

/// Record source performing HTTP GET requests against the random-data API.
pub struct RandomDataHttpSource {
    client: Client,
    base_url: Url,
}

impl RandomDataHttpSource {
    /// Build an adapter using a reqwest client with an explicit request
    /// timeout.
    /// ```rust,ignore
    /// let source = RandomDataHttpSource::new(base_url, Duration::from_secs(10))?;
    /// ```
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, kind: EntityKind, size: BatchSize) -> Result<Url, RecordSourceError> {
        endpoint_for(&self.base_url, kind, size)
    }
}

#[async_trait]
impl RecordSource for RandomDataHttpSource {
    async fn fetch_batch(
        &self,
        kind: EntityKind,
        size: BatchSize,
    ) -> Result<RecordBatch, RecordSourceError> {
        let endpoint = self.endpoint(kind, size)?;
        debug!(%kind, %size, url = %endpoint, "requesting record batch");
        let response = self
            .client
            .get(endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        parse_batch(kind, size, body.as_ref())
    }
}

fn endpoint_for(base: &Url, kind: EntityKind, size: BatchSize) -> Result<Url, RecordSourceError> {
    let path: [&str; 3] = match kind {
        EntityKind::Users => ["api", "users", "random_user"],
        EntityKind::Banks => ["api", "bank", "random_bank"],
    };
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| {
            RecordSourceError::invalid_request(format!("base url '{base}' cannot carry a path"))
        })?
        .pop_if_empty()
        .extend(path);
    url.query_pairs_mut()
        .clear()
        .append_pair("size", &size.to_string());
    Ok(url)
}

fn parse_batch(
    kind: EntityKind,
    size: BatchSize,
    body: &[u8],
) -> Result<RecordBatch, RecordSourceError> {
    let batch = match kind {
        EntityKind::Users => RecordBatch::Users(
            decode::<UserDto>(body)?
                .into_iter()
                .map(Into::into)
                .collect(),
        ),
        EntityKind::Banks => RecordBatch::Banks(
            decode::<BankDto>(body)?
                .into_iter()
                .map(Into::into)
                .collect(),
        ),
    };
    if batch.len() != size.get() {
        return Err(RecordSourceError::decode(format!(
            "expected {size} {kind}, received {}",
            batch.len()
        )));
    }
    Ok(batch)
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<Vec<T>, RecordSourceError> {
    serde_json::from_slice::<OneOrMany<T>>(body)
        .map(OneOrMany::into_vec)
        .map_err(|error| {
            RecordSourceError::decode(format!(
                "invalid random-data payload ({error}): {}",
                body_preview(body)
            ))
        })
}

fn map_transport_error(error: reqwest::Error) -> RecordSourceError {
    if error.is_timeout() {
        RecordSourceError::timeout(error.to_string())
    } else {
        RecordSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> RecordSourceError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::TOO_MANY_REQUESTS => RecordSourceError::rate_limited(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            RecordSourceError::timeout(message)
        }
        _ if status.is_client_error() => RecordSourceError::invalid_request(message),
        _ => RecordSourceError::transport(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Coverage for the non-network request and decoding helpers.

    use rstest::rstest;

    use super::*;
    use crate::domain::{BankRecord, RecordId};

    fn size(count: usize) -> BatchSize {
        BatchSize::new(count).expect("valid size")
    }

    #[rstest]
    #[case(
        "https://random-data-api.com",
        EntityKind::Users,
        "https://random-data-api.com/api/users/random_user?size=3"
    )]
    #[case(
        "https://random-data-api.com/",
        EntityKind::Banks,
        "https://random-data-api.com/api/bank/random_bank?size=3"
    )]
    #[case(
        "http://localhost:8081/mirror/",
        EntityKind::Banks,
        "http://localhost:8081/mirror/api/bank/random_bank?size=3"
    )]
    fn builds_endpoint_per_kind(
        #[case] base: &str,
        #[case] kind: EntityKind,
        #[case] expected: &str,
    ) {
        let base = Url::parse(base).expect("valid base url");
        let url = endpoint_for(&base, kind, size(3)).expect("endpoint builds");
        assert_eq!(url.as_str(), expected);
    }

    #[rstest]
    #[case::rate_limited(StatusCode::TOO_MANY_REQUESTS)]
    #[case::request_timeout(StatusCode::REQUEST_TIMEOUT)]
    #[case::gateway_timeout(StatusCode::GATEWAY_TIMEOUT)]
    #[case::bad_request(StatusCode::BAD_REQUEST)]
    #[case::server_error(StatusCode::INTERNAL_SERVER_ERROR)]
    fn maps_http_statuses_to_domain_errors(#[case] status: StatusCode) {
        let error = map_status_error(status, b"{\"error\": \"unavailable\"}");
        let matched = match status {
            StatusCode::TOO_MANY_REQUESTS => {
                matches!(error, RecordSourceError::RateLimited { .. })
            }
            StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
                matches!(error, RecordSourceError::Timeout { .. })
            }
            StatusCode::BAD_REQUEST => matches!(error, RecordSourceError::InvalidRequest { .. }),
            _ => matches!(error, RecordSourceError::Transport { .. }),
        };
        assert!(matched, "unexpected mapping for {status}: {error:?}");
    }

    #[test]
    fn decodes_user_arrays_and_ignores_extra_fields() {
        let body = br#"[
            {"id": 7451, "uid": "a1", "first_name": "Ada", "last_name": "Lovelace",
             "username": "ada.lovelace", "email": "ada@example.com", "gender": "Female"},
            {"id": 1022, "first_name": "Alan", "last_name": "Turing",
             "username": "alan.turing", "email": "alan@example.com"}
        ]"#;

        let batch = parse_batch(EntityKind::Users, size(2), body).expect("decodes");

        let RecordBatch::Users(users) = batch else {
            panic!("expected a users batch");
        };
        let ids: Vec<_> = users.iter().map(|user| user.id.as_str()).collect();
        assert_eq!(ids, ["7451", "1022"]);
        assert!(users.iter().all(|user| user.bank_id.is_none()));
    }

    #[test]
    fn decodes_a_single_bank_object() {
        let body = br#"{"id": 3, "bank_name": "Harbour Bank",
            "routing_number": "011000015", "swift_bic": "HARBUS33XXX", "iban": "GB00"}"#;

        let batch = parse_batch(EntityKind::Banks, size(1), body).expect("decodes");

        assert_eq!(
            batch,
            RecordBatch::Banks(vec![BankRecord {
                id: RecordId::from(3_u64),
                bank_name: "Harbour Bank".to_owned(),
                routing_number: "011000015".to_owned(),
                swift_bic: "HARBUS33XXX".to_owned(),
            }])
        );
    }

    #[test]
    fn short_batches_are_rejected() {
        let body = br#"[{"id": 1, "bank_name": "A", "routing_number": "1", "swift_bic": "B"}]"#;

        let error = parse_batch(EntityKind::Banks, size(2), body).expect_err("short batch");

        assert_eq!(
            error,
            RecordSourceError::decode("expected 2 banks, received 1")
        );
    }

    #[test]
    fn malformed_payloads_map_to_decode_errors() {
        let error = parse_batch(EntityKind::Users, size(1), b"<html>busy</html>")
            .expect_err("not json");
        assert!(matches!(error, RecordSourceError::Decode { .. }));
    }

    #[test]
    fn body_preview_compacts_and_truncates() {
        let long = format!("a  \n b {}", "x".repeat(200));
        let preview = body_preview(long.as_bytes());
        assert!(preview.starts_with("a b x"));
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), 163);
    }
}
