//! Request utilities for HTTP endpoints.

use std::collections::HashMap;

use http_body_util::BodyExt;
use hyper::body::{Body, Bytes};
use hyper::{Request, Response};
use percent_encoding::percent_decode_str;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::time;

use crate::router::RouterError;
use roster_core::error::DbError;
use roster_core::table::CourseFilter;

/// Type alias for matchit parameters with explicit lifetimes
pub type MatchitParams<'a, 'b> = matchit::Params<'a, 'b>;

/// Helper function to read request body with timeout
pub async fn read_request_body_with_timeout<B>(
    req: Request<B>,
    timeout_ms: u64,
) -> Result<Bytes, RouterError>
where
    B: Body<Data = Bytes>,
    B::Error: std::fmt::Display,
{
    let timeout_duration = time::Duration::from_millis(timeout_ms);
    let body = time::timeout(timeout_duration, req.into_body().collect())
        .await
        .map_err(|_| RouterError::Timeout)?
        .map_err(|e| RouterError::InternalError(format!("Failed to read request body: {}", e)))?;
    Ok(body.to_bytes())
}

/// Deserializes a JSON request body.
pub fn parse_json_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, RouterError> {
    serde_json::from_slice(body)
        .map_err(|e| RouterError::BadRequest(format!("Failed to parse request: {}", e)))
}

/// Parses the `{id}` segment of a matched route.
pub fn parse_path_id(params: &MatchitParams<'_, '_>, key: &str) -> Result<u64, RouterError> {
    let raw = params.get(key).unwrap_or_default();
    raw.parse()
        .map_err(|e| RouterError::BadRequest(format!("Invalid id '{}': {}", raw, e)))
}

/// Map DbError to appropriate RouterError
///
/// The store error is kept whole so the response can name its kind.
pub fn map_db_error_to_router_error(e: DbError) -> RouterError {
    RouterError::Store(e)
}

/// Helper to build a JSON HTTP response with proper error handling
pub fn build_json_response<T: Serialize>(
    status: u16,
    data: &T,
) -> Result<Response<Bytes>, RouterError> {
    let json = serde_json::to_vec(data)
        .map_err(|e| RouterError::InternalError(format!("Failed to serialize response: {}", e)))?;
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Bytes::from(json))
        .map_err(|e| RouterError::InternalError(format!("Failed to build response: {}", e)))
}

/// Helper to build empty HTTP response (for 204 No Content)
pub fn build_empty_response(status: u16) -> Result<Response<Bytes>, RouterError> {
    Response::builder()
        .status(status)
        .body(Bytes::new())
        .map_err(|e| RouterError::InternalError(format!("Failed to build response: {}", e)))
}

/// Parse query parameters from URL query string.
///
/// Keys and values are percent-decoded and `+` reads as a space. Pairs
/// without `=` are skipped; a repeated key keeps its last value.
pub fn parse_query_params(query_str: Option<&str>) -> HashMap<String, String> {
    let mut params = HashMap::new();

    if let Some(query_str) = query_str {
        for pair in query_str.split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            params.insert(decode_component(key), decode_component(value));
        }
    }

    params
}

fn decode_component(raw: &str) -> String {
    percent_decode_str(&raw.replace('+', " "))
        .decode_utf8_lossy()
        .into_owned()
}

/// Builds the course list filter from query parameters.
///
/// Only `id` and `name` are recognized; other keys are ignored.
pub fn course_filter_from_query(
    params: &HashMap<String, String>,
) -> Result<CourseFilter, RouterError> {
    let mut filter = CourseFilter::new();

    if let Some(raw_id) = params.get("id") {
        let id = raw_id.parse().map_err(|e| {
            RouterError::BadRequest(format!("Invalid id filter '{}': {}", raw_id, e))
        })?;
        filter = filter.with_id(id);
    }
    if let Some(name) = params.get("name") {
        filter = filter.with_name(name.clone());
    }

    Ok(filter)
}
