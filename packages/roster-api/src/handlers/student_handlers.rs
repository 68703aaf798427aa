//! Student handlers.

use hyper::body::{Body, Bytes};
use hyper::{Request, Response};

use crate::router::{AppState, RouterError};
use roster_core::model::NewStudent;

use super::request_utils::{
    build_empty_response, build_json_response, map_db_error_to_router_error, parse_json_body,
    parse_path_id, read_request_body_with_timeout, MatchitParams,
};

/// Lists all students in ascending id order.
///
/// # Endpoint
/// `GET /api/v1/students/`
pub async fn list_students<B>(
    _req: Request<B>,
    _params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let students = state
        .db
        .list_students()
        .map_err(map_db_error_to_router_error)?;

    build_json_response(200, &students)
}

/// Reads a student.
///
/// # Endpoint
/// `GET /api/v1/students/{id}/`
pub async fn read_student<B>(
    _req: Request<B>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let id = parse_path_id(&params, "id")?;

    let student = state
        .db
        .get_student(id)
        .map_err(map_db_error_to_router_error)?;

    build_json_response(200, &student)
}

/// Creates a student.
///
/// # Endpoint
/// `POST /api/v1/students/`
///
/// # Request Body
/// ```json
/// {"name": "Ada"}
/// ```
///
/// # Response
/// - **201 Created**: `{"id": 1, "name": "Ada"}`
pub async fn create_student<B>(
    req: Request<B>,
    _params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError>
where
    B: Body<Data = Bytes>,
    B::Error: std::fmt::Display,
{
    let timeout_ms = state.config.load().request_timeout_ms;
    let body_bytes = read_request_body_with_timeout(req, timeout_ms).await?;
    let request: NewStudent = parse_json_body(&body_bytes)?;

    let student = state
        .db
        .create_student(request.name)
        .map_err(map_db_error_to_router_error)?;

    build_json_response(201, &student)
}

/// Deletes a student and removes it from every course.
///
/// # Endpoint
/// `DELETE /api/v1/students/{id}/`
pub async fn delete_student<B>(
    _req: Request<B>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let id = parse_path_id(&params, "id")?;

    state
        .db
        .delete_student(id)
        .map_err(map_db_error_to_router_error)?;

    build_empty_response(204)
}
