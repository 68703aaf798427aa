//! Course CRUD and list handlers.

use hyper::body::{Body, Bytes};
use hyper::{Request, Response};

use crate::router::{AppState, RouterError};
use roster_core::model::{CoursePatch, NewCourse};

use super::request_utils::{
    build_empty_response, build_json_response, course_filter_from_query,
    map_db_error_to_router_error, parse_json_body, parse_path_id, parse_query_params,
    read_request_body_with_timeout, MatchitParams,
};

/// Lists courses, optionally filtered.
///
/// # Endpoint
/// `GET /api/v1/courses/?id={id}&name={name}`
///
/// # Response
/// - **200 OK**: JSON array of courses in ascending id order, possibly empty
/// ```json
/// [{"id": 1, "name": "Algebra", "students": [1, 2]}]
/// ```
///
/// # Errors
/// - **400 Bad Request**: `id` is not an integer
/// - **404 Not Found**: `id` names no course (strict id filtering)
///
/// # Notes
/// - Both filters are exact matches
/// - A `name` that matches nothing returns `[]`
pub async fn list_courses<B>(
    req: Request<B>,
    _params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let query = parse_query_params(req.uri().query());
    let filter = course_filter_from_query(&query)?;

    let courses = state
        .db
        .list_courses(&filter)
        .map_err(map_db_error_to_router_error)?;

    build_json_response(200, &courses)
}

/// Reads a course.
///
/// # Endpoint
/// `GET /api/v1/courses/{id}/`
///
/// # Response
/// - **200 OK**: `{"id": 1, "name": "Algebra", "students": [1, 2]}`
///
/// # Errors
/// - **400 Bad Request**: Invalid course id
/// - **404 Not Found**: Course not found
pub async fn read_course<B>(
    _req: Request<B>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let id = parse_path_id(&params, "id")?;

    let course = state
        .db
        .get_course(id)
        .map_err(map_db_error_to_router_error)?;

    build_json_response(200, &course)
}

/// Creates a course.
///
/// # Endpoint
/// `POST /api/v1/courses/`
///
/// # Request Body
/// ```json
/// {"name": "Algebra", "students": [1, 2]}
/// ```
///
/// # Response
/// - **201 Created**: The stored course
///
/// # Errors
/// - **400 Bad Request**: Malformed body, unknown student, or too many students
///
/// # Example
/// ```bash
/// curl -X POST http://localhost:8000/api/v1/courses/ \
///   -H "Content-Type: application/json" \
///   -d '{"name": "Algebra", "students": [1, 2]}'
/// ```
pub async fn create_course<B>(
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
    let request: NewCourse = parse_json_body(&body_bytes)?;

    let course = state
        .db
        .create_course(request)
        .map_err(map_db_error_to_router_error)?;

    build_json_response(201, &course)
}

/// Fully updates a course.
///
/// # Endpoint
/// `PUT /api/v1/courses/{id}/`
///
/// # Request Body
/// ```json
/// {"name": "Algebra II", "students": [3]}
/// ```
///
/// # Response
/// - **200 OK**: The updated course
///
/// # Errors
/// - **400 Bad Request**: Malformed body, unknown student, or too many students
/// - **404 Not Found**: Course not found
///
/// # Notes
/// - Omitting `students` clears the enrollment
pub async fn update_course<B>(
    req: Request<B>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError>
where
    B: Body<Data = Bytes>,
    B::Error: std::fmt::Display,
{
    let id = parse_path_id(&params, "id")?;

    let timeout_ms = state.config.load().request_timeout_ms;
    let body_bytes = read_request_body_with_timeout(req, timeout_ms).await?;
    let request: NewCourse = parse_json_body(&body_bytes)?;

    let course = state
        .db
        .replace_course(id, request)
        .map_err(map_db_error_to_router_error)?;

    build_json_response(200, &course)
}

/// Partially updates a course.
///
/// # Endpoint
/// `PATCH /api/v1/courses/{id}/`
///
/// # Request Body
/// ```json
/// {"name": "UpdateCourse", "students": [1]}
/// ```
///
/// # Response
/// - **200 OK**: The updated course
///
/// # Errors
/// - **400 Bad Request**: Malformed body, unknown student, or too many students
/// - **404 Not Found**: Course not found
///
/// # Notes
/// - Only specified fields are updated
/// - An empty body changes nothing
pub async fn partial_update_course<B>(
    req: Request<B>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError>
where
    B: Body<Data = Bytes>,
    B::Error: std::fmt::Display,
{
    let id = parse_path_id(&params, "id")?;

    let timeout_ms = state.config.load().request_timeout_ms;
    let body_bytes = read_request_body_with_timeout(req, timeout_ms).await?;
    let patch: CoursePatch = if body_bytes.is_empty() {
        CoursePatch::default()
    } else {
        parse_json_body(&body_bytes)?
    };

    let course = state
        .db
        .update_course(id, patch)
        .map_err(map_db_error_to_router_error)?;

    build_json_response(200, &course)
}

/// Deletes a course.
///
/// # Endpoint
/// `DELETE /api/v1/courses/{id}/`
///
/// # Response
/// - **204 No Content**: Course deleted; its students are kept
///
/// # Errors
/// - **400 Bad Request**: Invalid course id
/// - **404 Not Found**: Course not found
pub async fn delete_course<B>(
    _req: Request<B>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let id = parse_path_id(&params, "id")?;

    state
        .db
        .delete_course(id)
        .map_err(map_db_error_to_router_error)?;

    build_empty_response(204)
}
