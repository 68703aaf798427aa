//! Matchit routing configuration.

use std::sync::Arc;

use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};
use matchit::Router as MatchitRouter;

use crate::handlers;
use roster_core::config::LiveConfig;
use roster_core::{Database, DbError};

/// Prefix shared by every resource route.
pub const API_PREFIX: &str = "/api/v1";

/// Served when an error envelope cannot be serialized.
const FALLBACK_ERROR_BODY: &[u8] =
    br#"{"success":false,"error":{"code":"500","message":"Internal Server Error"}}"#;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Store instance
    pub db: Arc<Database>,
    /// Live configuration shared with the store
    pub config: Arc<LiveConfig>,
}

/// HTTP request router.
pub struct Router {
    inner: MatchitRouter<RouteHandler>,
    state: AppState,
}

impl Router {
    /// Creates a new router with default routes.
    pub fn new(db: Arc<Database>) -> Self {
        let mut router = MatchitRouter::new();

        // Course endpoints
        insert_route(&mut router, "/courses", RouteHandler::Courses);
        insert_route(&mut router, "/courses/{id}", RouteHandler::Course);

        // Student endpoints
        insert_route(&mut router, "/students", RouteHandler::Students);
        insert_route(&mut router, "/students/{id}", RouteHandler::Student);

        let config = Arc::clone(db.config());
        Self {
            inner: router,
            state: AppState { db, config },
        }
    }

    /// Routes an incoming request to the appropriate handler.
    ///
    /// # Arguments
    /// * `req` - HTTP request
    ///
    /// # Returns
    /// `Result<Response<Bytes>, RouterError>` containing the response or an error.
    pub async fn route<B>(&self, req: Request<B>) -> Result<Response<Bytes>, RouterError>
    where
        B: Body<Data = Bytes>,
        B::Error: std::fmt::Display,
    {
        let path = req.uri().path().to_string();

        match self.inner.at(&path) {
            Ok(matched) => {
                let state = self.state.clone();
                matched.value.handle(req, matched.params, state).await
            }
            Err(_) => Err(RouterError::NotFound(format!("No route found for {}", path))),
        }
    }

    /// Routes a request and renders any error as a JSON error response.
    pub async fn handle<B>(&self, req: Request<B>) -> Response<Bytes>
    where
        B: Body<Data = Bytes>,
        B::Error: std::fmt::Display,
    {
        let method = req.method().clone();
        let path = req.uri().path().to_string();

        let response = match self.route(req).await {
            Ok(response) => response,
            Err(err) => {
                if err.status() >= 500 {
                    tracing::error!(%method, path = %path, "Error handling request: {}", err);
                } else {
                    tracing::debug!(%method, path = %path, "Request rejected: {}", err);
                }
                Response::from(err)
            }
        };

        tracing::info!(
            %method,
            path = %path,
            status = response.status().as_u16(),
            "Handled request"
        );
        response
    }
}

/// Registers `path` under the API prefix with and without a trailing slash.
fn insert_route(router: &mut MatchitRouter<RouteHandler>, path: &str, handler: RouteHandler) {
    let route = format!("{}{}", API_PREFIX, path);
    router
        .insert(route.clone(), handler)
        .unwrap_or_else(|e| panic!("Failed to insert {} route: {}", route, e));
    router
        .insert(format!("{}/", route), handler)
        .unwrap_or_else(|e| panic!("Failed to insert {}/ route: {}", route, e));
}

/// Route handler function.
#[derive(Debug, Clone, Copy)]
enum RouteHandler {
    Courses,
    Course,
    Students,
    Student,
}

impl RouteHandler {
    /// Handles a request with the given route parameters.
    async fn handle<B>(
        &self,
        req: Request<B>,
        params: matchit::Params<'_, '_>,
        state: AppState,
    ) -> Result<Response<Bytes>, RouterError>
    where
        B: Body<Data = Bytes>,
        B::Error: std::fmt::Display,
    {
        let method = req.method().clone();
        match self {
            RouteHandler::Courses => match method {
                Method::GET => handlers::list_courses(req, params, state).await,
                Method::POST => handlers::create_course(req, params, state).await,
                _ => Err(RouterError::MethodNotAllowed),
            },
            RouteHandler::Course => match method {
                Method::GET => handlers::read_course(req, params, state).await,
                Method::PUT => handlers::update_course(req, params, state).await,
                Method::PATCH => handlers::partial_update_course(req, params, state).await,
                Method::DELETE => handlers::delete_course(req, params, state).await,
                _ => Err(RouterError::MethodNotAllowed),
            },
            RouteHandler::Students => match method {
                Method::GET => handlers::list_students(req, params, state).await,
                Method::POST => handlers::create_student(req, params, state).await,
                _ => Err(RouterError::MethodNotAllowed),
            },
            RouteHandler::Student => match method {
                Method::GET => handlers::read_student(req, params, state).await,
                Method::DELETE => handlers::delete_student(req, params, state).await,
                _ => Err(RouterError::MethodNotAllowed),
            },
        }
    }
}

/// Router error type.
#[derive(Debug)]
pub enum RouterError {
    MethodNotAllowed,
    InternalError(String),
    Timeout,
    BadRequest(String),
    NotFound(String),
    /// Store rejection; status follows the error's classification
    Store(DbError),
}

impl RouterError {
    /// HTTP status code this error renders as.
    pub fn status(&self) -> u16 {
        match self {
            RouterError::MethodNotAllowed => 405,
            RouterError::InternalError(_) => 500,
            RouterError::Timeout => 408,
            RouterError::BadRequest(_) => 400,
            RouterError::NotFound(_) => 404,
            RouterError::Store(e) if e.is_not_found() => 404,
            RouterError::Store(e) if e.is_validation() => 400,
            RouterError::Store(_) => 500,
        }
    }

    /// Machine-readable error kind, sent as `details` in the error envelope.
    pub fn kind(&self) -> &'static str {
        match self {
            RouterError::MethodNotAllowed => "method_not_allowed",
            RouterError::InternalError(_) => "internal_error",
            RouterError::Timeout => "timeout",
            RouterError::BadRequest(_) => "bad_request",
            RouterError::NotFound(_) => "route_not_found",
            RouterError::Store(e) => e.kind(),
        }
    }
}

impl std::fmt::Display for RouterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouterError::MethodNotAllowed => write!(f, "Method Not Allowed"),
            RouterError::InternalError(msg) => write!(f, "Internal Error: {}", msg),
            RouterError::Timeout => write!(f, "Request Timeout"),
            RouterError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            RouterError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            RouterError::Store(e) => write!(f, "Store: {}", e),
        }
    }
}

impl std::error::Error for RouterError {}

impl From<RouterError> for Response<Bytes> {
    fn from(err: RouterError) -> Self {
        let status = err.status();
        let message = match &err {
            RouterError::MethodNotAllowed => "Method Not Allowed".to_string(),
            RouterError::InternalError(msg) => msg.clone(),
            RouterError::Timeout => "Request Timeout".to_string(),
            RouterError::BadRequest(msg) => msg.clone(),
            RouterError::NotFound(msg) => msg.clone(),
            RouterError::Store(e) => e.to_string(),
        };

        let details = Some(err.kind().to_string());
        let error_response = handlers::error_response(status, message, details);
        let body = serde_json::to_vec(&error_response).unwrap_or_else(|e| {
            tracing::error!("Failed to serialize error response: {}", e);
            FALLBACK_ERROR_BODY.to_vec()
        });

        Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .body(Bytes::from(body))
            .unwrap_or_else(|_| {
                let mut fallback = Response::new(Bytes::from("Internal Server Error"));
                *fallback.status_mut() = hyper::StatusCode::INTERNAL_SERVER_ERROR;
                fallback
            })
    }
}
