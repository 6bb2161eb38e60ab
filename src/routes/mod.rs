use axum::{
    http::{HeaderValue, Method, StatusCode},
    middleware,
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    db::{JobStore, UserStore},
    middleware::{make_span_with_request_id, request_id_middleware},
    services::recommendations::Recommender,
};

pub mod jobs;
pub mod recommendations;
pub mod users;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub jobs: Arc<dyn JobStore>,
    pub users: Arc<dyn UserStore>,
    pub recommender: Arc<Recommender>,
}

impl AppState {
    pub fn new(
        jobs: Arc<dyn JobStore>,
        users: Arc<dyn UserStore>,
        recommender: Recommender,
    ) -> Self {
        Self {
            jobs,
            users,
            recommender: Arc::new(recommender),
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes())
        .with_state(Arc::new(state))
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
}

/// API routes under /api
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Jobs
        .route("/jobs", get(jobs::list_jobs).post(jobs::create_job))
        .route("/jobs/:id", delete(jobs::delete_job))
        .route("/jobs/recommend", post(recommendations::recommend))
        // Users
        .route("/users/register", post(users::register))
        .route(
            "/users/profile",
            get(users::get_profile).put(users::update_profile),
        )
}

/// CORS for the web client; any origin when none is configured
pub fn cors_layer(frontend_url: Option<&str>) -> anyhow::Result<CorsLayer> {
    let layer = match frontend_url {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin.parse::<HeaderValue>()?)
            .allow_credentials(true)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::HeaderName::from_static(crate::middleware::requester::USER_ID_HEADER),
            ]),
        None => CorsLayer::permissive(),
    };

    Ok(layer)
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
