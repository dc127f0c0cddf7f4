pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis_handlers;
use crate::jobs::handlers as job_handlers;
use crate::state::AppState;

/// Resumes larger than this are rejected before parsing.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/analysis/:task",
            post(analysis_handlers::handle_analyze),
        )
        .route("/api/v1/jobs/search", post(job_handlers::handle_job_search))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
