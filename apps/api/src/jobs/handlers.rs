//! Axum route handlers for the job search API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::AppError;
use crate::jobs::scraper::search;
use crate::models::jobs::{JobListing, JobSearchQuery};
use crate::state::AppState;

pub const NO_JOBS_WARNING: &str = "No jobs found. Try different keywords.";

fn default_location() -> String {
    "India".to_string()
}

fn default_job_count() -> i64 {
    5
}

#[derive(Debug, Deserialize)]
pub struct JobSearchRequest {
    /// Comma-separated job titles.
    #[serde(default)]
    pub job_title: String,
    #[serde(default = "default_location")]
    pub location: String,
    #[serde(default = "default_job_count")]
    pub job_count: i64,
}

#[derive(Debug, Serialize)]
pub struct JobSearchResponse {
    pub listings: Vec<JobListing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl TryFrom<JobSearchRequest> for JobSearchQuery {
    type Error = AppError;

    fn try_from(req: JobSearchRequest) -> Result<Self, Self::Error> {
        let keywords = JobSearchQuery::parse_keywords(&req.job_title);
        let location = req.location.trim().to_string();

        if keywords.is_empty() || location.is_empty() {
            return Err(AppError::MissingInput(
                "Please enter at least one job title and a location.".to_string(),
            ));
        }
        if req.job_count < 1 {
            return Err(AppError::Validation(
                "job_count must be at least 1".to_string(),
            ));
        }

        Ok(JobSearchQuery {
            keywords,
            location,
            max_results: usize::try_from(req.job_count).unwrap_or(usize::MAX),
        })
    }
}

/// POST /api/v1/jobs/search
pub async fn handle_job_search(
    State(state): State<AppState>,
    Json(req): Json<JobSearchRequest>,
) -> Result<Json<JobSearchResponse>, AppError> {
    let query = JobSearchQuery::try_from(req)?;
    let listings = search(state.browser.as_ref(), &query, &state.scraper).await?;

    let warning = if listings.is_empty() {
        warn!("Job search returned no listings");
        Some(NO_JOBS_WARNING.to_string())
    } else {
        None
    };

    Ok(Json(JobSearchResponse { listings, warning }))
}
