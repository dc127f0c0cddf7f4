//! Axum route handlers for the resume analysis API.

use axum::extract::{Multipart, Path, State};
use axum::Json;
use tracing::info;

use crate::analysis::analyzer::analyze;
use crate::document::{chunk_document, Document};
use crate::errors::AppError;
use crate::models::analysis::{AnalysisResult, AnalysisTask};
use crate::models::credential::ApiKey;
use crate::state::AppState;

const RESUME_FIELD: &str = "resume";
const API_KEY_FIELD: &str = "api_key";

/// Fields collected from the analysis form. Unknown fields are ignored.
#[derive(Debug, Default)]
struct AnalysisForm {
    document: Option<Document>,
    api_key: Option<ApiKey>,
}

async fn read_form(multipart: &mut Multipart) -> Result<AnalysisForm, AppError> {
    let mut form = AnalysisForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read multipart: {e}")))?
    {
        let name = field.name().map(String::from);
        match name.as_deref() {
            Some(RESUME_FIELD) => {
                let filename = field.file_name().map(String::from);
                let content_type = field.content_type().map(String::from);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
                // Browsers send an empty, nameless part when no file was chosen.
                let no_file = data.is_empty() && filename.as_deref().map_or(true, str::is_empty);
                if !no_file {
                    form.document = Some(Document::new(data, filename, content_type));
                }
            }
            Some(API_KEY_FIELD) => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read API key: {e}")))?;
                form.api_key = ApiKey::new(raw);
            }
            _ => {}
        }
    }

    Ok(form)
}

/// POST /api/v1/analysis/:task
pub async fn handle_analyze(
    State(state): State<AppState>,
    Path(task): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResult>, AppError> {
    let task: AnalysisTask = task.parse()?;
    let form = read_form(&mut multipart).await?;

    let (Some(document), Some(credential)) = (form.document, form.api_key) else {
        return Err(AppError::MissingInput(
            "Please upload your resume and enter an API key.".to_string(),
        ));
    };

    info!("Analyzing resume: task={task}");
    let chunks = chunk_document(&document, &state.splitter).await?;
    drop(document);

    let result = analyze(state.llm.as_ref(), task, &chunks, &credential).await?;
    Ok(Json(AnalysisResult { task, result }))
}
