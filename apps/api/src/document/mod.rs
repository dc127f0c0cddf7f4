// Document Chunker: text extraction from uploaded resumes plus overlapping splitting.
// PDF parsing is CPU-bound and runs inside tokio::task::spawn_blocking.

pub mod extract;
pub mod splitter;

pub use extract::{extract_text, Document};
pub use splitter::RecursiveCharacterSplitter;

use tracing::info;

use crate::errors::AppError;

/// Extracts all text from `document` and splits it into ordered, overlapping chunks.
pub async fn chunk_document(
    document: &Document,
    splitter: &RecursiveCharacterSplitter,
) -> Result<Vec<String>, AppError> {
    let text = extract_text(document).await?;
    let chunks = splitter.split_text(&text);

    if chunks.is_empty() {
        return Err(AppError::Extraction("document yielded no text".to_string()));
    }

    info!(
        "Chunked document into {} chunk(s) ({} chars)",
        chunks.len(),
        text.chars().count()
    );
    Ok(chunks)
}
