//! Resume Analyzer — turns document chunks into a summary, strengths or weaknesses.
//!
//! Flow: join chunks → summary call → (strength | weakness) call on the summary.
//!
//! The second call sees only the summary, never the raw chunks, so its input
//! stays bounded however long the resume is.

use tracing::info;

use crate::analysis::prompts::build_prompt;
use crate::errors::AppError;
use crate::llm_client::TextGenerator;
use crate::models::analysis::AnalysisTask;
use crate::models::credential::ApiKey;

/// Runs `task` over `chunks`. Issues one model call for a summary, two otherwise.
pub async fn analyze(
    llm: &dyn TextGenerator,
    task: AnalysisTask,
    chunks: &[String],
    credential: &ApiKey,
) -> Result<String, AppError> {
    if chunks.iter().all(|c| c.trim().is_empty()) {
        return Err(AppError::EmptyInput);
    }

    let resume_text = chunks.join(" ");

    info!("Requesting resume summary ({} chunk(s))", chunks.len());
    let summary = llm
        .generate(&build_prompt(AnalysisTask::Summary, &resume_text), credential)
        .await?;

    if !task.needs_summary_pass() {
        return Ok(summary);
    }

    info!("Requesting resume {task} analysis from summary");
    let result = llm
        .generate(&build_prompt(task, &summary), credential)
        .await?;

    Ok(result)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::llm_client::LlmError;

    /// Records every prompt and answers with a numbered reply.
    #[derive(Default)]
    struct RecordingGenerator {
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl TextGenerator for RecordingGenerator {
        async fn generate(&self, prompt: &str, _credential: &ApiKey) -> Result<String, LlmError> {
            let mut prompts = self.prompts.lock().unwrap();
            prompts.push(prompt.to_string());
            Ok(format!("REPLY-{}", prompts.len()))
        }
    }

    struct RejectingGenerator;

    #[async_trait]
    impl TextGenerator for RejectingGenerator {
        async fn generate(&self, _prompt: &str, _credential: &ApiKey) -> Result<String, LlmError> {
            Err(LlmError::Unauthorized { status: 401 })
        }
    }

    struct FlakyGenerator;

    #[async_trait]
    impl TextGenerator for FlakyGenerator {
        async fn generate(&self, _prompt: &str, _credential: &ApiKey) -> Result<String, LlmError> {
            Err(LlmError::RateLimited { retries: 3 })
        }
    }

    fn chunks() -> Vec<String> {
        vec![
            "RAW-CHUNK-ONE Senior Rust engineer".to_string(),
            "RAW-CHUNK-TWO built payment systems".to_string(),
        ]
    }

    fn key() -> ApiKey {
        ApiKey::new("k").unwrap()
    }

    #[tokio::test]
    async fn test_summary_issues_exactly_one_call() {
        let llm = RecordingGenerator::default();
        let result = analyze(&llm, AnalysisTask::Summary, &chunks(), &key())
            .await
            .unwrap();

        assert_eq!(result, "REPLY-1");
        let prompts = llm.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("RAW-CHUNK-ONE Senior Rust engineer RAW-CHUNK-TWO"));
    }

    #[tokio::test]
    async fn test_strength_and_weakness_chain_on_summary() {
        for task in [AnalysisTask::Strength, AnalysisTask::Weakness] {
            let llm = RecordingGenerator::default();
            let result = analyze(&llm, task, &chunks(), &key()).await.unwrap();

            assert_eq!(result, "REPLY-2");
            let prompts = llm.prompts.lock().unwrap();
            assert_eq!(prompts.len(), 2, "{task} should make two calls");
            assert_eq!(prompts[0], build_prompt(AnalysisTask::Summary, &chunks().join(" ")));
            assert!(prompts[1].contains("REPLY-1"));
            assert!(!prompts[1].contains("RAW-CHUNK"));
            assert_eq!(prompts[1], build_prompt(task, "REPLY-1"));
        }
    }

    #[tokio::test]
    async fn test_no_chunks_is_empty_input() {
        let llm = RecordingGenerator::default();
        let err = analyze(&llm, AnalysisTask::Summary, &[], &key())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::EmptyInput));

        let err = analyze(&llm, AnalysisTask::Weakness, &["  ".to_string()], &key())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::EmptyInput));
        assert!(llm.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_key_is_authentication_error() {
        let err = analyze(&RejectingGenerator, AnalysisTask::Strength, &chunks(), &key())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Authentication));
    }

    #[tokio::test]
    async fn test_rate_limit_is_service_error() {
        let err = analyze(&FlakyGenerator, AnalysisTask::Summary, &chunks(), &key())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::RateLimitOrService(_)));
    }
}
