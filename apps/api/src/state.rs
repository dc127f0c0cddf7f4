use std::sync::Arc;

use crate::document::RecursiveCharacterSplitter;
use crate::jobs::driver::BrowserLauncher;
use crate::jobs::scraper::ScraperSettings;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Holds no per-request data: documents and API keys never outlive a request.
#[derive(Clone)]
pub struct AppState {
    /// Text generation backend. Default: Cohere `LlmClient`.
    pub llm: Arc<dyn TextGenerator>,
    /// Browser backend. Default: fantoccini `WebDriverLauncher`.
    pub browser: Arc<dyn BrowserLauncher>,
    pub splitter: RecursiveCharacterSplitter,
    pub scraper: ScraperSettings,
}
