// Resume analysis: summary, strengths and weaknesses via the Cohere chat model.
// All LLM calls go through llm_client::TextGenerator — no direct HTTP calls here.

pub mod analyzer;
pub mod handlers;
pub mod prompts;
