// Prompt templates for resume analysis. Replace `{resume_text}` before sending.

use crate::models::analysis::AnalysisTask;

pub const SUMMARY_PROMPT_TEMPLATE: &str = "Provide a detailed summary of the following resume:
{resume_text}";

pub const STRENGTH_PROMPT_TEMPLATE: &str = "Analyze and explain the strengths of this resume:
{resume_text}";

pub const WEAKNESS_PROMPT_TEMPLATE: &str =
    "Analyze the weaknesses of this resume and suggest improvements:
{resume_text}";

/// Fills the template for `task` with `resume_text`.
pub fn build_prompt(task: AnalysisTask, resume_text: &str) -> String {
    let template = match task {
        AnalysisTask::Summary => SUMMARY_PROMPT_TEMPLATE,
        AnalysisTask::Strength => STRENGTH_PROMPT_TEMPLATE,
        AnalysisTask::Weakness => WEAKNESS_PROMPT_TEMPLATE,
    };
    template.replace("{resume_text}", resume_text)
}
