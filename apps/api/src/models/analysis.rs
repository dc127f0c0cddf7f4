use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Kind of analysis requested for an uploaded resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisTask {
    Summary,
    Strength,
    Weakness,
}

impl AnalysisTask {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisTask::Summary => "summary",
            AnalysisTask::Strength => "strength",
            AnalysisTask::Weakness => "weakness",
        }
    }

    /// Strength and weakness run on top of a summary rather than the raw chunks.
    pub fn needs_summary_pass(&self) -> bool {
        !matches!(self, AnalysisTask::Summary)
    }
}

impl fmt::Display for AnalysisTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisTask {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "summary" => Ok(AnalysisTask::Summary),
            "strength" | "strengths" => Ok(AnalysisTask::Strength),
            "weakness" | "weaknesses" => Ok(AnalysisTask::Weakness),
            other => Err(AppError::Validation(format!(
                "Unknown analysis task '{other}' (expected summary, strength or weakness)"
            ))),
        }
    }
}

/// Text returned by the model for one analysis request.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub task: AnalysisTask,
    pub result: String,
}
