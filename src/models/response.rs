use serde::{Deserialize, Serialize};

/// Outcome of a successful review, ready for the result page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisReport {
    pub original_name: String,
    pub feedback: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub version: String,
    pub ai_mode: String,
    pub model: String,
    pub max_file_size_mb: usize,
}
