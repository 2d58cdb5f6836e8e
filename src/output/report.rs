//! Evaluation report: the pipeline result plus run metadata

use crate::processing::evaluator::{Evaluation, EvaluationCriteria};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub metadata: ReportMetadata,
    pub criteria: EvaluationCriteria,
    pub evaluation: Evaluation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// When the report was generated
    pub generated_at: DateTime<Utc>,

    /// Version of smart-ats used
    pub tool_version: String,

    /// Resume file analyzed
    pub resume_file: String,

    /// Job description file, or `<inline>`
    pub job_source: String,

    /// Model that answered the prompts
    pub model: String,

    /// Wall time of the whole evaluation
    pub processing_time_ms: u64,
}

impl ReportMetadata {
    pub fn new(resume_file: String, job_source: String, model: String, processing_time_ms: u64) -> Self {
        Self {
            generated_at: Utc::now(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            resume_file,
            job_source,
            model,
            processing_time_ms,
        }
    }
}

impl EvaluationReport {
    pub fn new(metadata: ReportMetadata, criteria: EvaluationCriteria, evaluation: Evaluation) -> Self {
        Self {
            metadata,
            criteria,
            evaluation,
        }
    }
}
