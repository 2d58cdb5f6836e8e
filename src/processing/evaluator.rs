//! Evaluation pipeline: keyword gap, five sequential LLM requests, score
//! parsing and the decision.

use crate::config::{validate_threshold, validate_years_experience, EvaluationConfig};
use crate::error::{AtsError, Result};
use crate::llm::gateway::LlmGateway;
use crate::llm::prompts::{PromptKind, PromptParams, PromptTemplates};
use crate::processing::keywords::missing_keywords;
use crate::processing::scores::{parse_score_reply, Decision, ScoreReport};
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// User-chosen screening criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationCriteria {
    pub min_match_threshold: u8,
    /// Collected and reported, not used by the analysis.
    pub min_years_experience: u8,
}

impl From<&EvaluationConfig> for EvaluationCriteria {
    fn from(config: &EvaluationConfig) -> Self {
        Self {
            min_match_threshold: config.min_match_threshold,
            min_years_experience: config.min_years_experience,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EvaluationRequest {
    pub resume_text: String,
    pub job_text: String,
    pub criteria: EvaluationCriteria,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    pub decision: Decision,
    pub scores: ScoreReport,
    /// Job description tokens absent from the resume, sorted
    pub missing_keywords: Vec<String>,
    pub evaluation: String,
    pub soft_skills_fit: String,
    pub improvement_suggestions: String,
    pub mock_questions: String,
}

type ProgressHook = Box<dyn Fn(PromptKind) + Send + Sync>;

pub struct Evaluator<G: LlmGateway> {
    gateway: G,
    templates: PromptTemplates,
    on_request: Option<ProgressHook>,
}

impl<G: LlmGateway> Evaluator<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            templates: PromptTemplates::default(),
            on_request: None,
        }
    }

    /// Called before each LLM request.
    pub fn with_progress(mut self, hook: impl Fn(PromptKind) + Send + Sync + 'static) -> Self {
        self.on_request = Some(Box::new(hook));
        self
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Run the full evaluation. Any failure discards the whole result.
    pub async fn evaluate(&self, request: &EvaluationRequest) -> Result<Evaluation> {
        validate_threshold(request.criteria.min_match_threshold)?;
        validate_years_experience(request.criteria.min_years_experience)?;

        if request.resume_text.trim().is_empty() {
            return Err(AtsError::EmptyExtraction("resume".to_string()));
        }

        let missing: Vec<String> = missing_keywords(&request.resume_text, &request.job_text)
            .into_iter()
            .collect();
        info!("{} job description tokens missing from the resume", missing.len());

        let params = PromptParams {
            resume_content: request.resume_text.clone(),
            job_content: request.job_text.clone(),
        };

        let evaluation = self.ask(PromptKind::Evaluation, &params).await?;

        let scores_reply = self.ask(PromptKind::Scores, &params).await?;
        let scores = parse_score_reply(&scores_reply)?;
        let absent = scores.missing_categories();
        if !absent.is_empty() {
            warn!("Score reply left out: {}", absent.join(", "));
        }
        let decision = Decision::from_score(scores.average, request.criteria.min_match_threshold);
        info!(
            "Average score {:.2} against threshold {}: {}",
            scores.average, request.criteria.min_match_threshold, decision
        );

        let soft_skills_fit = self.ask(PromptKind::SoftSkillsFit, &params).await?;
        let improvement_suggestions = self.ask(PromptKind::ImprovementSuggestions, &params).await?;
        let mock_questions = self.ask(PromptKind::MockQuestions, &params).await?;

        Ok(Evaluation {
            decision,
            scores,
            missing_keywords: missing,
            evaluation,
            soft_skills_fit,
            improvement_suggestions,
            mock_questions,
        })
    }

    async fn ask(&self, kind: PromptKind, params: &PromptParams) -> Result<String> {
        if let Some(hook) = &self.on_request {
            hook(kind);
        }
        info!("Requesting {} from {}", kind, self.gateway.model_name());
        let prompt = self.templates.render(kind, params);
        self.gateway.generate(&prompt).await
    }
}
