//! Screening logic: keyword gap, score parsing, decision and the pipeline
//! that ties them to the LLM gateway

pub mod evaluator;
pub mod keywords;
pub mod scores;

pub use evaluator::{Evaluation, EvaluationCriteria, EvaluationRequest, Evaluator};
pub use scores::{Decision, ScoreReport};
