//! Score reply parsing and the accept/reject decision

use crate::error::{AtsError, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

pub const AVERAGE_SCORE_KEY: &str = "Average Score";

/// Categories the scores prompt asks for.
pub const SCORE_CATEGORIES: [&str; 5] = [
    "Technical Skills",
    "Research Experience",
    "Education Qualification",
    "Communication and Leadership",
    "Industry Knowledge",
];

/// Reported and computed averages further apart than this are logged.
const AVERAGE_TOLERANCE: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: String,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AverageSource {
    /// Taken from the model's `Average Score` entry
    Reported,
    /// Mean of the category scores
    Computed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Category scores in the order the model returned them
    pub categories: Vec<CategoryScore>,
    pub average: f64,
    pub average_source: AverageSource,
}

impl ScoreReport {
    pub fn score_for(&self, category: &str) -> Option<f64> {
        self.categories
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.score)
    }

    /// Expected categories the model left out.
    pub fn missing_categories(&self) -> Vec<&'static str> {
        SCORE_CATEGORIES
            .iter()
            .copied()
            .filter(|name| self.score_for(name).is_none())
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Accepted,
    Rejected,
}

impl Decision {
    /// Accepted when the average reaches the threshold (inclusive).
    pub fn from_score(average: f64, min_match_threshold: u8) -> Self {
        if average >= f64::from(min_match_threshold) {
            Decision::Accepted
        } else {
            Decision::Rejected
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Decision::Accepted)
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Accepted => write!(f, "Accepted"),
            Decision::Rejected => write!(f, "Rejected"),
        }
    }
}

/// Drop Markdown code fences (tagged or bare) wherever they appear.
pub fn sanitize_reply(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse the reply to the scores prompt.
///
/// The reply must be a JSON object once fences are removed; prose around the
/// object is rejected. A missing `scores` field counts as an empty mapping.
/// The average is the model's `Average Score` when present, otherwise the
/// mean of the remaining entries.
pub fn parse_score_reply(raw: &str) -> Result<ScoreReport> {
    let cleaned = sanitize_reply(raw);
    debug!("Parsing score reply of {} characters", cleaned.len());

    let value: Value =
        serde_json::from_str(&cleaned).map_err(|e| AtsError::ScoreParse(e.to_string()))?;

    let Value::Object(mut root) = value else {
        return Err(AtsError::ScoreParse("expected a JSON object".to_string()));
    };

    let scores = match root.remove("scores") {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(map)) => map,
        Some(other) => {
            return Err(AtsError::ScoreParse(format!(
                "'scores' must be an object, got {}",
                json_kind(&other)
            )))
        }
    };

    let mut categories = Vec::with_capacity(scores.len());
    let mut reported = None;

    for (name, value) in &scores {
        let score = numeric_score(name, value)?;
        if name == AVERAGE_SCORE_KEY {
            reported = Some(score);
        } else {
            categories.push(CategoryScore {
                category: name.clone(),
                score,
            });
        }
    }

    let computed = mean(&categories);

    let (average, average_source) = match (reported, computed) {
        (Some(reported), Some(computed)) => {
            if (reported - computed).abs() > AVERAGE_TOLERANCE {
                warn!(
                    "Reported average {:.2} differs from the category mean {:.2}; keeping the reported value",
                    reported, computed
                );
            }
            (reported, AverageSource::Reported)
        }
        (Some(reported), None) => (reported, AverageSource::Reported),
        (None, Some(computed)) => (computed, AverageSource::Computed),
        (None, None) => return Err(AtsError::NoScoresReturned),
    };

    Ok(ScoreReport {
        categories,
        average,
        average_source,
    })
}

fn mean(categories: &[CategoryScore]) -> Option<f64> {
    if categories.is_empty() {
        return None;
    }
    let total: f64 = categories.iter().map(|c| c.score).sum();
    Some(total / categories.len() as f64)
}

fn numeric_score(name: &str, value: &Value) -> Result<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed.filter(|score| score.is_finite()).ok_or_else(|| {
        AtsError::ScoreParse(format!("score for '{}' is not a number: {}", name, value))
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_REPLY: &str = r#"{"scores": {"Technical Skills": 80, "Research Experience": 60, "Education Qualification": 75, "Communication and Leadership": 70, "Industry Knowledge": 90, "Average Score": 75}}"#;

    #[test]
    fn test_sanitize_removes_fences() {
        let raw = "```json\n{\"scores\": {}}\n```";
        assert_eq!(sanitize_reply(raw), "{\"scores\": {}}");
        assert_eq!(sanitize_reply("```\n{}\n```"), "{}");
    }

    #[test]
    fn test_fenced_and_plain_replies_agree() {
        let fenced = format!("```json\n{}\n```", FULL_REPLY);
        let bare_fence = format!("```\n{}\n```\n", FULL_REPLY);

        let plain = parse_score_reply(FULL_REPLY).unwrap();
        assert_eq!(parse_score_reply(&fenced).unwrap(), plain);
        assert_eq!(parse_score_reply(&bare_fence).unwrap(), plain);
    }

    #[test]
    fn test_reported_average_is_preferred() {
        let report = parse_score_reply(FULL_REPLY).unwrap();
        assert_eq!(report.average, 75.0);
        assert_eq!(report.average_source, AverageSource::Reported);
        assert_eq!(report.categories.len(), 5);
        assert_eq!(report.score_for("Industry Knowledge"), Some(90.0));
        assert!(report.score_for(AVERAGE_SCORE_KEY).is_none());
    }

    #[test]
    fn test_category_order_is_preserved() {
        let report = parse_score_reply(FULL_REPLY).unwrap();
        let names: Vec<&str> = report.categories.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, SCORE_CATEGORIES.to_vec());
    }

    #[test]
    fn test_average_fallback() {
        let raw = r#"{"scores": {"Technical Skills": 60, "Research Experience": 80, "Education Qualification": 70, "Communication and Leadership": 90, "Industry Knowledge": 100}}"#;
        let report = parse_score_reply(raw).unwrap();
        assert_eq!(report.average, 80.0);
        assert_eq!(report.average_source, AverageSource::Computed);
    }

    #[test]
    fn test_empty_scores_is_an_error() {
        assert!(matches!(
            parse_score_reply(r#"{"scores": {}}"#),
            Err(AtsError::NoScoresReturned)
        ));
        assert!(matches!(
            parse_score_reply(r#"{"summary": "great"}"#),
            Err(AtsError::NoScoresReturned)
        ));
        assert!(matches!(parse_score_reply("{}"), Err(AtsError::NoScoresReturned)));
    }

    #[test]
    fn test_average_only_reply() {
        let report = parse_score_reply(r#"{"scores": {"Average Score": 42.5}}"#).unwrap();
        assert_eq!(report.average, 42.5);
        assert!(report.categories.is_empty());
        assert_eq!(report.missing_categories().len(), SCORE_CATEGORIES.len());
    }

    #[test]
    fn test_prose_around_json_is_rejected() {
        let raw = format!("Here are the scores you asked for:\n{}", FULL_REPLY);
        assert!(matches!(parse_score_reply(&raw), Err(AtsError::ScoreParse(_))));
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        for raw in ["", "not json", "{\"scores\": {\"Technical Skills\": 80,}}", "```json\n```"] {
            assert!(
                matches!(parse_score_reply(raw), Err(AtsError::ScoreParse(_))),
                "{:?} should fail to parse",
                raw
            );
        }
    }

    #[test]
    fn test_non_object_shapes_are_rejected() {
        assert!(matches!(parse_score_reply("[1, 2, 3]"), Err(AtsError::ScoreParse(_))));
        assert!(matches!(
            parse_score_reply(r#"{"scores": [80, 90]}"#),
            Err(AtsError::ScoreParse(_))
        ));
        assert!(matches!(
            parse_score_reply(r#"{"scores": {"Technical Skills": "high"}}"#),
            Err(AtsError::ScoreParse(_))
        ));
    }

    #[test]
    fn test_numeric_strings_are_accepted() {
        let report =
            parse_score_reply(r#"{"scores": {"Technical Skills": "70", "Industry Knowledge": "90%"}}"#)
                .unwrap();
        assert_eq!(report.average, 80.0);
    }

    #[test]
    fn test_non_finite_strings_are_rejected() {
        for raw in [
            r#"{"scores": {"Technical Skills": "NaN", "Industry Knowledge": 90}}"#,
            r#"{"scores": {"Technical Skills": 70, "Average Score": "inf"}}"#,
            r#"{"scores": {"Technical Skills": "-Infinity"}}"#,
        ] {
            assert!(
                matches!(parse_score_reply(raw), Err(AtsError::ScoreParse(_))),
                "{} should be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_missing_categories() {
        let report =
            parse_score_reply(r#"{"scores": {"Technical Skills": 70, "Industry Knowledge": 90}}"#)
                .unwrap();
        assert_eq!(
            report.missing_categories(),
            vec![
                "Research Experience",
                "Education Qualification",
                "Communication and Leadership"
            ]
        );
    }

    #[test]
    fn test_decision_threshold_is_inclusive() {
        assert_eq!(Decision::from_score(60.0, 60), Decision::Accepted);
        assert_eq!(Decision::from_score(59.99, 60), Decision::Rejected);
        assert_eq!(Decision::from_score(65.0, 60), Decision::Accepted);
        assert_eq!(Decision::from_score(65.0, 70), Decision::Rejected);
        assert_eq!(Decision::from_score(0.0, 0), Decision::Accepted);
    }

    #[test]
    fn test_decision_is_monotonic_in_threshold() {
        let average = 72.5;
        let decisions: Vec<Decision> = (0..=100u8).map(|t| Decision::from_score(average, t)).collect();
        for (threshold, decision) in decisions.iter().enumerate() {
            assert_eq!(decision.is_accepted(), threshold as f64 <= average, "threshold {}", threshold);
        }
    }
}
