//! Prompt templates for the five evaluation requests

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The requests issued for one evaluation, in the order they are sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PromptKind {
    Evaluation,
    Scores,
    SoftSkillsFit,
    ImprovementSuggestions,
    MockQuestions,
}

impl PromptKind {
    pub const ALL: [PromptKind; 5] = [
        PromptKind::Evaluation,
        PromptKind::Scores,
        PromptKind::SoftSkillsFit,
        PromptKind::ImprovementSuggestions,
        PromptKind::MockQuestions,
    ];
}

impl fmt::Display for PromptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptKind::Evaluation => write!(f, "evaluation"),
            PromptKind::Scores => write!(f, "scores"),
            PromptKind::SoftSkillsFit => write!(f, "soft skills & fit"),
            PromptKind::ImprovementSuggestions => write!(f, "improvement suggestions"),
            PromptKind::MockQuestions => write!(f, "mock questions"),
        }
    }
}

/// Parameters for prompt template substitution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptParams {
    pub resume_content: String,
    pub job_content: String,
}

/// Template strings keyed by request kind. `{resume}` and `{job}` are the
/// substitution slots.
#[derive(Debug, Clone)]
pub struct PromptTemplates {
    templates: HashMap<PromptKind, String>,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        let templates = PromptKind::ALL
            .iter()
            .map(|kind| (*kind, default_template(*kind).to_string()))
            .collect();
        Self { templates }
    }
}

impl PromptTemplates {
    /// Replace the template used for `kind`.
    pub fn with_template(mut self, kind: PromptKind, template: impl Into<String>) -> Self {
        self.templates.insert(kind, template.into());
        self
    }

    pub fn template(&self, kind: PromptKind) -> &str {
        self.templates
            .get(&kind)
            .map(String::as_str)
            .unwrap_or_else(|| default_template(kind))
    }

    /// Render the prompt for `kind`. Inputs are embedded verbatim.
    pub fn render(&self, kind: PromptKind, params: &PromptParams) -> String {
        // Substitute the job slot first so a literal "{job}" inside the resume
        // text is left alone.
        self.template(kind)
            .replace("{job}", &params.job_content)
            .replace("{resume}", &params.resume_content)
    }
}

fn default_template(kind: PromptKind) -> &'static str {
    match kind {
        PromptKind::Evaluation => EVALUATION_TEMPLATE,
        PromptKind::Scores => SCORES_TEMPLATE,
        PromptKind::SoftSkillsFit => SOFT_SKILLS_FIT_TEMPLATE,
        PromptKind::ImprovementSuggestions => IMPROVEMENT_SUGGESTIONS_TEMPLATE,
        PromptKind::MockQuestions => MOCK_QUESTIONS_TEMPLATE,
    }
}

const EVALUATION_TEMPLATE: &str = r#"You are a skilled ATS (Application Tracking System) expert with deep knowledge of tech fields, software engineering, data science,
data analysis, and big data engineering. Your task is to evaluate the resume based on the given job description.
Provide the matching percentage, identify missing keywords, and suggest improvements.

Resume:
{resume}

Job Description:
{job}

I want the response in the following sections:
• Job Description Match:
• Missing Keywords:
• Profile Summary:
• Category Breakdown:
• Matching breakdown:"#;

const SCORES_TEMPLATE: &str = r#"You are a skilled ATS (Application Tracking System) expert with deep knowledge of tech fields, software engineering, data science,
data analysis, and big data engineering. Your task is to evaluate the resume based on the given job description.
Please provide the following scores in JSON format for the categories below, including an average score.

Resume:
{resume}

Job Description:
{job}

Expected response format:
{
    "scores": {
        "Technical Skills": <score>,
        "Research Experience": <score>,
        "Education Qualification": <score>,
        "Communication and Leadership": <score>,
        "Industry Knowledge": <score>,
        "Average Score": <average_score>
    }
}"#;

const SOFT_SKILLS_FIT_TEMPLATE: &str = r#"Based on the following resume and job description, analyze the candidate's soft skills and cultural fit.

Resume:
{resume}

Job Description:
{job}

Please list the soft skills relevant to the job and provide a brief analysis of the candidate's cultural fit."#;

const IMPROVEMENT_SUGGESTIONS_TEMPLATE: &str = r#"Based on the following resume and job description, suggest improvements to the resume.

Resume:
{resume}

Job Description:
{job}

Provide specific suggestions to enhance the resume's alignment with the job description."#;

const MOCK_QUESTIONS_TEMPLATE: &str = r#"Based on the following resume and job description, generate relevant mock interview questions for the candidate.

Resume:
{resume}

Job Description:
{job}

Please provide a list of interview questions tailored to the role."#;

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> PromptParams {
        PromptParams {
            resume_content: "Software Engineer with Python experience at Tech Corp.".to_string(),
            job_content: "Senior Software Engineer role requiring React and Python.".to_string(),
        }
    }

    #[test]
    fn test_every_kind_embeds_both_texts() {
        let templates = PromptTemplates::default();
        for kind in PromptKind::ALL {
            let prompt = templates.render(kind, &params());
            assert!(prompt.contains("Software Engineer with Python experience at Tech Corp"), "{}", kind);
            assert!(prompt.contains("Senior Software Engineer role requiring React and Python"), "{}", kind);
            assert!(!prompt.contains("{resume}"));
            assert!(!prompt.contains("{job}"));
        }
    }

    #[test]
    fn test_templates_are_distinct() {
        let templates = PromptTemplates::default();
        let rendered: std::collections::HashSet<String> = PromptKind::ALL
            .iter()
            .map(|kind| templates.render(*kind, &params()))
            .collect();
        assert_eq!(rendered.len(), PromptKind::ALL.len());
    }

    #[test]
    fn test_scores_template_lists_categories() {
        let prompt = PromptTemplates::default().render(PromptKind::Scores, &params());
        assert!(prompt.contains("\"scores\""));
        assert!(prompt.contains("\"Technical Skills\""));
        assert!(prompt.contains("\"Industry Knowledge\""));
        assert!(prompt.contains("\"Average Score\""));
    }

    #[test]
    fn test_rendering_is_verbatim() {
        let params = PromptParams {
            resume_content: "  C++ & <Rust>\n\t\"quoted\" {job}  ".to_string(),
            job_content: String::new(),
        };
        let prompt = PromptTemplates::default().render(PromptKind::MockQuestions, &params);
        assert!(prompt.contains("  C++ & <Rust>\n\t\"quoted\" {job}  "));
    }

    #[test]
    fn test_custom_template_override() {
        let templates = PromptTemplates::default()
            .with_template(PromptKind::SoftSkillsFit, "R={resume};J={job}");
        let prompt = templates.render(PromptKind::SoftSkillsFit, &params());
        assert!(prompt.starts_with("R=Software Engineer"));
        assert!(prompt.ends_with(";J=Senior Software Engineer role requiring React and Python."));
    }
}
