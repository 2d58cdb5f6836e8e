//! Local keyword gap between the job description and the resume

use std::collections::BTreeSet;

/// Words of the job description that never appear in the resume.
///
/// Both texts are lowercased and split on whitespace, nothing else: no
/// punctuation stripping and no stemming, so `"skills,"` and `"skills"` are
/// different tokens.
pub fn missing_keywords(resume_text: &str, job_text: &str) -> BTreeSet<String> {
    let resume_tokens = tokenize(resume_text);
    tokenize(job_text)
        .into_iter()
        .filter(|token| !resume_tokens.contains(token))
        .collect()
}

fn tokenize(text: &str) -> BTreeSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
