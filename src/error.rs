//! Error handling for the screening pipeline

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AtsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("No text could be extracted from {0}")]
    EmptyExtraction(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Missing credential: environment variable {0} is not set")]
    MissingCredential(String),

    #[error("LLM gateway error: {0}")]
    Gateway(String),

    #[error("Could not parse scores from the model reply: {0}")]
    ScoreParse(String),

    #[error("The model returned no category scores")]
    NoScoresReturned,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, AtsError>;

impl From<reqwest::Error> for AtsError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AtsError::Gateway(format!("request timed out: {}", err))
        } else {
            AtsError::Gateway(err.to_string())
        }
    }
}

impl AtsError {
    /// Message shown to the person running the tool, one per error kind.
    pub fn user_message(&self) -> String {
        match self {
            AtsError::EmptyExtraction(source) => format!(
                "The resume '{}' contains no extractable text. Scanned PDFs are not supported; please check your file.",
                source
            ),
            AtsError::PdfExtraction(detail) => {
                format!("The resume PDF could not be read: {}", detail)
            }
            AtsError::UnsupportedFormat(detail) => format!(
                "Unsupported document format ({}). Use a PDF, TXT or Markdown file.",
                detail
            ),
            AtsError::InvalidInput(detail) => format!("Invalid input: {}", detail),
            AtsError::Io(err) => format!("Could not read or write a file: {}", err),
            AtsError::Configuration(detail) => {
                format!("The configuration is invalid: {}", detail)
            }
            AtsError::MissingCredential(var) => format!(
                "No API key found. Export {} before running an evaluation.",
                var
            ),
            AtsError::Gateway(detail) => format!(
                "The language model service failed to answer: {}. Please try again later.",
                detail
            ),
            AtsError::ScoreParse(_) => {
                "Error parsing scores from the model's response. Please resubmit.".to_string()
            }
            AtsError::NoScoresReturned => {
                "The model did not return any category scores. Please resubmit.".to_string()
            }
            AtsError::Serialization(err) => format!("Could not serialize the report: {}", err),
            AtsError::OutputFormatting(detail) => {
                format!("Could not render the report: {}", detail)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_are_distinct() {
        let errors = vec![
            AtsError::EmptyExtraction("resume.pdf".to_string()),
            AtsError::ScoreParse("expected value".to_string()),
            AtsError::NoScoresReturned,
            AtsError::Gateway("503 Service Unavailable".to_string()),
            AtsError::MissingCredential("GOOGLE_API_KEY".to_string()),
        ];

        let messages: std::collections::HashSet<String> =
            errors.iter().map(|e| e.user_message()).collect();
        assert_eq!(messages.len(), errors.len());
    }

    #[test]
    fn test_empty_extraction_names_source() {
        let err = AtsError::EmptyExtraction("scan.pdf".to_string());
        assert!(err.user_message().contains("scan.pdf"));
        assert!(err.to_string().contains("scan.pdf"));
    }
}
