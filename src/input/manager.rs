//! Input manager for the resume and job description

use crate::error::{AtsError, Result};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use log::{info, warn};
use std::path::{Path, PathBuf};

pub const RESUME_EXTENSIONS: &[&str] = &["pdf", "txt", "md"];
pub const JOB_EXTENSIONS: &[&str] = &["txt", "md"];

/// Where the job description comes from
#[derive(Debug, Clone)]
pub enum JobSource {
    File(PathBuf),
    Inline(String),
}

impl JobSource {
    pub fn describe(&self) -> String {
        match self {
            JobSource::File(path) => path.display().to_string(),
            JobSource::Inline(_) => "<inline>".to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct InputManager;

impl InputManager {
    pub fn new() -> Self {
        Self
    }

    /// Extract the resume text. Fails with `EmptyExtraction` when the document
    /// holds no text, e.g. a scanned PDF.
    pub async fn extract_resume(&self, path: &Path) -> Result<String> {
        let text = self.extract_text(path).await?;
        if text.trim().is_empty() {
            return Err(AtsError::EmptyExtraction(path.display().to_string()));
        }
        info!("Extracted {} characters from resume", text.len());
        Ok(text)
    }

    /// Read the job description. An empty description is accepted.
    pub async fn read_job_description(&self, source: &JobSource) -> Result<String> {
        let text = match source {
            JobSource::File(path) => {
                match FileType::from_path(path) {
                    Some(FileType::Text) | Some(FileType::Markdown) => {}
                    _ => {
                        return Err(AtsError::UnsupportedFormat(format!(
                            "job description must be one of: {}",
                            JOB_EXTENSIONS.join(", ")
                        )))
                    }
                }
                self.extract_text(path).await?
            }
            JobSource::Inline(text) => text.clone(),
        };

        if text.trim().is_empty() {
            warn!("Job description is empty; the evaluation has nothing to match against");
        }
        Ok(text)
    }

    pub async fn extract_text(&self, path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(AtsError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let file_type = FileType::from_path(path).ok_or_else(|| {
            AtsError::InvalidInput(format!("File has no extension: {}", path.display()))
        })?;

        match file_type {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await
            }
            FileType::Unknown => Err(AtsError::UnsupportedFormat(format!(
                "Unsupported file type for: {}",
                path.display()
            ))),
        }
    }
}
