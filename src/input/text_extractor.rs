//! Text extraction from various file formats

use crate::error::{AtsError, Result};
use pulldown_cmark::{html, Parser};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tokio::fs;

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("Invalid HTML tag regex"));

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        extract_pdf_bytes(&bytes).map_err(|e| match e {
            AtsError::PdfExtraction(detail) => AtsError::PdfExtraction(format!(
                "Failed to extract text from PDF '{}': {}",
                path.display(),
                detail
            )),
            other => other,
        })
    }
}

/// Extract the text of every page, concatenated in page order.
pub fn extract_pdf_bytes(bytes: &[u8]) -> Result<String> {
    pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| AtsError::PdfExtraction(e.to_string()))
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path).await?;
        Ok(content)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path).await?;
        Ok(markdown_to_text(&markdown_content))
    }
}

/// Render Markdown and strip the markup, one non-empty line per block.
pub fn markdown_to_text(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    let text = html_output
        .replace("<br>", "\n")
        .replace("<br />", "\n")
        .replace("</p>", "\n\n")
        .replace("</li>", "\n");

    let clean_text = HTML_TAG.replace_all(&text, "");
    let clean_text = clean_text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");

    let lines: Vec<String> = clean_text
        .lines()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect();

    lines.join("\n")
}
