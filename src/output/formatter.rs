//! Output formatters: console, JSON and Markdown

use crate::config::OutputFormat;
use crate::error::{AtsError, Result};
use crate::output::report::EvaluationReport;
use crate::processing::scores::{AverageSource, Decision};
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting evaluation reports
pub trait OutputFormatter {
    fn format_report(&self, report: &EvaluationReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for scripting and integration
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for saved reports
pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_decision(&self, decision: Decision) -> String {
        let label = decision.to_string().to_uppercase();
        if !self.use_colors {
            return format!("[{}]", label);
        }
        match decision {
            Decision::Accepted => format!("[{}]", label.green().bold()),
            Decision::Rejected => format!("[{}]", label.red().bold()),
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &EvaluationReport) -> Result<String> {
        let evaluation = &report.evaluation;
        let scores = &evaluation.scores;
        let mut output = String::new();

        output.push_str(&self.format_header("SMART ATS EVALUATION", 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.processing_time_ms
        ));

        output.push_str(&self.format_header("Decision", 2));
        output.push_str(&format!(
            "{} average {:.2} vs. threshold {}%\n",
            self.format_decision(evaluation.decision),
            scores.average,
            report.criteria.min_match_threshold
        ));

        output.push_str(&self.format_header("Evaluation", 2));
        output.push_str(evaluation.evaluation.trim_end());
        output.push('\n');

        output.push_str(&self.format_header("Category Breakdown", 2));
        for category in &scores.categories {
            output.push_str(&format!("  • {}: {:.2}\n", category.category, category.score));
        }
        let source = match scores.average_source {
            AverageSource::Reported => "",
            AverageSource::Computed => " (computed)",
        };
        output.push_str(&format!(
            "  • {}: {:.2}{}\n",
            self.colorize("Average Score", Color::Cyan),
            scores.average,
            source
        ));

        output.push_str(&self.format_header("Soft Skills & Cultural Fit", 2));
        output.push_str(evaluation.soft_skills_fit.trim_end());
        output.push('\n');

        output.push_str(&self.format_header("Resume Improvement Suggestions", 2));
        output.push_str(evaluation.improvement_suggestions.trim_end());
        output.push('\n');

        output.push_str(&self.format_header("Mock Interview Questions", 2));
        output.push_str(evaluation.mock_questions.trim_end());
        output.push('\n');

        if self.detailed {
            output.push_str(&self.format_header("Missing Keywords (exact token match)", 3));
            if evaluation.missing_keywords.is_empty() {
                output.push_str(&self.colorize("  None\n", Color::Green));
            } else {
                output.push_str(&format!(
                    "  {}\n",
                    self.colorize(&evaluation.missing_keywords.join(", "), Color::Yellow)
                ));
            }

            output.push_str(&self.format_header("Criteria", 3));
            output.push_str(&format!(
                "  Match threshold: {}%\n  Minimum years of experience: {} (not scored)\n",
                report.criteria.min_match_threshold, report.criteria.min_years_experience
            ));
        }

        output.push_str(&format!(
            "\n{} Generated by smart-ats v{} | Model: {}\n",
            self.colorize("ℹ️", Color::Blue),
            report.metadata.tool_version,
            report.metadata.model
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &EvaluationReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &EvaluationReport) -> Result<String> {
        let evaluation = &report.evaluation;
        let mut md = String::new();

        md.push_str("# Smart ATS Evaluation\n\n");

        md.push_str("### Decision:\n\n");
        md.push_str(&format!(
            "**{}** (average {:.2}, threshold {}%)\n\n",
            evaluation.decision, evaluation.scores.average, report.criteria.min_match_threshold
        ));

        md.push_str(evaluation.evaluation.trim());
        md.push_str("\n\n");

        md.push_str("### Category Breakdown:\n\n");
        for category in &evaluation.scores.categories {
            md.push_str(&format!("- **{}:** {:.2}\n", category.category, category.score));
        }
        md.push_str(&format!("- **Average Score:** {:.2}\n\n", evaluation.scores.average));

        md.push_str("### Soft Skills & Cultural Fit:\n\n");
        md.push_str(evaluation.soft_skills_fit.trim());
        md.push_str("\n\n");

        md.push_str("### Resume Improvement Suggestions:\n\n");
        md.push_str(evaluation.improvement_suggestions.trim());
        md.push_str("\n\n");

        md.push_str("### Mock Interview Questions:\n\n");
        md.push_str(evaluation.mock_questions.trim());
        md.push_str("\n\n");

        md.push_str("### Missing Keywords:\n\n");
        if evaluation.missing_keywords.is_empty() {
            md.push_str("_None_\n");
        } else {
            let quoted: Vec<String> = evaluation
                .missing_keywords
                .iter()
                .map(|k| format!("`{}`", k.replace('`', "'")))
                .collect();
            md.push_str(&quoted.join(", "));
            md.push('\n');
        }

        if self.include_metadata {
            md.push_str("\n---\n\n");
            md.push_str(&format!(
                "_Generated {} by smart-ats v{} with {} in {}ms. Resume: `{}`. Job description: `{}`. Minimum years of experience: {}._\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.tool_version,
                report.metadata.model,
                report.metadata.processing_time_ms,
                report.metadata.resume_file,
                report.metadata.job_source,
                report.criteria.min_years_experience
            ));
        }

        Ok(md)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
        }
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    pub fn generate_report(&self, report: &EvaluationReport, format: &OutputFormat) -> Result<String> {
        let formatter: &dyn OutputFormatter = match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
        };

        if formatter.supports_format() != *format {
            return Err(AtsError::OutputFormatting(format!(
                "no formatter registered for {:?}",
                format
            )));
        }
        formatter.format_report(report)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}_evaluation{}.txt", base_name, timestamp_suffix),
        OutputFormat::Json => format!("{}_evaluation{}.json", base_name, timestamp_suffix),
        OutputFormat::Markdown => format!("{}_evaluation{}.md", base_name, timestamp_suffix),
    }
}
