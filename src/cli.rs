//! CLI interface for smart-ats

use clap::{ArgGroup, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "smart-ats")]
#[command(about = "Screen a resume against a job description with an LLM")]
#[command(long_about = "Evaluate a resume against a job description: match decision, category scores, soft-skill fit, improvement suggestions and mock interview questions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate a resume against a job description
    #[command(group(ArgGroup::new("job_input").required(true).args(["job", "job_text"])))]
    Evaluate {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (TXT, MD)
        #[arg(short, long)]
        job: Option<PathBuf>,

        /// Job description given inline
        #[arg(long)]
        job_text: Option<String>,

        /// Overall matching threshold percentage (0-100)
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=100))]
        threshold: Option<u8>,

        /// Minimum years of experience (0-20)
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=20))]
        min_experience: Option<u8>,

        /// Model to use instead of the configured one
        #[arg(short, long)]
        model: Option<String>,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Include the locally computed missing keywords
        #[arg(short, long)]
        detailed: bool,

        /// Save output to a file, or into a directory under a generated name
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Disable colored console output
        #[arg(long)]
        no_color: bool,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Reset configuration to defaults
    Reset,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "evaluation.min_match_threshold")
        key: String,

        /// Configuration value
        value: String,
    },
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_evaluate_requires_job_input() {
        let result = Cli::try_parse_from(["smart-ats", "evaluate", "--resume", "cv.pdf"]);
        assert!(result.is_err());

        let result = Cli::try_parse_from([
            "smart-ats", "evaluate", "--resume", "cv.pdf", "--job-text", "Rust developer",
        ]);
        assert!(result.is_ok());
    }

    #[test]
    fn test_threshold_range_enforced() {
        let result = Cli::try_parse_from([
            "smart-ats", "evaluate", "-r", "cv.pdf", "-j", "jd.txt", "--threshold", "101",
        ]);
        assert!(result.is_err());

        let cli = Cli::try_parse_from([
            "smart-ats", "evaluate", "-r", "cv.pdf", "-j", "jd.txt", "--threshold", "70",
        ])
        .unwrap();
        match cli.command {
            Commands::Evaluate { threshold, .. } => assert_eq!(threshold, Some(70)),
            _ => panic!("expected evaluate command"),
        }
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("cv.PDF"), &["pdf", "txt"]).is_ok());
        assert!(validate_file_extension(Path::new("cv.docx"), &["pdf", "txt"]).is_err());
        assert!(validate_file_extension(Path::new("cv"), &["pdf"]).is_err());
    }
}
