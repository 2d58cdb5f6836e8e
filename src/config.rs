//! Configuration management for smart-ats

use crate::error::{AtsError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const MAX_MATCH_THRESHOLD: u8 = 100;
pub const MAX_YEARS_EXPERIENCE: u8 = 20;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub llm: LlmConfig,
    pub evaluation: EvaluationConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub endpoint: String,
    pub model: String,
    pub timeout_secs: u64,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationConfig {
    pub min_match_threshold: u8,
    pub min_years_experience: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm: LlmConfig {
                endpoint: "https://generativelanguage.googleapis.com/v1beta/models".to_string(),
                model: "gemini-pro".to_string(),
                timeout_secs: 120,
                api_key_env: "GOOGLE_API_KEY".to_string(),
            },
            evaluation: EvaluationConfig {
                min_match_threshold: 60,
                min_years_experience: 7,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load the configuration from `path`, or from the default location.
    /// A missing file is created with the defaults. Values are not range-checked
    /// here so that `config set` and `config reset` can repair a bad file;
    /// callers that evaluate call [`Config::validate`].
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_path);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| AtsError::Configuration(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| AtsError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// Overwrite `config_path` with the defaults.
    pub fn reset(config_path: &Path) -> Result<Self> {
        let config = Self::default();
        config.save_to(config_path)?;
        Ok(config)
    }

    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("smart-ats")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        validate_threshold(self.evaluation.min_match_threshold)?;
        validate_years_experience(self.evaluation.min_years_experience)?;

        if self.llm.timeout_secs == 0 {
            return Err(AtsError::Configuration(
                "llm.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.llm.model.trim().is_empty() {
            return Err(AtsError::Configuration("llm.model must not be empty".to_string()));
        }
        if self.llm.endpoint.trim().is_empty() {
            return Err(AtsError::Configuration("llm.endpoint must not be empty".to_string()));
        }
        Ok(())
    }

    /// Read the API key from the environment. Called once per process.
    pub fn api_key(&self) -> Result<String> {
        match std::env::var(&self.llm.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(AtsError::MissingCredential(self.llm.api_key_env.clone())),
        }
    }

    /// Set a single value addressed by its dotted key, e.g. `evaluation.min_match_threshold`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "llm.endpoint" => self.llm.endpoint = value.to_string(),
            "llm.model" => self.llm.model = value.to_string(),
            "llm.timeout_secs" => self.llm.timeout_secs = parse_value(key, value)?,
            "llm.api_key_env" => self.llm.api_key_env = value.to_string(),
            "evaluation.min_match_threshold" => {
                self.evaluation.min_match_threshold = parse_value(key, value)?
            }
            "evaluation.min_years_experience" => {
                self.evaluation.min_years_experience = parse_value(key, value)?
            }
            "output.format" => self.output.format = parse_output_format(value)?,
            "output.detailed" => self.output.detailed = parse_value(key, value)?,
            "output.color_output" => self.output.color_output = parse_value(key, value)?,
            _ => {
                return Err(AtsError::Configuration(format!(
                    "Unknown configuration key: {}",
                    key
                )))
            }
        }
        self.validate()
    }
}

pub fn validate_threshold(threshold: u8) -> Result<()> {
    if threshold > MAX_MATCH_THRESHOLD {
        return Err(AtsError::InvalidInput(format!(
            "match threshold must be between 0 and {}, got {}",
            MAX_MATCH_THRESHOLD, threshold
        )));
    }
    Ok(())
}

pub fn validate_years_experience(years: u8) -> Result<()> {
    if years > MAX_YEARS_EXPERIENCE {
        return Err(AtsError::InvalidInput(format!(
            "minimum years of experience must be between 0 and {}, got {}",
            MAX_YEARS_EXPERIENCE, years
        )));
    }
    Ok(())
}

/// Parse and validate an output format name
pub fn parse_output_format(format: &str) -> Result<OutputFormat> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(AtsError::InvalidInput(format!(
            "Invalid output format: {}. Supported: console, json, markdown",
            format
        ))),
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| AtsError::Configuration(format!("Invalid value '{}' for {}", value, key)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.evaluation.min_match_threshold, 60);
        assert_eq!(config.evaluation.min_years_experience, 7);
        assert_eq!(config.llm.api_key_env, "GOOGLE_API_KEY");
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load(Some(path.as_path())).unwrap();
        assert!(path.exists());
        assert_eq!(config.llm.model, "gemini-pro");

        let reloaded = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(reloaded.output.format, OutputFormat::Console);
    }

    #[test]
    fn test_out_of_range_file_loads_but_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.evaluation.min_match_threshold = 150;
        let content = toml::to_string_pretty(&config).unwrap();
        std::fs::write(&path, content).unwrap();

        let loaded = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(loaded.evaluation.min_match_threshold, 150);
        assert!(loaded.validate().is_err());
    }

    #[test]
    fn test_reset_repairs_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.evaluation.min_match_threshold = 150;
        std::fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();

        let reset = Config::reset(&path).unwrap();
        assert_eq!(reset.evaluation.min_match_threshold, 60);

        let reloaded = Config::load(Some(path.as_path())).unwrap();
        assert!(reloaded.validate().is_ok());
        assert_eq!(reloaded.evaluation.min_match_threshold, 60);
    }

    #[test]
    fn test_set_repairs_invalid_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.evaluation.min_match_threshold = 150;
        std::fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();

        let mut loaded = Config::load(Some(path.as_path())).unwrap();
        loaded.set("evaluation.min_match_threshold", "80").unwrap();
        loaded.save_to(&path).unwrap();

        let reloaded = Config::load(Some(path.as_path())).unwrap();
        assert!(reloaded.validate().is_ok());
        assert_eq!(reloaded.evaluation.min_match_threshold, 80);
    }

    #[test]
    fn test_set_known_keys() {
        let mut config = Config::default();
        config.set("evaluation.min_match_threshold", "75").unwrap();
        config.set("output.format", "md").unwrap();
        config.set("llm.model", "gemini-1.5-flash").unwrap();

        assert_eq!(config.evaluation.min_match_threshold, 75);
        assert_eq!(config.output.format, OutputFormat::Markdown);
        assert_eq!(config.llm.model, "gemini-1.5-flash");
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("evaluation.min_years_experience", "25").is_err());
        assert!(config.set("llm.timeout_secs", "soon").is_err());
        assert!(config.set("scoring.weight", "1").is_err());
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(parse_output_format("console").unwrap(), OutputFormat::Console);
        assert!(parse_output_format("pdf").is_err());
    }

    #[test]
    fn test_threshold_bounds() {
        assert!(validate_threshold(0).is_ok());
        assert!(validate_threshold(100).is_ok());
        assert!(validate_threshold(101).is_err());
        assert!(validate_years_experience(20).is_ok());
        assert!(validate_years_experience(21).is_err());
    }
}
