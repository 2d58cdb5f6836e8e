//! smart-ats: screen a resume against a job description with an LLM

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use smart_ats::cli::{self, Cli, Commands, ConfigAction};
use smart_ats::config::{parse_output_format, Config, OutputFormat};
use smart_ats::error::{AtsError, Result};
use smart_ats::input::manager::{InputManager, JobSource, JOB_EXTENSIONS, RESUME_EXTENSIONS};
use smart_ats::llm::gateway::{GeminiClient, LlmGateway};
use smart_ats::output::{
    save_report_to_file, suggest_filename, EvaluationReport, ReportGenerator, ReportMetadata,
};
use smart_ats::processing::{EvaluationCriteria, EvaluationRequest, Evaluator};
use std::path::{Path, PathBuf};
use std::process;
use std::time::{Duration, Instant};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);

    let resetting = matches!(
        cli.command,
        Commands::Config {
            action: Some(ConfigAction::Reset)
        }
    );

    let config = match Config::load(Some(config_path.as_path())) {
        Ok(config) => config,
        Err(e) if resetting => {
            warn!("Ignoring unreadable configuration before reset: {}", e);
            Config::default()
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            eprintln!("{} {}", "❌".red(), e.user_message());
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {}", e);
        eprintln!("{} {}", "❌".red(), e.user_message());
        process::exit(1);
    }
}

async fn run_command(command: Commands, mut config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Evaluate {
            resume,
            job,
            job_text,
            threshold,
            min_experience,
            model,
            output,
            detailed,
            save,
            no_color,
        } => {
            cli::validate_file_extension(&resume, RESUME_EXTENSIONS)
                .map_err(|e| AtsError::InvalidInput(format!("Resume file: {}", e)))?;

            let job_source = match (job, job_text) {
                (Some(path), _) => {
                    cli::validate_file_extension(&path, JOB_EXTENSIONS).map_err(|e| {
                        AtsError::InvalidInput(format!("Job description file: {}", e))
                    })?;
                    JobSource::File(path)
                }
                (None, Some(text)) => JobSource::Inline(text),
                (None, None) => {
                    return Err(AtsError::InvalidInput(
                        "a job description file or inline text is required".to_string(),
                    ))
                }
            };

            let output_format = match output {
                Some(name) => parse_output_format(&name)?,
                None => config.output.format,
            };

            if let Some(model) = model {
                config.llm.model = model;
            }
            if let Some(threshold) = threshold {
                config.evaluation.min_match_threshold = threshold;
            }
            if let Some(years) = min_experience {
                config.evaluation.min_years_experience = years;
            }
            config.validate()?;

            let use_colors = !no_color && config.output.color_output;
            if !use_colors {
                colored::control::set_override(false);
            }

            let options = EvaluateOptions {
                resume,
                job_source,
                output_format,
                detailed: detailed || config.output.detailed,
                use_colors,
                save,
            };
            evaluate(&config, options).await?;
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration ({})\n", config_path.display());
                println!("Model: {}", config.llm.model);
                println!("Endpoint: {}", config.llm.endpoint);
                println!("Timeout: {}s", config.llm.timeout_secs);
                println!("API key variable: {}", config.llm.api_key_env);
                println!("\nEvaluation:");
                println!("  Match threshold: {}%", config.evaluation.min_match_threshold);
                println!("  Minimum years of experience: {}", config.evaluation.min_years_experience);
                println!("\nOutput:");
                println!("  Format: {:?}", config.output.format);
                println!("  Detailed: {}", config.output.detailed);
                println!("  Colors: {}", config.output.color_output);
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::reset(config_path)?;
                println!("✅ Configuration reset successfully!");
            }

            Some(ConfigAction::Set { key, value }) => {
                config.set(&key, &value)?;
                config.save_to(config_path)?;
                println!("✅ {} = {}", key, value);
            }
        },
    }

    Ok(())
}

struct EvaluateOptions {
    resume: PathBuf,
    job_source: JobSource,
    output_format: OutputFormat,
    detailed: bool,
    use_colors: bool,
    save: Option<PathBuf>,
}

async fn evaluate(config: &Config, options: EvaluateOptions) -> Result<()> {
    let api_key = config.api_key()?;
    let gateway = GeminiClient::new(&config.llm, api_key)?;

    info!("Evaluating {} with {}", options.resume.display(), gateway.model_name());

    let input_manager = InputManager::new();
    let resume_text = input_manager.extract_resume(&options.resume).await?;
    let job_text = input_manager.read_job_description(&options.job_source).await?;

    let criteria = EvaluationCriteria::from(&config.evaluation);
    let request = EvaluationRequest {
        resume_text,
        job_text,
        criteria,
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner.set_message("Analyzing your resume...");

    let progress = spinner.clone();
    let evaluator = Evaluator::new(gateway).with_progress(move |kind| {
        progress.set_message(format!("Analyzing your resume: {}...", kind));
    });

    let started = Instant::now();
    let result = evaluator.evaluate(&request).await;
    spinner.finish_and_clear();
    let evaluation = result?;

    let metadata = ReportMetadata::new(
        options.resume.display().to_string(),
        options.job_source.describe(),
        evaluator.gateway().model_name().to_string(),
        started.elapsed().as_millis() as u64,
    );
    let report = EvaluationReport::new(metadata, criteria, evaluation);

    let generator = ReportGenerator::with_options(options.use_colors, options.detailed, true, true);
    let rendered = generator.generate_report(&report, &options.output_format)?;
    println!("{}", rendered);

    if let Some(mut path) = options.save {
        if path.is_dir() {
            let resume_name = options.resume.display().to_string();
            path = path.join(suggest_filename(&options.output_format, &resume_name, true));
        }
        // Saved console reports are written without color codes.
        let content = if options.output_format == OutputFormat::Console {
            ReportGenerator::with_options(false, options.detailed, true, true)
                .generate_report(&report, &options.output_format)?
        } else {
            rendered
        };
        save_report_to_file(&content, &path)?;
        eprintln!("✅ Report saved to {}", path.display());
    }

    Ok(())
}
