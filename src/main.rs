//! ats-analyzer: resume and job description ATS alignment analyzer

use ats_analyzer::cli::{self, Cli, Commands, ConfigAction};
use ats_analyzer::config::{Config, OutputFormat};
use ats_analyzer::error::{AnalyzerError, Result};
use ats_analyzer::input::{InputManager, InputSource};
use ats_analyzer::nlp;
use ats_analyzer::output::formatter::{save_report_to_file, suggest_filename, ReportGenerator};
use ats_analyzer::output::AnalysisReport;
use ats_analyzer::processing::analyzer::AnalysisEngine;
use ats_analyzer::processing::document::DocumentKind;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::error;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, cli.config, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config_path: Option<PathBuf>, config: Config) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            job_text,
            output,
            save,
            detailed,
        } => {
            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(AnalyzerError::InvalidInput)?,
                None => config.output.format,
            };
            cli::validate_file_extension(&resume, &["pdf", "txt", "md"])
                .map_err(|e| AnalyzerError::InvalidInput(format!("Resume file: {}", e)))?;
            if let Some(job) = &job {
                cli::validate_file_extension(job, &["pdf", "txt", "md"])
                    .map_err(|e| AnalyzerError::InvalidInput(format!("Job description file: {}", e)))?;
            }

            // A broken annotator must fail before any input is read
            let annotator = nlp::shared(&config.nlp)?;
            let engine = AnalysisEngine::new(annotator, &config.analysis)?;

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed}]")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            spinner.enable_steady_tick(Duration::from_millis(100));
            spinner.set_message("Extracting text...");

            let resume_source = InputSource::File(resume);
            let job_source = match (job, job_text) {
                (Some(path), _) => InputSource::File(path),
                (None, Some(text)) => InputSource::Inline(text),
                (None, None) => {
                    spinner.finish_and_clear();
                    return Err(AnalyzerError::InvalidInput(
                        "A job description is required (--job or --job-text)".to_string(),
                    ));
                }
            };

            let mut input_manager = InputManager::new();
            let resume_doc = input_manager
                .load(DocumentKind::Resume, &resume_source, engine.processor())
                .await?;
            let job_doc = input_manager
                .load(DocumentKind::JobDescription, &job_source, engine.processor())
                .await?;

            spinner.set_message("Analyzing resume...");
            let result = engine.analyze(&resume_doc, &job_doc);
            spinner.finish_and_clear();

            let report = AnalysisReport::from_alignment(
                &result,
                &resume_doc.source,
                &job_doc.source,
                &config.output,
            );
            let generator = ReportGenerator::with_options(
                config.output.color_output,
                detailed || config.output.detailed,
            );

            let save_path = match (save, output_format) {
                (Some(path), _) => Some(path),
                (None, OutputFormat::Pdf) => Some(PathBuf::from(suggest_filename(
                    OutputFormat::Pdf,
                    &resume_doc.source,
                ))),
                (None, _) => None,
            };

            match save_path {
                Some(path) => {
                    let bytes = generator.generate_bytes(&report, output_format)?;
                    save_report_to_file(&bytes, &path)?;
                    println!("Report saved to {}", path.display());
                }
                None => {
                    println!("{}", generator.generate_report(&report, output_format)?);
                }
            }
        }

        Commands::Config { action } => {
            let path = config_path.unwrap_or_else(Config::config_path);
            match action {
                Some(ConfigAction::Show) | None => {
                    println!("Configuration ({})\n", path.display());
                    print_config(&config);
                }
                Some(ConfigAction::Reset) => {
                    Config::default().save_to(&path)?;
                    println!("Configuration reset to defaults at {}", path.display());
                }
                Some(ConfigAction::Path) => {
                    println!("{}", path.display());
                }
            }
        }
    }

    Ok(())
}

fn print_config(config: &Config) {
    match &config.nlp.lexicon_path {
        Some(path) => println!("Lexicon: {}", path.display()),
        None => println!("Lexicon: built-in"),
    }
    println!("Long sentence threshold: {} words", config.analysis.long_sentence_words);
    println!("Section window: {} characters", config.analysis.section_window_chars);
    println!("\nSections:");
    for rule in &config.analysis.sections {
        println!("  {}: {}", rule.name, rule.headers.join(", "));
    }
    println!("\nOutput:");
    println!("  Format: {:?}", config.output.format);
    println!("  Detailed: {}", config.output.detailed);
    println!("  Colors: {}", config.output.color_output);
    println!("  Missing keyword limit: {}", config.output.missing_keyword_limit);
    println!("  Matched keyword limit: {}", config.output.matched_keyword_limit);
}
