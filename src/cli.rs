//! CLI interface for the ATS analyzer

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "ats-analyzer")]
#[command(about = "Resume and job description ATS alignment analyzer")]
#[command(
    long_about = "Score a resume against a job description: term similarity, keyword coverage, section alignment and readability tips"
)]
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
    /// Analyze a resume against a job description
    Analyze {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (TXT, MD, PDF)
        #[arg(short, long, required_unless_present = "job_text")]
        job: Option<PathBuf>,

        /// Job description text given inline
        #[arg(long, conflicts_with = "job")]
        job_text: Option<String>,

        /// Output format: console, json, markdown, html, pdf (defaults to the configured format)
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Include per-section scores
        #[arg(short, long)]
        detailed: bool,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "html" => Ok(OutputFormat::Html),
        "pdf" => Ok(OutputFormat::Pdf),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown, html, pdf",
            format
        )),
    }
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

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON"), Ok(OutputFormat::Json));
        assert_eq!(parse_output_format("md"), Ok(OutputFormat::Markdown));
        assert!(parse_output_format("docx").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        let allowed = ["pdf", "txt", "md"];
        assert!(validate_file_extension(Path::new("resume.PDF"), &allowed).is_ok());
        assert!(validate_file_extension(Path::new("resume.docx"), &allowed).is_err());
        assert!(validate_file_extension(Path::new("resume"), &allowed).is_err());
    }

    #[test]
    fn test_analyze_with_inline_job() {
        let cli = Cli::try_parse_from([
            "ats-analyzer",
            "analyze",
            "--resume",
            "cv.pdf",
            "--job-text",
            "Rust engineer",
            "-o",
            "json",
        ])
        .unwrap();

        match cli.command {
            Commands::Analyze { job, job_text, output, .. } => {
                assert!(job.is_none());
                assert_eq!(job_text.as_deref(), Some("Rust engineer"));
                assert_eq!(output.as_deref(), Some("json"));
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_job_source_required_and_exclusive() {
        assert!(Cli::try_parse_from(["ats-analyzer", "analyze", "--resume", "cv.pdf"]).is_err());
        assert!(Cli::try_parse_from([
            "ats-analyzer",
            "analyze",
            "--resume",
            "cv.pdf",
            "--job",
            "job.txt",
            "--job-text",
            "Rust engineer",
        ])
        .is_err());
    }
}
