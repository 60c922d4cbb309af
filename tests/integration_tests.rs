//! Integration tests for the ATS analyzer

use ats_analyzer::config::{AnalysisConfig, NlpConfig, OutputConfig, OutputFormat};
use ats_analyzer::error::AnalyzerError;
use ats_analyzer::input::InputManager;
use ats_analyzer::nlp::{self, RuleBasedAnnotator};
use ats_analyzer::output::formatter::ReportGenerator;
use ats_analyzer::output::AnalysisReport;
use ats_analyzer::processing::analyzer::AnalysisEngine;
use ats_analyzer::processing::readability::{LONG_SENTENCE_TIP, READABILITY_OK_TIP};
use ats_analyzer::processing::similarity::similarity_score;
use ats_analyzer::processing::text_processor::normalize;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

fn engine() -> AnalysisEngine {
    AnalysisEngine::new(Arc::new(RuleBasedAnnotator::default()), &AnalysisConfig::default()).unwrap()
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text = manager.extract_text(path).await.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.md");

    let text = manager.extract_text(path).await.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
    // headings stay on their own lines
    assert!(text.lines().any(|line| line == "Technical Skills"));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text1 = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);

    manager.clear_cache();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_cache_disabled() {
    let mut manager = InputManager::new().with_cache(false);
    manager
        .extract_text(Path::new("tests/fixtures/sample_job.txt"))
        .await
        .unwrap();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let result = manager
        .extract_text(Path::new("tests/fixtures/unsupported.xyz"))
        .await;
    assert!(matches!(result, Err(AnalyzerError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let result = manager
        .extract_text(Path::new("tests/fixtures/nonexistent.txt"))
        .await;
    assert!(matches!(result, Err(AnalyzerError::InvalidInput(_))));
}

#[tokio::test]
async fn test_invalid_pdf_is_an_extraction_error() -> anyhow::Result<()> {
    let mut file = tempfile::Builder::new().suffix(".pdf").tempfile()?;
    writeln!(file, "this is not a pdf")?;

    let mut manager = InputManager::new();
    let result = manager.extract_text(file.path()).await;
    assert!(matches!(result, Err(AnalyzerError::PdfExtraction(_))));
    Ok(())
}

#[tokio::test]
async fn test_fixture_pipeline() -> anyhow::Result<()> {
    let mut manager = InputManager::new();
    let resume = manager
        .extract_text(Path::new("tests/fixtures/sample_resume.txt"))
        .await?;
    let job = manager
        .extract_text(Path::new("tests/fixtures/sample_job.txt"))
        .await?;

    let result = engine().analyze_texts(&resume, &job);

    for keyword in ["react", "typescript", "analytics", "graphql"] {
        assert!(result.skill_match.matched.contains(keyword), "expected match for {}", keyword);
    }
    assert!(result.missing_keywords.contains("kubernetes"));
    // no stemming: "dashboard" in the resume does not cover "dashboards"
    assert!(result.missing_keywords.contains("dashboards"));
    assert!(result.similarity_score > 0.0 && result.similarity_score < 100.0);
    assert!(result.skill_match.coverage > 0.0 && result.skill_match.coverage <= 100.0);

    let headers: Vec<Option<&str>> = result.sections.iter().map(|s| s.header.as_deref()).collect();
    assert_eq!(
        headers,
        vec![Some("projects"), Some("technical skills"), Some("work experience")]
    );
    assert_eq!(result.readability.tips, vec![READABILITY_OK_TIP.to_string()]);

    let report = AnalysisReport::from_alignment(&result, "sample_resume.txt", "sample_job.txt", &OutputConfig::default());
    let json = ReportGenerator::new().generate_report(&report, OutputFormat::Json)?;
    let value: serde_json::Value = serde_json::from_str(&json)?;
    assert_eq!(value["summary"]["missing_count"], result.missing_keywords.len());
    assert_eq!(value["summary"]["matched_count"], result.skill_match.matched.len());
    Ok(())
}

#[test]
fn test_keyword_match_scenario() {
    let result = engine().analyze_texts(
        "I worked on a Python dashboard project for sales analytics.",
        "Looking for a Python developer experienced with dashboards and analytics.",
    );

    assert!(result.skill_match.matched.contains("python"));
    assert!(result.skill_match.matched.contains("analytics"));
    assert!(!result.skill_match.job_keywords.contains("experienced"));
    assert!(result.skill_match.coverage > 0.0);
    assert!(result.similarity_score > 0.0);
}

#[test]
fn test_long_sentence_scenario() {
    let resume = "I built and shipped a customer analytics platform with Python and Rust that \
processed millions of daily events for sales teams across three regions while mentoring four \
junior engineers on testing practices.";
    let result = engine().analyze_texts(resume, "Python engineer");

    assert_eq!(result.readability.tips, vec![LONG_SENTENCE_TIP.to_string()]);
}

#[test]
fn test_function_word_job_has_zero_coverage() {
    let result = engine().analyze_texts("Rust developer with Kafka experience", "and the of with to");

    assert!(result.skill_match.job_keywords.is_empty());
    assert_eq!(result.skill_match.coverage, 0.0);
    assert!(result.missing_keywords.is_empty());
}

#[test]
fn test_similarity_properties() {
    let a = normalize("Senior Rust engineer: async, Tokio & gRPC services.");
    let b = normalize("Rust services engineer (Tokio) wanted");

    assert_eq!(similarity_score(&a, &a), 100.0);
    assert_eq!(similarity_score(&a, &b), similarity_score(&b, &a));
    assert_eq!(similarity_score("", &b), 0.0);
    assert_eq!(normalize(&a), a);
}

#[test]
fn test_punctuation_only_document_scores_zero() {
    let result = engine().analyze_texts("*** --- ///", "Rust engineer");

    assert_eq!(normalize("*** --- ///"), "");
    assert_eq!(result.similarity_score, 0.0);
    assert_eq!(result.skill_match.coverage, 0.0);

    let reversed = engine().analyze_texts("Rust engineer", "!!! ...");
    assert_eq!(reversed.similarity_score, 0.0);
}

#[test]
fn test_broken_lexicon_is_fatal() {
    let config = NlpConfig {
        lexicon_path: Some("tests/fixtures/missing_lexicon.toml".into()),
    };
    assert!(matches!(
        RuleBasedAnnotator::from_config(&config),
        Err(AnalyzerError::AnnotatorUnavailable(_))
    ));
}

#[test]
fn test_shared_annotator_is_reused() {
    let first = nlp::shared(&NlpConfig::default()).unwrap();
    let second = nlp::shared(&NlpConfig::default()).unwrap();
    assert!(std::ptr::eq(
        Arc::as_ptr(&first) as *const (),
        Arc::as_ptr(&second) as *const ()
    ));
}
