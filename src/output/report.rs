//! Report structures consumed by the output formatters

use crate::config::OutputConfig;
use crate::processing::analyzer::AlignmentResult;
use crate::processing::sections::SectionTier;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Shown instead of a keyword list when nothing is missing
pub const NO_MISSING_KEYWORDS: &str = "Great! Your resume matches most of the required keywords.";

/// Everything a renderer needs, with keyword lists already sorted and bounded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub summary: ReportSummary,
    /// First `matched_keyword_limit` matched keywords, sorted
    pub matched_keywords: Vec<String>,
    /// First `missing_keyword_limit` missing keywords, sorted
    pub missing_keywords: Vec<String>,
    pub sections: Vec<SectionReport>,
    pub readability_tips: Vec<String>,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    pub similarity_score: f64,
    pub skill_match_percent: f64,
    pub matched_count: usize,
    /// Size of the full missing set, before truncation
    pub missing_count: usize,
    pub verdict: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionReport {
    pub name: String,
    pub header: Option<String>,
    pub score: f64,
    pub tier: SectionTier,
    pub feedback: String,
    pub matched: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub tool_version: String,
    pub resume_source: String,
    pub job_source: String,
    pub processing_time_ms: u64,
}

impl AnalysisReport {
    pub fn from_alignment(
        result: &AlignmentResult,
        resume_source: &str,
        job_source: &str,
        limits: &OutputConfig,
    ) -> Self {
        let summary = ReportSummary {
            similarity_score: result.similarity_score,
            skill_match_percent: result.skill_match.coverage,
            matched_count: result.skill_match.matched.len(),
            missing_count: result.missing_keywords.len(),
            verdict: Self::verdict(result.similarity_score).to_string(),
        };

        let sections = result
            .sections
            .iter()
            .map(|section| SectionReport {
                name: section.name.clone(),
                header: section.header.clone(),
                score: section.score.coverage,
                tier: section.score.tier,
                feedback: section.score.tier.feedback().to_string(),
                matched: section.score.matched.top(usize::MAX),
            })
            .collect();

        Self {
            summary,
            matched_keywords: result.skill_match.matched.top(limits.matched_keyword_limit),
            missing_keywords: result.missing_keywords.top(limits.missing_keyword_limit),
            sections,
            readability_tips: result.readability.tips.clone(),
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                tool_version: env!("CARGO_PKG_VERSION").to_string(),
                resume_source: resume_source.to_string(),
                job_source: job_source.to_string(),
                processing_time_ms: result.processing_time_ms,
            },
        }
    }

    pub fn verdict(similarity_score: f64) -> &'static str {
        if similarity_score >= 75.0 {
            "Strong match - your resume mirrors the job description closely"
        } else if similarity_score >= 50.0 {
            "Good match - a few targeted additions would help"
        } else if similarity_score >= 30.0 {
            "Partial match - work more of the job's language into your resume"
        } else {
            "Weak match - the resume needs substantial tailoring for this role"
        }
    }

    /// Keywords omitted from `missing_keywords` by the limit
    pub fn truncated_missing(&self) -> usize {
        self.summary.missing_count.saturating_sub(self.missing_keywords.len())
    }

    pub fn truncated_matched(&self) -> usize {
        self.summary.matched_count.saturating_sub(self.matched_keywords.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::nlp::RuleBasedAnnotator;
    use crate::processing::analyzer::AnalysisEngine;
    use std::sync::Arc;

    fn limits(matched: usize, missing: usize) -> OutputConfig {
        OutputConfig {
            matched_keyword_limit: matched,
            missing_keyword_limit: missing,
            ..OutputConfig::default()
        }
    }

    fn alignment() -> AlignmentResult {
        let engine =
            AnalysisEngine::new(Arc::new(RuleBasedAnnotator::default()), &AnalysisConfig::default()).unwrap();
        engine.analyze_texts(
            "Skills\nRust, Kafka\nBuilt event pipelines for payments.",
            "Rust engineer with Kafka, Terraform, Kubernetes, Grafana and Prometheus experience",
        )
    }

    #[test]
    fn test_verdict_tiers() {
        assert!(AnalysisReport::verdict(80.0).starts_with("Strong"));
        assert!(AnalysisReport::verdict(75.0).starts_with("Strong"));
        assert!(AnalysisReport::verdict(50.0).starts_with("Good"));
        assert!(AnalysisReport::verdict(30.0).starts_with("Partial"));
        assert!(AnalysisReport::verdict(0.0).starts_with("Weak"));
    }

    #[test]
    fn test_missing_keywords_are_bounded_and_sorted() {
        let result = alignment();
        let report = AnalysisReport::from_alignment(&result, "resume.txt", "job.txt", &limits(30, 2));

        assert_eq!(report.missing_keywords.len(), 2);
        assert_eq!(report.summary.missing_count, result.missing_keywords.len());
        assert_eq!(report.truncated_missing(), result.missing_keywords.len() - 2);

        let mut sorted = report.missing_keywords.clone();
        sorted.sort();
        assert_eq!(report.missing_keywords, sorted);
    }

    #[test]
    fn test_matched_keywords_are_bounded() {
        let result = alignment();
        assert_eq!(result.skill_match.matched.top(10), vec!["kafka", "rust"]);

        let report = AnalysisReport::from_alignment(&result, "resume.txt", "job.txt", &limits(1, 30));
        assert_eq!(report.matched_keywords, vec!["kafka".to_string()]);
        assert_eq!(report.summary.matched_count, 2);
        assert_eq!(report.truncated_matched(), 1);
    }

    #[test]
    fn test_sections_carry_feedback() {
        let report = AnalysisReport::from_alignment(&alignment(), "resume.txt", "job.txt", &OutputConfig::default());

        assert_eq!(report.sections.len(), 3);
        let skills = report.sections.iter().find(|s| s.name == "Skills").unwrap();
        assert_eq!(skills.header.as_deref(), Some("skills"));
        assert_eq!(skills.feedback, skills.tier.feedback());
        assert!(skills.matched.contains(&"kafka".to_string()));
        assert_eq!(report.metadata.tool_version, env!("CARGO_PKG_VERSION"));
    }
}
