//! Header-based section location and section scoring

use crate::config::SectionRule;
use crate::error::{AnalyzerError, Result};
use crate::nlp::Annotator;
use crate::processing::keywords::{extract_keywords, KeywordSet};
use crate::processing::skill_matcher::coverage_percent;
use crate::processing::text_processor::TextProcessor;
use aho_corasick::AhoCorasick;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionTier {
    Strong,
    Moderate,
    Low,
}

impl SectionTier {
    pub fn from_coverage(coverage: f64) -> Self {
        if coverage >= 60.0 {
            SectionTier::Strong
        } else if coverage >= 30.0 {
            SectionTier::Moderate
        } else {
            SectionTier::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SectionTier::Strong => "strong",
            SectionTier::Moderate => "moderate",
            SectionTier::Low => "low",
        }
    }

    pub fn feedback(&self) -> &'static str {
        match self {
            SectionTier::Strong => "This section aligns strongly with the job description.",
            SectionTier::Moderate => {
                "This section partially aligns. Work in more of the terms the job description uses."
            }
            SectionTier::Low => {
                "This section barely reflects the job description. Add the relevant skills and tools."
            }
        }
    }
}

impl fmt::Display for SectionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionScore {
    pub coverage: f64,
    pub tier: SectionTier,
    /// Job keywords found inside the section body
    pub matched: KeywordSet,
}

/// A located section: the header label that matched and the window of text
/// starting at it.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionSpan<'t> {
    pub header: String,
    pub offset: usize,
    pub body: &'t str,
}

/// Case-insensitive search for one section's header labels
pub struct SectionLocator {
    name: String,
    labels: Vec<String>,
    matcher: AhoCorasick,
}

impl SectionLocator {
    /// Labels are tried in the order given; blank labels are ignored.
    pub fn new(name: impl Into<String>, headers: &[String]) -> Result<Self> {
        let name = name.into();
        let labels: Vec<String> = headers
            .iter()
            .filter(|h| !h.trim().is_empty())
            .cloned()
            .collect();

        if labels.is_empty() {
            return Err(AnalyzerError::Configuration(format!(
                "Section '{}' has no header labels",
                name
            )));
        }

        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&labels)
            .map_err(|e| {
                AnalyzerError::Configuration(format!(
                    "Failed to build header matcher for '{}': {}",
                    name, e
                ))
            })?;

        Ok(Self { name, labels, matcher })
    }

    pub fn from_rule(rule: &SectionRule) -> Result<Self> {
        Self::new(rule.name.clone(), &rule.headers)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Find the highest-priority label present anywhere in `text` and take
    /// up to `window` characters from its earliest occurrence. The window is
    /// clamped to the end of the text.
    pub fn locate<'t>(&self, text: &'t str, window: usize) -> Option<SectionSpan<'t>> {
        let best = self
            .matcher
            .find_overlapping_iter(text)
            .min_by_key(|m| (m.pattern().as_usize(), m.start()))?;

        let start = best.start();
        let rest = &text[start..];
        let end = rest
            .char_indices()
            .nth(window)
            .map(|(i, _)| start + i)
            .unwrap_or(text.len());

        Some(SectionSpan {
            header: self.labels[best.pattern().as_usize()].clone(),
            offset: start,
            body: &text[start..end],
        })
    }
}

/// Score a section body against the job description's keywords.
///
/// The body is normalized before keyword extraction; the coverage formula is
/// the same one used for overall skill matching.
pub fn section_score(
    annotator: &dyn Annotator,
    processor: &TextProcessor,
    section_text: &str,
    job_keywords: &KeywordSet,
) -> SectionScore {
    let normalized = processor.normalize(section_text);
    let section_keywords = extract_keywords(annotator, &normalized);
    let matched = section_keywords.intersection(job_keywords);
    let coverage = coverage_percent(matched.len(), job_keywords.len());

    SectionScore {
        coverage,
        tier: SectionTier::from_coverage(coverage),
        matched,
    }
}
