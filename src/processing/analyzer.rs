//! Analysis engine running the full resume/job alignment pipeline

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::nlp::Annotator;
use crate::processing::document::Document;
use crate::processing::keywords::{extract_keywords, KeywordSet};
use crate::processing::readability::{analyze_readability, ReadabilityReport};
use crate::processing::sections::{section_score, SectionLocator, SectionScore};
use crate::processing::similarity::similarity_score;
use crate::processing::skill_matcher::SkillMatch;
use crate::processing::text_processor::TextProcessor;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

/// Coordinates normalization, keyword extraction, similarity, section and
/// readability analysis over one resume/job pair.
pub struct AnalysisEngine {
    annotator: Arc<dyn Annotator>,
    processor: TextProcessor,
    locators: Vec<SectionLocator>,
    section_window: usize,
    long_sentence_words: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentResult {
    /// Cosine similarity of normalized term counts, 0-100
    pub similarity_score: f64,
    pub skill_match: SkillMatch,
    pub resume_keywords: KeywordSet,
    /// Job keywords absent from the resume
    pub missing_keywords: KeywordSet,
    pub sections: Vec<SectionResult>,
    pub readability: ReadabilityReport,
    pub processing_time_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionResult {
    pub name: String,
    /// Header label that located the section, if any
    pub header: Option<String>,
    pub score: SectionScore,
}

impl AnalysisEngine {
    pub fn new(annotator: Arc<dyn Annotator>, config: &AnalysisConfig) -> Result<Self> {
        let locators = config
            .sections
            .iter()
            .map(SectionLocator::from_rule)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            annotator,
            processor: TextProcessor::new(),
            locators,
            section_window: config.section_window_chars,
            long_sentence_words: config.long_sentence_words,
        })
    }

    pub fn processor(&self) -> &TextProcessor {
        &self.processor
    }

    /// Analyze a resume against a job description
    pub fn analyze(&self, resume: &Document, job: &Document) -> AlignmentResult {
        let start_time = Instant::now();
        log::info!("Analyzing {} against {}", resume.source, job.source);
        for document in [resume, job] {
            log::debug!(
                "{}: {} words, {} characters",
                document.kind,
                document.metadata.word_count,
                document.metadata.character_count
            );
            if document.is_blank() {
                log::warn!("{} ({}) has no analyzable text", document.kind, document.source);
            }
        }

        // 1. Similarity over normalized text
        let similarity_score = similarity_score(&resume.normalized, &job.normalized);
        log::debug!("Similarity score: {:.2}", similarity_score);

        // 2. Keywords from the raw text, where capitalisation still helps tagging
        let annotator = self.annotator.as_ref();
        let resume_keywords = extract_keywords(annotator, &resume.raw);
        let job_keywords = extract_keywords(annotator, &job.raw);
        let missing_keywords = job_keywords.difference(&resume_keywords);
        let skill_match = SkillMatch::from_sets(&resume_keywords, &job_keywords);
        log::debug!(
            "Keywords: {} resume, {} job, {} matched, {} missing",
            resume_keywords.len(),
            job_keywords.len(),
            skill_match.matched.len(),
            missing_keywords.len()
        );

        // 3. Sections on the raw resume
        let sections = self.analyze_sections(&resume.raw, &job_keywords);

        // 4. Readability on the raw resume
        let readability = analyze_readability(annotator, &resume.raw, self.long_sentence_words);

        let processing_time_ms = start_time.elapsed().as_millis() as u64;
        log::info!(
            "Analysis complete in {}ms: similarity {:.2}%, skill match {:.2}%",
            processing_time_ms,
            similarity_score,
            skill_match.coverage
        );

        AlignmentResult {
            similarity_score,
            skill_match,
            resume_keywords,
            missing_keywords,
            sections,
            readability,
            processing_time_ms,
        }
    }

    /// Build both documents from raw text and analyze them
    pub fn analyze_texts(&self, resume_text: &str, job_text: &str) -> AlignmentResult {
        let resume = Document::resume("inline", resume_text.to_string(), &self.processor);
        let job = Document::job_description("inline", job_text.to_string(), &self.processor);
        self.analyze(&resume, &job)
    }

    fn analyze_sections(&self, resume_raw: &str, job_keywords: &KeywordSet) -> Vec<SectionResult> {
        self.locators
            .iter()
            .map(|locator| {
                let span = locator.locate(resume_raw, self.section_window);
                let (header, body) = match &span {
                    Some(span) => (Some(span.header.clone()), span.body),
                    None => {
                        log::warn!("No '{}' section header found in resume", locator.name());
                        (None, "")
                    }
                };

                let score = section_score(self.annotator.as_ref(), &self.processor, body, job_keywords);
                log::debug!("Section {}: {:.2}% ({})", locator.name(), score.coverage, score.tier);

                SectionResult {
                    name: locator.name().to_string(),
                    header,
                    score,
                }
            })
            .collect()
    }
}
