//! Document structures

use crate::processing::text_processor::TextProcessor;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentKind {
    Resume,
    JobDescription,
}

/// Immutable text with its raw and normalized views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub kind: DocumentKind,
    /// Where the text came from (a path, or "inline")
    pub source: String,
    pub raw: String,
    pub normalized: String,
    pub metadata: DocumentMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub word_count: usize,
    pub character_count: usize,
}

impl Document {
    pub fn new(kind: DocumentKind, source: impl Into<String>, raw: String, processor: &TextProcessor) -> Self {
        let normalized = processor.normalize(&raw);
        let word_count = raw.split_whitespace().count();
        let character_count = raw.chars().count();

        Self {
            kind,
            source: source.into(),
            raw,
            normalized,
            metadata: DocumentMetadata {
                word_count,
                character_count,
            },
        }
    }

    pub fn resume(source: impl Into<String>, raw: String, processor: &TextProcessor) -> Self {
        Self::new(DocumentKind::Resume, source, raw, processor)
    }

    pub fn job_description(source: impl Into<String>, raw: String, processor: &TextProcessor) -> Self {
        Self::new(DocumentKind::JobDescription, source, raw, processor)
    }

    /// True when normalization leaves nothing to count
    pub fn is_blank(&self) -> bool {
        self.normalized.is_empty()
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Resume => write!(f, "Resume"),
            DocumentKind::JobDescription => write!(f, "Job Description"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_creation() {
        let processor = TextProcessor::new();
        let content = "John Doe\nSoftware Engineer\n\nSkills:\nRust, Python, JavaScript".to_string();
        let doc = Document::resume("resume.txt", content.clone(), &processor);

        assert_eq!(doc.raw, content);
        assert_eq!(doc.kind, DocumentKind::Resume);
        assert_eq!(doc.normalized, "john doe software engineer skills rust python javascript");
        assert_eq!(doc.metadata.word_count, 8);
        assert!(!doc.is_blank());
    }

    #[test]
    fn test_blank_document() {
        let processor = TextProcessor::new();
        let doc = Document::job_description("inline", "  ***  ".to_string(), &processor);

        assert!(doc.is_blank());
        assert_eq!(doc.kind.to_string(), "Job Description");
    }
}
