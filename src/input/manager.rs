//! Loads resumes and job descriptions from files or inline text

use crate::error::{AnalyzerError, Result};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use crate::processing::document::{Document, DocumentKind};
use crate::processing::text_processor::TextProcessor;
use log::{debug, info};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Where a document's text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(PathBuf),
    /// Text given directly, e.g. a pasted job description
    Inline(String),
}

impl InputSource {
    /// Label recorded on the document and in reports
    pub fn label(&self) -> String {
        match self {
            InputSource::File(path) => path.to_string_lossy().to_string(),
            InputSource::Inline(_) => "inline".to_string(),
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Extracts document text, caching file contents by path
pub struct InputManager {
    cache: HashMap<PathBuf, String>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Build a document of `kind` from `source`.
    ///
    /// Empty text is valid input; scoring treats it as having no terms.
    pub async fn load(
        &mut self,
        kind: DocumentKind,
        source: &InputSource,
        processor: &TextProcessor,
    ) -> Result<Document> {
        let raw = match source {
            InputSource::File(path) => self.extract_text(path).await?,
            InputSource::Inline(text) => {
                info!("Using inline text for {}", kind);
                text.clone()
            }
        };
        debug!("{} from {}: {} characters", kind, source, raw.chars().count());

        Ok(Document::new(kind, source.label(), raw, processor))
    }

    /// Text of a PDF, plain text or Markdown file
    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(path) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        let text = Self::read_file(path).await?;

        if self.enable_cache {
            self.cache.insert(path.to_path_buf(), text.clone());
        }
        Ok(text)
    }

    async fn read_file(path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(AnalyzerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let file_type = FileType::from_path(path).ok_or_else(|| {
            AnalyzerError::InvalidInput(format!("File has no extension: {}", path.display()))
        })?;
        info!("Reading {} file: {}", file_type, path.display());

        match file_type {
            FileType::Pdf => PdfExtractor.extract(path).await,
            FileType::Text => PlainTextExtractor.extract(path).await,
            FileType::Markdown => MarkdownExtractor.extract(path).await,
            FileType::Unknown => Err(AnalyzerError::UnsupportedFormat(format!(
                "Unsupported file type for: {}",
                path.display()
            ))),
        }
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_labels() {
        assert_eq!(InputSource::File(PathBuf::from("cv/jane.pdf")).label(), "cv/jane.pdf");
        assert_eq!(InputSource::Inline("Rust engineer".to_string()).label(), "inline");
    }

    #[tokio::test]
    async fn test_load_inline_job() {
        let mut manager = InputManager::new();
        let source = InputSource::Inline("Senior Rust Engineer, Kafka!".to_string());

        let doc = manager
            .load(DocumentKind::JobDescription, &source, &TextProcessor::new())
            .await
            .unwrap();

        assert_eq!(doc.kind, DocumentKind::JobDescription);
        assert_eq!(doc.source, "inline");
        assert_eq!(doc.normalized, "senior rust engineer kafka");
        assert_eq!(manager.cache_size(), 0);
    }

    #[tokio::test]
    async fn test_load_empty_inline_is_blank() {
        let mut manager = InputManager::new();
        let doc = manager
            .load(DocumentKind::Resume, &InputSource::Inline(String::new()), &TextProcessor::new())
            .await
            .unwrap();

        assert!(doc.is_blank());
    }
}
