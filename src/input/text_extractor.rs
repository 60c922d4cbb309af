//! Text extraction from various file formats

use crate::error::{AnalyzerError, Result};
use pulldown_cmark::{html, Parser};
use regex::Regex;
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        let pages = pdf_extract::extract_text_from_mem_by_pages(&bytes).map_err(|e| {
            AnalyzerError::PdfExtraction(format!(
                "Failed to extract text from PDF '{}': {}",
                path.display(),
                e
            ))
        })?;

        Ok(PdfExtractor::join_pages(path, pages))
    }
}

impl PdfExtractor {
    /// Join non-empty pages with a single space. Pages with no text are
    /// skipped; a document with no text at all yields an empty string.
    fn join_pages(path: &Path, pages: Vec<String>) -> String {
        let total = pages.len();
        let mut kept = Vec::with_capacity(total);

        for (index, page) in pages.into_iter().enumerate() {
            if page.trim().is_empty() {
                log::warn!("Page {} of {} has no extractable text", index + 1, path.display());
                continue;
            }
            kept.push(page);
        }

        log::debug!("Extracted {} of {} pages from {}", kept.len(), total, path.display());
        kept.join(" ")
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        Ok(fs::read_to_string(path).await?)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path).await?;
        Ok(Self::markdown_to_text(&markdown_content))
    }
}

impl MarkdownExtractor {
    /// Render to HTML, then strip tags. Block elements become line breaks so
    /// headings stay on their own lines for section lookup.
    pub fn markdown_to_text(markdown: &str) -> String {
        let parser = Parser::new(markdown);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        Self::html_to_text(&html_output)
    }

    fn html_to_text(html: &str) -> String {
        let text = html
            .replace("<br />", "\n")
            .replace("</p>", "\n\n")
            .replace("</li>", "\n")
            .replace("&nbsp;", " ")
            .replace("&amp;", "&")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'");

        let tags = Regex::new(r"<[^>]*>").expect("Invalid tag regex");
        let clean_text = tags.replace_all(&text, "");

        clean_text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_to_text() {
        let text = MarkdownExtractor::markdown_to_text(
            "# Jane Doe\n\n## Skills\n\n- **Rust** &amp; Go\n- Kafka\n\nBuilt *fast* services.",
        );

        assert_eq!(text, "Jane Doe\nSkills\nRust & Go\nKafka\nBuilt fast services.");
    }

    #[test]
    fn test_join_pages_skips_empty() {
        let pages = vec![
            "Page one".to_string(),
            "   \n".to_string(),
            "Page three".to_string(),
        ];
        assert_eq!(
            PdfExtractor::join_pages(Path::new("cv.pdf"), pages),
            "Page one Page three"
        );
        assert_eq!(PdfExtractor::join_pages(Path::new("cv.pdf"), Vec::new()), "");
    }
}
