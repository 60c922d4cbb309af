//! Configuration management for the ATS analyzer

use crate::error::{AnalyzerError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub nlp: NlpConfig,
    pub analysis: AnalysisConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NlpConfig {
    /// Optional TOML lexicon merged over the built-in word lists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lexicon_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Sentences with more whitespace-delimited words than this are flagged
    pub long_sentence_words: usize,
    /// Characters taken from a section header onwards
    pub section_window_chars: usize,
    pub sections: Vec<SectionRule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionRule {
    pub name: String,
    /// Header labels in priority order
    pub headers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
    pub missing_keyword_limit: usize,
    #[serde(default = "default_matched_keyword_limit")]
    pub matched_keyword_limit: usize,
}

fn default_matched_keyword_limit() -> usize {
    30
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
    Pdf,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            long_sentence_words: 25,
            section_window_chars: 1000,
            sections: vec![
                SectionRule::new("Projects", &["projects", "project experience", "personal projects", "portfolio"]),
                SectionRule::new("Skills", &["technical skills", "skills", "core competencies", "expertise"]),
                SectionRule::new(
                    "Experience",
                    &["work experience", "professional experience", "experience", "employment history"],
                ),
            ],
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
            missing_keyword_limit: 30,
            matched_keyword_limit: default_matched_keyword_limit(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            nlp: NlpConfig::default(),
            analysis: AnalysisConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl SectionRule {
    pub fn new(name: &str, headers: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults there on first run
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| AnalyzerError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| AnalyzerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("ats-analyzer")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        if self.analysis.section_window_chars == 0 {
            return Err(AnalyzerError::Configuration(
                "analysis.section_window_chars must be greater than zero".to_string(),
            ));
        }
        if self.analysis.long_sentence_words == 0 {
            return Err(AnalyzerError::Configuration(
                "analysis.long_sentence_words must be greater than zero".to_string(),
            ));
        }
        for rule in &self.analysis.sections {
            if !rule.headers.iter().any(|h| !h.trim().is_empty()) {
                return Err(AnalyzerError::Configuration(format!(
                    "Section '{}' needs at least one header label",
                    rule.name
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.analysis.long_sentence_words, 25);
        assert_eq!(config.output.missing_keyword_limit, 30);
        assert_eq!(config.output.matched_keyword_limit, 30);
        assert_eq!(config.analysis.sections.len(), 3);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.analysis.section_window_chars = 640;
        config.output.format = OutputFormat::Markdown;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.analysis.section_window_chars, 640);
        assert_eq!(loaded.output.format, OutputFormat::Markdown);
        assert_eq!(loaded.analysis.sections, config.analysis.sections);
        assert!(loaded.nlp.lexicon_path.is_none());
    }

    #[test]
    fn test_matched_limit_defaults_when_absent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let content = toml::to_string_pretty(&Config::default())
            .unwrap()
            .replace("matched_keyword_limit = 30\n", "");
        std::fs::write(&path, content).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.output.matched_keyword_limit, 30);
    }

    #[test]
    fn test_zero_window_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.analysis.section_window_chars = 0;
        config.save_to(&path).unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(AnalyzerError::Configuration(_))
        ));
    }

    #[test]
    fn test_section_without_headers_is_rejected() {
        let mut config = Config::default();
        config.analysis.sections.push(SectionRule::new("Education", &["  "]));
        assert!(config.validate().is_err());
    }
}
