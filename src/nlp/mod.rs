//! Annotation capability: tokenisation, POS tags, sentences, dependency labels

pub mod annotation;
pub mod lexicon;
pub mod tagger;

pub use annotation::{Annotation, Annotator, Dependency, PosTag, Sentence, Token};
pub use tagger::RuleBasedAnnotator;

use crate::config::NlpConfig;
use crate::error::{AnalyzerError, Result};
use std::sync::{Arc, OnceLock};

static SHARED: OnceLock<(NlpConfig, Arc<RuleBasedAnnotator>)> = OnceLock::new();

/// Process-wide annotator, built on first call and reused afterwards.
///
/// The lexicon is never reloaded for the lifetime of the process, so a later
/// call with a different configuration is `AnnotatorUnavailable`. Call this
/// once at startup so a broken lexicon fails before any analysis runs.
pub fn shared(config: &NlpConfig) -> Result<Arc<dyn Annotator>> {
    let (initial, annotator) = match SHARED.get() {
        Some(entry) => entry,
        None => {
            let built = Arc::new(RuleBasedAnnotator::from_config(config)?);
            let entry = SHARED.get_or_init(|| (config.clone(), built));
            log::info!("Annotator '{}' initialised", entry.1.name());
            entry
        }
    };

    if initial != config {
        return Err(AnalyzerError::AnnotatorUnavailable(format!(
            "annotator already initialised with lexicon {}, cannot switch to {}",
            describe_lexicon(initial),
            describe_lexicon(config)
        )));
    }

    let annotator: Arc<dyn Annotator> = annotator.clone();
    Ok(annotator)
}

fn describe_lexicon(config: &NlpConfig) -> String {
    match &config.lexicon_path {
        Some(path) => format!("'{}'", path.display()),
        None => "built-in".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_returns_same_instance() {
        let first = shared(&NlpConfig::default()).unwrap();
        let second = shared(&NlpConfig::default()).unwrap();
        assert_eq!(
            Arc::as_ptr(&first) as *const (),
            Arc::as_ptr(&second) as *const ()
        );
        assert_eq!(first.name(), "rule-based");
    }

    #[test]
    fn test_different_config_after_init_is_rejected() {
        shared(&NlpConfig::default()).unwrap();

        let other = NlpConfig {
            lexicon_path: Some("does/not/exist.toml".into()),
        };
        assert!(matches!(shared(&other), Err(AnalyzerError::AnnotatorUnavailable(_))));
        assert!(shared(&NlpConfig::default()).is_ok());
    }
}
