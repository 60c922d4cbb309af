//! Rule-based readability observations

use crate::nlp::{Annotator, Dependency};
use serde::{Deserialize, Serialize};

pub const LONG_SENTENCE_TIP: &str =
    "Your resume has very long sentences. Try breaking them into shorter ones.";
pub const PASSIVE_VOICE_TIP: &str =
    "Try to reduce passive voice. Use active voice to sound more confident.";
pub const READABILITY_OK_TIP: &str =
    "Your resume readability looks good. Minor improvements can enhance clarity.";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadabilityReport {
    /// Never empty; ordered long-sentence, passive-voice, then the fallback
    pub tips: Vec<String>,
    pub long_sentence_count: usize,
    pub passive_marker_count: usize,
}

/// Count sentences over `max_words` whitespace-delimited words and passive
/// auxiliaries, and turn the counts into tips.
pub fn analyze_readability(annotator: &dyn Annotator, text: &str, max_words: usize) -> ReadabilityReport {
    let annotation = annotator.annotate(text);
    if annotation.is_empty() {
        return ReadabilityReport {
            tips: vec![READABILITY_OK_TIP.to_string()],
            ..ReadabilityReport::default()
        };
    }

    let mut long_sentence_count = 0;
    let mut passive_marker_count = 0;
    for sentence in &annotation.sentences {
        if sentence.text.split_whitespace().count() > max_words {
            long_sentence_count += 1;
        }
        passive_marker_count += annotation
            .sentence_tokens(sentence)
            .iter()
            .filter(|t| t.dep == Dependency::AuxPass)
            .count();
    }

    log::debug!(
        "Readability: {} sentences, {} long, {} passive markers",
        annotation.sentences.len(),
        long_sentence_count,
        passive_marker_count
    );

    let mut tips = Vec::new();
    if long_sentence_count > 0 {
        tips.push(LONG_SENTENCE_TIP.to_string());
    }
    if passive_marker_count > 0 {
        tips.push(PASSIVE_VOICE_TIP.to_string());
    }
    if tips.is_empty() {
        tips.push(READABILITY_OK_TIP.to_string());
    }

    ReadabilityReport {
        tips,
        long_sentence_count,
        passive_marker_count,
    }
}

pub fn readability_tips(annotator: &dyn Annotator, text: &str, max_words: usize) -> Vec<String> {
    analyze_readability(annotator, text, max_words).tips
}
