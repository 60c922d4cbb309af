//! Word lists backing the rule-based tagger

use crate::error::{AnalyzerError, Result};
use crate::nlp::annotation::PosTag;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "each", "every", "any",
    "some", "no", "all", "both", "either", "neither", "another", "such", "what",
    "which", "whose",
];

const POSSESSIVES: &[&str] = &["my", "your", "his", "her", "its", "our", "their"];

const PRONOUNS: &[&str] = &[
    "i", "me", "you", "he", "him", "she", "it", "we", "us", "they", "them",
    "myself", "yourself", "himself", "herself", "itself", "ourselves",
    "themselves", "who", "whom", "mine", "yours", "hers", "ours", "theirs",
    "someone", "anyone", "everyone", "something", "anything", "everything",
    "nothing", "nobody",
];

const ADPOSITIONS: &[&str] = &[
    "of", "in", "on", "at", "by", "for", "with", "from", "to", "into", "onto",
    "upon", "about", "above", "below", "across", "after", "against", "along",
    "among", "around", "before", "behind", "beneath", "beside", "between",
    "beyond", "during", "except", "inside", "near", "off", "out", "outside",
    "over", "past", "through", "throughout", "toward", "towards", "under",
    "up", "via", "within", "without", "per", "like", "including",
];

const COORDINATORS: &[&str] = &["and", "or", "but", "nor", "yet", "plus"];

const SUBORDINATORS: &[&str] = &[
    "if", "because", "although", "though", "while", "whereas", "unless",
    "whether", "when", "where", "once", "than", "as", "so",
];

pub(crate) const BE_FORMS: &[&str] = &["am", "is", "are", "was", "were", "be", "been", "being"];

const AUXILIARIES: &[&str] = &[
    "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "will", "would", "shall", "should",
    "can", "could", "may", "might", "must",
];

pub(crate) const MODALS: &[&str] = &[
    "will", "would", "shall", "should", "can", "could", "may", "might", "must",
];

const PARTICLES: &[&str] = &["not", "n't"];

const ADVERBS: &[&str] = &[
    "very", "also", "too", "just", "only", "really", "quite", "rather", "often",
    "always", "never", "sometimes", "usually", "here", "there", "now", "then",
    "already", "still", "even", "again", "ever", "soon", "well", "how", "why",
    "almost", "further", "together", "indeed", "instead", "ahead",
];

const ADJECTIVES: &[&str] = &[
    "good", "great", "new", "old", "strong", "excellent", "senior", "junior",
    "key", "large", "small", "high", "low", "best", "better", "various",
    "multiple", "several", "many", "few", "more", "most", "other", "same",
    "different", "able", "available", "responsible", "experienced", "skilled",
    "proficient", "detailed", "dedicated", "motivated", "interested", "excited",
    "talented", "qualified", "certified", "advanced", "accomplished", "seasoned",
    "organized", "technical", "professional", "digital", "global", "financial",
    "analytical", "functional", "personal", "internal", "external", "critical",
    "central", "international", "additional", "native", "daily", "weekly",
    "monthly", "early", "fast", "remote", "hybrid", "agile", "solid", "deep",
    "complex", "modern", "top", "main", "major", "minor", "full", "open",
];

/// Regular-looking verbs that are far more often nouns in resumes and
/// job postings.
const NOUN_EXCEPTIONS: &[&str] = &[
    "family", "supply", "assembly", "ally", "anomaly", "rally", "engineering",
    "marketing", "accounting", "training", "testing", "programming", "building",
    "learning", "computing", "networking", "scheduling", "consulting",
    "manufacturing", "banking", "budgeting", "planning", "hiring", "logging",
    "monitoring", "reporting", "onboarding", "staging", "modeling", "modelling",
    "objective", "executive", "initiative", "representative", "alternative",
    "perspective", "incentive", "directive", "detective", "need", "thing",
    "spring", "string", "ring", "king", "wing", "ceiling", "offering",
    "clothing", "feed", "seed", "speed", "bed", "shed", "red",
];

const VERBS: &[&str] = &[
    "develop", "build", "create", "implement", "deliver", "collaborate",
    "maintain", "ensure", "improve", "increase", "reduce", "achieve", "join",
    "apply", "seek", "write", "deploy", "migrate", "automate", "analyze",
    "analyse", "make", "take", "get", "give", "know", "see", "want", "grow",
    "learn", "communicate", "coordinate", "led", "built", "wrote", "ran",
    "made", "grew", "won", "drove", "took", "gave", "saw", "began", "became",
    "brought", "bought", "taught", "sold", "spent", "held", "kept", "found",
    "oversaw", "undertook", "written", "taken", "given", "driven", "chosen",
    "shown", "known", "done",
];

/// Past participles that do not end in "-ed"
pub(crate) const IRREGULAR_PARTICIPLES: &[&str] = &[
    "built", "led", "written", "run", "made", "grown", "won", "driven", "taken",
    "given", "seen", "begun", "become", "brought", "bought", "taught", "sold",
    "spent", "held", "kept", "found", "done", "shown", "known", "chosen",
    "paid", "sent", "put", "set", "cut", "told", "thought", "understood",
    "overseen", "undertaken", "awarded", "broken", "spoken", "drawn", "hidden",
];

#[derive(Debug, Deserialize)]
struct LexiconFile {
    #[serde(default)]
    entries: HashMap<String, PosTag>,
}

/// Lower-cased word → tag table
#[derive(Debug, Clone)]
pub struct Lexicon {
    entries: HashMap<String, PosTag>,
}

impl Lexicon {
    /// Built-in closed-class and exception lists. Later lists win on overlap.
    pub fn builtin() -> Self {
        let mut entries = HashMap::new();

        let lists: &[(&[&str], PosTag)] = &[
            (VERBS, PosTag::Verb),
            (ADJECTIVES, PosTag::Adj),
            (ADVERBS, PosTag::Adv),
            (ADPOSITIONS, PosTag::Adp),
            (SUBORDINATORS, PosTag::Sconj),
            (COORDINATORS, PosTag::Cconj),
            (DETERMINERS, PosTag::Det),
            (POSSESSIVES, PosTag::Pron),
            (PRONOUNS, PosTag::Pron),
            (PARTICLES, PosTag::Part),
            (AUXILIARIES, PosTag::Aux),
            (NOUN_EXCEPTIONS, PosTag::Noun),
        ];

        for (words, tag) in lists {
            for word in words.iter() {
                entries.insert(word.to_string(), *tag);
            }
        }

        Self { entries }
    }

    /// Built-in lists plus the `[entries]` table of a TOML lexicon file.
    ///
    /// A missing or malformed file means the tagger cannot be configured as
    /// requested, which is reported as `AnnotatorUnavailable`.
    pub fn with_overrides(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AnalyzerError::AnnotatorUnavailable(format!(
                "Cannot read lexicon '{}': {}",
                path.display(),
                e
            ))
        })?;

        let file: LexiconFile = toml::from_str(&content).map_err(|e| {
            AnalyzerError::AnnotatorUnavailable(format!(
                "Invalid lexicon '{}': {}",
                path.display(),
                e
            ))
        })?;

        let mut lexicon = Self::builtin();
        let count = file.entries.len();
        for (word, tag) in file.entries {
            lexicon.entries.insert(word.to_lowercase(), tag);
        }
        log::info!("Loaded {} lexicon overrides from {}", count, path.display());

        Ok(lexicon)
    }

    pub fn lookup(&self, lower: &str) -> Option<PosTag> {
        self.entries.get(lower).copied()
    }

    pub fn is_possessive(lower: &str) -> bool {
        POSSESSIVES.contains(&lower)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
