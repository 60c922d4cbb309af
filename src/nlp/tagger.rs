//! Rule-based tokenizer, part-of-speech tagger and passive-voice labeller

use crate::config::NlpConfig;
use crate::error::Result;
use crate::nlp::annotation::{Annotation, Annotator, Dependency, PosTag, Sentence, Token};
use crate::nlp::lexicon::{Lexicon, BE_FORMS, IRREGULAR_PARTICIPLES, MODALS};
use unicode_segmentation::UnicodeSegmentation;

const SYMBOLS: &str = "$%+#&@*=<>^|~€£¥©®™°";

const ADJECTIVE_SUFFIXES: &[(&str, usize)] = &[
    ("ous", 4),
    ("ful", 4),
    ("ive", 5),
    ("able", 5),
    ("ible", 5),
    ("less", 5),
    ("ical", 5),
];

/// Deterministic annotator built from a [`Lexicon`] and suffix heuristics.
///
/// Sentences follow Unicode sentence boundaries, so every line break closes
/// a sentence. Tokens follow Unicode word boundaries with whitespace dropped.
pub struct RuleBasedAnnotator {
    lexicon: Lexicon,
}

impl Default for RuleBasedAnnotator {
    fn default() -> Self {
        Self::new(Lexicon::builtin())
    }
}

impl RuleBasedAnnotator {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn from_config(config: &NlpConfig) -> Result<Self> {
        let lexicon = match &config.lexicon_path {
            Some(path) => Lexicon::with_overrides(path)?,
            None => Lexicon::builtin(),
        };
        log::debug!("Rule-based annotator ready ({} lexicon entries)", lexicon.len());
        Ok(Self::new(lexicon))
    }

    fn tag_word(
        &self,
        word: &str,
        lower: &str,
        sentence_start: bool,
        in_caps_run: bool,
        prev: Option<(&str, PosTag)>,
    ) -> PosTag {
        if !word.chars().any(char::is_alphanumeric) {
            return if word.chars().all(|c| SYMBOLS.contains(c)) {
                PosTag::Sym
            } else {
                PosTag::Punct
            };
        }

        if word.chars().any(|c| c.is_ascii_digit())
            && word.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',')
        {
            return PosTag::Num;
        }

        // "IT", "US": acronyms that spell a function word. Runs of capitals
        // ("WORK EXPERIENCE AND SKILLS") are headers and go through the lexicon.
        let is_acronym = is_all_caps(word);
        if is_acronym && !in_caps_run {
            return PosTag::Propn;
        }

        if let Some(tag) = self.lexicon.lookup(lower) {
            return tag;
        }

        let starts_upper = word.chars().next().is_some_and(char::is_uppercase);
        let internal_caps = word.chars().skip(1).any(char::is_uppercase);
        let mixed_alnum =
            word.chars().any(|c| c.is_ascii_digit()) && word.chars().any(char::is_alphabetic);

        if is_acronym || internal_caps || mixed_alnum || (starts_upper && !sentence_start) {
            return PosTag::Propn;
        }

        if let Some((prev_lower, PosTag::Aux)) = prev {
            if MODALS.contains(&prev_lower) {
                return PosTag::Verb;
            }
        }

        let after_determiner = match prev {
            Some((_, PosTag::Det)) | Some((_, PosTag::Adj)) => true,
            Some((prev_lower, _)) => Lexicon::is_possessive(prev_lower),
            None => false,
        };
        let len = lower.chars().count();

        if lower.ends_with("ly") && len > 4 {
            return PosTag::Adv;
        }
        if lower.ends_with("ing") && len > 4 {
            return if after_determiner { PosTag::Noun } else { PosTag::Verb };
        }
        if lower.ends_with("ed") && len > 3 {
            return if after_determiner { PosTag::Adj } else { PosTag::Verb };
        }
        if ADJECTIVE_SUFFIXES
            .iter()
            .any(|(suffix, min_len)| lower.ends_with(suffix) && len > *min_len)
            || (lower.ends_with("ic") && len > 4)
        {
            return PosTag::Adj;
        }
        if lower.ends_with("ize") && len > 5 {
            return PosTag::Verb;
        }

        PosTag::Noun
    }

    fn is_past_participle(&self, lower: &str) -> bool {
        if matches!(self.lexicon.lookup(lower), Some(tag) if tag != PosTag::Verb) {
            return false;
        }
        IRREGULAR_PARTICIPLES.contains(&lower)
            || (lower.ends_with("ed")
                && lower.chars().count() > 3
                && lower.chars().all(char::is_alphabetic))
    }

    /// Label a form of "be" followed by a past participle as a passive
    /// auxiliary. Adverbs and negation may sit in between.
    fn mark_passives(&self, tokens: &mut [Token]) {
        for i in 0..tokens.len() {
            let lower = tokens[i].text.to_lowercase();
            if !BE_FORMS.contains(&lower.as_str()) {
                continue;
            }

            let mut j = i + 1;
            while j < tokens.len()
                && (tokens[j].pos == PosTag::Adv || tokens[j].dep == Dependency::Neg)
            {
                j += 1;
            }

            if j < tokens.len() && self.is_past_participle(&tokens[j].text.to_lowercase()) {
                tokens[i].dep = Dependency::AuxPass;
                tokens[j].pos = PosTag::Verb;
            }
        }
    }
}

impl Annotator for RuleBasedAnnotator {
    fn annotate(&self, text: &str) -> Annotation {
        let mut tokens: Vec<Token> = Vec::new();
        let mut sentences = Vec::new();

        for (sentence_offset, sentence) in text.split_sentence_bound_indices() {
            let start = tokens.len();
            let mut prev: Option<(String, PosTag)> = None;
            let mut seen_word = false;

            let words: Vec<(usize, &str)> = sentence
                .split_word_bound_indices()
                .filter(|(_, word)| !word.trim().is_empty())
                .collect();

            for (index, &(word_offset, word)) in words.iter().enumerate() {
                let lower = word.to_lowercase();
                let pos = self.tag_word(
                    word,
                    &lower,
                    !seen_word,
                    in_caps_run(&words, index),
                    prev.as_ref().map(|(w, t)| (w.as_str(), *t)),
                );
                let dep = match pos {
                    PosTag::Punct | PosTag::Sym => Dependency::Punct,
                    PosTag::Aux => Dependency::Aux,
                    PosTag::Part => Dependency::Neg,
                    _ => Dependency::Dep,
                };

                if word.chars().any(char::is_alphanumeric) {
                    seen_word = true;
                }
                tokens.push(Token {
                    text: word.to_string(),
                    offset: sentence_offset + word_offset,
                    pos,
                    dep,
                });
                prev = Some((lower, pos));
            }

            if tokens.len() == start {
                continue;
            }

            self.mark_passives(&mut tokens[start..]);
            sentences.push(Sentence {
                text: sentence.trim().to_string(),
                tokens: start..tokens.len(),
            });
        }

        Annotation { tokens, sentences }
    }

    fn name(&self) -> &str {
        "rule-based"
    }
}

/// Two or more characters, at least one upper-case letter, no lower-case
fn is_all_caps(word: &str) -> bool {
    word.chars().count() >= 2
        && word.chars().any(char::is_uppercase)
        && word.chars().all(|c| c.is_uppercase() || c.is_ascii_digit())
}

/// Whether the nearest word on either side of `index` is also all caps
fn in_caps_run(words: &[(usize, &str)], index: usize) -> bool {
    let is_word = |word: &&str| word.chars().any(char::is_alphanumeric);
    let before = words[..index].iter().rev().map(|&(_, w)| w).find(is_word);
    let after = words[index + 1..].iter().map(|&(_, w)| w).find(is_word);

    before.is_some_and(is_all_caps) || after.is_some_and(is_all_caps)
}
