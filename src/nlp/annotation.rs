//! Annotation data model and the `Annotator` capability

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Coarse Universal Dependencies part-of-speech tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PosTag {
    Noun,
    Propn,
    Verb,
    Aux,
    Adj,
    Adv,
    Adp,
    Det,
    Pron,
    Cconj,
    Sconj,
    Part,
    Num,
    Punct,
    Sym,
    X,
}

/// Dependency relation attached to a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dependency {
    /// Passive auxiliary ("was" in "was deployed")
    AuxPass,
    Aux,
    Neg,
    Punct,
    /// Unlabelled
    Dep,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    /// Byte offset into the annotated text
    pub offset: usize,
    pub pos: PosTag,
    pub dep: Dependency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    pub text: String,
    /// Indices into `Annotation::tokens`
    pub tokens: Range<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub tokens: Vec<Token>,
    pub sentences: Vec<Sentence>,
}

/// Tokenise, tag, segment and label a text.
///
/// Implementations must be deterministic: the same input always yields the
/// same annotation.
pub trait Annotator: Send + Sync {
    fn annotate(&self, text: &str) -> Annotation;

    fn name(&self) -> &str;
}

impl PosTag {
    pub fn is_nominal(self) -> bool {
        matches!(self, PosTag::Noun | PosTag::Propn)
    }
}

impl Annotation {
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn sentence_tokens(&self, sentence: &Sentence) -> &[Token] {
        &self.tokens[sentence.tokens.clone()]
    }
}

impl fmt::Display for PosTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PosTag::Noun => "NOUN",
            PosTag::Propn => "PROPN",
            PosTag::Verb => "VERB",
            PosTag::Aux => "AUX",
            PosTag::Adj => "ADJ",
            PosTag::Adv => "ADV",
            PosTag::Adp => "ADP",
            PosTag::Det => "DET",
            PosTag::Pron => "PRON",
            PosTag::Cconj => "CCONJ",
            PosTag::Sconj => "SCONJ",
            PosTag::Part => "PART",
            PosTag::Num => "NUM",
            PosTag::Punct => "PUNCT",
            PosTag::Sym => "SYM",
            PosTag::X => "X",
        };
        write!(f, "{}", label)
    }
}
