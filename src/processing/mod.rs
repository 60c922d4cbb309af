//! Text processing and analysis module

pub mod analyzer;
pub mod document;
pub mod keywords;
pub mod readability;
pub mod sections;
pub mod similarity;
pub mod skill_matcher;
pub mod text_processor;
