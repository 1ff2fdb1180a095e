//! Text cleaning rules for arXiv metadata
//!
//! This crate provides the stop-word sets, the lemmatizer and the
//! cleaner that turns titles and abstracts into clustering-ready text.

pub mod error;
pub mod lemmatizer;
pub mod stopwords;
pub mod text_preprocessing;

pub use error::{Error, Result};
pub use lemmatizer::{IdentityLemmatizer, Lemmatizer, NounLemmatizer};
pub use stopwords::StopwordSet;
pub use text_preprocessing::{CleaningRules, TextCleaner};
