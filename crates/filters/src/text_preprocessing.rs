//! Text cleaning for abstracts and titles
//!
//! Turns free text into a space-separated sequence of informative,
//! lowercase, lemmatized tokens suitable for clustering.

use crate::lemmatizer::{Lemmatizer, NounLemmatizer};
use crate::stopwords::StopwordSet;
use crate::{Error, Result};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;
use tracing::debug;

/// Tokens shorter than this are dropped.
pub const DEFAULT_MIN_TOKEN_LEN: usize = 3;

static URL_REGEX: OnceLock<Regex> = OnceLock::new();
static TAG_REGEX: OnceLock<Regex> = OnceLock::new();
static NON_ALNUM_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_url_regex() -> &'static Regex {
    URL_REGEX.get_or_init(|| Regex::new(r"(?i)http\S+").expect("Failed to compile URL regex"))
}

fn get_tag_regex() -> &'static Regex {
    TAG_REGEX.get_or_init(|| Regex::new(r"<.*?>").expect("Failed to compile tag regex"))
}

fn get_non_alnum_regex() -> &'static Regex {
    NON_ALNUM_REGEX
        .get_or_init(|| Regex::new(r"[^A-Za-z0-9]+").expect("Failed to compile alnum regex"))
}

/// The immutable rule set a cleaner applies.
///
/// Built once per run and handed to the pipeline, so tests can substitute
/// their own stop-words or lemmatizer.
pub struct CleaningRules {
    stopwords: StopwordSet,
    lemmatizer: Box<dyn Lemmatizer>,
    min_token_len: usize,
}

impl CleaningRules {
    pub fn new(stopwords: StopwordSet, lemmatizer: Box<dyn Lemmatizer>) -> Self {
        Self {
            stopwords,
            lemmatizer,
            min_token_len: DEFAULT_MIN_TOKEN_LEN,
        }
    }

    /// English + scientific stop-words with noun lemmatization.
    pub fn scientific_english() -> Self {
        let stopwords = StopwordSet::scientific_english();
        debug!("Built scientific stop-word set with {} entries", stopwords.len());
        Self::new(stopwords, Box::new(NounLemmatizer::new()))
    }

    pub fn with_min_token_len(mut self, min_token_len: usize) -> Result<Self> {
        if min_token_len == 0 {
            return Err(Error::InvalidConfig(
                "minimum token length must be at least 1".to_string(),
            ));
        }
        self.min_token_len = min_token_len;
        Ok(self)
    }

    pub fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }

    pub fn min_token_len(&self) -> usize {
        self.min_token_len
    }

    fn keeps(&self, token: &str) -> bool {
        token.len() >= self.min_token_len
            && !token.bytes().all(|b| b.is_ascii_digit())
            && !self.stopwords.contains(token)
    }
}

impl Default for CleaningRules {
    fn default() -> Self {
        Self::scientific_english()
    }
}

impl fmt::Debug for CleaningRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CleaningRules")
            .field("stopwords", &self.stopwords.len())
            .field("min_token_len", &self.min_token_len)
            .finish_non_exhaustive()
    }
}

/// Applies [`CleaningRules`] to text.
///
/// Steps, in order:
/// 1. Strip `<...>` tags, then URLs (`http` followed by non-whitespace)
/// 2. Replace every run of non `[A-Za-z0-9]` characters with a space
/// 3. Lowercase and split on whitespace
/// 4. Drop numeric tokens, short tokens and stop-words
/// 5. Lemmatize, dropping lemmas that fail step 4
/// 6. Join the survivors with single spaces
///
/// The output is a fixed point: cleaning it again returns it unchanged.
#[derive(Debug, Default)]
pub struct TextCleaner {
    rules: CleaningRules,
}

impl TextCleaner {
    pub fn new(rules: CleaningRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &CleaningRules {
        &self.rules
    }

    /// Clean an optional field; a missing value becomes the empty string.
    pub fn clean_field(&self, text: Option<&str>) -> String {
        text.map(|t| self.clean(t)).unwrap_or_default()
    }

    pub fn clean(&self, text: &str) -> String {
        let mut buffer = String::with_capacity(text.len());
        self.clean_into(text, &mut buffer);
        buffer
    }

    /// Clean text into an existing buffer, reusing its allocation.
    pub fn clean_into(&self, text: &str, buffer: &mut String) {
        buffer.clear();

        // Tags go first: removing one can join its neighbours into a URL
        let stripped = get_tag_regex().replace_all(text, "");
        let stripped = get_url_regex().replace_all(&stripped, "");
        let spaced = get_non_alnum_regex().replace_all(&stripped, " ");

        for raw in spaced.split_whitespace() {
            let token = raw.to_ascii_lowercase();
            if !self.rules.keeps(&token) {
                continue;
            }

            let lemma = self.rules.lemmatizer.lemmatize(&token);
            if !self.rules.keeps(&lemma) {
                continue;
            }

            if !buffer.is_empty() {
                buffer.push(' ');
            }
            buffer.push_str(&lemma);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lemmatizer::IdentityLemmatizer;

    fn cleaner() -> TextCleaner {
        TextCleaner::new(CleaningRules::scientific_english())
    }

    #[test]
    fn test_quantum_computing_boundary() {
        let cleaner = cleaner();
        assert_eq!(cleaner.clean("Quantum Computing 2023!!"), "quantum computing");
    }

    #[test]
    fn test_missing_field_is_empty() {
        assert_eq!(cleaner().clean_field(None), "");
        assert_eq!(cleaner().clean_field(Some("Galaxies")), "galaxy");
    }

    #[test]
    fn test_urls_removed() {
        let cleaner = cleaner();
        let result = cleaner.clean("Code at https://github.com/foo/bar and HTTP://EXAMPLE.ORG here");
        assert!(!result.contains("github"));
        assert!(!result.contains("example"));
        assert_eq!(result, "code");
    }

    #[test]
    fn test_html_tags_removed() {
        let cleaner = cleaner();
        assert_eq!(
            cleaner.clean("<p>Entangled <strong>photons</strong></p>"),
            "entangled photon"
        );
    }

    #[test]
    fn test_numbers_and_short_tokens_dropped() {
        let cleaner = cleaner();
        assert_eq!(cleaner.clean("An 42 x ab 3.14 spin chain"), "spin chain");
    }

    #[test]
    fn test_mixed_alphanumeric_kept() {
        let cleaner = cleaner();
        assert_eq!(cleaner.clean("H2O and CO2 absorption"), "h2o co2 absorption");
    }

    #[test]
    fn test_punctuation_splits_tokens() {
        let cleaner = cleaner();
        assert_eq!(cleaner.clean("spin-orbit coupling; (topological)"), "spin orbit coupling topological");
    }

    #[test]
    fn test_stopwords_removed() {
        let cleaner = cleaner();
        assert_eq!(
            cleaner.clean("In this paper we propose a new method for the galaxy survey"),
            "galaxy survey"
        );
    }

    #[test]
    fn test_lemma_that_is_stopword_dropped() {
        let cleaner = cleaner();
        // "results" is not a stop-word, its lemma is
        assert_eq!(cleaner.clean("Results on graphs"), "graph");
    }

    #[test]
    fn test_non_ascii_letters() {
        let cleaner = cleaner();
        assert_eq!(cleaner.clean("Schrödinger equation"), "schr dinger equation");
    }

    #[test]
    fn test_empty_and_blank() {
        let cleaner = cleaner();
        assert_eq!(cleaner.clean(""), "");
        assert_eq!(cleaner.clean("   \t\n  "), "");
        assert_eq!(cleaner.clean("!!! ??? ..."), "");
    }

    #[test]
    fn test_no_leading_or_trailing_spaces() {
        let cleaner = cleaner();
        let result = cleaner.clean("  the  Superconducting   qubits  of  ");
        assert_eq!(result, "superconducting qubit");
    }

    #[test]
    fn test_cleaning_idempotent() {
        let cleaner = cleaner();
        let inputs = [
            "Quantum Computing 2023!!",
            "We study the HTTPS-like <b>Protocols</b> in 3D lattices, see http://x.y",
            "Results: the matrices and hypotheses of Boxes & Classes",
            "naïve Bayes classifiers for spin_glass systems",
            "ht<i>tpserver cluster",
            "Spectral ht<b></b>tpx",
        ];
        for input in inputs {
            let once = cleaner.clean(input);
            assert_eq!(cleaner.clean(&once), once, "{input}");
        }
    }

    #[test]
    fn test_url_split_by_tag_removed() {
        let cleaner = cleaner();
        assert_eq!(cleaner.clean("ht<i>tpserver cluster"), "cluster");
        assert_eq!(cleaner.clean("Spectral ht<b></b>tpx"), "spectral");
    }

    #[test]
    fn test_substitute_rules() {
        let rules = CleaningRules::new(StopwordSet::from_words(["foo"]), Box::new(IdentityLemmatizer));
        let cleaner = TextCleaner::new(rules);
        assert_eq!(cleaner.clean("foo bars the baz"), "bars the baz");
    }

    #[test]
    fn test_min_token_len() {
        let rules = CleaningRules::new(StopwordSet::new(), Box::new(IdentityLemmatizer))
            .with_min_token_len(1)
            .unwrap();
        let cleaner = TextCleaner::new(rules);
        assert_eq!(cleaner.clean("a b cd"), "a b cd");

        let result = CleaningRules::scientific_english().with_min_token_len(0);
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_clean_into_reuses_buffer() {
        let cleaner = cleaner();
        let mut buffer = String::new();

        cleaner.clean_into("Dark matter halos", &mut buffer);
        assert_eq!(buffer, "dark matter halo");

        cleaner.clean_into("Neutron stars", &mut buffer);
        assert_eq!(buffer, "neutron star");
    }
}
