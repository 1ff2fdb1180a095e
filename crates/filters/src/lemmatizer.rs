//! Token lemmatization
//!
//! `NounLemmatizer` reduces English plural nouns to their singular form
//! using the WordNet "morphy" detachment rules for nouns, backed by a table
//! of irregular plurals and a list of words that only look plural.
//! The rules run without a dictionary lookup, so they stay conservative:
//! anything ending in `ss`, `us` or `is` is left alone.

use std::borrow::Cow;

/// Maps a lowercase token to its canonical base form.
pub trait Lemmatizer: Send + Sync {
    fn lemmatize<'a>(&self, token: &'a str) -> Cow<'a, str>;
}

/// Leaves every token unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityLemmatizer;

impl Lemmatizer for IdentityLemmatizer {
    fn lemmatize<'a>(&self, token: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(token)
    }
}

const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("analyses", "analysis"),
    ("axes", "axis"),
    ("bases", "basis"),
    ("calories", "calorie"),
    ("children", "child"),
    ("cookies", "cookie"),
    ("crises", "crisis"),
    ("criteria", "criterion"),
    ("diagnoses", "diagnosis"),
    ("feet", "foot"),
    ("formulae", "formula"),
    ("geese", "goose"),
    ("hypotheses", "hypothesis"),
    ("indices", "index"),
    ("lemmata", "lemma"),
    ("matrices", "matrix"),
    ("maxima", "maximum"),
    ("men", "man"),
    ("mice", "mouse"),
    ("minima", "minimum"),
    ("movies", "movie"),
    ("nuclei", "nucleus"),
    ("optima", "optimum"),
    ("parentheses", "parenthesis"),
    ("people", "person"),
    ("phenomena", "phenomenon"),
    ("quanta", "quantum"),
    ("radii", "radius"),
    ("simplices", "simplex"),
    ("spectra", "spectrum"),
    ("stimuli", "stimulus"),
    ("syntheses", "synthesis"),
    ("teeth", "tooth"),
    ("theses", "thesis"),
    ("vertices", "vertex"),
    ("women", "woman"),
];

/// Words ending in `s` that are already singular.
const INVARIANT: &[&str] = &[
    "acoustics", "aerodynamics", "afterwards", "alias", "always", "analytics",
    "astrophysics", "atlas", "besides", "bias", "bioinformatics", "biophysics",
    "canvas", "chaos", "cosmos", "cybernetics", "dynamics", "economics",
    "electrodynamics", "electronics", "ethics", "ethos", "gas", "genetics",
    "genomics", "geophysics", "hydrodynamics", "informatics", "kinetics",
    "lens", "linguistics", "logistics", "mathematics", "means", "mechanics",
    "metabolomics", "news", "optics", "pathos", "perhaps", "phonetics",
    "photonics", "physics", "politics", "proteomics", "robotics", "semantics",
    "series", "sometimes", "species", "thermodynamics",
];

/// Suffix rewrites tried in order; the first match wins.
const SUFFIX_RULES: &[(&str, &str)] = &[
    ("ies", "y"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("sses", "ss"),
    ("xes", "x"),
    ("s", ""),
];

/// Rule-based English noun lemmatizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct NounLemmatizer;

impl NounLemmatizer {
    pub fn new() -> Self {
        Self
    }

    fn irregular(token: &str) -> Option<&'static str> {
        IRREGULAR_PLURALS
            .binary_search_by(|(plural, _)| plural.cmp(&token))
            .ok()
            .map(|i| IRREGULAR_PLURALS[i].1)
    }

    fn is_invariant(token: &str) -> bool {
        INVARIANT.binary_search(&token).is_ok()
            || token.ends_with("ss")
            || token.ends_with("us")
            || token.ends_with("is")
    }

    /// `-es` plural of a singular that itself ends in `s`: "biases", "viruses"
    fn sibilant_plural(token: &str) -> Option<&str> {
        let stem = token.strip_suffix("es")?;
        let singular = stem.len() >= 3
            && (INVARIANT.binary_search(&stem).is_ok() || stem.ends_with("us"));
        singular.then_some(stem)
    }
}

impl Lemmatizer for NounLemmatizer {
    fn lemmatize<'a>(&self, token: &'a str) -> Cow<'a, str> {
        if let Some(lemma) = Self::irregular(token) {
            return Cow::Borrowed(lemma);
        }
        if token.len() <= 3 || Self::is_invariant(token) {
            return Cow::Borrowed(token);
        }
        if let Some(stem) = Self::sibilant_plural(token) {
            return Cow::Borrowed(stem);
        }

        for (suffix, replacement) in SUFFIX_RULES {
            if let Some(stem) = token.strip_suffix(suffix) {
                // "ies" -> "y" needs a real stem: "ties" stays, "studies" -> "study"
                if stem.len() < 2 {
                    break;
                }
                if replacement.is_empty() {
                    return Cow::Borrowed(stem);
                }
                return Cow::Owned(format!("{stem}{replacement}"));
            }
        }

        Cow::Borrowed(token)
    }
}
