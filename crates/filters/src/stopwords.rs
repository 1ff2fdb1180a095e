//! Stop-word sets
//!
//! The standard English list is compiled in, so there is nothing to
//! download at runtime. The scientific list extends it with terms that
//! carry no topical signal in paper abstracts.

use std::collections::HashSet;

/// Standard English stop-words (the NLTK `english` corpus list).
pub const ENGLISH_STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're",
    "you've", "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he",
    "him", "his", "himself", "she", "she's", "her", "hers", "herself", "it", "it's",
    "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "that'll", "these", "those", "am", "is", "are",
    "was", "were", "be", "been", "being", "have", "has", "had", "having", "do",
    "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or", "because",
    "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below",
    "to", "from", "up", "down", "in", "out", "on", "off", "over", "under", "again",
    "further", "then", "once", "here", "there", "when", "where", "why", "how",
    "all", "any", "both", "each", "few", "more", "most", "other", "some", "such",
    "no", "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s",
    "t", "can", "will", "just", "don", "don't", "should", "should've", "now", "d",
    "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't",
    "didn", "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't",
    "haven", "haven't", "isn", "isn't", "ma", "mightn", "mightn't", "mustn",
    "mustn't", "needn", "needn't", "shan", "shan't", "shouldn", "shouldn't", "wasn",
    "wasn't", "weren", "weren't", "won", "won't", "wouldn", "wouldn't",
];

/// Terms that are frequent in abstracts but say nothing about the topic.
pub const SCIENTIFIC_STOPWORDS: &[&str] = &[
    // reporting verbs
    "use", "used", "using", "study", "studied", "show", "shown", "showing",
    "propose", "proposed", "proposes", "present", "presented", "presenting",
    "provide", "provided", "providing", "obtain", "obtained", "consider",
    "considered", "investigate", "investigated", "describe", "described",
    "discuss", "discussed", "introduce", "introduced", "develop",
    "developed", "demonstrate", "demonstrated", "report", "reported", "suggest",
    "suggested", "observe", "observed", "derive", "derived", "find", "found",
    "make", "made", "give", "given", "called", "known", "related", "based",
    "allow", "allowed", "achieve", "achieved", "compare", "compared", "include",
    "included", "including", "require", "required", "apply", "applied", "take",
    "see", "seen", "get", "aim", "focus", "address", "explore", "explored",
    "illustrate", "evaluate", "evaluated", "establish", "established",
    // document furniture
    "paper", "article", "letter", "note", "work", "figure", "table", "section",
    "appendix", "author", "result", "approach", "technique", "method", "model",
    "case", "performance", "problem", "setting", "framework", "contribution",
    "example", "instance", "evidence", "fact", "way", "part", "term", "kind",
    "type", "form", "order", "level", "value", "amount", "number", "set",
    "state", "property", "group", "bound", "time", "point", "aspect", "issue",
    // qualifiers
    "new", "novel", "recent", "recently", "previous", "previously", "current",
    "currently", "different", "general", "generally", "certain", "particular",
    "particularly", "specific", "important", "significant", "significantly",
    "main", "key", "simple", "simply", "possible", "able", "several", "various",
    "many", "much", "less", "least", "well", "better", "best", "good", "large",
    "larger", "small", "smaller", "lower", "higher", "high", "low", "single",
    "multiple", "whole", "total", "typical", "typically", "usually", "often",
    "likely", "like", "also", "however", "therefore", "thus", "hence",
    "furthermore", "moreover", "additionally", "addition", "finally", "first",
    "second", "third", "one", "two", "three", "four", "five", "may", "might",
    "could", "would", "must", "shall", "cannot", "within", "without", "among",
    "across", "along", "toward", "towards", "upon", "via", "due", "whether",
    "although", "though", "whereas", "since", "either", "neither", "every",
    "another", "almost", "rather", "quite", "instead", "per", "etc", "yet",
    "still", "even", "respect", "respectively",
];

/// Case-normalized set of tokens excluded from cleaned text.
#[derive(Debug, Clone, Default)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// Empty set; no token is a stop-word.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard English list only.
    pub fn english() -> Self {
        Self::from_words(ENGLISH_STOPWORDS.iter().copied())
    }

    /// Standard English plus the scientific-abstract list.
    pub fn scientific_english() -> Self {
        let mut set = Self::english();
        set.extend(SCIENTIFIC_STOPWORDS.iter().copied());
        set
    }

    /// Build a set from arbitrary words. Words are lowercased on insert.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        set.extend(words);
        set
    }

    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words
            .extend(words.into_iter().map(|w| w.as_ref().to_lowercase()));
    }

    /// Membership test. Expects an already lowercased token.
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
