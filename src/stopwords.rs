//! Stopword lists applied by the text normalizer.
//!
//! Two lists make up the default set: the standard English stopword list
//! (the NLTK corpus list) and a domain-specific list of municipal
//! boilerplate, honorifics, and candidate surnames that would otherwise
//! dominate the downstream word-frequency counts. The exact contents are
//! configuration, not logic; the [`TextCleaner`](crate::normalize::TextCleaner)
//! takes whatever slice it is given, which keeps tests free to use tiny
//! synthetic sets.

/// The NLTK English stopword corpus.
pub const ENGLISH: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan", "shan't",
    "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn",
    "wouldn't",
];

/// Election-coverage boilerplate stripped alongside the English list.
///
/// Includes titles and place names that appear in nearly every article, plus
/// candidate surnames that downstream frequency counts must not rank.
pub const DOMAIN: &[&str] = &[
    "000", "ald.", "alderman", "alderwoman", "also", "amp", "candidate", "candidates", "chicago",
    "city", "commissioner", "congressman", "cook", "county", "de", "del", "el", "en", "former",
    "get", "gets", "illinois", "la", "las", "lopez", "los", "mayor", "mayoral", "mayors",
    "office", "one", "q", "que", "raymond", "rep", "rep.", "representative", "said", "say",
    "says", "state", "un", "una", "vs.", "www",
];

/// The full default stopword set: English ∪ domain list.
pub fn default_stopwords() -> Vec<&'static str> {
    ENGLISH.iter().chain(DOMAIN.iter()).copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_set_includes_both_lists() {
        let words = default_stopwords();
        assert!(words.contains(&"the"));
        assert!(words.contains(&"mayor"));
        assert!(words.contains(&"said"));
        assert_eq!(words.len(), ENGLISH.len() + DOMAIN.len());
    }

    #[test]
    fn test_no_empty_entries() {
        assert!(default_stopwords().iter().all(|w| !w.is_empty()));
    }

    #[test]
    fn test_entries_are_lowercase() {
        assert!(
            default_stopwords()
                .iter()
                .all(|w| !w.chars().any(|c| c.is_uppercase()))
        );
    }
}
