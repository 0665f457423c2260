use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use std::collections::HashSet;

lazy_static! {
    // Word runs of two or more characters.
    static ref RE: Regex = Regex::new(r"\b\w\w+\b").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","about","above","after","again","against","all","am","an","and","any","are","aren","as","at",
            "be","because","been","before","being","below","between","both","but","by",
            "can","cannot","could","couldn",
            "did","didn","do","does","doesn","doing","don","down","during",
            "each","few","for","from","further",
            "had","hadn","has","hasn","have","haven","having","he","her","here","hers","herself","him","himself","his","how",
            "if","in","into","is","isn","it","its","itself",
            "let","me","more","most","mustn","my","myself",
            "no","nor","not","of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
            "same","she","should","shouldn","so","some","such",
            "than","that","the","their","theirs","them","themselves","then","there","these","they","this","those","through","to","too",
            "under","until","up","very",
            "was","wasn","we","were","weren","what","when","where","which","while","who","whom","why","with","won","would","wouldn",
            "you","your","yours","yourself","yourselves"
        ];
        words.iter().copied().collect()
    };
}

fn is_stopword(token: &str) -> bool { STOPWORDS.contains(token) }

/// Controls how sentences and queries are broken into terms.
///
/// The same settings must be used for the corpus and for every query, which is
/// why a built index carries its own copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Analyzer {
    /// Drop common English function words.
    pub remove_stopwords: bool,
    /// Reduce terms to their English Snowball stem.
    pub stem: bool,
}

impl Analyzer {
    /// Tokenize text into terms using NFKC normalization and lowercasing,
    /// then optional stopword removal and stemming.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let normalized = text.nfkc().collect::<String>().to_lowercase();
        let mut tokens = Vec::new();
        for mat in RE.find_iter(&normalized) {
            let token = mat.as_str();
            if self.remove_stopwords && is_stopword(token) { continue; }
            if self.stem {
                tokens.push(STEMMER.stem(token).into_owned());
            } else {
                tokens.push(token.to_string());
            }
        }
        tokens
    }
}

/// Tokenize with the default analyzer.
pub fn tokenize(text: &str) -> Vec<String> {
    Analyzer::default().tokenize(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_tokenize() {
        let t = tokenize("The cat sat on the mat.");
        assert_eq!(t, vec!["the", "cat", "sat", "on", "the", "mat"]);
    }

    #[test]
    fn single_characters_are_dropped() {
        let t = tokenize("I ate a pie");
        assert_eq!(t, vec!["ate", "pie"]);
    }

    #[test]
    fn stemming_is_opt_in() {
        let stemming = Analyzer { stem: true, ..Analyzer::default() };
        assert!(stemming.tokenize("Running runs").iter().all(|t| t == "run"));
        assert_eq!(tokenize("Running"), vec!["running"]);
    }
}
