//! Sentence boundary detection.
//!
//! The core only depends on the [`Segmenter`] trait. [`RuleSegmenter`] is the
//! default implementation: punctuation-driven with a few heuristics for
//! abbreviations, initials and lowercase continuations.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

lazy_static! {
    // Either a terminator run (with trailing closers) followed by whitespace or
    // end of text, or a blank line.
    static ref BOUNDARY: Regex =
        Regex::new(r#"(?P<term>[.!?…]+["'”’)\]]*)(?:\s+|\z)|\n[ \t\r]*\n\s*"#).expect("valid regex");
    static ref ABBREVIATIONS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "mr","mrs","ms","dr","prof","sr","jr","st","mt","rev","gen","col","capt","lt","sgt",
            "vs","etc","approx","dept","est","inc","ltd","co","corp","no","nos","fig","vol","pp","ed",
            "jan","feb","mar","apr","jun","jul","aug","sep","sept","oct","nov","dec",
        ];
        words.iter().copied().collect()
    };
}

/// Splits raw text into an ordered list of sentences.
///
/// Implementations must be deterministic and return slices of the input so a
/// matched sentence is always a verbatim substring of the document.
pub trait Segmenter {
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// Additional abbreviations (case-insensitive, trailing dot optional) after
    /// which a period never ends a sentence.
    pub extra_abbreviations: Vec<String>,
    /// Treat an empty line as a sentence boundary even without punctuation.
    pub split_on_blank_lines: bool,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self { extra_abbreviations: Vec::new(), split_on_blank_lines: true }
    }
}

#[derive(Debug, Clone)]
pub struct RuleSegmenter {
    extra_abbreviations: HashSet<String>,
    split_on_blank_lines: bool,
}

impl Default for RuleSegmenter {
    fn default() -> Self { Self::new(&SegmenterConfig::default()) }
}

impl RuleSegmenter {
    pub fn new(config: &SegmenterConfig) -> Self {
        let extra_abbreviations = config
            .extra_abbreviations
            .iter()
            .map(|a| a.trim().trim_end_matches('.').to_lowercase())
            .filter(|a| !a.is_empty())
            .collect();
        Self { extra_abbreviations, split_on_blank_lines: config.split_on_blank_lines }
    }

    fn is_abbreviation(&self, word: &str) -> bool {
        ABBREVIATIONS.contains(word) || self.extra_abbreviations.contains(word)
    }

    /// Decide whether a terminator ends the sentence. `before` is the text of
    /// the pending sentence, `gap` the whitespace consumed after the terminator
    /// and `after` everything that follows.
    fn is_break(&self, before: &str, terminator: &str, gap: &str, after: &str) -> bool {
        if self.split_on_blank_lines && gap.matches('\n').count() >= 2 {
            return true;
        }
        let punct = terminator.trim_end_matches(|c: char| !matches!(c, '.' | '!' | '?' | '…'));
        // `!`, `?` and `…` always end a sentence; the heuristics below are for periods.
        if !punct.chars().all(|c| c == '.') {
            return true;
        }
        if after.chars().next().is_some_and(char::is_lowercase) {
            return false;
        }
        if punct != "." {
            return true;
        }
        let word = before
            .rsplit(char::is_whitespace)
            .next()
            .unwrap_or("")
            .trim_start_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase();
        if word.is_empty() {
            return true;
        }
        let mut chars = word.chars();
        let single_letter = matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic());
        !(single_letter || word.contains('.') || self.is_abbreviation(&word))
    }
}

impl Segmenter for RuleSegmenter {
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut sentences = Vec::new();
        let mut start = 0;
        for caps in BOUNDARY.captures_iter(text) {
            let Some(whole) = caps.get(0) else { continue };
            let end = match caps.name("term") {
                Some(term) => {
                    let before = &text[start..term.start()];
                    let gap = &text[term.end()..whole.end()];
                    if !self.is_break(before, term.as_str(), gap, &text[whole.end()..]) {
                        continue;
                    }
                    term.end()
                }
                None if self.split_on_blank_lines => whole.start(),
                None => continue,
            };
            push_trimmed(&mut sentences, &text[start..end]);
            start = whole.end();
        }
        push_trimmed(&mut sentences, &text[start..]);
        sentences
    }
}

fn push_trimmed<'a>(out: &mut Vec<&'a str>, segment: &'a str) {
    let s = segment.trim();
    if !s.is_empty() {
        out.push(s);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(text: &str) -> Vec<&str> {
        RuleSegmenter::new(&SegmenterConfig::default()).segment(text)
    }

    #[test]
    fn splits_on_terminal_punctuation() {
        assert_eq!(
            split("The cat sat on the mat. Dogs bark loudly! Do they?"),
            vec!["The cat sat on the mat.", "Dogs bark loudly!", "Do they?"]
        );
    }

    #[test]
    fn keeps_abbreviations_and_initials_together() {
        assert_eq!(
            split("Dr. Smith met J. R. Tolkien, e.g. at lunch. It rained."),
            vec!["Dr. Smith met J. R. Tolkien, e.g. at lunch.", "It rained."]
        );
    }

    #[test]
    fn lowercase_continuation_does_not_break() {
        assert_eq!(split("It costs approx. ten dollars. Fine."), vec!["It costs approx. ten dollars.", "Fine."]);
        assert_eq!(split("Wait... what happened"), vec!["Wait... what happened"]);
    }

    #[test]
    fn question_and_exclamation_break_before_lowercase() {
        assert_eq!(split("Is it safe? yes it is."), vec!["Is it safe?", "yes it is."]);
        assert_eq!(split("Run! now."), vec!["Run!", "now."]);
    }

    #[test]
    fn closing_quotes_stay_with_sentence() {
        assert_eq!(split("He said \"Stop.\" Then he left."), vec!["He said \"Stop.\"", "Then he left."]);
    }

    #[test]
    fn decimals_are_not_boundaries() {
        assert_eq!(split("Pi is 3.14 roughly. Yes."), vec!["Pi is 3.14 roughly.", "Yes."]);
    }

    #[test]
    fn blank_lines_break_paragraphs() {
        assert_eq!(split("Introduction\n\nRust is fast."), vec!["Introduction", "Rust is fast."]);
        let joined = RuleSegmenter::new(&SegmenterConfig { split_on_blank_lines: false, ..SegmenterConfig::default() });
        assert_eq!(joined.segment("Introduction\n\nRust is fast."), vec!["Introduction\n\nRust is fast."]);
    }

    #[test]
    fn extra_abbreviations_are_honoured() {
        let seg = RuleSegmenter::new(&SegmenterConfig { extra_abbreviations: vec!["Ave.".into()], ..SegmenterConfig::default() });
        assert_eq!(seg.segment("Go to Main Ave. Turn left."), vec!["Go to Main Ave. Turn left."]);
    }

    #[test]
    fn blank_text_yields_nothing() {
        assert!(split("   \n\t ").is_empty());
        assert!(split("").is_empty());
    }
}
