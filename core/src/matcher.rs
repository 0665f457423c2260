use serde::{Deserialize, Serialize};

use crate::index::{SentenceCorpus, SentenceId, TermWeightIndex};
use crate::vector::cosine_similarity;

/// Minimum similarity for a sentence to be returned.
pub const DEFAULT_THRESHOLD: f32 = 0.2;

/// Returned whenever no sentence is similar enough.
pub const FALLBACK_MESSAGE: &str = "I'm not sure how to respond to that. Try asking differently.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub threshold: f32,
    pub fallback: String,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self { threshold: DEFAULT_THRESHOLD, fallback: FALLBACK_MESSAGE.to_string() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match {
    pub sentence_id: SentenceId,
    pub score: f32,
}

/// Outcome of a single query.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply<'a> {
    /// Matched sentence, or the fallback message.
    pub text: &'a str,
    /// Best scoring sentence, if the corpus has any.
    pub best: Option<Match>,
    /// Whether `best` cleared the threshold.
    pub confident: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Matcher {
    config: MatchConfig,
}

impl Matcher {
    pub fn new(config: MatchConfig) -> Self { Self { config } }

    pub fn config(&self) -> &MatchConfig { &self.config }

    /// Highest cosine similarity between the query and any sentence. Ties go
    /// to the earliest sentence. `None` for an empty index.
    pub fn best_match(&self, query: &str, index: &TermWeightIndex) -> Option<Match> {
        if index.is_empty() {
            return None;
        }
        let q = index.vectorize(query);
        let mut best: Option<Match> = None;
        for (sentence_id, v) in index.vectors().iter().enumerate() {
            let score = cosine_similarity(&q, v);
            if best.map_or(true, |b| score > b.score) {
                best = Some(Match { sentence_id, score });
            }
        }
        best
    }

    pub fn reply<'a>(&'a self, query: &str, sentences: &'a SentenceCorpus, index: &TermWeightIndex) -> Reply<'a> {
        if sentences.is_empty() {
            return Reply { text: &self.config.fallback, best: None, confident: false };
        }
        let best = self.best_match(query, index);
        let hit = best
            .filter(|m| m.score >= self.config.threshold)
            .and_then(|m| sentences.get(m.sentence_id));
        tracing::debug!(query, score = best.map(|m| m.score), confident = hit.is_some(), "matched query");
        match hit {
            Some(text) => Reply { text, best, confident: true },
            None => Reply { text: &self.config.fallback, best, confident: false },
        }
    }

    /// The matched sentence verbatim, or the fallback message.
    pub fn respond(&self, query: &str, sentences: &SentenceCorpus, index: &TermWeightIndex) -> String {
        self.reply(query, sentences, index).text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::Analyzer;
    use crate::index::Weighting;

    fn corpus(sentences: &[&str]) -> (SentenceCorpus, TermWeightIndex) {
        let index = TermWeightIndex::build(sentences.iter().copied(), Analyzer::default(), Weighting::default());
        (SentenceCorpus::new(sentences.iter().copied()), index)
    }

    #[test]
    fn ties_go_to_first_sentence() {
        let (sentences, index) = corpus(&["red apple", "green pear", "red apple"]);
        let m = Matcher::default().best_match("red apple", &index).unwrap();
        assert_eq!(m.sentence_id, 0);
        assert!((m.score - 1.0).abs() < 1e-5);
        assert_eq!(Matcher::default().respond("red apple", &sentences, &index), "red apple");
    }

    #[test]
    fn threshold_is_inclusive_lower_bound() {
        let (sentences, index) = corpus(&["alpha beta gamma", "delta"]);
        let score = Matcher::default().best_match("alpha", &index).unwrap().score;
        let at = Matcher::new(MatchConfig { threshold: score, ..MatchConfig::default() });
        assert!(at.reply("alpha", &sentences, &index).confident);
        let above = Matcher::new(MatchConfig { threshold: score + 0.01, ..MatchConfig::default() });
        let reply = above.reply("alpha", &sentences, &index);
        assert!(!reply.confident);
        assert_eq!(reply.text, FALLBACK_MESSAGE);
        assert_eq!(reply.best.map(|m| m.sentence_id), Some(0));
    }

    #[test]
    fn empty_corpus_short_circuits() {
        let sentences = SentenceCorpus::default();
        let index = TermWeightIndex::empty(Analyzer::default(), Weighting::default());
        let matcher = Matcher::default();
        let reply = matcher.reply("anything", &sentences, &index);
        assert_eq!(reply, Reply { text: FALLBACK_MESSAGE, best: None, confident: false });
    }

    #[test]
    fn custom_fallback_is_used() {
        let (sentences, index) = corpus(&["hello world"]);
        let m = Matcher::new(MatchConfig { fallback: "no idea".into(), ..MatchConfig::default() });
        assert_eq!(m.respond("zebra", &sentences, &index), "no idea");
    }
}
