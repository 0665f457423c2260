use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::tokenizer::Analyzer;
use crate::vector::SparseVector;

pub type TermId = u32;
pub type SentenceId = usize;

/// How raw counts become weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weighting {
    /// idf = ln((1 + n) / (1 + df)) + 1 instead of ln(n / df) + 1
    pub smooth_idf: bool,
    /// tf = 1 + ln(count) instead of the raw count
    pub sublinear_tf: bool,
}

impl Default for Weighting {
    fn default() -> Self {
        Self { smooth_idf: true, sublinear_tf: false }
    }
}

impl Weighting {
    pub fn idf(&self, num_sentences: u32, df: u32) -> f32 {
        let n = num_sentences as f32;
        let df = df.max(1) as f32;
        if self.smooth_idf { ((1.0 + n) / (1.0 + df)).ln() + 1.0 } else { (n / df).ln() + 1.0 }
    }

    pub fn tf(&self, count: u32) -> f32 {
        if count == 0 { return 0.0; }
        if self.sublinear_tf { 1.0 + (count as f32).ln() } else { count as f32 }
    }
}

/// Ordered, immutable list of sentences. Position is the sentence id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SentenceCorpus {
    sentences: Vec<String>,
}

impl SentenceCorpus {
    pub fn new<I, S>(sentences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { sentences: sentences.into_iter().map(Into::into).collect() }
    }

    pub fn get(&self, id: SentenceId) -> Option<&str> { self.sentences.get(id).map(String::as_str) }

    pub fn len(&self) -> usize { self.sentences.len() }

    pub fn is_empty(&self) -> bool { self.sentences.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ { self.sentences.iter().map(String::as_str) }
}

/// Vocabulary, document frequencies and one L2-normalized TF-IDF vector per
/// sentence. Immutable once built; a changed corpus needs a fresh build.
#[derive(Debug, Clone, Default)]
pub struct TermWeightIndex {
    dictionary: HashMap<String, TermId>,
    df: Vec<u32>,
    idf: Vec<f32>,
    vectors: Vec<SparseVector>,
    analyzer: Analyzer,
    weighting: Weighting,
}

impl TermWeightIndex {
    /// Index with no vocabulary and no sentences.
    pub fn empty(analyzer: Analyzer, weighting: Weighting) -> Self {
        Self { analyzer, weighting, ..Self::default() }
    }

    pub fn build<'a, I>(sentences: I, analyzer: Analyzer, weighting: Weighting) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut next_term_id: TermId = 0;
        let mut dictionary: HashMap<String, TermId> = HashMap::new();
        let mut df: Vec<u32> = Vec::new();
        let mut counts: Vec<BTreeMap<TermId, u32>> = Vec::new();

        for sentence in sentences {
            let mut tf_counts: BTreeMap<TermId, u32> = BTreeMap::new();
            let mut seen_in_sentence: HashSet<TermId> = HashSet::new();
            for term in analyzer.tokenize(sentence) {
                let tid = *dictionary.entry(term).or_insert_with(|| {
                    let id = next_term_id;
                    next_term_id += 1;
                    df.push(0);
                    id
                });
                *tf_counts.entry(tid).or_insert(0) += 1;
                if seen_in_sentence.insert(tid) {
                    df[tid as usize] += 1;
                }
            }
            counts.push(tf_counts);
        }

        let n = counts.len() as u32;
        let idf: Vec<f32> = df.iter().map(|&d| weighting.idf(n, d)).collect();
        let vectors = counts
            .into_iter()
            .map(|tf_counts| {
                let mut v = SparseVector::from_pairs(
                    tf_counts.into_iter().map(|(tid, c)| (tid, weighting.tf(c) * idf[tid as usize])),
                );
                v.normalize();
                v
            })
            .collect();

        Self { dictionary, df, idf, vectors, analyzer, weighting }
    }

    /// Project text into the index's vector space. Terms outside the
    /// vocabulary are ignored.
    pub fn vectorize(&self, text: &str) -> SparseVector {
        let mut tf_counts: BTreeMap<TermId, u32> = BTreeMap::new();
        for term in self.analyzer.tokenize(text) {
            if let Some(&tid) = self.dictionary.get(&term) {
                *tf_counts.entry(tid).or_insert(0) += 1;
            }
        }
        let mut v = SparseVector::from_pairs(
            tf_counts.into_iter().map(|(tid, c)| (tid, self.weighting.tf(c) * self.idf[tid as usize])),
        );
        v.normalize();
        v
    }

    pub fn term_id(&self, term: &str) -> Option<TermId> { self.dictionary.get(term).copied() }

    pub fn document_frequency(&self, term: TermId) -> Option<u32> { self.df.get(term as usize).copied() }

    pub fn idf(&self, term: TermId) -> Option<f32> { self.idf.get(term as usize).copied() }

    pub fn vector(&self, id: SentenceId) -> Option<&SparseVector> { self.vectors.get(id) }

    pub fn vectors(&self) -> &[SparseVector] { &self.vectors }

    pub fn num_terms(&self) -> usize { self.dictionary.len() }

    pub fn num_sentences(&self) -> usize { self.vectors.len() }

    pub fn is_empty(&self) -> bool { self.vectors.is_empty() }

    pub fn analyzer(&self) -> Analyzer { self.analyzer }

    pub fn weighting(&self) -> Weighting { self.weighting }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(sentences: &[&str]) -> TermWeightIndex {
        TermWeightIndex::build(sentences.iter().copied(), Analyzer::default(), Weighting::default())
    }

    #[test]
    fn document_frequency_counts_sentences_not_occurrences() {
        let idx = index(&["the cat and the hat", "the dog"]);
        let the = idx.term_id("the").unwrap();
        let cat = idx.term_id("cat").unwrap();
        assert_eq!(idx.document_frequency(the), Some(2));
        assert_eq!(idx.document_frequency(cat), Some(1));
        assert_eq!(idx.num_terms(), 5);
    }

    #[test]
    fn smooth_idf_matches_formula() {
        let idx = index(&["alpha beta", "alpha gamma", "delta"]);
        let alpha = idx.term_id("alpha").unwrap();
        let expected = (4.0f32 / 3.0).ln() + 1.0;
        assert!((idx.idf(alpha).unwrap() - expected).abs() < 1e-6);
    }

    #[test]
    fn unsmoothed_idf_and_sublinear_tf() {
        let w = Weighting { smooth_idf: false, sublinear_tf: true };
        assert!((w.idf(4, 2) - (2.0f32.ln() + 1.0)).abs() < 1e-6);
        assert!((w.tf(3) - (1.0 + 3.0f32.ln())).abs() < 1e-6);
        assert_eq!(w.tf(0), 0.0);
    }

    #[test]
    fn sentence_vectors_are_unit_length() {
        let idx = index(&["the cat sat on the mat", "dogs bark loudly"]);
        for v in idx.vectors() {
            assert!((v.norm() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn rarer_terms_weigh_more() {
        let idx = index(&["common rare", "common", "common"]);
        let v = idx.vector(0).unwrap();
        let common = v.get(idx.term_id("common").unwrap()).unwrap();
        let rare = v.get(idx.term_id("rare").unwrap()).unwrap();
        assert!(rare > common);
    }

    #[test]
    fn vectorize_ignores_unknown_terms() {
        let idx = index(&["the cat sat"]);
        let before = idx.num_terms();
        assert!(idx.vectorize("quantum physics").is_empty());
        assert_eq!(idx.vectorize("cat quantum").len(), 1);
        assert_eq!(idx.num_terms(), before);
    }

    #[test]
    fn untokenizable_sentence_has_empty_vector() {
        let idx = index(&["!!!", "real words here"]);
        assert_eq!(idx.num_sentences(), 2);
        assert!(idx.vector(0).unwrap().is_empty());
    }
}
