use crate::error::IndexError;
use crate::index::{SentenceCorpus, TermWeightIndex, Weighting};
use crate::segmenter::{RuleSegmenter, Segmenter};
use crate::tokenizer::Analyzer;

/// Turns document text into a sentence corpus and its term-weight index.
#[derive(Debug, Clone, Default)]
pub struct SentenceIndexer<S = RuleSegmenter> {
    segmenter: S,
    analyzer: Analyzer,
    weighting: Weighting,
}

impl<S: Segmenter> SentenceIndexer<S> {
    pub fn new(segmenter: S, analyzer: Analyzer, weighting: Weighting) -> Self {
        Self { segmenter, analyzer, weighting }
    }

    pub fn analyzer(&self) -> Analyzer { self.analyzer }

    pub fn weighting(&self) -> Weighting { self.weighting }

    /// Fails with [`IndexError::EmptyCorpus`] when segmentation yields nothing.
    pub fn build(&self, text: &str) -> Result<(SentenceCorpus, TermWeightIndex), IndexError> {
        let sentences = self.segmenter.segment(text);
        if sentences.is_empty() {
            return Err(IndexError::EmptyCorpus);
        }
        let index = TermWeightIndex::build(sentences.iter().copied(), self.analyzer, self.weighting);
        tracing::info!(num_sentences = sentences.len(), num_terms = index.num_terms(), "indexed document");
        Ok((SentenceCorpus::new(sentences), index))
    }
}
