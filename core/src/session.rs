use crate::config::ChatConfig;
use crate::error::IndexError;
use crate::index::{SentenceCorpus, TermWeightIndex};
use crate::indexer::SentenceIndexer;
use crate::matcher::{Matcher, Reply};
use crate::segmenter::Segmenter;
use crate::speech::{transcribe_query, Transcriber};

/// One loaded document and everything built from it.
///
/// A session is created when a document is uploaded and never changes
/// afterwards; uploading another document means building a new session and
/// dropping this one.
#[derive(Debug, Clone)]
pub struct Session {
    source: String,
    sentences: SentenceCorpus,
    index: TermWeightIndex,
    matcher: Matcher,
}

impl Session {
    /// Build a session. A document with no sentences still yields a session;
    /// it answers every query with the fallback message.
    pub fn open(source: impl Into<String>, text: &str, config: &ChatConfig) -> Self {
        Self::with_parts(source, text, &config.indexer(), config.matcher())
    }

    /// Like [`Session::open`] but surfaces an empty corpus as an error.
    pub fn try_open(source: impl Into<String>, text: &str, config: &ChatConfig) -> Result<Self, IndexError> {
        let (sentences, index) = config.indexer().build(text)?;
        Ok(Self { source: source.into(), sentences, index, matcher: config.matcher() })
    }

    pub fn with_parts<S: Segmenter>(
        source: impl Into<String>,
        text: &str,
        indexer: &SentenceIndexer<S>,
        matcher: Matcher,
    ) -> Self {
        let source = source.into();
        let (sentences, index) = match indexer.build(text) {
            Ok(built) => built,
            Err(err) => {
                tracing::warn!(source = %source, error = %err, "document has no usable sentences");
                (SentenceCorpus::default(), TermWeightIndex::empty(indexer.analyzer(), indexer.weighting()))
            }
        };
        Self { source, sentences, index, matcher }
    }

    pub fn reply(&self, query: &str) -> Reply<'_> {
        self.matcher.reply(query, &self.sentences, &self.index)
    }

    pub fn respond(&self, query: &str) -> String {
        self.reply(query).text.to_string()
    }

    /// Answer a spoken query. `None` when transcription failed, in which case
    /// the index is never consulted.
    pub fn respond_to_speech<T: Transcriber + ?Sized>(&self, transcriber: &mut T, samples: &[i16]) -> Option<String> {
        let query = transcribe_query(transcriber, samples)?;
        Some(self.respond(&query))
    }

    pub fn source(&self) -> &str { &self.source }

    pub fn sentences(&self) -> &SentenceCorpus { &self.sentences }

    pub fn index(&self) -> &TermWeightIndex { &self.index }

    pub fn matcher(&self) -> &Matcher { &self.matcher }

    pub fn is_empty(&self) -> bool { self.sentences.is_empty() }
}
