//! Sentence retrieval for a single uploaded document.
//!
//! A document is split into sentences, each sentence becomes a TF-IDF vector,
//! and a query is answered with the most similar sentence by cosine
//! similarity, or a fallback message when nothing clears the threshold.
//!
//! ```
//! use retrieval::{ChatConfig, Session};
//!
//! let session = Session::open("pets.txt", "The cat sat on the mat. Dogs bark loudly.", &ChatConfig::default());
//! assert_eq!(session.respond("Where did the cat sit?"), "The cat sat on the mat.");
//! ```

pub mod config;
pub mod error;
pub mod index;
pub mod indexer;
pub mod matcher;
pub mod segmenter;
pub mod session;
pub mod speech;
pub mod tokenizer;
pub mod vector;

pub use config::ChatConfig;
pub use error::{IndexError, TranscribeError};
pub use index::{SentenceCorpus, SentenceId, TermId, TermWeightIndex, Weighting};
pub use indexer::SentenceIndexer;
pub use matcher::{Match, MatchConfig, Matcher, Reply, DEFAULT_THRESHOLD, FALLBACK_MESSAGE};
pub use segmenter::{RuleSegmenter, Segmenter, SegmenterConfig};
pub use session::Session;
pub use speech::{transcribe_query, Transcriber};
pub use tokenizer::{tokenize, Analyzer};
pub use vector::{cosine_similarity, SparseVector};
