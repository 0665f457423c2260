use thiserror::Error;

/// Errors raised while building a sentence index.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// Segmentation produced no sentences (blank or punctuation-only upload).
    #[error("document produced no sentences")]
    EmptyCorpus,
}

/// Failures reported by a speech transcriber.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TranscribeError {
    /// Audio was captured but could not be understood.
    #[error("could not understand the audio")]
    RecognitionFailure,
    /// The recognition backend could not be reached or returned an error.
    #[error("speech recognition service unavailable: {0}")]
    ServiceUnavailable(String),
}
