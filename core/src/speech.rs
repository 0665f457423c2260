use crate::error::TranscribeError;

/// Speech-to-text backend. Lives outside the retrieval core; the core only
/// ever sees the transcript.
pub trait Transcriber {
    fn transcribe(&mut self, samples: &[i16]) -> Result<String, TranscribeError>;
}

/// Run a transcription and turn it into a query. Failures and empty
/// transcripts are logged and produce no query at all.
pub fn transcribe_query<T: Transcriber + ?Sized>(transcriber: &mut T, samples: &[i16]) -> Option<String> {
    match transcriber.transcribe(samples) {
        Ok(text) => {
            let text = text.trim();
            if text.is_empty() {
                tracing::warn!("transcription was empty");
                None
            } else {
                Some(text.to_string())
            }
        }
        Err(TranscribeError::RecognitionFailure) => {
            tracing::warn!("could not understand the audio");
            None
        }
        Err(err @ TranscribeError::ServiceUnavailable(_)) => {
            tracing::error!(error = %err, "speech recognition failed");
            None
        }
    }
}
