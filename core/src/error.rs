//! Error types for the emotion client.
//!
//! # Design
//! A 400 from the service is not an error: it is the "invalid input" signal
//! and comes back as an all-null `EmotionScores`. Everything else that keeps
//! the client from producing scores is reported here so callers never get a
//! silently coerced record.

use thiserror::Error;

/// Errors returned by `EmotionClient`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be sent or the response body could not be read.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The service answered with a status other than 400 outside 2xx.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body is not the expected prediction JSON.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The response carried an empty `emotionPredictions` array.
    #[error("response contains no emotion predictions")]
    MissingPrediction,

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// A configuration value could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}
