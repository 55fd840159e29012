//! Request builder and response parser for the emotion service.
//!
//! # Design
//! `EmotionClient` holds only its `ClientConfig` and carries no mutable state
//! between calls. Analysis is split into `build_analyze`, which produces an
//! `HttpRequest`, and `parse_analyze`, which consumes an `HttpResponse`. Both
//! are pure. `analyze_with` glues them around a `Transport`, and `analyze`
//! does the same over the default ureq transport.

use tracing::{debug, warn};

use crate::config::{ClientConfig, MODEL_ID_HEADER};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::{AnalyzeRequest, EmotionPredictResponse, EmotionScores};

/// Status the service uses to reject blank or unusable text.
const INVALID_INPUT_STATUS: u16 = 400;

/// Synchronous, stateless client for the Watson EmotionPredict service.
#[derive(Debug, Clone, Default)]
pub struct EmotionClient {
    config: ClientConfig,
}

impl EmotionClient {
    /// Client bound to the fixed Watson endpoint and model.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build the EmotionPredict request for `text`. No validation is done on
    /// the text; an empty string is sent as-is.
    pub fn build_analyze(&self, text: &str) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(&AnalyzeRequest::new(text))
            .map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: self.config.endpoint.clone(),
            headers: vec![
                ("content-type".to_string(), "application/json".to_string()),
                (MODEL_ID_HEADER.to_string(), self.config.model_id.clone()),
            ],
            body: Some(body),
        })
    }

    /// Interpret an EmotionPredict response.
    ///
    /// A 400 yields [`EmotionScores::invalid_input`]. Any other status
    /// outside 2xx is an `HttpError`. Otherwise the first entry of
    /// `emotionPredictions` is extracted.
    pub fn parse_analyze(&self, response: HttpResponse) -> Result<EmotionScores, ApiError> {
        if response.status == INVALID_INPUT_STATUS {
            warn!(body = %response.body, "service rejected input text");
            return Ok(EmotionScores::invalid_input());
        }
        if !(200..300).contains(&response.status) {
            return Err(ApiError::HttpError {
                status: response.status,
                body: response.body,
            });
        }

        let parsed: EmotionPredictResponse = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))?;
        let first = parsed
            .emotion_predictions
            .first()
            .ok_or(ApiError::MissingPrediction)?;

        let scores = EmotionScores::from_emotion_map(&first.emotion);
        debug!(dominant = ?scores.dominant_emotion, "parsed emotion prediction");
        Ok(scores)
    }

    /// Run one analysis round trip through `transport`.
    pub fn analyze_with<T>(&self, transport: &T, text: &str) -> Result<EmotionScores, ApiError>
    where
        T: Transport + ?Sized,
    {
        let request = self.build_analyze(text)?;
        debug!(chars = text.chars().count(), "analyzing text");
        let response = transport.execute(request)?;
        self.parse_analyze(response)
    }

    /// Run one analysis round trip over a fresh [`UreqTransport`] honoring
    /// the configured timeout. Blocks until the response arrives.
    pub fn analyze(&self, text: &str) -> Result<EmotionScores, ApiError> {
        let transport = UreqTransport::new(self.config.timeout);
        self.analyze_with(&transport, text)
    }
}
