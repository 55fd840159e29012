//! Client configuration.
//!
//! Defaults reproduce the Watson EmotionPredict wire contract exactly. The
//! environment overlay exists so tests and local runs can point the client at
//! the mock server without code changes.

use std::time::Duration;

use crate::error::ApiError;

/// Watson NLP EmotionPredict endpoint.
pub const DEFAULT_ENDPOINT: &str =
    "https://sn-watson-emotion.labs.skills.network/v1/watson.runtime.nlp.v1/NlpService/EmotionPredict";

/// Header that selects the inference model on the service side.
pub const MODEL_ID_HEADER: &str = "grpc-metadata-mm-model-id";

/// Aggregated English emotion workflow.
pub const DEFAULT_MODEL_ID: &str = "emotion_aggregated-workflow_lang_en_stock";

pub const ENV_ENDPOINT: &str = "EMOTION_ENDPOINT";
pub const ENV_MODEL_ID: &str = "EMOTION_MODEL_ID";
pub const ENV_TIMEOUT_SECS: &str = "EMOTION_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Absolute URL the request is POSTed to.
    pub endpoint: String,
    /// Value of the `grpc-metadata-mm-model-id` header.
    pub model_id: String,
    /// Overall request timeout. `None` waits for the transport's own limits.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model_id: DEFAULT_MODEL_ID.to_string(),
            timeout: None,
        }
    }
}

impl ClientConfig {
    /// Defaults overlaid with `EMOTION_ENDPOINT`, `EMOTION_MODEL_ID` and
    /// `EMOTION_TIMEOUT_SECS` from the process environment.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ApiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(endpoint) = lookup(ENV_ENDPOINT).filter(|v| !v.trim().is_empty()) {
            config.endpoint = endpoint;
        }
        if let Some(model_id) = lookup(ENV_MODEL_ID).filter(|v| !v.trim().is_empty()) {
            config.model_id = model_id;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS).filter(|v| !v.trim().is_empty()) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ApiError::Config(format!("{ENV_TIMEOUT_SECS} must be whole seconds, got {raw:?}"))
            })?;
            // ureq fails every call immediately on a zero timeout.
            if secs == 0 {
                return Err(ApiError::Config(format!(
                    "{ENV_TIMEOUT_SECS} must be at least 1 second; unset it for no timeout"
                )));
            }
            config.timeout = Some(Duration::from_secs(secs));
        }
        Ok(config)
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_model_id(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}
