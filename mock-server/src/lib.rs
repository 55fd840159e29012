//! Local stand-in for the Watson NLP EmotionPredict endpoint.
//!
//! Scores come from a fixed keyword lexicon: every known word in the text
//! lifts its category above a per-category baseline. That is enough for
//! clients to observe distinct dominant emotions, the 400 "invalid input"
//! answer for blank text, and a 404 for an unknown model id.

use axum::{
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::{debug, info};

pub const EMOTION_PREDICT_PATH: &str = "/v1/watson.runtime.nlp.v1/NlpService/EmotionPredict";
pub const MODEL_ID_HEADER: &str = "grpc-metadata-mm-model-id";
pub const MODEL_ID: &str = "emotion_aggregated-workflow_lang_en_stock";

/// gRPC status codes carried in error bodies.
const GRPC_INVALID_ARGUMENT: i32 = 3;
const GRPC_NOT_FOUND: i32 = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictRequest {
    pub raw_document: RawDocument,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDocument {
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    pub anger: f64,
    pub disgust: f64,
    pub fear: f64,
    pub joy: f64,
    pub sadness: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    #[serde(rename = "emotionPredictions")]
    pub emotion_predictions: Vec<Prediction>,
    #[serde(rename = "producerId")]
    pub producer_id: ProducerId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub emotion: Scores,
    pub target: String,
    #[serde(rename = "emotionMentions")]
    pub emotion_mentions: Vec<Mention>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mention {
    pub span: Span,
    pub emotion: Scores,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Span {
    pub begin: usize,
    pub end: usize,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProducerId {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: i32,
    pub message: String,
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorBody>)>;

pub fn app() -> Router {
    Router::new().route(EMOTION_PREDICT_PATH, post(emotion_predict))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn emotion_predict(
    headers: HeaderMap,
    Json(input): Json<PredictRequest>,
) -> ApiResult<PredictResponse> {
    let model = headers
        .get(MODEL_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if model != MODEL_ID {
        info!(model, "rejecting request for unknown model");
        return Err(error(
            StatusCode::NOT_FOUND,
            GRPC_NOT_FOUND,
            format!("model '{model}' is not loaded"),
        ));
    }

    let text = input.raw_document.text;
    if text.trim().is_empty() {
        info!("rejecting blank document");
        return Err(error(
            StatusCode::BAD_REQUEST,
            GRPC_INVALID_ARGUMENT,
            "raw_document.text must not be empty".to_string(),
        ));
    }

    let emotion = score_text(&text);
    debug!(?emotion, "scored document");
    Ok(Json(PredictResponse {
        emotion_predictions: vec![Prediction {
            emotion,
            target: String::new(),
            emotion_mentions: vec![Mention {
                span: Span {
                    begin: 0,
                    end: text.chars().count(),
                    text,
                },
                emotion,
            }],
        }],
        producer_id: ProducerId {
            name: "Ensemble Aggregated Emotion Workflow".to_string(),
            version: "0.0.1".to_string(),
        },
    }))
}

fn error(status: StatusCode, code: i32, message: String) -> (StatusCode, Json<ErrorBody>) {
    (status, Json(ErrorBody { code, message }))
}

const ANGER_WORDS: &[&str] = &["mad", "angry", "furious", "rage", "annoyed", "hate"];
const DISGUST_WORDS: &[&str] = &["disgusted", "disgusting", "gross", "revolting", "nasty"];
const FEAR_WORDS: &[&str] = &["afraid", "scared", "fear", "terrified", "frightened", "worried"];
const JOY_WORDS: &[&str] = &["glad", "happy", "joy", "delighted", "love", "great"];
const SADNESS_WORDS: &[&str] = &["sad", "unhappy", "miserable", "depressed", "sorrow", "cry"];

const KEYWORD_WEIGHT: f64 = 0.45;

/// Score `text` against the keyword lexicon. Deterministic, each score in
/// `[0, 1]`.
pub fn score_text(text: &str) -> Scores {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| !c.is_alphabetic())
        .filter(|w| !w.is_empty())
        .collect();
    let hits = |lexicon: &[&str]| words.iter().filter(|w| lexicon.contains(*w)).count() as f64;
    let score = |baseline: f64, lexicon: &[&str]| (baseline + KEYWORD_WEIGHT * hits(lexicon)).min(0.99);

    Scores {
        anger: score(0.05, ANGER_WORDS),
        disgust: score(0.03, DISGUST_WORDS),
        fear: score(0.06, FEAR_WORDS),
        joy: score(0.12, JOY_WORDS),
        sadness: score(0.08, SADNESS_WORDS),
    }
}
