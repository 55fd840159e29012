//! Domain types and wire DTOs for the emotion service.
//!
//! # Design
//! The wire DTOs (`AnalyzeRequest`, `EmotionPredictResponse` and friends)
//! mirror the Watson JSON shapes. They are public so hosts doing their own
//! I/O can build or inspect payloads, and `EmotionMap` doubles as the input
//! to `dominant_emotion`. `EmotionScores` is the flat record handed to
//! callers; every field is optional so the "invalid input" answer can be
//! expressed as all nulls.
//! The mock-server crate defines its own copies of the wire shapes;
//! integration tests catch any drift between the two.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the five emotion categories scored by the service.
///
/// Declaration order is the tie-break order for dominant-emotion selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Anger,
    Disgust,
    Fear,
    Joy,
    Sadness,
}

impl Emotion {
    /// All categories in tie-break order.
    pub const ALL: [Emotion; 5] = [
        Emotion::Anger,
        Emotion::Disgust,
        Emotion::Fear,
        Emotion::Joy,
        Emotion::Sadness,
    ];

    /// The JSON field name for this category.
    pub fn as_str(self) -> &'static str {
        match self {
            Emotion::Anger => "anger",
            Emotion::Disgust => "disgust",
            Emotion::Fear => "fear",
            Emotion::Joy => "joy",
            Emotion::Sadness => "sadness",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown emotion: {0}")]
pub struct ParseEmotionError(pub String);

impl FromStr for Emotion {
    type Err = ParseEmotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Emotion::ALL
            .into_iter()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| ParseEmotionError(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Wire DTOs
// ---------------------------------------------------------------------------

/// Request payload: `{"raw_document": {"text": ...}}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalyzeRequest {
    pub raw_document: RawDocument,
}

impl AnalyzeRequest {
    pub fn new(text: &str) -> Self {
        Self {
            raw_document: RawDocument {
                text: text.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawDocument {
    pub text: String,
}

/// Successful response body. Only the first prediction is consulted.
#[derive(Debug, Clone, Deserialize)]
pub struct EmotionPredictResponse {
    #[serde(rename = "emotionPredictions")]
    pub emotion_predictions: Vec<EmotionPrediction>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmotionPrediction {
    pub emotion: EmotionMap,
}

/// The five raw scores of one prediction. All fields are required.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmotionMap {
    pub anger: f64,
    pub disgust: f64,
    pub fear: f64,
    pub joy: f64,
    pub sadness: f64,
}

impl EmotionMap {
    pub fn get(&self, emotion: Emotion) -> f64 {
        match emotion {
            Emotion::Anger => self.anger,
            Emotion::Disgust => self.disgust,
            Emotion::Fear => self.fear,
            Emotion::Joy => self.joy,
            Emotion::Sadness => self.sadness,
        }
    }
}

/// Pick the category with the highest score.
///
/// Only a strictly greater score displaces the current best, so ties go to
/// the category that comes first in [`Emotion::ALL`].
pub fn dominant_emotion(scores: &EmotionMap) -> Emotion {
    let mut best = Emotion::ALL[0];
    let mut best_score = scores.get(best);
    for emotion in &Emotion::ALL[1..] {
        let score = scores.get(*emotion);
        if score > best_score {
            best = *emotion;
            best_score = score;
        }
    }
    best
}

// ---------------------------------------------------------------------------
// Result record
// ---------------------------------------------------------------------------

/// Flat result of one analysis.
///
/// Either all six fields are present, or all are `None` (the service
/// rejected the input).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmotionScores {
    pub anger: Option<f64>,
    pub disgust: Option<f64>,
    pub fear: Option<f64>,
    pub joy: Option<f64>,
    pub sadness: Option<f64>,
    pub dominant_emotion: Option<Emotion>,
}

impl EmotionScores {
    /// The all-null record returned when the service answers 400.
    pub fn invalid_input() -> Self {
        Self {
            anger: None,
            disgust: None,
            fear: None,
            joy: None,
            sadness: None,
            dominant_emotion: None,
        }
    }

    pub fn from_emotion_map(map: &EmotionMap) -> Self {
        Self {
            anger: Some(map.anger),
            disgust: Some(map.disgust),
            fear: Some(map.fear),
            joy: Some(map.joy),
            sadness: Some(map.sadness),
            dominant_emotion: Some(dominant_emotion(map)),
        }
    }

    pub fn score(&self, emotion: Emotion) -> Option<f64> {
        match emotion {
            Emotion::Anger => self.anger,
            Emotion::Disgust => self.disgust,
            Emotion::Fear => self.fear,
            Emotion::Joy => self.joy,
            Emotion::Sadness => self.sadness,
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        self.dominant_emotion.is_none()
    }
}
