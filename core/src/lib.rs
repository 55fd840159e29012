//! Synchronous client core for the Watson emotion-prediction service.
//!
//! # Overview
//! Sends text to the EmotionPredict endpoint and reshapes the answer into a
//! flat [`EmotionScores`] record: five scores plus the dominant emotion.
//!
//! # Design
//! - `EmotionClient` is stateless; it holds only a `ClientConfig`.
//! - `build_analyze` / `parse_analyze` are pure (host-does-IO), so the FFI
//!   layer and tests can drive them without a network.
//! - `analyze` performs the blocking round trip through a `Transport`
//!   (ureq by default).
//! - A 400 from the service is the "invalid input" answer and yields an
//!   all-null record; every other failure is an `ApiError`.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::EmotionClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::{dominant_emotion, Emotion, EmotionMap, EmotionScores};
