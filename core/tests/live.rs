//! Smoke tests against the real Watson EmotionPredict service.
//!
//! Scores depend on the remote model, so only the dominant label is checked.
//! Ignored by default; run with `cargo test -p emotion-core --test live -- --ignored`.

use emotion_core::{Emotion, EmotionClient};

fn dominant(text: &str) -> Option<Emotion> {
    EmotionClient::new().analyze(text).unwrap().dominant_emotion
}

#[test]
#[ignore = "requires network access to the Watson service"]
fn joy() {
    assert_eq!(dominant("I am glad this happened"), Some(Emotion::Joy));
}

#[test]
#[ignore = "requires network access to the Watson service"]
fn anger() {
    assert_eq!(dominant("I am really mad about this"), Some(Emotion::Anger));
}

#[test]
#[ignore = "requires network access to the Watson service"]
fn disgust() {
    assert_eq!(dominant("I feel disgusted just hearing about this"), Some(Emotion::Disgust));
}

#[test]
#[ignore = "requires network access to the Watson service"]
fn sadness() {
    assert_eq!(dominant("I am so sad about this"), Some(Emotion::Sadness));
}

#[test]
#[ignore = "requires network access to the Watson service"]
fn fear() {
    assert_eq!(dominant("I am really afraid that this will happen"), Some(Emotion::Fear));
}

#[test]
#[ignore = "requires network access to the Watson service"]
fn empty_text_is_rejected() {
    assert_eq!(dominant(""), None);
}
