//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers instead of `Vec`, and
//! enums with explicit discriminants. Nullable scores are flattened into
//! `FfiEmotionScores` with a `has_scores` flag so the result needs no second
//! allocation. Conversion functions live here to keep `lib.rs` focused on
//! the `extern "C"` surface.

use std::ffi::CString;
use std::os::raw::c_char;

use emotion_core::{ApiError, Emotion, EmotionScores, HttpMethod};

/// Opaque handle to an `EmotionClient`. C callers receive a pointer to this
/// and pass it back into every FFI function.
pub struct FfiEmotionClient {
    pub(crate) inner: emotion_core::EmotionClient,
}

/// Move a Rust string into a heap C string. Interior NULs yield "".
pub(crate) fn to_c_string(s: String) -> *mut c_char {
    CString::new(s).unwrap_or_default().into_raw()
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
pub enum FfiHttpMethod {
    Post = 0,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Post => FfiHttpMethod::Post,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request described as C-compatible plain data.
///
/// Built by `emotion_build_analyze`. The C caller executes the request
/// and passes the response back through `emotion_parse_analyze`.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: emotion_core::HttpRequest) -> *mut Self {
        let url = to_c_string(req.url);
        let body = match req.body {
            Some(b) => to_c_string(b),
            None => std::ptr::null_mut(),
        };

        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Box<[FfiHeader]> = req
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: to_c_string(k),
                    value: to_c_string(v),
                })
                .collect();
            Box::into_raw(ffi_headers) as *mut FfiHeader
        };

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            url,
            headers,
            headers_len,
            body,
        }))
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller constructs this on the stack after executing the request,
/// then passes a pointer to `emotion_parse_analyze`. The FFI layer reads
/// but does not free these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiEmotionResult`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    Http = 1,
    Deserialization = 2,
    MissingPrediction = 3,
    Serialization = 4,
    Transport = 5,
    Config = 6,
    Panic = 7,
    NullArg = 8,
}

/// Dominant emotion as a C enum. `None` means the service rejected the input.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiEmotion {
    None = 0,
    Anger = 1,
    Disgust = 2,
    Fear = 3,
    Joy = 4,
    Sadness = 5,
}

impl From<Option<Emotion>> for FfiEmotion {
    fn from(e: Option<Emotion>) -> Self {
        match e {
            None => FfiEmotion::None,
            Some(Emotion::Anger) => FfiEmotion::Anger,
            Some(Emotion::Disgust) => FfiEmotion::Disgust,
            Some(Emotion::Fear) => FfiEmotion::Fear,
            Some(Emotion::Joy) => FfiEmotion::Joy,
            Some(Emotion::Sadness) => FfiEmotion::Sadness,
        }
    }
}

/// Emotion scores exposed to C.
///
/// When `has_scores` is false every score is 0.0 and `dominant_emotion`
/// is `None`.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FfiEmotionScores {
    pub has_scores: bool,
    pub anger: f64,
    pub disgust: f64,
    pub fear: f64,
    pub joy: f64,
    pub sadness: f64,
    pub dominant_emotion: FfiEmotion,
}

impl FfiEmotionScores {
    fn empty() -> Self {
        Self {
            has_scores: false,
            anger: 0.0,
            disgust: 0.0,
            fear: 0.0,
            joy: 0.0,
            sadness: 0.0,
            dominant_emotion: FfiEmotion::None,
        }
    }
}

impl From<EmotionScores> for FfiEmotionScores {
    fn from(s: EmotionScores) -> Self {
        if s.is_invalid_input() {
            return Self::empty();
        }
        Self {
            has_scores: true,
            anger: s.anger.unwrap_or_default(),
            disgust: s.disgust.unwrap_or_default(),
            fear: s.fear.unwrap_or_default(),
            joy: s.joy.unwrap_or_default(),
            sadness: s.sadness.unwrap_or_default(),
            dominant_emotion: s.dominant_emotion.into(),
        }
    }
}

/// Result envelope for parse and analyze operations.
///
/// On success `error_code` is `Ok`, `error_message` is null and `scores`
/// holds the record (check `scores.has_scores` for the invalid-input case).
/// On failure `error_code` describes the category, `error_message` is a
/// human-readable C string and `scores.has_scores` is false.
#[repr(C)]
pub struct FfiEmotionResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub scores: FfiEmotionScores,
}

impl FfiEmotionResult {
    fn boxed(
        error_code: FfiErrorCode,
        error_message: *mut c_char,
        http_status: u16,
        scores: FfiEmotionScores,
    ) -> *mut Self {
        Box::into_raw(Box::new(FfiEmotionResult {
            error_code,
            error_message,
            http_status,
            scores,
        }))
    }

    /// Build a success result.
    pub(crate) fn ok(scores: EmotionScores) -> *mut Self {
        Self::boxed(FfiErrorCode::Ok, std::ptr::null_mut(), 0, scores.into())
    }

    /// Build an error result from an `ApiError`.
    pub(crate) fn from_error(err: ApiError) -> *mut Self {
        let (error_code, http_status) = match &err {
            ApiError::HttpError { status, .. } => (FfiErrorCode::Http, *status),
            ApiError::DeserializationError(_) => (FfiErrorCode::Deserialization, 0),
            ApiError::MissingPrediction => (FfiErrorCode::MissingPrediction, 0),
            ApiError::SerializationError(_) => (FfiErrorCode::Serialization, 0),
            ApiError::Transport(_) => (FfiErrorCode::Transport, 0),
            ApiError::Config(_) => (FfiErrorCode::Config, 0),
        };
        let msg = to_c_string(err.to_string());
        Self::boxed(error_code, msg, http_status, FfiEmotionScores::empty())
    }

    /// Build an error result for a null or non-UTF-8 argument.
    pub(crate) fn null_arg(name: &str) -> *mut Self {
        let msg = format!("null or invalid argument: {name}");
        Self::boxed(FfiErrorCode::NullArg, to_c_string(msg), 0, FfiEmotionScores::empty())
    }

    /// Build an error result for a caught panic.
    pub(crate) fn panic(msg: &str) -> *mut Self {
        let msg = to_c_string(msg.to_string());
        Self::boxed(FfiErrorCode::Panic, msg, 0, FfiEmotionScores::empty())
    }
}
