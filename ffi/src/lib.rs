//! C-ABI wrapper around `emotion-core`.
//!
//! # Overview
//! Exposes emotion analysis through `extern "C"` functions. Hosts can either
//! run the whole round trip with `emotion_analyze`, or keep the network in
//! their own hands: `emotion_build_analyze` yields the request as plain data
//! and `emotion_parse_analyze` turns the host's response into scores.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - A single `FfiEmotionResult` envelope carries scores and errors
//!   uniformly; scores are inline, so freeing the envelope frees everything.
//! - The C caller owns all returned pointers and must call the matching
//!   `emotion_free_*` function to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::catch_unwind;

use emotion_core::{ApiError, ClientConfig, EmotionClient, HttpResponse};

use types::*;

/// Borrow a C string as `&str`. `None` for null or non-UTF-8 input.
fn c_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new `EmotionClient`.
///
/// A null `endpoint` selects the default Watson endpoint; otherwise requests
/// go to `endpoint`. Returns null if `endpoint` is not valid UTF-8 or if an
/// internal panic occurs. The caller must free the returned pointer with
/// `emotion_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn emotion_client_new(endpoint: *const c_char) -> *mut FfiEmotionClient {
    catch_unwind(|| {
        let config = if endpoint.is_null() {
            ClientConfig::default()
        } else {
            match c_str(endpoint) {
                Some(url) => ClientConfig::default().with_endpoint(url),
                None => return std::ptr::null_mut(),
            }
        };
        let client = EmotionClient::with_config(config);
        Box::into_raw(Box::new(FfiEmotionClient { inner: client }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `emotion_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn emotion_client_free(client: *mut FfiEmotionClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Host-does-IO: build and parse
// ---------------------------------------------------------------------------

/// Build the EmotionPredict request for `text`.
///
/// Returns null if `client` or `text` is null, if `text` is not valid UTF-8,
/// or if serialization fails. The caller must free the returned pointer
/// with `emotion_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn emotion_build_analyze(
    client: *const FfiEmotionClient,
    text: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let Some(text) = c_str(text) else {
            return std::ptr::null_mut();
        };
        let client = unsafe { &*client };
        match client.inner.build_analyze(text) {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Convert an `FfiHttpResponse` to a core `HttpResponse`. A null body is
/// treated as empty; a body that is not UTF-8 is a deserialization error.
fn ffi_response_to_core(resp: &FfiHttpResponse) -> Result<HttpResponse, ApiError> {
    let body = if resp.body.is_null() {
        String::new()
    } else {
        unsafe { CStr::from_ptr(resp.body) }
            .to_str()
            .map_err(|e| {
                ApiError::DeserializationError(format!("response body is not valid UTF-8: {e}"))
            })?
            .to_string()
    };
    Ok(HttpResponse {
        status: resp.status,
        headers: Vec::new(),
        body,
    })
}

/// Parse the host's response to an EmotionPredict request.
///
/// A 400 yields `error_code = Ok` with `scores.has_scores = false`.
#[unsafe(no_mangle)]
pub extern "C" fn emotion_parse_analyze(
    client: *const FfiEmotionClient,
    response: *const FfiHttpResponse,
) -> *mut FfiEmotionResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiEmotionResult::null_arg("client");
        }
        if response.is_null() {
            return FfiEmotionResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        let core_resp = match ffi_response_to_core(resp) {
            Ok(r) => r,
            Err(e) => return FfiEmotionResult::from_error(e),
        };
        match client.inner.parse_analyze(core_resp) {
            Ok(scores) => FfiEmotionResult::ok(scores),
            Err(e) => FfiEmotionResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiEmotionResult::panic("panic in emotion_parse_analyze"))
}

// ---------------------------------------------------------------------------
// Full round trip
// ---------------------------------------------------------------------------

/// Analyze `text` with a blocking HTTP round trip.
///
/// Same result semantics as `emotion_parse_analyze`; network failures are
/// reported with `error_code = Transport`.
#[unsafe(no_mangle)]
pub extern "C" fn emotion_analyze(
    client: *const FfiEmotionClient,
    text: *const c_char,
) -> *mut FfiEmotionResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiEmotionResult::null_arg("client");
        }
        let Some(text) = c_str(text) else {
            return FfiEmotionResult::null_arg("text");
        };
        let client = unsafe { &*client };
        match client.inner.analyze(text) {
            Ok(scores) => FfiEmotionResult::ok(scores),
            Err(e) => FfiEmotionResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiEmotionResult::panic("panic in emotion_analyze"))
}

/// Static lowercase label for an emotion, or null for `None`. Must not be
/// freed.
#[unsafe(no_mangle)]
pub extern "C" fn emotion_label(emotion: FfiEmotion) -> *const c_char {
    let label: &'static CStr = match emotion {
        FfiEmotion::None => return std::ptr::null(),
        FfiEmotion::Anger => c"anger",
        FfiEmotion::Disgust => c"disgust",
        FfiEmotion::Fear => c"fear",
        FfiEmotion::Joy => c"joy",
        FfiEmotion::Sadness => c"sadness",
    };
    label.as_ptr()
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest` returned by `emotion_build_analyze`.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn emotion_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        if !req.url.is_null() {
            drop(unsafe { CString::from_raw(req.url) });
        }
        if !req.body.is_null() {
            drop(unsafe { CString::from_raw(req.body) });
        }
        if !req.headers.is_null() && req.headers_len > 0 {
            let headers: Box<[FfiHeader]> = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                    req.headers,
                    req.headers_len as usize,
                ))
            };
            for h in headers.iter() {
                if !h.key.is_null() {
                    drop(unsafe { CString::from_raw(h.key) });
                }
                if !h.value.is_null() {
                    drop(unsafe { CString::from_raw(h.value) });
                }
            }
        }
    });
}

/// Free an `FfiEmotionResult` returned by `emotion_parse_analyze` or
/// `emotion_analyze`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn emotion_free_result(result: *mut FfiEmotionResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        if !result.error_message.is_null() {
            drop(unsafe { CString::from_raw(result.error_message) });
        }
    });
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    const PREDICTION: &str = r#"{"emotionPredictions":[{"emotion":{"anger":0.01,"disgust":0.02,"fear":0.03,"joy":0.04,"sadness":0.9}}]}"#;

    fn default_client() -> *mut FfiEmotionClient {
        emotion_client_new(std::ptr::null())
    }

    fn header_pairs(req: &FfiHttpRequest) -> Vec<(String, String)> {
        let headers = unsafe { std::slice::from_raw_parts(req.headers, req.headers_len as usize) };
        headers
            .iter()
            .map(|h| {
                let k = unsafe { CStr::from_ptr(h.key) }.to_str().unwrap().to_string();
                let v = unsafe { CStr::from_ptr(h.value) }.to_str().unwrap().to_string();
                (k, v)
            })
            .collect()
    }

    #[test]
    fn client_new_and_free() {
        let url = CString::new("http://localhost:3000/predict").unwrap();
        let client = emotion_client_new(url.as_ptr());
        assert!(!client.is_null());
        emotion_client_free(client);
    }

    #[test]
    fn client_new_null_uses_default_endpoint() {
        let client = default_client();
        assert!(!client.is_null());
        let text = CString::new("hello").unwrap();
        let req = emotion_build_analyze(client, text.as_ptr());
        let url = unsafe { CStr::from_ptr((*req).url) }.to_str().unwrap();
        assert_eq!(url, emotion_core::config::DEFAULT_ENDPOINT);

        emotion_free_request(req);
        emotion_client_free(client);
    }

    #[test]
    fn client_free_null_is_safe() {
        emotion_client_free(std::ptr::null_mut());
    }

    #[test]
    fn build_analyze_returns_watson_request() {
        let url = CString::new("http://localhost:3000/predict").unwrap();
        let client = emotion_client_new(url.as_ptr());
        let text = CString::new("I am so sad about this").unwrap();
        let req = emotion_build_analyze(client, text.as_ptr());
        assert!(!req.is_null());

        let req_ref = unsafe { &*req };
        assert!(matches!(req_ref.method, FfiHttpMethod::Post));
        let path = unsafe { CStr::from_ptr(req_ref.url) }.to_str().unwrap();
        assert_eq!(path, "http://localhost:3000/predict");

        assert_eq!(
            header_pairs(req_ref),
            vec![
                ("content-type".to_string(), "application/json".to_string()),
                (
                    "grpc-metadata-mm-model-id".to_string(),
                    "emotion_aggregated-workflow_lang_en_stock".to_string()
                ),
            ]
        );

        let body_str = unsafe { CStr::from_ptr(req_ref.body) }.to_str().unwrap();
        let body: serde_json::Value = serde_json::from_str(body_str).unwrap();
        assert_eq!(body["raw_document"]["text"], "I am so sad about this");

        emotion_free_request(req);
        emotion_client_free(client);
    }

    #[test]
    fn build_analyze_null_args_return_null() {
        let text = CString::new("hello").unwrap();
        assert!(emotion_build_analyze(std::ptr::null(), text.as_ptr()).is_null());

        let client = default_client();
        assert!(emotion_build_analyze(client, std::ptr::null()).is_null());
        emotion_client_free(client);
    }

    #[test]
    fn parse_analyze_success() {
        let client = default_client();
        let body = CString::new(PREDICTION).unwrap();
        let resp = FfiHttpResponse {
            status: 200,
            body: body.as_ptr(),
        };
        let result = emotion_parse_analyze(client, &resp);
        assert!(!result.is_null());

        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);
        assert!(r.error_message.is_null());
        assert!(r.scores.has_scores);
        assert_eq!(r.scores.sadness, 0.9);
        assert_eq!(r.scores.dominant_emotion, FfiEmotion::Sadness);

        emotion_free_result(result);
        emotion_client_free(client);
    }

    #[test]
    fn parse_analyze_400_has_no_scores() {
        let client = default_client();
        let body = CString::new(r#"{"code":3,"message":"empty"}"#).unwrap();
        let resp = FfiHttpResponse {
            status: 400,
            body: body.as_ptr(),
        };
        let result = emotion_parse_analyze(client, &resp);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);
        assert!(!r.scores.has_scores);
        assert_eq!(r.scores.dominant_emotion, FfiEmotion::None);

        emotion_free_result(result);
        emotion_client_free(client);
    }

    #[test]
    fn parse_analyze_server_error() {
        let client = default_client();
        let resp = FfiHttpResponse {
            status: 503,
            body: std::ptr::null(),
        };
        let result = emotion_parse_analyze(client, &resp);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Http);
        assert_eq!(r.http_status, 503);
        assert!(!r.error_message.is_null());
        assert!(!r.scores.has_scores);

        emotion_free_result(result);
        emotion_client_free(client);
    }

    #[test]
    fn parse_analyze_bad_json() {
        let client = default_client();
        let body = CString::new("not json").unwrap();
        let resp = FfiHttpResponse {
            status: 200,
            body: body.as_ptr(),
        };
        let result = emotion_parse_analyze(client, &resp);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Deserialization);

        emotion_free_result(result);
        emotion_client_free(client);
    }

    #[test]
    fn parse_analyze_non_utf8_body_names_the_body() {
        let client = default_client();
        let body = CString::new(vec![b'{', 0xff, 0xfe, b'}']).unwrap();
        let resp = FfiHttpResponse {
            status: 200,
            body: body.as_ptr(),
        };
        let result = emotion_parse_analyze(client, &resp);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Deserialization);
        assert!(!r.scores.has_scores);
        let msg = unsafe { CStr::from_ptr(r.error_message) }.to_str().unwrap();
        assert!(msg.contains("not valid UTF-8"), "{msg}");

        emotion_free_result(result);
        emotion_client_free(client);
    }

    #[test]
    fn generated_header_stays_out_of_source_tree() {
        if let Some(header) = option_env!("EMOTION_FFI_HEADER") {
            assert!(header.starts_with(env!("OUT_DIR")), "{header}");
        }
        let include = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("include");
        assert!(!include.exists());
    }

    #[test]
    fn parse_analyze_empty_predictions() {
        let client = default_client();
        let body = CString::new(r#"{"emotionPredictions":[]}"#).unwrap();
        let resp = FfiHttpResponse {
            status: 200,
            body: body.as_ptr(),
        };
        let result = emotion_parse_analyze(client, &resp);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::MissingPrediction);

        emotion_free_result(result);
        emotion_client_free(client);
    }

    #[test]
    fn parse_null_client_returns_null_arg() {
        let body = CString::new(PREDICTION).unwrap();
        let resp = FfiHttpResponse {
            status: 200,
            body: body.as_ptr(),
        };
        let result = emotion_parse_analyze(std::ptr::null(), &resp);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::NullArg);

        emotion_free_result(result);
    }

    #[test]
    fn parse_null_response_returns_null_arg() {
        let client = default_client();
        let result = emotion_parse_analyze(client, std::ptr::null());
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::NullArg);

        emotion_free_result(result);
        emotion_client_free(client);
    }

    #[test]
    fn analyze_null_text_returns_null_arg() {
        let client = default_client();
        let result = emotion_analyze(client, std::ptr::null());
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::NullArg);

        emotion_free_result(result);
        emotion_client_free(client);
    }

    #[test]
    fn labels_match_field_names() {
        let label = |e| unsafe { CStr::from_ptr(emotion_label(e)) }.to_str().unwrap();
        assert_eq!(label(FfiEmotion::Anger), "anger");
        assert_eq!(label(FfiEmotion::Disgust), "disgust");
        assert_eq!(label(FfiEmotion::Fear), "fear");
        assert_eq!(label(FfiEmotion::Joy), "joy");
        assert_eq!(label(FfiEmotion::Sadness), "sadness");
        assert!(emotion_label(FfiEmotion::None).is_null());
    }

    #[test]
    fn free_request_null_is_safe() {
        emotion_free_request(std::ptr::null_mut());
    }

    #[test]
    fn free_result_null_is_safe() {
        emotion_free_result(std::ptr::null_mut());
    }
}
