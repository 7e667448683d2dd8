//! Core `Translator` trait and `GoogleTranslator` implementation.
//!
//! `GoogleTranslator` calls the public, unauthenticated `translate_a/single`
//! endpoint.  All connection details come from [`TranslateConfig`]; nothing
//! is hardcoded.

use async_trait::async_trait;
use thiserror::Error;

use crate::config::TranslateConfig;

// ---------------------------------------------------------------------------
// TranslateError
// ---------------------------------------------------------------------------

/// Errors that can occur during translation.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// HTTP transport or connection error.
    #[error("translation request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("translation request timed out")]
    Timeout,

    /// The HTTP response could not be parsed as expected JSON.
    #[error("failed to parse translation response: {0}")]
    Parse(String),

    /// The backend returned a response with no usable text content.
    #[error("translation returned an empty response")]
    EmptyResponse,

    /// The backend rejected the source/target language pair.
    #[error("unsupported language pair: {0}")]
    UnsupportedPair(String),
}

impl From<reqwest::Error> for TranslateError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TranslateError::Timeout
        } else {
            TranslateError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Translator trait
// ---------------------------------------------------------------------------

/// Async trait for text translation.
///
/// Implementors must be `Send + Sync` so they can be shared across threads
/// (e.g. wrapped in `Arc<dyn Translator>`).
///
/// # Arguments
/// * `text`   – Cleaned source text to translate.
/// * `target` – Target language as an ISO-639-1 code (e.g. `"tr"`).
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, target: &str) -> Result<String, TranslateError>;
}

// ---------------------------------------------------------------------------
// GoogleTranslator
// ---------------------------------------------------------------------------

/// Calls the public `translate_a/single?client=gtx` endpoint.
///
/// The endpoint takes the source text as a query parameter and answers with
/// a nested JSON array whose first element lists translated sentence
/// segments.  Source language is auto-detected server-side (`sl=auto`).
///
/// # No hardcoded URLs
/// The base URL and timeout come exclusively from the [`TranslateConfig`]
/// passed to [`GoogleTranslator::from_config`].
pub struct GoogleTranslator {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleTranslator {
    /// Build a `GoogleTranslator` from application config.
    ///
    /// The HTTP client is pre-configured with the per-request timeout from
    /// `config.timeout_secs`.  A default (no-timeout) client is used as a
    /// last-resort fallback if the builder fails (should never happen in
    /// practice).
    pub fn from_config(config: &TranslateConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: config.base_url.clone(),
        }
    }

    /// Extract the translated text from the endpoint's nested-array response:
    /// `[[["Merhaba Dünya","Hello World",…],…],…]`.
    fn parse_response(value: &serde_json::Value) -> Result<String, TranslateError> {
        let sentences = value
            .get(0)
            .and_then(|v| v.as_array())
            .ok_or_else(|| TranslateError::Parse("missing sentence list".into()))?;

        let mut out = String::new();
        for sentence in sentences {
            if let Some(segment) = sentence.get(0).and_then(|s| s.as_str()) {
                out.push_str(segment);
            }
        }

        if out.is_empty() {
            return Err(TranslateError::EmptyResponse);
        }
        Ok(out)
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, target: &str) -> Result<String, TranslateError> {
        let url = format!(
            "{}/translate_a/single?client=gtx&sl=auto&tl={}&dt=t&q={}",
            self.base_url,
            target,
            urlencoding::encode(text)
        );

        let response = self
            .client
            .get(&url)
            .header("User-Agent", "Mozilla/5.0")
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::BAD_REQUEST {
            // The endpoint answers 400 for unknown target codes.
            return Err(TranslateError::UnsupportedPair(format!("auto -> {target}")));
        }
        if !status.is_success() {
            return Err(TranslateError::Request(format!("HTTP {status}")));
        }

        let value: serde_json::Value = response
            .json()
            .await
            .map_err(|e| TranslateError::Parse(e.to_string()))?;

        Self::parse_response(&value)
    }
}

// ---------------------------------------------------------------------------
// MockTranslator  (test-only)
// ---------------------------------------------------------------------------

/// A test double that returns a pre-configured response without any network
/// access.
#[cfg(test)]
enum MockResponse {
    Text(String),
    /// Return the input unchanged.
    Echo,
    Fail(String),
}

#[cfg(test)]
pub struct MockTranslator {
    response: MockResponse,
}

#[cfg(test)]
impl MockTranslator {
    /// Create a mock that always returns `Ok(text)`.
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            response: MockResponse::Text(text.into()),
        }
    }

    /// Create a mock that always fails with a request error carrying `msg`.
    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            response: MockResponse::Fail(msg.into()),
        }
    }

    /// Create a mock that echoes the input back unchanged.
    pub fn echo() -> Self {
        Self {
            response: MockResponse::Echo,
        }
    }
}

#[cfg(test)]
#[async_trait]
impl Translator for MockTranslator {
    async fn translate(&self, text: &str, _target: &str) -> Result<String, TranslateError> {
        match &self.response {
            MockResponse::Text(t) => Ok(t.clone()),
            MockResponse::Echo => Ok(text.to_string()),
            MockResponse::Fail(msg) => Err(TranslateError::Request(msg.clone())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_single_sentence_response() {
        let value = json!([[["Merhaba Dünya", "Hello World", null, null, 10]], null, "en"]);
        assert_eq!(
            GoogleTranslator::parse_response(&value).unwrap(),
            "Merhaba Dünya"
        );
    }

    #[test]
    fn parse_concatenates_sentence_segments() {
        let value = json!([
            [["Birinci cümle. ", "First sentence. ", null], ["İkinci cümle.", "Second.", null]],
            null,
            "en"
        ]);
        assert_eq!(
            GoogleTranslator::parse_response(&value).unwrap(),
            "Birinci cümle. İkinci cümle."
        );
    }

    #[test]
    fn parse_rejects_malformed_response() {
        let err = GoogleTranslator::parse_response(&json!({"error": 1})).unwrap_err();
        assert!(matches!(err, TranslateError::Parse(_)));
    }

    #[test]
    fn parse_rejects_empty_sentence_list() {
        let err = GoogleTranslator::parse_response(&json!([[], null, "en"])).unwrap_err();
        assert!(matches!(err, TranslateError::EmptyResponse));
    }

    #[tokio::test]
    async fn mock_ok_and_echo() {
        let fixed = MockTranslator::ok("Merhaba Dünya");
        assert_eq!(
            fixed.translate("Hello World", "tr").await.unwrap(),
            "Merhaba Dünya"
        );

        let echo = MockTranslator::echo();
        assert_eq!(echo.translate("unchanged", "tr").await.unwrap(), "unchanged");
    }

    /// A fixed empty response stays empty; only `echo()` echoes.
    #[tokio::test]
    async fn mock_ok_empty_is_not_echo() {
        let empty = MockTranslator::ok("");
        assert_eq!(empty.translate("input", "tr").await.unwrap(), "");
    }

    #[tokio::test]
    async fn mock_err_propagates() {
        let failing = MockTranslator::err("quota exceeded");
        let err = failing.translate("text", "tr").await.unwrap_err();
        assert!(matches!(err, TranslateError::Request(_)));
    }
}
