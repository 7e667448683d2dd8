//! Core OCR engine trait and implementations.
//!
//! [`TesseractEngine`] wraps the tesseract CLI through `rusty-tesseract`;
//! every recognition call spawns a fresh tesseract process.
//! [`MockOcrEngine`] (available under `#[cfg(test)]`) returns a
//! pre-configured response — useful for unit-testing the pipeline without a
//! tesseract installation.

use image::DynamicImage;
use thiserror::Error;

use crate::config::OcrConfig;

// ---------------------------------------------------------------------------
// OcrError
// ---------------------------------------------------------------------------

/// Errors raised by the OCR subsystem.
///
/// An empty recognition result is **not** an error — it is returned as
/// `Ok(String::new())`.
#[derive(Debug, Clone, Error)]
pub enum OcrError {
    /// The tesseract binary could not be executed (not installed / not on
    /// PATH).
    #[error("OCR engine unavailable: {0}")]
    EngineUnavailable(String),

    /// The configured language pack is not installed.
    #[error("OCR language not supported: {0}")]
    UnsupportedLanguage(String),

    /// Recognition itself failed.
    #[error("OCR failed: {0}")]
    Recognition(String),
}

// ---------------------------------------------------------------------------
// OcrEngine trait
// ---------------------------------------------------------------------------

/// Capability interface for text recognition.
///
/// Implementations may block; the pipeline always calls this through
/// `tokio::task::spawn_blocking`.
pub trait OcrEngine: Send + Sync {
    /// Extract text from `image`.  Returns `Ok("")` when the image contains
    /// no readable text.
    fn recognize(&self, image: &DynamicImage) -> Result<String, OcrError>;
}

// Compile-time assertion: Box<dyn OcrEngine> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn OcrEngine>) {}
};

// ---------------------------------------------------------------------------
// TesseractEngine
// ---------------------------------------------------------------------------

/// Production OCR engine that shells out to the tesseract CLI.
///
/// Stateless apart from the resolved arguments, so it can be shared across
/// threads without locking; every call spawns a fresh tesseract process.
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    lang: String,
    psm: Option<i32>,
}

impl TesseractEngine {
    /// Build an engine from application config.  The language is resolved
    /// once here; switching languages means constructing a new engine.
    pub fn from_config(config: &OcrConfig) -> Self {
        Self {
            lang: config.language.clone(),
            psm: config.psm,
        }
    }
}

impl OcrEngine for TesseractEngine {
    fn recognize(&self, image: &DynamicImage) -> Result<String, OcrError> {
        let img = rusty_tesseract::Image::from_dynamic_image(image)
            .map_err(|e| OcrError::Recognition(e.to_string()))?;

        let args = rusty_tesseract::Args {
            lang: self.lang.clone(),
            psm: self.psm,
            ..rusty_tesseract::Args::default()
        };

        let text = rusty_tesseract::image_to_string(&img, &args).map_err(|e| {
            let msg = e.to_string();
            // rusty-tesseract folds all failure modes into one error type;
            // classify the two cases the user can actually act on.
            if msg.contains("not found") || msg.contains("No such file") {
                OcrError::EngineUnavailable(msg)
            } else if msg.contains("Failed loading language") {
                OcrError::UnsupportedLanguage(self.lang.clone())
            } else {
                OcrError::Recognition(msg)
            }
        })?;

        Ok(text.trim().to_string())
    }
}

// ---------------------------------------------------------------------------
// MockOcrEngine  (test-only)
// ---------------------------------------------------------------------------

/// A test double that returns a pre-configured response without running
/// tesseract.
///
/// An optional artificial delay makes preemption windows deterministic in
/// coordinator tests.
#[cfg(test)]
enum MockResponse {
    Text(String),
    /// Report the image's `WIDTHxHEIGHT` — lets tests tell apart results
    /// from runs over different rects.
    Dimensions,
    Fail(OcrError),
}

#[cfg(test)]
pub struct MockOcrEngine {
    response: MockResponse,
    delay: Option<std::time::Duration>,
}

#[cfg(test)]
impl MockOcrEngine {
    /// Create a mock that always returns `Ok(text)`.
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            response: MockResponse::Text(text.into()),
            delay: None,
        }
    }

    /// Create a mock that always returns `Err(error)`.
    pub fn err(error: OcrError) -> Self {
        Self {
            response: MockResponse::Fail(error),
            delay: None,
        }
    }

    /// Create a mock whose text is the image's `WIDTHxHEIGHT`.
    pub fn dimensions() -> Self {
        Self {
            response: MockResponse::Dimensions,
            delay: None,
        }
    }

    /// Sleep for `delay` inside every `recognize` call (on the blocking
    /// pool), simulating a slow engine.
    pub fn with_delay(mut self, delay: std::time::Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[cfg(test)]
impl OcrEngine for MockOcrEngine {
    fn recognize(&self, image: &DynamicImage) -> Result<String, OcrError> {
        if let Some(d) = self.delay {
            std::thread::sleep(d);
        }
        match &self.response {
            MockResponse::Text(text) => Ok(text.clone()),
            MockResponse::Dimensions => Ok(format!("{}x{}", image.width(), image.height())),
            MockResponse::Fail(e) => Err(e.clone()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
