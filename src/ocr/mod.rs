//! OCR engine module.
//!
//! [`OcrEngine`] is the capability interface the pipeline uses to extract
//! text from a captured image.  It is object-safe and `Send + Sync` so it
//! can be held behind an `Arc<dyn OcrEngine>` and called from the blocking
//! thread pool.
//!
//! [`TesseractEngine`] is the production implementation — it shells out to
//! the tesseract CLI via `rusty-tesseract`, with the language resolved once
//! at startup from [`crate::config::OcrConfig`].
//!
//! An empty recognition result is **success** (`Ok("")`), not an error: a
//! region with no readable text is a perfectly normal capture.

pub mod engine;

pub use engine::{OcrEngine, OcrError, TesseractEngine};

// test-only re-export so the pipeline test module can import MockOcrEngine
// without `use screen_translate::ocr::engine::MockOcrEngine`.
#[cfg(test)]
pub use engine::MockOcrEngine;
