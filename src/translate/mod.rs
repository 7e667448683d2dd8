//! Translation backend module.
//!
//! This module provides:
//! * [`Translator`] — async trait implemented by all translation backends.
//! * [`GoogleTranslator`] — the public Google endpoint backend.
//! * [`TranslateError`] — error variants for translation operations.
//!
//! The backend is selected and configured once at startup; the pipeline only
//! ever sees `Arc<dyn Translator>`.

pub mod translator;

pub use translator::{GoogleTranslator, TranslateError, Translator};

// test-only re-export so the pipeline test module can import MockTranslator
// without `use screen_translate::translate::translator::MockTranslator`.
#[cfg(test)]
pub use translator::MockTranslator;
