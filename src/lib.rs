//! screen-translate — select a screen region, OCR it, and show the
//! translation in a translucent overlay.
//!
//! Hold the trigger key and drag a rectangle anywhere on screen; the
//! selected region is captured, recognized with Tesseract, translated,
//! and rendered as wrapped, scrollable text in a small always-on-top
//! window.
//!
//! The crate is organised around a single-flight pipeline:
//!
//! * [`input`] / [`gesture`] — global input hook and the hold-drag-release
//!   selection state machine.
//! * [`capture`] — screen rasterisation behind the [`capture::Capturer`]
//!   trait.
//! * [`ocr`] — text recognition behind the [`ocr::OcrEngine`] trait.
//! * [`translate`] — async translation behind the
//!   [`translate::Translator`] trait.
//! * [`text`] — OCR-artifact cleanup and line wrapping/scrolling.
//! * [`pipeline`] — the coordinator that chains the stages and publishes
//!   results into shared state.
//! * [`app`] — the egui overlay that renders the shared state.
//! * [`config`] — TOML settings persisted under the user config directory.

pub mod app;
pub mod capture;
pub mod config;
pub mod gesture;
pub mod input;
pub mod ocr;
pub mod pipeline;
pub mod text;
pub mod translate;
