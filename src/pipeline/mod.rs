//! Pipeline coordination module for screen-translate.
//!
//! This module wires the full capture → OCR → translate → layout pipeline
//! and exposes the shared state that the overlay reads every frame.
//!
//! # Architecture
//!
//! ```text
//! GestureEvent (mpsc)
//!        │
//!        ▼
//! PipelineCoordinator::run()  ← async tokio task
//!        │
//!        ├─ Preview(rect)  → update shared preview rect
//!        ├─ Cancelled      → clear preview
//!        │
//!        └─ Region(rect)   → start_run: preempt active run, bump run_id,
//!              │             spawn run task
//!              ├─ spawn_blocking(Capturer::capture)    [Capturing]
//!              ├─ spawn_blocking(OcrEngine::recognize) [Recognizing]
//!              ├─ Translator::translate (async)        [Translating]
//!              └─ clean + LineBuffer::layout           [Ready]
//!
//! SharedState (Arc<Mutex<AppState>>) ←─── read by egui update() each frame
//! ```
//!
//! Stage results commit through an id check: a run superseded by a newer
//! gesture can never overwrite the newer run's state, regardless of when
//! its collaborator calls resolve.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tokio::sync::mpsc;
//! use screen_translate::config::AppConfig;
//! use screen_translate::pipeline::{new_shared_state, PipelineCoordinator};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let shared_state = new_shared_state(config);
//!
//!     // (capturer, ocr and translator constructed from config)
//!     # use screen_translate::capture::Capturer;
//!     # use screen_translate::ocr::OcrEngine;
//!     # use screen_translate::translate::Translator;
//!     # fn make_capturer() -> Arc<dyn Capturer> { unimplemented!() }
//!     # fn make_ocr() -> Arc<dyn OcrEngine> { unimplemented!() }
//!     # fn make_translator() -> Arc<dyn Translator> { unimplemented!() }
//!
//!     let (gesture_tx, gesture_rx) = mpsc::channel(16);
//!     let coordinator = PipelineCoordinator::new(
//!         shared_state.clone(),
//!         make_capturer(),
//!         make_ocr(),
//!         make_translator(),
//!     );
//!
//!     tokio::spawn(async move { coordinator.run(gesture_rx).await });
//!
//!     // gesture_tx is fed by the gesture-tracker task
//! }
//! ```

pub mod runner;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use runner::PipelineCoordinator;
pub use state::{new_shared_state, AppState, RunState, SharedState};
