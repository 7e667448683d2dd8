//! Pipeline run state machine and shared application state.
//!
//! [`RunState`] tracks the single in-flight capture→OCR→translate run.  The
//! overlay reads it via [`SharedState`] to render the appropriate view.
//!
//! [`AppState`] is the single source of truth for everything the overlay
//! needs: current run phase, original and translated text, the wrapped
//! [`LineBuffer`], the live selection preview, and any error message.
//!
//! [`SharedState`] is a type alias for `Arc<Mutex<AppState>>` — cheap to
//! clone and safe to share across threads.

use std::sync::{Arc, Mutex};

use crate::config::AppConfig;
use crate::gesture::CaptureRect;
use crate::text::LineBuffer;

// ---------------------------------------------------------------------------
// RunState
// ---------------------------------------------------------------------------

/// States of a capture→OCR→translate pipeline run.
///
/// The state machine transitions are:
///
/// ```text
/// Idle ──gesture──▶ Capturing ──▶ Recognizing ──▶ Translating ──▶ Ready
/// any active state ──stage failure──▶ Failed(reason)
/// any active state ──new gesture──▶ Cancelled  (superseded silently)
/// ```
///
/// At most one run is in an active state at a time (single-flight); a new
/// gesture always preempts the current run.
#[derive(Debug, Clone, PartialEq)]
pub enum RunState {
    /// No run has started yet — waiting for a selection gesture.
    Idle,

    /// The screen region is being rasterised.
    Capturing,

    /// Capture succeeded; OCR is running on the blocking thread pool.
    Recognizing,

    /// OCR succeeded; the translation request is in flight.
    Translating,

    /// The translated text is ready and laid out for display.
    Ready,

    /// The run was superseded by a newer gesture.  Silent — never shown to
    /// the user as an error.
    Cancelled,

    /// A stage failed.  The message is short and user-displayable; the next
    /// gesture is the retry mechanism.
    Failed(String),
}

impl RunState {
    /// Returns `true` while the run is actively progressing through stages.
    ///
    /// ```
    /// use screen_translate::pipeline::RunState;
    ///
    /// assert!(!RunState::Idle.is_active());
    /// assert!(RunState::Capturing.is_active());
    /// assert!(RunState::Recognizing.is_active());
    /// assert!(RunState::Translating.is_active());
    /// assert!(!RunState::Ready.is_active());
    /// assert!(!RunState::Cancelled.is_active());
    /// assert!(!RunState::Failed("x".into()).is_active());
    /// ```
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            RunState::Capturing | RunState::Recognizing | RunState::Translating
        )
    }

    /// A short human-readable label suitable for the overlay status line.
    pub fn label(&self) -> &'static str {
        match self {
            RunState::Idle => "Idle",
            RunState::Capturing => "Capturing",
            RunState::Recognizing => "Recognizing",
            RunState::Translating => "Translating",
            RunState::Ready => "Done",
            RunState::Cancelled => "Cancelled",
            RunState::Failed(_) => "Error",
        }
    }
}

impl Default for RunState {
    fn default() -> Self {
        RunState::Idle
    }
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// Shared application state — the single source of truth for the overlay.
///
/// Held behind [`SharedState`] (`Arc<Mutex<AppState>>`).  The pipeline
/// coordinator mutates it; the egui update loop reads it each frame.
pub struct AppState {
    /// Monotonically increasing id of the current run.  Stage results commit
    /// only while their run's id still matches this value — late results
    /// from superseded runs are dropped on the mismatch.
    pub run_id: u64,

    /// Current phase of the pipeline run identified by `run_id`.
    pub run: RunState,

    /// Cleaned OCR output of the current run.
    ///
    /// `None` until OCR completes.
    pub raw_text: Option<String>,

    /// Cleaned translated text of the current run.
    ///
    /// `None` until the run reaches `Ready`; `Some("")` when the capture
    /// contained no readable text.
    pub translated_text: Option<String>,

    /// Wrapped display lines over `translated_text`, rebuilt wholesale on
    /// every completed run.  The overlay forwards scroll deltas here.
    pub lines: LineBuffer,

    /// Live selection rect while a drag is in progress, for visual feedback.
    pub preview: Option<CaptureRect>,

    /// Error message to display when `run == RunState::Failed(_)`.
    pub error_message: Option<String>,

    /// Current application configuration.
    ///
    /// The pipeline reads the translation target and layout bounds from it.
    pub config: AppConfig,
}

impl AppState {
    /// Create a new `AppState` with sensible defaults.
    pub fn new(config: AppConfig) -> Self {
        Self {
            run_id: 0,
            run: RunState::Idle,
            raw_text: None,
            translated_text: None,
            lines: LineBuffer::default(),
            preview: None,
            error_message: None,
            config,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

// ---------------------------------------------------------------------------
// SharedState
// ---------------------------------------------------------------------------

/// Thread-safe handle to [`AppState`].
///
/// Cheap to clone (`Arc` clone).  Lock with `.lock().unwrap()` for a short
/// critical section; do **not** hold the lock across `.await` points.
pub type SharedState = Arc<Mutex<AppState>>;

/// Construct a new [`SharedState`] wrapping a default [`AppState`].
pub fn new_shared_state(config: AppConfig) -> SharedState {
    Arc::new(Mutex::new(AppState::new(config)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
