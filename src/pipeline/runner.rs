//! Pipeline coordinator — drives the capture → OCR → translate → layout chain.
//!
//! [`PipelineCoordinator`] owns the [`SharedState`] and responds to
//! [`GestureEvent`]s received over a `tokio::sync::mpsc` channel.
//!
//! # Pipeline flow
//!
//! ```text
//! GestureEvent::Region(rect)
//!   └─▶ preempt active run (mark Cancelled), bump run_id, spawn task:
//!         ├─ spawn_blocking(capturer.capture)      [Capturing]
//!         ├─ spawn_blocking(ocr.recognize) + clean [Recognizing]
//!         ├─ translator.translate (async) + clean  [Translating]
//!         └─ LineBuffer::layout                    [Ready]
//!
//! GestureEvent::Preview(rect)  → update shared preview rect
//! GestureEvent::Cancelled      → clear preview
//! ```
//!
//! All blocking work (screen capture, tesseract) is pushed onto
//! `tokio::task::spawn_blocking` so the async runtime never stalls.
//!
//! # Cancellation model
//!
//! Preemption is advisory: no collaborator call is aborted.  Every stage
//! result commits through [`commit`], which re-checks the run id under the
//! state mutex — a superseded run's late result fails the check and is
//! dropped, regardless of the order in which stage completions arrive.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::capture::Capturer;
use crate::gesture::{CaptureRect, GestureEvent};
use crate::ocr::OcrEngine;
use crate::text::{clean, LineBuffer};
use crate::translate::Translator;

use super::state::{AppState, RunState, SharedState};

// ---------------------------------------------------------------------------
// PipelineCoordinator
// ---------------------------------------------------------------------------

/// Drives the complete capture→OCR→translate pipeline.
///
/// Create with [`PipelineCoordinator::new`], then call [`run`](Self::run)
/// inside a tokio task.
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use screen_translate::config::AppConfig;
/// use screen_translate::pipeline::{new_shared_state, PipelineCoordinator};
///
/// # async fn example() {
/// # use screen_translate::capture::Capturer;
/// # use screen_translate::ocr::OcrEngine;
/// # use screen_translate::translate::Translator;
/// # fn make_capturer() -> Arc<dyn Capturer> { unimplemented!() }
/// # fn make_ocr() -> Arc<dyn OcrEngine> { unimplemented!() }
/// # fn make_translator() -> Arc<dyn Translator> { unimplemented!() }
/// let config = AppConfig::default();
/// let shared_state = new_shared_state(config);
///
/// let (gesture_tx, gesture_rx) = tokio::sync::mpsc::channel(16);
/// let coordinator = PipelineCoordinator::new(
///     shared_state,
///     make_capturer(),
///     make_ocr(),
///     make_translator(),
/// );
/// coordinator.run(gesture_rx).await;
/// # }
/// ```
pub struct PipelineCoordinator {
    state: SharedState,
    capturer: Arc<dyn Capturer>,
    ocr: Arc<dyn OcrEngine>,
    translator: Arc<dyn Translator>,
}

impl PipelineCoordinator {
    /// Create a new coordinator.
    ///
    /// # Arguments
    ///
    /// * `state`      — shared application state (also read by the overlay).
    /// * `capturer`   — screen capture backend (e.g. `ScreenCapturer`).
    /// * `ocr`        — OCR engine (e.g. `TesseractEngine`).
    /// * `translator` — translation backend (e.g. `GoogleTranslator`).
    pub fn new(
        state: SharedState,
        capturer: Arc<dyn Capturer>,
        ocr: Arc<dyn OcrEngine>,
        translator: Arc<dyn Translator>,
    ) -> Self {
        Self {
            state,
            capturer,
            ocr,
            translator,
        }
    }

    // -----------------------------------------------------------------------
    // Main async loop
    // -----------------------------------------------------------------------

    /// Run the coordinator until `gesture_rx` is closed, then wait for any
    /// still-in-flight run tasks to finish.
    ///
    /// This is an `async fn` and should be spawned as a tokio task from
    /// `main()`.  It never returns while the channel is open.
    pub async fn run(self, mut gesture_rx: mpsc::Receiver<GestureEvent>) {
        let mut tasks: Vec<JoinHandle<()>> = Vec::new();

        while let Some(event) = gesture_rx.recv().await {
            tasks.retain(|t| !t.is_finished());
            if let Some(task) = self.handle_event(event) {
                tasks.push(task);
            }
        }

        log::info!("pipeline: gesture channel closed, coordinator shutting down");
        for task in tasks {
            let _ = task.await;
        }
    }

    // -----------------------------------------------------------------------
    // Event handling
    // -----------------------------------------------------------------------

    /// Process one gesture event.  A completed region spawns a run task and
    /// returns its handle; previews and cancellations only touch the shared
    /// preview rect.
    fn handle_event(&self, event: GestureEvent) -> Option<JoinHandle<()>> {
        match event {
            GestureEvent::Region(rect) => Some(self.start_run(rect)),
            GestureEvent::Preview(rect) => {
                self.state.lock().unwrap().preview = Some(rect);
                None
            }
            GestureEvent::Cancelled => {
                self.state.lock().unwrap().preview = None;
                None
            }
        }
    }

    // -----------------------------------------------------------------------
    // start_run
    // -----------------------------------------------------------------------

    /// Start a pipeline run for `rect`, preempting any active run.
    ///
    /// The preempted run is marked `Cancelled` and its run id becomes stale
    /// in the same critical section that installs the new id, so none of its
    /// in-flight stage results can commit afterwards.  Returns the handle of
    /// the spawned run task.
    pub fn start_run(&self, rect: CaptureRect) -> JoinHandle<()> {
        let id = {
            let mut st = self.state.lock().unwrap();
            if st.run.is_active() {
                log::debug!("pipeline: run {} preempted by new gesture", st.run_id);
                st.run = RunState::Cancelled;
            }
            st.run_id += 1;
            st.run = RunState::Capturing;
            st.raw_text = None;
            st.translated_text = None;
            st.error_message = None;
            st.preview = None;
            st.run_id
        };

        log::debug!("pipeline: run {id} started for {rect}");

        let state = Arc::clone(&self.state);
        let capturer = Arc::clone(&self.capturer);
        let ocr = Arc::clone(&self.ocr);
        let translator = Arc::clone(&self.translator);

        tokio::spawn(async move {
            execute_run(state, capturer, ocr, translator, rect, id).await;
        })
    }
}

// ---------------------------------------------------------------------------
// Run execution
// ---------------------------------------------------------------------------

/// Execute the stage chain for one run.
///
/// Stage boundaries re-check the run id via [`commit`]; once the check fails
/// the function returns without touching shared state again.  Collaborator
/// calls already in flight are left to finish and their results discarded.
async fn execute_run(
    state: SharedState,
    capturer: Arc<dyn Capturer>,
    ocr: Arc<dyn OcrEngine>,
    translator: Arc<dyn Translator>,
    rect: CaptureRect,
    id: u64,
) {
    // ── 1. Capture (blocking → thread pool) ──────────────────────────────
    let capture_result = tokio::task::spawn_blocking(move || capturer.capture(&rect)).await;

    let image = match capture_result {
        Ok(Ok(image)) => image,
        Ok(Err(e)) => return fail(&state, id, e.to_string()),
        Err(e) => return fail(&state, id, format!("internal error: {e}")),
    };

    if !commit(&state, id, |st| st.run = RunState::Recognizing) {
        return;
    }

    // ── 2. OCR (blocking → thread pool) ──────────────────────────────────
    let ocr_result = tokio::task::spawn_blocking(move || ocr.recognize(&image)).await;

    let raw_text = match ocr_result {
        Ok(Ok(text)) => clean(&text),
        Ok(Err(e)) => return fail(&state, id, e.to_string()),
        Err(e) => return fail(&state, id, format!("internal error: {e}")),
    };

    log::debug!("pipeline: run {id} OCR result = {raw_text:?}");

    // Layout bounds and target language are config, read-only here.
    let (target, max_width, max_visible) = {
        let st = state.lock().unwrap();
        (
            st.config.translate.target_lang.clone(),
            st.config.overlay.max_width_chars,
            st.config.overlay.max_visible_lines,
        )
    };

    // A region with no readable text is a successful run with an empty
    // translation — nothing to send to the backend.
    if raw_text.is_empty() {
        commit(&state, id, |st| {
            st.run = RunState::Ready;
            st.raw_text = Some(String::new());
            st.translated_text = Some(String::new());
            st.lines = LineBuffer::default();
        });
        return;
    }

    if !commit(&state, id, |st| {
        st.run = RunState::Translating;
        st.raw_text = Some(raw_text.clone());
    }) {
        return;
    }

    // ── 3. Translate (async) ─────────────────────────────────────────────
    let translated = match translator.translate(&raw_text, &target).await {
        Ok(text) => clean(&text),
        Err(e) => return fail(&state, id, e.to_string()),
    };

    // ── 4. Finalise: layout and publish ──────────────────────────────────
    let committed = commit(&state, id, |st| {
        st.run = RunState::Ready;
        st.translated_text = Some(translated.clone());
        st.lines = LineBuffer::layout(&translated, max_width, max_visible);
    });

    if committed {
        log::debug!("pipeline: run {id} ready ({} chars)", translated.len());
    } else {
        log::warn!("pipeline: dropping stale translation for superseded run {id}");
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Apply `f` to the shared state iff run `id` is still current.
///
/// This is the single point where stage results become visible; the id
/// comparison under the mutex is what makes advisory cancellation correct
/// even though stage completion order is unordered under preemption.
fn commit(state: &SharedState, id: u64, f: impl FnOnce(&mut AppState)) -> bool {
    let mut st = state.lock().unwrap();
    if st.run_id != id {
        log::debug!("pipeline: run {id} superseded by run {}", st.run_id);
        return false;
    }
    f(&mut st);
    true
}

/// Mark run `id` as failed with a user-displayable message, unless it has
/// already been superseded.
fn fail(state: &SharedState, id: u64, message: String) {
    let committed = commit(state, id, |st| {
        st.run = RunState::Failed(message.clone());
        st.error_message = Some(message.clone());
    });
    if committed {
        log::error!("pipeline: run {id} failed: {message}");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::capture::{CaptureError, MockCapturer};
    use crate::config::AppConfig;
    use crate::ocr::{MockOcrEngine, OcrError};
    use crate::pipeline::state::new_shared_state;
    use crate::translate::MockTranslator;

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn make_coordinator(
        config: AppConfig,
        capturer: MockCapturer,
        ocr: MockOcrEngine,
        translator: MockTranslator,
    ) -> (PipelineCoordinator, SharedState) {
        let state = new_shared_state(config);
        let coordinator = PipelineCoordinator::new(
            Arc::clone(&state),
            Arc::new(capturer),
            Arc::new(ocr),
            Arc::new(translator),
        );
        (coordinator, state)
    }

    fn narrow_overlay_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.overlay.max_width_chars = 20;
        config.overlay.max_visible_lines = 3;
        config
    }

    // -----------------------------------------------------------------------
    // Tests
    // -----------------------------------------------------------------------

    /// End-to-end success: rect (10,10)-(210,60) → 200×50 image →
    /// "Hello\nWorld" → "Merhaba Dünya" (passed through the cleaner
    /// unchanged) → a single wrapped line, run state Ready.
    #[tokio::test]
    async fn region_event_drives_full_pipeline() {
        let (tx, rx) = mpsc::channel(4);
        let (coordinator, state) = make_coordinator(
            narrow_overlay_config(),
            MockCapturer::ok(),
            MockOcrEngine::ok("Hello\nWorld"),
            MockTranslator::ok("Merhaba Dünya"),
        );

        let rect = CaptureRect::from_points((10, 10), (210, 60));
        tx.send(GestureEvent::Region(rect)).await.unwrap();
        drop(tx); // close channel so run() returns after the task completes

        coordinator.run(rx).await;

        let st = state.lock().unwrap();
        assert_eq!(st.run, RunState::Ready);
        assert_eq!(st.raw_text.as_deref(), Some("Hello World"));
        assert_eq!(st.translated_text.as_deref(), Some("Merhaba Dünya"));
        assert_eq!(st.lines.lines(), ["Merhaba Dünya"]);
        assert!(st.error_message.is_none());
    }

    /// OCR failure: the run ends Failed with the engine's message, the
    /// translated text stays unset, and nothing escapes the coordinator.
    #[tokio::test]
    async fn ocr_failure_sets_failed_state() {
        let (tx, rx) = mpsc::channel(4);
        let (coordinator, state) = make_coordinator(
            AppConfig::default(),
            MockCapturer::ok(),
            MockOcrEngine::err(OcrError::EngineUnavailable("engine not found".into())),
            MockTranslator::ok("never used"),
        );

        tx.send(GestureEvent::Region(CaptureRect::from_points((0, 0), (50, 50))))
            .await
            .unwrap();
        drop(tx);

        coordinator.run(rx).await;

        let st = state.lock().unwrap();
        let RunState::Failed(ref reason) = st.run else {
            panic!("expected Failed, got {:?}", st.run);
        };
        assert!(reason.contains("engine not found"));
        assert!(st.translated_text.is_none());
        assert_eq!(st.error_message.as_deref(), Some(reason.as_str()));
    }

    /// Capture failure surfaces the backend message the same way.
    #[tokio::test]
    async fn capture_failure_sets_failed_state() {
        let (tx, rx) = mpsc::channel(4);
        let (coordinator, state) = make_coordinator(
            AppConfig::default(),
            MockCapturer::err(CaptureError::Backend("permission denied".into())),
            MockOcrEngine::ok("never used"),
            MockTranslator::ok("never used"),
        );

        tx.send(GestureEvent::Region(CaptureRect::from_points((0, 0), (50, 50))))
            .await
            .unwrap();
        drop(tx);

        coordinator.run(rx).await;

        let st = state.lock().unwrap();
        assert!(
            matches!(st.run, RunState::Failed(ref m) if m.contains("permission denied")),
            "got {:?}",
            st.run
        );
        assert!(st.raw_text.is_none());
    }

    /// Translation failure keeps the recognised text but fails the run.
    #[tokio::test]
    async fn translation_failure_sets_failed_state() {
        let (tx, rx) = mpsc::channel(4);
        let (coordinator, state) = make_coordinator(
            AppConfig::default(),
            MockCapturer::ok(),
            MockOcrEngine::ok("Hello"),
            MockTranslator::err("network unreachable"),
        );

        tx.send(GestureEvent::Region(CaptureRect::from_points((0, 0), (50, 50))))
            .await
            .unwrap();
        drop(tx);

        coordinator.run(rx).await;

        let st = state.lock().unwrap();
        assert!(matches!(st.run, RunState::Failed(ref m) if m.contains("network unreachable")));
        assert_eq!(st.raw_text.as_deref(), Some("Hello"));
        assert!(st.translated_text.is_none());
    }

    /// Empty OCR output is success: the run reaches Ready with an empty
    /// translation and the translator is never consulted.
    #[tokio::test]
    async fn empty_ocr_short_circuits_to_ready() {
        let (tx, rx) = mpsc::channel(4);
        let (coordinator, state) = make_coordinator(
            AppConfig::default(),
            MockCapturer::ok(),
            MockOcrEngine::ok("   \n  "),
            // Would fail the run if the pipeline called it.
            MockTranslator::err("must not be called"),
        );

        tx.send(GestureEvent::Region(CaptureRect::from_points((0, 0), (50, 50))))
            .await
            .unwrap();
        drop(tx);

        coordinator.run(rx).await;

        let st = state.lock().unwrap();
        assert_eq!(st.run, RunState::Ready);
        assert_eq!(st.raw_text.as_deref(), Some(""));
        assert_eq!(st.translated_text.as_deref(), Some(""));
        assert!(st.lines.is_empty());
    }

    /// Starting run B while run A is still recognising supersedes A; A's
    /// late-arriving result never overwrites B's.  The OCR mock reports the
    /// captured image's dimensions, so the final text tells the runs apart.
    #[tokio::test]
    async fn preemption_drops_stale_results() {
        let (tx, rx) = mpsc::channel(4);
        let (coordinator, state) = make_coordinator(
            narrow_overlay_config(),
            MockCapturer::ok(),
            MockOcrEngine::dimensions().with_delay(Duration::from_millis(200)),
            MockTranslator::echo(),
        );

        let rect_a = CaptureRect::from_points((0, 0), (100, 100));
        let rect_b = CaptureRect::from_points((0, 0), (50, 40));

        tx.send(GestureEvent::Region(rect_a)).await.unwrap();
        tx.send(GestureEvent::Region(rect_b)).await.unwrap();
        drop(tx);

        // run() awaits both spawned run tasks before returning, so A's slow
        // OCR has definitely resolved (and been discarded) by this point.
        coordinator.run(rx).await;

        let st = state.lock().unwrap();
        assert_eq!(st.run_id, 2);
        assert_eq!(st.run, RunState::Ready);
        assert_eq!(st.translated_text.as_deref(), Some("50x40"));
        assert!(st.error_message.is_none());
    }

    /// `start_run` preempts synchronously: immediately after the call the
    /// shared state belongs to the new run.
    #[tokio::test]
    async fn start_run_installs_new_run_id_synchronously() {
        let (coordinator, state) = make_coordinator(
            AppConfig::default(),
            MockCapturer::ok(),
            MockOcrEngine::dimensions().with_delay(Duration::from_millis(200)),
            MockTranslator::echo(),
        );

        let h1 = coordinator.start_run(CaptureRect::from_points((0, 0), (100, 100)));
        // Give run 1 a moment to pass its capture stage.
        tokio::time::sleep(Duration::from_millis(50)).await;

        let h2 = coordinator.start_run(CaptureRect::from_points((0, 0), (50, 40)));
        {
            let st = state.lock().unwrap();
            assert_eq!(st.run_id, 2);
            assert_eq!(st.run, RunState::Capturing);
        }

        let _ = h1.await;
        let _ = h2.await;

        let st = state.lock().unwrap();
        assert_eq!(st.run, RunState::Ready);
        assert_eq!(st.translated_text.as_deref(), Some("50x40"));
    }

    /// Preview gestures update the shared preview rect; a cancellation
    /// clears it without disturbing run state.
    #[tokio::test]
    async fn preview_and_cancel_update_shared_state() {
        let (coordinator, state) = make_coordinator(
            AppConfig::default(),
            MockCapturer::ok(),
            MockOcrEngine::ok("text"),
            MockTranslator::echo(),
        );

        let rect = CaptureRect::from_points((5, 5), (60, 60));
        assert!(coordinator.handle_event(GestureEvent::Preview(rect)).is_none());
        assert_eq!(state.lock().unwrap().preview, Some(rect));

        assert!(coordinator.handle_event(GestureEvent::Cancelled).is_none());
        let st = state.lock().unwrap();
        assert!(st.preview.is_none());
        assert_eq!(st.run, RunState::Idle);
        assert_eq!(st.run_id, 0);
    }
}
