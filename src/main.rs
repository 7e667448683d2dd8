//! screen-translate — application entry point.
//!
//! Wires the startup sequence: logging, config, the tokio runtime, the
//! capture/OCR/translation collaborators, the gesture tracker and pipeline
//! coordinator tasks, the global input hook, and finally the egui overlay
//! window (which blocks until close).

use std::sync::Arc;

use tokio::sync::mpsc;

use screen_translate::app::{native_options, OverlayApp};
use screen_translate::capture::{Capturer, ScreenCapturer};
use screen_translate::config::AppConfig;
use screen_translate::gesture::GestureTracker;
use screen_translate::input::{parse_key, InputListener};
use screen_translate::ocr::{OcrEngine, TesseractEngine};
use screen_translate::pipeline::{new_shared_state, PipelineCoordinator};
use screen_translate::translate::{GoogleTranslator, Translator};

fn main() -> eframe::Result<()> {
    // 1. Logging (RUST_LOG overrides; default "info")
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("screen-translate starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("failed to load config ({e:#}), using defaults");
        AppConfig::default()
    });
    log::info!(
        "config: trigger={} ocr_lang={} target={}",
        config.capture.trigger_key,
        config.ocr.language,
        config.translate.target_lang
    );

    // 3. Tokio runtime for the pipeline tasks
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("failed to build tokio runtime");

    // 4. Shared state read by the overlay every frame
    let shared_state = new_shared_state(config.clone());

    // 5. Pipeline collaborators
    let capturer: Arc<dyn Capturer> = Arc::new(ScreenCapturer::new());
    let ocr: Arc<dyn OcrEngine> = Arc::new(TesseractEngine::from_config(&config.ocr));
    let translator: Arc<dyn Translator> = Arc::new(GoogleTranslator::from_config(&config.translate));

    // 6. Channels: raw input events → gesture tracker → pipeline
    let (input_tx, mut input_rx) = mpsc::channel(64);
    let (gesture_tx, gesture_rx) = mpsc::channel(16);

    // 7. Gesture tracker task: folds raw input into selection gestures
    let min_area = config.capture.min_drag_area;
    rt.spawn(async move {
        let mut tracker = GestureTracker::new(min_area);
        while let Some(event) = input_rx.recv().await {
            if let Some(gesture) = tracker.handle(event) {
                if gesture_tx.send(gesture).await.is_err() {
                    break;
                }
            }
        }
        log::debug!("gesture tracker: input channel closed");
    });

    // 8. Pipeline coordinator task
    let coordinator = PipelineCoordinator::new(
        Arc::clone(&shared_state),
        capturer,
        ocr,
        translator,
    );
    rt.spawn(coordinator.run(gesture_rx));

    // 9. Global input hook on its own OS thread
    let trigger = parse_key(&config.capture.trigger_key).unwrap_or_else(|| {
        log::warn!(
            "unknown trigger key '{}', falling back to Quote",
            config.capture.trigger_key
        );
        rdev::Key::Quote
    });
    let listener = InputListener::start(trigger, input_tx);

    // 10. Overlay window (blocks until closed; dropping the app stops the
    //     listener, which closes the channels and winds down the tasks)
    let app = OverlayApp::new(shared_state, listener, config.clone());
    eframe::run_native(
        "Screen Translate",
        native_options(&config),
        Box::new(move |_cc| Ok(Box::new(app))),
    )
}
