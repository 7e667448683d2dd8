//! Overlay window built on eframe/egui.
//!
//! [`OverlayApp`] is a small, borderless, translucent always-on-top window
//! that renders whatever the pipeline has published into [`SharedState`]:
//! a status line while a run is in flight, the wrapped translation lines
//! once it completes, or an error message when a stage fails.
//!
//! The window never takes keyboard focus away from the application being
//! read — all interaction with it is mouse-only (drag to move, wheel to
//! scroll, right-click to close).

use std::time::Duration;

use eframe::egui;
use egui::{Color32, CornerRadius, Margin};

use crate::config::AppConfig;
use crate::input::InputListener;
use crate::pipeline::{RunState, SharedState};

/// Repaint cadence while the pipeline is actively mutating shared state.
const ACTIVE_REPAINT_MS: u64 = 50;

/// Repaint cadence while idle — just enough to pick up state changes that
/// arrive between frames without burning CPU.
const IDLE_REPAINT_MS: u64 = 200;

/// Scroll-wheel pixels per line step.
const SCROLL_STEP_PX: f32 = 16.0;

// ---------------------------------------------------------------------------
// OverlayApp
// ---------------------------------------------------------------------------

/// The overlay application.
///
/// Reads [`SharedState`] once per frame under a short lock and renders a
/// view for the current [`RunState`].  Owns the [`InputListener`] so that
/// closing the window tears down the global input hook.
pub struct OverlayApp {
    state: SharedState,
    /// Global input hook; dropped on exit so the OS listener thread stops
    /// forwarding events.
    listener: Option<InputListener>,
    config: AppConfig,
}

impl OverlayApp {
    pub fn new(state: SharedState, listener: InputListener, config: AppConfig) -> Self {
        Self {
            state,
            listener: Some(listener),
            config,
        }
    }

    /// Stop the input listener.  Idempotent.
    fn teardown(&mut self) {
        if self.listener.take().is_some() {
            log::info!("overlay: shutting down, input listener stopped");
        }
    }

    // ---- frame rendering --------------------------------------------------

    /// Snapshot of everything the current frame needs, taken under one short
    /// lock so rendering never holds the mutex.
    fn snapshot(&self) -> FrameSnapshot {
        let st = self.state.lock().unwrap();
        FrameSnapshot {
            run: st.run.clone(),
            raw: st.raw_text.clone(),
            visible: st.lines.visible().to_vec(),
            line_count: st.lines.line_count(),
            max_offset: st.lines.max_offset(),
            offset: st.lines.offset(),
            translated_empty: st.translated_text.as_deref() == Some(""),
            error: st.error_message.clone(),
            preview: st.preview,
        }
    }

    fn apply_scroll(&self, delta_lines: isize) {
        if delta_lines != 0 {
            self.state.lock().unwrap().lines.scroll(delta_lines);
        }
    }

    fn background_fill(&self) -> Color32 {
        let alpha = (self.config.overlay.opacity.clamp(0.0, 1.0) * 255.0) as u8;
        Color32::from_rgba_premultiplied(25, 25, 30, alpha)
    }
}

/// Per-frame copy of the shared state fields the overlay renders.
struct FrameSnapshot {
    run: RunState,
    raw: Option<String>,
    visible: Vec<String>,
    line_count: usize,
    max_offset: usize,
    offset: usize,
    translated_empty: bool,
    error: Option<String>,
    preview: Option<crate::gesture::CaptureRect>,
}

impl eframe::App for OverlayApp {
    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        // Fully transparent backdrop; the panel frame paints the visible box.
        [0.0, 0.0, 0.0, 0.0]
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let snap = self.snapshot();

        // Wheel scrolling over the overlay moves the visible line window.
        let scroll_px = ctx.input(|i| i.raw_scroll_delta.y);
        if scroll_px.abs() >= 1.0 && snap.max_offset > 0 {
            // Wheel up (positive y) scrolls toward earlier lines.
            self.apply_scroll(-(scroll_px / SCROLL_STEP_PX).round() as isize);
        }

        let frame = egui::Frame::new()
            .fill(self.background_fill())
            .corner_radius(CornerRadius::same(8))
            .inner_margin(Margin::same(10));

        egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
            // The whole panel doubles as a drag handle for moving the window.
            let response = ui.interact(
                ui.max_rect(),
                ui.id().with("overlay-drag"),
                egui::Sense::click_and_drag(),
            );
            if response.drag_started() {
                ctx.send_viewport_cmd(egui::ViewportCommand::StartDrag);
            }
            if response.secondary_clicked() {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }

            ui.spacing_mut().item_spacing.y = 4.0;

            match &snap.run {
                RunState::Idle | RunState::Cancelled => {
                    if let Some(rect) = snap.preview {
                        ui.label(
                            egui::RichText::new(format!(
                                "Selecting {}×{}",
                                rect.width(),
                                rect.height()
                            ))
                            .color(Color32::LIGHT_BLUE),
                        );
                    } else {
                        ui.label(
                            egui::RichText::new(format!(
                                "Hold {} and drag to translate a screen region",
                                self.config.capture.trigger_key
                            ))
                            .color(Color32::GRAY)
                            .italics(),
                        );
                    }
                }

                RunState::Capturing | RunState::Recognizing | RunState::Translating => {
                    ui.horizontal(|ui| {
                        ui.add(egui::Spinner::new().size(12.0));
                        ui.label(
                            egui::RichText::new(format!("{}…", snap.run.label()))
                                .color(Color32::LIGHT_GRAY),
                        );
                    });
                }

                RunState::Failed(_) => {
                    let message = snap.error.as_deref().unwrap_or("translation failed");
                    ui.label(
                        egui::RichText::new(message).color(Color32::from_rgb(255, 120, 100)),
                    );
                }

                RunState::Ready => {
                    if snap.translated_empty {
                        ui.label(
                            egui::RichText::new("No text detected")
                                .color(Color32::GRAY)
                                .italics(),
                        );
                    } else {
                        // Original text, dimmed and truncated, above the
                        // translation.
                        if let Some(raw) = snap.raw.as_deref().filter(|r| !r.is_empty()) {
                            let max = self.config.overlay.max_width_chars;
                            let shown: String = if raw.chars().count() > max {
                                raw.chars().take(max.saturating_sub(1)).chain(['…']).collect()
                            } else {
                                raw.to_string()
                            };
                            ui.label(
                                egui::RichText::new(shown)
                                    .color(Color32::GRAY)
                                    .size(11.0),
                            );
                            ui.separator();
                        }
                        for line in &snap.visible {
                            ui.label(
                                egui::RichText::new(line)
                                    .color(Color32::WHITE)
                                    .size(15.0),
                            );
                        }
                        if snap.max_offset > 0 {
                            let first = snap.offset + 1;
                            let last = snap.offset + snap.visible.len();
                            ui.label(
                                egui::RichText::new(format!(
                                    "lines {first}-{last} of {} (scroll for more)",
                                    snap.line_count
                                ))
                                .color(Color32::DARK_GRAY)
                                .size(10.0),
                            );
                        }
                    }
                }
            }
        });

        let cadence = if snap.run.is_active() || snap.preview.is_some() {
            ACTIVE_REPAINT_MS
        } else {
            IDLE_REPAINT_MS
        };
        ctx.request_repaint_after(Duration::from_millis(cadence));
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.teardown();
    }
}

// ---------------------------------------------------------------------------
// Window options
// ---------------------------------------------------------------------------

/// Build the eframe window options for the overlay from config.
///
/// Borderless, transparent, non-resizable; always-on-top and the restored
/// screen position are applied only when configured.
pub fn native_options(config: &AppConfig) -> eframe::NativeOptions {
    let overlay = &config.overlay;

    // Rough character-cell sizing keeps the window wide enough for the
    // configured wrap width without measuring fonts up front.
    let width = (overlay.max_width_chars as f32 * 8.0).clamp(260.0, 960.0);
    // Room for the dimmed original-text header plus the visible lines.
    let height = 60.0 + overlay.max_visible_lines as f32 * 22.0;

    let mut viewport = egui::ViewportBuilder::default()
        .with_decorations(false)
        .with_transparent(true)
        .with_inner_size([width, height])
        .with_resizable(false);

    if overlay.always_on_top {
        viewport = viewport.with_always_on_top();
    }
    if let Some((x, y)) = overlay.window_position {
        viewport = viewport.with_position(egui::pos2(x, y));
    }

    eframe::NativeOptions {
        viewport,
        ..Default::default()
    }
}
