//! Dedicated OS-thread input listener using `rdev::listen`.
//!
//! `rdev::listen` is a blocking call that must live on its own OS thread.
//! [`InputListener`] owns that thread and a stop flag; dropping it sets the
//! flag so the callback silently ignores further events.
//!
//! # Shutdown caveat
//!
//! `rdev::listen` has **no graceful shutdown API**.  Setting the stop flag
//! prevents events from being forwarded, but the OS thread itself will remain
//! blocked in the rdev event loop until the process exits.  This is safe and
//! expected — rdev holds no resources that need explicit cleanup.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use tokio::sync::mpsc;

use super::InputEvent;

// ---------------------------------------------------------------------------
// InputListener
// ---------------------------------------------------------------------------

/// Handle to a running input listener thread.
///
/// Construct one with [`InputListener::start`].  Drop it to stop forwarding
/// events.
///
/// The underlying OS thread will continue to exist until the process exits
/// because `rdev::listen` cannot be interrupted, but it will silently discard
/// all events once the stop flag is set.
pub struct InputListener {
    /// Shared stop flag — set `true` on [`Drop`].
    stop: Arc<AtomicBool>,
    /// The thread handle.  Kept alive so the thread is not detached
    /// prematurely; we never `join` it because `rdev::listen` never returns.
    _thread: std::thread::JoinHandle<()>,
}

impl InputListener {
    /// Spawn a dedicated OS thread that listens for global key and mouse
    /// events and forwards [`InputEvent`]s on `tx`.
    ///
    /// # Arguments
    ///
    /// * `trigger` — The [`rdev::Key`] that arms region selection while held
    ///   (e.g. `rdev::Key::Quote`).  Use [`crate::input::parse_key`] to
    ///   obtain this from a config string.
    /// * `tx` — A `tokio::sync::mpsc` sender.  Key and button events use
    ///   `blocking_send` (safe from a non-async context); mouse moves use
    ///   `try_send` so a full channel coalesces them rather than stalling
    ///   the OS hook.
    ///
    /// # Returns
    ///
    /// An [`InputListener`] whose drop will stop event forwarding.
    ///
    /// # Panics
    ///
    /// Panics if the OS refuses to create the thread (extremely unlikely).
    pub fn start(trigger: rdev::Key, tx: mpsc::Sender<InputEvent>) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_clone = Arc::clone(&stop);

        let thread = std::thread::Builder::new()
            .name("input-listener".into())
            .spawn(move || {
                // Button events carry no coordinates; remember the last
                // cursor position the hook reported.
                let mut last_pos = (0i32, 0i32);

                let result = rdev::listen(move |event| {
                    // Bail out if the listener has been stopped.
                    if stop_clone.load(Ordering::Relaxed) {
                        return;
                    }

                    match event.event_type {
                        rdev::EventType::KeyPress(k) if k == trigger => {
                            // blocking_send is safe to call from non-async threads.
                            let _ = tx.blocking_send(InputEvent::TriggerPressed);
                        }
                        rdev::EventType::KeyRelease(k) if k == trigger => {
                            let _ = tx.blocking_send(InputEvent::TriggerReleased);
                        }
                        rdev::EventType::KeyPress(rdev::Key::Escape) => {
                            let _ = tx.blocking_send(InputEvent::CancelRequested);
                        }
                        rdev::EventType::MouseMove { x, y } => {
                            last_pos = (x as i32, y as i32);
                            // Moves are best-effort; dropping some under load
                            // only makes the live preview slightly coarser.
                            let _ = tx.try_send(InputEvent::MouseMoved {
                                x: last_pos.0,
                                y: last_pos.1,
                            });
                        }
                        rdev::EventType::ButtonPress(rdev::Button::Left) => {
                            let _ = tx.blocking_send(InputEvent::MousePressed {
                                x: last_pos.0,
                                y: last_pos.1,
                            });
                        }
                        rdev::EventType::ButtonRelease(rdev::Button::Left) => {
                            let _ = tx.blocking_send(InputEvent::MouseReleased {
                                x: last_pos.0,
                                y: last_pos.1,
                            });
                        }
                        _ => {}
                    }
                });

                if let Err(e) = result {
                    log::error!("input-listener: rdev::listen exited with error: {:?}", e);
                }
            })
            .expect("failed to spawn input-listener thread");

        Self {
            stop,
            _thread: thread,
        }
    }
}

impl Drop for InputListener {
    /// Set the stop flag so the rdev callback stops forwarding events.
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        // The OS thread continues to exist blocked inside rdev::listen until
        // the process exits — this is safe and requires no further cleanup.
    }
}
