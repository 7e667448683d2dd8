//! Hold-key + drag region-selection state machine.
//!
//! [`GestureTracker`] consumes raw [`InputEvent`]s in arrival order and emits
//! at most one [`GestureEvent`] per input event.  It owns the only mutable
//! gesture state in the process; the pipeline side only ever sees the
//! immutable [`CaptureRect`] snapshot carried by a completed gesture.
//!
//! # State machine
//!
//! ```text
//! Idle ──trigger down──▶ Armed
//! Armed ──trigger up──▶ Idle                      (tap, emits nothing)
//! Armed ──mouse down──▶ Dragging (records anchor)
//! Dragging ──mouse move──▶ Dragging               (emits Preview)
//! Dragging ──mouse up──▶ Idle                     (emits Region, or nothing
//!                                                  below the area threshold)
//! Dragging ──trigger up──▶ Idle                   (emits Cancelled)
//! any state ──cancel input──▶ Idle                (emits Cancelled if a
//!                                                  selection was in progress)
//! ```

use crate::input::InputEvent;

use super::rect::CaptureRect;

// ---------------------------------------------------------------------------
// GestureEvent
// ---------------------------------------------------------------------------

/// Events emitted by the tracker toward the pipeline coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEvent {
    /// A drag completed with area at or above the threshold.  Exactly one
    /// `Region` is emitted per completed interaction.
    Region(CaptureRect),
    /// Live rect while dragging, for optional visual feedback.
    Preview(CaptureRect),
    /// An in-progress selection was abandoned.
    Cancelled,
}

// ---------------------------------------------------------------------------
// GestureState
// ---------------------------------------------------------------------------

/// Internal tracker state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GestureState {
    /// Trigger key not held.
    Idle,
    /// Trigger key held, waiting for a mouse press.
    Armed,
    /// Mouse button down with the trigger held; tracking the drag.
    Dragging { anchor: (i32, i32), current: (i32, i32) },
}

// ---------------------------------------------------------------------------
// GestureTracker
// ---------------------------------------------------------------------------

/// Region-selection state machine.
///
/// ```
/// use screen_translate::gesture::{GestureEvent, GestureTracker};
/// use screen_translate::input::InputEvent;
///
/// let mut tracker = GestureTracker::new(4);
/// assert_eq!(tracker.handle(InputEvent::TriggerPressed), None);
/// assert_eq!(tracker.handle(InputEvent::MousePressed { x: 0, y: 0 }), None);
/// let ev = tracker.handle(InputEvent::MouseReleased { x: 10, y: 10 });
/// assert!(matches!(ev, Some(GestureEvent::Region(_))));
/// ```
pub struct GestureTracker {
    state: GestureState,
    /// Drags with a smaller area are discarded without emitting anything.
    min_area: i64,
}

impl GestureTracker {
    pub fn new(min_area: i64) -> Self {
        Self {
            state: GestureState::Idle,
            min_area,
        }
    }

    /// Process one input event, returning the gesture event it produced, if
    /// any.
    pub fn handle(&mut self, event: InputEvent) -> Option<GestureEvent> {
        match (self.state, event) {
            (GestureState::Idle, InputEvent::TriggerPressed) => {
                self.state = GestureState::Armed;
                None
            }

            // Trigger released without a drag: a tap, no event.
            (GestureState::Armed, InputEvent::TriggerReleased) => {
                self.state = GestureState::Idle;
                None
            }

            (GestureState::Armed, InputEvent::MousePressed { x, y }) => {
                self.state = GestureState::Dragging {
                    anchor: (x, y),
                    current: (x, y),
                };
                None
            }

            (GestureState::Dragging { anchor, .. }, InputEvent::MouseMoved { x, y }) => {
                self.state = GestureState::Dragging {
                    anchor,
                    current: (x, y),
                };
                Some(GestureEvent::Preview(CaptureRect::from_points(
                    anchor,
                    (x, y),
                )))
            }

            (GestureState::Dragging { anchor, .. }, InputEvent::MouseReleased { x, y }) => {
                self.state = GestureState::Idle;
                let rect = CaptureRect::from_points(anchor, (x, y));
                if rect.area() < self.min_area {
                    // Too small to be a deliberate selection; not an error.
                    log::debug!("gesture: discarding sub-threshold drag {rect}");
                    return None;
                }
                Some(GestureEvent::Region(rect))
            }

            // Trigger released mid-drag abandons the selection.
            (GestureState::Dragging { .. }, InputEvent::TriggerReleased) => {
                self.state = GestureState::Idle;
                Some(GestureEvent::Cancelled)
            }

            (GestureState::Idle, InputEvent::CancelRequested) => None,
            (_, InputEvent::CancelRequested) => {
                self.state = GestureState::Idle;
                Some(GestureEvent::Cancelled)
            }

            // Key auto-repeat while armed/dragging, stray mouse events while
            // the trigger is not held, etc.
            _ => None,
        }
    }

    /// Whether a selection is currently in progress (armed or dragging).
    pub fn is_active(&self) -> bool {
        self.state != GestureState::Idle
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
