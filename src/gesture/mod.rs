//! Region-selection gesture tracking.
//!
//! The gesture is hold-trigger-key + mouse drag: the trigger key arms the
//! tracker, a mouse press anchors the rect, and the release point completes
//! it.  [`GestureTracker`] turns the raw [`crate::input::InputEvent`] stream
//! into validated [`CaptureRect`]s (or cancellations), which the pipeline
//! coordinator consumes.

pub mod rect;
pub mod tracker;

pub use rect::CaptureRect;
pub use tracker::{GestureEvent, GestureTracker};
