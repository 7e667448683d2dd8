//! Screen capture adapter.
//!
//! [`Capturer`] is the interface the pipeline uses to obtain a raster image
//! of a selected screen region.  It is object-safe and `Send + Sync` so it
//! can be held behind an `Arc<dyn Capturer>` and called from the blocking
//! thread pool.
//!
//! [`ScreenCapturer`] is the production implementation, backed by the
//! `screenshots` crate.  [`MockCapturer`] (test-only) returns a synthetic
//! image without touching the display.

pub mod screen;

pub use screen::ScreenCapturer;

use image::DynamicImage;
use thiserror::Error;

use crate::gesture::CaptureRect;

// ---------------------------------------------------------------------------
// CaptureError
// ---------------------------------------------------------------------------

/// Errors raised by the screen-capture subsystem.
#[derive(Debug, Clone, Error)]
pub enum CaptureError {
    /// No display contains the requested region's origin.
    #[error("no display found at ({0}, {1})")]
    NoDisplay(i32, i32),

    /// The rect has no area or lies outside the capturable surface.
    #[error("invalid capture region: {0}")]
    InvalidRect(String),

    /// The platform capture call failed (permissions, display disconnect…).
    #[error("screen capture failed: {0}")]
    Backend(String),
}

// ---------------------------------------------------------------------------
// Capturer trait
// ---------------------------------------------------------------------------

/// Capability interface for obtaining a raster image of a screen region.
///
/// Implementations may block; the pipeline always calls this through
/// `tokio::task::spawn_blocking`.
pub trait Capturer: Send + Sync {
    /// Capture the pixels inside `rect`, in screen coordinates.
    fn capture(&self, rect: &CaptureRect) -> Result<DynamicImage, CaptureError>;
}

// Compile-time assertion: Box<dyn Capturer> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn Capturer>) {}
};

// ---------------------------------------------------------------------------
// MockCapturer  (test-only)
// ---------------------------------------------------------------------------

/// A test double that returns a blank image of the rect's size, or a
/// configured error, without touching any display.
#[cfg(test)]
pub struct MockCapturer {
    error: Option<CaptureError>,
}

#[cfg(test)]
impl MockCapturer {
    /// Create a mock that succeeds with a blank rect-sized image.
    pub fn ok() -> Self {
        Self { error: None }
    }

    /// Create a mock that always fails with `error`.
    pub fn err(error: CaptureError) -> Self {
        Self { error: Some(error) }
    }
}

#[cfg(test)]
impl Capturer for MockCapturer {
    fn capture(&self, rect: &CaptureRect) -> Result<DynamicImage, CaptureError> {
        if let Some(e) = &self.error {
            return Err(e.clone());
        }
        Ok(DynamicImage::new_rgba8(
            rect.width() as u32,
            rect.height() as u32,
        ))
    }
}
