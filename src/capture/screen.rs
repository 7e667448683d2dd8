//! Production screen capture backed by the `screenshots` crate.

use image::DynamicImage;
use screenshots::Screen;

use crate::gesture::CaptureRect;

use super::{CaptureError, Capturer};

/// Captures screen regions via `screenshots::Screen`.
///
/// The screen containing the rect's top-left corner is used; capture
/// coordinates are translated into that display's own coordinate space.
/// A rect spanning multiple displays is clipped by the backend — per-display
/// scaling differences are a backend concern, not handled here.
#[derive(Debug, Default)]
pub struct ScreenCapturer;

impl ScreenCapturer {
    pub fn new() -> Self {
        Self
    }
}

impl Capturer for ScreenCapturer {
    fn capture(&self, rect: &CaptureRect) -> Result<DynamicImage, CaptureError> {
        if rect.area() == 0 {
            return Err(CaptureError::InvalidRect(rect.to_string()));
        }

        let screen = Screen::from_point(rect.x0, rect.y0)
            .map_err(|_| CaptureError::NoDisplay(rect.x0, rect.y0))?;

        let image = screen
            .capture_area(
                rect.x0 - screen.display_info.x,
                rect.y0 - screen.display_info.y,
                rect.width() as u32,
                rect.height() as u32,
            )
            .map_err(|e| CaptureError::Backend(e.to_string()))?;

        // The backend's frame buffer is rebuilt from raw bytes rather than
        // wrapped directly: `screenshots` pins an older `image` release, so
        // its `RgbaImage` is a foreign type to the rest of the crate.
        to_dynamic_image(image.width(), image.height(), image.into_raw())
    }
}

/// Wrap a raw RGBA frame into a [`DynamicImage`].
///
/// Fails when the byte count does not match `width * height * 4`, which
/// would mean the backend handed back a truncated frame.
fn to_dynamic_image(
    width: u32,
    height: u32,
    raw: Vec<u8>,
) -> Result<DynamicImage, CaptureError> {
    image::RgbaImage::from_raw(width, height, raw)
        .map(DynamicImage::ImageRgba8)
        .ok_or_else(|| CaptureError::Backend("capture returned a truncated frame".into()))
}
