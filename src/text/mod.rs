//! Text post-processing: OCR-output normalisation and display layout.

pub mod cleaner;
pub mod layout;

pub use cleaner::clean;
pub use layout::LineBuffer;
