//! Wrapped-line layout with a scrollable viewport.
//!
//! [`LineBuffer`] turns arbitrary-length translated text into a bounded
//! on-screen region: text is word-wrapped to a maximum width in characters,
//! and at most `max_visible_lines` are shown at once, with a clamped scroll
//! offset over the rest.
//!
//! Layout is deterministic: identical `(text, width)` pairs always produce
//! byte-for-byte identical lines.

use textwrap::{Options, WordSplitter};

/// Ordered sequence of wrapped display lines plus a scroll offset.
///
/// Rebuilt wholesale whenever the translated text changes; the offset resets
/// to 0 on rebuild.  Scrolling afterwards is clamped to
/// `[0, line_count - viewport_height]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    lines: Vec<String>,
    offset: usize,
    max_visible: usize,
}

impl LineBuffer {
    /// Word-wrap `text` into lines of at most `max_width_chars` characters.
    ///
    /// Lines break on whitespace boundaries; a single token longer than the
    /// width is hard-split.  Empty or whitespace-only text yields an empty
    /// buffer.
    ///
    /// Both bounds must be positive; violating this is a programming error,
    /// not a runtime failure.
    pub fn layout(text: &str, max_width_chars: usize, max_visible_lines: usize) -> Self {
        debug_assert!(max_width_chars > 0, "wrap width must be positive");
        debug_assert!(max_visible_lines > 0, "viewport must be at least one line");

        let lines = if text.trim().is_empty() {
            Vec::new()
        } else {
            let options = Options::new(max_width_chars)
                .word_splitter(WordSplitter::NoHyphenation)
                .break_words(true);
            textwrap::wrap(text, options)
                .into_iter()
                .map(|line| line.into_owned())
                .collect()
        };

        Self {
            lines,
            offset: 0,
            max_visible: max_visible_lines,
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// All wrapped lines, ignoring the viewport.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of lines actually shown: `min(line_count, max_visible_lines)`.
    pub fn viewport_height(&self) -> usize {
        self.lines.len().min(self.max_visible)
    }

    /// Largest valid scroll offset.
    pub fn max_offset(&self) -> usize {
        self.lines.len() - self.viewport_height()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Move the viewport by `delta` lines, clamped to the valid range.
    /// A no-op when already at an extreme and `delta` pushes further.
    pub fn scroll(&mut self, delta: isize) {
        let max = self.max_offset() as isize;
        self.offset = (self.offset as isize + delta).clamp(0, max) as usize;
    }

    /// The currently visible window of lines.
    pub fn visible(&self) -> &[String] {
        &self.lines[self.offset..self.offset + self.viewport_height()]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_on_whitespace_boundaries() {
        let buf = LineBuffer::layout("the quick brown fox jumps", 10, 5);
        assert_eq!(buf.lines(), ["the quick", "brown fox", "jumps"]);
        for line in buf.lines() {
            assert!(line.chars().count() <= 10);
        }
    }

    #[test]
    fn hard_splits_overlong_tokens() {
        let buf = LineBuffer::layout("abcdefghijklmno", 5, 5);
        assert_eq!(buf.lines(), ["abcde", "fghij", "klmno"]);
    }

    #[test]
    fn short_text_fits_on_one_line() {
        let buf = LineBuffer::layout("Merhaba Dünya", 20, 3);
        assert_eq!(buf.lines(), ["Merhaba Dünya"]);
        assert_eq!(buf.viewport_height(), 1);
        assert_eq!(buf.max_offset(), 0);
    }

    #[test]
    fn empty_text_yields_empty_buffer() {
        let buf = LineBuffer::layout("", 20, 3);
        assert!(buf.is_empty());
        assert_eq!(buf.viewport_height(), 0);
        assert!(buf.visible().is_empty());

        let buf = LineBuffer::layout("   \n ", 20, 3);
        assert!(buf.is_empty());
    }

    /// Identical inputs must produce identical buffers, byte for byte.
    #[test]
    fn layout_is_deterministic() {
        let text = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, \
                    sed do eiusmod tempor incididunt ut labore";
        let a = LineBuffer::layout(text, 24, 3);
        let b = LineBuffer::layout(text, 24, 3);
        assert_eq!(a, b);
        assert_eq!(a.lines(), b.lines());
    }

    #[test]
    fn viewport_is_capped_at_max_visible() {
        let buf = LineBuffer::layout("a b c d e f g h", 1, 3);
        assert_eq!(buf.line_count(), 8);
        assert_eq!(buf.viewport_height(), 3);
        assert_eq!(buf.max_offset(), 5);
        assert_eq!(buf.visible(), ["a", "b", "c"]);
    }

    /// Scrolling never drives the offset outside `[0, max_offset]`.
    #[test]
    fn scroll_clamps_to_valid_range() {
        let mut buf = LineBuffer::layout("a b c d e f g h", 1, 3);

        buf.scroll(-10);
        assert_eq!(buf.offset(), 0);

        buf.scroll(2);
        assert_eq!(buf.offset(), 2);
        assert_eq!(buf.visible(), ["c", "d", "e"]);

        buf.scroll(100);
        assert_eq!(buf.offset(), buf.max_offset());
        assert_eq!(buf.visible(), ["f", "g", "h"]);

        // Pushing past the extreme is a no-op.
        buf.scroll(1);
        assert_eq!(buf.offset(), buf.max_offset());
    }

    #[test]
    fn scroll_on_short_buffer_is_noop() {
        let mut buf = LineBuffer::layout("one line", 20, 3);
        buf.scroll(5);
        assert_eq!(buf.offset(), 0);
        buf.scroll(-5);
        assert_eq!(buf.offset(), 0);
    }

    #[test]
    fn rebuild_resets_offset() {
        let mut buf = LineBuffer::layout("a b c d e f", 1, 2);
        buf.scroll(3);
        assert_eq!(buf.offset(), 3);

        buf = LineBuffer::layout("x y z w", 1, 2);
        assert_eq!(buf.offset(), 0);
    }
}
