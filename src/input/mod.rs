//! Global key/mouse input listener, backed by `rdev`.
//!
//! # Design
//!
//! `rdev::listen()` is a blocking OS-level call that never returns while the
//! process is alive.  It must run on a **dedicated OS thread** — it cannot be
//! used inside a tokio task.
//!
//! [`InputListener::start`] spawns that dedicated thread and returns an
//! [`InputListener`] handle.  Dropping the handle sets a stop flag so the
//! callback silently discards further events.  The underlying thread will
//! continue to exist until the process exits (rdev has no graceful shutdown
//! API), but it will consume no meaningful CPU while blocked waiting for
//! events.
//!
//! Raw events are mapped into [`InputEvent`]s and forwarded over a bounded
//! `tokio::sync::mpsc` channel, where the gesture tracker consumes them in
//! arrival order.  Mouse-move events are forwarded with `try_send` so a full
//! channel coalesces them instead of ever blocking the OS hook.
//!
//! # Usage
//!
//! ```no_run
//! use tokio::sync::mpsc;
//! use screen_translate::input::{InputEvent, InputListener, parse_key};
//!
//! let (tx, mut rx) = mpsc::channel(64);
//! let key = parse_key("Quote").expect("unknown key");
//! let _listener = InputListener::start(key, tx);
//!
//! // In your async loop:
//! // while let Some(ev) = rx.recv().await { ... }
//! ```

pub mod listener;

pub use listener::InputListener;

// ---------------------------------------------------------------------------
// InputEvent
// ---------------------------------------------------------------------------

/// Raw input events emitted by the listener thread.
///
/// Mouse coordinates are screen pixels.  Button events carry the most recent
/// cursor position seen by the hook, since the OS delivers button events
/// without coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// The selection trigger key was pressed down.
    TriggerPressed,
    /// The selection trigger key was released.
    TriggerReleased,
    /// The left mouse button was pressed.
    MousePressed { x: i32, y: i32 },
    /// The cursor moved.
    MouseMoved { x: i32, y: i32 },
    /// The left mouse button was released.
    MouseReleased { x: i32, y: i32 },
    /// Escape was pressed — abort any in-progress selection.
    CancelRequested,
}

// ---------------------------------------------------------------------------
// parse_key
// ---------------------------------------------------------------------------

/// Parse a trigger-key name from a config string into an [`rdev::Key`].
///
/// Supports F1–F12, common named keys, and single uppercase or lowercase
/// ASCII letters.
///
/// Returns `None` for unrecognised names so callers can fall back to a
/// default or display an error to the user.
///
/// # Examples
///
/// ```
/// use screen_translate::input::parse_key;
///
/// assert_eq!(parse_key("Quote"),  Some(rdev::Key::Quote));
/// assert_eq!(parse_key("F9"),     Some(rdev::Key::F9));
/// assert_eq!(parse_key("a"),      Some(rdev::Key::KeyA));
/// assert_eq!(parse_key("xyz"),    None);
/// ```
pub fn parse_key(key_str: &str) -> Option<rdev::Key> {
    match key_str {
        // Function keys
        "F1" => Some(rdev::Key::F1),
        "F2" => Some(rdev::Key::F2),
        "F3" => Some(rdev::Key::F3),
        "F4" => Some(rdev::Key::F4),
        "F5" => Some(rdev::Key::F5),
        "F6" => Some(rdev::Key::F6),
        "F7" => Some(rdev::Key::F7),
        "F8" => Some(rdev::Key::F8),
        "F9" => Some(rdev::Key::F9),
        "F10" => Some(rdev::Key::F10),
        "F11" => Some(rdev::Key::F11),
        "F12" => Some(rdev::Key::F12),

        // Punctuation / special
        "Quote" | "'" | "\"" => Some(rdev::Key::Quote),
        "BackQuote" | "`" => Some(rdev::Key::BackQuote),
        "Space" => Some(rdev::Key::Space),
        "Tab" => Some(rdev::Key::Tab),
        "CapsLock" => Some(rdev::Key::CapsLock),
        "ScrollLock" => Some(rdev::Key::ScrollLock),
        "PrintScreen" => Some(rdev::Key::PrintScreen),
        "Pause" => Some(rdev::Key::Pause),

        // Letter keys (case-insensitive)
        "A" | "a" => Some(rdev::Key::KeyA),
        "B" | "b" => Some(rdev::Key::KeyB),
        "C" | "c" => Some(rdev::Key::KeyC),
        "D" | "d" => Some(rdev::Key::KeyD),
        "E" | "e" => Some(rdev::Key::KeyE),
        "F" | "f" => Some(rdev::Key::KeyF),
        "G" | "g" => Some(rdev::Key::KeyG),
        "H" | "h" => Some(rdev::Key::KeyH),
        "I" | "i" => Some(rdev::Key::KeyI),
        "J" | "j" => Some(rdev::Key::KeyJ),
        "K" | "k" => Some(rdev::Key::KeyK),
        "L" | "l" => Some(rdev::Key::KeyL),
        "M" | "m" => Some(rdev::Key::KeyM),
        "N" | "n" => Some(rdev::Key::KeyN),
        "O" | "o" => Some(rdev::Key::KeyO),
        "P" | "p" => Some(rdev::Key::KeyP),
        "Q" | "q" => Some(rdev::Key::KeyQ),
        "R" | "r" => Some(rdev::Key::KeyR),
        "S" | "s" => Some(rdev::Key::KeyS),
        "T" | "t" => Some(rdev::Key::KeyT),
        "U" | "u" => Some(rdev::Key::KeyU),
        "V" | "v" => Some(rdev::Key::KeyV),
        "W" | "w" => Some(rdev::Key::KeyW),
        "X" | "x" => Some(rdev::Key::KeyX),
        "Y" | "y" => Some(rdev::Key::KeyY),
        "Z" | "z" => Some(rdev::Key::KeyZ),

        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_quote_key_aliases() {
        assert_eq!(parse_key("Quote"), Some(rdev::Key::Quote));
        assert_eq!(parse_key("'"), Some(rdev::Key::Quote));
        assert_eq!(parse_key("\""), Some(rdev::Key::Quote));
    }

    #[test]
    fn parse_function_keys() {
        assert_eq!(parse_key("F1"), Some(rdev::Key::F1));
        assert_eq!(parse_key("F9"), Some(rdev::Key::F9));
        assert_eq!(parse_key("F12"), Some(rdev::Key::F12));
    }

    #[test]
    fn parse_letter_keys_case_insensitive() {
        assert_eq!(parse_key("A"), Some(rdev::Key::KeyA));
        assert_eq!(parse_key("a"), Some(rdev::Key::KeyA));
        assert_eq!(parse_key("z"), Some(rdev::Key::KeyZ));
    }

    #[test]
    fn parse_unknown_key_returns_none() {
        assert_eq!(parse_key("xyz"), None);
        assert_eq!(parse_key(""), None);
        assert_eq!(parse_key("Ctrl+V"), None);
    }
}
