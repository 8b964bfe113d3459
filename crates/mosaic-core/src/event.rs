#![forbid(unsafe_code)]

//! Canonical input event types.
//!
//! The host window system translates its native input into these events and
//! hands one ordered batch to the engine per frame. Pointer coordinates are in
//! frame-buffer pixels.

use bitflags::bitflags;

use crate::geometry::Point;

/// Canonical input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The host asked the application to close.
    Quit,

    /// The presentation surface changed size.
    Resize {
        /// New width in pixels.
        width: u32,
        /// New height in pixels.
        height: u32,
    },

    /// A pointer event.
    Mouse(MouseEvent),

    /// A keyboard event.
    Key(KeyEvent),
}

impl Event {
    /// Shorthand for a pointer press at `(x, y)`.
    #[must_use]
    pub const fn mouse_down(x: u32, y: u32) -> Self {
        Self::Mouse(MouseEvent::new(MouseEventKind::Down, x, y))
    }

    /// Shorthand for a pointer release at `(x, y)`.
    #[must_use]
    pub const fn mouse_up(x: u32, y: u32) -> Self {
        Self::Mouse(MouseEvent::new(MouseEventKind::Up, x, y))
    }

    /// Shorthand for a pointer move to `(x, y)`.
    #[must_use]
    pub const fn mouse_move(x: u32, y: u32) -> Self {
        Self::Mouse(MouseEvent::new(MouseEventKind::Moved, x, y))
    }

    /// Shorthand for a key press.
    #[must_use]
    pub const fn key(code: KeyCode) -> Self {
        Self::Key(KeyEvent::new(code))
    }

    /// Check if this is a quit request.
    #[must_use]
    pub const fn is_quit(&self) -> bool {
        matches!(self, Self::Quit)
    }
}

/// A pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    /// What happened.
    pub kind: MouseEventKind,
    /// X coordinate (0-indexed).
    pub x: u32,
    /// Y coordinate (0-indexed).
    pub y: u32,
    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl MouseEvent {
    /// Create a new pointer event without modifiers.
    #[must_use]
    pub const fn new(kind: MouseEventKind, x: u32, y: u32) -> Self {
        Self {
            kind,
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    /// Pointer position.
    #[must_use]
    pub const fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Pointer event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    /// Primary button pressed.
    Down,
    /// Primary button released.
    Up,
    /// Pointer moved.
    Moved,
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key that was pressed.
    pub code: KeyCode,
    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a new key event with no modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
        }
    }

    /// Attach modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Check if this is a specific character key.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch == c)
    }

    /// Check if Ctrl is held.
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }
}

/// Key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character.
    Char(char),
    Enter,
    Escape,
    Backspace,
    Tab,
    Up,
    Down,
    Left,
    Right,
    /// Function key (F1-F24).
    F(u8),
}

bitflags! {
    /// Modifier keys held during an event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const NONE  = 0b0000;
        const SHIFT = 0b0001;
        const ALT   = 0b0010;
        const CTRL  = 0b0100;
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shorthands_build_expected_events() {
        assert_eq!(
            Event::mouse_down(3, 4),
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down,
                x: 3,
                y: 4,
                modifiers: Modifiers::NONE,
            })
        );
        assert!(Event::Quit.is_quit());
        assert!(!Event::key(KeyCode::Enter).is_quit());
    }

    #[test]
    fn key_event_helpers() {
        let key = KeyEvent::new(KeyCode::Char('c')).with_modifiers(Modifiers::CTRL);
        assert!(key.is_char('c'));
        assert!(!key.is_char('q'));
        assert!(key.ctrl());
        assert!(!KeyEvent::new(KeyCode::Left).ctrl());
    }

    #[test]
    fn mouse_position() {
        let ev = MouseEvent::new(MouseEventKind::Moved, 7, 9);
        assert_eq!(ev.position(), Point::new(7, 9));
    }
}
