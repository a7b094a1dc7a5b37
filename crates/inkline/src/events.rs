//! Input event types consumed by the editing core.
//!
//! The host translates whatever its windowing layer delivers into these
//! types before handing them to [`InputField`](crate::InputField). The core
//! never talks to a platform event queue itself.

/// Keyboard modifiers that may be held during input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held (Cmd on macOS).
    pub control: bool,
    /// The Alt key is held (Option on macOS).
    pub alt: bool,
    /// The Meta/Super key is held (Windows key, Cmd on macOS).
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
        meta: false,
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        shift: false,
        control: true,
        alt: false,
        meta: false,
    };

    /// Control + Shift modifiers.
    pub const CTRL_SHIFT: Self = Self {
        shift: true,
        control: true,
        alt: false,
        meta: false,
    };

    /// Check if any modifier is pressed.
    pub fn any(&self) -> bool {
        self.shift || self.control || self.alt || self.meta
    }

    /// Check if no modifiers are pressed.
    pub fn none(&self) -> bool {
        !self.any()
    }
}

/// Keyboard key codes.
///
/// This enum covers the keys a text field consumes. It follows a similar
/// structure to web KeyboardEvent.code values; anything the host cannot map
/// arrives as `Unknown` and is ignored by the processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Key {
    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Numbers (main keyboard)
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    // Navigation
    ArrowUp, ArrowDown, ArrowLeft, ArrowRight,
    Home, End,

    // Editing
    Backspace, Delete,
    Enter, Tab,

    // Whitespace
    Space,

    // Control
    Escape,

    // Unknown/unmapped key
    Unknown(u16),
}

impl Key {
    /// Check if this is a navigation key.
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Key::ArrowUp
                | Key::ArrowDown
                | Key::ArrowLeft
                | Key::ArrowRight
                | Key::Home
                | Key::End
        )
    }
}

/// A key press delivered to the editing core.
#[derive(Debug, Clone)]
pub struct KeyEvent {
    /// The key that was pressed.
    pub key: Key,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
    /// The text input from this key press (if any).
    ///
    /// For printable keys, this contains the character(s) that would be
    /// typed. For non-printable keys (navigation, function keys, etc.),
    /// this is empty.
    pub text: String,
    /// Whether this is a key repeat event (key held down).
    pub is_repeat: bool,
}

impl KeyEvent {
    /// Create a new key event.
    pub fn new(key: Key, modifiers: KeyboardModifiers, text: impl Into<String>) -> Self {
        Self {
            key,
            modifiers,
            text: text.into(),
            is_repeat: false,
        }
    }

    /// Create a key event carrying no text payload.
    pub fn bare(key: Key, modifiers: KeyboardModifiers) -> Self {
        Self::new(key, modifiers, "")
    }
}

/// A point in the display area's local coordinate space.
///
/// `x = 0.0` is the left edge of the display area; the right edge sits at
/// the collaborator's reported display width.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The origin point (0, 0).
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// Pointer buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerButton {
    /// Primary button (usually left).
    #[default]
    Primary,
    /// Secondary button (usually right).
    Secondary,
    /// Middle button (scroll wheel click).
    Middle,
}

/// A pointer press or drag delivered to the editing core.
#[derive(Debug, Clone, Copy)]
pub struct PointerEvent {
    /// Position in display-area-local coordinates.
    pub pos: Point,
    /// The button involved.
    pub button: PointerButton,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
}

impl PointerEvent {
    /// Create a new pointer event for the primary button.
    pub fn new(pos: impl Into<Point>) -> Self {
        Self {
            pos: pos.into(),
            button: PointerButton::Primary,
            modifiers: KeyboardModifiers::NONE,
        }
    }

    /// Create a pointer event with an explicit button.
    pub fn with_button(pos: impl Into<Point>, button: PointerButton) -> Self {
        Self {
            pos: pos.into(),
            button,
            modifiers: KeyboardModifiers::NONE,
        }
    }
}
