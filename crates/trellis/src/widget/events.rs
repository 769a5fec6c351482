//! Widget events.
//!
//! Events are delivered to [`Widget::event`](super::Widget::event) wrapped in
//! the [`WidgetEvent`] enum. A handler that consumes an event calls
//! [`WidgetEvent::accept`]; unaccepted input events propagate to the parent
//! widget, while lifecycle and focus events never do.

use crate::paint::{Point, Rect, Size};

/// Common state shared by all events: the accepted flag.
#[derive(Debug, Clone, Default)]
pub struct EventBase {
    accepted: bool,
}

impl EventBase {
    /// Create an unaccepted event base.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a handler accepted the event.
    #[inline]
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// Mark the event as handled.
    #[inline]
    pub fn accept(&mut self) {
        self.accepted = true;
    }

    /// Mark the event as not handled.
    #[inline]
    pub fn ignore(&mut self) {
        self.accepted = false;
    }
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Keyboard modifier state at the time of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyboardModifiers {
    pub shift: bool,
    pub control: bool,
    pub alt: bool,
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers held.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Whether any modifier is held.
    #[inline]
    pub fn any(&self) -> bool {
        self.shift || self.control || self.alt || self.meta
    }
}

/// Why a widget gained or lost focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusReason {
    /// Focus changed because of a mouse click.
    Mouse,
    /// Focus moved forward with Tab.
    Tab,
    /// Focus moved backward with Shift+Tab.
    Backtab,
    /// Any other cause (programmatic, window activation).
    #[default]
    Other,
}

/// Keys the widget layer distinguishes.
///
/// Printable input arrives as [`KeyPressEvent::text`]; the `Key` value covers
/// editing and navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Space,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    /// A key with no dedicated variant, identified by scan code.
    Unknown(u16),
}

/// Mouse button pressed inside the widget.
#[derive(Debug, Clone)]
pub struct MousePressEvent {
    pub base: EventBase,
    /// Position in widget-local coordinates.
    pub position: Point,
    pub button: MouseButton,
    pub modifiers: KeyboardModifiers,
}

impl MousePressEvent {
    pub fn new(position: Point, button: MouseButton) -> Self {
        Self {
            base: EventBase::new(),
            position,
            button,
            modifiers: KeyboardModifiers::NONE,
        }
    }
}

/// Mouse button released.
#[derive(Debug, Clone)]
pub struct MouseReleaseEvent {
    pub base: EventBase,
    /// Position in widget-local coordinates.
    pub position: Point,
    pub button: MouseButton,
    pub modifiers: KeyboardModifiers,
}

impl MouseReleaseEvent {
    pub fn new(position: Point, button: MouseButton) -> Self {
        Self {
            base: EventBase::new(),
            position,
            button,
            modifiers: KeyboardModifiers::NONE,
        }
    }
}

/// Mouse moved while over the widget (or while a button is held).
#[derive(Debug, Clone)]
pub struct MouseMoveEvent {
    pub base: EventBase,
    pub position: Point,
    pub modifiers: KeyboardModifiers,
}

impl MouseMoveEvent {
    pub fn new(position: Point) -> Self {
        Self {
            base: EventBase::new(),
            position,
            modifiers: KeyboardModifiers::NONE,
        }
    }
}

/// Mouse entered the widget's bounds.
#[derive(Debug, Clone, Default)]
pub struct EnterEvent {
    pub base: EventBase,
}

/// Mouse left the widget's bounds.
#[derive(Debug, Clone, Default)]
pub struct LeaveEvent {
    pub base: EventBase,
}

/// The widget gained keyboard focus.
#[derive(Debug, Clone, Default)]
pub struct FocusInEvent {
    pub base: EventBase,
    pub reason: FocusReason,
}

impl FocusInEvent {
    pub fn new(reason: FocusReason) -> Self {
        Self {
            base: EventBase::new(),
            reason,
        }
    }
}

/// The widget lost keyboard focus.
#[derive(Debug, Clone, Default)]
pub struct FocusOutEvent {
    pub base: EventBase,
    pub reason: FocusReason,
}

impl FocusOutEvent {
    pub fn new(reason: FocusReason) -> Self {
        Self {
            base: EventBase::new(),
            reason,
        }
    }
}

/// A key was pressed while the widget had focus.
#[derive(Debug, Clone)]
pub struct KeyPressEvent {
    pub base: EventBase,
    pub key: Key,
    pub modifiers: KeyboardModifiers,
    /// The text this key press produces, for printable input.
    pub text: Option<String>,
    pub is_repeat: bool,
}

impl KeyPressEvent {
    pub fn new(key: Key) -> Self {
        Self {
            base: EventBase::new(),
            key,
            modifiers: KeyboardModifiers::NONE,
            text: None,
            is_repeat: false,
        }
    }

    /// A key press carrying printable text.
    pub fn with_text(key: Key, text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::new(key)
        }
    }
}

/// A key was released.
#[derive(Debug, Clone)]
pub struct KeyReleaseEvent {
    pub base: EventBase,
    pub key: Key,
    pub modifiers: KeyboardModifiers,
}

impl KeyReleaseEvent {
    pub fn new(key: Key) -> Self {
        Self {
            base: EventBase::new(),
            key,
            modifiers: KeyboardModifiers::NONE,
        }
    }
}

/// The widget should repaint the given region.
#[derive(Debug, Clone)]
pub struct PaintEvent {
    pub base: EventBase,
    /// Dirty region in widget-local coordinates.
    pub region: Rect,
}

impl PaintEvent {
    pub fn new(region: Rect) -> Self {
        Self {
            base: EventBase::new(),
            region,
        }
    }
}

/// The widget was resized.
#[derive(Debug, Clone)]
pub struct ResizeEvent {
    pub base: EventBase,
    pub old_size: Size,
    pub new_size: Size,
}

impl ResizeEvent {
    pub fn new(old_size: Size, new_size: Size) -> Self {
        Self {
            base: EventBase::new(),
            old_size,
            new_size,
        }
    }
}

/// The widget became visible.
#[derive(Debug, Clone, Default)]
pub struct ShowEvent {
    pub base: EventBase,
}

/// The widget was hidden.
#[derive(Debug, Clone, Default)]
pub struct HideEvent {
    pub base: EventBase,
}

/// All events a widget can receive.
#[derive(Debug, Clone)]
pub enum WidgetEvent {
    MousePress(MousePressEvent),
    MouseRelease(MouseReleaseEvent),
    MouseMove(MouseMoveEvent),
    Enter(EnterEvent),
    Leave(LeaveEvent),
    FocusIn(FocusInEvent),
    FocusOut(FocusOutEvent),
    KeyPress(KeyPressEvent),
    KeyRelease(KeyReleaseEvent),
    Paint(PaintEvent),
    Resize(ResizeEvent),
    Show(ShowEvent),
    Hide(HideEvent),
}

impl WidgetEvent {
    /// Whether a handler accepted the event.
    pub fn is_accepted(&self) -> bool {
        match self {
            Self::MousePress(e) => e.base.is_accepted(),
            Self::MouseRelease(e) => e.base.is_accepted(),
            Self::MouseMove(e) => e.base.is_accepted(),
            Self::Enter(e) => e.base.is_accepted(),
            Self::Leave(e) => e.base.is_accepted(),
            Self::FocusIn(e) => e.base.is_accepted(),
            Self::FocusOut(e) => e.base.is_accepted(),
            Self::KeyPress(e) => e.base.is_accepted(),
            Self::KeyRelease(e) => e.base.is_accepted(),
            Self::Paint(e) => e.base.is_accepted(),
            Self::Resize(e) => e.base.is_accepted(),
            Self::Show(e) => e.base.is_accepted(),
            Self::Hide(e) => e.base.is_accepted(),
        }
    }

    /// Mark the event as handled.
    pub fn accept(&mut self) {
        match self {
            Self::MousePress(e) => e.base.accept(),
            Self::MouseRelease(e) => e.base.accept(),
            Self::MouseMove(e) => e.base.accept(),
            Self::Enter(e) => e.base.accept(),
            Self::Leave(e) => e.base.accept(),
            Self::FocusIn(e) => e.base.accept(),
            Self::FocusOut(e) => e.base.accept(),
            Self::KeyPress(e) => e.base.accept(),
            Self::KeyRelease(e) => e.base.accept(),
            Self::Paint(e) => e.base.accept(),
            Self::Resize(e) => e.base.accept(),
            Self::Show(e) => e.base.accept(),
            Self::Hide(e) => e.base.accept(),
        }
    }

    /// Mark the event as not handled.
    pub fn ignore(&mut self) {
        match self {
            Self::MousePress(e) => e.base.ignore(),
            Self::MouseRelease(e) => e.base.ignore(),
            Self::MouseMove(e) => e.base.ignore(),
            Self::Enter(e) => e.base.ignore(),
            Self::Leave(e) => e.base.ignore(),
            Self::FocusIn(e) => e.base.ignore(),
            Self::FocusOut(e) => e.base.ignore(),
            Self::KeyPress(e) => e.base.ignore(),
            Self::KeyRelease(e) => e.base.ignore(),
            Self::Paint(e) => e.base.ignore(),
            Self::Resize(e) => e.base.ignore(),
            Self::Show(e) => e.base.ignore(),
            Self::Hide(e) => e.base.ignore(),
        }
    }

    /// Whether an unaccepted event should be offered to the parent widget.
    ///
    /// Lifecycle, focus, and enter/leave events are addressed to exactly one
    /// widget and never propagate. Input events propagate until accepted.
    pub fn should_propagate(&self) -> bool {
        match self {
            Self::Enter(_)
            | Self::Leave(_)
            | Self::FocusIn(_)
            | Self::FocusOut(_)
            | Self::Paint(_)
            | Self::Resize(_)
            | Self::Show(_)
            | Self::Hide(_) => false,
            Self::MousePress(_)
            | Self::MouseRelease(_)
            | Self::MouseMove(_)
            | Self::KeyPress(_)
            | Self::KeyRelease(_) => !self.is_accepted(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_ignore_round_trip() {
        let mut event = WidgetEvent::MousePress(MousePressEvent::new(
            Point::new(1.0, 2.0),
            MouseButton::Left,
        ));
        assert!(!event.is_accepted());
        event.accept();
        assert!(event.is_accepted());
        event.ignore();
        assert!(!event.is_accepted());
    }

    #[test]
    fn test_input_events_propagate_until_accepted() {
        let mut event = WidgetEvent::KeyPress(KeyPressEvent::new(Key::Enter));
        assert!(event.should_propagate());
        event.accept();
        assert!(!event.should_propagate());
    }

    #[test]
    fn test_targeted_events_never_propagate() {
        let event = WidgetEvent::FocusIn(FocusInEvent::new(FocusReason::Tab));
        assert!(!event.should_propagate());
        let event = WidgetEvent::Leave(LeaveEvent::default());
        assert!(!event.should_propagate());
        let event = WidgetEvent::Paint(PaintEvent::new(Rect::ZERO));
        assert!(!event.should_propagate());
    }

    #[test]
    fn test_key_press_with_text() {
        let event = KeyPressEvent::with_text(Key::Unknown(30), "a");
        assert_eq!(event.text.as_deref(), Some("a"));
        assert!(!event.is_repeat);
    }
}
