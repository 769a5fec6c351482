//! A text field two-way-bound to a typed value, with inline validation.
//!
//! The field owns an editable text buffer and mediates between it and an
//! externally owned value reached through a [`ValueBinding`]. A
//! [`FieldCodec`] supplies the conversions: formatter for value-to-text,
//! parser for text-to-value, optional describer for invalid text.
//!
//! The reconciliation rules:
//!
//! - The buffer is initialized from the bound value through the formatter.
//! - When the bound value changes externally, the buffer is reformatted
//!   unless it already parses to the same value; an in-flight edit that means
//!   the same thing is never rewritten out from under the user.
//! - When the user edits the text, a successful parse propagates to the
//!   bound value immediately (under the default [`ValidationTrigger::OnEdit`]
//!   policy); a failed parse leaves the bound value untouched and the buffer
//!   as typed.
//! - On commit (Enter or focus loss), a successful parse propagates and a
//!   failed parse reverts the buffer to the formatted bound value.
//!
//! Unparseable text is a normal state the field can sit in, surfaced through
//! [`is_valid`](ValidatingField::is_valid) and the inline error indicator; it
//! is never an error value and the bound value never observes it.

use unicode_segmentation::UnicodeSegmentation;

use trellis_core::{Object, ObjectId, Signal};

use crate::paint::{Color, Point, RoundedRect, Stroke};
use crate::widget::base::WidgetBase;
use crate::widget::binding::{FieldCodec, ValueBinding};
use crate::widget::events::{Key, WidgetEvent};
use crate::widget::geometry::SizeHint;
use crate::widget::traits::{PaintContext, Widget};

const BACKGROUND: Color = Color::new(0.13, 0.13, 0.14, 1.0);
const BORDER: Color = Color::new(0.32, 0.32, 0.34, 1.0);
const BORDER_FOCUSED: Color = Color::new(0.25, 0.56, 0.91, 1.0);
const BORDER_ERROR: Color = Color::new(0.85, 0.25, 0.22, 1.0);
const TEXT_COLOR: Color = Color::new(0.92, 0.92, 0.92, 1.0);
const LABEL_COLOR: Color = Color::new(0.62, 0.62, 0.62, 1.0);

/// When text edits are validated against the bound value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationTrigger {
    /// Validate on every edit; valid text propagates per keystroke.
    #[default]
    OnEdit,
    /// Validate only on commit (Enter or focus loss).
    OnCommit,
}

/// A text input bound to a typed value with inline validity feedback.
pub struct ValidatingField<T> {
    base: WidgetBase,
    binding: ValueBinding<T>,
    codec: FieldCodec<T>,
    text: String,
    label: Option<String>,
    trigger: ValidationTrigger,
    show_error: bool,

    /// Emitted whenever the text buffer changes, with the new text.
    pub text_changed: Signal<String>,
    /// Emitted when a commit successfully propagated to the bound value.
    pub value_committed: Signal<()>,
    /// Emitted when editing ends (focus loss or Enter).
    pub editing_finished: Signal<()>,
}

impl<T: PartialEq + Send + Sync + 'static> ValidatingField<T> {
    /// Create a field bound to a value.
    ///
    /// The text buffer starts as the formatted bound value.
    pub fn new(binding: ValueBinding<T>, codec: FieldCodec<T>) -> Self {
        let text = codec.format(&binding.get());
        let mut field = Self {
            base: WidgetBase::new::<Self>(),
            binding,
            codec,
            text,
            label: None,
            trigger: ValidationTrigger::default(),
            show_error: true,
            text_changed: Signal::new(),
            value_committed: Signal::new(),
            editing_finished: Signal::new(),
        };
        field.base.set_focusable(true);
        field
    }

    /// Set the label drawn before the input area.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set whether the inline error indicator is shown for invalid text.
    pub fn with_show_error(mut self, show_error: bool) -> Self {
        self.show_error = show_error;
        self
    }

    /// Set the validation trigger policy.
    pub fn with_trigger(mut self, trigger: ValidationTrigger) -> Self {
        self.trigger = trigger;
        self
    }

    /// The current text buffer.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The validation trigger policy in effect.
    pub fn trigger_policy(&self) -> ValidationTrigger {
        self.trigger
    }

    /// Whether the buffer currently parses to a value.
    ///
    /// Derived freshly from the parser on every call; validity is never
    /// cached.
    pub fn is_valid(&self) -> bool {
        self.codec.parse(&self.text).is_some()
    }

    /// The error message for the current buffer, while invalid.
    pub fn error_message(&self) -> Option<String> {
        if self.is_valid() {
            None
        } else {
            Some(self.codec.error_message(&self.text))
        }
    }

    /// Whether the inline error indicator should be drawn right now.
    pub fn shows_error_indicator(&self) -> bool {
        self.show_error && !self.is_valid()
    }

    /// Replace the text buffer, as if the user had edited it.
    ///
    /// Under [`ValidationTrigger::OnEdit`], text that parses propagates to
    /// the bound value immediately. Text that does not parse is kept as
    /// typed; the bound value is left untouched.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if self.text == text {
            return;
        }
        self.text = text;
        self.base.update();
        self.text_changed.emit(self.text.clone());

        if self.trigger == ValidationTrigger::OnEdit {
            if let Some(value) = self.codec.parse(&self.text) {
                self.binding.set(value);
            } else {
                tracing::trace!(
                    target: "trellis::widget",
                    text = %self.text,
                    "edit does not parse, bound value unchanged"
                );
            }
        }
    }

    /// Commit the current buffer.
    ///
    /// Text that parses propagates to the bound value. Text that does not is
    /// discarded: the buffer reverts to the formatted bound value.
    pub fn commit(&mut self) {
        match self.codec.parse(&self.text) {
            Some(value) => {
                self.binding.set(value);
                self.value_committed.emit(());
            }
            None => {
                tracing::debug!(
                    target: "trellis::widget",
                    text = %self.text,
                    "commit of invalid text, reverting to formatted value"
                );
                let reverted = self.codec.format(&self.binding.get());
                if self.text != reverted {
                    self.text = reverted;
                    self.base.update();
                    self.text_changed.emit(self.text.clone());
                }
            }
        }
    }

    /// React to an external change of the bound value.
    ///
    /// If the buffer already parses to the new value it is left exactly as
    /// typed, preserving any in-flight edit; otherwise the buffer becomes the
    /// formatted new value.
    pub fn refresh_from_value(&mut self) {
        let value = self.binding.get();
        if let Some(parsed) = self.codec.parse(&self.text) {
            if parsed == value {
                return;
            }
        }
        let formatted = self.codec.format(&value);
        if self.text != formatted {
            self.text = formatted;
            self.base.update();
            self.text_changed.emit(self.text.clone());
        }
    }

    fn delete_last_grapheme(&mut self) {
        if let Some((offset, _)) = self.text.grapheme_indices(true).next_back() {
            let mut text = self.text.clone();
            text.truncate(offset);
            self.set_text(text);
        }
    }

    fn insert_text(&mut self, input: &str) {
        let printable: String = input.chars().filter(|c| !c.is_control()).collect();
        if printable.is_empty() {
            return;
        }
        let mut text = self.text.clone();
        text.push_str(&printable);
        self.set_text(text);
    }

    fn border_color(&self) -> Color {
        if self.shows_error_indicator() {
            BORDER_ERROR
        } else if self.base.has_focus() {
            BORDER_FOCUSED
        } else {
            BORDER
        }
    }
}

impl<T: PartialEq + Send + Sync + 'static> Object for ValidatingField<T> {
    fn object_id(&self) -> ObjectId {
        self.base.object_id()
    }
}

impl<T: PartialEq + Send + Sync + 'static> Widget for ValidatingField<T> {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn size_hint(&self) -> SizeHint {
        SizeHint::from_dimensions(160.0, 28.0).with_minimum_dimensions(80.0, 24.0)
    }

    fn paint(&self, ctx: &mut PaintContext<'_>) {
        let rect = ctx.rect();
        let shape = RoundedRect::new(rect, 4.0);
        let border = self.border_color();

        ctx.renderer().fill_rounded_rect(shape, BACKGROUND);
        ctx.renderer()
            .stroke_rounded_rect(shape, Stroke::new(border, 1.0));

        let text_size = 12.0;
        let baseline = rect.center().y + text_size / 2.0;
        let mut x = rect.left() + 8.0;

        if let Some(label) = &self.label {
            ctx.renderer()
                .fill_text(label, Point::new(x, baseline), text_size, LABEL_COLOR);
            x += label.len() as f32 * text_size * 0.55 + 8.0;
        }

        ctx.renderer()
            .fill_text(&self.text, Point::new(x, baseline), text_size, TEXT_COLOR);

        if self.shows_error_indicator() {
            // Warning glyph at the trailing edge; its tooltip carries the
            // error message.
            let glyph_size = 13.0;
            let origin = Point::new(rect.right() - glyph_size - 6.0, baseline);
            ctx.renderer()
                .fill_text("\u{26a0}", origin, glyph_size, BORDER_ERROR);
        }

        if self.base.has_focus() && ctx.show_focus {
            ctx.draw_focus_indicator(BORDER_FOCUSED);
        }
    }

    fn event(&mut self, event: &mut WidgetEvent) -> bool {
        match event {
            WidgetEvent::KeyPress(e) => {
                match e.key {
                    Key::Enter => {
                        self.commit();
                        self.editing_finished.emit(());
                        e.base.accept();
                        return true;
                    }
                    Key::Backspace => {
                        self.delete_last_grapheme();
                        e.base.accept();
                        return true;
                    }
                    _ => {}
                }
                if let Some(text) = e.text.clone() {
                    self.insert_text(&text);
                    e.base.accept();
                    return true;
                }
                false
            }
            WidgetEvent::MousePress(e) => {
                if self.base.is_effectively_enabled() {
                    self.base.set_focused(true);
                    e.base.accept();
                    return true;
                }
                false
            }
            WidgetEvent::FocusIn(_) => {
                self.base.set_focused(true);
                true
            }
            WidgetEvent::FocusOut(_) => {
                self.base.set_focused(false);
                self.commit();
                self.editing_finished.emit(());
                true
            }
            WidgetEvent::Enter(_) => {
                self.base.set_hovered(true);
                true
            }
            WidgetEvent::Leave(_) => {
                self.base.set_hovered(false);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::{DrawCommand, RecordingRenderer, Rect};
    use crate::widget::events::{FocusOutEvent, KeyPressEvent};
    use static_assertions::assert_impl_all;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use trellis_core::{Property, init_global_registry};

    assert_impl_all!(ValidatingField<i64>: Send, Sync);
    assert_impl_all!(ValidatingField<String>: Send, Sync);

    fn setup() {
        init_global_registry();
    }

    fn int_field(initial: i64) -> (Arc<Property<i64>>, ValidatingField<i64>) {
        let value = Arc::new(Property::new(initial));
        let field = ValidatingField::new(
            ValueBinding::from_property(Arc::clone(&value)),
            FieldCodec::from_display_str(),
        );
        (value, field)
    }

    #[test]
    fn test_initializes_from_formatted_value() {
        setup();
        let (_, field) = int_field(5);
        assert_eq!(field.text(), "5");
        assert!(field.is_valid());
    }

    #[test]
    fn test_live_propagation() {
        setup();
        let (value, mut field) = int_field(0);

        field.set_text("42");
        assert_eq!(value.get(), 42);

        field.set_text("4x");
        assert_eq!(value.get(), 42);
        assert!(!field.is_valid());
        assert_eq!(field.text(), "4x");
    }

    #[test]
    fn test_commit_reverts_invalid_text() {
        setup();
        let (value, mut field) = int_field(5);

        field.set_text("abc");
        assert_eq!(value.get(), 5);

        field.commit();
        assert_eq!(field.text(), "5");
        assert_eq!(value.get(), 5);
        assert!(field.is_valid());
    }

    #[test]
    fn test_commit_propagates_valid_text() {
        setup();
        let (value, mut field) = int_field(5);
        let committed = Arc::new(AtomicUsize::new(0));
        let committed_clone = Arc::clone(&committed);
        field.value_committed.connect(move |_| {
            committed_clone.fetch_add(1, Ordering::SeqCst);
        });

        field.set_text("12");
        field.commit();
        assert_eq!(value.get(), 12);
        assert_eq!(committed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_commit_is_idempotent_on_valid_text() {
        setup();
        let (value, mut field) = int_field(5);
        let changes = Arc::new(AtomicUsize::new(0));
        let changes_clone = Arc::clone(&changes);
        field.text_changed.connect(move |_| {
            changes_clone.fetch_add(1, Ordering::SeqCst);
        });

        field.set_text("12");
        field.commit();
        field.commit();

        assert_eq!(field.text(), "12");
        assert_eq!(value.get(), 12);
        // Only the edit itself changed the text.
        assert_eq!(changes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_external_change_reformats_buffer() {
        setup();
        let (value, mut field) = int_field(5);

        value.set(9);
        field.refresh_from_value();
        assert_eq!(field.text(), "9");
    }

    #[test]
    fn test_no_oscillation_preserves_in_flight_edit() {
        setup();
        let (value, mut field) = int_field(5);

        // "007" is not the canonical formatting of 7, but it parses to 7.
        field.set_text("007");
        assert_eq!(value.get(), 7);

        let changes = Arc::new(AtomicUsize::new(0));
        let changes_clone = Arc::clone(&changes);
        field.text_changed.connect(move |_| {
            changes_clone.fetch_add(1, Ordering::SeqCst);
        });

        field.refresh_from_value();
        assert_eq!(field.text(), "007");
        assert_eq!(changes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_invalid_buffer_is_reformatted_on_external_change() {
        setup();
        let (value, mut field) = int_field(5);

        field.set_text("garbage");
        value.set(8);
        field.refresh_from_value();
        assert_eq!(field.text(), "8");
    }

    #[test]
    fn test_commit_only_policy_defers_propagation() {
        setup();
        let value = Arc::new(Property::new(1i64));
        let mut field = ValidatingField::new(
            ValueBinding::from_property(Arc::clone(&value)),
            FieldCodec::from_display_str(),
        )
        .with_trigger(ValidationTrigger::OnCommit);

        field.set_text("42");
        assert_eq!(value.get(), 1);

        field.commit();
        assert_eq!(value.get(), 42);
    }

    #[test]
    fn test_error_message_fallback() {
        setup();
        let (_, mut field) = int_field(5);

        assert_eq!(field.error_message(), None);

        field.set_text("abc");
        assert_eq!(
            field.error_message().as_deref(),
            Some("\"abc\" is an invalid value")
        );
    }

    #[test]
    fn test_error_describer_is_consulted() {
        setup();
        let value = Arc::new(Property::new(0i64));
        let mut field = ValidatingField::new(
            ValueBinding::from_property(Arc::clone(&value)),
            FieldCodec::<i64>::from_display_str()
                .with_error_describer(|_| Some("enter a whole number".to_string())),
        );

        field.set_text("nope");
        assert_eq!(field.error_message().as_deref(), Some("enter a whole number"));
    }

    #[test]
    fn test_typing_through_key_events() {
        setup();
        let (value, mut field) = int_field(0);
        field.set_text("");

        for ch in ["4", "2"] {
            let mut event = WidgetEvent::KeyPress(KeyPressEvent::with_text(Key::Unknown(0), ch));
            field.event(&mut event);
            assert!(event.is_accepted());
        }
        assert_eq!(field.text(), "42");
        assert_eq!(value.get(), 42);
    }

    #[test]
    fn test_backspace_removes_grapheme() {
        setup();
        let value = Arc::new(Property::new("café".to_string()));
        let mut field = ValidatingField::new(
            ValueBinding::from_property(Arc::clone(&value)),
            FieldCodec::<String>::new(|v| v.clone(), |t| Some(t.to_string())),
        );

        let mut event = WidgetEvent::KeyPress(KeyPressEvent::new(Key::Backspace));
        field.event(&mut event);
        assert_eq!(field.text(), "caf");
        assert_eq!(value.get(), "caf");
    }

    #[test]
    fn test_enter_commits() {
        setup();
        let value = Arc::new(Property::new(1i64));
        let mut field = ValidatingField::new(
            ValueBinding::from_property(Arc::clone(&value)),
            FieldCodec::from_display_str(),
        )
        .with_trigger(ValidationTrigger::OnCommit);

        field.set_text("33");
        let mut event = WidgetEvent::KeyPress(KeyPressEvent::new(Key::Enter));
        field.event(&mut event);

        assert!(event.is_accepted());
        assert_eq!(value.get(), 33);
    }

    #[test]
    fn test_focus_out_commits_and_finishes_editing() {
        setup();
        let (value, mut field) = int_field(5);
        let finished = Arc::new(AtomicUsize::new(0));
        let finished_clone = Arc::clone(&finished);
        field.editing_finished.connect(move |_| {
            finished_clone.fetch_add(1, Ordering::SeqCst);
        });

        field.set_text("abc");
        let mut event = WidgetEvent::FocusOut(FocusOutEvent::default());
        field.event(&mut event);

        assert_eq!(field.text(), "5");
        assert_eq!(value.get(), 5);
        assert_eq!(finished.load(Ordering::SeqCst), 1);
        assert!(!field.has_focus());
    }

    #[test]
    fn test_paint_error_indicator() {
        setup();
        let (_, mut field) = int_field(5);
        field.widget_base_mut().resize(160.0, 28.0);
        field.set_text("abc");

        let mut renderer = RecordingRenderer::new();
        let mut ctx = PaintContext::new(&mut renderer, Rect::new(0.0, 0.0, 160.0, 28.0));
        field.paint(&mut ctx);

        assert!(renderer.find_text("\u{26a0}").is_some());
        assert_eq!(
            renderer.count_matching(|c| matches!(
                c,
                DrawCommand::StrokeRoundedRect { stroke, .. } if stroke.color == BORDER_ERROR
            )),
            1
        );
    }

    #[test]
    fn test_show_error_flag_hides_indicator() {
        setup();
        let value = Arc::new(Property::new(5i64));
        let mut field = ValidatingField::new(
            ValueBinding::from_property(Arc::clone(&value)),
            FieldCodec::from_display_str(),
        )
        .with_show_error(false);
        field.widget_base_mut().resize(160.0, 28.0);
        field.set_text("abc");

        assert!(!field.shows_error_indicator());
        // The message is still available to callers even when not drawn.
        assert!(field.error_message().is_some());

        let mut renderer = RecordingRenderer::new();
        let mut ctx = PaintContext::new(&mut renderer, Rect::new(0.0, 0.0, 160.0, 28.0));
        field.paint(&mut ctx);
        assert!(renderer.find_text("\u{26a0}").is_none());
    }

    #[test]
    fn test_label_is_painted() {
        setup();
        let value = Arc::new(Property::new(5i64));
        let mut field = ValidatingField::new(
            ValueBinding::from_property(Arc::clone(&value)),
            FieldCodec::from_display_str(),
        )
        .with_label("Port");
        field.widget_base_mut().resize(160.0, 28.0);

        let mut renderer = RecordingRenderer::new();
        let mut ctx = PaintContext::new(&mut renderer, Rect::new(0.0, 0.0, 160.0, 28.0));
        field.paint(&mut ctx);
        assert!(renderer.find_text("Port").is_some());
    }
}
