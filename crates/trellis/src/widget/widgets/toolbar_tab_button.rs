//! A selectable toolbar tab button.
//!
//! Toolbar tab buttons present an icon above a short title and mark one tab
//! of a toolbar as selected. The foreground follows the interaction state:
//! the accent color while selected (dimmed while also pressed), the primary
//! text color while pressed, and the secondary text color otherwise. A
//! rounded highlight appears behind the content while the tab is selected or
//! hovered.

use trellis_core::{Object, ObjectId, Signal};

use crate::paint::{Color, Point, RoundedRect};
use crate::widget::base::WidgetBase;
use crate::widget::events::{Key, MouseButton, WidgetEvent};
use crate::widget::geometry::SizeHint;
use crate::widget::traits::{PaintContext, Widget};

/// Default accent for selected tabs.
const DEFAULT_ACCENT: Color = Color::new(0.25, 0.56, 0.91, 1.0);
/// Foreground while pressed but not selected.
const PRIMARY: Color = Color::new(0.92, 0.92, 0.92, 1.0);
/// Foreground at rest.
const SECONDARY: Color = Color::new(0.62, 0.62, 0.62, 1.0);
/// Foreground while disabled.
const DISABLED: Color = Color::new(0.45, 0.45, 0.45, 1.0);
/// Highlight behind a selected or hovered tab.
const HIGHLIGHT: Color = Color::new(1.0, 1.0, 1.0, 0.12);

/// A toolbar tab button with an icon above its title.
pub struct ToolbarTabButton {
    base: WidgetBase,
    title: String,
    icon: Option<String>,
    selected: bool,
    accent_color: Color,

    /// Emitted when the tab is activated (click or Space/Enter).
    pub clicked: Signal<()>,
    /// Emitted when the selected state changes.
    pub selected_changed: Signal<bool>,
}

impl ToolbarTabButton {
    /// Create a tab button with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        let mut button = Self {
            base: WidgetBase::new::<Self>(),
            title: title.into(),
            icon: None,
            selected: false,
            accent_color: DEFAULT_ACCENT,
            clicked: Signal::new(),
            selected_changed: Signal::new(),
        };
        button.base.set_focusable(true);
        button
    }

    /// Set the icon glyph drawn above the title.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Set the initial selected state.
    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Set the accent color used while selected.
    pub fn with_accent_color(mut self, accent: Color) -> Self {
        self.accent_color = accent;
        self
    }

    /// The tab's title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Change the tab's title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.base.update();
    }

    /// Whether the tab is selected.
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Set the selected state, emitting `selected_changed` if it changed.
    pub fn set_selected(&mut self, selected: bool) {
        if self.selected != selected {
            self.selected = selected;
            self.base.update();
            self.selected_changed.emit(selected);
        }
    }

    /// Activate the tab.
    ///
    /// Does nothing while the button or an ancestor is disabled.
    pub fn trigger(&self) {
        if !self.base.is_effectively_enabled() {
            return;
        }
        tracing::trace!(target: "trellis::widget", title = %self.title, "toolbar tab triggered");
        self.clicked.emit(());
    }

    /// Foreground and optional highlight color for an interaction state.
    fn colors(&self, disabled: bool, pressed: bool, hovered: bool) -> (Color, Option<Color>) {
        if disabled {
            return (DISABLED, None);
        }
        let foreground = if self.selected {
            if pressed {
                self.accent_color.with_alpha(self.accent_color.a * 0.75)
            } else {
                self.accent_color
            }
        } else if pressed {
            PRIMARY
        } else {
            SECONDARY
        };
        let highlight = (self.selected || hovered).then_some(HIGHLIGHT);
        (foreground, highlight)
    }
}

impl Object for ToolbarTabButton {
    fn object_id(&self) -> ObjectId {
        self.base.object_id()
    }
}

impl Widget for ToolbarTabButton {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn size_hint(&self) -> SizeHint {
        SizeHint::from_dimensions(64.0, 52.0).with_minimum_dimensions(48.0, 40.0)
    }

    fn paint(&self, ctx: &mut PaintContext<'_>) {
        let rect = ctx.rect();
        let (foreground, highlight) = self.colors(
            !self.base.is_effectively_enabled(),
            self.base.is_pressed(),
            self.base.is_hovered(),
        );

        if let Some(background) = highlight {
            ctx.renderer()
                .fill_rounded_rect(RoundedRect::new(rect.deflate(2.0), 6.0), background);
        }

        // Icon centered in the upper region, title centered below it.
        if let Some(icon) = &self.icon {
            let icon_size = 20.0;
            let origin = Point::new(
                rect.center().x - icon_size / 2.0,
                rect.top() + rect.height() * 0.45,
            );
            ctx.renderer().fill_text(icon, origin, icon_size, foreground);
        }

        let title_size = 11.0;
        let title_origin = Point::new(
            rect.center().x - self.title.len() as f32 * title_size * 0.25,
            rect.bottom() - 6.0,
        );
        ctx.renderer()
            .fill_text(&self.title, title_origin, title_size, foreground);

        if self.base.has_focus() && ctx.show_focus {
            ctx.draw_focus_indicator(self.accent_color);
        }
    }

    fn event(&mut self, event: &mut WidgetEvent) -> bool {
        match event {
            WidgetEvent::MousePress(e) => {
                if e.button == MouseButton::Left && self.base.is_effectively_enabled() {
                    self.base.set_pressed(true);
                    e.base.accept();
                    return true;
                }
                false
            }
            WidgetEvent::MouseRelease(e) => {
                if e.button == MouseButton::Left && self.base.is_pressed() {
                    self.base.set_pressed(false);
                    // Activation happens on release, inside the bounds.
                    if self.base.contains_point(e.position) {
                        self.trigger();
                    }
                    e.base.accept();
                    return true;
                }
                false
            }
            WidgetEvent::Enter(_) => {
                self.base.set_hovered(true);
                true
            }
            WidgetEvent::Leave(_) => {
                self.base.set_hovered(false);
                true
            }
            WidgetEvent::FocusIn(_) => {
                self.base.set_focused(true);
                true
            }
            WidgetEvent::FocusOut(_) => {
                self.base.set_focused(false);
                true
            }
            WidgetEvent::KeyPress(e) => {
                if matches!(e.key, Key::Space | Key::Enter) && !e.is_repeat {
                    self.trigger();
                    e.base.accept();
                    return true;
                }
                false
            }
            _ => false,
        }
    }
}
