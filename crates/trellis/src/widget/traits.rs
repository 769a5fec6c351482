//! The `Widget` trait and paint context.

use trellis_core::Object;

use super::base::WidgetBase;
use super::events::WidgetEvent;
use super::geometry::SizeHint;
use crate::paint::{Color, Rect, Renderer, RoundedRect, Stroke};

/// Context passed to [`Widget::paint`].
///
/// Carries the renderer and the widget's rectangle in the renderer's current
/// coordinate space.
pub struct PaintContext<'a> {
    renderer: &'a mut dyn Renderer,
    widget_rect: Rect,
    /// Whether focus indicators should be drawn this frame.
    pub show_focus: bool,
}

impl<'a> PaintContext<'a> {
    /// Create a paint context for a widget rectangle.
    pub fn new(renderer: &'a mut dyn Renderer, widget_rect: Rect) -> Self {
        Self {
            renderer,
            widget_rect,
            show_focus: true,
        }
    }

    /// The widget's rectangle.
    #[inline]
    pub fn rect(&self) -> Rect {
        self.widget_rect
    }

    /// The widget's width.
    #[inline]
    pub fn width(&self) -> f32 {
        self.widget_rect.width()
    }

    /// The widget's height.
    #[inline]
    pub fn height(&self) -> f32 {
        self.widget_rect.height()
    }

    /// The renderer to draw with.
    #[inline]
    pub fn renderer(&mut self) -> &mut dyn Renderer {
        self.renderer
    }

    /// Draw the standard focus ring just inside the widget's bounds.
    pub fn draw_focus_indicator(&mut self, accent: Color) {
        let ring = RoundedRect::new(self.widget_rect.deflate(1.0), 4.0);
        self.renderer
            .stroke_rounded_rect(ring, Stroke::new(accent, 1.5));
    }
}

/// The base trait for all UI elements.
///
/// Implementations embed a [`WidgetBase`] and expose it through
/// [`widget_base`](Self::widget_base); the provided methods delegate common
/// state queries to it.
pub trait Widget: Object {
    /// The widget's base state.
    fn widget_base(&self) -> &WidgetBase;

    /// Mutable access to the widget's base state.
    fn widget_base_mut(&mut self) -> &mut WidgetBase;

    /// The widget's preferred/minimum/maximum size for layout.
    fn size_hint(&self) -> SizeHint;

    /// Paint the widget.
    fn paint(&self, ctx: &mut PaintContext<'_>);

    /// Handle an event. Return true if the event was handled.
    ///
    /// The default implementation handles nothing.
    fn event(&mut self, event: &mut WidgetEvent) -> bool {
        let _ = event;
        false
    }

    /// The widget's geometry in parent coordinates.
    fn geometry(&self) -> Rect {
        self.widget_base().geometry()
    }

    /// Whether the widget's own visible flag is set.
    fn is_visible(&self) -> bool {
        self.widget_base().is_visible()
    }

    /// Whether the widget's own enabled flag is set.
    fn is_enabled(&self) -> bool {
        self.widget_base().is_enabled()
    }

    /// Whether the widget and all ancestors are enabled.
    fn is_effectively_enabled(&self) -> bool {
        self.widget_base().is_effectively_enabled()
    }

    /// Whether the mouse is over the widget.
    fn is_hovered(&self) -> bool {
        self.widget_base().is_hovered()
    }

    /// Whether a mouse button is held on the widget.
    fn is_pressed(&self) -> bool {
        self.widget_base().is_pressed()
    }

    /// Whether the widget has keyboard focus.
    fn has_focus(&self) -> bool {
        self.widget_base().has_focus()
    }

    /// Request a repaint.
    fn update(&mut self) {
        self.widget_base_mut().update();
    }
}

/// Conversion to trait objects, for heterogeneous widget collections.
pub trait AsWidget {
    /// Borrow as a widget trait object.
    fn as_widget(&self) -> &dyn Widget;

    /// Mutably borrow as a widget trait object.
    fn as_widget_mut(&mut self) -> &mut dyn Widget;
}

impl<T: Widget + Sized> AsWidget for T {
    fn as_widget(&self) -> &dyn Widget {
        self
    }

    fn as_widget_mut(&mut self) -> &mut dyn Widget {
        self
    }
}
