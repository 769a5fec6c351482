//! Widget system for Trellis.
//!
//! The widget layer provides:
//!
//! - [`Widget`] trait: the base trait for all UI elements
//! - [`WidgetBase`]: common state every widget embeds
//! - Size hints and policies for layout negotiation
//! - Widget events for input handling and lifecycle
//! - [`ValueBinding`] and [`FieldCodec`] for value-bound input widgets
//!
//! # Creating a widget
//!
//! 1. Define a struct with a `WidgetBase` field
//! 2. Implement `Object` and the `Widget` trait
//! 3. Provide `size_hint()` for layout and `paint()` for rendering
//!
//! ```ignore
//! use trellis::paint::Color;
//! use trellis::widget::*;
//!
//! struct MyButton {
//!     base: WidgetBase,
//!     label: String,
//! }
//!
//! impl Widget for MyButton {
//!     fn widget_base(&self) -> &WidgetBase { &self.base }
//!     fn widget_base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
//!
//!     fn size_hint(&self) -> SizeHint {
//!         SizeHint::from_dimensions(80.0, 30.0)
//!     }
//!
//!     fn paint(&self, ctx: &mut PaintContext<'_>) {
//!         let color = if self.base.is_hovered() {
//!             Color::from_rgb8(70, 130, 180)
//!         } else {
//!             Color::from_rgb8(65, 105, 225)
//!         };
//!         let rect = ctx.rect();
//!         ctx.renderer().fill_rect(rect, color);
//!     }
//! }
//! ```
//!
//! Widgets form a tree through the object system in `trellis-core`; call
//! `init_global_registry()` before constructing any widget.

mod base;
mod binding;
mod events;
mod geometry;
mod traits;
pub mod widgets;

pub use base::WidgetBase;
pub use binding::{FieldCodec, ValueBinding};
pub use events::{
    EnterEvent, EventBase, FocusInEvent, FocusOutEvent, FocusReason, HideEvent, Key,
    KeyPressEvent, KeyReleaseEvent, KeyboardModifiers, LeaveEvent, MouseButton, MouseMoveEvent,
    MousePressEvent, MouseReleaseEvent, PaintEvent, ResizeEvent, ShowEvent, WidgetEvent,
};
pub use geometry::{SizeHint, SizePolicy, SizePolicyPair};
pub use traits::{AsWidget, PaintContext, Widget};
pub use widgets::{ToolbarTabButton, ValidatingField, ValidationTrigger};
