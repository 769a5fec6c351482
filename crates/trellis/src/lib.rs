//! Trellis: a small Qt-inspired widget toolkit.
//!
//! This crate provides the widget layer on top of `trellis-core`:
//!
//! - [`widget`]: the `Widget` trait, `WidgetBase`, events, size hints, value
//!   binding, and the shipped widgets ([`ToolbarTabButton`],
//!   [`ValidatingField`]).
//! - [`paint`]: geometry and color types, the `Renderer` trait, and a
//!   recording renderer for tests.
//!
//! # Quick start
//!
//! ```
//! use std::sync::Arc;
//! use trellis::widget::{FieldCodec, ValueBinding, ValidatingField};
//! use trellis_core::{Property, init_global_registry};
//!
//! init_global_registry();
//!
//! let port = Arc::new(Property::new(8080i64));
//! let mut field = ValidatingField::new(
//!     ValueBinding::from_property(Arc::clone(&port)),
//!     FieldCodec::from_display_str(),
//! );
//!
//! field.set_text("9090");
//! assert_eq!(port.get(), 9090);
//!
//! field.set_text("not a port");
//! assert_eq!(port.get(), 9090); // invalid text never propagates
//! ```

pub mod paint;
pub mod widget;

pub use paint::{Color, Point, Rect, Renderer, Size};
pub use widget::{
    AsWidget, FieldCodec, PaintContext, SizeHint, ToolbarTabButton, ValidatingField,
    ValidationTrigger, ValueBinding, Widget, WidgetBase, WidgetEvent,
};
