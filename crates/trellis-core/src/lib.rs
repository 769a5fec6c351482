//! Core systems for the Trellis widget toolkit.
//!
//! This crate provides the non-visual foundations the widget layer builds on:
//!
//! - **Object model** ([`object`]): a global registry of objects with
//!   parent/child relationships, names, and widget state.
//! - **Signals** ([`signal`]): typed signal/slot connections with synchronous,
//!   in-order delivery.
//! - **Properties** ([`property`]): shared mutable value cells with
//!   equality-based change detection.
//! - **Errors** ([`error`]) and **logging** ([`logging`]): hand-rolled error
//!   enums with a [`Result`] alias, and `tracing` targets/macros.
//!
//! Applications must call [`init_global_registry`] before constructing any
//! object.

pub mod error;
pub mod logging;
pub mod object;
pub mod property;
pub mod signal;

pub use error::{Result, TrellisError};
pub use object::{
    Object, ObjectBase, ObjectError, ObjectId, ObjectRegistry, ObjectResult,
    SharedObjectRegistry, WidgetState, global_registry, init_global_registry, object_cast,
    object_cast_mut,
};
pub use property::Property;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
