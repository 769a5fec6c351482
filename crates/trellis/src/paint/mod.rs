//! Painting primitives: geometry, colors, and the renderer seam.
//!
//! Widgets paint through the [`Renderer`] trait; this workspace ships no GPU
//! backend, only the [`RecordingRenderer`] used by tests and headless tools.

mod recording;
mod renderer;
mod types;

pub use recording::{DrawCommand, RecordingRenderer};
pub use renderer::Renderer;
pub use types::{Color, CornerRadii, Point, Rect, RoundedRect, Size, Stroke};
