//! The renderer abstraction widgets paint through.
//!
//! Widgets never draw to a concrete backend directly; they receive a
//! `&mut dyn Renderer` inside their paint context. A backend implements this
//! trait; tests use the [`RecordingRenderer`](super::RecordingRenderer).

use super::types::{Color, Point, Rect, RoundedRect, Stroke};

/// 2D drawing operations available to widget paint code.
pub trait Renderer {
    /// Fill a rectangle with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Stroke a rectangle outline.
    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke);

    /// Fill a rounded rectangle with a solid color.
    fn fill_rounded_rect(&mut self, rect: RoundedRect, color: Color);

    /// Stroke a rounded rectangle outline.
    fn stroke_rounded_rect(&mut self, rect: RoundedRect, stroke: Stroke);

    /// Draw a line segment.
    fn draw_line(&mut self, from: Point, to: Point, stroke: Stroke);

    /// Draw connected line segments through the given points.
    fn draw_polyline(&mut self, points: &[Point], stroke: Stroke);

    /// Draw a run of text with its baseline-left corner at `origin`.
    fn fill_text(&mut self, text: &str, origin: Point, size: f32, color: Color);

    /// Push a copy of the current render state (clip) onto the stack.
    fn save(&mut self);

    /// Pop the render state stack.
    fn restore(&mut self);

    /// Intersect the current clip with a rectangle.
    fn clip_rect(&mut self, rect: Rect);
}
