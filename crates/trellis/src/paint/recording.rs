//! A renderer that records draw commands instead of rasterizing.
//!
//! Used by widget tests to assert on what a paint pass produced. Clip state
//! is tracked so `save`/`restore` balance can be verified.

use super::renderer::Renderer;
use super::types::{Color, Point, Rect, RoundedRect, Stroke};

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect { rect: Rect, color: Color },
    StrokeRect { rect: Rect, stroke: Stroke },
    FillRoundedRect { rect: RoundedRect, color: Color },
    StrokeRoundedRect { rect: RoundedRect, stroke: Stroke },
    Line { from: Point, to: Point, stroke: Stroke },
    Polyline { points: Vec<Point>, stroke: Stroke },
    Text { text: String, origin: Point, size: f32, color: Color },
}

/// A [`Renderer`] that captures commands into a list.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    commands: Vec<DrawCommand>,
    clip_stack: Vec<Option<Rect>>,
    clip: Option<Rect>,
}

impl RecordingRenderer {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// The commands recorded so far, in draw order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Discard all recorded commands and clip state.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.clip_stack.clear();
        self.clip = None;
    }

    /// The current clip rectangle, if any clip has been applied.
    pub fn current_clip(&self) -> Option<Rect> {
        self.clip
    }

    /// Depth of unmatched `save` calls.
    pub fn save_depth(&self) -> usize {
        self.clip_stack.len()
    }

    /// Count recorded commands matching a predicate.
    pub fn count_matching(&self, predicate: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| predicate(c)).count()
    }

    /// Whether any recorded fill (rect or rounded rect) uses this color.
    pub fn filled_with(&self, color: Color) -> bool {
        self.commands.iter().any(|c| match c {
            DrawCommand::FillRect { color: c, .. } => *c == color,
            DrawCommand::FillRoundedRect { color: c, .. } => *c == color,
            _ => false,
        })
    }

    /// Find the first recorded text command containing `needle`.
    pub fn find_text(&self, needle: &str) -> Option<&DrawCommand> {
        self.commands.iter().find(|c| match c {
            DrawCommand::Text { text, .. } => text.contains(needle),
            _ => false,
        })
    }
}

impl Renderer for RecordingRenderer {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke) {
        self.commands.push(DrawCommand::StrokeRect { rect, stroke });
    }

    fn fill_rounded_rect(&mut self, rect: RoundedRect, color: Color) {
        self.commands.push(DrawCommand::FillRoundedRect { rect, color });
    }

    fn stroke_rounded_rect(&mut self, rect: RoundedRect, stroke: Stroke) {
        self.commands.push(DrawCommand::StrokeRoundedRect { rect, stroke });
    }

    fn draw_line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.commands.push(DrawCommand::Line { from, to, stroke });
    }

    fn draw_polyline(&mut self, points: &[Point], stroke: Stroke) {
        self.commands.push(DrawCommand::Polyline {
            points: points.to_vec(),
            stroke,
        });
    }

    fn fill_text(&mut self, text: &str, origin: Point, size: f32, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            origin,
            size,
            color,
        });
    }

    fn save(&mut self) {
        self.clip_stack.push(self.clip);
    }

    fn restore(&mut self) {
        if let Some(clip) = self.clip_stack.pop() {
            self.clip = clip;
        }
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.clip = match self.clip {
            Some(existing) => existing.intersect(&rect),
            None => Some(rect),
        };
    }
}
