use glam::Vec2;

/// A piece of accepted draw input, ready to be rendered as ink.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawInput {
    /// Pointer went down at a point.
    Begin(Vec2),
    /// Pointer dragged from the previous point to a new one.
    Extend { from: Vec2, to: Vec2 },
}

/// Pointer-drag accumulator for the active canvas.
///
/// Tracks whether a drag is in progress, where the pointer last was, and
/// whether anything has been drawn on the current stage at all. Scoring is
/// not decided here; the completion timer takes over on `end`.
#[derive(Debug, Clone, Default)]
pub struct DrawSession {
    active: bool,
    has_drawn: bool,
    last: Vec2,
    strokes: usize,
}

impl DrawSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer down: starts a stroke and marks the stage as drawn on.
    pub fn begin(&mut self, at: Vec2) -> DrawInput {
        self.active = true;
        self.has_drawn = true;
        self.last = at;
        self.strokes += 1;
        DrawInput::Begin(at)
    }

    /// Pointer move. Returns None unless a drag is in progress.
    pub fn extend(&mut self, to: Vec2) -> Option<DrawInput> {
        if !self.active {
            return None;
        }
        let from = std::mem::replace(&mut self.last, to);
        Some(DrawInput::Extend { from, to })
    }

    /// Pointer up or leave. Returns true if a drag was in progress.
    pub fn end(&mut self) -> bool {
        std::mem::replace(&mut self.active, false)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn has_drawn(&self) -> bool {
        self.has_drawn
    }

    /// Last pointer position seen.
    pub fn position(&self) -> Vec2 {
        self.last
    }

    /// Strokes begun since the last reset.
    pub fn stroke_count(&self) -> usize {
        self.strokes
    }

    /// Forget everything; called whenever a new stage or character is set up.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
