use serde::{Deserialize, Serialize};

use crate::api::present::PresentContext;
use crate::api::types::{CanvasSize, Mode, Resolution};
use crate::systems::draw::DrawInput;
use crate::systems::effects::Rng;

/// Ink used for the child's own strokes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InkStyle {
    /// CSS color string.
    pub color: String,
    /// Radius of the dot stamped at every input point.
    pub dot_radius: f32,
    /// Width of the segment joining consecutive input points.
    pub stroke_width: f32,
}

impl Default for InkStyle {
    fn default() -> Self {
        Self {
            color: "#FF69B4".to_string(),
            dot_radius: 10.0,
            stroke_width: 20.0,
        }
    }
}

/// Dashed template line for the paths mini-game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuideStyle {
    pub color: String,
    pub width: f32,
    /// Dash pattern: [on, off] in canvas pixels.
    pub dash: [f32; 2],
}

impl Default for GuideStyle {
    fn default() -> Self {
        Self {
            color: "#DDA0DD".to_string(),
            width: 5.0,
            dash: [10.0, 10.0],
        }
    }
}

/// Faint glyph with a dashed outline for the tracing mini-game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlyphStyle {
    pub fill: String,
    pub outline: String,
    pub outline_width: f32,
    pub dash: [f32; 2],
    /// Font size as a fraction of the shorter canvas side.
    pub size_ratio: f32,
    pub font_family: String,
    pub font_weight: u16,
}

impl Default for GlyphStyle {
    fn default() -> Self {
        Self {
            fill: "#EEE".to_string(),
            outline: "#FFB6C1".to_string(),
            outline_width: 3.0,
            dash: [5.0, 5.0],
            size_ratio: 0.7,
            font_family: "'Klee One', serif".to_string(),
            font_weight: 600,
        }
    }
}

/// Configuration for the game, loaded from JSON by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Initial canvas width in logical pixels (default: 400).
    pub canvas_width: f32,
    /// Initial canvas height in logical pixels (default: 400).
    pub canvas_height: f32,
    /// RNG seed. `None` lets the host pick one.
    pub seed: Option<u64>,
    /// Delay between showing a mode's screen and setting up its canvas (default: 100 ms).
    pub setup_delay_ms: f64,
    pub paths_ink: InkStyle,
    pub tracing_ink: InkStyle,
    pub guide: GuideStyle,
    pub glyph: GlyphStyle,
    /// Probability of a sparkle per pointer move (default: 0.3).
    pub particle_chance: f32,
    /// `log` level name for the host logger (default: "info").
    pub log_level: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: 400.0,
            canvas_height: 400.0,
            seed: None,
            setup_delay_ms: 100.0,
            paths_ink: InkStyle::default(),
            tracing_ink: InkStyle {
                dot_radius: 12.0,
                stroke_width: 25.0,
                ..InkStyle::default()
            },
            guide: GuideStyle::default(),
            glyph: GlyphStyle::default(),
            particle_chance: 0.3,
            log_level: "info".to_string(),
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON config. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn canvas(&self) -> CanvasSize {
        CanvasSize::new(self.canvas_width, self.canvas_height)
    }

    pub fn ink(&self, mode: Mode) -> &InkStyle {
        match mode {
            Mode::Paths => &self.paths_ink,
            Mode::Tracing => &self.tracing_ink,
        }
    }
}

/// The contract both mini-games fulfill. The session controller owns the
/// shared state machine (drawing, debounce, checking, celebration) and calls
/// into the active game only for the parts that differ.
pub trait MiniGame {
    fn mode(&self) -> Mode;

    /// Draw the current stage or character onto a freshly cleared canvas.
    fn setup(&mut self, ctx: &mut PresentContext, canvas: CanvasSize, config: &GameConfig);

    /// Render one piece of accepted draw input as ink.
    fn handle_draw_input(&mut self, ctx: &mut PresentContext, input: DrawInput, config: &GameConfig) {
        let ink = config.ink(self.mode());
        match input {
            DrawInput::Begin(at) => ctx.draw_ink_dot(at, ink),
            DrawInput::Extend { from, to } => {
                ctx.draw_ink_dot(to, ink);
                ctx.draw_ink_segment(from, to, ink);
            }
        }
    }

    /// Text spoken between the checking phase and the celebration, if any.
    fn announcement(&self) -> Option<String> {
        None
    }

    /// Record a cleared stage/question and decide what comes next.
    fn on_resolve(&mut self) -> Resolution;

    /// Move to the next stage/question/level after the player acknowledges.
    fn advance(&mut self, rng: &mut Rng);

    /// (done, total) for the current pass.
    fn progress(&self) -> (usize, usize);

    /// Push progress markers and any per-mode labels.
    fn present_status(&self, ctx: &mut PresentContext);
}
