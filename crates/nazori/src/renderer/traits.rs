//! Presentation surfaces the core talks to.
//!
//! The core never reads pixels back and never owns layout. It asks for
//! drawing, sounds and screen changes by logical name, and the host decides
//! how they look. In the browser these are implemented by `nazori-web`'s
//! `WebPresenter`; GPU hosts can use `VectorSurface` for the canvas part.

use glam::Vec2;

use crate::api::game::{GuideStyle, InkStyle};
use crate::api::types::{Cue, LabelId, OverlayId, ProgressSlot, ScreenId};
use crate::systems::effects::{Decoration, DecorationId};
use crate::systems::path::GuidePath;
use crate::systems::progress::ProgressMarker;

/// Everything needed to draw the faint template of a character.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphTemplate {
    pub glyph: String,
    /// Canvas-space center of the glyph.
    pub center: Vec2,
    /// Font size in canvas pixels.
    pub font_size: f32,
    pub font_family: String,
    pub font_weight: u16,
    pub fill: String,
    pub outline: String,
    pub outline_width: f32,
    pub dash: [f32; 2],
}

impl GlyphTemplate {
    /// CSS font shorthand, e.g. `600 280px 'Klee One', serif`.
    pub fn css_font(&self) -> String {
        format!("{} {}px {}", self.font_weight, self.font_size, self.font_family)
    }
}

/// Emoji placed on the guide path's anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointMarker {
    Start,
    End,
}

impl EndpointMarker {
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Start => "🐕",
            Self::End => "🍰",
        }
    }
}

/// The drawing canvas.
pub trait Surface {
    /// Fill the whole canvas with the background color.
    fn clear_canvas(&mut self);

    /// Draw the dashed guide plus start/end markers at its anchors.
    fn draw_guide_path(&mut self, path: &GuidePath, style: &GuideStyle);

    fn draw_ink_dot(&mut self, at: Vec2, ink: &InkStyle);

    fn draw_ink_segment(&mut self, from: Vec2, to: Vec2, ink: &InkStyle);

    fn draw_glyph_template(&mut self, template: &GlyphTemplate);
}

/// Sound cues and speech. Fire-and-forget; an unavailable backend is a no-op.
pub trait AudioOut {
    fn play_cue(&mut self, _cue: Cue) {}

    fn speak(&mut self, _text: &str) {}
}

/// Screen and overlay switching plus text slots.
pub trait Screens {
    fn show_screen(&mut self, screen: ScreenId);

    fn show_overlay(&mut self, overlay: OverlayId);

    fn hide_overlay(&mut self, overlay: OverlayId);

    fn set_label(&mut self, label: LabelId, text: &str);

    fn show_progress(&mut self, slot: ProgressSlot, markers: &[ProgressMarker]);
}

/// Cosmetic particles and confetti. Safe to ignore entirely.
pub trait Decorations {
    fn spawn_decoration(&mut self, _decoration: &Decoration) {}

    fn remove_decoration(&mut self, _id: DecorationId) {}
}

/// A complete host: every surface the core needs.
pub trait Presenter: Surface + AudioOut + Screens + Decorations {}

impl<T: Surface + AudioOut + Screens + Decorations + ?Sized> Presenter for T {}
