use glam::Vec2;

use crate::api::game::{GuideStyle, InkStyle};
use crate::api::types::{Cue, LabelId, OverlayId, ProgressSlot, ScreenId};
use crate::renderer::traits::{GlyphTemplate, Presenter};
use crate::systems::effects::{Decoration, DecorationId};
use crate::systems::path::GuidePath;
use crate::systems::progress::ProgressMarker;

/// One recorded call on a presentation surface.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    ClearCanvas,
    DrawGuidePath { path: GuidePath, style: GuideStyle },
    DrawInkDot { at: Vec2, ink: InkStyle },
    DrawInkSegment { from: Vec2, to: Vec2, ink: InkStyle },
    DrawGlyphTemplate(GlyphTemplate),
    PlayCue(Cue),
    Speak(String),
    ShowScreen(ScreenId),
    ShowOverlay(OverlayId),
    HideOverlay(OverlayId),
    SetLabel { label: LabelId, text: String },
    ShowProgress { slot: ProgressSlot, markers: Vec<ProgressMarker> },
    SpawnDecoration(Decoration),
    RemoveDecoration(DecorationId),
}

impl Command {
    /// Replay this command on a host.
    pub fn dispatch<P: Presenter + ?Sized>(&self, presenter: &mut P) {
        match self {
            Self::ClearCanvas => presenter.clear_canvas(),
            Self::DrawGuidePath { path, style } => presenter.draw_guide_path(path, style),
            Self::DrawInkDot { at, ink } => presenter.draw_ink_dot(*at, ink),
            Self::DrawInkSegment { from, to, ink } => presenter.draw_ink_segment(*from, *to, ink),
            Self::DrawGlyphTemplate(template) => presenter.draw_glyph_template(template),
            Self::PlayCue(cue) => presenter.play_cue(*cue),
            Self::Speak(text) => presenter.speak(text),
            Self::ShowScreen(screen) => presenter.show_screen(*screen),
            Self::ShowOverlay(overlay) => presenter.show_overlay(*overlay),
            Self::HideOverlay(overlay) => presenter.hide_overlay(*overlay),
            Self::SetLabel { label, text } => presenter.set_label(*label, text),
            Self::ShowProgress { slot, markers } => presenter.show_progress(*slot, markers),
            Self::SpawnDecoration(decoration) => presenter.spawn_decoration(decoration),
            Self::RemoveDecoration(id) => presenter.remove_decoration(*id),
        }
    }
}

/// Presentation requests collected during one controller call.
/// The host drains them with `flush` once the call returns.
#[derive(Debug, Default)]
pub struct PresentContext {
    commands: Vec<Command>,
}

impl PresentContext {
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(64),
        }
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    // -- Renderer surface --

    pub fn clear_canvas(&mut self) {
        self.push(Command::ClearCanvas);
    }

    pub fn draw_guide_path(&mut self, path: GuidePath, style: &GuideStyle) {
        self.push(Command::DrawGuidePath {
            path,
            style: style.clone(),
        });
    }

    pub fn draw_ink_dot(&mut self, at: Vec2, ink: &InkStyle) {
        self.push(Command::DrawInkDot { at, ink: ink.clone() });
    }

    pub fn draw_ink_segment(&mut self, from: Vec2, to: Vec2, ink: &InkStyle) {
        self.push(Command::DrawInkSegment {
            from,
            to,
            ink: ink.clone(),
        });
    }

    pub fn draw_glyph_template(&mut self, template: GlyphTemplate) {
        self.push(Command::DrawGlyphTemplate(template));
    }

    // -- Audio / speech surface --

    pub fn play_cue(&mut self, cue: Cue) {
        self.push(Command::PlayCue(cue));
    }

    pub fn speak(&mut self, text: impl Into<String>) {
        self.push(Command::Speak(text.into()));
    }

    // -- Screen-transition surface --

    pub fn show_screen(&mut self, screen: ScreenId) {
        self.push(Command::ShowScreen(screen));
    }

    pub fn show_overlay(&mut self, overlay: OverlayId) {
        self.push(Command::ShowOverlay(overlay));
    }

    pub fn hide_overlay(&mut self, overlay: OverlayId) {
        self.push(Command::HideOverlay(overlay));
    }

    pub fn set_label(&mut self, label: LabelId, text: impl Into<String>) {
        self.push(Command::SetLabel {
            label,
            text: text.into(),
        });
    }

    pub fn show_progress(&mut self, slot: ProgressSlot, markers: Vec<ProgressMarker>) {
        self.push(Command::ShowProgress { slot, markers });
    }

    // -- Decorations --

    pub fn spawn_decoration(&mut self, decoration: Decoration) {
        self.push(Command::SpawnDecoration(decoration));
    }

    pub fn remove_decoration(&mut self, id: DecorationId) {
        self.push(Command::RemoveDecoration(id));
    }

    // -- Access --

    /// Commands recorded since the last drain.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Take all pending commands, leaving the buffer empty.
    pub fn drain(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    /// Replay and clear all pending commands on a host.
    pub fn flush<P: Presenter + ?Sized>(&mut self, presenter: &mut P) {
        for command in self.commands.drain(..) {
            command.dispatch(presenter);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }
}
