//! Element ids and class names of the host page.

use glam::Vec2;
use nazori::{DecorationKind, LabelId, OverlayId, ProgressSlot, ScreenId};

pub const MAIN_MENU: &str = "main-menu";
pub const LINES_SCREEN: &str = "lines-screen";
pub const HIRAGANA_SCREEN: &str = "hiragana-screen";
pub const LINES_CANVAS: &str = "lines-canvas";
pub const HIRAGANA_CANVAS: &str = "hiragana-canvas";
pub const CHECKING: &str = "checking";
pub const CELEBRATION: &str = "celebration";
pub const ALL_CLEAR: &str = "all-clear";
pub const CELEBRATION_TITLE: &str = "celebration-title";
pub const CELEBRATION_SUB: &str = "celebration-sub";
pub const NEXT_BUTTON: &str = "next-btn";
pub const LINES_PROGRESS: &str = "lines-progress";
pub const HIRAGANA_PROGRESS: &str = "hiragana-progress";
pub const CURRENT_HIRAGANA: &str = "current-hiragana";
pub const HIRAGANA_LEVEL_TITLE: &str = "hiragana-level-title";
pub const SPARKLES: &str = "sparkles";

/// Class carried by the visible screen.
pub const ACTIVE_CLASS: &str = "active";
/// Class carried by overlays that are not showing.
pub const HIDDEN_CLASS: &str = "hidden";

pub const PARTICLE_CLASS: &str = "particle";
pub const CONFETTI_CLASS: &str = "confetti";
pub const BACKDROP_CLASS: &str = "sparkle";

const CONFETTI_SIZE: &str = "10px";
const CONFETTI_TOP: &str = "-20px";

pub const ALL_SCREENS: [ScreenId; 3] = [ScreenId::MainMenu, ScreenId::Paths, ScreenId::Tracing];

pub fn screen_id(screen: ScreenId) -> &'static str {
    match screen {
        ScreenId::MainMenu => MAIN_MENU,
        ScreenId::Paths => LINES_SCREEN,
        ScreenId::Tracing => HIRAGANA_SCREEN,
    }
}

/// Canvas inside a screen, if it has one.
pub fn canvas_id(screen: ScreenId) -> Option<&'static str> {
    match screen {
        ScreenId::MainMenu => None,
        ScreenId::Paths => Some(LINES_CANVAS),
        ScreenId::Tracing => Some(HIRAGANA_CANVAS),
    }
}

pub fn overlay_id(overlay: OverlayId) -> &'static str {
    match overlay {
        OverlayId::Checking => CHECKING,
        OverlayId::Celebration => CELEBRATION,
        OverlayId::AllClear => ALL_CLEAR,
    }
}

pub fn label_id(label: LabelId) -> &'static str {
    match label {
        LabelId::CurrentGlyph => CURRENT_HIRAGANA,
        LabelId::LevelTitle => HIRAGANA_LEVEL_TITLE,
        LabelId::CelebrationTitle => CELEBRATION_TITLE,
        LabelId::CelebrationSubtitle => CELEBRATION_SUB,
        LabelId::NextButton => NEXT_BUTTON,
    }
}

pub fn progress_id(slot: ProgressSlot) -> &'static str {
    match slot {
        ProgressSlot::Paths => LINES_PROGRESS,
        ProgressSlot::Tracing => HIRAGANA_PROGRESS,
    }
}

/// Where a decoration element is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecorationParent {
    Body,
    /// The `#sparkles` backdrop container.
    Backdrop,
}

/// Class, text, inline style and parent of a decoration element.
/// `client` is the sparkle's position in client pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct DecorationMarkup {
    pub class: &'static str,
    pub text: Option<&'static str>,
    pub style: Vec<(&'static str, String)>,
    pub parent: DecorationParent,
}

pub fn decoration_markup(kind: &DecorationKind, client: Vec2) -> DecorationMarkup {
    match kind {
        DecorationKind::Sparkle { glyph, drift } => DecorationMarkup {
            class: PARTICLE_CLASS,
            text: Some(*glyph),
            style: vec![
                ("left", format!("{}px", client.x)),
                ("top", format!("{}px", client.y)),
                ("--tx", format!("{}px", drift.x)),
                ("--ty", format!("{}px", drift.y)),
            ],
            parent: DecorationParent::Body,
        },
        DecorationKind::Confetti { color, left_pct } => DecorationMarkup {
            class: CONFETTI_CLASS,
            text: None,
            style: vec![
                ("left", format!("{left_pct}vw")),
                ("top", CONFETTI_TOP.to_string()),
                ("background", color.to_string()),
                ("border-radius", "50%".to_string()),
                ("width", CONFETTI_SIZE.to_string()),
                ("height", CONFETTI_SIZE.to_string()),
            ],
            parent: DecorationParent::Body,
        },
        DecorationKind::Backdrop {
            glyph,
            left_pct,
            top_pct,
            delay_s,
        } => DecorationMarkup {
            class: BACKDROP_CLASS,
            text: Some(*glyph),
            style: vec![
                ("left", format!("{left_pct}%")),
                ("top", format!("{top_pct}%")),
                ("animation-delay", format!("{delay_s}s")),
            ],
            parent: DecorationParent::Backdrop,
        },
    }
}
