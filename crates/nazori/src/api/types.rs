use serde::{Deserialize, Serialize};

/// Which mini-game a session is running. "No mode" is `Option::<Mode>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Connect-the-path tracer.
    Paths,
    /// Hiragana character tracer.
    Tracing,
}

impl Mode {
    /// Parse the names the host uses ("paths"/"lines", "tracing"/"hiragana").
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "paths" | "lines" => Some(Self::Paths),
            "tracing" | "hiragana" => Some(Self::Tracing),
            _ => None,
        }
    }

    pub fn screen(self) -> ScreenId {
        match self {
            Self::Paths => ScreenId::Paths,
            Self::Tracing => ScreenId::Tracing,
        }
    }
}

/// A short synthesized sound cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Pop,
    Start,
    Fanfare,
}

/// Full-page screens the host can show. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenId {
    MainMenu,
    Paths,
    Tracing,
}

/// Overlays drawn above the active screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayId {
    Checking,
    Celebration,
    AllClear,
}

impl OverlayId {
    pub const ALL: [OverlayId; 3] = [Self::Checking, Self::Celebration, Self::AllClear];
}

/// Text slots the core writes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelId {
    CurrentGlyph,
    LevelTitle,
    CelebrationTitle,
    CelebrationSubtitle,
    NextButton,
}

/// Where a progress row is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgressSlot {
    Paths,
    Tracing,
}

/// Canvas size in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f32,
    pub height: f32,
}

impl CanvasSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Zero or negative sizes are a host precondition violation.
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// What a resolve event led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A paths stage was cleared and more remain.
    StageCleared,
    /// A tracing question was cleared and more remain in the level.
    CharacterCleared { glyph: String },
    /// The last question of a non-final level was cleared.
    LevelCleared { level: u8 },
    /// Terminal: everything in the mode is done.
    AllClear,
}

/// Celebration overlay text plus the spoken praise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CelebrationCopy {
    pub title: String,
    pub subtitle: String,
    pub button: String,
    pub speech: String,
}

pub const CHECKING_SPEECH: &str = "さいてんちゅう";
pub const PRAISE_SPEECH: &str = "すごーい！";
pub const ALL_CLEAR_SPEECH: &str = "ぜんぶクリア！すごーい！";
const PRAISE_TITLE: &str = "すごーい！✨";
const NEXT_BUTTON: &str = "つぎへ ▶";

impl Resolution {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::AllClear)
    }

    /// Overlay copy for non-terminal resolutions.
    pub fn celebration(&self) -> Option<CelebrationCopy> {
        match self {
            Self::StageCleared => Some(CelebrationCopy {
                title: PRAISE_TITLE.to_string(),
                subtitle: "つぎの せんに いこう！".to_string(),
                button: NEXT_BUTTON.to_string(),
                speech: PRAISE_SPEECH.to_string(),
            }),
            Self::CharacterCleared { glyph } => Some(CelebrationCopy {
                title: PRAISE_TITLE.to_string(),
                subtitle: format!("「{glyph}」ができたね！"),
                button: NEXT_BUTTON.to_string(),
                speech: PRAISE_SPEECH.to_string(),
            }),
            Self::LevelCleared { level } => Some(CelebrationCopy {
                title: format!("レベル{level} クリア！🎉"),
                subtitle: "つぎの レベルに いこう！".to_string(),
                button: format!("レベル{}へ ▶", level + 1),
                speech: format!("レベル{level}クリア！"),
            }),
            Self::AllClear => None,
        }
    }
}

/// Title shown above the tracing canvas for a 1-based level.
pub fn level_title(level: u8) -> String {
    let digit = match level {
        1 => "１".to_string(),
        2 => "２".to_string(),
        3 => "３".to_string(),
        n => n.to_string(),
    };
    format!("レベル{digit} {}", "🌟".repeat(level as usize))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_names() {
        assert_eq!(Mode::from_name("lines"), Some(Mode::Paths));
        assert_eq!(Mode::from_name("hiragana"), Some(Mode::Tracing));
        assert_eq!(Mode::from_name("chess"), None);
    }

    #[test]
    fn level_titles_match_the_page() {
        assert_eq!(level_title(1), "レベル１ 🌟");
        assert_eq!(level_title(2), "レベル２ 🌟🌟");
        assert_eq!(level_title(3), "レベル３ 🌟🌟🌟");
    }

    #[test]
    fn level_cleared_copy_points_at_next_level() {
        let copy = Resolution::LevelCleared { level: 2 }.celebration().unwrap();
        assert_eq!(copy.title, "レベル2 クリア！🎉");
        assert_eq!(copy.button, "レベル3へ ▶");
        assert_eq!(copy.speech, "レベル2クリア！");
    }

    #[test]
    fn character_copy_names_the_glyph() {
        let copy = Resolution::CharacterCleared { glyph: "し".into() }
            .celebration()
            .unwrap();
        assert_eq!(copy.subtitle, "「し」ができたね！");
    }

    #[test]
    fn all_clear_has_no_celebration_overlay() {
        assert!(Resolution::AllClear.celebration().is_none());
        assert!(Resolution::AllClear.is_terminal());
    }

    #[test]
    fn degenerate_canvas() {
        assert!(CanvasSize::new(0.0, 300.0).is_degenerate());
        assert!(!CanvasSize::new(400.0, 300.0).is_degenerate());
    }
}
