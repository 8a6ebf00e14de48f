use glam::Vec2;

/// Identifies a live decoration so the host can remove it later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecorationId(pub u32);

/// What a decoration looks like.
#[derive(Debug, Clone, PartialEq)]
pub enum DecorationKind {
    /// Emoji that drifts by `drift` pixels while fading out.
    Sparkle { glyph: &'static str, drift: Vec2 },
    /// Colored piece falling from the top edge; `left_pct` is its horizontal
    /// start as a percentage of the viewport width.
    Confetti { color: &'static str, left_pct: f32 },
    /// Permanent twinkling emoji in the page background.
    Backdrop {
        glyph: &'static str,
        left_pct: f32,
        top_pct: f32,
        delay_s: f32,
    },
}

/// A cosmetic element placed by the core and drawn by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoration {
    pub id: DecorationId,
    /// Canvas-space position (sparkles only; zero otherwise).
    pub at: Vec2,
    pub kind: DecorationKind,
    /// How long the host keeps it around. `None` is permanent.
    pub lifetime_ms: Option<f64>,
}

/// Decoration with remaining lifetime, tracked until removal.
#[derive(Debug, Clone)]
pub(crate) struct LiveDecoration {
    pub id: DecorationId,
    pub remaining_ms: f64,
}

impl LiveDecoration {
    /// Advance by `dt_ms`. Returns false when expired.
    pub fn tick(&mut self, dt_ms: f64) -> bool {
        self.remaining_ms -= dt_ms;
        self.remaining_ms > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn live_decoration_expires() {
        let mut d = LiveDecoration {
            id: DecorationId(1),
            remaining_ms: 1000.0,
        };
        assert!(d.tick(600.0));
        assert!(!d.tick(400.0));
    }
}
