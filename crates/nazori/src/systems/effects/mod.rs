//! Cosmetic decorations: draw sparkles, celebration confetti and the
//! twinkling page backdrop.
//!
//! `EffectsState` decides where and what to spawn and how long each piece
//! lives; the host only draws what it is told. Nothing here touches game
//! state.

mod decoration;
mod rng;

use glam::Vec2;

use crate::api::present::PresentContext;
use decoration::LiveDecoration;

pub use decoration::{Decoration, DecorationId, DecorationKind};
pub use rng::Rng;

pub const SPARKLE_GLYPHS: [&str; 4] = ["✨", "⭐", "💖", "🌟"];
pub const SPARKLE_LIFETIME_MS: f64 = 1000.0;

pub const CONFETTI_COUNT: usize = 15;
pub const CONFETTI_COLORS: [&str; 4] = ["#FF69B4", "#87CEEB", "#DDA0DD", "#FFD700"];
pub const CONFETTI_LIFETIME_MS: f64 = 2000.0;

pub const BACKDROP_GLYPHS: [&str; 5] = ["✨", "⭐", "💖", "🎀", "💫"];
pub const BACKDROP_COUNT: usize = 15;
/// Twinkle animation delays are spread over this many seconds.
pub const BACKDROP_MAX_DELAY_S: f32 = 4.0;

/// Live decorations plus the RNG that places them.
pub struct EffectsState {
    live: Vec<LiveDecoration>,
    next_id: u32,
    pub rng: Rng,
}

impl EffectsState {
    /// Create a new EffectsState with the given RNG seed.
    pub fn new(seed: u64) -> Self {
        Self {
            live: Vec::new(),
            next_id: 1,
            rng: Rng::new(seed.wrapping_add(7919)),
        }
    }

    fn spawn(&mut self, at: Vec2, kind: DecorationKind, lifetime_ms: Option<f64>, ctx: &mut PresentContext) -> DecorationId {
        let id = DecorationId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        if let Some(remaining_ms) = lifetime_ms {
            self.live.push(LiveDecoration { id, remaining_ms });
        }
        ctx.spawn_decoration(Decoration {
            id,
            at,
            kind,
            lifetime_ms,
        });
        id
    }

    /// One sparkle at a canvas point, drifting up and sideways.
    pub fn sparkle(&mut self, at: Vec2, ctx: &mut PresentContext) -> DecorationId {
        let glyph = self.rng.pick(&SPARKLE_GLYPHS).copied().unwrap_or("✨");
        let drift = Vec2::new(self.rng.range(-50.0, 50.0), self.rng.range(-100.0, 0.0));
        self.spawn(
            at,
            DecorationKind::Sparkle { glyph, drift },
            Some(SPARKLE_LIFETIME_MS),
            ctx,
        )
    }

    /// A sparkle with probability `chance`.
    pub fn maybe_sparkle(&mut self, at: Vec2, chance: f32, ctx: &mut PresentContext) -> Option<DecorationId> {
        if self.rng.chance(chance) {
            Some(self.sparkle(at, ctx))
        } else {
            None
        }
    }

    /// A burst of confetti across the top of the viewport.
    pub fn confetti(&mut self, ctx: &mut PresentContext) {
        for _ in 0..CONFETTI_COUNT {
            let color = self.rng.pick(&CONFETTI_COLORS).copied().unwrap_or("#FF69B4");
            let left_pct = self.rng.range(0.0, 100.0);
            self.spawn(
                Vec2::ZERO,
                DecorationKind::Confetti { color, left_pct },
                Some(CONFETTI_LIFETIME_MS),
                ctx,
            );
        }
    }

    /// Permanent background sparkles, scattered once when the host starts.
    pub fn scatter_backdrop(&mut self, count: usize, ctx: &mut PresentContext) {
        for _ in 0..count {
            let glyph = self.rng.pick(&BACKDROP_GLYPHS).copied().unwrap_or("✨");
            let kind = DecorationKind::Backdrop {
                glyph,
                left_pct: self.rng.range(0.0, 100.0),
                top_pct: self.rng.range(0.0, 100.0),
                delay_s: self.rng.range(0.0, BACKDROP_MAX_DELAY_S),
            };
            self.spawn(Vec2::ZERO, kind, None, ctx);
        }
    }

    /// Expire decorations whose lifetime ran out.
    pub fn tick(&mut self, dt_ms: f64, ctx: &mut PresentContext) {
        self.live.retain_mut(|d| {
            let alive = d.tick(dt_ms);
            if !alive {
                ctx.remove_decoration(d.id);
            }
            alive
        });
    }

    /// Decorations that will still be removed by `tick`.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Forget all timed decorations without emitting removals.
    pub fn clear(&mut self) {
        self.live.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::present::Command;

    fn spawned(ctx: &PresentContext) -> Vec<&Decoration> {
        ctx.commands()
            .iter()
            .filter_map(|c| match c {
                Command::SpawnDecoration(d) => Some(d),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn sparkle_drift_in_range() {
        let mut effects = EffectsState::new(42);
        let mut ctx = PresentContext::new();
        for _ in 0..100 {
            effects.sparkle(Vec2::new(10.0, 10.0), &mut ctx);
        }
        for d in spawned(&ctx) {
            match &d.kind {
                DecorationKind::Sparkle { glyph, drift } => {
                    assert!(SPARKLE_GLYPHS.contains(glyph));
                    assert!((-50.0..=50.0).contains(&drift.x));
                    assert!((-100.0..=0.0).contains(&drift.y));
                }
                other => panic!("unexpected {other:?}"),
            }
            assert_eq!(d.lifetime_ms, Some(SPARKLE_LIFETIME_MS));
        }
    }

    #[test]
    fn maybe_sparkle_respects_extremes() {
        let mut effects = EffectsState::new(1);
        let mut ctx = PresentContext::new();
        for _ in 0..20 {
            assert!(effects.maybe_sparkle(Vec2::ZERO, 0.0, &mut ctx).is_none());
            assert!(effects.maybe_sparkle(Vec2::ZERO, 1.0, &mut ctx).is_some());
        }
        assert_eq!(ctx.len(), 20);
    }

    #[test]
    fn confetti_burst() {
        let mut effects = EffectsState::new(3);
        let mut ctx = PresentContext::new();
        effects.confetti(&mut ctx);
        let pieces = spawned(&ctx);
        assert_eq!(pieces.len(), CONFETTI_COUNT);
        for d in pieces {
            match &d.kind {
                DecorationKind::Confetti { color, left_pct } => {
                    assert!(CONFETTI_COLORS.contains(color));
                    assert!((0.0..=100.0).contains(left_pct));
                }
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn tick_removes_expired_only() {
        let mut effects = EffectsState::new(9);
        let mut ctx = PresentContext::new();
        let sparkle = effects.sparkle(Vec2::ZERO, &mut ctx);
        effects.confetti(&mut ctx);
        ctx.drain();

        effects.tick(1000.0, &mut ctx);
        assert_eq!(ctx.drain(), vec![Command::RemoveDecoration(sparkle)]);
        assert_eq!(effects.live_count(), CONFETTI_COUNT);

        effects.tick(1000.0, &mut ctx);
        assert_eq!(ctx.len(), CONFETTI_COUNT);
        assert_eq!(effects.live_count(), 0);
    }

    #[test]
    fn backdrop_is_permanent() {
        let mut effects = EffectsState::new(5);
        let mut ctx = PresentContext::new();
        effects.scatter_backdrop(BACKDROP_COUNT, &mut ctx);
        assert_eq!(spawned(&ctx).len(), BACKDROP_COUNT);
        assert!(spawned(&ctx).iter().all(|d| d.lifetime_ms.is_none()));
        ctx.drain();
        effects.tick(1_000_000.0, &mut ctx);
        assert!(ctx.is_empty());
    }

    #[test]
    fn backdrop_delays_span_four_seconds() {
        let mut delays = Vec::new();
        for seed in 1..40 {
            let mut effects = EffectsState::new(seed);
            let mut ctx = PresentContext::new();
            effects.scatter_backdrop(BACKDROP_COUNT, &mut ctx);
            for d in spawned(&ctx) {
                if let DecorationKind::Backdrop { delay_s, .. } = d.kind {
                    delays.push(delay_s);
                }
            }
        }
        assert_eq!(delays.len(), 39 * BACKDROP_COUNT);
        assert!(delays.iter().all(|d| (0.0..BACKDROP_MAX_DELAY_S).contains(d)));
        assert!(delays.iter().any(|d| *d > 3.0));
    }

    #[test]
    fn ids_are_unique() {
        let mut effects = EffectsState::new(5);
        let mut ctx = PresentContext::new();
        let a = effects.sparkle(Vec2::ZERO, &mut ctx);
        let b = effects.sparkle(Vec2::ZERO, &mut ctx);
        assert_ne!(a, b);
    }
}
