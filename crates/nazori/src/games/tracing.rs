use glam::Vec2;

use crate::api::game::{GameConfig, MiniGame};
use crate::api::present::PresentContext;
use crate::api::types::{level_title, CanvasSize, LabelId, Mode, ProgressSlot, Resolution};
use crate::assets::hiragana::{CharacterPools, QuestionSet};
use crate::renderer::traits::GlyphTemplate;
use crate::systems::effects::Rng;
use crate::systems::progress::ProgressTracker;

/// Hiragana tracer: a shuffled set of characters per level, levels in order.
///
/// The current question is always the one after the last cleared, so the
/// question index equals the tracker's completed count.
pub struct TracingGame {
    pools: CharacterPools,
    level: u8,
    questions: QuestionSet,
    progress: ProgressTracker,
}

fn sample_level(pools: &CharacterPools, level: u8, rng: &mut Rng) -> QuestionSet {
    match pools.pool(level) {
        Some(pool) => QuestionSet::sample(pool, rng),
        None => {
            log::warn!("no character pool for level {level}");
            QuestionSet::default()
        }
    }
}

impl TracingGame {
    /// Start at level 1 with a freshly shuffled question set.
    pub fn new(pools: CharacterPools, rng: &mut Rng) -> Self {
        let questions = sample_level(&pools, 1, rng);
        log::debug!("level 1 questions: {:?}", questions.glyphs());
        let progress = ProgressTracker::new(questions.len());
        Self {
            pools,
            level: 1,
            questions,
            progress,
        }
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn questions(&self) -> &QuestionSet {
        &self.questions
    }

    pub fn question_index(&self) -> usize {
        self.progress.current().0
    }

    /// The character being traced, if the set still has one.
    pub fn current_glyph(&self) -> Option<&str> {
        self.questions.get(self.question_index())
    }
}

impl MiniGame for TracingGame {
    fn mode(&self) -> Mode {
        Mode::Tracing
    }

    fn setup(&mut self, ctx: &mut PresentContext, canvas: CanvasSize, config: &GameConfig) {
        let Some(glyph) = self.current_glyph() else {
            log::warn!("level {} has no question {}", self.level, self.question_index());
            return;
        };
        let style = &config.glyph;
        ctx.set_label(LabelId::CurrentGlyph, glyph);
        ctx.draw_glyph_template(GlyphTemplate {
            glyph: glyph.to_string(),
            center: Vec2::new(canvas.width / 2.0, canvas.height / 2.0),
            font_size: canvas.width.min(canvas.height) * style.size_ratio,
            font_family: style.font_family.clone(),
            font_weight: style.font_weight,
            fill: style.fill.clone(),
            outline: style.outline.clone(),
            outline_width: style.outline_width,
            dash: style.dash,
        });
    }

    fn announcement(&self) -> Option<String> {
        self.current_glyph().map(str::to_string)
    }

    fn on_resolve(&mut self) -> Resolution {
        let glyph = self.current_glyph().unwrap_or_default().to_string();
        self.progress.increment();
        if !self.progress.is_complete() {
            return Resolution::CharacterCleared { glyph };
        }
        if self.level >= self.pools.level_count() {
            Resolution::AllClear
        } else {
            Resolution::LevelCleared { level: self.level }
        }
    }

    fn advance(&mut self, rng: &mut Rng) {
        if !self.progress.is_complete() || self.level >= self.pools.level_count() {
            return;
        }
        self.level += 1;
        self.questions = sample_level(&self.pools, self.level, rng);
        log::info!("level {} questions: {:?}", self.level, self.questions.glyphs());
        self.progress.reset(self.questions.len());
    }

    fn progress(&self) -> (usize, usize) {
        self.progress.current()
    }

    fn present_status(&self, ctx: &mut PresentContext) {
        ctx.show_progress(ProgressSlot::Tracing, self.progress.markers());
        ctx.set_label(LabelId::LevelTitle, level_title(self.level));
    }
}
