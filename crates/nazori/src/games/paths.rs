use crate::api::game::{GameConfig, MiniGame};
use crate::api::present::PresentContext;
use crate::api::types::{CanvasSize, Mode, ProgressSlot, Resolution};
use crate::assets::stages::{Stage, StageCatalog};
use crate::systems::effects::Rng;
use crate::systems::path::PathRenderer;
use crate::systems::progress::ProgressTracker;

/// Connect-the-path: walk the stage catalog in order, one guide per stage.
pub struct PathsGame {
    catalog: StageCatalog,
    stage_index: usize,
    progress: ProgressTracker,
}

impl PathsGame {
    pub fn new(catalog: StageCatalog) -> Self {
        let total = catalog.len();
        Self {
            catalog,
            stage_index: 0,
            progress: ProgressTracker::new(total),
        }
    }

    pub fn stage_index(&self) -> usize {
        self.stage_index
    }

    pub fn current_stage(&self) -> Option<&Stage> {
        self.catalog.get(self.stage_index)
    }
}

impl MiniGame for PathsGame {
    fn mode(&self) -> Mode {
        Mode::Paths
    }

    fn setup(&mut self, ctx: &mut PresentContext, canvas: CanvasSize, config: &GameConfig) {
        let Some(stage) = self.current_stage() else {
            log::warn!("no stage at index {}", self.stage_index);
            return;
        };
        log::debug!("paths stage {} ({})", self.stage_index + 1, stage.kind_name());
        let path = PathRenderer::render(stage, canvas);
        ctx.draw_guide_path(path, &config.guide);
    }

    fn on_resolve(&mut self) -> Resolution {
        self.progress.increment();
        if self.progress.is_complete() {
            Resolution::AllClear
        } else {
            Resolution::StageCleared
        }
    }

    fn advance(&mut self, _rng: &mut Rng) {
        if self.stage_index + 1 < self.catalog.len() {
            self.stage_index += 1;
        }
    }

    fn progress(&self) -> (usize, usize) {
        self.progress.current()
    }

    fn present_status(&self, ctx: &mut PresentContext) {
        ctx.show_progress(ProgressSlot::Paths, self.progress.markers());
    }
}
