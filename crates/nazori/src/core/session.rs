//! The session controller: one state machine shared by both mini-games.
//!
//! ```text
//! start_mode ─▶ Preparing ─setup─▶ Drawing ─idle─▶ Checking ─▶ [Announcing] ─▶ Celebrating ─next─▶ Drawing
//!                                                                            └─▶ AllClear (locked until go_home)
//! ```
//!
//! All timing runs on a virtual clock advanced by `tick`. Every timer is
//! tagged with the epoch of the session that scheduled it; tearing a session
//! down cancels its timers, and any timer that still reaches `fire` with a
//! foreign epoch is dropped.

use glam::Vec2;

use crate::api::game::GameConfig;
use crate::api::present::{Command, PresentContext};
use crate::api::types::{
    CanvasSize, Cue, LabelId, Mode, OverlayId, Resolution, ScreenId, ALL_CLEAR_SPEECH,
    CHECKING_SPEECH,
};
use crate::assets::hiragana::{CharacterPools, QuestionSet};
use crate::assets::stages::StageCatalog;
use crate::core::timer::{TimerHandle, TimerQueue};
use crate::games::{ActiveGame, PathsGame, TracingGame};
use crate::input::InputEvent;
use crate::renderer::traits::Presenter;
use crate::systems::completion::{
    CompletionPhase, CompletionTimer, ANNOUNCE_DELAY_MS, CHECKING_DELAY_MS,
};
use crate::systems::draw::DrawSession;
use crate::systems::effects::{EffectsState, Rng, BACKDROP_COUNT};

/// Seed used when the config does not provide one.
pub const DEFAULT_SEED: u64 = 0x6E61_7A6F;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Delayed canvas setup after a mode's screen is shown.
    Setup,
    /// Idle completion check.
    Completion,
    /// End of the checking indicator.
    Checking,
    /// Pause after announcing the traced character.
    Announce,
}

/// Payload of every session timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTimer {
    pub epoch: u32,
    pub kind: TimerKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    /// Screen shown, canvas not set up yet.
    Preparing,
    /// Accepting draw input.
    Drawing,
    /// Checking indicator up; input ignored.
    Checking,
    /// Speaking the traced character before celebrating.
    Announcing,
    /// Celebration overlay up, waiting for "next".
    Celebrating(Resolution),
    /// Terminal. Only `go_home` leaves it.
    AllClear,
}

/// Everything owned by one run of a mode, from `start_mode` to teardown.
pub struct SessionState {
    pub epoch: u32,
    pub game: ActiveGame,
    pub draw: DrawSession,
    pub completion: CompletionTimer,
    pub phase: SessionPhase,
}

impl SessionState {
    pub fn mode(&self) -> Mode {
        self.game.as_game().mode()
    }
}

pub struct SessionController {
    config: GameConfig,
    catalog: StageCatalog,
    pools: CharacterPools,
    rng: Rng,
    effects: EffectsState,
    timers: TimerQueue<SessionTimer>,
    state: Option<SessionState>,
    ctx: PresentContext,
    canvas: CanvasSize,
    next_epoch: u32,
}

impl SessionController {
    /// Controller with the built-in stages and hiragana pools.
    pub fn new(config: GameConfig) -> Self {
        Self::with_content(config, StageCatalog::builtin(), CharacterPools::builtin())
    }

    /// Controller with host-supplied content.
    pub fn with_content(config: GameConfig, catalog: StageCatalog, pools: CharacterPools) -> Self {
        let seed = config.seed.unwrap_or(DEFAULT_SEED);
        let canvas = config.canvas();
        log::info!(
            "session controller ready: {} stages, {} levels, seed {seed}",
            catalog.len(),
            pools.level_count()
        );
        Self {
            config,
            catalog,
            pools,
            rng: Rng::new(seed),
            effects: EffectsState::new(seed),
            timers: TimerQueue::new(),
            state: None,
            ctx: PresentContext::new(),
            canvas,
            next_epoch: 1,
        }
    }

    // -- Host-facing operations --

    /// Begin a fresh run of `mode`, tearing down any live session first.
    pub fn start_mode(&mut self, mode: Mode) {
        if let Some(old) = self.state.take() {
            log::debug!("replacing live {:?} session", old.mode());
            self.teardown(old.epoch);
        }

        let epoch = self.next_epoch;
        self.next_epoch = self.next_epoch.wrapping_add(1);

        let game = match mode {
            Mode::Paths => ActiveGame::Paths(PathsGame::new(self.catalog.clone())),
            Mode::Tracing => ActiveGame::Tracing(TracingGame::new(self.pools.clone(), &mut self.rng)),
        };
        log::info!("start {mode:?} (session {epoch})");

        for overlay in OverlayId::ALL {
            self.ctx.hide_overlay(overlay);
        }
        self.ctx.show_screen(mode.screen());
        self.ctx.play_cue(Cue::Start);
        game.as_game().present_status(&mut self.ctx);

        self.state = Some(SessionState {
            epoch,
            game,
            draw: DrawSession::new(),
            completion: CompletionTimer::new(),
            phase: SessionPhase::Preparing,
        });

        if self.config.setup_delay_ms > 0.0 {
            self.timers.schedule(
                self.config.setup_delay_ms,
                SessionTimer {
                    epoch,
                    kind: TimerKind::Setup,
                },
            );
        } else {
            self.present_stage();
        }
    }

    /// Abandon the live session, cancelling its timers, and show the menu.
    pub fn go_home(&mut self) {
        if let Some(old) = self.state.take() {
            log::info!("leaving {:?} session {}", old.mode(), old.epoch);
            self.teardown(old.epoch);
        }
        for overlay in OverlayId::ALL {
            self.ctx.hide_overlay(overlay);
        }
        self.ctx.show_screen(ScreenId::MainMenu);
        self.ctx.play_cue(Cue::Pop);
    }

    /// The celebration's "next" button. Ignored unless a celebration is up.
    pub fn acknowledge(&mut self) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        if !matches!(state.phase, SessionPhase::Celebrating(_)) {
            log::debug!("next ignored in {:?}", state.phase);
            return;
        }
        self.ctx.hide_overlay(OverlayId::Celebration);
        let game = state.game.as_game_mut();
        game.advance(&mut self.rng);
        game.present_status(&mut self.ctx);
        self.ctx.play_cue(Cue::Start);
        self.present_stage();
    }

    pub fn pointer_down(&mut self, at: Vec2) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        if state.phase != SessionPhase::Drawing || !state.completion.note_input(&mut self.timers) {
            return;
        }
        let input = state.draw.begin(at);
        state
            .game
            .as_game_mut()
            .handle_draw_input(&mut self.ctx, input, &self.config);
        self.effects.sparkle(at, &mut self.ctx);
    }

    pub fn pointer_move(&mut self, at: Vec2) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        // Hovering without a drag is not draw input.
        if state.phase != SessionPhase::Drawing || !state.draw.is_active() {
            return;
        }
        if !state.completion.note_input(&mut self.timers) {
            return;
        }
        if let Some(input) = state.draw.extend(at) {
            state
                .game
                .as_game_mut()
                .handle_draw_input(&mut self.ctx, input, &self.config);
            self.effects
                .maybe_sparkle(at, self.config.particle_chance, &mut self.ctx);
        }
    }

    /// Pointer up or leave. Arms the completion check if a drag just ended.
    pub fn pointer_up(&mut self) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        if state.phase != SessionPhase::Drawing || !state.draw.end() {
            return;
        }
        if state.draw.has_drawn() {
            state.completion.arm(
                &mut self.timers,
                SessionTimer {
                    epoch: state.epoch,
                    kind: TimerKind::Completion,
                },
            );
        }
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { x, y } => self.pointer_down(Vec2::new(x, y)),
            InputEvent::PointerMove { x, y } => self.pointer_move(Vec2::new(x, y)),
            InputEvent::PointerUp => self.pointer_up(),
            InputEvent::StartMode(mode) => self.start_mode(mode),
            InputEvent::Next => self.acknowledge(),
            InputEvent::Home => self.go_home(),
        }
    }

    /// Advance the virtual clock, firing due timers in deadline order.
    pub fn tick(&mut self, dt_ms: f64) {
        let dt_ms = dt_ms.max(0.0);
        // Age decorations first so ones spawned by this tick's timers start fresh.
        self.effects.tick(dt_ms, &mut self.ctx);
        let target = self.timers.now_ms() + dt_ms;
        while let Some((handle, timer)) = self.timers.pop_due(target) {
            self.fire(handle, timer);
        }
        self.timers.advance_to(target);
    }

    /// Canvas size used for the next stage setup. Degenerate sizes are ignored.
    pub fn set_canvas_size(&mut self, canvas: CanvasSize) {
        if canvas.is_degenerate() {
            log::warn!("ignoring degenerate canvas size {}x{}", canvas.width, canvas.height);
            return;
        }
        self.canvas = canvas;
    }

    /// Set the current stage up again on a fresh canvas, e.g. after the host
    /// resized and so wiped it. Only acts while drawing; any ink is lost.
    pub fn redraw_stage(&mut self) {
        if self.phase() == Some(&SessionPhase::Drawing) {
            self.present_stage();
        }
    }

    /// Scatter the permanent page backdrop. Called once by the host.
    pub fn scatter_backdrop(&mut self) {
        self.effects.scatter_backdrop(BACKDROP_COUNT, &mut self.ctx);
    }

    /// Replay and clear pending presentation commands.
    pub fn flush<P: Presenter + ?Sized>(&mut self, presenter: &mut P) {
        self.ctx.flush(presenter);
    }

    /// Take pending presentation commands.
    pub fn drain_commands(&mut self) -> Vec<Command> {
        self.ctx.drain()
    }

    // -- Queries --

    pub fn mode(&self) -> Option<Mode> {
        self.state.as_ref().map(SessionState::mode)
    }

    pub fn phase(&self) -> Option<&SessionPhase> {
        self.state.as_ref().map(|s| &s.phase)
    }

    pub fn session(&self) -> Option<&SessionState> {
        self.state.as_ref()
    }

    /// (done, total) for the live session's current pass.
    pub fn progress(&self) -> Option<(usize, usize)> {
        self.state.as_ref().map(|s| s.game.as_game().progress())
    }

    pub fn completion_phase(&self) -> Option<CompletionPhase> {
        self.state.as_ref().map(|s| s.completion.phase())
    }

    pub fn is_all_clear(&self) -> bool {
        matches!(self.phase(), Some(SessionPhase::AllClear))
    }

    /// Current tracing level (1-based).
    pub fn level(&self) -> Option<u8> {
        match self.state.as_ref().map(|s| &s.game) {
            Some(ActiveGame::Tracing(game)) => Some(game.level()),
            _ => None,
        }
    }

    pub fn question_set(&self) -> Option<&QuestionSet> {
        match self.state.as_ref().map(|s| &s.game) {
            Some(ActiveGame::Tracing(game)) => Some(game.questions()),
            _ => None,
        }
    }

    pub fn current_stage_index(&self) -> Option<usize> {
        match self.state.as_ref().map(|s| &s.game) {
            Some(ActiveGame::Paths(game)) => Some(game.stage_index()),
            _ => None,
        }
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn now_ms(&self) -> f64 {
        self.timers.now_ms()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    // -- Internals --

    fn teardown(&mut self, epoch: u32) {
        let cancelled = self.timers.cancel_where(|t| t.epoch == epoch);
        log::debug!("session {epoch} torn down, {cancelled} timer(s) cancelled");
    }

    fn fire(&mut self, handle: TimerHandle, timer: SessionTimer) {
        let live = self.state.as_ref().map(|s| s.epoch);
        if live != Some(timer.epoch) {
            log::debug!("dropping {:?} timer from session {}", timer.kind, timer.epoch);
            return;
        }
        match timer.kind {
            TimerKind::Setup => self.present_stage(),
            TimerKind::Completion => self.begin_checking(handle),
            TimerKind::Checking => self.finish_checking(),
            TimerKind::Announce => self.celebrate(),
        }
    }

    /// Fresh canvas for the current stage/character.
    fn present_stage(&mut self) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        state.draw.reset();
        state.completion.reset(&mut self.timers);
        self.ctx.clear_canvas();
        state
            .game
            .as_game_mut()
            .setup(&mut self.ctx, self.canvas, &self.config);
        state.phase = SessionPhase::Drawing;
    }

    fn begin_checking(&mut self, handle: TimerHandle) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        if state.phase != SessionPhase::Drawing || !state.completion.fire(handle) {
            return;
        }
        state.draw.end();
        state.phase = SessionPhase::Checking;
        log::debug!("checking session {}", state.epoch);
        self.ctx.show_overlay(OverlayId::Checking);
        self.ctx.speak(CHECKING_SPEECH);
        self.timers.schedule(
            CHECKING_DELAY_MS,
            SessionTimer {
                epoch: state.epoch,
                kind: TimerKind::Checking,
            },
        );
    }

    fn finish_checking(&mut self) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        if state.phase != SessionPhase::Checking || !state.completion.resolve() {
            return;
        }
        self.ctx.hide_overlay(OverlayId::Checking);
        let announcement = state.game.as_game().announcement();
        match announcement {
            Some(text) => {
                self.ctx.speak(text);
                state.phase = SessionPhase::Announcing;
                self.timers.schedule(
                    ANNOUNCE_DELAY_MS,
                    SessionTimer {
                        epoch: state.epoch,
                        kind: TimerKind::Announce,
                    },
                );
            }
            None => self.celebrate(),
        }
    }

    fn celebrate(&mut self) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        if !matches!(state.phase, SessionPhase::Checking | SessionPhase::Announcing) {
            return;
        }
        let game = state.game.as_game_mut();
        let resolution = game.on_resolve();
        game.present_status(&mut self.ctx);
        let (done, total) = game.progress();
        log::info!("{:?}: {resolution:?} ({done}/{total})", state.mode());

        match resolution.celebration() {
            Some(copy) => {
                self.ctx.set_label(LabelId::CelebrationTitle, copy.title);
                self.ctx.set_label(LabelId::CelebrationSubtitle, copy.subtitle);
                self.ctx.set_label(LabelId::NextButton, copy.button);
                self.ctx.show_overlay(OverlayId::Celebration);
                self.ctx.play_cue(Cue::Fanfare);
                self.ctx.speak(copy.speech);
                state.phase = SessionPhase::Celebrating(resolution);
            }
            None => {
                self.ctx.show_overlay(OverlayId::AllClear);
                self.ctx.play_cue(Cue::Fanfare);
                self.ctx.speak(ALL_CLEAR_SPEECH);
                state.phase = SessionPhase::AllClear;
            }
        }
        self.effects.confetti(&mut self.ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{PRAISE_SPEECH, ProgressSlot};
    use crate::assets::hiragana::HIRAGANA_LEVEL1;
    use crate::systems::completion::COMPLETION_DELAY_MS;

    fn controller() -> SessionController {
        SessionController::new(GameConfig {
            seed: Some(42),
            particle_chance: 0.0,
            ..GameConfig::default()
        })
    }

    fn started(mode: Mode) -> SessionController {
        let mut c = controller();
        c.start_mode(mode);
        c.tick(100.0);
        assert_eq!(c.phase(), Some(&SessionPhase::Drawing));
        c.drain_commands();
        c
    }

    fn stroke(c: &mut SessionController) {
        c.pointer_down(Vec2::new(100.0, 100.0));
        c.pointer_move(Vec2::new(150.0, 120.0));
        c.pointer_move(Vec2::new(200.0, 140.0));
        c.pointer_up();
    }

    /// Draw and wait until the resolve has been celebrated.
    fn clear_current(c: &mut SessionController) {
        stroke(c);
        c.tick(COMPLETION_DELAY_MS);
        c.tick(CHECKING_DELAY_MS);
        c.tick(ANNOUNCE_DELAY_MS);
    }

    fn count(cmds: &[Command], pred: impl Fn(&Command) -> bool) -> usize {
        cmds.iter().filter(|c| pred(c)).count()
    }

    #[test]
    fn start_shows_screen_then_sets_up_after_delay() {
        let mut c = controller();
        c.start_mode(Mode::Paths);
        let cmds = c.drain_commands();
        assert!(cmds.contains(&Command::ShowScreen(ScreenId::Paths)));
        assert!(cmds.contains(&Command::PlayCue(Cue::Start)));
        assert_eq!(c.phase(), Some(&SessionPhase::Preparing));

        c.tick(99.0);
        assert_eq!(c.phase(), Some(&SessionPhase::Preparing));
        c.tick(1.0);
        assert_eq!(c.phase(), Some(&SessionPhase::Drawing));
        let cmds = c.drain_commands();
        assert_eq!(cmds[0], Command::ClearCanvas);
        assert!(matches!(cmds[1], Command::DrawGuidePath { .. }));
    }

    #[test]
    fn redraw_stage_only_while_drawing() {
        let mut c = controller();
        c.start_mode(Mode::Paths);
        c.drain_commands();
        c.redraw_stage();
        assert!(c.drain_commands().is_empty());

        c.tick(100.0);
        c.drain_commands();
        stroke(&mut c);
        assert_eq!(c.completion_phase(), Some(CompletionPhase::Armed));
        c.drain_commands();

        c.redraw_stage();
        let cmds = c.drain_commands();
        assert_eq!(cmds[0], Command::ClearCanvas);
        assert!(matches!(cmds[1], Command::DrawGuidePath { .. }));
        assert_eq!(c.completion_phase(), Some(CompletionPhase::Idle));
        // The cancelled completion check never fires.
        c.tick(COMPLETION_DELAY_MS * 2.0);
        assert_eq!(c.phase(), Some(&SessionPhase::Drawing));
    }

    #[test]
    fn zero_setup_delay_sets_up_immediately() {
        let mut c = SessionController::new(GameConfig {
            setup_delay_ms: 0.0,
            ..GameConfig::default()
        });
        c.start_mode(Mode::Tracing);
        assert_eq!(c.phase(), Some(&SessionPhase::Drawing));
    }

    #[test]
    fn input_before_setup_is_ignored() {
        let mut c = controller();
        c.start_mode(Mode::Paths);
        c.drain_commands();
        c.pointer_down(Vec2::ZERO);
        c.pointer_up();
        assert!(c.drain_commands().is_empty());
    }

    #[test]
    fn drawing_emits_ink_and_sparkle() {
        let mut c = started(Mode::Paths);
        c.pointer_down(Vec2::new(10.0, 10.0));
        c.pointer_move(Vec2::new(20.0, 10.0));
        let cmds = c.drain_commands();
        assert_eq!(count(&cmds, |c| matches!(c, Command::DrawInkDot { .. })), 2);
        assert_eq!(count(&cmds, |c| matches!(c, Command::DrawInkSegment { .. })), 1);
        assert_eq!(count(&cmds, |c| matches!(c, Command::SpawnDecoration(_))), 1);
    }

    #[test]
    fn hover_is_not_draw_input() {
        let mut c = started(Mode::Paths);
        c.pointer_move(Vec2::new(20.0, 10.0));
        c.pointer_up();
        assert!(c.drain_commands().is_empty());
        assert_eq!(c.completion_phase(), Some(CompletionPhase::Idle));
        assert_eq!(c.pending_timers(), 0);
    }

    #[test]
    fn checking_then_celebration_for_a_stage() {
        let mut c = started(Mode::Paths);
        stroke(&mut c);
        c.tick(COMPLETION_DELAY_MS - 1.0);
        assert_eq!(c.phase(), Some(&SessionPhase::Drawing));
        c.tick(1.0);
        assert_eq!(c.phase(), Some(&SessionPhase::Checking));
        let cmds = c.drain_commands();
        assert!(cmds.contains(&Command::ShowOverlay(OverlayId::Checking)));
        assert!(cmds.contains(&Command::Speak(CHECKING_SPEECH.into())));

        c.tick(CHECKING_DELAY_MS);
        assert_eq!(c.phase(), Some(&SessionPhase::Celebrating(Resolution::StageCleared)));
        let cmds = c.drain_commands();
        assert!(cmds.contains(&Command::HideOverlay(OverlayId::Checking)));
        assert!(cmds.contains(&Command::ShowOverlay(OverlayId::Celebration)));
        assert_eq!(count(&cmds, |c| *c == Command::PlayCue(Cue::Fanfare)), 1);
        assert_eq!(count(&cmds, |c| *c == Command::Speak(PRAISE_SPEECH.into())), 1);
        assert!(cmds.contains(&Command::SetLabel {
            label: LabelId::CelebrationSubtitle,
            text: "つぎの せんに いこう！".into()
        }));
        assert_eq!(c.progress(), Some((1, 4)));
    }

    #[test]
    fn draw_input_before_deadline_cancels_resolve() {
        let mut c = started(Mode::Paths);
        stroke(&mut c);
        c.tick(COMPLETION_DELAY_MS - 1.0);
        // New stroke at 1499 ms: the pending check is superseded.
        c.pointer_down(Vec2::new(10.0, 10.0));
        c.pointer_move(Vec2::new(30.0, 10.0));
        assert_eq!(c.pending_timers(), 0);
        c.tick(10_000.0);
        assert_eq!(c.phase(), Some(&SessionPhase::Drawing));

        // Only a full idle period after the last pointer-up resolves.
        c.pointer_up();
        c.tick(COMPLETION_DELAY_MS - 1.0);
        assert_eq!(c.phase(), Some(&SessionPhase::Drawing));
        c.tick(1.0);
        assert_eq!(c.phase(), Some(&SessionPhase::Checking));
    }

    #[test]
    fn duplicate_pointer_up_cannot_double_resolve() {
        let mut c = started(Mode::Paths);
        stroke(&mut c);
        c.pointer_up();
        c.pointer_up();
        assert_eq!(c.pending_timers(), 1);
        c.tick(COMPLETION_DELAY_MS + CHECKING_DELAY_MS);
        assert_eq!(c.progress(), Some((1, 4)));
        // Input while celebrating goes nowhere.
        stroke(&mut c);
        c.tick(10_000.0);
        assert_eq!(c.progress(), Some((1, 4)));
    }

    #[test]
    fn input_during_checking_is_ignored() {
        let mut c = started(Mode::Tracing);
        stroke(&mut c);
        c.tick(COMPLETION_DELAY_MS);
        c.drain_commands();
        c.pointer_down(Vec2::new(50.0, 50.0));
        c.pointer_move(Vec2::new(60.0, 50.0));
        c.pointer_up();
        assert!(c.drain_commands().is_empty());
        assert_eq!(c.completion_phase(), Some(CompletionPhase::Checking));
    }

    #[test]
    fn scenario_paths_all_clear_after_four_stages() {
        let mut c = started(Mode::Paths);
        for stage in 0..3 {
            assert_eq!(c.current_stage_index(), Some(stage));
            clear_current(&mut c);
            assert_eq!(c.phase(), Some(&SessionPhase::Celebrating(Resolution::StageCleared)));
            c.acknowledge();
            assert_eq!(c.phase(), Some(&SessionPhase::Drawing));
        }
        assert_eq!(c.current_stage_index(), Some(3));
        c.drain_commands();
        clear_current(&mut c);
        assert!(c.is_all_clear());
        assert_eq!(c.progress(), Some((4, 4)));
        let cmds = c.drain_commands();
        assert!(cmds.contains(&Command::ShowOverlay(OverlayId::AllClear)));
        assert!(cmds.contains(&Command::Speak(ALL_CLEAR_SPEECH.into())));
        assert!(!cmds.contains(&Command::ShowOverlay(OverlayId::Celebration)));

        // Locked until home.
        c.acknowledge();
        stroke(&mut c);
        c.tick(10_000.0);
        assert!(c.is_all_clear());
        assert_eq!(c.progress(), Some((4, 4)));
    }

    #[test]
    fn scenario_tracing_level_one_clears_to_level_two() {
        let mut c = started(Mode::Tracing);
        assert_eq!(c.level(), Some(1));
        let set = c.question_set().unwrap().clone();
        assert_eq!(set.len(), 5);
        assert!(set.glyphs().iter().all(|g| HIRAGANA_LEVEL1.contains(&g.as_str())));

        for (i, glyph) in set.glyphs().iter().enumerate() {
            stroke(&mut c);
            c.tick(COMPLETION_DELAY_MS + CHECKING_DELAY_MS);
            assert_eq!(c.phase(), Some(&SessionPhase::Announcing));
            let cmds = c.drain_commands();
            assert!(cmds.contains(&Command::Speak(glyph.clone())));
            c.tick(ANNOUNCE_DELAY_MS);
            let expected = if i < 4 {
                Resolution::CharacterCleared { glyph: glyph.clone() }
            } else {
                Resolution::LevelCleared { level: 1 }
            };
            assert_eq!(c.phase(), Some(&SessionPhase::Celebrating(expected)));
            c.acknowledge();
        }
        assert_eq!(c.level(), Some(2));
        assert_eq!(c.progress(), Some((0, 5)));
        assert_eq!(c.phase(), Some(&SessionPhase::Drawing));
    }

    #[test]
    fn scenario_tracing_level_three_ends_in_all_clear() {
        let mut c = started(Mode::Tracing);
        for _ in 0..10 {
            clear_current(&mut c);
            c.acknowledge();
        }
        assert_eq!(c.level(), Some(3));
        for _ in 0..4 {
            clear_current(&mut c);
            assert!(matches!(
                c.phase(),
                Some(SessionPhase::Celebrating(Resolution::CharacterCleared { .. }))
            ));
            c.acknowledge();
        }
        clear_current(&mut c);
        assert!(c.is_all_clear());
        assert_eq!(c.progress(), Some((5, 5)));
    }

    #[test]
    fn level_progress_never_exceeds_set_size() {
        let mut c = started(Mode::Tracing);
        for _ in 0..30 {
            clear_current(&mut c);
            let (done, total) = c.progress().unwrap();
            assert!(done <= total && total <= 5);
            c.acknowledge();
        }
    }

    #[test]
    fn going_home_mid_timer_never_resolves() {
        let mut c = started(Mode::Paths);
        stroke(&mut c);
        c.tick(1000.0);
        c.go_home();
        assert_eq!(c.mode(), None);
        assert_eq!(c.pending_timers(), 0);
        let cmds = c.drain_commands();
        assert!(cmds.contains(&Command::ShowScreen(ScreenId::MainMenu)));
        assert!(cmds.contains(&Command::PlayCue(Cue::Pop)));

        c.tick(10_000.0);
        let cmds = c.drain_commands();
        assert!(!cmds.contains(&Command::ShowOverlay(OverlayId::Checking)));
        assert!(!cmds.iter().any(|c| matches!(c, Command::Speak(_))));
    }

    #[test]
    fn old_deadline_does_not_reach_new_session() {
        let mut c = started(Mode::Paths);
        stroke(&mut c);
        c.tick(1000.0);
        c.go_home();
        c.start_mode(Mode::Paths);
        c.tick(100.0);
        // Past the abandoned session's deadline.
        c.tick(1000.0);
        assert_eq!(c.phase(), Some(&SessionPhase::Drawing));
        assert_eq!(c.progress(), Some((0, 4)));
    }

    #[test]
    fn restarting_mode_tears_down_live_session() {
        let mut c = started(Mode::Paths);
        stroke(&mut c);
        c.start_mode(Mode::Tracing);
        c.tick(100.0);
        c.tick(10_000.0);
        assert_eq!(c.mode(), Some(Mode::Tracing));
        assert_eq!(c.phase(), Some(&SessionPhase::Drawing));
        assert_eq!(c.progress(), Some((0, 5)));
    }

    #[test]
    fn acknowledge_ignored_without_celebration() {
        let mut c = started(Mode::Paths);
        c.acknowledge();
        assert!(c.drain_commands().is_empty());
        assert_eq!(c.current_stage_index(), Some(0));
    }

    #[test]
    fn acknowledge_sets_up_next_stage() {
        let mut c = started(Mode::Paths);
        clear_current(&mut c);
        c.drain_commands();
        c.acknowledge();
        let cmds = c.drain_commands();
        assert_eq!(cmds[0], Command::HideOverlay(OverlayId::Celebration));
        assert!(cmds.iter().any(|c| matches!(c, Command::ShowProgress { slot: ProgressSlot::Paths, .. })));
        assert!(cmds.contains(&Command::PlayCue(Cue::Start)));
        assert!(cmds.contains(&Command::ClearCanvas));
        assert_eq!(c.current_stage_index(), Some(1));
        assert_eq!(c.completion_phase(), Some(CompletionPhase::Idle));
    }

    #[test]
    fn handle_input_routes_events() {
        let mut c = controller();
        c.handle_input(InputEvent::StartMode(Mode::Tracing));
        c.tick(100.0);
        c.handle_input(InputEvent::PointerDown { x: 1.0, y: 1.0 });
        c.handle_input(InputEvent::PointerMove { x: 5.0, y: 1.0 });
        c.handle_input(InputEvent::PointerUp);
        assert_eq!(c.completion_phase(), Some(CompletionPhase::Armed));
        c.handle_input(InputEvent::Home);
        assert_eq!(c.mode(), None);
    }

    #[test]
    fn degenerate_canvas_is_ignored() {
        let mut c = controller();
        c.set_canvas_size(CanvasSize::new(0.0, 0.0));
        assert_eq!(c.canvas(), CanvasSize::new(400.0, 400.0));
        c.set_canvas_size(CanvasSize::new(320.0, 480.0));
        assert_eq!(c.canvas(), CanvasSize::new(320.0, 480.0));
    }

    #[test]
    fn decorations_expire_with_the_clock() {
        let mut c = started(Mode::Paths);
        clear_current(&mut c);
        c.drain_commands();
        c.tick(2000.0);
        let removed = count(&c.drain_commands(), |c| matches!(c, Command::RemoveDecoration(_)));
        // The pointer-down sparkle is long gone; this is the confetti burst.
        assert_eq!(removed, 15);
    }
}
