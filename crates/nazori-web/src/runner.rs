use glam::Vec2;
use nazori::{
    CanvasRect, CanvasSize, GameConfig, InputEvent, InputQueue, Presenter, ScreenId,
    SessionController,
};
use wasm_bindgen::JsValue;

use crate::presenter::WebPresenter;

/// Canvas measurement the runner needs on top of presenting.
pub trait CanvasHost {
    /// True once after each screen change.
    fn take_screen_changed(&mut self) -> bool;

    /// Match the active canvas's backing store to its on-page size. This
    /// wipes the bitmap. Returns the new logical size.
    fn fit_canvas(&mut self) -> Option<CanvasSize>;

    /// Client-space bounding box of the active canvas.
    fn canvas_rect(&self) -> Option<CanvasRect>;

    /// Logical size of the active canvas.
    fn canvas_size(&self) -> Option<CanvasSize>;
}

/// Wires the session controller to the page.
///
/// Input from JS is queued and drained at the start of each tick, so pointer
/// events and timer deadlines are processed in one place. Pointer coordinates
/// arrive in client space and are mapped onto the active canvas on push.
pub struct GameRunner<P = WebPresenter> {
    controller: SessionController,
    presenter: P,
    input: InputQueue,
    initialized: bool,
}

impl GameRunner<WebPresenter> {
    pub fn new(config: GameConfig) -> Result<Self, JsValue> {
        Ok(Self::with_presenter(config, WebPresenter::new()?))
    }
}

impl<P: Presenter + CanvasHost> GameRunner<P> {
    pub fn with_presenter(config: GameConfig, presenter: P) -> Self {
        Self {
            controller: SessionController::new(config),
            presenter,
            input: InputQueue::new(),
            initialized: false,
        }
    }

    /// Show the main menu and scatter the page backdrop. Call once.
    pub fn init(&mut self) {
        self.presenter.show_screen(ScreenId::MainMenu);
        self.controller.scatter_backdrop();
        self.flush();
        self.initialized = true;
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    pub fn pointer_down(&mut self, client_x: f32, client_y: f32) {
        let at = self.to_canvas(client_x, client_y);
        self.push_input(InputEvent::PointerDown { x: at.x, y: at.y });
    }

    pub fn pointer_move(&mut self, client_x: f32, client_y: f32) {
        let at = self.to_canvas(client_x, client_y);
        self.push_input(InputEvent::PointerMove { x: at.x, y: at.y });
    }

    pub fn pointer_up(&mut self) {
        self.push_input(InputEvent::PointerUp);
    }

    /// Run one frame: apply queued input, advance timers by `dt` seconds,
    /// then present everything the core asked for.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }
        for event in self.input.drain() {
            self.controller.handle_input(event);
        }
        // A newly shown canvas is measured before any timer draws on it.
        self.flush();
        self.controller.tick(dt as f64 * 1000.0);
        self.flush();
    }

    /// Re-measure the active canvas after a layout change. The fit wipes the
    /// canvas, so a stage being drawn is set up again.
    pub fn resize(&mut self) {
        if let Some(size) = self.presenter.fit_canvas() {
            self.controller.set_canvas_size(size);
            self.controller.redraw_stage();
            self.controller.flush(&mut self.presenter);
        }
    }

    pub fn controller(&self) -> &SessionController {
        &self.controller
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    fn to_canvas(&self, client_x: f32, client_y: f32) -> Vec2 {
        let client = Vec2::new(client_x, client_y);
        match (self.presenter.canvas_rect(), self.presenter.canvas_size()) {
            (Some(rect), Some(size)) => rect.to_canvas(client, size),
            _ => client,
        }
    }

    fn flush(&mut self) {
        self.controller.flush(&mut self.presenter);
        if self.presenter.take_screen_changed() {
            self.resize();
        }
    }
}
