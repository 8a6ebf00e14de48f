//! `Presenter` implementation on top of the page DOM: Canvas 2D for drawing,
//! `active`/`hidden` class toggles for screens and overlays, floating divs
//! for decorations.
//!
//! Every call is fire-and-forget. DOM failures are logged (loudly once,
//! quietly after that) and otherwise ignored.

use std::collections::HashMap;
use std::f64::consts::TAU;

use glam::Vec2;
use nazori::{
    AudioOut, CanvasRect, CanvasSize, Cue, Decoration, DecorationId, DecorationKind, Decorations,
    EndpointMarker, GlyphTemplate, GuidePath, GuideStyle, InkStyle, LabelId, OverlayId,
    ProgressMarker, ProgressSlot, ScreenId, Screens, Surface,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlElement};

use crate::audio::AudioChannel;
use crate::runner::CanvasHost;
use crate::dom::{self, DecorationParent};

const BACKGROUND: &str = "#FFFFFF";
const MARKER_FONT: &str = "30px sans-serif";

/// The canvas of the visible screen.
struct ActiveCanvas {
    element: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl ActiveCanvas {
    fn find(document: &Document, id: &str) -> Result<Self, JsValue> {
        let element = document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))?
            .dyn_into::<HtmlCanvasElement>()?;
        let ctx = element
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { element, ctx })
    }

    fn size(&self) -> CanvasSize {
        CanvasSize::new(self.element.width() as f32, self.element.height() as f32)
    }
}

fn dash_array(dash: &[f32]) -> js_sys::Array {
    dash.iter().map(|d| JsValue::from_f64(*d as f64)).collect()
}

pub struct WebPresenter {
    document: Document,
    canvas: Option<ActiveCanvas>,
    screen_changed: bool,
    audio: AudioChannel,
    decorations: HashMap<DecorationId, Element>,
    warned: bool,
}

impl WebPresenter {
    pub fn new() -> Result<Self, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        Ok(Self {
            document,
            canvas: None,
            screen_changed: false,
            audio: AudioChannel::new(),
            decorations: HashMap::new(),
            warned: false,
        })
    }

    fn report(&mut self, what: &str, result: Result<(), JsValue>) {
        if let Err(err) = result {
            if self.warned {
                log::debug!("{what} failed: {err:?}");
            } else {
                log::warn!("{what} failed: {err:?} (further failures logged at debug)");
                self.warned = true;
            }
        }
    }

    fn element(&self, id: &str) -> Result<Element, JsValue> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))
    }

    fn set_class(&self, id: &str, class: &str, on: bool) -> Result<(), JsValue> {
        let classes = self.element(id)?.class_list();
        if on {
            classes.add_1(class)
        } else {
            classes.remove_1(class)
        }
    }

    fn canvas_ctx(&self) -> Result<&CanvasRenderingContext2d, JsValue> {
        self.canvas
            .as_ref()
            .map(|c| &c.ctx)
            .ok_or_else(|| JsValue::from_str("no active canvas"))
    }

    /// Canvas point to client point for floating decorations.
    fn to_client(&self, at: Vec2) -> Vec2 {
        match (self.canvas_size(), self.canvas_rect()) {
            (Some(size), Some(rect)) if !size.is_degenerate() => {
                Vec2::new(rect.left, rect.top)
                    + at * Vec2::new(rect.width / size.width, rect.height / size.height)
            }
            (_, Some(rect)) => Vec2::new(rect.left, rect.top) + at,
            _ => at,
        }
    }

    fn try_show_screen(&mut self, screen: ScreenId) -> Result<(), JsValue> {
        for other in dom::ALL_SCREENS {
            self.set_class(dom::screen_id(other), dom::ACTIVE_CLASS, other == screen)?;
        }
        self.canvas = match dom::canvas_id(screen) {
            Some(id) => Some(ActiveCanvas::find(&self.document, id)?),
            None => None,
        };
        Ok(())
    }

    fn try_draw_guide_path(&self, path: &GuidePath, style: &GuideStyle) -> Result<(), JsValue> {
        let ctx = self.canvas_ctx()?;
        ctx.set_stroke_style_str(&style.color);
        ctx.set_line_width(style.width as f64);
        ctx.set_line_cap("round");
        ctx.set_line_join("round");
        ctx.set_line_dash(&dash_array(&style.dash))?;
        ctx.begin_path();
        ctx.move_to(path.start.x as f64, path.start.y as f64);
        for p in path.points.iter().skip(1) {
            ctx.line_to(p.x as f64, p.y as f64);
        }
        ctx.stroke();
        ctx.set_line_dash(&js_sys::Array::new())?;

        ctx.set_font(MARKER_FONT);
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        for (marker, at) in [(EndpointMarker::Start, path.start), (EndpointMarker::End, path.end)] {
            ctx.fill_text(marker.glyph(), at.x as f64, at.y as f64)?;
        }
        Ok(())
    }

    fn try_draw_ink_dot(&self, at: Vec2, ink: &InkStyle) -> Result<(), JsValue> {
        let ctx = self.canvas_ctx()?;
        ctx.set_fill_style_str(&ink.color);
        ctx.begin_path();
        ctx.arc(at.x as f64, at.y as f64, ink.dot_radius as f64, 0.0, TAU)?;
        ctx.fill();
        Ok(())
    }

    fn try_draw_ink_segment(&self, from: Vec2, to: Vec2, ink: &InkStyle) -> Result<(), JsValue> {
        let ctx = self.canvas_ctx()?;
        ctx.set_stroke_style_str(&ink.color);
        ctx.set_line_width(ink.stroke_width as f64);
        ctx.set_line_cap("round");
        ctx.begin_path();
        ctx.move_to(from.x as f64, from.y as f64);
        ctx.line_to(to.x as f64, to.y as f64);
        ctx.stroke();
        Ok(())
    }

    fn try_draw_glyph_template(&self, t: &GlyphTemplate) -> Result<(), JsValue> {
        let ctx = self.canvas_ctx()?;
        let (x, y) = (t.center.x as f64, t.center.y as f64);
        ctx.set_font(&t.css_font());
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        ctx.set_fill_style_str(&t.fill);
        ctx.fill_text(&t.glyph, x, y)?;
        ctx.set_stroke_style_str(&t.outline);
        ctx.set_line_width(t.outline_width as f64);
        ctx.set_line_dash(&dash_array(&t.dash))?;
        ctx.stroke_text(&t.glyph, x, y)?;
        ctx.set_line_dash(&js_sys::Array::new())?;
        Ok(())
    }

    fn try_set_text(&self, id: &str, text: &str) -> Result<(), JsValue> {
        self.element(id)?.set_text_content(Some(text));
        Ok(())
    }

    fn try_spawn_decoration(&mut self, decoration: &Decoration) -> Result<(), JsValue> {
        let div = self.document.create_element("div")?;
        let style = div.dyn_ref::<HtmlElement>().map(HtmlElement::style);
        let set = |name: &str, value: &str| -> Result<(), JsValue> {
            match &style {
                Some(style) => style.set_property(name, value),
                None => Ok(()),
            }
        };

        let client = match decoration.kind {
            DecorationKind::Sparkle { .. } => self.to_client(decoration.at),
            _ => decoration.at,
        };
        let markup = dom::decoration_markup(&decoration.kind, client);
        div.set_class_name(markup.class);
        if let Some(text) = markup.text {
            div.set_text_content(Some(text));
        }
        for (name, value) in &markup.style {
            set(*name, value.as_str())?;
        }
        let parent = match markup.parent {
            DecorationParent::Body => self.document.body().map(Element::from),
            DecorationParent::Backdrop => self.document.get_element_by_id(dom::SPARKLES),
        };

        let parent = parent.ok_or_else(|| JsValue::from_str("no decoration container"))?;
        parent.append_child(&div)?;
        if decoration.lifetime_ms.is_some() {
            self.decorations.insert(decoration.id, div);
        }
        Ok(())
    }
}

impl CanvasHost for WebPresenter {
    fn take_screen_changed(&mut self) -> bool {
        std::mem::take(&mut self.screen_changed)
    }

    fn canvas_rect(&self) -> Option<CanvasRect> {
        let rect = self.canvas.as_ref()?.element.get_bounding_client_rect();
        Some(CanvasRect::new(
            rect.left() as f32,
            rect.top() as f32,
            rect.width() as f32,
            rect.height() as f32,
        ))
    }

    fn canvas_size(&self) -> Option<CanvasSize> {
        self.canvas.as_ref().map(ActiveCanvas::size)
    }

    fn fit_canvas(&mut self) -> Option<CanvasSize> {
        let canvas = self.canvas.as_ref()?;
        let rect = canvas.element.get_bounding_client_rect();
        let (w, h) = (rect.width().round(), rect.height().round());
        if w >= 1.0 && h >= 1.0 {
            canvas.element.set_width(w as u32);
            canvas.element.set_height(h as u32);
        }
        Some(canvas.size())
    }
}

impl Surface for WebPresenter {
    fn clear_canvas(&mut self) {
        let result = self.canvas_ctx().map(|ctx| {
            let size = self.canvas.as_ref().map(ActiveCanvas::size);
            if let Some(size) = size {
                ctx.set_fill_style_str(BACKGROUND);
                ctx.fill_rect(0.0, 0.0, size.width as f64, size.height as f64);
            }
        });
        self.report("clear canvas", result);
    }

    fn draw_guide_path(&mut self, path: &GuidePath, style: &GuideStyle) {
        let result = self.try_draw_guide_path(path, style);
        self.report("guide path", result);
    }

    fn draw_ink_dot(&mut self, at: Vec2, ink: &InkStyle) {
        let result = self.try_draw_ink_dot(at, ink);
        self.report("ink dot", result);
    }

    fn draw_ink_segment(&mut self, from: Vec2, to: Vec2, ink: &InkStyle) {
        let result = self.try_draw_ink_segment(from, to, ink);
        self.report("ink segment", result);
    }

    fn draw_glyph_template(&mut self, template: &GlyphTemplate) {
        let result = self.try_draw_glyph_template(template);
        self.report("glyph template", result);
    }
}

impl AudioOut for WebPresenter {
    fn play_cue(&mut self, cue: Cue) {
        let result = self.audio.play(cue);
        self.report("sound cue", result);
    }

    fn speak(&mut self, text: &str) {
        let result = self.audio.speak(text);
        self.report("speech", result);
    }
}

impl Screens for WebPresenter {
    fn show_screen(&mut self, screen: ScreenId) {
        let result = self.try_show_screen(screen);
        self.screen_changed = true;
        self.report("show screen", result);
    }

    fn show_overlay(&mut self, overlay: OverlayId) {
        let result = self.set_class(dom::overlay_id(overlay), dom::HIDDEN_CLASS, false);
        self.report("show overlay", result);
    }

    fn hide_overlay(&mut self, overlay: OverlayId) {
        let result = self.set_class(dom::overlay_id(overlay), dom::HIDDEN_CLASS, true);
        self.report("hide overlay", result);
    }

    fn set_label(&mut self, label: LabelId, text: &str) {
        let result = self.try_set_text(dom::label_id(label), text);
        self.report("label", result);
    }

    fn show_progress(&mut self, slot: ProgressSlot, markers: &[ProgressMarker]) {
        let text: String = markers.iter().map(|m| m.glyph()).collect();
        let result = self.try_set_text(dom::progress_id(slot), &text);
        self.report("progress", result);
    }
}

impl Decorations for WebPresenter {
    fn spawn_decoration(&mut self, decoration: &Decoration) {
        let result = self.try_spawn_decoration(decoration);
        self.report("decoration", result);
    }

    fn remove_decoration(&mut self, id: DecorationId) {
        if let Some(element) = self.decorations.remove(&id) {
            element.remove();
        }
    }
}
