//! Lyon-based canvas surface.
//!
//! `VectorSurface` implements `Surface` by tessellating every drawing call on
//! the CPU into a flat triangle list of `VectorVertex`, ready for a GPU host
//! to upload as-is. The canvas is cumulative: ink keeps piling up until the
//! next `clear_canvas`, exactly like a 2D canvas.
//!
//! Text (glyph templates and the endpoint emoji) is not tessellated. It is
//! recorded so the host can draw it with its own text layer.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, FillVertexConstructor, LineCap,
    LineJoin, StrokeOptions, StrokeTessellator, StrokeVertex, StrokeVertexConstructor,
    VertexBuffers,
};

use crate::api::game::{GuideStyle, InkStyle};
use crate::api::types::CanvasSize;
use crate::renderer::traits::{EndpointMarker, GlyphTemplate, Surface};
use crate::systems::path::GuidePath;

/// Radius of the disc drawn under each endpoint marker.
pub const MARKER_RADIUS: f32 = 14.0;

/// Per-vertex data for vector rendering.
/// 6 floats = 24 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct VectorVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorVertex {
    pub const FLOATS: usize = 6;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// RGBA color, components in 0.0 - 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectorColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorColor {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Parse a CSS hex color: `#RGB` or `#RRGGBB`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if !digits.is_ascii() {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match digits.len() {
            3 => {
                let mut c = [0u8; 3];
                for (i, slot) in c.iter_mut().enumerate() {
                    let v = channel(&digits[i..i + 1])?;
                    *slot = v * 17;
                }
                Some(Self::rgb8(c[0], c[1], c[2]))
            }
            6 => Some(Self::rgb8(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            _ => None,
        }
    }

    /// Like `from_hex`, falling back to black for anything unparseable.
    pub fn from_css(css: &str) -> Self {
        Self::from_hex(css).unwrap_or_else(|| {
            log::debug!("unsupported color '{css}', using black");
            Self::BLACK
        })
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
}

impl Default for VectorColor {
    fn default() -> Self {
        Self::WHITE
    }
}

struct FillVertexCtor {
    color: VectorColor,
}

impl FillVertexConstructor<VectorVertex> for FillVertexCtor {
    fn new_vertex(&mut self, vertex: FillVertex) -> VectorVertex {
        VectorVertex {
            x: vertex.position().x,
            y: vertex.position().y,
            r: self.color.r,
            g: self.color.g,
            b: self.color.b,
            a: self.color.a,
        }
    }
}

struct StrokeVertexCtor {
    color: VectorColor,
}

impl StrokeVertexConstructor<VectorVertex> for StrokeVertexCtor {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> VectorVertex {
        VectorVertex {
            x: vertex.position().x,
            y: vertex.position().y,
            r: self.color.r,
            g: self.color.g,
            b: self.color.b,
            a: self.color.a,
        }
    }
}

/// Shortest dash or gap, in pixels.
pub const MIN_DASH: f32 = 0.5;

/// Split a polyline into dashes following an `[on, off]` pattern measured
/// along its length. The pattern carries across corners. A non-positive
/// pattern entry yields the whole polyline as one solid run; positive
/// entries are raised to at least `MIN_DASH`.
pub fn dash_polyline(points: &[Vec2], pattern: [f32; 2]) -> Vec<Vec<Vec2>> {
    let [on, off] = pattern;
    if points.len() < 2 {
        return Vec::new();
    }
    if !(on > 0.0 && off > 0.0) {
        return vec![points.to_vec()];
    }
    let (on, off) = (on.max(MIN_DASH), off.max(MIN_DASH));

    let mut dashes = Vec::new();
    let mut current = vec![points[0]];
    let mut drawing = true;
    let mut left = on;

    for w in points.windows(2) {
        let (mut a, b) = (w[0], w[1]);
        let mut seg = a.distance(b);
        // Float precision on long segments can stall `seg -= left`.
        let mut cuts = (seg / on.min(off)).ceil() as usize + 1;
        while seg > 0.0 {
            if cuts == 0 {
                if drawing {
                    current.push(b);
                }
                break;
            }
            cuts -= 1;
            if seg < left {
                left -= seg;
                if drawing {
                    current.push(b);
                }
                break;
            }
            let cut = a + (b - a) * (left / seg);
            seg -= left;
            a = cut;
            if drawing {
                current.push(cut);
                dashes.push(std::mem::take(&mut current));
            } else {
                current = vec![cut];
            }
            drawing = !drawing;
            left = if drawing { on } else { off };
        }
    }

    if drawing && current.len() >= 2 {
        dashes.push(current);
    }
    dashes
}

fn polyline_path(points: &[Vec2]) -> Path {
    let mut builder = Path::builder();
    builder.begin(point(points[0].x, points[0].y));
    for p in &points[1..] {
        builder.line_to(point(p.x, p.y));
    }
    builder.end(false);
    builder.build()
}

/// A `Surface` that tessellates into a GPU-ready vertex buffer.
pub struct VectorSurface {
    canvas: CanvasSize,
    background: VectorColor,
    fill_tess: FillTessellator,
    stroke_tess: StrokeTessellator,
    geometry: VertexBuffers<VectorVertex, u32>,
    buffer: Vec<f32>,
    glyphs: Vec<GlyphTemplate>,
    markers: Vec<(EndpointMarker, Vec2)>,
}

impl VectorSurface {
    pub fn new(canvas: CanvasSize) -> Self {
        Self {
            canvas,
            background: VectorColor::WHITE,
            fill_tess: FillTessellator::new(),
            stroke_tess: StrokeTessellator::new(),
            geometry: VertexBuffers::new(),
            buffer: Vec::with_capacity(16384 * VectorVertex::FLOATS),
            glyphs: Vec::new(),
            markers: Vec::new(),
        }
    }

    /// Takes effect at the next `clear_canvas`.
    pub fn resize(&mut self, canvas: CanvasSize) {
        self.canvas = canvas;
    }

    pub fn set_background(&mut self, color: VectorColor) {
        self.background = color;
    }

    pub fn vertex_count(&self) -> usize {
        self.buffer.len() / VectorVertex::FLOATS
    }

    /// Flat triangle list, `VectorVertex::FLOATS` floats per vertex.
    pub fn buffer(&self) -> &[f32] {
        &self.buffer
    }

    /// The same buffer viewed as vertices.
    pub fn vertices(&self) -> &[VectorVertex] {
        bytemuck::cast_slice(&self.buffer)
    }

    /// Glyph templates drawn since the last clear, for the text layer.
    pub fn glyphs(&self) -> &[GlyphTemplate] {
        &self.glyphs
    }

    /// Endpoint emoji drawn since the last clear, for the text layer.
    pub fn markers(&self) -> &[(EndpointMarker, Vec2)] {
        &self.markers
    }

    fn flush_geometry(&mut self) {
        for idx in &self.geometry.indices {
            let v = &self.geometry.vertices[*idx as usize];
            self.buffer.extend_from_slice(&[v.x, v.y, v.r, v.g, v.b, v.a]);
        }
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
    }

    fn fill_path(&mut self, path: &Path, color: VectorColor) {
        let result = self.fill_tess.tessellate_path(
            path,
            &FillOptions::tolerance(0.5),
            &mut BuffersBuilder::new(&mut self.geometry, FillVertexCtor { color }),
        );
        if result.is_ok() {
            self.flush_geometry();
        }
    }

    fn stroke_path(&mut self, path: &Path, options: &StrokeOptions, color: VectorColor) {
        let result = self.stroke_tess.tessellate_path(
            path,
            options,
            &mut BuffersBuilder::new(&mut self.geometry, StrokeVertexCtor { color }),
        );
        if result.is_ok() {
            self.flush_geometry();
        }
    }

    pub fn fill_rect(&mut self, pos: Vec2, width: f32, height: f32, color: VectorColor) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        let mut builder = Path::builder();
        builder.begin(point(pos.x, pos.y));
        builder.line_to(point(pos.x + width, pos.y));
        builder.line_to(point(pos.x + width, pos.y + height));
        builder.line_to(point(pos.x, pos.y + height));
        builder.close();
        self.fill_path(&builder.build(), color);
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: VectorColor) {
        if radius <= 0.0 {
            return;
        }
        let mut builder = Path::builder();
        builder.add_circle(point(center.x, center.y), radius, lyon::path::Winding::Positive);
        self.fill_path(&builder.build(), color);
    }

    /// Butt-capped open polyline.
    pub fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: VectorColor) {
        if points.len() < 2 {
            return;
        }
        let options = StrokeOptions::tolerance(0.5).with_line_width(width);
        self.stroke_path(&polyline_path(points), &options, color);
    }

    /// Round-capped, round-joined open polyline.
    pub fn stroke_round(&mut self, points: &[Vec2], width: f32, color: VectorColor) {
        if points.len() < 2 {
            return;
        }
        let options = StrokeOptions::tolerance(0.5)
            .with_line_width(width)
            .with_line_cap(LineCap::Round)
            .with_line_join(LineJoin::Round);
        self.stroke_path(&polyline_path(points), &options, color);
    }
}

impl Surface for VectorSurface {
    fn clear_canvas(&mut self) {
        self.buffer.clear();
        self.glyphs.clear();
        self.markers.clear();
        self.fill_rect(Vec2::ZERO, self.canvas.width, self.canvas.height, self.background);
    }

    fn draw_guide_path(&mut self, path: &GuidePath, style: &GuideStyle) {
        let color = VectorColor::from_css(&style.color);
        for dash in dash_polyline(&path.points, style.dash) {
            self.stroke_round(&dash, style.width, color);
        }
        for (marker, at) in [(EndpointMarker::Start, path.start), (EndpointMarker::End, path.end)] {
            self.fill_circle(at, MARKER_RADIUS, color.with_alpha(0.35));
            self.markers.push((marker, at));
        }
    }

    fn draw_ink_dot(&mut self, at: Vec2, ink: &InkStyle) {
        self.fill_circle(at, ink.dot_radius, VectorColor::from_css(&ink.color));
    }

    fn draw_ink_segment(&mut self, from: Vec2, to: Vec2, ink: &InkStyle) {
        self.stroke_round(&[from, to], ink.stroke_width, VectorColor::from_css(&ink.color));
    }

    fn draw_glyph_template(&mut self, template: &GlyphTemplate) {
        self.glyphs.push(template.clone());
    }
}
