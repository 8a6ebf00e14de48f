//! Guide geometry for the paths mini-game.
//!
//! Stages are authored in a fixed 400×400 design space and scaled to the
//! actual canvas independently in X and Y. Spiral radii scale by the smaller
//! factor so the spiral stays round on non-square canvases.

use std::f32::consts::PI;

use glam::Vec2;

use crate::api::types::CanvasSize;
use crate::assets::stages::Stage;

/// Side of the square design space stages are authored in.
pub const DESIGN_SIZE: f32 = 400.0;

/// Total sweep of a spiral stage (three full turns).
pub const SPIRAL_SWEEP: f32 = 6.0 * PI;

/// Angle increment between generated spiral points.
pub const SPIRAL_STEP: f32 = 0.1;

/// Ordered guide points in canvas space, plus the anchors for the
/// start/end markers. Always holds at least two points.
#[derive(Debug, Clone, PartialEq)]
pub struct GuidePath {
    pub points: Vec<Vec2>,
    pub start: Vec2,
    pub end: Vec2,
}

impl GuidePath {
    fn from_points(points: Vec<Vec2>) -> Self {
        let start = points.first().copied().unwrap_or(Vec2::ZERO);
        let end = points.last().copied().unwrap_or(start);
        Self { points, start, end }
    }

    /// Consecutive point pairs, in drawing order.
    pub fn segments(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Number of points a spiral guide produces: one per angle step in [0, 6π).
pub fn spiral_point_count() -> usize {
    (SPIRAL_SWEEP / SPIRAL_STEP).ceil() as usize
}

/// Computes guide paths for stages.
pub struct PathRenderer;

impl PathRenderer {
    /// Resolve a stage into canvas-space guide points.
    pub fn render(stage: &Stage, canvas: CanvasSize) -> GuidePath {
        let scale = Vec2::new(canvas.width / DESIGN_SIZE, canvas.height / DESIGN_SIZE);

        match stage {
            Stage::Line { start, end } => GuidePath::from_points(vec![*start * scale, *end * scale]),
            Stage::Zigzag { points } => {
                let mut scaled: Vec<Vec2> = points.iter().map(|p| *p * scale).collect();
                // A one-point zigzag still needs two anchors.
                if scaled.len() == 1 {
                    scaled.push(scaled[0]);
                }
                GuidePath::from_points(scaled)
            }
            Stage::Spiral { center, max_radius } => {
                let c = *center * scale;
                let max_r = max_radius * scale.x.min(scale.y);
                let points = (0..spiral_point_count())
                    .map(|i| {
                        let angle = i as f32 * SPIRAL_STEP;
                        let r = (angle / SPIRAL_SWEEP) * max_r;
                        c + Vec2::new(angle.cos(), angle.sin()) * r
                    })
                    .collect();
                GuidePath::from_points(points)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::stages::StageCatalog;

    const SQUARE: CanvasSize = CanvasSize::new(400.0, 400.0);

    fn close(a: Vec2, b: Vec2) -> bool {
        a.distance(b) < 1e-3
    }

    #[test]
    fn every_builtin_stage_has_anchored_path() {
        for stage in StageCatalog::builtin().iter() {
            let path = PathRenderer::render(stage, SQUARE);
            assert!(path.len() >= 2, "{} produced {} points", stage.kind_name(), path.len());
            assert_eq!(path.start, path.points[0]);
            assert_eq!(path.end, *path.points.last().unwrap());
        }
    }

    #[test]
    fn line_scales_per_axis() {
        let stage = Stage::Line {
            start: Vec2::new(50.0, 200.0),
            end: Vec2::new(350.0, 200.0),
        };
        let path = PathRenderer::render(&stage, CanvasSize::new(800.0, 200.0));
        assert_eq!(path.points, vec![Vec2::new(100.0, 100.0), Vec2::new(700.0, 100.0)]);
    }

    #[test]
    fn zigzag_keeps_every_point_in_order() {
        let catalog = StageCatalog::builtin();
        let path = PathRenderer::render(catalog.get(2).unwrap(), CanvasSize::new(200.0, 400.0));
        assert_eq!(
            path.points,
            vec![
                Vec2::new(25.0, 100.0),
                Vec2::new(75.0, 300.0),
                Vec2::new(125.0, 100.0),
                Vec2::new(175.0, 300.0),
            ]
        );
        assert_eq!(path.segments().count(), 3);
    }

    #[test]
    fn spiral_point_count_is_deterministic() {
        assert_eq!(spiral_point_count(), 189);
        let catalog = StageCatalog::builtin();
        let spiral = catalog.get(3).unwrap();
        for canvas in [SQUARE, CanvasSize::new(320.0, 480.0), CanvasSize::new(1024.0, 768.0)] {
            assert_eq!(PathRenderer::render(spiral, canvas).len(), 189);
        }
    }

    #[test]
    fn spiral_starts_at_center_and_grows() {
        let stage = Stage::Spiral {
            center: Vec2::new(200.0, 200.0),
            max_radius: 120.0,
        };
        let path = PathRenderer::render(&stage, SQUARE);
        assert!(close(path.start, Vec2::new(200.0, 200.0)));
        let last_r = path.end.distance(Vec2::new(200.0, 200.0));
        let expected = (188.0 * SPIRAL_STEP / SPIRAL_SWEEP) * 120.0;
        assert!((last_r - expected).abs() < 1e-2, "last radius {last_r}, expected {expected}");
        assert!(last_r <= 120.0);
    }

    #[test]
    fn spiral_radius_uses_smaller_scale() {
        let stage = Stage::Spiral {
            center: Vec2::new(200.0, 200.0),
            max_radius: 120.0,
        };
        // scale x = 2, y = 1: center stretches, radius follows y.
        let path = PathRenderer::render(&stage, CanvasSize::new(800.0, 400.0));
        let center = Vec2::new(400.0, 200.0);
        assert!(close(path.start, center));
        let max_r = path
            .points
            .iter()
            .map(|p| p.distance(center))
            .fold(0.0_f32, f32::max);
        assert!(max_r <= 120.0 + 1e-3, "max radius {max_r}");
    }
}
