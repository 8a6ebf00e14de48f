use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ContentError;

/// One guided-path challenge, in the 400×400 design space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Stage {
    /// Straight line. Horizontal and vertical stages share this shape.
    Line { start: Vec2, end: Vec2 },
    /// Connected segments through every point in order.
    Zigzag { points: Vec<Vec2> },
    /// Archimedean spiral growing out of `center`.
    Spiral {
        center: Vec2,
        #[serde(rename = "maxRadius", alias = "max_radius")]
        max_radius: f32,
    },
}

impl Stage {
    /// Presentation name: "horizontal", "vertical", "zigzag" or "spiral".
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Line { start, end } => {
                let d = *end - *start;
                if d.y.abs() > d.x.abs() {
                    "vertical"
                } else {
                    "horizontal"
                }
            }
            Self::Zigzag { .. } => "zigzag",
            Self::Spiral { .. } => "spiral",
        }
    }

    /// Whether the stage can produce a guide path of at least two points.
    fn is_drawable(&self) -> bool {
        match self {
            Self::Line { .. } => true,
            Self::Zigzag { points } => points.len() >= 2,
            Self::Spiral { max_radius, .. } => *max_radius > 0.0,
        }
    }
}

/// Fixed, ordered sequence of stages. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct StageCatalog {
    stages: Vec<Stage>,
}

impl StageCatalog {
    /// The four stages of the lesson: horizontal, vertical, zigzag, spiral.
    pub fn builtin() -> Self {
        Self {
            stages: vec![
                Stage::Line {
                    start: Vec2::new(50.0, 200.0),
                    end: Vec2::new(350.0, 200.0),
                },
                Stage::Line {
                    start: Vec2::new(200.0, 50.0),
                    end: Vec2::new(200.0, 350.0),
                },
                Stage::Zigzag {
                    points: vec![
                        Vec2::new(50.0, 100.0),
                        Vec2::new(150.0, 300.0),
                        Vec2::new(250.0, 100.0),
                        Vec2::new(350.0, 300.0),
                    ],
                },
                Stage::Spiral {
                    center: Vec2::new(200.0, 200.0),
                    max_radius: 120.0,
                },
            ],
        }
    }

    /// Build a catalog from stages, rejecting ones that cannot be drawn.
    pub fn new(stages: Vec<Stage>) -> Result<Self, ContentError> {
        if stages.is_empty() {
            return Err(ContentError::EmptyCatalog);
        }
        if let Some(index) = stages.iter().position(|s| !s.is_drawable()) {
            return Err(ContentError::DegenerateStage { index });
        }
        Ok(Self { stages })
    }

    /// Parse a JSON array of stages, e.g.
    /// `[{"type":"line","start":[50,200],"end":[350,200]}]`.
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let stages: Vec<Stage> = serde_json::from_str(json)?;
        Self::new(stages)
    }

    pub fn get(&self, index: usize) -> Option<&Stage> {
        self.stages.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Stage> {
        self.stages.iter()
    }

    /// Number of stages. Never zero.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl Default for StageCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
