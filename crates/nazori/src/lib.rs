pub mod api;
pub mod assets;
pub mod core;
pub mod games;
pub mod input;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::game::{GameConfig, GlyphStyle, GuideStyle, InkStyle, MiniGame};
pub use api::present::{Command, PresentContext};
pub use api::types::{
    CanvasSize, CelebrationCopy, Cue, LabelId, Mode, OverlayId, ProgressSlot, Resolution,
    ScreenId,
};
pub use assets::{
    CharacterPool, CharacterPools, ContentError, QuestionSet, Stage, StageCatalog,
    QUESTIONS_PER_LEVEL,
};
pub use crate::core::session::{SessionController, SessionPhase, SessionState};
pub use crate::core::timer::{TimerHandle, TimerQueue};
pub use games::{ActiveGame, PathsGame, TracingGame};
pub use input::{CanvasRect, InputEvent, InputQueue};
pub use renderer::{AudioOut, Decorations, EndpointMarker, GlyphTemplate, Presenter, Screens, Surface};
pub use systems::completion::{CompletionPhase, CompletionTimer};
pub use systems::draw::{DrawInput, DrawSession};
pub use systems::effects::{Decoration, DecorationId, DecorationKind, EffectsState, Rng};
pub use systems::path::{GuidePath, PathRenderer};
pub use systems::progress::{ProgressMarker, ProgressTracker};

#[cfg(feature = "vectors")]
pub use systems::vector::{dash_polyline, VectorColor, VectorSurface, VectorVertex};
