pub mod traits;

// Re-export key types for convenient access
pub use traits::{
    AudioOut, Decorations, EndpointMarker, GlyphTemplate, Presenter, Screens, Surface,
};
