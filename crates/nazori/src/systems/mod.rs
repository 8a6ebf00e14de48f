pub mod completion;
pub mod draw;
pub mod effects;
pub mod path;
pub mod progress;
#[cfg(feature = "vectors")]
pub mod vector;
