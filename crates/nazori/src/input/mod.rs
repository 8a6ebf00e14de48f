pub mod pointer;
pub mod queue;

pub use pointer::CanvasRect;
pub use queue::{InputEvent, InputQueue};
