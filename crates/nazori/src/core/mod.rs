pub mod session;
pub mod timer;

pub use session::{SessionController, SessionPhase, SessionState, SessionTimer, TimerKind};
pub use timer::{TimerHandle, TimerQueue};
