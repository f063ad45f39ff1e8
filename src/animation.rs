pub mod animator;
pub mod clock;
pub mod ticker;

pub use animator::{Animator, AnimatorRun, AnimatorSignal, AnimatorState, FillRule, LoopCount};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use ticker::{
    DisplayRefresh, FRAME_INTERVAL, FixedCadence, RefreshSignal, SteppedClock, TickSource,
    TickSourceKind,
};
