//! Playback engine, its configuration surface and its collaborators.

pub mod engine;
pub mod events;
pub mod options;
pub mod renderer;

pub use engine::Player;
pub use events::{EventBus, PlayerEvent};
pub use options::{FillMode, LoopSetting, PlayMode, PlayerOptions, PlayerSettings};
pub use renderer::Renderer;
