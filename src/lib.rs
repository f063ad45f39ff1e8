#![forbid(unsafe_code)]
//! Decoding and playback timing for SVGA 2.x animation containers.
//!
//! A [`Parser`] turns compressed container bytes into an immutable
//! [`SceneDocument`]. A [`Player`] mounts that scene and drives a
//! [`Renderer`] frame by frame from wall-clock (or simulated) time.

pub mod animation;
pub mod decode;
pub mod format;
pub mod foundation;
pub mod parser;
pub mod player;
pub mod scene;

pub use animation::{
    Animator, AnimatorRun, AnimatorSignal, AnimatorState, Clock, DisplayRefresh, FRAME_INTERVAL,
    FillRule, FixedCadence, LoopCount, ManualClock, MonotonicClock, RefreshSignal, SteppedClock,
    TickSource, TickSourceKind,
};
pub use decode::{AssetPolicy, DecodeOptions, decode_container};
pub use foundation::core::{Canvas, Fps, FrameIndex, Rgba};
pub use foundation::error::{SvgaError, SvgaResult};
pub use parser::{
    DecodeBackend, InlineBackend, Parser, ParserConfig, PendingScene, WorkerPoolBackend,
};
pub use player::{
    FillMode, LoopSetting, PlayMode, Player, PlayerEvent, PlayerOptions, PlayerSettings, Renderer,
};
pub use scene::model::{
    AssetIssue, AudioClip, ImageAsset, SceneDocument, Shape, ShapeKind, ShapeStyle, Sprite,
    SpriteFrame,
};
