use std::collections::BTreeMap;

use crate::foundation::core::{Affine, Canvas, Fps, FrameIndex, Point, Rect, Rgba};

#[derive(Clone, Debug, serde::Serialize)]
/// Decoded, immutable description of one SVGA movie.
///
/// Produced once per decode call. Players share it behind an `Arc` and never
/// mutate it, so the renderer can read it concurrently with the engine.
pub struct SceneDocument {
    /// Format version string written by the exporter (may be empty).
    pub version: String,
    /// Playback rate.
    pub fps: Fps,
    /// Total number of frames, always `>= 1`.
    pub frame_count: u32,
    /// Canvas (view box) size.
    pub canvas: Canvas,
    /// Sprites in painter's order.
    pub sprites: Vec<Sprite>,
    /// Image payloads keyed by asset key, transcoded to base64.
    pub images: BTreeMap<String, ImageAsset>,
    /// Audio cues referencing entries of `images` by key.
    pub audios: Vec<AudioClip>,
    /// Assets dropped under [`AssetPolicy::SkipAndReport`](crate::AssetPolicy).
    pub asset_issues: Vec<AssetIssue>,
}

impl SceneDocument {
    /// Length of one pass over every frame, in milliseconds.
    pub fn duration_ms(&self) -> f64 {
        self.fps.frames_to_ms(self.frame_count)
    }

    pub fn last_frame(&self) -> FrameIndex {
        FrameIndex(self.frame_count.saturating_sub(1))
    }

    pub fn image(&self, key: &str) -> Option<&ImageAsset> {
        self.images.get(key)
    }
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct Sprite {
    /// Key into [`SceneDocument::images`]; may also name a vector-only sprite.
    pub image_key: String,
    /// Key of the sprite used as this sprite's mask, if any.
    pub matte_key: Option<String>,
    /// One entry per movie frame (exporters may write fewer).
    pub frames: Vec<SpriteFrame>,
}

impl Sprite {
    pub fn frame(&self, index: FrameIndex) -> Option<&SpriteFrame> {
        self.frames.get(index.as_usize())
    }
}

#[derive(Clone, Debug, serde::Serialize)]
/// Per-frame placement of a sprite.
pub struct SpriteFrame {
    /// Opacity in `[0, 1]`; `0` hides the sprite for this frame.
    pub alpha: f64,
    /// Untransformed layout box.
    pub layout: Rect,
    pub transform: Affine,
    /// Axis-aligned bounds of `layout` after `transform`.
    pub bounds: Rect,
    /// SVG path data clipping the sprite.
    pub clip_path: Option<String>,
    /// Vector shapes, with `KEEP` markers already resolved.
    pub shapes: Vec<Shape>,
}

impl SpriteFrame {
    pub fn is_visible(&self) -> bool {
        self.alpha > 0.0
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Shape {
    pub kind: ShapeKind,
    pub style: Option<ShapeStyle>,
    pub transform: Affine,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub enum ShapeKind {
    /// SVG path data.
    Path { d: String },
    Rect { rect: Rect, corner_radius: f64 },
    Ellipse {
        center: Point,
        radius_x: f64,
        radius_y: f64,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ShapeStyle {
    pub fill: Option<Rgba>,
    pub stroke: Option<Rgba>,
    pub stroke_width: f64,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    pub miter_limit: f64,
    /// Dash pattern `[dash, gap, offset]`; all zero means solid.
    pub dash: [f64; 3],
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct AudioClip {
    pub key: String,
    pub start_frame: u32,
    pub end_frame: u32,
    pub start_time_ms: u32,
    pub total_time_ms: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
/// Image payload in a text-safe encoding, ready to be used as a URI.
pub struct ImageAsset {
    /// MIME type sniffed from the payload; `image/png` when unrecognized.
    pub mime: String,
    /// Standard-alphabet base64 of the raw payload.
    pub base64: String,
    /// Size of the raw payload before encoding.
    pub byte_len: usize,
}

impl ImageAsset {
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, self.base64)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
/// An asset that failed post-processing and was left out of the scene.
pub struct AssetIssue {
    pub key: String,
    pub reason: String,
}
