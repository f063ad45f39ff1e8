use crate::foundation::error::{SvgaError, SvgaResult};

pub use kurbo::{Affine, Point, Rect};

/// Zero-based index into a scene's frame sequence.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u32);

impl FrameIndex {
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// Integer frame rate. SVGA movies always carry whole frames per second.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps(u32);

impl Fps {
    pub fn new(fps: u32) -> SvgaResult<Self> {
        if fps == 0 {
            return Err(SvgaError::corrupt("fps must be > 0"));
        }
        Ok(Self(fps))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn frame_duration_ms(self) -> f64 {
        1000.0 / f64::from(self.0)
    }

    pub fn frames_to_ms(self, frames: u32) -> f64 {
        f64::from(frames) * self.frame_duration_ms()
    }
}

/// Drawing canvas size in scene units (the movie's view box).
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

/// Straight-alpha RGBA color with channels in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub fn to_rgba8(self) -> [u8; 4] {
        fn channel(v: f32) -> u8 {
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        [channel(self.r), channel(self.g), channel(self.b), channel(self.a)]
    }
}

/// Build an affine from the 2x3 matrix layout used by the container
/// (`a b c d tx ty`, column-major like the canvas `setTransform` call).
pub fn affine_from_parts(a: f32, b: f32, c: f32, d: f32, tx: f32, ty: f32) -> Affine {
    Affine::new([
        f64::from(a),
        f64::from(b),
        f64::from(c),
        f64::from(d),
        f64::from(tx),
        f64::from(ty),
    ])
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
