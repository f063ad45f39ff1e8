use std::sync::Arc;

use crate::{
    foundation::core::{Canvas, FrameIndex},
    foundation::error::SvgaResult,
    scene::model::SceneDocument,
};

/// Drawing collaborator driven by a [`Player`](crate::Player).
///
/// The player never rasterizes anything itself. It tells the renderer which scene
/// is mounted and which frame to show; how that frame reaches a surface is up to
/// the implementation.
pub trait Renderer {
    /// Whether a drawing surface is attached. A player refuses to build around a
    /// renderer without one.
    fn has_surface(&self) -> bool {
        true
    }

    /// Get ready to draw `scene`. Called once per mount, before any draw.
    fn prepare(&mut self, scene: &Arc<SceneDocument>) -> SvgaResult<()>;

    fn clear(&mut self);

    /// Match the surface to the scene's canvas.
    fn resize(&mut self, canvas: Canvas);

    /// Show `frame`. `visible` is `false` while the viewport gate is closed; the
    /// player keeps timing regardless, and the renderer should skip the actual draw.
    fn draw_frame(&mut self, frame: FrameIndex, visible: bool);
}
