use prost::Message as _;

use crate::{
    decode::{assets::AssetPolicy, assets::transcode_images, inflate::inflate},
    format::schema::MovieEntity,
    foundation::error::{SvgaError, SvgaResult},
    scene::{build::build_scene, model::SceneDocument},
};

/// Options for one pass of the decode pipeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    pub asset_policy: AssetPolicy,
}

/// Run the full pipeline on one compressed container.
///
/// The caller is expected to have rejected empty and legacy inputs already; this
/// function only sees the 2.x payload.
#[tracing::instrument(skip(bytes, opts), fields(len = bytes.len()))]
pub fn decode_container(bytes: &[u8], opts: &DecodeOptions) -> SvgaResult<SceneDocument> {
    let raw = inflate(bytes)?;
    let mut movie = MovieEntity::decode(raw.as_slice())
        .map_err(|e| SvgaError::corrupt(format!("movie entity decode failed: {e}")))?;

    let raw_images = std::mem::take(&mut movie.images);
    let (images, asset_issues) = transcode_images(raw_images, opts.asset_policy)?;

    let scene = build_scene(movie, images, asset_issues)?;
    tracing::debug!(
        frames = scene.frame_count,
        fps = scene.fps.get(),
        sprites = scene.sprites.len(),
        images = scene.images.len(),
        "decoded scene"
    );
    Ok(scene)
}

#[cfg(test)]
#[path = "../../tests/unit/decode/worker.rs"]
mod tests;
