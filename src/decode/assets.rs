use std::collections::{BTreeMap, HashMap};

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64_STANDARD};

use crate::{
    foundation::error::{SvgaError, SvgaResult},
    scene::model::{AssetIssue, ImageAsset},
};

const FALLBACK_MIME: &str = "image/png";

/// What to do when a single image asset cannot be post-processed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AssetPolicy {
    /// The first bad asset fails the whole decode with `CorruptData`.
    #[default]
    Strict,
    /// Bad assets are left out of the scene and listed in `asset_issues`.
    SkipAndReport,
}

/// Transcode every raw image payload into base64 with a sniffed MIME type.
///
/// Keys are returned in sorted order. Under [`AssetPolicy::SkipAndReport`] the
/// second element lists the keys that were dropped.
#[tracing::instrument(skip(images), fields(count = images.len()))]
pub fn transcode_images(
    images: HashMap<String, Vec<u8>>,
    policy: AssetPolicy,
) -> SvgaResult<(BTreeMap<String, ImageAsset>, Vec<AssetIssue>)> {
    let mut out = BTreeMap::new();
    let mut issues = Vec::new();

    // Sorted so that strict mode reports the same key on every run.
    let mut entries: Vec<_> = images.into_iter().collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    for (key, bytes) in entries {
        match transcode_one(&bytes) {
            Ok(asset) => {
                out.insert(key, asset);
            }
            Err(reason) => match policy {
                AssetPolicy::Strict => {
                    return Err(SvgaError::corrupt(format!("image asset '{key}': {reason}")));
                }
                AssetPolicy::SkipAndReport => {
                    tracing::warn!(key = %key, %reason, "skipping image asset");
                    issues.push(AssetIssue { key, reason });
                }
            },
        }
    }

    Ok((out, issues))
}

fn transcode_one(bytes: &[u8]) -> Result<ImageAsset, String> {
    if bytes.is_empty() {
        return Err("empty payload".to_string());
    }
    let mime = image::guess_format(bytes)
        .map(|f| f.to_mime_type())
        .unwrap_or(FALLBACK_MIME);
    Ok(ImageAsset {
        mime: mime.to_string(),
        base64: BASE64_STANDARD.encode(bytes),
        byte_len: bytes.len(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/decode/assets.rs"]
mod tests;
