use std::io::Read as _;

use flate2::read::ZlibDecoder;

use crate::foundation::error::{SvgaError, SvgaResult};

/// Inflate a zlib-wrapped DEFLATE stream.
#[tracing::instrument(skip(bytes), fields(compressed = bytes.len()))]
pub fn inflate(bytes: &[u8]) -> SvgaResult<Vec<u8>> {
    let mut out = Vec::with_capacity(bytes.len().saturating_mul(4));
    ZlibDecoder::new(bytes)
        .read_to_end(&mut out)
        .map_err(|e| SvgaError::corrupt(format!("inflate failed: {e}")))?;
    tracing::debug!(inflated = out.len(), "inflated container");
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/decode/inflate.rs"]
mod tests;
