//! Entry point for turning container bytes into a [`SceneDocument`].
//!
//! The [`Parser`] validates input up front, then hands the bytes to its
//! [`DecodeBackend`]. Both backends return a [`PendingScene`], so callers see the
//! same contract whether the decode ran on a worker thread or inline.

pub mod backend;
pub mod pending;

use std::{path::Path, sync::Arc};

use anyhow::Context as _;

use crate::{
    decode::{assets::AssetPolicy, worker::DecodeOptions},
    format::signature::is_legacy_container,
    foundation::error::{SvgaError, SvgaResult},
    scene::model::SceneDocument,
};

pub use backend::{DecodeBackend, InlineBackend, WorkerPoolBackend};
pub use pending::PendingScene;

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
/// Construction-time parser settings.
pub struct ParserConfig {
    /// Decode on the caller's thread instead of a worker pool.
    pub disable_worker: bool,
    /// Worker pool size. `None` lets rayon decide.
    pub worker_threads: Option<usize>,
    pub asset_policy: AssetPolicy,
}

impl ParserConfig {
    fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            asset_policy: self.asset_policy,
        }
    }
}

pub struct Parser {
    backend: Option<Box<dyn DecodeBackend>>,
}

impl Parser {
    /// Build a parser with the backend selected by `config`.
    ///
    /// If the worker pool cannot be created the parser falls back to inline
    /// decoding, which keeps the same asynchronous contract.
    pub fn new(config: ParserConfig) -> SvgaResult<Self> {
        let opts = config.decode_options();
        let backend: Box<dyn DecodeBackend> = if config.disable_worker {
            Box::new(InlineBackend::new(opts))
        } else {
            match WorkerPoolBackend::new(config.worker_threads, opts) {
                Ok(pool) => Box::new(pool),
                Err(SvgaError::WorkerUnavailable(reason)) => {
                    tracing::warn!(%reason, "decode worker unavailable, decoding inline");
                    Box::new(InlineBackend::new(opts))
                }
                Err(e) => return Err(e),
            }
        };
        tracing::debug!(backend = backend.name(), "parser ready");
        Ok(Self::with_backend(backend))
    }

    pub fn with_backend(backend: Box<dyn DecodeBackend>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// Start decoding `bytes`.
    ///
    /// Validation failures (empty input, legacy signature, destroyed parser) are
    /// returned as already-rejected handles and never reach the backend.
    pub fn decode(&self, bytes: impl Into<Arc<[u8]>>) -> PendingScene {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return PendingScene::rejected(SvgaError::invalid_input("input buffer is empty"));
        }
        if is_legacy_container(&bytes) {
            tracing::debug!("rejecting legacy 1.x container");
            return PendingScene::rejected(SvgaError::UnsupportedVersion);
        }
        let Some(backend) = self.backend.as_ref().filter(|b| b.is_available()) else {
            return PendingScene::rejected(SvgaError::worker_unavailable(
                "parser has no decode backend",
            ));
        };
        backend.submit(bytes)
    }

    /// Read `path` and decode its contents.
    pub fn decode_file(&self, path: impl AsRef<Path>) -> PendingScene {
        let path = path.as_ref();
        match std::fs::read(path).with_context(|| format!("read svga file '{}'", path.display())) {
            Ok(bytes) => self.decode(bytes),
            Err(e) => PendingScene::rejected(e.into()),
        }
    }

    /// Decode and wait for the result.
    pub fn decode_blocking(&self, bytes: impl Into<Arc<[u8]>>) -> SvgaResult<SceneDocument> {
        self.decode(bytes).wait()
    }

    pub fn backend_name(&self) -> Option<&'static str> {
        self.backend.as_ref().map(|b| b.name())
    }

    /// Release the decode facility. Safe to call repeatedly.
    pub fn destroy(&mut self) {
        if let Some(mut backend) = self.backend.take() {
            backend.shutdown();
            tracing::debug!(backend = backend.name(), "parser destroyed");
        }
    }
}

impl Drop for Parser {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
#[path = "../tests/unit/parser.rs"]
mod tests;
