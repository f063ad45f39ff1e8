use std::sync::Arc;

use crate::{
    decode::worker::{DecodeOptions, decode_container},
    foundation::error::{SvgaError, SvgaResult},
    parser::pending::PendingScene,
};

/// Something that can run the decode pipeline and hand back a [`PendingScene`].
///
/// Implementations are chosen when the parser is built; the parser never swaps
/// one for another afterward.
pub trait DecodeBackend: Send {
    /// Queue one decode. Each call gets its own independent response.
    fn submit(&self, bytes: Arc<[u8]>) -> PendingScene;

    /// Release the facility. Idempotent.
    fn shutdown(&mut self);

    fn is_available(&self) -> bool;

    fn name(&self) -> &'static str;
}

/// Decodes on a dedicated rayon pool, off the caller's thread.
pub struct WorkerPoolBackend {
    pool: Option<rayon::ThreadPool>,
    opts: DecodeOptions,
}

impl WorkerPoolBackend {
    pub fn new(threads: Option<usize>, opts: DecodeOptions) -> SvgaResult<Self> {
        Ok(Self {
            pool: Some(build_thread_pool(threads)?),
            opts,
        })
    }
}

impl DecodeBackend for WorkerPoolBackend {
    fn submit(&self, bytes: Arc<[u8]>) -> PendingScene {
        let Some(pool) = self.pool.as_ref() else {
            return PendingScene::rejected(SvgaError::worker_unavailable(
                "decode worker pool has been shut down",
            ));
        };
        let (tx, pending) = PendingScene::channel();
        let opts = self.opts;
        pool.spawn(move || {
            let res = decode_container(&bytes, &opts);
            // The caller may have dropped its handle; nothing to deliver then.
            let _ = tx.send(res);
        });
        pending
    }

    fn shutdown(&mut self) {
        if self.pool.take().is_some() {
            tracing::debug!("decode worker pool shut down");
        }
    }

    fn is_available(&self) -> bool {
        self.pool.is_some()
    }

    fn name(&self) -> &'static str {
        "worker"
    }
}

/// Runs the pipeline synchronously on the caller and returns a settled handle.
#[derive(Debug, Default)]
pub struct InlineBackend {
    opts: DecodeOptions,
    shut_down: bool,
}

impl InlineBackend {
    pub fn new(opts: DecodeOptions) -> Self {
        Self {
            opts,
            shut_down: false,
        }
    }
}

impl DecodeBackend for InlineBackend {
    fn submit(&self, bytes: Arc<[u8]>) -> PendingScene {
        if self.shut_down {
            return PendingScene::rejected(SvgaError::worker_unavailable(
                "inline decoder has been shut down",
            ));
        }
        PendingScene::ready(decode_container(&bytes, &self.opts))
    }

    fn shutdown(&mut self) {
        self.shut_down = true;
    }

    fn is_available(&self) -> bool {
        !self.shut_down
    }

    fn name(&self) -> &'static str {
        "inline"
    }
}

fn build_thread_pool(threads: Option<usize>) -> SvgaResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(SvgaError::invalid_input(
            "parser 'worker_threads' must be >= 1 when set",
        ));
    }
    let mut builder = rayon::ThreadPoolBuilder::new().thread_name(|i| format!("svga-decode-{i}"));
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| SvgaError::worker_unavailable(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/parser/backend.rs"]
mod tests;
