use std::sync::mpsc::{self, Receiver, TryRecvError};

use crate::{
    foundation::error::{SvgaError, SvgaResult},
    scene::model::SceneDocument,
};

/// Single-response handle for one decode request.
///
/// Exactly one result is ever delivered. Offloaded and inline decodes produce the
/// same handle type; the only observable difference is when the result arrives.
#[derive(Debug)]
pub struct PendingScene {
    rx: Receiver<SvgaResult<SceneDocument>>,
    done: bool,
}

impl PendingScene {
    pub(crate) fn channel() -> (mpsc::SyncSender<SvgaResult<SceneDocument>>, Self) {
        let (tx, rx) = mpsc::sync_channel(1);
        (tx, Self { rx, done: false })
    }

    /// A handle that is already settled with `result`.
    pub fn ready(result: SvgaResult<SceneDocument>) -> Self {
        let (tx, pending) = Self::channel();
        // Capacity 1 and the receiver is alive, so this cannot fail.
        let _ = tx.send(result);
        pending
    }

    pub fn rejected(err: SvgaError) -> Self {
        Self::ready(Err(err))
    }

    /// Block until the decode finishes.
    pub fn wait(self) -> SvgaResult<SceneDocument> {
        if self.done {
            return Err(SvgaError::invalid_input("decode result already taken"));
        }
        self.rx.recv().unwrap_or_else(|_| Err(dropped()))
    }

    /// Take the result if it has arrived. Returns `None` while the decode is still
    /// running, and forever after the result has been taken once.
    pub fn try_take(&mut self) -> Option<SvgaResult<SceneDocument>> {
        if self.done {
            return None;
        }
        let out = match self.rx.try_recv() {
            Ok(res) => res,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(dropped()),
        };
        self.done = true;
        Some(out)
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}

fn dropped() -> SvgaError {
    SvgaError::worker_unavailable("decode worker exited without a response")
}

#[cfg(test)]
#[path = "../../tests/unit/parser/pending.rs"]
mod tests;
