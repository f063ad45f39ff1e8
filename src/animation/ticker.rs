//! Tick sources that pace the animator.
//!
//! A tick carries no data; on every tick the owner reads its [`Clock`] and lets
//! the animator compute the new position. Sources differ only in *when* ticks
//! arrive:
//!
//! - [`DisplayRefresh`] is passive. The host forwards its display refresh through
//!   a [`RefreshSignal`], so ticking stalls whenever the host stops refreshing.
//! - [`FixedCadence`] owns a timer thread that fires about every
//!   [`FRAME_INTERVAL`] regardless of host visibility.
//! - [`SteppedClock`] advances a [`ManualClock`] by a fixed step per tick, for
//!   deterministic simulation.
//!
//! [`Clock`]: crate::animation::clock::Clock

use std::{
    sync::mpsc::{self, Receiver, SyncSender, TrySendError},
    thread,
    time::Duration,
};

use anyhow::Context as _;

use crate::{animation::clock::ManualClock, foundation::error::SvgaResult};

/// Cadence of the fixed timer, one 60 Hz frame.
pub const FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

pub trait TickSource: Send {
    /// Block until the next tick. `false` means the source is closed and will not
    /// tick again.
    fn next_tick(&mut self) -> bool;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TickSourceKind {
    #[default]
    DisplayRefresh,
    FixedCadence,
}

/// Background timer ticking at a fixed interval.
///
/// Dropping it stops the timer; the thread notices on its next beat and exits.
#[derive(Debug)]
pub struct FixedCadence {
    rx: Receiver<()>,
}

impl FixedCadence {
    pub fn spawn(interval: Duration) -> SvgaResult<Self> {
        // Capacity 1: a slow consumer sees coalesced ticks, never a backlog.
        let (tx, rx) = mpsc::sync_channel(1);
        thread::Builder::new()
            .name("svga-tick".to_string())
            .spawn(move || {
                loop {
                    thread::sleep(interval);
                    match tx.try_send(()) {
                        Ok(()) | Err(TrySendError::Full(())) => {}
                        Err(TrySendError::Disconnected(())) => break,
                    }
                }
            })
            .context("spawn fixed-cadence tick thread")?;
        Ok(Self { rx })
    }
}

impl TickSource for FixedCadence {
    fn next_tick(&mut self) -> bool {
        self.rx.recv().is_ok()
    }
}

/// Passive tick source fed by host refresh notifications.
#[derive(Debug)]
pub struct DisplayRefresh {
    rx: Receiver<()>,
}

/// Host-side handle used to announce a display refresh.
#[derive(Clone, Debug)]
pub struct RefreshSignal {
    tx: SyncSender<()>,
}

impl DisplayRefresh {
    pub fn new() -> (Self, RefreshSignal) {
        let (tx, rx) = mpsc::sync_channel(1);
        (Self { rx }, RefreshSignal { tx })
    }
}

impl TickSource for DisplayRefresh {
    fn next_tick(&mut self) -> bool {
        self.rx.recv().is_ok()
    }
}

impl RefreshSignal {
    /// Announce a refresh. Refreshes that arrive before the previous one was
    /// consumed are merged. Returns `false` once the tick source is gone.
    pub fn notify(&self) -> bool {
        !matches!(self.tx.try_send(()), Err(TrySendError::Disconnected(())))
    }
}

/// Simulated time: every tick moves `clock` forward by `step_ms`.
#[derive(Clone, Debug)]
pub struct SteppedClock {
    clock: ManualClock,
    step_ms: f64,
    remaining: Option<u64>,
}

impl SteppedClock {
    pub fn new(clock: ManualClock, step_ms: f64) -> Self {
        Self {
            clock,
            step_ms,
            remaining: None,
        }
    }

    /// Close the source after `ticks` ticks.
    pub fn with_limit(mut self, ticks: u64) -> Self {
        self.remaining = Some(ticks);
        self
    }

    pub fn clock(&self) -> &ManualClock {
        &self.clock
    }
}

impl TickSource for SteppedClock {
    fn next_tick(&mut self) -> bool {
        if let Some(n) = self.remaining.as_mut() {
            if *n == 0 {
                return false;
            }
            *n -= 1;
        }
        self.clock.advance(self.step_ms);
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ticker.rs"]
mod tests;
