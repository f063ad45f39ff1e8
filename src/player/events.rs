use std::sync::mpsc::{self, Receiver, Sender};

/// Zero-argument notifications produced by a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerEvent {
    Start,
    Resume,
    /// The current frame changed during playback.
    Process,
    Pause,
    Stop,
    /// The animator finished its last loop.
    End,
    Clear,
}

impl PlayerEvent {
    pub fn name(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Resume => "resume",
            Self::Process => "process",
            Self::Pause => "pause",
            Self::Stop => "stop",
            Self::End => "end",
            Self::Clear => "clear",
        }
    }
}

/// Fan-out of player events to any number of channel subscribers.
#[derive(Debug, Default)]
pub struct EventBus {
    subscribers: Vec<Sender<PlayerEvent>>,
}

impl EventBus {
    pub fn subscribe(&mut self) -> Receiver<PlayerEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Deliver `event` to every live subscriber, pruning dropped ones.
    pub fn emit(&mut self, event: PlayerEvent) {
        self.subscribers.retain(|tx| tx.send(event).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/player/events.rs"]
mod tests;
