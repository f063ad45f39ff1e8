use std::{fmt, str::FromStr};

use crate::animation::{
    animator::{FillRule, LoopCount},
    ticker::TickSourceKind,
};

/// `loop` option: a flag or an exact count.
///
/// `true` and non-positive counts loop forever; `false` plays once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum LoopSetting {
    Flag(bool),
    Count(i64),
}

impl LoopSetting {
    pub fn loop_count(self) -> LoopCount {
        match self {
            Self::Flag(true) => LoopCount::Infinite,
            Self::Flag(false) => LoopCount::Finite(1),
            Self::Count(n) if n <= 0 => LoopCount::Infinite,
            Self::Count(n) => LoopCount::Finite(u32::try_from(n).unwrap_or(u32::MAX)),
        }
    }
}

impl Default for LoopSetting {
    fn default() -> Self {
        Self::Flag(true)
    }
}

impl FromStr for LoopSetting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "true" => Ok(Self::Flag(true)),
            "false" => Ok(Self::Flag(false)),
            other => other
                .parse::<i64>()
                .map(Self::Count)
                .map_err(|_| format!("expected true, false or an integer, got '{other}'")),
        }
    }
}

impl fmt::Display for LoopSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(b) => write!(f, "{b}"),
            Self::Count(n) => write!(f, "{n}"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillMode {
    #[default]
    Forwards,
    Backwards,
}

impl FillMode {
    pub fn fill_rule(self) -> FillRule {
        match self {
            Self::Forwards => FillRule::ToEnd,
            Self::Backwards => FillRule::ToStart,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayMode {
    #[default]
    Forwards,
    /// Reverse traversal of the frame range.
    Fallbacks,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
/// Partial update for [`PlayerSettings`]; absent fields leave settings unchanged.
pub struct PlayerOptions {
    #[serde(rename = "loop", skip_serializing_if = "Option::is_none")]
    pub loop_setting: Option<LoopSetting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_mode: Option<FillMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub play_mode: Option<PlayMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_frame: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_frame: Option<u32>,
    /// Carried through for renderers; the engine does not interpret it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_frames: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intersection_observer_render: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_execution_delay: Option<bool>,
}

impl PlayerOptions {
    /// Overlay `other` on top of `self`; fields set in `other` win.
    pub fn merged(self, other: PlayerOptions) -> Self {
        Self {
            loop_setting: other.loop_setting.or(self.loop_setting),
            fill_mode: other.fill_mode.or(self.fill_mode),
            play_mode: other.play_mode.or(self.play_mode),
            start_frame: other.start_frame.or(self.start_frame),
            end_frame: other.end_frame.or(self.end_frame),
            cache_frames: other.cache_frames.or(self.cache_frames),
            intersection_observer_render: other
                .intersection_observer_render
                .or(self.intersection_observer_render),
            no_execution_delay: other.no_execution_delay.or(self.no_execution_delay),
        }
    }
}

/// Effective playback configuration held by a player.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSettings {
    #[serde(rename = "loop")]
    pub loop_setting: LoopSetting,
    pub fill_mode: FillMode,
    pub play_mode: PlayMode,
    /// First frame of the range; `0` means the scene start.
    pub start_frame: u32,
    /// Last frame of the range; `0` means the scene end.
    pub end_frame: u32,
    pub cache_frames: bool,
    pub intersection_observer_render: bool,
    pub no_execution_delay: bool,
}

impl PlayerSettings {
    /// Merge a partial update.
    ///
    /// A `startFrame` or `endFrame` of `0` never overrides an existing value.
    pub fn apply(&mut self, opts: &PlayerOptions) {
        if let Some(l) = opts.loop_setting {
            self.loop_setting = l;
        }
        if let Some(m) = opts.fill_mode {
            self.fill_mode = m;
        }
        if let Some(m) = opts.play_mode {
            self.play_mode = m;
        }
        if let Some(c) = opts.cache_frames {
            self.cache_frames = c;
        }
        if let Some(sf) = opts.start_frame.filter(|&f| f > 0) {
            self.start_frame = sf;
        }
        if let Some(ef) = opts.end_frame.filter(|&f| f > 0) {
            self.end_frame = ef;
        }
        if let Some(r) = opts.intersection_observer_render {
            self.intersection_observer_render = r;
        }
        if let Some(d) = opts.no_execution_delay {
            self.no_execution_delay = d;
        }
    }

    pub fn tick_source_kind(&self) -> TickSourceKind {
        if self.no_execution_delay {
            TickSourceKind::FixedCadence
        } else {
            TickSourceKind::DisplayRefresh
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/player/options.rs"]
mod tests;
