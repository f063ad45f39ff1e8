use std::sync::{Arc, mpsc::Receiver};

use crate::{
    animation::{
        animator::{Animator, AnimatorRun, AnimatorSignal},
        clock::{Clock, MonotonicClock},
        ticker::{TickSource, TickSourceKind},
    },
    foundation::core::FrameIndex,
    foundation::error::{SvgaError, SvgaResult},
    player::{
        events::{EventBus, PlayerEvent},
        options::{PlayMode, PlayerOptions, PlayerSettings},
        renderer::Renderer,
    },
    scene::model::SceneDocument,
};

/// Tolerance for mapping animated values to frames; back-projected resumes can
/// land a hair below the integer they started from.
const FRAME_EPSILON: f64 = 1e-9;

/// Playback engine: maps animator output onto frames of a mounted scene.
///
/// All state changes happen on the caller's thread, either through lifecycle
/// calls or through [`Player::tick`]. The renderer is told what to draw; events
/// are published to subscribers obtained from [`Player::subscribe`].
pub struct Player<R: Renderer> {
    renderer: Option<R>,
    scene: Option<Arc<SceneDocument>>,
    animator: Animator,
    clock: Arc<dyn Clock>,
    settings: PlayerSettings,
    events: EventBus,
    current_frame: u32,
    progress: f64,
    viewport_visible: bool,
    signals: Vec<AnimatorSignal>,
}

impl<R: Renderer> Player<R> {
    pub fn new(renderer: R) -> SvgaResult<Self> {
        Self::with_clock(renderer, Arc::new(MonotonicClock::new()))
    }

    /// Build a player reading time from `clock`.
    pub fn with_clock(renderer: R, clock: Arc<dyn Clock>) -> SvgaResult<Self> {
        if !renderer.has_surface() {
            return Err(SvgaError::invalid_container(
                "renderer has no drawing surface",
            ));
        }
        Ok(Self {
            renderer: Some(renderer),
            scene: None,
            animator: Animator::new(),
            clock,
            settings: PlayerSettings::default(),
            events: EventBus::default(),
            current_frame: 0,
            progress: 0.0,
            viewport_visible: true,
            signals: Vec::new(),
        })
    }

    /// Apply a partial options update. Takes effect on the next start/resume.
    pub fn set(&mut self, options: &PlayerOptions) {
        self.settings.apply(options);
        if !self.settings.intersection_observer_render {
            self.viewport_visible = true;
        }
    }

    pub fn subscribe(&mut self) -> Receiver<PlayerEvent> {
        self.events.subscribe()
    }

    /// Replace the mounted scene and reset playback state.
    #[tracing::instrument(skip_all)]
    pub fn mount(&mut self, scene: impl Into<Arc<SceneDocument>>) -> SvgaResult<()> {
        let scene = scene.into();
        let Some(renderer) = self.renderer.as_mut() else {
            return Err(SvgaError::invalid_container("player has been destroyed"));
        };
        self.animator.stop();

        renderer.prepare(&scene)?;
        renderer.clear();
        renderer.resize(scene.canvas);

        self.current_frame = 0;
        self.progress = 0.0;
        tracing::debug!(
            frames = scene.frame_count,
            fps = scene.fps.get(),
            "scene mounted"
        );
        self.scene = Some(scene);
        Ok(())
    }

    /// Play from the current frame after clearing the surface.
    pub fn start(&mut self) -> SvgaResult<()> {
        let bounds = self.run_bounds()?;
        if let Some(r) = self.renderer.as_mut() {
            r.clear();
        }
        self.start_animation(bounds, PlayerEvent::Start)
    }

    /// Continue from the current frame without clearing.
    pub fn resume(&mut self) -> SvgaResult<()> {
        let bounds = self.run_bounds()?;
        self.start_animation(bounds, PlayerEvent::Resume)
    }

    /// Halt playback, keeping the current frame.
    pub fn pause(&mut self) {
        self.animator.stop();
        tracing::debug!(frame = self.current_frame, "paused");
        self.events.emit(PlayerEvent::Pause);
    }

    /// Halt playback and show frame 0.
    pub fn stop(&mut self) {
        self.animator.stop();
        self.current_frame = 0;
        let visible = self.render_visible();
        if let Some(r) = self.renderer.as_mut() {
            r.draw_frame(FrameIndex(0), visible);
        }
        tracing::debug!("stopped");
        self.events.emit(PlayerEvent::Stop);
    }

    pub fn clear(&mut self) {
        self.animator.stop();
        if let Some(r) = self.renderer.as_mut() {
            r.clear();
        }
        tracing::debug!("cleared");
        self.events.emit(PlayerEvent::Clear);
    }

    /// Stop and release the renderer and scene. The player cannot mount again.
    pub fn destroy(&mut self) {
        self.animator.stop();
        if let Some(mut r) = self.renderer.take() {
            r.clear();
        }
        self.scene = None;
        tracing::debug!(
            subscribers = self.events.subscriber_count(),
            "player destroyed"
        );
        self.events = EventBus::default();
    }

    /// Process one tick at the clock's current time. Returns whether playback is
    /// still running.
    pub fn tick(&mut self) -> bool {
        if !self.animator.is_running() {
            return false;
        }
        let now = self.clock.now_ms();
        self.animator.tick(now, &mut self.signals);
        self.drain_signals();
        self.animator.is_running()
    }

    /// Drive ticks until playback stops or the tick source closes.
    ///
    /// While a no-execution-delay run is active the animator's own timer paces the
    /// loop; otherwise `display` does. Returns the number of ticks processed.
    pub fn run(&mut self, display: &mut dyn TickSource) -> u64 {
        let mut ticks = 0;
        while self.animator.is_running() {
            let ticked = match self.animator.timer_mut() {
                Some(timer) => timer.next_tick(),
                None => display.next_tick(),
            };
            if !ticked {
                break;
            }
            ticks += 1;
            self.tick();
        }
        ticks
    }

    /// Feed the host's viewport intersection state.
    pub fn set_viewport_visible(&mut self, visible: bool) {
        if self.settings.intersection_observer_render {
            self.viewport_visible = visible;
        }
    }

    /// Whether draws should actually reach the surface.
    pub fn render_visible(&self) -> bool {
        !self.settings.intersection_observer_render || self.viewport_visible
    }

    pub fn current_frame(&self) -> FrameIndex {
        FrameIndex(self.current_frame)
    }

    /// Percentage of the scene shown so far, `(frame + 1) / frames * 100`.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn total_frames(&self) -> u32 {
        self.scene.as_ref().map_or(0, |s| s.frame_count)
    }

    pub fn is_playing(&self) -> bool {
        self.animator.is_running()
    }

    pub fn scene(&self) -> Option<&Arc<SceneDocument>> {
        self.scene.as_ref()
    }

    pub fn settings(&self) -> &PlayerSettings {
        &self.settings
    }

    pub fn tick_source_kind(&self) -> TickSourceKind {
        self.settings.tick_source_kind()
    }

    pub fn renderer(&self) -> Option<&R> {
        self.renderer.as_ref()
    }

    pub fn renderer_mut(&mut self) -> Option<&mut R> {
        self.renderer.as_mut()
    }

    fn require_scene(&self) -> SvgaResult<Arc<SceneDocument>> {
        self.scene.clone().ok_or(SvgaError::NoSceneMounted)
    }

    /// Derive the animator range for the current settings, rejecting start
    /// frames that fall outside the mounted scene.
    fn run_bounds(&self) -> SvgaResult<RunBounds> {
        let scene = self.require_scene()?;
        let frame_count = scene.frame_count;
        let total = frame_count.saturating_sub(1);
        let sf = self.settings.start_frame;
        let ef = self.settings.end_frame;

        if sf >= frame_count {
            return Err(SvgaError::invalid_input(format!(
                "start frame {sf} is outside a scene of {frame_count} frames"
            )));
        }
        if ef > total {
            tracing::warn!(
                end_frame = ef,
                last_frame = total,
                "end frame past scene end; the last frame is held"
            );
        }

        let upper = if ef > 0 { ef } else { total };
        let (start_value, end_value) = match self.settings.play_mode {
            PlayMode::Forwards => (sf, upper),
            PlayMode::Fallbacks => (upper, sf),
        };

        let frames = if ef > sf {
            ef - sf
        } else if ef == 0 && sf > 0 {
            frame_count - sf
        } else {
            frame_count
        };

        Ok(RunBounds {
            scene,
            start_frame: sf,
            start_value,
            end_value,
            frames,
        })
    }

    fn start_animation(&mut self, bounds: RunBounds, event: PlayerEvent) -> SvgaResult<()> {
        let RunBounds {
            scene,
            start_frame,
            start_value,
            end_value,
            frames,
        } = bounds;

        let from = if self.current_frame == scene.frame_count.saturating_sub(1) {
            start_frame
        } else {
            self.current_frame
        };

        let run = AnimatorRun {
            start_value: f64::from(start_value),
            end_value: f64::from(end_value),
            duration_ms: scene.fps.frames_to_ms(frames),
            loop_count: self.settings.loop_setting.loop_count(),
            fill_rule: self.settings.fill_mode.fill_rule(),
            no_execution_delay: self.settings.no_execution_delay,
        };

        self.signals.clear();
        let now = self.clock.now_ms();
        self.animator
            .start(run, f64::from(from), now, &mut self.signals)?;
        self.current_frame = from;

        tracing::debug!(
            event = event.name(),
            from,
            start_value,
            end_value,
            duration_ms = run.duration_ms,
            "animation started"
        );
        self.events.emit(event);
        self.drain_signals();
        Ok(())
    }

    fn drain_signals(&mut self) {
        let mut signals = std::mem::take(&mut self.signals);
        for signal in signals.drain(..) {
            match signal {
                AnimatorSignal::Started => {}
                AnimatorSignal::Update(value) => self.show_value(value),
                AnimatorSignal::End => {
                    tracing::debug!(frame = self.current_frame, "playback ended");
                    self.events.emit(PlayerEvent::End);
                }
            }
        }
        self.signals = signals;
    }

    fn show_value(&mut self, value: f64) {
        let Some(frame_count) = self.scene.as_ref().map(|s| s.frame_count) else {
            return;
        };
        let last = frame_count.saturating_sub(1);
        let frame = ((value + FRAME_EPSILON).floor().max(0.0) as u32).min(last);
        if frame == self.current_frame {
            return;
        }

        self.current_frame = frame;
        self.progress = f64::from(frame + 1) * 100.0 / f64::from(frame_count);
        let visible = self.render_visible();
        if let Some(r) = self.renderer.as_mut() {
            r.draw_frame(FrameIndex(frame), visible);
        }
        tracing::trace!(frame, progress = self.progress, visible, "frame");
        self.events.emit(PlayerEvent::Process);
    }
}

struct RunBounds {
    scene: Arc<SceneDocument>,
    start_frame: u32,
    start_value: u32,
    end_value: u32,
    frames: u32,
}

#[cfg(test)]
#[path = "../../tests/unit/player/engine.rs"]
mod tests;
