use std::collections::BTreeMap;

use super::*;
use crate::{
    animation::clock::ManualClock,
    foundation::core::{Canvas, Fps},
    player::options::{FillMode, LoopSetting},
};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Prepare(u32),
    Clear,
    Resize(f64, f64),
    Draw(u32, bool),
}

#[derive(Default)]
struct Recorder {
    calls: Vec<Call>,
    no_surface: bool,
}

impl Renderer for Recorder {
    fn has_surface(&self) -> bool {
        !self.no_surface
    }

    fn prepare(&mut self, scene: &Arc<SceneDocument>) -> SvgaResult<()> {
        self.calls.push(Call::Prepare(scene.frame_count));
        Ok(())
    }

    fn clear(&mut self) {
        self.calls.push(Call::Clear);
    }

    fn resize(&mut self, canvas: Canvas) {
        self.calls.push(Call::Resize(canvas.width, canvas.height));
    }

    fn draw_frame(&mut self, frame: FrameIndex, visible: bool) {
        self.calls.push(Call::Draw(frame.0, visible));
    }
}

fn scene(frames: u32, fps: u32) -> SceneDocument {
    SceneDocument {
        version: String::new(),
        fps: Fps::new(fps).unwrap(),
        frame_count: frames,
        canvas: Canvas {
            width: 120.0,
            height: 80.0,
        },
        sprites: Vec::new(),
        images: BTreeMap::new(),
        audios: Vec::new(),
        asset_issues: Vec::new(),
    }
}

fn player() -> (Player<Recorder>, ManualClock) {
    let clock = ManualClock::new(0.0);
    let p = Player::with_clock(Recorder::default(), Arc::new(clock.clone())).unwrap();
    (p, clock)
}

fn draws(p: &Player<Recorder>) -> Vec<u32> {
    p.renderer()
        .unwrap()
        .calls
        .iter()
        .filter_map(|c| match c {
            Call::Draw(f, _) => Some(*f),
            _ => None,
        })
        .collect()
}

#[test]
fn renderer_without_surface_is_invalid_container() {
    let r = Recorder {
        no_surface: true,
        ..Default::default()
    };
    assert!(matches!(
        Player::new(r),
        Err(SvgaError::InvalidContainer(_))
    ));
}

#[test]
fn lifecycle_before_mount_fails_synchronously() {
    let (mut p, _) = player();
    assert!(matches!(p.start(), Err(SvgaError::NoSceneMounted)));
    assert!(matches!(p.resume(), Err(SvgaError::NoSceneMounted)));
    assert_eq!(p.total_frames(), 0);
}

#[test]
fn mount_prepares_clears_and_resizes() {
    let (mut p, _) = player();
    p.mount(scene(5, 10)).unwrap();
    assert_eq!(
        p.renderer().unwrap().calls,
        vec![Call::Prepare(5), Call::Clear, Call::Resize(120.0, 80.0)]
    );
    assert_eq!(p.total_frames(), 5);
    assert_eq!(p.current_frame(), FrameIndex(0));
    assert_eq!(p.progress(), 0.0);
}

#[test]
fn frames_advance_with_clock_and_progress_tracks_frame() {
    let (mut p, clock) = player();
    p.set(&PlayerOptions {
        loop_setting: Some(LoopSetting::Flag(false)),
        ..Default::default()
    });
    p.mount(scene(5, 10)).unwrap();
    p.start().unwrap();
    assert!(p.is_playing());

    // 5 frames at 10 fps: 500 ms spread over values 0..=4.
    clock.set(260.0);
    assert!(p.tick());
    assert_eq!(p.current_frame(), FrameIndex(2));
    assert_eq!(p.progress(), 60.0);

    clock.set(500.0);
    assert!(!p.tick());
    assert_eq!(p.current_frame(), FrameIndex(4));
    assert_eq!(p.progress(), 100.0);
    assert_eq!(draws(&p), vec![2, 4]);
}

#[test]
fn unchanged_frame_does_not_redraw() {
    let (mut p, clock) = player();
    p.mount(scene(5, 10)).unwrap();
    p.start().unwrap();
    let events = p.subscribe();
    for t in [10.0, 20.0, 30.0, 40.0] {
        clock.set(t);
        p.tick();
    }
    assert!(draws(&p).is_empty());
    assert!(events.try_iter().next().is_none());
}

#[test]
fn start_on_last_frame_restarts_range() {
    let (mut p, clock) = player();
    p.set(&PlayerOptions {
        loop_setting: Some(LoopSetting::Flag(false)),
        start_frame: Some(1),
        ..Default::default()
    });
    p.mount(scene(5, 10)).unwrap();
    p.start().unwrap();
    clock.set(10_000.0);
    p.tick();
    assert_eq!(p.current_frame(), FrameIndex(4));

    p.start().unwrap();
    assert_eq!(p.current_frame(), FrameIndex(1));
    assert!(p.is_playing());
}

#[test]
fn reverse_play_runs_from_end_to_start() {
    let (mut p, clock) = player();
    p.set(&PlayerOptions {
        loop_setting: Some(LoopSetting::Flag(false)),
        play_mode: Some(PlayMode::Fallbacks),
        ..Default::default()
    });
    p.mount(scene(5, 10)).unwrap();
    p.start().unwrap();
    assert_eq!(p.current_frame(), FrameIndex(4));

    clock.set(500.0);
    p.tick();
    assert_eq!(p.current_frame(), FrameIndex(0));
    assert_eq!(draws(&p), vec![4, 0]);
}

#[test]
fn backwards_fill_returns_to_start_frame() {
    let (mut p, clock) = player();
    p.set(&PlayerOptions {
        loop_setting: Some(LoopSetting::Flag(false)),
        fill_mode: Some(FillMode::Backwards),
        ..Default::default()
    });
    p.mount(scene(5, 10)).unwrap();
    p.start().unwrap();
    clock.set(300.0);
    p.tick();
    clock.set(600.0);
    p.tick();
    assert_eq!(p.current_frame(), FrameIndex(0));
    assert!(!p.is_playing());
}

#[test]
fn viewport_gate_only_applies_when_enabled() {
    let (mut p, clock) = player();
    p.set_viewport_visible(false);
    assert!(p.render_visible());

    p.set(&PlayerOptions {
        intersection_observer_render: Some(true),
        ..Default::default()
    });
    p.set_viewport_visible(false);
    assert!(!p.render_visible());

    p.mount(scene(5, 10)).unwrap();
    p.start().unwrap();
    clock.set(130.0);
    p.tick();
    assert_eq!(p.current_frame(), FrameIndex(1));
    assert_eq!(p.renderer().unwrap().calls.last(), Some(&Call::Draw(1, false)));

    p.set(&PlayerOptions {
        intersection_observer_render: Some(false),
        ..Default::default()
    });
    assert!(p.render_visible());
}

#[test]
fn destroy_releases_renderer_and_scene() {
    let (mut p, _) = player();
    p.mount(scene(5, 10)).unwrap();
    p.start().unwrap();
    p.destroy();
    p.destroy();
    assert!(!p.is_playing());
    assert!(p.renderer().is_none());
    assert!(p.scene().is_none());
    assert!(matches!(p.start(), Err(SvgaError::NoSceneMounted)));
    assert!(matches!(
        p.mount(scene(5, 10)),
        Err(SvgaError::InvalidContainer(_))
    ));
}

#[test]
fn start_frame_past_scene_end_is_rejected() {
    let (mut p, _) = player();
    p.set(&PlayerOptions {
        start_frame: Some(9),
        ..Default::default()
    });
    p.mount(scene(5, 10)).unwrap();
    assert!(matches!(p.start(), Err(SvgaError::InvalidInput(_))));
    assert!(!p.is_playing());
}

#[test]
fn rejected_start_leaves_frame_and_surface_untouched() {
    let (mut p, clock) = player();
    p.set(&PlayerOptions {
        loop_setting: Some(LoopSetting::Flag(false)),
        ..Default::default()
    });
    p.mount(scene(5, 10)).unwrap();
    p.start().unwrap();
    clock.set(500.0);
    p.tick();
    assert_eq!(p.current_frame(), FrameIndex(4));

    p.set(&PlayerOptions {
        start_frame: Some(7),
        ..Default::default()
    });
    let calls_before = p.renderer().unwrap().calls.clone();
    assert!(matches!(p.start(), Err(SvgaError::InvalidInput(_))));
    assert!(matches!(p.resume(), Err(SvgaError::InvalidInput(_))));
    assert_eq!(p.current_frame(), FrameIndex(4));
    assert_eq!(p.progress(), 100.0);
    assert_eq!(p.renderer().unwrap().calls, calls_before);
    assert!(!p.is_playing());
}

#[test]
fn end_frame_past_scene_end_holds_last_frame() {
    let (mut p, clock) = player();
    p.set(&PlayerOptions {
        loop_setting: Some(LoopSetting::Flag(false)),
        end_frame: Some(9),
        ..Default::default()
    });
    p.mount(scene(5, 10)).unwrap();
    p.start().unwrap();

    // Range [0, 9] over 9 frames, 900 ms; values past 4 clamp to the last frame.
    clock.set(600.0);
    assert!(p.tick());
    assert_eq!(p.current_frame(), FrameIndex(4));
    clock.set(900.0);
    assert!(!p.tick());
    assert_eq!(p.current_frame(), FrameIndex(4));
    assert_eq!(draws(&p), vec![4]);
}

#[test]
fn destroy_closes_event_subscriptions() {
    let (mut p, _) = player();
    let events = p.subscribe();
    p.mount(scene(5, 10)).unwrap();
    p.pause();
    p.destroy();
    assert_eq!(events.try_recv(), Ok(PlayerEvent::Pause));
    assert_eq!(events.try_recv(), Err(std::sync::mpsc::TryRecvError::Disconnected));
}

#[test]
fn no_execution_delay_selects_fixed_cadence() {
    let (mut p, _) = player();
    assert_eq!(p.tick_source_kind(), TickSourceKind::DisplayRefresh);
    p.set(&PlayerOptions {
        no_execution_delay: Some(true),
        ..Default::default()
    });
    assert_eq!(p.tick_source_kind(), TickSourceKind::FixedCadence);
}
