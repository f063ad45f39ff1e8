#![allow(dead_code)]

use std::{
    io::Write as _,
    sync::{Arc, mpsc::Receiver},
};

use flate2::{Compression, write::ZlibEncoder};
use prost::Message as _;
use svga::{
    Canvas, FrameIndex, ManualClock, Player, PlayerEvent, PlayerOptions, Renderer,
    SceneDocument, SvgaResult,
    format::schema::{
        FrameEntity, Layout, MovieEntity, MovieParams, ShapeArgs, ShapeEntity, ShapeType,
        SpriteEntity, Transform, shape_entity,
    },
};

pub const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 13];

/// A movie with one bitmap sprite and one vector sprite, `frames` long.
pub fn movie(frames: i32, fps: i32) -> MovieEntity {
    let bitmap = SpriteEntity {
        image_key: "bitmap".to_string(),
        frames: (0..frames)
            .map(|i| FrameEntity {
                alpha: 1.0,
                layout: Some(Layout {
                    x: 0.0,
                    y: 0.0,
                    width: 40.0,
                    height: 40.0,
                }),
                transform: Some(Transform {
                    a: 1.0,
                    b: 0.0,
                    c: 0.0,
                    d: 1.0,
                    tx: i as f32,
                    ty: 0.0,
                }),
                ..Default::default()
            })
            .collect(),
        matte_key: String::new(),
    };
    let vector = SpriteEntity {
        image_key: "vector".to_string(),
        frames: (0..frames)
            .map(|i| {
                let shape = if i == 0 {
                    ShapeEntity {
                        shape_type: ShapeType::Shape as i32,
                        args: Some(shape_entity::Args::Shape(ShapeArgs {
                            d: "M0 0 L10 10".to_string(),
                        })),
                        ..Default::default()
                    }
                } else {
                    ShapeEntity {
                        shape_type: ShapeType::Keep as i32,
                        ..Default::default()
                    }
                };
                FrameEntity {
                    alpha: 1.0,
                    shapes: vec![shape],
                    ..Default::default()
                }
            })
            .collect(),
        matte_key: String::new(),
    };

    let mut m = MovieEntity {
        version: "2.0.0".to_string(),
        params: Some(MovieParams {
            view_box_width: 200.0,
            view_box_height: 100.0,
            fps,
            frames,
        }),
        sprites: vec![bitmap, vector],
        ..Default::default()
    };
    m.images.insert("bitmap".to_string(), PNG_MAGIC.to_vec());
    m.images.insert("overlay".to_string(), b"raw".to_vec());
    m
}

pub fn encode_container(movie: &MovieEntity) -> Vec<u8> {
    let mut enc = ZlibEncoder::new(Vec::new(), Compression::default());
    enc.write_all(&movie.encode_to_vec()).unwrap();
    enc.finish().unwrap()
}

/// A plain scene of `frames` frames, decoded inline.
pub fn scene(frames: i32, fps: i32) -> SceneDocument {
    let parser = svga::Parser::new(svga::ParserConfig {
        disable_worker: true,
        ..Default::default()
    })
    .unwrap();
    parser
        .decode_blocking(encode_container(&movie(frames, fps)))
        .unwrap()
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Prepare,
    Clear,
    Resize(f64, f64),
    Draw(u32),
}

#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub calls: Vec<Call>,
}

impl RecordingRenderer {
    pub fn draws(&self) -> Vec<u32> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Draw(f) => Some(*f),
                _ => None,
            })
            .collect()
    }

    pub fn last_draw(&self) -> Option<u32> {
        self.draws().last().copied()
    }
}

impl Renderer for RecordingRenderer {
    fn prepare(&mut self, _scene: &Arc<SceneDocument>) -> SvgaResult<()> {
        self.calls.push(Call::Prepare);
        Ok(())
    }

    fn clear(&mut self) {
        self.calls.push(Call::Clear);
    }

    fn resize(&mut self, canvas: Canvas) {
        self.calls.push(Call::Resize(canvas.width, canvas.height));
    }

    fn draw_frame(&mut self, frame: FrameIndex, _visible: bool) {
        self.calls.push(Call::Draw(frame.0));
    }
}

pub struct Harness {
    pub player: Player<RecordingRenderer>,
    pub clock: ManualClock,
    pub events: Receiver<PlayerEvent>,
}

impl Harness {
    pub fn new(frames: i32, fps: i32, opts: PlayerOptions) -> Self {
        let clock = ManualClock::new(0.0);
        let mut player =
            Player::with_clock(RecordingRenderer::default(), Arc::new(clock.clone())).unwrap();
        player.set(&opts);
        let events = player.subscribe();
        player.mount(scene(frames, fps)).unwrap();
        Self {
            player,
            clock,
            events,
        }
    }

    /// Move the clock to `ms` and tick once.
    pub fn tick_at(&mut self, ms: f64) -> bool {
        self.clock.set(ms);
        self.player.tick()
    }

    pub fn events(&self) -> Vec<PlayerEvent> {
        self.events.try_iter().collect()
    }

    pub fn renderer(&self) -> &RecordingRenderer {
        self.player.renderer().unwrap()
    }
}
