use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    sync::Arc,
    thread,
};

use anyhow::Context as _;
use clap::{Parser as _, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use svga::{
    Canvas, DisplayRefresh, FRAME_INTERVAL, FillMode, FrameIndex, LoopSetting, ManualClock,
    PlayMode, Player, PlayerEvent, PlayerOptions, Renderer, SceneDocument, SteppedClock,
    SvgaResult,
};

#[derive(clap::Parser, Debug)]
#[command(name = "svga", version)]
struct Cli {
    /// Log lifecycle details to stderr (overridden by RUST_LOG).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode a container and print what it holds.
    Inspect(InspectArgs),
    /// Play a container against a logging renderer.
    Play(PlayArgs),
}

#[derive(clap::Args, Debug)]
struct DecodeArgs {
    /// Input .svga file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Decode on the calling thread instead of the worker pool.
    #[arg(long)]
    inline: bool,
}

#[derive(clap::Args, Debug)]
struct InspectArgs {
    #[command(flatten)]
    decode: DecodeArgs,

    /// Print the whole scene as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(clap::Args, Debug)]
struct PlayArgs {
    #[command(flatten)]
    decode: DecodeArgs,

    /// Player options JSON (camelCase keys). Flags below override it.
    #[arg(long)]
    options: Option<PathBuf>,

    /// `true`, `false`, or a loop count (<= 0 loops forever).
    #[arg(long = "loop")]
    loop_setting: Option<LoopSetting>,

    #[arg(long, value_enum)]
    fill_mode: Option<FillChoice>,

    #[arg(long, value_enum)]
    play_mode: Option<PlayChoice>,

    #[arg(long)]
    start_frame: Option<u32>,

    #[arg(long)]
    end_frame: Option<u32>,

    /// Tick from a fixed-cadence timer instead of the display refresh.
    #[arg(long)]
    no_execution_delay: bool,

    /// Use simulated time instead of the wall clock.
    #[arg(long)]
    simulate: bool,

    /// Simulated milliseconds per tick.
    #[arg(long, default_value_t = 16.0)]
    step_ms: f64,

    /// Give up after this many simulated ticks.
    #[arg(long, default_value_t = 100_000)]
    max_ticks: u64,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FillChoice {
    Forwards,
    Backwards,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PlayChoice {
    Forwards,
    Fallbacks,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Inspect(args) => cmd_inspect(args),
        Command::Play(args) => cmd_play(args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "svga=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn decode(args: &DecodeArgs) -> anyhow::Result<SceneDocument> {
    let parser = svga::Parser::new(svga::ParserConfig {
        disable_worker: args.inline,
        ..Default::default()
    })?;
    let scene = parser
        .decode_file(&args.in_path)
        .wait()
        .with_context(|| format!("decode '{}'", args.in_path.display()))?;
    Ok(scene)
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let scene = decode(&args.decode)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&scene)?);
        return Ok(());
    }

    println!("version: {}", scene.version);
    println!("fps: {}", scene.fps.get());
    println!("frames: {} ({:.1} ms)", scene.frame_count, scene.duration_ms());
    println!("canvas: {}x{}", scene.canvas.width, scene.canvas.height);
    println!("sprites: {}", scene.sprites.len());
    println!("images: {}", scene.images.len());
    for (key, img) in &scene.images {
        println!("  {key}: {} ({} bytes)", img.mime, img.byte_len);
    }
    println!("audios: {}", scene.audios.len());
    if !scene.asset_issues.is_empty() {
        println!("asset issues: {}", scene.asset_issues.len());
    }
    Ok(())
}

fn read_options(path: &Path) -> anyhow::Result<PlayerOptions> {
    let f = File::open(path).with_context(|| format!("open options '{}'", path.display()))?;
    let opts = serde_json::from_reader(BufReader::new(f)).context("parse player options JSON")?;
    Ok(opts)
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let scene = decode(&args.decode)?;

    let base = match args.options.as_deref() {
        Some(path) => read_options(path)?,
        None => PlayerOptions::default(),
    };
    let mut opts = base.merged(PlayerOptions {
        loop_setting: args.loop_setting,
        fill_mode: args.fill_mode.map(|f| match f {
            FillChoice::Forwards => FillMode::Forwards,
            FillChoice::Backwards => FillMode::Backwards,
        }),
        play_mode: args.play_mode.map(|p| match p {
            PlayChoice::Forwards => PlayMode::Forwards,
            PlayChoice::Fallbacks => PlayMode::Fallbacks,
        }),
        start_frame: args.start_frame,
        end_frame: args.end_frame,
        no_execution_delay: args.no_execution_delay.then_some(true),
        ..Default::default()
    });
    if args.simulate && opts.no_execution_delay == Some(true) {
        tracing::warn!("--simulate ignores no-execution-delay; ticking from the simulated clock");
        opts.no_execution_delay = Some(false);
    }

    let (ticks, ended, player) = if args.simulate {
        let clock = ManualClock::new(0.0);
        let mut player = Player::with_clock(LogRenderer::default(), Arc::new(clock.clone()))?;
        let events = start(&mut player, &opts, scene)?;
        let mut source = SteppedClock::new(clock, args.step_ms).with_limit(args.max_ticks);
        let ticks = player.run(&mut source);
        (ticks, saw_end(&events), player)
    } else {
        let mut player = Player::new(LogRenderer::default())?;
        let events = start(&mut player, &opts, scene)?;
        let (mut display, signal) = DisplayRefresh::new();
        thread::Builder::new()
            .name("svga-display".to_string())
            .spawn(move || {
                while signal.notify() {
                    thread::sleep(FRAME_INTERVAL);
                }
            })
            .context("spawn display refresh thread")?;
        let ticks = player.run(&mut display);
        (ticks, saw_end(&events), player)
    };

    println!(
        "{} after {ticks} ticks at frame {} ({:.1}%), {} frames drawn",
        if ended { "ended" } else { "stopped" },
        player.current_frame().0,
        player.progress(),
        player.renderer().map_or(0, |r| r.drawn),
    );
    Ok(())
}

fn start(
    player: &mut Player<LogRenderer>,
    opts: &PlayerOptions,
    scene: SceneDocument,
) -> anyhow::Result<std::sync::mpsc::Receiver<PlayerEvent>> {
    player.set(opts);
    let events = player.subscribe();
    player.mount(scene)?;
    player.start()?;
    Ok(events)
}

fn saw_end(events: &std::sync::mpsc::Receiver<PlayerEvent>) -> bool {
    events.try_iter().any(|e| e == PlayerEvent::End)
}

/// Prints every drawn frame to stdout.
#[derive(Debug, Default)]
struct LogRenderer {
    drawn: u64,
}

impl Renderer for LogRenderer {
    fn prepare(&mut self, scene: &Arc<SceneDocument>) -> SvgaResult<()> {
        tracing::info!(
            sprites = scene.sprites.len(),
            images = scene.images.len(),
            "renderer prepared"
        );
        Ok(())
    }

    fn clear(&mut self) {}

    fn resize(&mut self, canvas: Canvas) {
        println!("canvas {}x{}", canvas.width, canvas.height);
    }

    fn draw_frame(&mut self, frame: FrameIndex, visible: bool) {
        self.drawn += 1;
        if visible {
            println!("frame {}", frame.0);
        }
    }
}
