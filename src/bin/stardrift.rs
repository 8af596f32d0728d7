use std::{fs, path::PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use stardrift::{
    CpuBackend, FrameLoop, FrameRGBA, ManualClock, Scene, SceneConfig, SceneFrame, SceneTargets,
    SurfaceBackend as _, Timestamp, Viewport,
};

/// Opaque page background the PNG output is flattened over.
const PAGE_BG: [u8; 3] = [11, 15, 36];

#[derive(Parser, Debug)]
#[command(name = "stardrift", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate frames and write the final starfield frame as a PNG.
    Frame(FrameCmdArgs),
    /// Simulate frames and dump the final scene frame as JSON.
    Dump(DumpCmdArgs),
}

#[derive(Parser, Debug)]
struct SimArgs {
    /// Viewport width in css pixels.
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Viewport height in css pixels.
    #[arg(long, default_value_t = 720.0)]
    height: f64,

    /// Device pixel ratio (clamped to [1, 2]).
    #[arg(long, default_value_t = 1.0)]
    dpr: f64,

    /// Scene config JSON; built-in defaults when omitted.
    #[arg(long = "config")]
    config_path: Option<PathBuf>,

    /// RNG seed override for reproducible output.
    #[arg(long)]
    seed: Option<u64>,

    /// Frames to simulate before capturing.
    #[arg(long, default_value_t = 120)]
    ticks: u64,

    /// Simulated milliseconds between frames.
    #[arg(long, default_value_t = 16.7)]
    step_ms: f64,
}

#[derive(Parser, Debug)]
struct FrameCmdArgs {
    #[command(flatten)]
    sim: SimArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct DumpCmdArgs {
    #[command(flatten)]
    sim: SimArgs,

    /// Output JSON path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Dump(args) => cmd_dump(args),
    }
}

fn simulate(args: &SimArgs) -> anyhow::Result<SceneFrame> {
    let mut config = match &args.config_path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("read scene config '{}'", path.display()))?;
            SceneConfig::from_json(&text)?
        }
        None => SceneConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }

    let viewport = Viewport::new(args.width, args.height, args.dpr)?;
    let scene = Scene::new(&config, SceneTargets::default(), viewport, Timestamp(0.0))?;
    let mut frame_loop = FrameLoop::new(scene, ManualClock::new(0.0, args.step_ms));

    let mut last = None;
    for _ in 0..args.ticks.max(1) {
        match frame_loop.tick() {
            Some(frame) => last = Some(frame),
            None => break,
        }
    }
    last.context("scene is inert (animations disabled in config)")
}

fn cmd_frame(args: FrameCmdArgs) -> anyhow::Result<()> {
    let frame = simulate(&args.sim)?;
    let plan = frame
        .starfield
        .context("no starfield plan to render (surface target absent)")?;

    let mut backend = CpuBackend::new();
    let rendered = backend.execute_plan(&plan)?;
    let flat = flatten_over_bg(&rendered, PAGE_BG);

    let img = image::RgbaImage::from_raw(rendered.width, rendered.height, flat)
        .context("rendered frame has inconsistent dimensions")?;
    img.save(&args.out)
        .with_context(|| format!("write PNG '{}'", args.out.display()))?;
    println!(
        "wrote {} ({}x{} device px)",
        args.out.display(),
        rendered.width,
        rendered.height
    );
    Ok(())
}

fn cmd_dump(args: DumpCmdArgs) -> anyhow::Result<()> {
    let frame = simulate(&args.sim)?;
    let json = serde_json::to_string_pretty(&frame).context("serialize scene frame")?;
    match &args.out {
        Some(path) => fs::write(path, json)
            .with_context(|| format!("write JSON '{}'", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}

/// Flatten premultiplied RGBA over an opaque background color.
fn flatten_over_bg(frame: &FrameRGBA, bg: [u8; 3]) -> Vec<u8> {
    let mut out = Vec::with_capacity(frame.data.len());
    for px in frame.data.chunks_exact(4) {
        let inv = u32::from(255 - px[3]);
        for c in 0..3 {
            let flat = u32::from(px[c]) + (u32::from(bg[c]) * inv + 127) / 255;
            out.push(flat.min(255) as u8);
        }
        out.push(255);
    }
    out
}
