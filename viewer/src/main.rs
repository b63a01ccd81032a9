// main.rs - Headless driver for the skyscraper viewer scenes.
// Mounts a scene, runs a fixed-step frame loop, replays scripted input, writes a JSON report.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{info, warn};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::io::AsyncWriteExt;

use skyscraper_viewer::frame_timing::{FrameClock, FrameStats};
use skyscraper_viewer::{
    BlockInstance, CollectingNotifier, HeadlessSurface, LampScene, ManifestAssetLoader, PuzzleScene,
    SceneConfig, SequenceState, Vec3, WindowEvent,
};

/// Frames between progress lines
const LOG_EVERY: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Click the lamp, load the genie, fly the camera
    Lamp,
    /// Build the puzzle block grid from digit input
    Puzzle,
}

/// CLI
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Scene config JSON; defaults are used when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Which scene to mount
    #[arg(short, long, value_enum, default_value = "lamp")]
    pub mode: Mode,

    /// Viewport width (overrides config)
    #[arg(short = 'W', long)]
    pub width: Option<u32>,

    /// Viewport height (overrides config)
    #[arg(short = 'H', long)]
    pub height: Option<u32>,

    /// Frames to run
    #[arg(short, long, default_value = "180")]
    pub frames: u64,

    /// Fixed frame step in milliseconds; 0 measures wall time between frames
    #[arg(long, default_value = "16")]
    pub frame_ms: u64,

    /// Client coordinates to click once the lamp is loaded (default: the lamp's center)
    #[arg(long, num_args = 2, value_names = ["X", "Y"])]
    pub click: Option<Vec<f32>>,

    /// Puzzle size field text, as typed
    #[arg(long)]
    pub puzzle_size: Option<String>,

    /// Puzzle digit field value, committed once after mount
    #[arg(long)]
    pub puzzle: Option<String>,

    /// Report path; use "-" for stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// What a headless run leaves behind
#[derive(Debug, Serialize)]
struct RunReport {
    mode: Mode,
    frames: u64,
    camera_position: Vec3,
    #[serde(skip_serializing_if = "Option::is_none")]
    sequence_state: Option<SequenceState>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    alerts: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    blocks: Vec<BlockInstance>,
    frame_stats: String,
}

async fn load_config(args: &Args) -> Result<SceneConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let s = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            SceneConfig::from_json_str(&s).with_context(|| format!("Invalid config {}", path.display()))?
        }
        None => SceneConfig::default(),
    };

    if let Some(width) = args.width {
        config.window.width = width;
    }
    if let Some(height) = args.height {
        config.window.height = height;
    }
    config.validate().context("Window override rejected")?;
    Ok(config)
}

fn run_lamp(args: &Args, config: &SceneConfig) -> Result<RunReport> {
    let loader = ManifestAssetLoader::new(config.base_path.clone(), config.assets.clone());
    let mut scene = LampScene::mount(config, HeadlessSurface::new(), loader).context("Failed to mount lamp scene")?;

    let mut clock = frame_clock(args.frame_ms);
    let mut stats = FrameStats::new(120);
    let mut clicked = false;

    for frame in 0..args.frames {
        if !clicked && scene.is_lamp_loaded() {
            let target = match args.click.as_deref() {
                Some(&[x, y]) => Some((x, y)),
                _ => scene.lamp_screen_position(),
            };
            if let Some((client_x, client_y)) = target {
                clicked = true;
                match scene.dispatch(WindowEvent::Click { client_x, client_y })? {
                    Some(hit) => info!("frame {frame}: clicked {} at distance {:.2}", hit.mesh_name, hit.distance),
                    None => warn!("frame {frame}: click at ({client_x:.0}, {client_y:.0}) hit nothing"),
                }
            }
        }

        let frame_start = Instant::now();
        scene.tick(clock.next_dt());
        stats.record_frame(frame_start.elapsed());

        if frame % LOG_EVERY == 0 {
            let position = scene.viewport().camera.position;
            info!(
                "frame {frame}: {:?}, camera ({:.2}, {:.2}, {:.2})",
                scene.state(),
                position.x,
                position.y,
                position.z
            );
        }
    }

    if !clicked {
        warn!("lamp never finished loading within {} frames", args.frames);
    }
    info!("{}", stats.report());

    let report = RunReport {
        mode: Mode::Lamp,
        frames: args.frames,
        camera_position: scene.viewport().camera.position,
        sequence_state: Some(scene.state()),
        alerts: Vec::new(),
        blocks: Vec::new(),
        frame_stats: stats.report(),
    };
    scene.unmount();
    Ok(report)
}

fn run_puzzle(args: &Args, config: &SceneConfig) -> Result<RunReport> {
    let alerts = CollectingNotifier::new();
    let mut scene = PuzzleScene::mount(config, HeadlessSurface::new(), alerts.clone())
        .context("Failed to mount puzzle scene")?;

    if let Some(size) = &args.puzzle_size {
        if let Err(err) = scene.set_size_field(size) {
            warn!("size {size:?} rejected: {err}");
        }
    }
    if let Some(input) = &args.puzzle {
        scene.set_input(input.as_str());
        match scene.commit() {
            Ok(matrix) => info!("committed {}x{} puzzle", matrix.row_count(), matrix.col_count()),
            Err(err) => warn!("commit rejected: {err}"),
        }
    }

    let mut clock = frame_clock(args.frame_ms);
    let mut stats = FrameStats::new(120);
    for _ in 0..args.frames {
        let frame_start = Instant::now();
        scene.tick(clock.next_dt());
        stats.record_frame(frame_start.elapsed());
    }
    info!("{} ({} blocks)", stats.report(), scene.block_instances().len());

    let report = RunReport {
        mode: Mode::Puzzle,
        frames: args.frames,
        camera_position: scene.viewport().camera.position,
        sequence_state: None,
        alerts: alerts.alerts(),
        blocks: scene.block_instances(),
        frame_stats: stats.report(),
    };
    scene.unmount();
    Ok(report)
}

fn frame_clock(frame_ms: u64) -> FrameClock {
    match frame_ms {
        0 => FrameClock::default(),
        ms => FrameClock::fixed(Duration::from_millis(ms)),
    }
}

async fn write_report(path: &Path, report: &RunReport) -> Result<()> {
    let json = serde_json::to_vec_pretty(report).context("Failed to serialize report")?;

    if path.as_os_str() == "-" {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(&json).await.context("Failed writing report to stdout")?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
        return Ok(());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    tokio::fs::write(path, &json)
        .await
        .with_context(|| format!("Failed writing report {}", path.display()))?;
    info!("wrote {}", path.display());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    info!("Starting with {args:?}");

    let config = load_config(&args).await?;
    let report = match args.mode {
        Mode::Lamp => run_lamp(&args, &config)?,
        Mode::Puzzle => run_puzzle(&args, &config)?,
    };

    if let Some(output) = &args.output {
        write_report(output, &report).await?;
    }
    Ok(())
}
