use clap::Parser;
use colored::*;
use std::path::Path;
use tracing_subscriber::EnvFilter;

mod args;

use args::Args;
use rusty_hands::camera::{self, CameraSource, FrameSource};
use rusty_hands::config::AppConfig;
use rusty_hands::frame_loop::run_frames;
use rusty_hands::inference::HandLandmarkPipeline;
use rusty_hands::output::{parse_hex, PreviewState, PreviewStyle, WindowOutput};
use rusty_hands::pipeline::{HandPipeline, SimulatedHandPipeline};
use rusty_hands::pointer::{EnigoPointer, LogPointer, PointerSink, FALLBACK_SURFACE};
use rusty_hands::HandController;

fn create_pipeline(model: Option<&Path>, config: &AppConfig) -> anyhow::Result<Box<dyn HandPipeline>> {
    match model {
        Some(path) => Ok(Box::new(HandLandmarkPipeline::new(
            &path.to_string_lossy(),
            config.tracking.min_detection_confidence,
            config.tracking.min_tracking_confidence,
        )?)),
        None => Ok(Box::new(SimulatedHandPipeline::new())),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // RUST_LOG wins, --verbose bumps the default to debug
    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    if args.list {
        return camera::list_cameras();
    }

    // 0. Load Config
    let config = AppConfig::load(&args.config)?;

    // 1. Setup Camera (fatal if unavailable)
    let mirror = args.mirror_or(config.capture.mirror);
    let mut camera = CameraSource::new(args.cam_index as usize, mirror)?;

    // 2. Setup Perception
    let mut pipeline = create_pipeline(args.model.as_deref(), &config)?;
    println!("Active Pipeline: {}", pipeline.name().cyan());

    // 3. Setup Pointer
    let mut pointer: Box<dyn PointerSink> = if args.dry_run {
        Box::new(LogPointer::new(config.surface.resolve().unwrap_or(FALLBACK_SURFACE)))
    } else {
        Box::new(EnigoPointer::new(config.surface.resolve())?)
    };
    let surface = pointer.surface();
    println!("Control surface: {}x{}{}", surface.width, surface.height, if args.dry_run { " (dry run)".yellow() } else { "".normal() });

    let mut controller = HandController::new(
        surface,
        config.tracking.stable_threshold,
        config.tracking.smoothing_alpha,
    );

    // 4. Setup Preview
    let mut window = if config.ui.show_preview && !args.no_preview {
        let style = PreviewStyle {
            landmark_color: parse_hex(&config.ui.landmark_color_hex),
            connection_color: parse_hex(&config.ui.connection_color_hex),
            dot_size: config.ui.dot_size,
        };
        let win = WindowOutput::new("Rusty Hands", camera.width() as usize, camera.height() as usize, style)?;
        println!("Controls: [Q]/[Esc] Quit");
        Some(win)
    } else {
        None
    };

    println!("Starting frame loop...");
    let summary = run_frames(
        &mut camera,
        pipeline.as_mut(),
        &mut controller,
        pointer.as_mut(),
        args.frames,
        |frame, report, controller| {
            if let Some(win) = window.as_mut() {
                win.show(
                    frame,
                    &PreviewState {
                        hand: report.hand.as_ref(),
                        raw_label: report.raw_label,
                        confirmed: controller.confirmed(),
                    },
                )?;
                if win.quit_requested() {
                    return Ok(false);
                }
            }
            Ok(true)
        },
    )?;

    println!("{}", format!("Stopped after {} frames ({:?})", summary.frames, summary.exit).green());
    Ok(())
}
