//! The single-threaded frame loop: capture, detect, control, dispatch.
//!
//! Each frame is fully handled before the next capture, so debounce runs
//! always see frames in capture order and nothing queues up.

use anyhow::Result;
use tracing::{info, warn};

use crate::camera::FrameSource;
use crate::controller::{FrameReport, HandController};
use crate::pipeline::HandPipeline;
use crate::pointer::PointerSink;
use crate::types::Frame;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// Capture failed; treated as end of stream.
    EndOfStream,
    /// The per-frame callback asked to stop (quit key, window closed).
    Stopped,
    FrameLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopSummary {
    pub exit: LoopExit,
    pub frames: u64,
}

/// Run until the source ends, `on_frame` returns `false`, or `max_frames`
/// frames were processed. A held button is released before returning.
pub fn run_frames<S, P, K, F>(
    source: &mut S,
    pipeline: &mut P,
    controller: &mut HandController,
    sink: &mut K,
    max_frames: Option<u64>,
    mut on_frame: F,
) -> Result<LoopSummary>
where
    S: FrameSource + ?Sized,
    P: HandPipeline + ?Sized,
    K: PointerSink + ?Sized,
    F: FnMut(&Frame, &FrameReport, &HandController) -> Result<bool>,
{
    let mut frames = 0u64;
    let outcome = drive(source, pipeline, controller, sink, max_frames, &mut on_frame, &mut frames);

    // Runs on the error path too, so a failed frame never leaves the button held
    let released = match controller.finish() {
        Some(release) => sink.dispatch(&release),
        None => Ok(()),
    };

    let exit = match outcome {
        Ok(exit) => exit,
        Err(e) => {
            if let Err(release_err) = released {
                warn!("Failed to release pointer after error: {:#}", release_err);
            }
            return Err(e);
        }
    };
    released?;

    info!("Frame loop finished after {} frames ({:?})", frames, exit);
    Ok(LoopSummary { exit, frames })
}

fn drive<S, P, K, F>(
    source: &mut S,
    pipeline: &mut P,
    controller: &mut HandController,
    sink: &mut K,
    max_frames: Option<u64>,
    on_frame: &mut F,
    frames: &mut u64,
) -> Result<LoopExit>
where
    S: FrameSource + ?Sized,
    P: HandPipeline + ?Sized,
    K: PointerSink + ?Sized,
    F: FnMut(&Frame, &FrameReport, &HandController) -> Result<bool>,
{
    loop {
        if max_frames.is_some_and(|max| *frames >= max) {
            return Ok(LoopExit::FrameLimit);
        }

        let frame = match source.capture() {
            Ok(f) => f,
            Err(e) => {
                warn!("{:#}. Exiting.", e);
                return Ok(LoopExit::EndOfStream);
            }
        };
        *frames += 1;

        let hands = pipeline.process(&frame)?;
        let report = controller.process_frame(&hands);
        for event in &report.events {
            sink.dispatch(event)?;
        }

        if !on_frame(&frame, &report, controller)? {
            return Ok(LoopExit::Stopped);
        }
    }
}
