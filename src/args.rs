use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Control the mouse pointer with an open/closed hand", long_about = None)]
pub struct Args {
    /// Camera Index (default 0)
    #[arg(short, long, default_value_t = 0)]
    pub cam_index: u32,

    /// Hand landmark ONNX model. Without one, a simulated hand is used
    #[arg(long)]
    pub model: Option<PathBuf>,

    /// Config file
    #[arg(long, default_value = "config.json")]
    pub config: PathBuf,

    /// Mirror the camera image (overrides config)
    #[arg(long, conflicts_with = "no_mirror")]
    pub mirror: bool,

    /// Do not mirror the camera image (overrides config)
    #[arg(long)]
    pub no_mirror: bool,

    /// Log pointer events instead of moving the real pointer
    #[arg(long)]
    pub dry_run: bool,

    /// Run without the preview window
    #[arg(long)]
    pub no_preview: bool,

    /// Stop after this many frames
    #[arg(long)]
    pub frames: Option<u64>,

    /// Debug-level logging
    #[arg(short, long)]
    pub verbose: bool,

    /// List available cameras
    #[arg(long)]
    pub list: bool,
}

impl Args {
    /// Mirror setting after CLI overrides.
    pub fn mirror_or(&self, configured: bool) -> bool {
        if self.mirror {
            true
        } else if self.no_mirror {
            false
        } else {
            configured
        }
    }
}
