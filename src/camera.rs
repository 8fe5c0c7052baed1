use nokhwa::{
    pixel_format::RgbFormat,
    utils::{ApiBackend, CameraIndex, RequestedFormat, RequestedFormatType},
    Camera,
};
use anyhow::{Result, Context, anyhow};
use colored::*;

use crate::types::Frame;

/// Capture collaborator. An `Err` from `capture` ends the frame loop.
pub trait FrameSource {
    fn capture(&mut self) -> Result<Frame>;
    fn width(&self) -> u32;
    fn height(&self) -> u32;
}

pub struct CameraSource {
    camera: Camera,
    mirror: bool,
}

impl CameraSource {
    /// Opening the device is the only fatal camera error; it happens here,
    /// before any frame is processed.
    pub fn new(index: usize, mirror: bool) -> Result<Self> {
        let cam_index = CameraIndex::Index(index as u32);
        let requested = RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate);
        let mut camera = Camera::new(cam_index, requested)
            .map_err(|e| anyhow!(e))
            .context("Could not open webcam. Ensure a camera is connected and accessible")?;

        camera.open_stream().map_err(|e| anyhow!(e)).context("Failed to open camera stream")?;

        println!("{}", format!("Opened camera: {}", camera.info().human_name()).green());
        println!("Format: {}", camera.camera_format());

        Ok(Self { camera, mirror })
    }

    pub fn name(&self) -> String {
        self.camera.info().human_name()
    }
}

impl FrameSource for CameraSource {
    fn capture(&mut self) -> Result<Frame> {
        let frame = self.camera.frame().map_err(|e| anyhow!(e)).context("Failed to grab frame from webcam")?;
        let mut decoded = frame.decode_image::<RgbFormat>().map_err(|e| anyhow!(e)).context("Failed to decode frame")?;
        if self.mirror {
            image::imageops::flip_horizontal_in_place(&mut decoded);
        }
        Ok(decoded)
    }

    fn width(&self) -> u32 {
        self.camera.resolution().width()
    }

    fn height(&self) -> u32 {
        self.camera.resolution().height()
    }
}

impl Drop for CameraSource {
    fn drop(&mut self) {
        let _ = self.camera.stop_stream();
    }
}

/// Print the cameras nokhwa can see.
pub fn list_cameras() -> Result<()> {
    let cameras = nokhwa::query(ApiBackend::Auto)?;
    println!("{}", "Available Cameras:".bold());
    println!("{:<5} | {:<30} | {:<10}", "Index", "Name", "Misc");
    println!("{}", "-".repeat(60));
    for cam in cameras {
        println!("{:<5} | {:<30} | {:?}", cam.index(), cam.human_name(), cam.misc());
    }
    Ok(())
}
