use anyhow::{bail, Context, Result};
use image::imageops::FilterType;
use ort::session::{builder::GraphOptimizationLevel, Session};
use std::path::Path;
use tracing::{debug, info};

use crate::pipeline::HandPipeline;
use crate::types::{Frame, Landmarks, Point3D, Rect, LANDMARK_COUNT};

/// Square input edge of the hand landmark model.
const INPUT_SIZE: u32 = 224;

/// ROI edge relative to the larger side of the previous hand's bounds.
const ROI_SCALE: f32 = 2.0;

/// Hand landmark model (21 x 3 outputs + hand presence logit).
///
/// Without a palm detector the first pass runs on the whole frame
/// ("detection"). Once a hand is accepted, following frames run on a crop
/// around the last landmarks ("tracking"), which keeps the hand large in the
/// model input. A rejected tracking pass drops back to detection.
pub struct HandLandmarkPipeline {
    session: Session,
    min_detection_confidence: f32,
    min_tracking_confidence: f32,
    roi: Option<Rect>,
}

impl HandLandmarkPipeline {
    pub fn new(model_path: &str, min_detection_confidence: f32, min_tracking_confidence: f32) -> Result<Self> {
        if !Path::new(model_path).exists() {
            bail!("Hand landmark model not found at {}", model_path);
        }

        info!("Loading hand landmark model from {}...", model_path);
        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(4)?
            .with_execution_providers([
                ort::execution_providers::CoreMLExecutionProvider::default().build(),
                ort::execution_providers::CPUExecutionProvider::default().build(),
            ])?
            .commit_from_file(model_path)
            .with_context(|| format!("Failed to load model {}", model_path))?;

        Ok(Self {
            session,
            min_detection_confidence,
            min_tracking_confidence,
            roi: None,
        })
    }

    pub fn is_tracking(&self) -> bool {
        self.roi.is_some()
    }

    /// Returns the presence probability and landmarks in model input pixels.
    fn run_model(&mut self, crop: &Frame) -> Result<(f32, Vec<Point3D>)> {
        let resized = image::imageops::resize(crop, INPUT_SIZE, INPUT_SIZE, FilterType::Triangle);

        // NHWC, RGB scaled to 0..1
        let side = INPUT_SIZE as usize;
        let mut input_data = Vec::with_capacity(side * side * 3);
        for pixel in resized.pixels() {
            input_data.push(pixel[0] as f32 / 255.0);
            input_data.push(pixel[1] as f32 / 255.0);
            input_data.push(pixel[2] as f32 / 255.0);
        }

        let shape = vec![1, side, side, 3];
        let input = ort::value::Tensor::from_array((shape, input_data))?;
        let outputs = self.session.run(ort::inputs![input])?;

        let (_lm_shape, lm_data) = outputs[0].try_extract_tensor::<f32>()?;
        let (_score_shape, score_data) = outputs[1].try_extract_tensor::<f32>()?;

        if lm_data.len() < LANDMARK_COUNT * 3 || score_data.is_empty() {
            bail!(
                "Unexpected model output: {} landmark values, {} score values",
                lm_data.len(),
                score_data.len()
            );
        }

        let points = lm_data
            .chunks_exact(3)
            .take(LANDMARK_COUNT)
            .map(|c| Point3D::new(c[0], c[1], c[2]))
            .collect();

        Ok((sigmoid(score_data[0]), points))
    }
}

impl HandPipeline for HandLandmarkPipeline {
    fn name(&self) -> String {
        "Hand Landmarks (21 pts)".to_string()
    }

    fn process(&mut self, frame: &Frame) -> Result<Vec<Landmarks>> {
        let frame_w = frame.width() as f32;
        let frame_h = frame.height() as f32;

        let tracking = self.roi.is_some();
        let region = self.roi.unwrap_or(Rect::new(0.0, 0.0, frame_w, frame_h));

        let crop = image::imageops::crop_imm(
            frame,
            region.x as u32,
            region.y as u32,
            region.width.max(1.0) as u32,
            region.height.max(1.0) as u32,
        )
        .to_image();

        let (presence, model_points) = self.run_model(&crop)?;
        let threshold = if tracking {
            self.min_tracking_confidence
        } else {
            self.min_detection_confidence
        };

        if presence < threshold {
            if tracking {
                debug!("Tracking lost (presence {:.2})", presence);
            }
            self.roi = None;
            return Ok(Vec::new());
        }

        // Model input (0..224) -> crop -> full frame pixels
        let scale_x = crop.width() as f32 / INPUT_SIZE as f32;
        let scale_y = crop.height() as f32 / INPUT_SIZE as f32;
        let frame_points: Vec<Point3D> = model_points
            .iter()
            .map(|p| Point3D::new(region.x + p.x * scale_x, region.y + p.y * scale_y, p.z / INPUT_SIZE as f32))
            .collect();

        self.roi = roi_around(&frame_points, frame_w, frame_h);

        let points = frame_points
            .iter()
            .map(|p| Point3D::new(p.x / frame_w, p.y / frame_h, p.z))
            .collect();
        Ok(vec![Landmarks::new(points)])
    }
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Square crop centred on the hand, clipped to the frame.
fn roi_around(points: &[Point3D], frame_w: f32, frame_h: f32) -> Option<Rect> {
    let bounds = Rect::bounding(points)?;
    let side = bounds.width.max(bounds.height) * ROI_SCALE;
    if side < 1.0 {
        return None;
    }

    let cx = bounds.x + bounds.width / 2.0;
    let cy = bounds.y + bounds.height / 2.0;
    let x = (cx - side / 2.0).clamp(0.0, frame_w);
    let y = (cy - side / 2.0).clamp(0.0, frame_h);
    let w = side.min(frame_w - x);
    let h = side.min(frame_h - y);

    if w < 1.0 || h < 1.0 {
        None
    } else {
        Some(Rect::new(x, y, w, h))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sigmoid() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-6);
        assert!(sigmoid(10.0) > 0.99);
        assert!(sigmoid(-10.0) < 0.01);
    }

    #[test]
    fn test_roi_is_square_and_centered() {
        let pts = [Point3D::new(300.0, 200.0, 0.0), Point3D::new(340.0, 280.0, 0.0)];
        let roi = roi_around(&pts, 640.0, 480.0).unwrap();
        assert_eq!(roi.width, 160.0);
        assert_eq!(roi.height, 160.0);
        assert_eq!(roi.x, 240.0);
        assert_eq!(roi.y, 160.0);
    }

    #[test]
    fn test_roi_clipped_at_frame_edge() {
        let pts = [Point3D::new(0.0, 0.0, 0.0), Point3D::new(50.0, 50.0, 0.0)];
        let roi = roi_around(&pts, 640.0, 480.0).unwrap();
        assert_eq!(roi.x, 0.0);
        assert_eq!(roi.y, 0.0);
        assert!(roi.width <= 640.0 && roi.height <= 480.0);
    }

    #[test]
    fn test_degenerate_roi_rejected() {
        let pts = [Point3D::new(10.0, 10.0, 0.0); 21];
        assert!(roi_around(&pts, 640.0, 480.0).is_none());
    }

    #[test]
    fn test_missing_model_is_an_error() {
        assert!(HandLandmarkPipeline::new("does/not/exist.onnx", 0.8, 0.5).is_err());
    }
}
