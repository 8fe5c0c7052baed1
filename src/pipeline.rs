use crate::types::{Frame, Landmarks, Point3D, LANDMARK_COUNT, FINGER_TIP_PIP};
use anyhow::Result;

/// Perception collaborator: finds hands in a frame.
pub trait HandPipeline {
    fn name(&self) -> String;
    /// Zero or more hands, landmarks normalized to the frame (0..1).
    /// The controller only looks at the first one.
    fn process(&mut self, frame: &Frame) -> Result<Vec<Landmarks>>;
}

// Simulated hands when no landmark model is available
pub struct SimulatedHandPipeline {
    frame_count: u32,
    /// Frames per open/closed phase.
    phase_len: u32,
    /// Frames with no hand at the start of every other phase.
    dropout_len: u32,
}

impl SimulatedHandPipeline {
    pub fn new() -> Self {
        Self {
            frame_count: 0,
            phase_len: 45,
            dropout_len: 2,
        }
    }

    pub fn with_phases(phase_len: u32, dropout_len: u32) -> Self {
        Self {
            frame_count: 0,
            phase_len: phase_len.max(1),
            dropout_len,
        }
    }
}

impl Default for SimulatedHandPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl HandPipeline for SimulatedHandPipeline {
    fn name(&self) -> String {
        "No Model (Simulated Hand)".to_string()
    }

    fn process(&mut self, _frame: &Frame) -> Result<Vec<Landmarks>> {
        let n = self.frame_count;
        // Long sessions wrap around to the first phase
        self.frame_count = self.frame_count.wrapping_add(1);

        let phase = n / self.phase_len;
        let in_phase = n % self.phase_len;
        if phase % 2 == 1 && in_phase < self.dropout_len {
            return Ok(Vec::new());
        }

        // Wrist circles the middle of the frame
        let t = n as f32 * 0.03;
        let wx = 0.5 + t.cos() * 0.25;
        let wy = 0.6 + t.sin() * 0.15;
        let open = phase % 2 == 0;

        Ok(vec![synthetic_hand(wx, wy, open)])
    }
}

/// Upright hand with the wrist at (wx, wy). Open hands have all four
/// fingertips above their PIP joints, closed hands have them curled below.
pub fn synthetic_hand(wx: f32, wy: f32, open: bool) -> Landmarks {
    // Everything starts on the wrist
    let mut points = vec![Point3D::new(wx, wy, 0.0); LANDMARK_COUNT];

    let spread = 0.04;
    for (i, &(tip, pip)) in FINGER_TIP_PIP.iter().enumerate() {
        let fx = wx + (i as f32 - 1.5) * spread;
        let mcp = pip - 1;
        let dip = tip - 1;
        points[mcp] = Point3D::new(fx, wy - 0.10, 0.0);
        points[pip] = Point3D::new(fx, wy - 0.15, 0.0);
        if open {
            points[dip] = Point3D::new(fx, wy - 0.19, 0.0);
            points[tip] = Point3D::new(fx, wy - 0.22, 0.0);
        } else {
            points[dip] = Point3D::new(fx, wy - 0.12, 0.0);
            points[tip] = Point3D::new(fx, wy - 0.09, 0.0);
        }
    }

    // Thumb off to the side
    for (k, idx) in (1..=4).enumerate() {
        let k = k as f32 + 1.0;
        points[idx] = Point3D::new(wx - 0.03 - 0.025 * k, wy - 0.02 - 0.02 * k, 0.0);
    }

    Landmarks::new(points)
}
