use image::{ImageBuffer, Rgb};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A captured RGB frame.
pub type Frame = ImageBuffer<Rgb<u8>, Vec<u8>>;

/// Represents a single 3D point
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3D {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl Point3D {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Raw landmarks for one hand as reported by the detector.
/// Coordinates are normalized to the frame (0..1), z is relative depth.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Landmarks {
    pub points: Vec<Point3D>,
}

impl Landmarks {
    pub fn new(points: Vec<Point3D>) -> Self {
        Self { points }
    }
}

// ============================================================================
// HAND LANDMARK INDICES
// ============================================================================

pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// (tip, pip) pairs for the four tracked fingers, thumb excluded.
pub const FINGER_TIP_PIP: [(usize, usize); 4] = [
    (INDEX_TIP, INDEX_PIP),
    (MIDDLE_TIP, MIDDLE_PIP),
    (RING_TIP, RING_PIP),
    (PINKY_TIP, PINKY_PIP),
];

/// Hand skeleton connections for rendering
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    (WRIST, THUMB_CMC), (THUMB_CMC, THUMB_MCP), (THUMB_MCP, THUMB_IP), (THUMB_IP, THUMB_TIP),
    (WRIST, INDEX_MCP), (INDEX_MCP, INDEX_PIP), (INDEX_PIP, INDEX_DIP), (INDEX_DIP, INDEX_TIP),
    (INDEX_MCP, MIDDLE_MCP), (MIDDLE_MCP, MIDDLE_PIP), (MIDDLE_PIP, MIDDLE_DIP), (MIDDLE_DIP, MIDDLE_TIP),
    (MIDDLE_MCP, RING_MCP), (RING_MCP, RING_PIP), (RING_PIP, RING_DIP), (RING_DIP, RING_TIP),
    (RING_MCP, PINKY_MCP), (PINKY_MCP, PINKY_PIP), (PINKY_PIP, PINKY_DIP), (PINKY_DIP, PINKY_TIP),
    (WRIST, PINKY_MCP),
];

/// Exactly 21 landmarks in the fixed anatomical order.
///
/// Only constructible from a complete set, so everything downstream of
/// [`LandmarkSet::from_landmarks`] can index without checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandmarkSet {
    points: [Point3D; LANDMARK_COUNT],
}

impl LandmarkSet {
    pub fn new(points: [Point3D; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    /// Returns `None` unless the detector produced exactly 21 finite points.
    pub fn from_landmarks(raw: &Landmarks) -> Option<Self> {
        let points: [Point3D; LANDMARK_COUNT] = raw.points.as_slice().try_into().ok()?;
        if points.iter().all(|p| p.x.is_finite() && p.y.is_finite()) {
            Some(Self { points })
        } else {
            None
        }
    }

    pub fn point(&self, index: usize) -> Point3D {
        self.points[index]
    }

    pub fn wrist(&self) -> Point3D {
        self.points[WRIST]
    }

    pub fn points(&self) -> &[Point3D; LANDMARK_COUNT] {
        &self.points
    }
}

/// Binary hand openness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GestureLabel {
    Open,
    Closed,
}

impl fmt::Display for GestureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GestureLabel::Open => write!(f, "Open"),
            GestureLabel::Closed => write!(f, "Closed"),
        }
    }
}

/// Output of the controller, consumed by a pointer sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlEvent {
    Press,
    Release,
    MoveTo(i32, i32),
}

impl fmt::Display for ControlEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlEvent::Press => write!(f, "Press"),
            ControlEvent::Release => write!(f, "Release"),
            ControlEvent::MoveTo(x, y) => write!(f, "MoveTo({}, {})", x, y),
        }
    }
}

/// Control surface size in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Surface {
    pub width: u32,
    pub height: u32,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.width as f32 / 2.0, self.height as f32 / 2.0)
    }

    /// Round and clamp a position into `[0, width) x [0, height)`.
    pub fn clamp_pixel(&self, x: f32, y: f32) -> (i32, i32) {
        let max_x = self.width.saturating_sub(1) as f32;
        let max_y = self.height.saturating_sub(1) as f32;
        (x.round().clamp(0.0, max_x) as i32, y.round().clamp(0.0, max_y) as i32)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Axis-aligned bounds of a set of points.
    pub fn bounding(points: &[Point3D]) -> Option<Self> {
        let first = points.first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(Self::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }
}
