use crate::types::{ControlEvent, GestureLabel, Surface};

/// Weight kept from the previous smoothed position. Higher = steadier but laggier.
pub const DEFAULT_ALPHA: f32 = 0.7;

// =========================================================================
// Cursor Smoothing (Exponential Moving Average)
// =========================================================================

/// Smoothed cursor position in surface pixels.
///
/// Never reset on loss of detection: when no hand is seen the cursor simply
/// stays where it was.
#[derive(Debug, Clone)]
pub struct CursorFilter {
    x: f32,
    y: f32,
    alpha: f32,
    surface: Surface,
}

impl CursorFilter {
    /// Starts at the center of the surface.
    pub fn new(surface: Surface, alpha: f32) -> Self {
        let (x, y) = surface.center();
        Self { x, y, alpha, surface }
    }

    /// Starts at an explicit position instead of the center.
    pub fn with_position(surface: Surface, alpha: f32, x: f32, y: f32) -> Self {
        Self { x, y, alpha, surface }
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    /// Blend in the wrist position (normalized 0..1) and return the move event.
    pub fn update(&mut self, wrist_x: f32, wrist_y: f32) -> ControlEvent {
        let target_x = wrist_x * self.surface.width as f32;
        let target_y = wrist_y * self.surface.height as f32;

        self.x = self.alpha * self.x + (1.0 - self.alpha) * target_x;
        self.y = self.alpha * self.y + (1.0 - self.alpha) * target_y;

        let (px, py) = self.surface.clamp_pixel(self.x, self.y);
        ControlEvent::MoveTo(px, py)
    }
}

// =========================================================================
// Press / Release Dispatch
// =========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerState {
    Pressed,
    #[default]
    Released,
}

/// Maps confirmed label changes to button events. Closed hand = pressed.
#[derive(Debug, Default)]
pub struct PressDispatcher {
    state: PointerState,
}

impl PressDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PointerState {
        self.state
    }

    /// A change to a label whose state already holds emits nothing.
    pub fn on_label_change(&mut self, label: GestureLabel) -> Option<ControlEvent> {
        match (label, self.state) {
            (GestureLabel::Closed, PointerState::Released) => {
                self.state = PointerState::Pressed;
                Some(ControlEvent::Press)
            }
            (GestureLabel::Open, PointerState::Pressed) => {
                self.state = PointerState::Released;
                Some(ControlEvent::Release)
            }
            _ => None,
        }
    }

    /// Release a held button, e.g. on shutdown.
    pub fn release(&mut self) -> Option<ControlEvent> {
        self.on_label_change(GestureLabel::Open)
    }
}
