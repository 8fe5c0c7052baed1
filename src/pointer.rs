//! Pointer-injection collaborator.

use anyhow::{anyhow, Context, Result};
use enigo::{Button, Coordinate, Direction, Enigo, Mouse, Settings};
use tracing::info;

use crate::types::{ControlEvent, Surface};

/// Surface used when no display can be queried (dry runs).
pub const FALLBACK_SURFACE: Surface = Surface { width: 1920, height: 1080 };

pub trait PointerSink {
    fn dispatch(&mut self, event: &ControlEvent) -> Result<()>;
    /// Control surface the coordinates refer to.
    fn surface(&self) -> Surface;
}

/// Drives the real OS pointer.
pub struct EnigoPointer {
    enigo: Enigo,
    surface: Surface,
}

impl EnigoPointer {
    /// `surface` overrides the detected main display size.
    pub fn new(surface: Option<Surface>) -> Result<Self> {
        let enigo = Enigo::new(&Settings::default()).context("Failed to connect to the input system")?;
        let surface = match surface {
            Some(s) => s,
            None => {
                let (w, h) = enigo.main_display().map_err(|e| anyhow!(e)).context("Failed to query display size")?;
                Surface::new(w.max(1) as u32, h.max(1) as u32)
            }
        };
        Ok(Self { enigo, surface })
    }
}

impl PointerSink for EnigoPointer {
    fn dispatch(&mut self, event: &ControlEvent) -> Result<()> {
        let result = match *event {
            ControlEvent::MoveTo(x, y) => self.enigo.move_mouse(x, y, Coordinate::Abs),
            ControlEvent::Press => self.enigo.button(Button::Left, Direction::Press),
            ControlEvent::Release => self.enigo.button(Button::Left, Direction::Release),
        };
        result
            .map_err(|e| anyhow!(e))
            .with_context(|| format!("Pointer injection failed for {}", event))
    }

    fn surface(&self) -> Surface {
        self.surface
    }
}

/// Dry run: logs button events, counts moves.
pub struct LogPointer {
    surface: Surface,
    moves: u64,
}

impl LogPointer {
    pub fn new(surface: Surface) -> Self {
        Self { surface, moves: 0 }
    }

    pub fn moves(&self) -> u64 {
        self.moves
    }
}

impl PointerSink for LogPointer {
    fn dispatch(&mut self, event: &ControlEvent) -> Result<()> {
        match event {
            ControlEvent::MoveTo(..) => {
                self.moves += 1;
                tracing::trace!("{}", event);
            }
            _ => info!("Pointer: {}", event),
        }
        Ok(())
    }

    fn surface(&self) -> Surface {
        self.surface
    }
}

/// Keeps every event, for tests and replays.
#[derive(Debug, Default)]
pub struct RecordingPointer {
    pub surface: Option<Surface>,
    pub events: Vec<ControlEvent>,
}

impl RecordingPointer {
    pub fn new(surface: Surface) -> Self {
        Self { surface: Some(surface), events: Vec::new() }
    }

    pub fn buttons(&self) -> Vec<ControlEvent> {
        self.events
            .iter()
            .copied()
            .filter(|e| !matches!(e, ControlEvent::MoveTo(..)))
            .collect()
    }
}

impl PointerSink for RecordingPointer {
    fn dispatch(&mut self, event: &ControlEvent) -> Result<()> {
        self.events.push(*event);
        Ok(())
    }

    fn surface(&self) -> Surface {
        self.surface.unwrap_or(FALLBACK_SURFACE)
    }
}
