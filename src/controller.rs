//! Per-frame control: classify, debounce, smooth, dispatch.
//!
//! One call to [`HandController::process_frame`] per captured frame, in
//! capture order. Only the first hand reported by the detector is used.

use tracing::{debug, info, warn};

use crate::classifier;
use crate::cursor::{CursorFilter, PointerState, PressDispatcher};
use crate::debounce::{DebounceState, Debouncer};
use crate::types::{ControlEvent, GestureLabel, LandmarkSet, Landmarks, Surface};

/// What happened on one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// The hand that was used, if a complete one was detected.
    pub hand: Option<LandmarkSet>,
    pub raw_label: Option<GestureLabel>,
    /// Set only on the frame where the confirmed label changes.
    pub confirmed_change: Option<GestureLabel>,
    pub events: Vec<ControlEvent>,
}

pub struct HandController {
    debouncer: Debouncer,
    cursor: CursorFilter,
    dispatcher: PressDispatcher,
    /// Whether the previous frame's first hand was incomplete.
    skipping_incomplete: bool,
}

impl HandController {
    pub fn new(surface: Surface, stable_threshold: u32, alpha: f32) -> Self {
        Self::with_cursor(CursorFilter::new(surface, alpha), stable_threshold)
    }

    pub fn with_cursor(cursor: CursorFilter, stable_threshold: u32) -> Self {
        Self {
            debouncer: Debouncer::new(stable_threshold),
            cursor,
            dispatcher: PressDispatcher::new(),
            skipping_incomplete: false,
        }
    }

    pub fn debounce_state(&self) -> &DebounceState {
        self.debouncer.state()
    }

    pub fn confirmed(&self) -> Option<GestureLabel> {
        self.debouncer.confirmed()
    }

    pub fn cursor_position(&self) -> (f32, f32) {
        self.cursor.position()
    }

    pub fn pointer_state(&self) -> PointerState {
        self.dispatcher.state()
    }

    pub fn surface(&self) -> Surface {
        self.cursor.surface()
    }

    /// Run one frame's detections through the control chain.
    ///
    /// An empty slice or an incomplete first hand counts as no detection:
    /// the debounce run resets and the cursor holds still.
    pub fn process_frame(&mut self, hands: &[Landmarks]) -> FrameReport {
        let first = hands.first();
        let hand = first.and_then(LandmarkSet::from_landmarks);

        // Warn once per streak of bad frames, not on every frame
        let incomplete = first.is_some() && hand.is_none();
        if let Some(raw) = first.filter(|_| incomplete) {
            if self.skipping_incomplete {
                debug!("Skipping incomplete hand ({} landmarks)", raw.points.len());
            } else {
                warn!("Skipping incomplete hand ({} landmarks)", raw.points.len());
            }
        }
        self.skipping_incomplete = incomplete;

        self.process_hand(hand.as_ref())
    }

    pub fn process_hand(&mut self, hand: Option<&LandmarkSet>) -> FrameReport {
        let mut report = FrameReport {
            hand: hand.copied(),
            ..FrameReport::default()
        };

        let Some(hand) = hand else {
            self.debouncer.update(None);
            return report;
        };

        let label = classifier::classify(hand);
        report.raw_label = Some(label);

        let wrist = hand.wrist();
        report.events.push(self.cursor.update(wrist.x, wrist.y));

        if let Some(changed) = self.debouncer.update(Some(label)) {
            info!("Confirmed gesture: {}", changed);
            report.confirmed_change = Some(changed);
            if let Some(ev) = self.dispatcher.on_label_change(changed) {
                report.events.push(ev);
            }
        }

        debug!(raw = %label, run = self.debouncer.state().run_length, events = ?report.events, "frame");
        report
    }

    /// Event needed to leave the pointer released when control stops.
    pub fn finish(&mut self) -> Option<ControlEvent> {
        self.dispatcher.release()
    }
}
