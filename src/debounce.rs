//! Run-length debouncing of per-frame gesture labels.

use crate::types::GestureLabel;
use tracing::debug;

/// Consecutive identical raw labels needed before a label is confirmed.
/// Empirically chosen; tunable through config.
pub const DEFAULT_STABLE_THRESHOLD: u32 = 3;

/// State carried between frames. Empty means no hand in the last frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DebounceState {
    pub last_raw_label: Option<GestureLabel>,
    pub run_length: u32,
    pub confirmed_label: Option<GestureLabel>,
}

impl DebounceState {
    pub fn is_tracking(&self) -> bool {
        self.last_raw_label.is_some()
    }
}

pub struct Debouncer {
    state: DebounceState,
    threshold: u32,
}

impl Debouncer {
    /// A threshold of 0 is treated as 1.
    pub fn new(threshold: u32) -> Self {
        Self {
            state: DebounceState::default(),
            threshold: threshold.max(1),
        }
    }

    pub fn state(&self) -> &DebounceState {
        &self.state
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn confirmed(&self) -> Option<GestureLabel> {
        self.state.confirmed_label
    }

    /// Feed one frame. `None` means no hand was observed.
    ///
    /// Returns the newly confirmed label on the frame where it changes,
    /// `None` otherwise.
    pub fn update(&mut self, raw: Option<GestureLabel>) -> Option<GestureLabel> {
        let Some(label) = raw else {
            if self.state.is_tracking() {
                debug!("Hand lost, debounce run reset");
            }
            self.state = DebounceState::default();
            return None;
        };

        if self.state.last_raw_label == Some(label) {
            self.state.run_length = self.state.run_length.saturating_add(1);
        } else {
            self.state.last_raw_label = Some(label);
            self.state.run_length = 1;
        }

        if self.state.run_length >= self.threshold && self.state.confirmed_label != Some(label) {
            self.state.confirmed_label = Some(label);
            return Some(label);
        }
        None
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_STABLE_THRESHOLD)
    }
}
