//! Hand-gesture pointer control.
//!
//! Per frame, the first detected hand is classified open/closed, the label is
//! debounced, and the wrist drives a smoothed cursor. Confirmed closing
//! presses the pointer, confirmed opening releases it.

pub mod camera;
pub mod classifier;
pub mod config;
pub mod controller;
pub mod cursor;
pub mod debounce;
pub mod frame_loop;
pub mod inference;
pub mod output;
pub mod pipeline;
pub mod pointer;
pub mod types;

#[cfg(test)]
mod debounce_tests;

pub use controller::{FrameReport, HandController};
pub use types::{ControlEvent, GestureLabel, LandmarkSet, Landmarks, Point3D, Surface};
