//! Offscreen backend.
//!
//! Implements the same `Screen`/`Window` contract as the winit platform, but
//! draws into an in-memory canvas, takes its events from `HeadlessWindow::send`
//! and records every draw call and published frame for inspection.

mod screen;
mod window;

pub use screen::HeadlessScreen;
pub use window::{DrawRecord, HeadlessWindow};
