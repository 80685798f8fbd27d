//! winit/softbuffer backend.
//!
//! The OS event loop owns the main thread; the session callback runs on a
//! worker thread and talks to it through an `EventLoopProxy`. Drawing happens
//! in a shared CPU canvas that the main thread copies to the surface on publish.

mod driver;
mod events;
mod screen;

pub use driver::run;
pub use screen::{WinitScreen, WinitWindow};
