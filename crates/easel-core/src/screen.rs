use std::sync::Arc;

use crate::color::Color;
use crate::error::BackendResult;
use crate::event::Event;
use crate::geom::{Rect, Size};
use crate::texture::Texture;

/// Compositing mode for fills and scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOp {
    /// Source replaces destination.
    Src,
    /// Source is alpha-blended over destination.
    Over,
}

pub type PublishResult = BackendResult<()>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowOptions {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            title: "easel".to_string(),
            width: 800,
            height: 800,
        }
    }
}

/// A live backend window.
///
/// Event retrieval and drawing may be called from different threads: the
/// host reads events on a listener thread while painting on the pump thread.
/// Drawing goes into a back buffer and becomes visible only on `publish`.
pub trait Window: Send + Sync {
    /// Block until the next event. After `release` this keeps returning a
    /// lifecycle transition to `Stage::Dead`.
    fn next_event(&self) -> Event;

    /// Queue an event behind the pending ones (used for paint requests).
    fn send(&self, event: Event);

    /// Current back buffer size.
    fn size(&self) -> Size;

    fn fill(&self, r: Rect, c: Color, op: DrawOp);

    fn scale(&self, dst: Rect, src: &Texture, src_rect: Rect, op: DrawOp);

    /// Flip the back buffer to the visible window.
    fn publish(&self) -> PublishResult;

    /// Close the OS window. Idempotent.
    fn release(&self);
}

/// Entry point handed to the session callback once the backend is live.
pub trait Screen: Send + Sync {
    fn new_window(&self, opts: &WindowOptions) -> BackendResult<Arc<dyn Window>>;
}
