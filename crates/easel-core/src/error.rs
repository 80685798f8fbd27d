use thiserror::Error;

pub type BackendResult<T> = Result<T, BackendError>;

/// Errors reported by a windowing backend.
///
/// Window-creation failures are returned from `Screen::new_window`; everything
/// else reaches the host as an `Event::Error` and never ends the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("window creation failed: {0}")]
    WindowCreation(String),

    #[error("surface error: {0}")]
    Surface(String),

    #[error("present failed: {0}")]
    Present(String),

    #[error("event loop error: {0}")]
    EventLoop(String),

    #[error("invalid texture data: {0}")]
    TextureData(String),

    #[error("backend closed")]
    Closed,
}
