use easel_core::BackendError;
use thiserror::Error;

pub type HostResult<T> = Result<T, HostError>;

#[derive(Debug, Error)]
pub enum HostError {
    /// Unrecoverable: the session never started.
    #[error("failed to initialize the app window: {0}")]
    WindowCreation(#[source] BackendError),

    #[error("texture update rejected: host is no longer running")]
    UpdateClosed,

    #[error("listener thread: {0}")]
    Listener(String),

    #[error("driver error: {0}")]
    Driver(#[from] BackendError),

    #[error("config error: {0}")]
    Config(String),
}
