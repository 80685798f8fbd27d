pub mod config;
pub mod default_ui;
pub mod error;
pub mod host;
mod pump;

pub use crate::config::HostConfig;
pub use crate::error::{HostError, HostResult};
pub use crate::host::{Host, TextureUpdater, WINDOW_HEIGHT, WINDOW_WIDTH};
