use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use easel_host::HostConfig;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ViewerConfig {
    #[serde(default)]
    pub host: HostConfig,

    #[serde(default)]
    pub demo: DemoConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DemoConfig {
    /// PNG pushed once the screen is ready. Takes precedence over `animate`.
    #[serde(default)]
    pub texture_path: Option<PathBuf>,

    /// Stream generated textures instead of showing the default picture.
    #[serde(default)]
    pub animate: bool,

    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
}

fn default_frame_interval_ms() -> u64 {
    33
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            texture_path: None,
            animate: false,
            frame_interval_ms: default_frame_interval_ms(),
        }
    }
}

impl DemoConfig {
    #[inline]
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }
}

impl ViewerConfig {
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(s) => toml::from_str(&s).with_context(|| format!("parse {}", path.display())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e).with_context(|| format!("read {}", path.display())),
        }
    }
}
