use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

use crate::error::{HostError, HostResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostConfig {
    /// Window caption.
    #[serde(default = "default_title")]
    pub title: String,

    /// Log every backend event and the window size after each one.
    #[serde(default)]
    pub debug: bool,
}

fn default_title() -> String {
    "easel".to_string()
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            debug: false,
        }
    }
}

impl HostConfig {
    pub fn from_toml_str(s: &str) -> HostResult<Self> {
        toml::from_str(s).map_err(|e| HostError::Config(e.to_string()))
    }

    /// Missing file means defaults; an unreadable or malformed one is an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> HostResult<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(s) => toml::from_str(&s)
                .map_err(|e| HostError::Config(format!("parse {}: {}", path.display(), e))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(HostError::Config(format!("read {}: {}", path.display(), e))),
        }
    }
}
