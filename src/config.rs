use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::context::Tab;
use crate::error::Result;
use crate::notification::DEFAULT_TOAST_DURATION;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How long a toast stays up before its timer clears it
    pub toast_duration_ms: u64,
    /// Suggested name offered by the folder name prompt
    pub default_folder_name: String,
    /// Tab shown when the drawer starts
    pub initial_tab: Tab,
    /// Discipline preselected for course catalogues; first one in the library when unset
    pub initial_discipline: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            toast_duration_ms: DEFAULT_TOAST_DURATION.as_millis() as u64,
            default_folder_name: "新建文件夹".to_string(),
            initial_tab: Tab::Space,
            initial_discipline: None,
        }
    }
}

impl Config {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise use the defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                log::info!("Loading config from {}", path.display());
                Self::load_from_file(path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }
}
