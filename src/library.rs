use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::catalogue::Catalogue;
use crate::error::Result;
use crate::tree::Forest;

const SEED_LIBRARY: &str = include_str!("../assets/library.json");

/// Everything the drawer browses: both forests plus the catalogue tables
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Library {
    pub public: Forest,
    pub personal: Forest,
    #[serde(default)]
    pub catalogue: Catalogue,
}

impl Library {
    /// The built-in demo library
    pub fn seeded() -> Result<Self> {
        Self::from_json(SEED_LIBRARY)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let library: Library = serde_json::from_str(json)?;
        for (label, forest) in [("public", &library.public), ("personal", &library.personal)] {
            let stats = forest.stats();
            log::debug!(
                "library: {} forest has {} folders, {} files, depth {}",
                label,
                stats.folders,
                stats.files,
                stats.max_depth
            );
        }
        log::debug!(
            "library: {} disciplines",
            library.catalogue.disciplines.len()
        );
        Ok(library)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Loading library from {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load `path` when given, otherwise fall back to the seeded library
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Self::seeded(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
