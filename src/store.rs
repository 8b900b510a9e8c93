use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

/// The durable document: two integer lists, nothing else. Overwritten
/// wholesale on every save.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub numbers: Vec<u32>,
    #[serde(default)]
    pub wrong_predictions: Vec<u32>,
}

pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Missing file means a fresh start; an unreadable or unparseable file
    /// is an error, never silently treated as empty.
    pub async fn load(&self) -> Result<PersistedState> {
        if !self.path.exists() {
            return Ok(PersistedState::default());
        }

        let raw = fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("failed to read data file {}", self.path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("data file {} is not valid JSON", self.path.display()))
    }

    /// Full-file overwrite: write a temp file in the target directory,
    /// then rename over the previous state.
    pub async fn save(&self, state: &PersistedState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.with_context(|| {
                    format!("failed to create data directory {}", parent.display())
                })?;
            }
        }

        let payload = serde_json::to_string(state).context("failed to serialize state")?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, payload)
            .await
            .with_context(|| format!("failed to write temp file {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("failed to replace data file {}", self.path.display()))?;
        Ok(())
    }
}
