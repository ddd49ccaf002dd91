use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::chunk::ChunkLayout;
use crate::morton::MortonError;

/// On-disk description of a chunk layout
///
/// ```toml
/// chunk_size = 4
/// chunk_span = [2, 2, 2]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Cells per chunk along every axis
    pub chunk_size: u64,
    /// Chunks along each axis; its length is the dimensionality
    pub chunk_span: Vec<u64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            chunk_size: 4,
            chunk_span: vec![2, 2, 2],
        }
    }
}

impl LayoutConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        toml::from_str(raw).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&raw)?;
        log::debug!("[LayoutConfig] loaded {:?} from {}", config, path.display());
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::SerializeError(e.to_string()))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// Validate and build the layout this config describes
    pub fn build(&self) -> Result<ChunkLayout, ConfigError> {
        Ok(ChunkLayout::new(self.chunk_size, self.chunk_span.clone())?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),

    #[error("Invalid layout: {0}")]
    InvalidLayout(#[from] MortonError),
}
