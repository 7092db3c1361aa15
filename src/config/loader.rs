//! Load resource descriptors from a JSON file: an array of
//! `{ "path": "/opinion", "config": { ... } }` entries.

use crate::config::types::ResourceConfig;
use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;

/// One mountable endpoint: the route path and its descriptor.
#[derive(Clone, Debug, Deserialize)]
pub struct ResourceEntry {
    pub path: String,
    pub config: ResourceConfig,
}

/// Read and parse a resource file. Descriptors are validated later, when
/// each entry is resolved at mount time.
pub async fn load_resources(path: impl AsRef<Path>) -> Result<Vec<ResourceEntry>, ConfigError> {
    let path = path.as_ref();
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))?;
    serde_json::from_str(&raw).map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))
}
