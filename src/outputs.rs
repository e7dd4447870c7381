//! Files written after an image has been built

use crate::params::OutputPaths;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageMetadataOutput {
    pub image: String,
    pub image_id: String,
    pub image_digest: String,
    pub tags: Vec<String>,
    pub image_pushed: bool,
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    debug!(path = %path.display(), "Wrote image output");
    Ok(())
}

/// Writes the digest, image id and metadata files to their resolved locations.
pub fn write_image_outputs(paths: &OutputPaths, metadata: &ImageMetadataOutput) -> Result<()> {
    write_file(&paths.digest, &metadata.image_digest)?;
    write_file(&paths.image_id, &metadata.image_id)?;

    let json = serde_json::to_string(metadata).context("Failed to serialize image metadata")?;
    write_file(&paths.image_json, &json)
}

pub fn read_image_metadata(path: &Path) -> Result<ImageMetadataOutput> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid image metadata in {}", path.display()))
}
