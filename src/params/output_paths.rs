//! Output path resolution for the digest, image id, image metadata and tarball files.
//!
//! Defaults live in the build output directory. Overrides are resolved against the
//! project root instead, so `outputPaths.tar: custom/out.tar` lands next to the
//! build script rather than inside `build/`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

pub const OUTPUT_FILE_NAME: &str = "jib-image";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutputSlot {
    Digest,
    ImageId,
    ImageJson,
    Tar,
}

impl OutputSlot {
    pub const ALL: [OutputSlot; 4] = [
        OutputSlot::Digest,
        OutputSlot::ImageId,
        OutputSlot::ImageJson,
        OutputSlot::Tar,
    ];

    pub fn extension(&self) -> &'static str {
        match self {
            OutputSlot::Digest => "digest",
            OutputSlot::ImageId => "id",
            OutputSlot::ImageJson => "json",
            OutputSlot::Tar => "tar",
        }
    }

    pub fn default_file_name(&self) -> String {
        format!("{}.{}", OUTPUT_FILE_NAME, self.extension())
    }
}

impl fmt::Display for OutputSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputSlot::Digest => "digest",
            OutputSlot::ImageId => "imageId",
            OutputSlot::ImageJson => "imageJson",
            OutputSlot::Tar => "tar",
        };
        f.write_str(name)
    }
}

/// User overrides as declared; `None` means "use the default".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OutputPathOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_id: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_json: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tar: Option<PathBuf>,
}

impl OutputPathOverrides {
    pub fn get(&self, slot: OutputSlot) -> Option<&Path> {
        match slot {
            OutputSlot::Digest => self.digest.as_deref(),
            OutputSlot::ImageId => self.image_id.as_deref(),
            OutputSlot::ImageJson => self.image_json.as_deref(),
            OutputSlot::Tar => self.tar.as_deref(),
        }
    }
}

pub fn resolve_output_path(
    slot: OutputSlot,
    override_path: Option<&Path>,
    project_root: &Path,
    build_dir: &Path,
) -> PathBuf {
    match override_path {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => project_root.join(path),
        None => build_dir.join(slot.default_file_name()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputPaths {
    pub digest: PathBuf,
    pub image_id: PathBuf,
    pub image_json: PathBuf,
    pub tar: PathBuf,
}

impl OutputPaths {
    pub fn resolve(overrides: &OutputPathOverrides, project_root: &Path, build_dir: &Path) -> Self {
        let path_for = |slot| resolve_output_path(slot, overrides.get(slot), project_root, build_dir);

        Self {
            digest: path_for(OutputSlot::Digest),
            image_id: path_for(OutputSlot::ImageId),
            image_json: path_for(OutputSlot::ImageJson),
            tar: path_for(OutputSlot::Tar),
        }
    }

    pub fn get(&self, slot: OutputSlot) -> &Path {
        match slot {
            OutputSlot::Digest => &self.digest,
            OutputSlot::ImageId => &self.image_id,
            OutputSlot::ImageJson => &self.image_json,
            OutputSlot::Tar => &self.tar,
        }
    }
}
