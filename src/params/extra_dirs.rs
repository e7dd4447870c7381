//! Extra directories copied verbatim into the image
//!
//! Permissions are keyed by absolute container path or by a glob over container
//! paths. An exact key always wins over a glob; otherwise the first matching glob
//! in key order applies.

use super::{require_absolute_unix, ParamError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtraDirectoryParameters {
    pub from: PathBuf,
    pub into: String,
    pub includes: Vec<String>,
    pub excludes: Vec<String>,
}

impl ExtraDirectoryParameters {
    pub fn source_dir(&self, project_dir: &Path) -> PathBuf {
        if self.from.is_absolute() {
            self.from.clone()
        } else {
            project_dir.join(&self.from)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtraDirectoriesParameters {
    pub paths: Vec<ExtraDirectoryParameters>,
    pub permissions: BTreeMap<String, String>,
}

pub struct PermissionMatcher {
    exact: BTreeMap<String, u32>,
    globs: Vec<(Regex, u32)>,
}

impl PermissionMatcher {
    pub fn permissions_for(&self, container_path: &str) -> Option<u32> {
        if let Some(mode) = self.exact.get(container_path) {
            return Some(*mode);
        }
        self.globs
            .iter()
            .find(|(glob, _)| glob.is_match(container_path))
            .map(|(_, mode)| *mode)
    }
}

impl ExtraDirectoriesParameters {
    pub fn validate(&self) -> Result<(), ParamError> {
        for (index, path) in self.paths.iter().enumerate() {
            require_absolute_unix(format!("extraDirectories.paths[{}].into", index), &path.into)?;
        }
        self.permission_matcher().map(|_| ())
    }

    pub fn permission_matcher(&self) -> Result<PermissionMatcher, ParamError> {
        let mut exact = BTreeMap::new();
        let mut globs = Vec::new();

        for (path, value) in &self.permissions {
            let mode = parse_octal_permissions(path, value)?;
            exact.insert(path.clone(), mode);
            let glob = glob_to_regex(path).map_err(|_| ParamError::InvalidPermissions {
                path: path.clone(),
                value: value.clone(),
            })?;
            globs.push((glob, mode));
        }

        Ok(PermissionMatcher { exact, globs })
    }
}

fn parse_octal_permissions(path: &str, value: &str) -> Result<u32, ParamError> {
    let valid = value.len() == 3 && value.chars().all(|c| ('0'..='7').contains(&c));
    if !valid {
        return Err(ParamError::InvalidPermissions {
            path: path.to_string(),
            value: value.to_string(),
        });
    }
    u32::from_str_radix(value, 8).map_err(|_| ParamError::InvalidPermissions {
        path: path.to_string(),
        value: value.to_string(),
    })
}

/// `**` crosses directory boundaries, `*` and `?` do not.
fn glob_to_regex(glob: &str) -> Result<Regex, regex::Error> {
    let mut pattern = String::from("^");
    let mut chars = glob.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '*' if chars.peek() == Some(&'*') => {
                chars.next();
                pattern.push_str(".*");
            }
            '*' => pattern.push_str("[^/]*"),
            '?' => pattern.push_str("[^/]"),
            other => pattern.push_str(&regex::escape(&other.to_string())),
        }
    }
    pattern.push('$');

    Regex::new(&pattern)
}
