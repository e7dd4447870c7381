//! Base and target image parameters

use super::ParamError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};

pub const DOCKER_DAEMON_IMAGE_PREFIX: &str = "docker://";
pub const TAR_IMAGE_PREFIX: &str = "tar://";
pub const CREDENTIAL_HELPER_PREFIX: &str = "docker-credential-";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing)]
    pub password: Option<String>,
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl AuthParameters {
    /// Both halves have to be present and non-blank, otherwise no credential is configured.
    pub fn credential(&self) -> Option<Credential> {
        let username = self.username.as_deref().filter(|u| !u.trim().is_empty())?;
        let password = self.password.as_deref().filter(|p| !p.trim().is_empty())?;
        Some(Credential {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum CredentialHelper {
    Executable(PathBuf),
    Named(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CredHelperParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub helper: Option<String>,
    pub environment: BTreeMap<String, String>,
}

impl CredHelperParameters {
    /// A helper that is an executable path is used directly; anything else is
    /// looked up as `docker-credential-<name>` on the PATH.
    pub fn resolve_helper(&self, is_executable: impl Fn(&Path) -> bool) -> Option<CredentialHelper> {
        let helper = self.helper.as_deref()?;
        let path = Path::new(helper);
        if is_executable(path) {
            Some(CredentialHelper::Executable(path.to_path_buf()))
        } else {
            Some(CredentialHelper::Named(format!(
                "{}{}",
                CREDENTIAL_HELPER_PREFIX, helper
            )))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DockerConfigFile {
    pub path: PathBuf,
    pub legacy: bool,
}

/// Candidate registry credential files, in lookup order.
pub fn docker_config_candidates(env: impl Fn(&str) -> Option<String>) -> Vec<DockerConfigFile> {
    let non_empty = |name: &str| env(name).filter(|v| !v.is_empty()).map(PathBuf::from);
    let xdg_auth = Path::new("containers").join("auth.json");

    let docker_files = |dir: PathBuf| {
        vec![
            DockerConfigFile {
                path: dir.join("config.json"),
                legacy: false,
            },
            DockerConfigFile {
                path: dir.join(".dockerconfigjson"),
                legacy: false,
            },
            DockerConfigFile {
                path: dir.join(".dockercfg"),
                legacy: true,
            },
        ]
    };

    let mut candidates = Vec::new();
    for var in ["XDG_RUNTIME_DIR", "XDG_CONFIG_HOME"] {
        if let Some(dir) = non_empty(var) {
            candidates.push(DockerConfigFile {
                path: dir.join(&xdg_auth),
                legacy: false,
            });
        }
    }
    if let Some(home) = non_empty("HOME") {
        candidates.push(DockerConfigFile {
            path: home.join(".config").join(&xdg_auth),
            legacy: false,
        });
        candidates.extend(docker_files(home.join(".docker")));
    }
    if let Some(dir) = non_empty("DOCKER_CONFIG") {
        candidates.extend(docker_files(dir));
    }
    candidates
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlatformParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub architecture: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Platform {
    pub architecture: String,
    pub os: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "reference", rename_all = "camelCase")]
pub enum BaseImageSource {
    Registry(String),
    DockerDaemon(String),
    Tarball(PathBuf),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BaseImageParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub platforms: Vec<PlatformParameters>,
    pub auth: AuthParameters,
    pub cred_helper: CredHelperParameters,
}

impl BaseImageParameters {
    pub fn source(&self) -> Result<BaseImageSource, ParamError> {
        let image = self.image.as_deref().ok_or_else(|| ParamError::Missing {
            field: "from.image".to_string(),
        })?;

        if let Some(path) = image.strip_prefix(TAR_IMAGE_PREFIX) {
            return Ok(BaseImageSource::Tarball(PathBuf::from(path)));
        }
        if let Some(reference) = image.strip_prefix(DOCKER_DAEMON_IMAGE_PREFIX) {
            return Ok(BaseImageSource::DockerDaemon(reference.to_string()));
        }

        let reference = image.split_once("://").map_or(image, |(_, rest)| rest);
        Ok(BaseImageSource::Registry(reference.to_string()))
    }

    /// Platforms missing either half are ignored.
    pub fn platforms(&self) -> BTreeSet<Platform> {
        self.platforms
            .iter()
            .filter_map(|p| {
                Some(Platform {
                    architecture: p.architecture.clone()?,
                    os: p.os.clone()?,
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TargetImageParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub tags: BTreeSet<String>,
    pub auth: AuthParameters,
    pub cred_helper: CredHelperParameters,
}

impl TargetImageParameters {
    pub fn image(&self) -> Result<&str, ParamError> {
        self.image.as_deref().ok_or_else(|| ParamError::Missing {
            field: "to.image".to_string(),
        })
    }
}
