//! Per-project extension object
//!
//! The single user-facing configuration block of a project. Deserialized from the
//! `jib` (or `tinyJib`) section of the project manifest with every field defaulted.

use super::{
    BaseImageParameters, ContainerConfig, DockerClientParameters, ExtraDirectoriesParameters,
    OutputPathOverrides, ParamError, TargetImageParameters,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONTAINERIZING_MODE: &str = "exploded";
pub const DEFAULT_CONFIGURATION_NAME: &str = "runtimeClasspath";
pub const DEFAULT_SOURCE_SET_NAME: &str = "main";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JibExtension {
    pub from: BaseImageParameters,
    pub to: TargetImageParameters,
    pub container: ContainerConfig,
    pub extra_directories: ExtraDirectoriesParameters,
    pub docker_client: DockerClientParameters,
    pub output_paths: OutputPathOverrides,
    pub allow_insecure_registries: bool,
    pub containerizing_mode: String,
    pub configuration_name: String,
    pub source_set_name: String,
}

impl Default for JibExtension {
    fn default() -> Self {
        Self {
            from: BaseImageParameters::default(),
            to: TargetImageParameters::default(),
            container: ContainerConfig::default(),
            extra_directories: ExtraDirectoriesParameters::default(),
            docker_client: DockerClientParameters::default(),
            output_paths: OutputPathOverrides::default(),
            allow_insecure_registries: false,
            containerizing_mode: DEFAULT_CONTAINERIZING_MODE.to_string(),
            configuration_name: DEFAULT_CONFIGURATION_NAME.to_string(),
            source_set_name: DEFAULT_SOURCE_SET_NAME.to_string(),
        }
    }
}

impl JibExtension {
    /// Checks the values the image pipeline would otherwise reject late.
    /// Image references are not required here: planning works without them.
    pub fn validate(&self) -> Result<(), ParamError> {
        self.container.validate()?;
        self.extra_directories.validate()?;

        if self.configuration_name.trim().is_empty() {
            return Err(ParamError::Missing {
                field: "configurationName".to_string(),
            });
        }
        if self.source_set_name.trim().is_empty() {
            return Err(ParamError::Missing {
                field: "sourceSetName".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ImageFormat;

    #[test]
    fn test_defaults() {
        let extension = JibExtension::default();
        assert_eq!(extension.containerizing_mode, "exploded");
        assert_eq!(extension.configuration_name, "runtimeClasspath");
        assert_eq!(extension.source_set_name, "main");
        assert!(!extension.allow_insecure_registries);
        assert!(extension.validate().is_ok());
    }

    #[test]
    fn test_deserialize_nested_sections() {
        let yaml = r#"
containerizingMode: packaged
from:
  image: eclipse-temurin:21-jre
to:
  image: ghcr.io/acme/app
  tags: [latest, "1.0"]
container:
  mainClass: com.acme.App
  format: OCI
outputPaths:
  tar: dist/app.tar
"#;
        let extension: JibExtension = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(extension.containerizing_mode, "packaged");
        assert_eq!(extension.configuration_name, "runtimeClasspath");
        assert_eq!(extension.to.tags.len(), 2);
        assert_eq!(extension.container.format, ImageFormat::Oci);
        assert!(extension.output_paths.tar.is_some());
        assert!(extension.validate().is_ok());
    }

    #[test]
    fn test_blank_configuration_name_is_rejected() {
        let extension = JibExtension {
            configuration_name: " ".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            extension.validate(),
            Err(ParamError::Missing { .. })
        ));
    }
}
