//! User-declared containerization parameters
//!
//! Everything in here is a passive record: deserialized once from the project
//! manifest, validated, and then only read. The resolver consumes
//! [`JibExtension::containerizing_mode`] and [`JibExtension::configuration_name`];
//! the rest is handed through to the image pipeline.

pub mod container;
pub mod docker_client;
pub mod extension;
pub mod extra_dirs;
pub mod image;
pub mod output_paths;

pub use container::{ContainerConfig, ImageFormat, PortSpec, Protocol};
pub use docker_client::DockerClientParameters;
pub use extension::JibExtension;
pub use extra_dirs::{ExtraDirectoriesParameters, ExtraDirectoryParameters};
pub use image::{
    AuthParameters, BaseImageParameters, BaseImageSource, CredHelperParameters, Credential,
    CredentialHelper, Platform, PlatformParameters, TargetImageParameters,
};
pub use output_paths::{OutputPathOverrides, OutputPaths, OutputSlot};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    #[error("Invalid value '{value}' for {field}. Valid options: {expected}")]
    InvalidEnumValue {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("Invalid port specification '{value}': {reason}")]
    InvalidPort { value: String, reason: String },

    #[error("Invalid timestamp '{value}' for {field}: expected {expected}")]
    InvalidTimestamp {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("Invalid permissions '{value}' for {path}: expected three octal digits")]
    InvalidPermissions { path: String, value: String },

    #[error("{field} must be an absolute unix path, got '{value}'")]
    NotAbsolute { field: String, value: String },

    #[error("Missing required value: {field}")]
    Missing { field: String },
}

/// Unix paths inside the image are always '/'-separated, independent of the host.
pub(crate) fn require_absolute_unix(field: impl Into<String>, value: &str) -> Result<(), ParamError> {
    if value.starts_with('/') {
        Ok(())
    } else {
        Err(ParamError::NotAbsolute {
            field: field.into(),
            value: value.to_string(),
        })
    }
}
