//! Container configuration record
//!
//! A fully defaulted snapshot of what the user declared about the running
//! container. Only the image format is parsed eagerly (at deserialization);
//! the remaining string-typed values are checked by [`ContainerConfig::validate`].

use super::{require_absolute_unix, ParamError};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// App root used downstream when the user leaves `appRoot` empty.
pub const DEFAULT_APP_ROOT: &str = "/app";

pub const EPOCH_PLUS_SECOND: &str = "EPOCH_PLUS_SECOND";
pub const EPOCH: &str = "EPOCH";
pub const USE_CURRENT_TIMESTAMP: &str = "USE_CURRENT_TIMESTAMP";

/// Single-element entrypoint that keeps the base image's entrypoint.
pub const INHERIT_ENTRYPOINT: &str = "INHERIT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ImageFormat {
    #[default]
    Docker,
    Oci,
}

impl ImageFormat {
    pub fn name(&self) -> &'static str {
        match self {
            ImageFormat::Docker => "Docker",
            ImageFormat::Oci => "OCI",
        }
    }
}

impl FromStr for ImageFormat {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Docker" => Ok(ImageFormat::Docker),
            "OCI" => Ok(ImageFormat::Oci),
            _ => Err(ParamError::InvalidEnumValue {
                field: "container.format",
                value: s.to_string(),
                expected: "Docker, OCI",
            }),
        }
    }
}

impl TryFrom<String> for ImageFormat {
    type Error = ParamError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ImageFormat> for String {
    fn from(format: ImageFormat) -> Self {
        format.name().to_string()
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Tcp,
    Udp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PortSpec {
    pub port: u16,
    pub protocol: Protocol,
}

impl fmt::Display for PortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let protocol = match self.protocol {
            Protocol::Tcp => "tcp",
            Protocol::Udp => "udp",
        };
        write!(f, "{}/{}", self.port, protocol)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContainerConfig {
    #[serde(
        deserialize_with = "deserialize_entrypoint",
        skip_serializing_if = "Option::is_none"
    )]
    pub entrypoint: Option<Vec<String>>,
    pub jvm_flags: Vec<String>,
    pub environment: BTreeMap<String, String>,
    pub extra_classpath: Vec<String>,
    pub expand_classpath_dependencies: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,
    pub format: ImageFormat,
    pub ports: Vec<String>,
    pub volumes: Vec<String>,
    pub labels: BTreeMap<String, String>,
    pub app_root: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_directory: Option<String>,
    pub files_modification_time: String,
    pub creation_time: String,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            entrypoint: None,
            jvm_flags: Vec::new(),
            environment: BTreeMap::new(),
            extra_classpath: Vec::new(),
            expand_classpath_dependencies: false,
            main_class: None,
            args: None,
            format: ImageFormat::Docker,
            ports: Vec::new(),
            volumes: Vec::new(),
            labels: BTreeMap::new(),
            app_root: String::new(),
            user: None,
            working_directory: None,
            files_modification_time: EPOCH_PLUS_SECOND.to_string(),
            creation_time: EPOCH.to_string(),
        }
    }
}

/// Accepts both `entrypoint: "/bin/sh"` and `entrypoint: ["/bin/sh", "-c"]`.
fn deserialize_entrypoint<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(
        Option::<OneOrMany>::deserialize(deserializer)?.map(|value| match value {
            OneOrMany::One(single) => vec![single],
            OneOrMany::Many(list) => list,
        }),
    )
}

impl ContainerConfig {
    pub fn effective_app_root(&self) -> &str {
        if self.app_root.is_empty() {
            DEFAULT_APP_ROOT
        } else {
            &self.app_root
        }
    }

    pub fn inherits_entrypoint(&self) -> bool {
        matches!(self.entrypoint.as_deref(), Some([single]) if single == INHERIT_ENTRYPOINT)
    }

    pub fn exposed_ports(&self) -> Result<Vec<PortSpec>, ParamError> {
        parse_ports(&self.ports)
    }

    pub fn modification_time(&self) -> Result<DateTime<Utc>, ParamError> {
        parse_modification_time(&self.files_modification_time)
    }

    pub fn creation_time_at(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>, ParamError> {
        parse_creation_time(&self.creation_time, now)
    }

    pub fn validate(&self) -> Result<(), ParamError> {
        self.exposed_ports()?;

        for volume in &self.volumes {
            require_absolute_unix("container.volumes", volume)?;
        }
        if !self.app_root.is_empty() {
            require_absolute_unix("container.appRoot", &self.app_root)?;
        }
        if let Some(dir) = &self.working_directory {
            require_absolute_unix("container.workingDirectory", dir)?;
        }

        self.modification_time()?;
        self.creation_time_at(Utc::now())?;
        Ok(())
    }
}

fn port_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\d+)(?:-(\d+))?(?:/((?i:tcp|udp)))?$").expect("port pattern is valid")
    })
}

/// Parses `8080`, `9000-9002` and `53/udp` style port declarations, expanding
/// ranges. Duplicates are dropped while keeping declaration order.
pub fn parse_ports(ports: &[String]) -> Result<Vec<PortSpec>, ParamError> {
    let mut parsed: Vec<PortSpec> = Vec::new();

    for raw in ports {
        let invalid = |reason: &str| ParamError::InvalidPort {
            value: raw.clone(),
            reason: reason.to_string(),
        };

        let captures = port_pattern()
            .captures(raw.trim())
            .ok_or_else(|| invalid("expected <port>, <min>-<max> with optional /tcp or /udp"))?;

        let min: u16 = captures[1]
            .parse()
            .map_err(|_| invalid("port number out of range"))?;
        let max: u16 = match captures.get(2) {
            Some(m) => m
                .as_str()
                .parse()
                .map_err(|_| invalid("port number out of range"))?,
            None => min,
        };
        if max < min {
            return Err(invalid("smaller number must come first"));
        }

        let protocol = match captures.get(3) {
            Some(p) if p.as_str().eq_ignore_ascii_case("udp") => Protocol::Udp,
            _ => Protocol::Tcp,
        };

        for port in min..=max {
            let spec = PortSpec { port, protocol };
            if !parsed.contains(&spec) {
                parsed.push(spec);
            }
        }
    }

    Ok(parsed)
}

fn epoch_plus(seconds: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(seconds, 0).unwrap_or_default()
}

fn parse_iso_instant(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%z"))
        .or_else(|_| DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f%z"))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

pub fn parse_modification_time(value: &str) -> Result<DateTime<Utc>, ParamError> {
    if value == EPOCH_PLUS_SECOND {
        return Ok(epoch_plus(1));
    }

    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| ParamError::InvalidTimestamp {
            field: "container.filesModificationTime",
            value: value.to_string(),
            expected: "EPOCH_PLUS_SECOND or an ISO-8601 date-time with offset",
        })
}

pub fn parse_creation_time(value: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, ParamError> {
    match value {
        EPOCH => Ok(epoch_plus(0)),
        USE_CURRENT_TIMESTAMP => Ok(now),
        other => parse_iso_instant(other).ok_or_else(|| ParamError::InvalidTimestamp {
            field: "container.creationTime",
            value: other.to_string(),
            expected: "EPOCH, USE_CURRENT_TIMESTAMP or an ISO-8601 date-time with offset",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let config = ContainerConfig::default();
        assert!(config.entrypoint.is_none());
        assert!(config.jvm_flags.is_empty());
        assert!(!config.expand_classpath_dependencies);
        assert_eq!(config.format, ImageFormat::Docker);
        assert_eq!(config.app_root, "");
        assert_eq!(config.effective_app_root(), DEFAULT_APP_ROOT);
        assert_eq!(config.files_modification_time, EPOCH_PLUS_SECOND);
        assert_eq!(config.creation_time, EPOCH);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_image_format_parse_is_case_sensitive() {
        assert_eq!("Docker".parse::<ImageFormat>().unwrap(), ImageFormat::Docker);
        assert_eq!("OCI".parse::<ImageFormat>().unwrap(), ImageFormat::Oci);

        let err = "oci".parse::<ImageFormat>().unwrap_err();
        assert!(matches!(err, ParamError::InvalidEnumValue { .. }));
    }

    #[test]
    fn test_invalid_format_fails_at_deserialization() {
        let result: Result<ContainerConfig, _> = serde_yaml::from_str("format: Podman\n");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Podman"), "unexpected error: {}", err);
    }

    #[test]
    fn test_deserialize_partial_keeps_defaults() {
        let yaml = r#"
mainClass: com.example.Main
jvmFlags: ["-Xmx512m"]
format: OCI
ports: ["8080"]
"#;
        let config: ContainerConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.main_class.as_deref(), Some("com.example.Main"));
        assert_eq!(config.jvm_flags, strings(&["-Xmx512m"]));
        assert_eq!(config.format, ImageFormat::Oci);
        assert_eq!(config.creation_time, EPOCH);
        assert!(config.labels.is_empty());
    }

    #[test]
    fn test_entrypoint_accepts_single_string() {
        let config: ContainerConfig = serde_yaml::from_str("entrypoint: INHERIT\n").unwrap();
        assert_eq!(config.entrypoint, Some(strings(&["INHERIT"])));
        assert!(config.inherits_entrypoint());

        let config: ContainerConfig =
            serde_yaml::from_str("entrypoint: [\"/bin/sh\", \"-c\"]\n").unwrap();
        assert_eq!(config.entrypoint, Some(strings(&["/bin/sh", "-c"])));
        assert!(!config.inherits_entrypoint());
    }

    #[test]
    fn test_parse_ports_expands_ranges() {
        let ports = parse_ports(&strings(&["8080", "9000-9002/udp", "8080/tcp"])).unwrap();
        let rendered: Vec<String> = ports.iter().map(|p| p.to_string()).collect();
        assert_eq!(
            rendered,
            strings(&["8080/tcp", "9000/udp", "9001/udp", "9002/udp"])
        );
    }

    #[test]
    fn test_parse_ports_rejects_reversed_range() {
        let err = parse_ports(&strings(&["2000-1000"])).unwrap_err();
        assert!(err.to_string().contains("smaller number must come first"));
    }

    #[test]
    fn test_parse_ports_rejects_garbage() {
        assert!(parse_ports(&strings(&["http"])).is_err());
        assert!(parse_ports(&strings(&["70000"])).is_err());
        assert!(parse_ports(&strings(&["80/sctp"])).is_err());
    }

    #[test]
    fn test_modification_time() {
        assert_eq!(parse_modification_time(EPOCH_PLUS_SECOND).unwrap().timestamp(), 1);

        let parsed = parse_modification_time("2020-01-01T00:00:00+01:00").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2019-12-31T23:00:00+00:00");

        assert!(parse_modification_time("yesterday").is_err());
    }

    #[test]
    fn test_creation_time() {
        let now = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();

        assert_eq!(parse_creation_time(EPOCH, now).unwrap().timestamp(), 0);
        assert_eq!(parse_creation_time(USE_CURRENT_TIMESTAMP, now).unwrap(), now);

        let colon = parse_creation_time("2024-01-02T03:04:05+01:00", now).unwrap();
        let compact = parse_creation_time("2024-01-02T03:04:05+0100", now).unwrap();
        assert_eq!(colon, compact);

        assert!(parse_creation_time("not-a-date", now).is_err());
    }

    #[test]
    fn test_validate_rejects_relative_paths() {
        let config = ContainerConfig {
            volumes: strings(&["data"]),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ParamError::NotAbsolute { .. })
        ));

        let config = ContainerConfig {
            app_root: "srv".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ContainerConfig {
            working_directory: Some("/srv".to_string()),
            app_root: "/srv/app".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_timestamps() {
        let config = ContainerConfig {
            creation_time: "soon".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ParamError::InvalidTimestamp { field: "container.creationTime", .. })
        ));
    }
}
