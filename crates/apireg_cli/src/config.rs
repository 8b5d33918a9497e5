use std::fs;
use std::path::{Path, PathBuf};

use apireg_gen::{VersionOrdering, DEFAULT_OUTPUT_FILE_BASE_NAME, DEFAULT_RESOURCE_MARKER};
use serde::Deserialize;
use thiserror::Error;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "apireg.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid value for '{key}': {message}")]
    Invalid { key: &'static str, message: String },
}

/// One source of settings; unset fields defer to lower layers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigLayer {
    pub output_base: Option<PathBuf>,
    pub output_file_base_name: Option<String>,
    pub go_header_file: Option<PathBuf>,
    pub resource_marker: Option<String>,
    pub version_ordering: Option<VersionOrdering>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    output_base: Option<PathBuf>,
    output_file_base_name: Option<String>,
    go_header_file: Option<PathBuf>,
    #[serde(default)]
    classifier: ClassifierSection,
    #[serde(default)]
    ordering: OrderingSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ClassifierSection {
    marker: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct OrderingSection {
    versions: Option<VersionOrdering>,
}

impl ConfigLayer {
    pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        // Relative paths in the file are taken relative to the file itself.
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(Self {
            output_base: file.output_base.map(|p| base.join(p)),
            output_file_base_name: file.output_file_base_name,
            go_header_file: file.go_header_file.map(|p| base.join(p)),
            resource_marker: file.classifier.marker,
            version_ordering: file.ordering.versions,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    /// `explicit` must exist; otherwise `apireg.toml` in `cwd` is optional.
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let candidate = cwd.join(DEFAULT_CONFIG_FILE);
                if candidate.is_file() {
                    Self::load(&candidate)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Fields set on `other` win.
    pub fn merge(self, other: ConfigLayer) -> ConfigLayer {
        ConfigLayer {
            output_base: other.output_base.or(self.output_base),
            output_file_base_name: other.output_file_base_name.or(self.output_file_base_name),
            go_header_file: other.go_header_file.or(self.go_header_file),
            resource_marker: other.resource_marker.or(self.resource_marker),
            version_ordering: other.version_ordering.or(self.version_ordering),
        }
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub output_base: PathBuf,
    pub output_file_base_name: String,
    pub go_header_file: Option<PathBuf>,
    pub resource_marker: String,
    pub version_ordering: VersionOrdering,
}

impl Settings {
    pub fn resolve(layer: ConfigLayer) -> Result<Self, ConfigError> {
        let output_file_base_name = layer
            .output_file_base_name
            .unwrap_or_else(|| DEFAULT_OUTPUT_FILE_BASE_NAME.to_string());
        let trimmed = output_file_base_name.trim();
        if trimmed.is_empty() || trimmed.contains(['/', '\\']) {
            return Err(ConfigError::Invalid {
                key: "output_file_base_name",
                message: format!("'{output_file_base_name}' is not a plain file name"),
            });
        }

        let resource_marker = layer
            .resource_marker
            .unwrap_or_else(|| DEFAULT_RESOURCE_MARKER.to_string());
        if resource_marker.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "classifier.marker",
                message: "marker must not be empty".to_string(),
            });
        }

        Ok(Self {
            output_base: layer.output_base.unwrap_or_else(|| PathBuf::from(".")),
            output_file_base_name: trimmed.to_string(),
            go_header_file: layer.go_header_file,
            resource_marker: resource_marker.trim().to_string(),
            version_ordering: layer.version_ordering.unwrap_or_default(),
        })
    }
}
