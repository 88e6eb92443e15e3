//! Optional TOML configuration.
//!
//! Each section overrides individual fields of the built-in layer presets;
//! anything not named keeps its default:
//!
//! ```toml
//! [drive]
//! default_speed_mps = 13.9
//!
//! [walk]
//! speed_attributes = ["walking_speed"]
//! capacity = 500.0
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;
use toml::{Table, Value};

use nf_network::{LayerSpec, NetworkError};

const SECTIONS: [&str; 2] = ["drive", "walk"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failure reading {}: {source}", path.display())]
    Read {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failure decoding configuration: {0}")]
    Decode(#[from] toml::de::Error),

    #[error("failure encoding layer defaults: {0}")]
    Encode(#[from] toml::ser::Error),

    #[error("unknown configuration section [{0}] (expected [drive] or [walk])")]
    UnknownSection(String),

    #[error("[{0}] must be a table")]
    NotATable(String),

    #[error("[{section}]: {source}")]
    Layer {
        section: String,
        #[source]
        source:  NetworkError,
    },
}

/// Layer parameters for one run.
#[derive(Clone, Debug, PartialEq)]
pub struct NetfuseConfig {
    pub drive: LayerSpec,
    pub walk:  LayerSpec,
}

impl Default for NetfuseConfig {
    fn default() -> Self {
        Self { drive: LayerSpec::drive(), walk: LayerSpec::walk() }
    }
}

impl NetfuseConfig {
    /// Parse a TOML document and apply it over the presets.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let mut table: Table = s.parse()?;
        if let Some(unknown) = table.keys().find(|k| !SECTIONS.contains(&k.as_str())) {
            return Err(ConfigError::UnknownSection(unknown.clone()));
        }
        Ok(Self {
            drive: overlay("drive", LayerSpec::drive(), table.remove("drive"))?,
            walk:  overlay("walk", LayerSpec::walk(), table.remove("walk"))?,
        })
    }
}

impl TryFrom<&Path> for NetfuseConfig {
    type Error = ConfigError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let s = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&s)
    }
}

/// Replace the fields of `base` named in `section`, then validate.
fn overlay(name: &str, base: LayerSpec, section: Option<Value>) -> Result<LayerSpec, ConfigError> {
    let Some(section) = section else {
        return Ok(base);
    };
    let Value::Table(fields) = section else {
        return Err(ConfigError::NotATable(name.to_owned()));
    };

    let mut merged = Table::try_from(&base)?;
    merged.extend(fields);
    let spec = merged.try_into::<LayerSpec>()?;
    spec.validate()
        .map_err(|source| ConfigError::Layer { section: name.to_owned(), source })?;
    Ok(spec)
}
