//! TOML configuration file reading.
use serde::de::DeserializeOwned;
use std::path::Path;

use crate::error::ConfigError;

/// Read and deserialize a TOML file.
///
/// Unlike optional config fragments, the skills configuration is required:
/// a missing file is an error rather than an empty document.
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] if `path` does not exist,
/// [`ConfigError::Io`] if it cannot be read, and [`ConfigError::Parse`] if
/// it is not valid TOML for `T`.
pub fn load_config<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
