// crates/localekit-config/src/lib.rs
// ============================================================================
// Module: Localekit Configuration
// Description: Canonical TOML configuration model with fail-closed loading.
// Purpose: Inject scan roots, locale catalogs, and data-store settings at
//          process start instead of embedding them in scripts.
// Dependencies: serde, thiserror, toml, url
// ============================================================================

//! ## Overview
//! [`LocalekitConfig`] is the single configuration surface for the toolkit:
//! the source tree to scan, the per-locale catalog paths, and the optional
//! external data-store collaborator. Loading is fail-closed in the order
//! path guards, size guard, encoding guard, parse, semantic validation.
//!
//! ## Invariants
//! - Credentials never appear in the config file; only the name of the
//!   environment variable holding them does.
//! - A successfully loaded config has a non-empty source root, at least one
//!   extension, and at least one locale entry.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Default config file name looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "localekit.toml";

/// Maximum accepted config file size in bytes.
const MAX_CONFIG_BYTES: u64 = 1024 * 1024;

/// Maximum accepted config path length in bytes.
const MAX_PATH_BYTES: usize = 4096;

/// Maximum accepted length of a single path component in bytes.
const MAX_PATH_COMPONENT_BYTES: usize = 255;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file path exceeds the length guard.
    #[error("config path exceeds max length ({length} > {limit})")]
    PathTooLong {
        /// Actual path length in bytes.
        length: usize,
        /// Maximum allowed length in bytes.
        limit: usize,
    },
    /// A config path component exceeds the component length guard.
    #[error("config path component too long ({length} > {limit})")]
    PathComponentTooLong {
        /// Actual component length in bytes.
        length: usize,
        /// Maximum allowed length in bytes.
        limit: usize,
    },
    /// The config file does not exist.
    #[error("config file not found: {path}")]
    Missing {
        /// The missing config path.
        path: PathBuf,
    },
    /// Reading the config file failed.
    #[error("config io error for {path}: {message}")]
    Io {
        /// The config path being read.
        path: PathBuf,
        /// The underlying I/O error message.
        message: String,
    },
    /// The config file exceeds the size guard.
    #[error("config file exceeds size limit ({size} > {limit})")]
    TooLarge {
        /// Actual file size in bytes.
        size: u64,
        /// Maximum allowed size in bytes.
        limit: u64,
    },
    /// The config file is not valid UTF-8.
    #[error("config file must be utf-8: {path}")]
    NotUtf8 {
        /// The config path with invalid encoding.
        path: PathBuf,
    },
    /// The config file is not valid TOML for this model.
    #[error("config parse error in {path}: {message}")]
    Parse {
        /// The config path that failed to parse.
        path: PathBuf,
        /// The parser error message.
        message: String,
    },
    /// The parsed config violates a semantic constraint.
    #[error("invalid config: {0}")]
    Invalid(String),
    /// The configured credential environment variable is unset or empty.
    #[error("credential env var {name} is not set")]
    CredentialUnset {
        /// The environment variable named by the config.
        name: String,
    },
}

// ============================================================================
// SECTION: Model
// ============================================================================

/// Root configuration for the maintenance toolkit.
///
/// # Invariants
/// - Validated on load; see [`LocalekitConfig::validate`].
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocalekitConfig {
    /// Root directory of the application source tree to scan.
    pub source_root: PathBuf,
    /// File extensions (without dots) included in the scan.
    pub extensions: Vec<String>,
    /// Directory names excluded from traversal; defaults applied when absent.
    #[serde(default)]
    pub exclude_dirs: Option<Vec<String>>,
    /// Locale name to catalog file path.
    pub locales: BTreeMap<String, PathBuf>,
    /// Optional external data-store collaborator settings.
    #[serde(default)]
    pub datastore: Option<DatastoreConfig>,
}

/// Settings for the external managed-database HTTP collaborator.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatastoreConfig {
    /// Target service address (http or https).
    pub endpoint: String,
    /// Name of the environment variable holding the opaque credential.
    pub credential_env: String,
}

impl DatastoreConfig {
    /// Resolves the opaque credential from the configured environment
    /// variable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CredentialUnset`] when the variable is unset
    /// or empty.
    pub fn credential(&self) -> Result<String, ConfigError> {
        match env::var(&self.credential_env) {
            Ok(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(ConfigError::CredentialUnset {
                name: self.credential_env.clone(),
            }),
        }
    }
}

impl LocalekitConfig {
    /// Loads and validates a config file.
    ///
    /// Passing `None` uses [`DEFAULT_CONFIG_FILE`] in the working directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for any guard, parse, or validation failure.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), Path::to_path_buf);
        check_path_guards(&path)?;
        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(ConfigError::Missing {
                    path,
                });
            }
            Err(err) => {
                return Err(ConfigError::Io {
                    path,
                    message: err.to_string(),
                });
            }
        };
        if metadata.len() > MAX_CONFIG_BYTES {
            return Err(ConfigError::TooLarge {
                size: metadata.len(),
                limit: MAX_CONFIG_BYTES,
            });
        }
        let bytes = fs::read(&path).map_err(|err| ConfigError::Io {
            path: path.clone(),
            message: err.to_string(),
        })?;
        let text = String::from_utf8(bytes).map_err(|_| ConfigError::NotUtf8 {
            path: path.clone(),
        })?;
        let config: Self = toml::from_str(&text).map_err(|err| ConfigError::Parse {
            path,
            message: err.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validates semantic constraints on a parsed config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source_root.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("source_root must be non-empty".to_string()));
        }
        if self.extensions.is_empty() {
            return Err(ConfigError::Invalid("extensions must list at least one entry".to_string()));
        }
        if self.extensions.iter().any(|ext| ext.is_empty() || ext.starts_with('.')) {
            return Err(ConfigError::Invalid(
                "extensions must be non-empty and written without dots".to_string(),
            ));
        }
        if self.locales.is_empty() {
            return Err(ConfigError::Invalid("locales must list at least one entry".to_string()));
        }
        if let Some((locale, _)) = self.locales.iter().find(|(_, path)| path.as_os_str().is_empty())
        {
            return Err(ConfigError::Invalid(format!(
                "locale {locale:?} has an empty catalog path"
            )));
        }
        if let Some(datastore) = &self.datastore {
            let endpoint = Url::parse(&datastore.endpoint).map_err(|err| {
                ConfigError::Invalid(format!("datastore.endpoint is not a valid url: {err}"))
            })?;
            if endpoint.scheme() != "http" && endpoint.scheme() != "https" {
                return Err(ConfigError::Invalid(
                    "datastore.endpoint must use http or https".to_string(),
                ));
            }
            if datastore.credential_env.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "datastore.credential_env must be non-empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Guards
// ============================================================================

/// Enforces path length guards before any filesystem access.
fn check_path_guards(path: &Path) -> Result<(), ConfigError> {
    let length = path.as_os_str().len();
    if length > MAX_PATH_BYTES {
        return Err(ConfigError::PathTooLong {
            length,
            limit: MAX_PATH_BYTES,
        });
    }
    for component in path.components() {
        let component_length = component.as_os_str().len();
        if component_length > MAX_PATH_COMPONENT_BYTES {
            return Err(ConfigError::PathComponentTooLong {
                length: component_length,
                limit: MAX_PATH_COMPONENT_BYTES,
            });
        }
    }
    Ok(())
}
