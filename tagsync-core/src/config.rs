//! YAML configuration for `tagsync`.
//!
//! # Storage layout
//!
//! ```text
//! ~/.tagsync/
//!   config.yaml   (mode 0600, written by `tagsync config init`)
//! ```
//!
//! # API pattern
//!
//! Functions that touch the default location come in two forms:
//! - `fn_at(home: &Path, …)`: explicit home; used in tests with `TempDir`
//! - `fn(…)`: derives home from `dirs::home_dir()`, delegates to `_at`

use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::types::{RemoteSetup, SyncConfig};

pub const CONFIG_DIR: &str = ".tagsync";
pub const CONFIG_FILE: &str = "config.yaml";

// ---------------------------------------------------------------------------
// 1. Path helpers
// ---------------------------------------------------------------------------

/// `<home>/.tagsync/config.yaml`. Pure, no I/O.
pub fn config_path_at(home: &Path) -> PathBuf {
    home.join(CONFIG_DIR).join(CONFIG_FILE)
}

/// `config_path_at` convenience wrapper.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(config_path_at(&home()?))
}

// ---------------------------------------------------------------------------
// 2. Load
// ---------------------------------------------------------------------------

/// Load a config from an explicit file.
///
/// Returns `ConfigError::NotFound` if absent and
/// `ConfigError::Parse` (with path + line context) if malformed.
pub fn load_from(path: &Path) -> Result<SyncConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path)?;
    serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load `<home>/.tagsync/config.yaml`, or `Ok(None)` when it was never written.
pub fn load_at(home: &Path) -> Result<Option<SyncConfig>, ConfigError> {
    let path = config_path_at(home);
    if !path.exists() {
        return Ok(None);
    }
    load_from(&path).map(Some)
}

/// `load_at` convenience wrapper.
pub fn load() -> Result<Option<SyncConfig>, ConfigError> {
    load_at(&home()?)
}

// ---------------------------------------------------------------------------
// 3. Save (atomic)
// ---------------------------------------------------------------------------

/// Atomically write `config` to `<home>/.tagsync/config.yaml`.
///
/// Write flow: serialize → `config.yaml.tmp` sibling → `chmod 0600` → `rename`.
pub fn save_at(home: &Path, config: &SyncConfig) -> Result<PathBuf, ConfigError> {
    let path = config_path_at(home);
    let dir = home.join(CONFIG_DIR);
    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
        set_dir_permissions(&dir)?;
    }
    let tmp_path = path.with_file_name(format!("{CONFIG_FILE}.tmp"));

    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(&tmp_path, yaml)?;
    set_file_permissions(&tmp_path)?;
    std::fs::rename(&tmp_path, &path)?;
    Ok(path)
}

/// `save_at` convenience wrapper.
pub fn save(config: &SyncConfig) -> Result<PathBuf, ConfigError> {
    save_at(&home()?, config)
}

// ---------------------------------------------------------------------------
// 4. Validation
// ---------------------------------------------------------------------------

impl SyncConfig {
    /// Reject values that would make `git` misbehave before anything runs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.origin.as_str().trim().is_empty() {
            return Err(ConfigError::Invalid("origin must not be empty".to_string()));
        }
        let remote = self.destination_remote.as_str();
        if remote.trim().is_empty() || remote.chars().any(char::is_whitespace) {
            return Err(ConfigError::Invalid(format!(
                "destination_remote '{remote}' must be a non-empty name without whitespace"
            )));
        }
        if self.git.trim().is_empty() {
            return Err(ConfigError::Invalid("git program must not be empty".to_string()));
        }
        if self.remote_setup == RemoteSetup::Ensure
            && self
                .destination_url
                .as_ref()
                .map_or(true, |url| url.as_str().trim().is_empty())
        {
            return Err(ConfigError::Invalid(
                "remote_setup 'ensure' requires destination_url".to_string(),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn home() -> Result<PathBuf, ConfigError> {
    dirs::home_dir().ok_or(ConfigError::HomeNotFound)
}

#[cfg(unix)]
fn set_dir_permissions(path: &Path) -> Result<(), ConfigError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o700))?;
    Ok(())
}
#[cfg(not(unix))]
fn set_dir_permissions(_path: &Path) -> Result<(), ConfigError> {
    Ok(())
}

#[cfg(unix)]
fn set_file_permissions(path: &Path) -> Result<(), ConfigError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    Ok(())
}
#[cfg(not(unix))]
fn set_file_permissions(_path: &Path) -> Result<(), ConfigError> {
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
