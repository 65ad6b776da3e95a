// This file is part of the product LexHub.
// SPDX-FileCopyrightText: 2026 LexHub Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::config::ConfigError;
use std::fs;
use std::path::{Path, PathBuf};

/// Canonical filesystem layout under the runtime root:
/// `config.yaml`, `users.yaml`, `state/` (domain YAML stores) and
/// `uploads/` (file contents).
#[derive(Debug, Clone)]
pub struct RuntimePaths {
    pub root: PathBuf,
    pub config_file: PathBuf,
    pub users_file: PathBuf,
    pub state_dir: PathBuf,
    pub uploads_dir: PathBuf,
}

impl RuntimePaths {
    pub fn from_root(root: &Path) -> Result<Self, ConfigError> {
        let root_path = if root.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            root.to_path_buf()
        };

        if !root_path.exists() {
            fs::create_dir_all(&root_path).map_err(|e| {
                ConfigError::ValidationError(format!(
                    "Failed to create runtime root '{}': {}",
                    root_path.display(),
                    e
                ))
            })?;
        }

        let root_canonical = root_path.canonicalize().map_err(|e| {
            ConfigError::ValidationError(format!(
                "Failed to canonicalize runtime root '{}': {}",
                root_path.display(),
                e
            ))
        })?;

        let config_file = root_canonical.join("config.yaml");
        let users_file = root_canonical.join("users.yaml");
        let state_dir = root_canonical.join("state");
        let uploads_dir = root_canonical.join("uploads");

        ensure_dir_exists(&state_dir)?;
        ensure_dir_exists(&uploads_dir)?;

        Ok(RuntimePaths {
            root: root_canonical,
            config_file,
            users_file,
            state_dir,
            uploads_dir,
        })
    }

    pub fn state_file(&self, name: &str) -> PathBuf {
        self.state_dir.join(name)
    }
}

fn ensure_dir_exists(dir: &Path) -> Result<(), ConfigError> {
    if dir.exists() {
        if !dir.is_dir() {
            return Err(ConfigError::ValidationError(format!(
                "Path exists but is not a directory: {}",
                dir.display()
            )));
        }
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(|e| {
        ConfigError::ValidationError(format!(
            "Failed to create directory '{}': {}",
            dir.display(),
            e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_root_creates_layout() {
        let temp = tempfile::tempdir().expect("tempdir");
        let paths = RuntimePaths::from_root(temp.path()).expect("runtime paths");
        assert!(paths.state_dir.is_dir());
        assert!(paths.uploads_dir.is_dir());
        assert_eq!(paths.state_file("cases.yaml"), paths.state_dir.join("cases.yaml"));
    }

    #[test]
    fn from_root_creates_missing_root() {
        let temp = tempfile::tempdir().expect("tempdir");
        let nested = temp.path().join("nested/runtime");
        let paths = RuntimePaths::from_root(&nested).expect("runtime paths");
        assert!(paths.root.is_dir());
    }
}
