// This file is part of the product LexHub.
// SPDX-FileCopyrightText: 2026 LexHub Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::error::Error;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

const MAX_TEMP_ATTEMPTS: u32 = 100;

#[derive(Debug)]
pub struct StorageError {
    message: String,
}

impl StorageError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for StorageError {}

/// Read a YAML document from disk. A missing or empty file yields `None` so
/// stores can start from their default state on first run.
pub fn read_yaml_file<T: DeserializeOwned>(
    path: &Path,
    label: &str,
) -> Result<Option<T>, StorageError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|err| StorageError::new(format!("Failed to read {} file: {}", label, err)))?;
    if content.trim().is_empty() {
        return Ok(None);
    }
    let decoded = serde_yaml::from_str(&content)
        .map_err(|err| StorageError::new(format!("Failed to parse {} file: {}", label, err)))?;
    Ok(Some(decoded))
}

/// Serialize `value` and replace `path` atomically: write to a temp file in
/// the same directory, fsync, rename over the target, then sync the parent
/// directory. The target is never left half-written.
pub fn write_yaml_file<T: Serialize>(
    path: &Path,
    label: &str,
    value: &T,
) -> Result<(), StorageError> {
    let content = serde_yaml::to_string(value)
        .map_err(|err| StorageError::new(format!("Failed to serialize {}: {}", label, err)))?;
    let parent = path
        .parent()
        .ok_or_else(|| StorageError::new(format!("{} file path has no parent directory", label)))?;
    let file_name = path
        .file_name()
        .ok_or_else(|| StorageError::new(format!("{} file path has no file name", label)))?;
    let (mut file, temp_path) = create_temp_file(parent, file_name, label)?;

    if let Ok(metadata) = fs::metadata(path) {
        #[cfg(unix)]
        {
            if let Err(err) = fs::set_permissions(&temp_path, metadata.permissions()) {
                let _ = fs::remove_file(&temp_path);
                return Err(StorageError::new(format!(
                    "Failed to set temp {} file permissions: {}",
                    label, err
                )));
            }
        }
    }

    if let Err(err) = file.write_all(content.as_bytes()) {
        let _ = fs::remove_file(&temp_path);
        return Err(StorageError::new(format!(
            "Failed to write {} temp file: {}",
            label, err
        )));
    }
    if let Err(err) = file.sync_all() {
        let _ = fs::remove_file(&temp_path);
        return Err(StorageError::new(format!(
            "Failed to sync {} temp file: {}",
            label, err
        )));
    }

    if let Err(err) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(StorageError::new(format!(
            "Failed to replace {} file: {}",
            label, err
        )));
    }

    #[cfg(unix)]
    {
        if let Err(err) = sync_parent_dir(parent) {
            log::warn!("{} directory sync failed: {}", label, err);
        }
    }

    Ok(())
}

fn create_temp_file(
    parent: &Path,
    file_name: &std::ffi::OsStr,
    label: &str,
) -> Result<(fs::File, PathBuf), StorageError> {
    let file_name = file_name
        .to_str()
        .ok_or_else(|| StorageError::new(format!("{} file name is not valid UTF-8", label)))?;
    for attempt in 0..MAX_TEMP_ATTEMPTS {
        let temp_name = format!(".{}.tmp.{}.{}", file_name, std::process::id(), attempt);
        let temp_path = parent.join(temp_name);
        match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_path)
        {
            Ok(file) => return Ok((file, temp_path)),
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => continue,
            Err(err) => {
                return Err(StorageError::new(format!(
                    "Failed to create temp {} file: {}",
                    label, err
                )));
            }
        }
    }
    Err(StorageError::new(format!(
        "Failed to create temp {} file after multiple attempts",
        label
    )))
}

#[cfg(unix)]
fn sync_parent_dir(parent: &Path) -> Result<(), std::io::Error> {
    let dir = fs::File::open(parent)?;
    dir.sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn missing_file_reads_as_none() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("absent.yaml");
        let loaded: Option<HashMap<String, u32>> =
            read_yaml_file(&path, "test").expect("read missing");
        assert!(loaded.is_none());
    }

    #[test]
    fn empty_file_reads_as_none() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("empty.yaml");
        std::fs::write(&path, "  \n").expect("write");
        let loaded: Option<HashMap<String, u32>> =
            read_yaml_file(&path, "test").expect("read empty");
        assert!(loaded.is_none());
    }

    #[test]
    fn write_then_read_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("data.yaml");
        let mut value = HashMap::new();
        value.insert("alpha".to_string(), 1u32);
        write_yaml_file(&path, "test", &value).expect("write");
        let loaded: HashMap<String, u32> = read_yaml_file(&path, "test")
            .expect("read")
            .expect("present");
        assert_eq!(loaded, value);
    }

    #[cfg(unix)]
    #[test]
    fn failed_write_leaves_existing_file_untouched() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("data.yaml");
        std::fs::write(&path, "original: 1\n").expect("write original");

        let dir = temp.path();
        let original_mode = std::fs::metadata(dir).expect("metadata").permissions().mode();
        std::fs::set_permissions(dir, std::fs::Permissions::from_mode(original_mode & 0o555))
            .expect("set read-only");

        let mut value = HashMap::new();
        value.insert("alpha".to_string(), 2u32);
        let result = write_yaml_file(&path, "test", &value);
        assert!(result.is_err());

        std::fs::set_permissions(dir, std::fs::Permissions::from_mode(original_mode))
            .expect("restore permissions");
        let content = std::fs::read_to_string(&path).expect("read");
        assert_eq!(content, "original: 1\n");
    }
}
