// This file is part of the product LexHub.
// SPDX-FileCopyrightText: 2026 LexHub Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::types::UploadedFile;
use crate::storage::{StorageError, read_yaml_file, write_yaml_file};
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use uuid::Uuid;

/// Upload storage: bytes on disk under the uploads directory, metadata in a
/// YAML index. Stored names get a random prefix so uploads never collide
/// and a hostile filename cannot escape the directory.
pub struct FileStore {
    index_path: PathBuf,
    uploads_dir: PathBuf,
    files: RwLock<Vec<UploadedFile>>,
}

impl FileStore {
    pub fn open(index_path: PathBuf, uploads_dir: PathBuf) -> Result<Self, StorageError> {
        let files: Vec<UploadedFile> = read_yaml_file(&index_path, "files")?.unwrap_or_default();
        Ok(FileStore {
            index_path,
            uploads_dir,
            files: RwLock::new(files),
        })
    }

    // Keep only the final path component and drop anything the filesystem
    // would choke on.
    fn sanitize_filename(name: &str) -> String {
        let base = Path::new(name)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("")
            .trim();
        let cleaned: String = base
            .chars()
            .map(|c| if c == '/' || c == '\\' || c == '\0' { '_' } else { c })
            .collect();
        if cleaned.is_empty() {
            "upload".to_string()
        } else {
            cleaned
        }
    }

    pub fn save_upload(
        &self,
        user_id: u64,
        original_filename: &str,
        content_type: Option<&str>,
        data: &[u8],
    ) -> Result<UploadedFile, StorageError> {
        let safe_name = Self::sanitize_filename(original_filename);
        let stored_filename = format!("{}_{}", Uuid::new_v4().simple(), safe_name);
        let target = self.uploads_dir.join(&stored_filename);

        fs::write(&target, data)
            .map_err(|err| StorageError::new(format!("Failed to write upload: {}", err)))?;

        let record = UploadedFile {
            user_id,
            original_filename: safe_name,
            stored_filename,
            content_type: content_type.map(|s| s.to_string()),
            size: data.len() as u64,
            created_at: Utc::now(),
        };

        let mut files = self
            .files
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut updated = files.clone();
        updated.push(record.clone());
        if let Err(err) = write_yaml_file(&self.index_path, "files", &updated) {
            // The index is the source of truth; drop the orphaned bytes.
            let _ = fs::remove_file(&target);
            return Err(err);
        }
        *files = updated;
        log::info!(
            "Stored upload {} ({} bytes) for user {}",
            record.stored_filename,
            record.size,
            user_id
        );
        Ok(record)
    }

    /// Uploads belonging to the user, newest first.
    pub fn list_for_user(&self, user_id: u64) -> Vec<UploadedFile> {
        let mut matches: Vec<UploadedFile> = self
            .files
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .filter(|f| f.user_id == user_id)
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matches
    }

    pub fn get(&self, stored_filename: &str) -> Option<UploadedFile> {
        self.files
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .find(|f| f.stored_filename == stored_filename)
            .cloned()
    }

    pub fn read_content(&self, file: &UploadedFile) -> Result<Vec<u8>, StorageError> {
        fs::read(self.uploads_dir.join(&file.stored_filename))
            .map_err(|err| StorageError::new(format!("Failed to read upload: {}", err)))
    }
}
