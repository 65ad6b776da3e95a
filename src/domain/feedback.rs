// This file is part of the product LexHub.
// SPDX-FileCopyrightText: 2026 LexHub Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::types::{Feedback, MAX_FEEDBACK_IMAGES};
use crate::storage::{StorageError, read_yaml_file, write_yaml_file};
use chrono::Utc;
use std::path::PathBuf;
use std::sync::RwLock;

#[derive(Debug, Clone)]
pub struct NewFeedback {
    pub kind: i32,
    pub content: String,
    pub contact: Option<String>,
    pub images: Vec<String>,
}

/// Feedback is append-only. Submissions are accepted from anonymous
/// visitors too, so `user_id` is optional.
pub struct FeedbackStore {
    path: PathBuf,
    entries: RwLock<Vec<Feedback>>,
}

impl FeedbackStore {
    pub fn open(path: PathBuf) -> Result<Self, StorageError> {
        let entries: Vec<Feedback> = read_yaml_file(&path, "feedback")?.unwrap_or_default();
        Ok(FeedbackStore {
            path,
            entries: RwLock::new(entries),
        })
    }

    pub fn create(
        &self,
        user_id: Option<u64>,
        new: NewFeedback,
    ) -> Result<Feedback, StorageError> {
        if new.content.trim().is_empty() {
            return Err(StorageError::new("Feedback content is required"));
        }
        if new.images.len() > MAX_FEEDBACK_IMAGES {
            return Err(StorageError::new(format!(
                "At most {} images per feedback",
                MAX_FEEDBACK_IMAGES
            )));
        }

        let entry = Feedback {
            user_id,
            kind: new.kind,
            content: new.content,
            contact: new.contact,
            images: new.images,
            created_at: Utc::now(),
        };

        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut updated = entries.clone();
        updated.push(entry.clone());
        write_yaml_file(&self.path, "feedback", &updated)?;
        *entries = updated;
        Ok(entry)
    }

    pub fn list(&self) -> Vec<Feedback> {
        self.entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (FeedbackStore, tempfile::TempDir) {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = FeedbackStore::open(temp.path().join("feedback.yaml")).expect("store");
        (store, temp)
    }

    fn feedback(content: &str, images: Vec<String>) -> NewFeedback {
        NewFeedback {
            kind: 1,
            content: content.to_string(),
            contact: None,
            images,
        }
    }

    #[test]
    fn accepts_anonymous_and_authenticated_feedback() {
        let (store, _temp) = store();
        store.create(None, feedback("Anonymous note", vec![])).expect("anon");
        store.create(Some(7), feedback("Signed note", vec![])).expect("signed");

        let entries = store.list();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].user_id, None);
        assert_eq!(entries[1].user_id, Some(7));
    }

    #[test]
    fn rejects_empty_content() {
        let (store, _temp) = store();
        assert!(store.create(None, feedback("   ", vec![])).is_err());
    }

    #[test]
    fn caps_attached_images() {
        let (store, _temp) = store();
        let too_many: Vec<String> = (0..=MAX_FEEDBACK_IMAGES)
            .map(|i| format!("img{}.png", i))
            .collect();
        assert!(store.create(None, feedback("note", too_many)).is_err());

        let exactly: Vec<String> = (0..MAX_FEEDBACK_IMAGES)
            .map(|i| format!("img{}.png", i))
            .collect();
        assert!(store.create(None, feedback("note", exactly)).is_ok());
    }
}
