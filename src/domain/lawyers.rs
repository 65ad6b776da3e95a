// This file is part of the product LexHub.
// SPDX-FileCopyrightText: 2026 LexHub Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::types::LawyerProfile;
use crate::storage::{StorageError, read_yaml_file, write_yaml_file};
use std::path::PathBuf;
use std::sync::RwLock;

/// The public lawyer directory. One profile per user; lawyers publish and
/// update their own entry, everyone can browse.
pub struct LawyerStore {
    path: PathBuf,
    profiles: RwLock<Vec<LawyerProfile>>,
}

impl LawyerStore {
    pub fn open(path: PathBuf) -> Result<Self, StorageError> {
        let profiles: Vec<LawyerProfile> = read_yaml_file(&path, "lawyers")?.unwrap_or_default();
        Ok(LawyerStore {
            path,
            profiles: RwLock::new(profiles),
        })
    }

    /// Insert or replace the profile for `profile.user_id`.
    pub fn upsert(&self, profile: LawyerProfile) -> Result<LawyerProfile, StorageError> {
        let mut profiles = self
            .profiles
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut updated = profiles.clone();
        updated.retain(|p| p.user_id != profile.user_id);
        updated.push(profile.clone());
        write_yaml_file(&self.path, "lawyers", &updated)?;
        *profiles = updated;
        Ok(profile)
    }

    /// Browse profiles, optionally narrowed by a free-text keyword over
    /// name, organization and practice area, and by directory category.
    pub fn list(&self, keyword: Option<&str>, category: Option<&str>) -> Vec<LawyerProfile> {
        let keyword = keyword.map(|k| k.to_lowercase());
        self.profiles
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .filter(|p| match &keyword {
                Some(k) => {
                    p.name.to_lowercase().contains(k)
                        || p.organization
                            .as_deref()
                            .is_some_and(|o| o.to_lowercase().contains(k))
                        || p.practice_area
                            .as_deref()
                            .is_some_and(|a| a.to_lowercase().contains(k))
                        || p.expertise_areas.iter().any(|e| e.to_lowercase().contains(k))
                }
                None => true,
            })
            .filter(|p| match category {
                Some(c) => p.categories.iter().any(|pc| pc == c),
                None => true,
            })
            .cloned()
            .collect()
    }

    pub fn get(&self, user_id: u64) -> Option<LawyerProfile> {
        self.profiles
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .find(|p| p.user_id == user_id)
            .cloned()
    }
}
