// This file is part of the product LexHub.
// SPDX-FileCopyrightText: 2026 LexHub Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::types::{IamError, StoredUser, StoredUsersData, UsersData};
use crate::storage::{read_yaml_file, write_yaml_file};
use std::path::PathBuf;

/// Persistence seam for user accounts. The service only ever talks to this
/// trait, so tests can swap the YAML file for an in-memory map.
pub trait UserStore: Send + Sync {
    fn load(&self) -> Result<UsersData, IamError>;
    fn save(&self, users: &UsersData) -> Result<(), IamError>;
}

/// Users persisted as a YAML map keyed by username.
pub struct FileUserStore {
    path: PathBuf,
}

impl FileUserStore {
    pub fn new(path: PathBuf) -> Self {
        FileUserStore { path }
    }
}

impl UserStore for FileUserStore {
    fn load(&self) -> Result<UsersData, IamError> {
        let stored: StoredUsersData = read_yaml_file(&self.path, "users")
            .map_err(|err| IamError::ParseError(err.to_string()))?
            .unwrap_or_default();
        Ok(stored
            .into_iter()
            .map(|(username, record)| {
                let user = record.into_user(username.clone());
                (username, user)
            })
            .collect())
    }

    fn save(&self, users: &UsersData) -> Result<(), IamError> {
        let stored: StoredUsersData = users
            .iter()
            .map(|(username, user)| (username.clone(), StoredUser::from_user(user)))
            .collect();
        write_yaml_file(&self.path, "users", &stored)
            .map_err(|err| IamError::FileError(err.to_string()))
    }
}

#[cfg(test)]
pub struct MemoryUserStore {
    users: std::sync::Mutex<UsersData>,
    pub fail_saves: std::sync::atomic::AtomicBool,
}

#[cfg(test)]
impl MemoryUserStore {
    pub fn new(users: UsersData) -> Self {
        MemoryUserStore {
            users: std::sync::Mutex::new(users),
            fail_saves: std::sync::atomic::AtomicBool::new(false),
        }
    }
}

#[cfg(test)]
impl UserStore for MemoryUserStore {
    fn load(&self) -> Result<UsersData, IamError> {
        Ok(self.users.lock().unwrap().clone())
    }

    fn save(&self, users: &UsersData) -> Result<(), IamError> {
        if self.fail_saves.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(IamError::FileError("save disabled".to_string()));
        }
        *self.users.lock().unwrap() = users.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iam::types::Role;
    use chrono::Utc;

    fn sample_users() -> UsersData {
        let mut users = UsersData::new();
        users.insert(
            "alice".to_string(),
            crate::iam::types::User {
                id: 1,
                username: "alice".to_string(),
                email: Some("alice@example.com".to_string()),
                password_hash: "$argon2id$stub".to_string(),
                is_active: true,
                role: Some(Role::Lawyer),
                created_at: Utc::now(),
            },
        );
        users
    }

    #[test]
    fn file_store_round_trips_users() {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = FileUserStore::new(temp.path().join("users.yaml"));
        let users = sample_users();
        store.save(&users).expect("save");
        let loaded = store.load().expect("load");
        assert_eq!(loaded.len(), 1);

        let alice = loaded.get("alice").expect("alice");
        assert_eq!(alice.id, 1);
        assert_eq!(alice.username, "alice");
        assert_eq!(alice.role, Some(Role::Lawyer));
    }

    #[test]
    fn missing_file_loads_empty() {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = FileUserStore::new(temp.path().join("users.yaml"));
        assert!(store.load().expect("load").is_empty());
    }

    #[test]
    fn stored_record_defaults_is_active() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("users.yaml");
        std::fs::write(
            &path,
            "bob:\n  id: 7\n  password_hash: \"$argon2id$stub\"\n  created_at: 2026-01-01T00:00:00Z\n",
        )
        .expect("write");
        let store = FileUserStore::new(path);
        let loaded = store.load().expect("load");
        let bob = loaded.get("bob").expect("bob");
        assert!(bob.is_active);
        assert_eq!(bob.role, None);
    }
}
