// This file is part of the product LexHub.
// SPDX-FileCopyrightText: 2026 LexHub Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Lawyer,
    Client,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub email: Option<String>,
    pub password_hash: String,
    pub is_active: bool,
    pub role: Option<Role>,
    pub created_at: DateTime<Utc>,
}

// Structure matching the users.yaml file format: the username is the map
// key, so stored records do not repeat it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoredUser {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub password_hash: String,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    pub created_at: DateTime<Utc>,
}

fn default_is_active() -> bool {
    true
}

impl StoredUser {
    pub fn into_user(self, username: String) -> User {
        User {
            id: self.id,
            username,
            email: self.email,
            password_hash: self.password_hash,
            is_active: self.is_active,
            role: self.role,
            created_at: self.created_at,
        }
    }

    pub fn from_user(user: &User) -> Self {
        StoredUser {
            id: user.id,
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            is_active: user.is_active,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub enum IamError {
    UserNotFound(String),
    Conflict(String),
    ServiceNotInitialized,
    ConfigurationError(String),
    FileError(String),
    ParseError(String),
}

impl std::fmt::Display for IamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IamError::UserNotFound(username) => write!(f, "User not found: {}", username),
            IamError::Conflict(msg) => write!(f, "{}", msg),
            IamError::ServiceNotInitialized => write!(f, "IAM service not initialized"),
            IamError::ConfigurationError(msg) => write!(f, "Configuration error: {}", msg),
            IamError::FileError(msg) => write!(f, "File error: {}", msg),
            IamError::ParseError(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for IamError {}

// Mutation commands for the single-writer background task. Serializing all
// writes through one task is what turns a registration race into a clean
// Conflict for the loser.
#[derive(Debug)]
pub enum UserMutation {
    Register {
        username: String,
        email: Option<String>,
        password_hash: String,
        role: Option<Role>,
    },
    SetActive {
        username: String,
        active: bool,
    },
}

#[derive(Debug)]
pub enum UserMutationResult {
    Registered(User),
    ActiveChanged,
}

// The users.yaml file structure: username -> stored record
pub type StoredUsersData = HashMap<String, StoredUser>;
pub type UsersData = HashMap<String, User>;
