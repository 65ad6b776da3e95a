// This file is part of the product LexHub.
// SPDX-FileCopyrightText: 2026 LexHub Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::types::{IamError, Role, User, UserMutation, UserMutationResult, UsersData};
use crate::iam::store::UserStore;
use chrono::Utc;
use std::sync::{Arc, RwLock};
use tokio::sync::{mpsc, oneshot};

// Type aliases for complex channel types
type MutationRequest = (
    UserMutation,
    oneshot::Sender<Result<UserMutationResult, IamError>>,
);
type MutationSender = mpsc::UnboundedSender<MutationRequest>;
type MutationReceiver = mpsc::UnboundedReceiver<MutationRequest>;

/// Account service backing authentication and the user-facing endpoints.
///
/// Reads go straight to the shared map. All writes are funneled through a
/// single background task, so two concurrent registrations of the same
/// username resolve deterministically: one wins, the other gets a Conflict.
#[derive(Clone)]
pub struct IamService {
    users_data: Arc<RwLock<UsersData>>,
    mutation_sender: MutationSender,
    store: Arc<dyn UserStore>,
}

impl IamService {
    /// Load users from the store and start the background mutation task.
    pub fn new(store: Arc<dyn UserStore>) -> Result<Self, IamError> {
        let users = store.load()?;
        let users_data = Arc::new(RwLock::new(users));

        let (mutation_sender, mut mutation_receiver): (MutationSender, MutationReceiver) =
            mpsc::unbounded_channel();

        let users_data_clone = users_data.clone();
        let store_clone = store.clone();

        tokio::spawn(async move {
            while let Some((mutation, response_sender)) = mutation_receiver.recv().await {
                let result = Self::handle_mutation(&mutation, &users_data_clone, &store_clone);
                let _ = response_sender.send(result);
            }
        });

        Ok(IamService {
            users_data,
            mutation_sender,
            store,
        })
    }

    fn reload_users_from_store(
        users_data: &Arc<RwLock<UsersData>>,
        store: &Arc<dyn UserStore>,
    ) -> Result<(), IamError> {
        let users = store.load()?;
        match users_data.write() {
            Ok(mut guard) => {
                *guard = users;
                users_data.clear_poison();
                Ok(())
            }
            Err(poisoned) => {
                log::error!("Users lock poisoned during reload; recovering");
                let mut guard = poisoned.into_inner();
                *guard = users;
                users_data.clear_poison();
                Ok(())
            }
        }
    }

    fn with_users_read<T>(
        &self,
        f: impl FnOnce(&UsersData) -> Result<T, IamError>,
    ) -> Result<T, IamError> {
        match self.users_data.read() {
            Ok(guard) => f(&guard),
            Err(_) => {
                log::error!("Users lock poisoned on read; reloading from disk");
                Self::reload_users_from_store(&self.users_data, &self.store)?;
                let guard = self.users_data.read().map_err(|_| {
                    IamError::ConfigurationError(
                        "Users lock poisoned after recovery attempt".to_string(),
                    )
                })?;
                f(&guard)
            }
        }
    }

    fn with_users_write<T>(
        users_data: &Arc<RwLock<UsersData>>,
        store: &Arc<dyn UserStore>,
        f: impl FnOnce(&mut UsersData) -> Result<T, IamError>,
    ) -> Result<T, IamError> {
        let mut guard = match users_data.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::error!("Users lock poisoned on write; reloading from disk");
                let mut guard = poisoned.into_inner();
                let users = store.load()?;
                *guard = users;
                users_data.clear_poison();
                guard
            }
        };

        f(&mut guard)
    }

    /// Handle a user mutation (runs in the background task)
    fn handle_mutation(
        mutation: &UserMutation,
        users_data: &Arc<RwLock<UsersData>>,
        store: &Arc<dyn UserStore>,
    ) -> Result<UserMutationResult, IamError> {
        match mutation {
            UserMutation::Register {
                username,
                email,
                password_hash,
                role,
            } => Self::with_users_write(users_data, store, |users| {
                if users.contains_key(username) {
                    return Err(IamError::Conflict("Username already taken".to_string()));
                }
                if let Some(email) = email {
                    if users.values().any(|u| u.email.as_deref() == Some(email)) {
                        return Err(IamError::Conflict("Email already registered".to_string()));
                    }
                }

                let next_id = users.values().map(|u| u.id).max().unwrap_or(0) + 1;
                let user = User {
                    id: next_id,
                    username: username.clone(),
                    email: email.clone(),
                    password_hash: password_hash.clone(),
                    is_active: true,
                    role: *role,
                    created_at: Utc::now(),
                };

                let mut updated = users.clone();
                updated.insert(username.clone(), user.clone());

                // Persist first; memory only changes once the file is safe.
                store.save(&updated)?;
                *users = updated;
                Ok(UserMutationResult::Registered(user))
            }),
            UserMutation::SetActive { username, active } => {
                Self::with_users_write(users_data, store, |users| {
                    let mut updated = users.clone();
                    let user = match updated.get_mut(username) {
                        Some(user) => user,
                        None => return Err(IamError::UserNotFound(username.clone())),
                    };
                    user.is_active = *active;

                    store.save(&updated)?;
                    *users = updated;
                    Ok(UserMutationResult::ActiveChanged)
                })
            }
        }
    }

    /// Get a user by username. Inactive accounts are still returned; the
    /// caller decides what a disabled account means for the request.
    pub fn get_user(&self, username: &str) -> Result<Option<User>, IamError> {
        log::debug!("Looking up user: {}", username);
        self.with_users_read(|users| Ok(users.get(username).cloned()))
    }

    /// Get a user by numeric id.
    pub fn get_user_by_id(&self, id: u64) -> Result<Option<User>, IamError> {
        self.with_users_read(|users| Ok(users.values().find(|u| u.id == id).cloned()))
    }

    /// List all users.
    pub fn list_users(&self) -> Result<Vec<User>, IamError> {
        self.with_users_read(|users| Ok(users.values().cloned().collect()))
    }

    /// Register a new account (async mutation operation).
    pub async fn register_user(
        &self,
        username: &str,
        email: Option<&str>,
        password_hash: &str,
        role: Option<Role>,
    ) -> Result<User, IamError> {
        let (response_sender, response_receiver) = oneshot::channel();

        let mutation = UserMutation::Register {
            username: username.to_string(),
            email: email.map(|s| s.to_string()),
            password_hash: password_hash.to_string(),
            role,
        };

        self.mutation_sender
            .send((mutation, response_sender))
            .map_err(|_| IamError::ServiceNotInitialized)?;

        let result = response_receiver
            .await
            .map_err(|_| IamError::ServiceNotInitialized)?;

        match result? {
            UserMutationResult::Registered(user) => Ok(user),
            _ => Err(IamError::ConfigurationError(
                "Unexpected result".to_string(),
            )),
        }
    }

    /// Enable or disable an account (async mutation operation).
    pub async fn set_user_active(&self, username: &str, active: bool) -> Result<(), IamError> {
        let (response_sender, response_receiver) = oneshot::channel();

        let mutation = UserMutation::SetActive {
            username: username.to_string(),
            active,
        };

        self.mutation_sender
            .send((mutation, response_sender))
            .map_err(|_| IamError::ServiceNotInitialized)?;

        let result = response_receiver
            .await
            .map_err(|_| IamError::ServiceNotInitialized)?;

        match result? {
            UserMutationResult::ActiveChanged => Ok(()),
            _ => Err(IamError::ConfigurationError(
                "Unexpected result".to_string(),
            )),
        }
    }
}
