// This file is part of the product LexHub.
// SPDX-FileCopyrightText: 2026 LexHub Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::jwt::JwtService;
use super::password::{hash_password, verify_password};
use super::service::IamService;
use super::types::{IamError, Role, User};
use crate::security::{validate_email_field, validate_password_field, validate_username_field};
use std::sync::Arc;

/// Errors surfaced by authentication and authorization. The API layer maps
/// each variant to a status code; the messages here are safe to show.
#[derive(Debug, Clone)]
pub enum AuthError {
    /// No usable identity: missing, malformed, expired or forged token, or
    /// a token for an account that no longer exists.
    Unauthenticated,
    /// Valid token for an account that has been deactivated.
    Disabled,
    /// Authenticated, but not allowed to touch this resource.
    Forbidden,
    /// Registration collides with an existing username or email.
    Conflict(String),
    /// Login failed. Deliberately does not say which part was wrong.
    InvalidCredentials,
    Validation(String),
    Internal(String),
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::Unauthenticated => write!(f, "Not authenticated"),
            AuthError::Disabled => write!(f, "Account is disabled"),
            AuthError::Forbidden => write!(f, "Not allowed"),
            AuthError::Conflict(msg) => write!(f, "{}", msg),
            AuthError::InvalidCredentials => write!(f, "Incorrect username or password"),
            AuthError::Validation(msg) => write!(f, "{}", msg),
            AuthError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<IamError> for AuthError {
    fn from(err: IamError) -> Self {
        match err {
            IamError::Conflict(msg) => AuthError::Conflict(msg),
            other => AuthError::Internal(other.to_string()),
        }
    }
}

/// Facade over account storage, password hashing and token handling. One
/// instance is shared by every request handler.
#[derive(Clone)]
pub struct AuthService {
    iam: IamService,
    jwt: Arc<JwtService>,
    dummy_hash: String,
}

impl AuthService {
    pub fn new(iam: IamService, jwt: Arc<JwtService>) -> Result<Self, AuthError> {
        // Hashed once at startup, then verified against whenever a login
        // names an unknown user, so both paths cost one argon2 run.
        let dummy_hash = hash_password("lexhub-placeholder")
            .map_err(|err| AuthError::Internal(err.to_string()))?;
        Ok(AuthService {
            iam,
            jwt,
            dummy_hash,
        })
    }

    pub fn users(&self) -> &IamService {
        &self.iam
    }

    /// Create a new account. Usernames and emails are unique; the loser of
    /// a simultaneous registration gets a Conflict.
    pub async fn register(
        &self,
        username: &str,
        email: Option<&str>,
        password: &str,
        role: Option<Role>,
    ) -> Result<User, AuthError> {
        validate_username_field(username).map_err(AuthError::Validation)?;
        validate_password_field(password).map_err(AuthError::Validation)?;
        // Store the trimmed form, otherwise the uniqueness check would
        // treat " a@b.c" and "a@b.c" as distinct addresses.
        let email = email.map(str::trim);
        if let Some(email) = email {
            validate_email_field(email).map_err(AuthError::Validation)?;
        }

        let password_hash =
            hash_password(password).map_err(|err| AuthError::Internal(err.to_string()))?;
        let user = self
            .iam
            .register_user(username, email, &password_hash, role)
            .await?;
        log::info!("Registered user {} (id {})", user.username, user.id);
        Ok(user)
    }

    /// Verify credentials and issue a token. Unknown username, wrong
    /// password and deactivated account all fail identically, and the
    /// unknown-username path still runs a full password verification.
    pub async fn login(&self, username: &str, password: &str) -> Result<(String, User), AuthError> {
        let user = self.iam.get_user(username)?;

        let user = match user {
            Some(user) => user,
            None => {
                let _ = verify_password(password, &self.dummy_hash);
                return Err(AuthError::InvalidCredentials);
            }
        };

        if !verify_password(password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }
        if !user.is_active {
            log::info!("Login rejected for deactivated user {}", user.username);
            return Err(AuthError::InvalidCredentials);
        }

        let token = self
            .jwt
            .issue_token(&user.username, None)
            .map_err(|err| AuthError::Internal(err.to_string()))?;
        log::info!("User {} logged in", user.username);
        Ok((token, user))
    }

    /// Resolve a bearer token to an active user. Anything short of a valid
    /// token for an existing account is Unauthenticated; a valid token for
    /// a deactivated account is Disabled.
    pub fn resolve_required(&self, token: Option<&str>) -> Result<User, AuthError> {
        let token = match token {
            Some(token) if !token.is_empty() => token,
            _ => return Err(AuthError::Unauthenticated),
        };

        let claims = self
            .jwt
            .verify_token(token)
            .map_err(|_| AuthError::Unauthenticated)?;

        let user = self
            .iam
            .get_user(&claims.sub)?
            .ok_or(AuthError::Unauthenticated)?;

        if !user.is_active {
            return Err(AuthError::Disabled);
        }
        Ok(user)
    }

    /// Resolve a bearer token if one is present and valid; otherwise the
    /// request proceeds anonymously.
    pub fn resolve_optional(&self, token: Option<&str>) -> Option<User> {
        self.resolve_required(token).ok()
    }

    /// Deactivate an account. Outstanding tokens keep verifying but stop
    /// resolving to a user.
    pub async fn set_active(&self, username: &str, active: bool) -> Result<(), AuthError> {
        self.iam
            .set_user_active(username, active)
            .await
            .map_err(AuthError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_auth_params;
    use crate::iam::store::MemoryUserStore;
    use crate::iam::types::UsersData;

    fn auth_service() -> AuthService {
        let store = Arc::new(MemoryUserStore::new(UsersData::new()));
        let iam = IamService::new(store).expect("iam");
        let jwt = Arc::new(JwtService::new(&test_auth_params()).expect("jwt"));
        AuthService::new(iam, jwt).expect("auth")
    }

    #[tokio::test]
    async fn register_then_login_round_trips() {
        let auth = auth_service();
        auth.register("alice", Some("alice@example.com"), "hunter22", Some(Role::Lawyer))
            .await
            .expect("register");
        let (token, user) = auth.login("alice", "hunter22").await.expect("login");
        assert_eq!(user.username, "alice");

        let resolved = auth.resolve_required(Some(&token)).expect("resolve");
        assert_eq!(resolved.id, user.id);
    }

    #[tokio::test]
    async fn login_failures_are_uniform() {
        let auth = auth_service();
        auth.register("alice", None, "hunter22", None)
            .await
            .expect("register");

        let wrong_password = auth.login("alice", "wrong").await.expect_err("wrong pw");
        let unknown_user = auth.login("ghost", "hunter22").await.expect_err("no user");
        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown_user, AuthError::InvalidCredentials));

        auth.set_active("alice", false).await.expect("deactivate");
        let disabled = auth.login("alice", "hunter22").await.expect_err("disabled");
        assert!(matches!(disabled, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn register_validates_input() {
        let auth = auth_service();
        let short_name = auth.register("ab", None, "hunter22", None).await;
        assert!(matches!(short_name, Err(AuthError::Validation(_))));
        let short_password = auth.register("alice", None, "pw", None).await;
        assert!(matches!(short_password, Err(AuthError::Validation(_))));
        let bad_email = auth.register("alice", Some("nope"), "hunter22", None).await;
        assert!(matches!(bad_email, Err(AuthError::Validation(_))));
    }

    #[tokio::test]
    async fn emails_are_trimmed_before_storage_and_uniqueness() {
        let auth = auth_service();
        let user = auth
            .register("alice", Some(" alice@example.com "), "hunter22", None)
            .await
            .expect("register");
        assert_eq!(user.email.as_deref(), Some("alice@example.com"));

        let duplicate = auth
            .register("bob", Some("alice@example.com"), "hunter22", None)
            .await
            .expect_err("duplicate email");
        assert!(matches!(duplicate, AuthError::Conflict(_)));
    }

    #[tokio::test]
    async fn missing_and_garbage_tokens_are_unauthenticated() {
        let auth = auth_service();
        assert!(matches!(
            auth.resolve_required(None),
            Err(AuthError::Unauthenticated)
        ));
        assert!(matches!(
            auth.resolve_required(Some("")),
            Err(AuthError::Unauthenticated)
        ));
        assert!(matches!(
            auth.resolve_required(Some("not.a.token")),
            Err(AuthError::Unauthenticated)
        ));
        assert!(auth.resolve_optional(Some("not.a.token")).is_none());
    }

    #[tokio::test]
    async fn token_for_deactivated_user_is_disabled() {
        let auth = auth_service();
        auth.register("alice", None, "hunter22", None)
            .await
            .expect("register");
        let (token, _) = auth.login("alice", "hunter22").await.expect("login");
        auth.set_active("alice", false).await.expect("deactivate");

        assert!(matches!(
            auth.resolve_required(Some(&token)),
            Err(AuthError::Disabled)
        ));
        assert!(auth.resolve_optional(Some(&token)).is_none());
    }
}
